//! Photo Book Tools Library
//!
//! Layout planning for photo book pages. This library provides
//! functionality to:
//! - Split a source rectangle or page-margin area into a grid of image
//!   frames with gaps, captions, aspect constraints and alignment
//! - Scale an image to fill its frame and center the overflow
//! - Derive the crop box and output size that re-render a frame's
//!   visible image region at a target print resolution
//! - Plan whole selections best-effort, one frame at a time
//! - Persist the grid tool's parameters between runs
//!
//! The planners are pure: the host document supplies rectangles, image
//! sizes and offsets, and applies the returned geometry itself.
//!
//! # Example
//!
//! ```
//! use photobook_tools::geometry::Rect;
//! use photobook_tools::grid::{plan_grid, GridSpec};
//!
//! let source = Rect::new(0.0, 0.0, 300.0, 200.0);
//! let spec = GridSpec {
//!     columns: 3,
//!     rows: 2,
//!     gap: 10.0,
//!     ..GridSpec::default()
//! };
//!
//! let layout = plan_grid(source, &spec).expect("valid layout");
//! assert_eq!(layout.cells.len(), 6);
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod fit;
pub mod geometry;
pub mod grid;
pub mod style;

// Re-export commonly used items
pub use error::{Error, Result};
pub use fit::{fit_fill, plan_crop, CropPlan, CropSpec, FillFit};
pub use geometry::{PixelSize, Rect, Unit};
pub use grid::{plan_grid, GridLayout, GridSpec};
