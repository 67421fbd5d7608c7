//! Presentation attributes for planned frames
//!
//! The planners emit geometry; these are the styling attributes a caller
//! applies uniformly to every frame of one invocation.

use serde::{Deserialize, Serialize};

/// CMYK color, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmykColor {
    pub c: u8,
    pub m: u8,
    pub y: u8,
    pub k: u8,
}

impl CmykColor {
    /// Create a new CMYK color
    pub const fn new(c: u8, m: u8, y: u8, k: u8) -> Self {
        Self { c, m, y, k }
    }

    /// Default frame fill
    pub const fn light_grey() -> Self {
        Self::new(0, 0, 0, 64)
    }

    /// Default frame border
    pub const fn dark_grey() -> Self {
        Self::new(0, 0, 0, 200)
    }

    /// Alternate frame border
    pub const fn white() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

/// Stroke style for a frame border
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: CmykColor,
    /// Line width in points
    pub width_pt: f64,
}

/// Which of the two border line styles a layout run uses.
///
/// A single global toggle per invocation, never per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderStyle {
    Primary,
    Alternate,
}

impl BorderStyle {
    /// Style selected by the `alternate_border` toggle
    pub fn select(alternate: bool) -> Self {
        if alternate {
            BorderStyle::Alternate
        } else {
            BorderStyle::Primary
        }
    }

    /// Stroke to apply to every frame of the run
    pub fn line_style(self) -> LineStyle {
        let color = match self {
            BorderStyle::Primary => CmykColor::dark_grey(),
            BorderStyle::Alternate => CmykColor::white(),
        };
        LineStyle {
            color,
            width_pt: 1.0,
        }
    }
}

/// Fill and border applied to every frame of one layout run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameStyle {
    pub fill: CmykColor,
    pub border: LineStyle,
}

impl FrameStyle {
    /// Style for a layout run, honoring the alternate-border toggle
    pub fn for_layout(alternate: bool) -> Self {
        Self {
            fill: CmykColor::light_grey(),
            border: BorderStyle::select(alternate).line_style(),
        }
    }
}

/// Text style for a caption band.
///
/// The caption is centered both horizontally and vertically within its
/// band; the font size is derived from the band height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptionStyle {
    /// Font size in points
    pub font_size_pt: f64,
}

impl CaptionStyle {
    /// Derive the caption text style from the band height in points.
    ///
    /// The band must hold a single centered line, so the size is the band
    /// height divided by 1.5, floored to a whole point.
    pub fn for_band_height(height_pt: f64) -> Self {
        Self {
            font_size_pt: (height_pt.abs() / 1.5).floor(),
        }
    }
}
