//! Image fit planner
//!
//! Two independent computations for existing image frames: scaling an
//! image so it fills its frame with the overflow centered, and deriving
//! the crop box and output pixel size that re-render the frame's visible
//! region at a target print resolution. Decoding, resampling and saving
//! belong to the image-processing collaborator; only geometry is computed
//! here.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{PixelSize, Rect, Unit};

/// Uniform scale and centering offsets that make an image fill its frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillFit {
    /// Uniform scale applied to both axes
    pub scale: f64,
    /// Horizontal image offset recentering the overflow
    pub offset_x: f64,
    /// Vertical image offset recentering the overflow
    pub offset_y: f64,
}

/// Scale an image proportionally so it covers its whole frame, then
/// center the overflowing axis.
///
/// The scale is the larger of the two per-axis factors, so the frame is
/// covered on both axes and the looser axis overflows and gets cropped by
/// the frame boundary. The offset is zero on the axis that fills exactly.
pub fn fit_fill(frame: Rect, image: PixelSize) -> Result<FillFit> {
    if image.width == 0 || image.height == 0 {
        return Err(Error::InvalidSpec("image has no pixels".into()));
    }
    if !frame.has_area() {
        return Err(Error::InvalidSpec(format!(
            "frame {}x{} has no area",
            frame.width, frame.height
        )));
    }

    let sx = frame.width / image.width as f64;
    let sy = frame.height / image.height as f64;
    let scale = sx.max(sy);

    Ok(FillFit {
        scale,
        offset_x: frame.width * (1.0 - scale / sx) / 2.0,
        offset_y: frame.height * (1.0 - scale / sy) / 2.0,
    })
}

/// Inputs for planning a crop-and-resize of one image frame.
///
/// The offset and scale describe what is presently visible inside the
/// frame, as reported by the host document: the offset is the image
/// origin relative to the frame in image pixels, the scale maps image
/// pixels to points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropSpec {
    /// Frame width in `unit`
    pub frame_width: f64,
    /// Frame height in `unit`
    pub frame_height: f64,
    /// Document unit of the frame dimensions
    pub unit: Unit,
    /// Native pixel size of the placed image
    pub image: PixelSize,
    /// Current image offset within the frame (x, y)
    pub image_offset: (f64, f64),
    /// Current image scale (x, y), points per pixel
    pub image_scale: (f64, f64),
    /// Print resolution the output is rendered for
    pub target_dpi: u32,
}

/// Crop box in image pixel coordinates, left/top inclusive,
/// right/bottom exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropBox {
    /// Width of the cropped region in pixels
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    /// Height of the cropped region in pixels
    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Planned crop-and-resize for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropPlan {
    /// Region of the source image to keep
    pub crop: CropBox,
    /// Pixel size the cropped region is resized to
    pub output: PixelSize,
}

/// Compute the crop box and output size for a frame at a target DPI.
///
/// The crop box is the region currently visible inside the frame, clamped
/// to the image bounds so the output never includes blank margin. The
/// output size starts from the frame's physical size at `target_dpi` and
/// one dimension is then recomputed so the output matches the cropped
/// region's aspect ratio exactly. All conversions truncate toward zero.
///
/// Fails with [`Error::DegenerateCrop`] when nothing of the image is
/// visible in the frame after clamping.
pub fn plan_crop(spec: &CropSpec) -> Result<CropPlan> {
    if spec.target_dpi == 0 {
        return Err(Error::InvalidSpec("target DPI must be positive".into()));
    }
    if spec.image.width == 0 || spec.image.height == 0 {
        return Err(Error::InvalidSpec("image has no pixels".into()));
    }
    if spec.frame_width <= 0.0 || spec.frame_height <= 0.0 {
        return Err(Error::InvalidSpec(format!(
            "frame {}x{} has no area",
            spec.frame_width, spec.frame_height
        )));
    }
    let (scale_x, scale_y) = spec.image_scale;
    if scale_x <= 0.0 || scale_y <= 0.0 {
        return Err(Error::InvalidSpec(format!(
            "image scale {}x{} is not positive",
            scale_x, scale_y
        )));
    }

    // Desired output pixels from the frame's physical size
    let dpi = spec.target_dpi as f64;
    let mut new_w = (spec.unit.to_inches(spec.frame_width) * dpi) as i64;
    let mut new_h = (spec.unit.to_inches(spec.frame_height) * dpi) as i64;
    if new_w < 1 || new_h < 1 {
        return Err(Error::InvalidSpec(format!(
            "frame renders to an empty {}x{} output at {} DPI",
            new_w, new_h, spec.target_dpi
        )));
    }

    // Region currently visible inside the frame, in image pixels
    let frame_w_pt = spec.unit.to_points(spec.frame_width);
    let frame_h_pt = spec.unit.to_points(spec.frame_height);
    let (offset_x, offset_y) = spec.image_offset;
    let mut left = (-offset_x) as i64;
    let mut top = (-offset_y) as i64;
    let mut right = (left as f64 + frame_w_pt / scale_x) as i64;
    let mut bottom = (top as f64 + frame_h_pt / scale_y) as i64;

    // Limit the crop to the image area; a positive offset means the image
    // origin sits inside the frame, exposing blank margin
    let img_w = spec.image.width as i64;
    let img_h = spec.image.height as i64;
    if right > img_w {
        right = img_w;
    }
    if bottom > img_h {
        bottom = img_h;
    }
    if offset_x > 0.0 {
        left = 0;
    }
    if offset_y > 0.0 {
        top = 0;
    }

    if right <= left || bottom <= top {
        return Err(Error::DegenerateCrop(format!(
            "visible region ({}, {})-({}, {}) is empty for a {}x{} image",
            left, top, right, bottom, spec.image.width, spec.image.height
        )));
    }

    // Match the output size to the cropped region's aspect ratio
    let crop_w = (right - left) as f64;
    let crop_h = (bottom - top) as f64;
    let proportion_x = new_w as f64 / crop_w;
    let proportion_y = new_h as f64 / crop_h;
    if proportion_x > proportion_y {
        new_h = (new_w as f64 * crop_h / crop_w) as i64;
    } else {
        new_w = (new_h as f64 * crop_w / crop_h) as i64;
    }
    if new_w < 1 || new_h < 1 {
        return Err(Error::InvalidSpec(format!(
            "output size {}x{} collapsed while matching the crop aspect",
            new_w, new_h
        )));
    }

    Ok(CropPlan {
        crop: CropBox {
            left: left as u32,
            top: top as u32,
            right: right as u32,
            bottom: bottom as u32,
        },
        output: PixelSize::new(new_w as u32, new_h as u32),
    })
}

/// Resampling filter applied by the image-processing collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Resample {
    #[default]
    Bicubic,
    Bilinear,
    Lanczos,
}

/// Color mode the output is converted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMode {
    #[default]
    Rgb,
    Cmyk,
    Grayscale,
    Bilevel,
}

/// File format of the re-encoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Jpg,
    Png,
    Tif,
}

/// Print resolutions offered by the crop tool
pub const STANDARD_RESOLUTIONS: [u32; 10] =
    [72, 75, 96, 144, 150, 200, 288, 300, 600, 1200];

/// A crop plan request together with the processing parameters the
/// image-processing collaborator applies when cropping, resampling and
/// re-encoding the file. The planner itself only reads `spec`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRequest {
    pub spec: CropSpec,
    pub resample: Resample,
    pub color_mode: ColorMode,
    pub format: OutputFormat,
}

impl CropRequest {
    /// Request with the crop tool's default processing parameters
    pub fn new(spec: CropSpec) -> Self {
        Self {
            spec,
            resample: Resample::default(),
            color_mode: ColorMode::default(),
            format: OutputFormat::default(),
        }
    }

    /// Plan the geometry of this request
    pub fn plan(&self) -> Result<CropPlan> {
        plan_crop(&self.spec)
    }
}
