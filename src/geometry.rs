//! Geometry value types shared by the layout planners

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Axis-aligned rectangle in document coordinates.
///
/// All values are in a single consistent linear unit (typically points).
/// A rectangle can only be materialized as a frame when both dimensions
/// are positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (x + width)
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (y + height)
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether both dimensions are positive
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Smallest rectangle containing both `self` and `other`
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }
}

/// Bounding box of a set of item rectangles.
///
/// Returns `None` for an empty selection. Used to derive the source
/// rectangle when the user has one or more items selected.
pub fn bounding_rect(items: &[Rect]) -> Option<Rect> {
    let (first, rest) = items.split_first()?;
    Some(rest.iter().fold(*first, |acc, r| acc.union(r)))
}

/// Page margins in document units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Margins {
    /// Create margins with the same value on all sides
    pub fn uniform(margin: f64) -> Self {
        Self {
            top: margin,
            left: margin,
            right: margin,
            bottom: margin,
        }
    }

    /// Zero margins (the full page is usable)
    pub fn none() -> Self {
        Self::uniform(0.0)
    }
}

/// Content area of a page after subtracting its margins.
///
/// This is the source rectangle used when nothing is selected.
/// Fails when the margins leave no usable area.
pub fn content_rect(page_width: f64, page_height: f64, margins: Margins) -> Result<Rect> {
    let rect = Rect::new(
        margins.left,
        margins.top,
        page_width - margins.left - margins.right,
        page_height - margins.top - margins.bottom,
    );
    if !rect.has_area() {
        return Err(Error::InvalidSpec(format!(
            "page margins leave no content area on a {}x{} page",
            page_width, page_height
        )));
    }
    Ok(rect)
}

/// Native pixel dimensions of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    /// Create a new pixel size
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Document measurement units
///
/// The host application reports frame sizes in whichever unit the document
/// uses; the crop planner converts through points and inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    Points,
    Millimeters,
    Inches,
    Picas,
    Centimeters,
    Ciceros,
}

impl Unit {
    /// Points per one unit of this measurement system
    pub fn points_per_unit(self) -> f64 {
        const PT_PER_MM: f64 = 72.0 / 25.4;
        match self {
            Unit::Points => 1.0,
            Unit::Millimeters => PT_PER_MM,
            Unit::Inches => 72.0,
            Unit::Picas => 12.0,
            Unit::Centimeters => 10.0 * PT_PER_MM,
            // cicero = 12 didot points of 0.376 mm
            Unit::Ciceros => 12.0 * 0.376 * PT_PER_MM,
        }
    }

    /// Convert a value in this unit to points
    pub fn to_points(self, value: f64) -> f64 {
        value * self.points_per_unit()
    }

    /// Convert a value in this unit to inches
    pub fn to_inches(self, value: f64) -> f64 {
        self.to_points(value) / 72.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversions() {
        assert!((Unit::Inches.to_points(1.0) - 72.0).abs() < 1e-9);
        assert!((Unit::Millimeters.to_points(25.4) - 72.0).abs() < 1e-9);
        assert!((Unit::Picas.to_inches(6.0) - 1.0).abs() < 1e-9);
        assert!((Unit::Points.to_inches(36.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_union_expands_to_cover_both() {
        let a = Rect::new(10.0, 10.0, 20.0, 20.0);
        let b = Rect::new(40.0, 5.0, 10.0, 10.0);
        let u = a.union(&b);
        assert_eq!(u, Rect::new(10.0, 5.0, 40.0, 25.0));
    }

    #[test]
    fn test_bounding_rect_of_selection() {
        let items = [
            Rect::new(50.0, 60.0, 100.0, 40.0),
            Rect::new(20.0, 80.0, 30.0, 30.0),
            Rect::new(90.0, 10.0, 10.0, 10.0),
        ];
        let bounds = bounding_rect(&items).unwrap();
        assert_eq!(bounds.x, 20.0);
        assert_eq!(bounds.y, 10.0);
        assert_eq!(bounds.right(), 150.0);
        assert_eq!(bounds.bottom(), 110.0);

        assert!(bounding_rect(&[]).is_none());
    }

    #[test]
    fn test_content_rect_within_margins() {
        let rect = content_rect(595.0, 842.0, Margins::uniform(40.0)).unwrap();
        assert_eq!(rect, Rect::new(40.0, 40.0, 515.0, 762.0));
    }

    #[test]
    fn test_content_rect_rejects_oversized_margins() {
        let result = content_rect(100.0, 100.0, Margins::uniform(60.0));
        assert!(result.is_err());
    }
}
