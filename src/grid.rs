//! Grid layout planner
//!
//! Splits a source rectangle (a selection's bounding box, or the area
//! within page margins) into a grid of image frames with optional caption
//! bands, gaps, aspect constraint, scaling and alignment.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::style::BorderStyle;

/// Horizontal placement of the grid inside the source rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

/// Vertical placement of the grid inside the source rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

/// Parameters for one grid layout run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of columns, at least 1
    pub columns: u32,
    /// Number of rows, at least 1
    pub rows: u32,
    /// Gap between adjacent cells, in document units
    pub gap: f64,
    /// Width-to-height ratio every cell must match; 0 keeps the full
    /// computed cell
    pub target_aspect: f64,
    /// Percentage of the source rectangle the grid consumes
    pub scale_percent: f64,
    pub horizontal_align: HorizontalAlign,
    pub vertical_align: VerticalAlign,
    /// Caption band height in document units. 0 means no caption.
    /// Positive: the band is carved out of the available cell height and
    /// placed below the frame. Negative: the band overlays the bottom
    /// `|caption_height|` of an unchanged frame.
    pub caption_height: f64,
    /// Whether the caller should delete the source items afterwards
    pub remove_source: bool,
    /// Use the alternate border line style for this run
    pub alternate_border: bool,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            columns: 2,
            rows: 2,
            gap: 0.0,
            target_aspect: 0.0,
            scale_percent: 100.0,
            horizontal_align: HorizontalAlign::Left,
            vertical_align: VerticalAlign::Top,
            caption_height: 0.0,
            remove_source: false,
            alternate_border: false,
        }
    }
}

/// One planned cell: an image frame and its caption band, if any
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub frame: Rect,
    pub caption: Option<Rect>,
}

/// Result of one grid layout run.
///
/// Cells are ordered column-major (all rows of the first column, then the
/// next column), matching the order in which the caller materializes
/// frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub cells: Vec<GridCell>,
    /// Border style to apply uniformly to every frame of this run
    pub border_style: BorderStyle,
    /// Echo of the spec's remove_source flag; acted on by the caller only
    /// after every cell was materialized
    pub remove_source: bool,
}

/// Compute the grid layout for a source rectangle.
///
/// Fails with [`Error::InvalidSpec`] when the column or row count is zero,
/// the source rectangle has no area, or the derived cell size is not
/// positive.
pub fn plan_grid(source: Rect, spec: &GridSpec) -> Result<GridLayout> {
    if spec.columns < 1 || spec.rows < 1 {
        return Err(Error::InvalidSpec(format!(
            "columns and rows must be at least 1, got {}x{}",
            spec.columns, spec.rows
        )));
    }
    if !source.has_area() {
        return Err(Error::InvalidSpec(format!(
            "source rectangle {}x{} has no area",
            source.width, source.height
        )));
    }

    let cols = spec.columns as f64;
    let rows = spec.rows as f64;
    let scale = spec.scale_percent / 100.0;
    let caption = spec.caption_height;

    let mut cell_w = (scale * source.width - spec.gap * (cols - 1.0)) / cols;
    let mut cell_h = if caption > 0.0 {
        (scale * source.height - spec.gap * (rows - 1.0) - caption * rows) / rows
    } else {
        (scale * source.height - spec.gap * (rows - 1.0)) / rows
    };
    if cell_w <= 0.0 || cell_h <= 0.0 {
        return Err(Error::InvalidSpec(format!(
            "derived cell size {:.2}x{:.2} is not positive",
            cell_w, cell_h
        )));
    }

    // Shrink the dimension in excess of the requested aspect ratio
    if spec.target_aspect > 0.0 {
        let natural = cell_w / cell_h;
        if spec.target_aspect < natural {
            cell_w = cell_h * spec.target_aspect;
        } else {
            cell_h = cell_w / spec.target_aspect;
        }
    }

    // Total occupied span; carved-out caption bands count, overlays do not
    let band = caption.max(0.0);
    let span_w = cell_w * cols + spec.gap * (cols - 1.0);
    let span_h = (cell_h + band) * rows + spec.gap * (rows - 1.0);

    let origin_x = match spec.horizontal_align {
        HorizontalAlign::Left => source.x,
        HorizontalAlign::Center => source.x + (source.width - span_w) / 2.0,
        HorizontalAlign::Right => source.x + source.width - span_w,
    };
    let origin_y = match spec.vertical_align {
        VerticalAlign::Top => source.y,
        VerticalAlign::Center => source.y + (source.height - span_h) / 2.0,
        VerticalAlign::Bottom => source.y + source.height - span_h,
    };

    let mut cells = Vec::with_capacity((spec.columns * spec.rows) as usize);
    let mut x = origin_x;
    for _ in 0..spec.columns {
        let mut y = origin_y;
        for _ in 0..spec.rows {
            let frame = Rect::new(x, y, cell_w, cell_h);
            let caption_rect = if caption > 0.0 {
                Some(Rect::new(x, y + cell_h, cell_w, caption))
            } else if caption < 0.0 {
                Some(Rect::new(x, y + cell_h + caption, cell_w, -caption))
            } else {
                None
            };
            cells.push(GridCell {
                frame,
                caption: caption_rect,
            });
            y += cell_h + band + spec.gap;
        }
        x += cell_w + spec.gap;
    }

    Ok(GridLayout {
        cells,
        border_style: BorderStyle::select(spec.alternate_border),
        remove_source: spec.remove_source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn spec_3x2() -> GridSpec {
        GridSpec {
            columns: 3,
            rows: 2,
            gap: 10.0,
            ..GridSpec::default()
        }
    }

    #[test]
    fn test_cell_size_and_column_major_order() {
        let source = Rect::new(0.0, 0.0, 300.0, 200.0);
        let layout = plan_grid(source, &spec_3x2()).unwrap();

        assert_eq!(layout.cells.len(), 6);
        let w = (300.0 - 20.0) / 3.0;
        let h = (200.0 - 10.0) / 2.0;
        for cell in &layout.cells {
            assert!((cell.frame.width - w).abs() < EPS);
            assert!((cell.frame.height - h).abs() < EPS);
            assert!(cell.caption.is_none());
        }

        // column-major: both rows of the first column come first
        assert!((layout.cells[0].frame.x - 0.0).abs() < EPS);
        assert!((layout.cells[0].frame.y - 0.0).abs() < EPS);
        assert!((layout.cells[1].frame.x - 0.0).abs() < EPS);
        assert!((layout.cells[1].frame.y - (h + 10.0)).abs() < EPS);
        assert!((layout.cells[2].frame.x - (w + 10.0)).abs() < EPS);
        assert!((layout.cells[2].frame.y - 0.0).abs() < EPS);
    }

    #[test]
    fn test_tiling_reconstructs_source_span() {
        let source = Rect::new(50.0, 80.0, 300.0, 200.0);
        let layout = plan_grid(source, &spec_3x2()).unwrap();

        let last = layout.cells.last().unwrap();
        assert!((layout.cells[0].frame.x - source.x).abs() < EPS);
        assert!((layout.cells[0].frame.y - source.y).abs() < EPS);
        assert!((last.frame.right() - source.right()).abs() < EPS);
        assert!((last.frame.bottom() - source.bottom()).abs() < EPS);
    }

    #[test]
    fn test_cells_do_not_overlap() {
        let source = Rect::new(0.0, 0.0, 400.0, 300.0);
        let spec = GridSpec {
            columns: 4,
            rows: 3,
            gap: 6.0,
            ..GridSpec::default()
        };
        let layout = plan_grid(source, &spec).unwrap();

        for (i, a) in layout.cells.iter().enumerate() {
            for b in layout.cells.iter().skip(i + 1) {
                let disjoint = a.frame.right() <= b.frame.x + EPS
                    || b.frame.right() <= a.frame.x + EPS
                    || a.frame.bottom() <= b.frame.y + EPS
                    || b.frame.bottom() <= a.frame.y + EPS;
                assert!(disjoint, "{:?} overlaps {:?}", a.frame, b.frame);
            }
        }
    }

    #[test]
    fn test_aspect_constraint_shrinks_wide_cells() {
        let source = Rect::new(0.0, 0.0, 400.0, 100.0);
        let spec = GridSpec {
            columns: 2,
            rows: 1,
            target_aspect: 1.0,
            ..GridSpec::default()
        };
        let layout = plan_grid(source, &spec).unwrap();
        // natural cells are 200x100; width shrinks to match 1:1
        for cell in &layout.cells {
            assert!((cell.frame.width - 100.0).abs() < EPS);
            assert!((cell.frame.height - 100.0).abs() < EPS);
        }
    }

    #[test]
    fn test_aspect_constraint_shrinks_tall_cells() {
        let source = Rect::new(0.0, 0.0, 100.0, 400.0);
        let spec = GridSpec {
            columns: 1,
            rows: 2,
            target_aspect: 2.0,
            ..GridSpec::default()
        };
        let layout = plan_grid(source, &spec).unwrap();
        // natural cells are 100x200; height shrinks to 50 for 2:1
        for cell in &layout.cells {
            assert!((cell.frame.width - 100.0).abs() < EPS);
            assert!((cell.frame.height - 50.0).abs() < EPS);
        }
    }

    #[test]
    fn test_alignment_right_bottom_is_flush() {
        let source = Rect::new(10.0, 20.0, 300.0, 200.0);
        let spec = GridSpec {
            columns: 2,
            rows: 2,
            scale_percent: 50.0,
            horizontal_align: HorizontalAlign::Right,
            vertical_align: VerticalAlign::Bottom,
            ..GridSpec::default()
        };
        let layout = plan_grid(source, &spec).unwrap();
        let last = layout.cells.last().unwrap();
        assert!((last.frame.right() - source.right()).abs() < EPS);
        assert!((last.frame.bottom() - source.bottom()).abs() < EPS);
    }

    #[test]
    fn test_alignment_center_splits_remainder() {
        let source = Rect::new(0.0, 0.0, 200.0, 100.0);
        let spec = GridSpec {
            columns: 1,
            rows: 1,
            scale_percent: 50.0,
            horizontal_align: HorizontalAlign::Center,
            vertical_align: VerticalAlign::Center,
            ..GridSpec::default()
        };
        let layout = plan_grid(source, &spec).unwrap();
        let frame = layout.cells[0].frame;
        let left_space = frame.x - source.x;
        let right_space = source.right() - frame.right();
        assert!((left_space - right_space).abs() < EPS);
        let top_space = frame.y - source.y;
        let bottom_space = source.bottom() - frame.bottom();
        assert!((top_space - bottom_space).abs() < EPS);
    }

    #[test]
    fn test_positive_caption_carves_out_cell_height() {
        let source = Rect::new(0.0, 0.0, 100.0, 260.0);
        let spec = GridSpec {
            columns: 1,
            rows: 2,
            gap: 20.0,
            caption_height: 30.0,
            ..GridSpec::default()
        };
        let layout = plan_grid(source, &spec).unwrap();

        // (260 - 20 - 30*2) / 2 = 90 per frame
        let first = &layout.cells[0];
        assert!((first.frame.height - 90.0).abs() < EPS);
        let caption = first.caption.unwrap();
        assert!((caption.y - first.frame.bottom()).abs() < EPS);
        assert!((caption.height - 30.0).abs() < EPS);
        assert!((caption.x - first.frame.x).abs() < EPS);
        assert!((caption.width - first.frame.width).abs() < EPS);

        // per-row pitch is frame + caption + gap
        let second = &layout.cells[1];
        assert!((second.frame.y - (90.0 + 30.0 + 20.0)).abs() < EPS);
        // second row fills the source exactly
        assert!((second.caption.unwrap().bottom() - source.bottom()).abs() < EPS);
    }

    #[test]
    fn test_negative_caption_overlays_cell_bottom() {
        let source = Rect::new(0.0, 0.0, 100.0, 260.0);
        let spec = GridSpec {
            columns: 1,
            rows: 2,
            gap: 20.0,
            caption_height: -30.0,
            ..GridSpec::default()
        };
        let layout = plan_grid(source, &spec).unwrap();

        // frame height is unchanged by the overlay band: (260 - 20) / 2
        let first = &layout.cells[0];
        assert!((first.frame.height - 120.0).abs() < EPS);
        let caption = first.caption.unwrap();
        assert!((caption.height - 30.0).abs() < EPS);
        // band shares the frame's bottom edge and lies inside it
        assert!((caption.bottom() - first.frame.bottom()).abs() < EPS);
        assert!(caption.y >= first.frame.y);
    }

    #[test]
    fn test_zero_columns_is_invalid() {
        let source = Rect::new(0.0, 0.0, 100.0, 100.0);
        let spec = GridSpec {
            columns: 0,
            ..GridSpec::default()
        };
        assert!(matches!(
            plan_grid(source, &spec),
            Err(Error::InvalidSpec(_))
        ));
    }

    #[test]
    fn test_gap_wider_than_source_is_invalid() {
        let source = Rect::new(0.0, 0.0, 100.0, 100.0);
        let spec = GridSpec {
            columns: 3,
            rows: 1,
            gap: 60.0,
            ..GridSpec::default()
        };
        assert!(matches!(
            plan_grid(source, &spec),
            Err(Error::InvalidSpec(_))
        ));
    }

    #[test]
    fn test_caption_consuming_all_height_is_invalid() {
        let source = Rect::new(0.0, 0.0, 100.0, 100.0);
        let spec = GridSpec {
            columns: 1,
            rows: 2,
            caption_height: 50.0,
            ..GridSpec::default()
        };
        assert!(matches!(
            plan_grid(source, &spec),
            Err(Error::InvalidSpec(_))
        ));
    }

    #[test]
    fn test_border_style_threaded_through() {
        use crate::style::BorderStyle;

        let source = Rect::new(0.0, 0.0, 100.0, 100.0);
        let plain = plan_grid(source, &GridSpec::default()).unwrap();
        assert_eq!(plain.border_style, BorderStyle::Primary);

        let alt = plan_grid(
            source,
            &GridSpec {
                alternate_border: true,
                remove_source: true,
                ..GridSpec::default()
            },
        )
        .unwrap();
        assert_eq!(alt.border_style, BorderStyle::Alternate);
        assert!(alt.remove_source);
    }

    #[test]
    fn test_single_cell_grid() {
        let source = Rect::new(5.0, 5.0, 90.0, 60.0);
        let spec = GridSpec {
            columns: 1,
            rows: 1,
            gap: 12.0, // gap terms vanish with one column and row
            ..GridSpec::default()
        };
        let layout = plan_grid(source, &spec).unwrap();
        assert_eq!(layout.cells.len(), 1);
        assert_eq!(layout.cells[0].frame, source);
    }
}
