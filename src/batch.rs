//! Best-effort batch planning
//!
//! Batch operations walk every selected frame and plan each one
//! independently. A frame that cannot be planned is skipped with its
//! error recorded; it never aborts the rest of the batch.

use crate::error::{Error, Result};
use crate::fit::{self, CropPlan, CropSpec, FillFit};
use crate::geometry::{PixelSize, Rect};

/// Outcome of planning a batch of items
#[derive(Debug)]
pub struct BatchReport<T> {
    /// Successfully planned items with their original indices
    pub completed: Vec<(usize, T)>,
    /// Skipped items with the error that excluded them
    pub skipped: Vec<(usize, Error)>,
}

impl<T> BatchReport<T> {
    /// Whether every item was planned
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Plan every item with `plan`, keeping failures out of the way of the
/// rest of the batch
pub fn plan_each<I, T, F>(items: I, mut plan: F) -> BatchReport<T>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Result<T>,
{
    let mut completed = Vec::new();
    let mut skipped = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        match plan(item) {
            Ok(value) => completed.push((index, value)),
            Err(err) => skipped.push((index, err)),
        }
    }
    BatchReport { completed, skipped }
}

/// Fill-and-center every frame/image pair in the selection
pub fn fill_frames(frames: &[(Rect, PixelSize)]) -> BatchReport<FillFit> {
    plan_each(frames, |(frame, image)| fit::fit_fill(*frame, *image))
}

/// Plan a crop-and-resize for every frame in the selection
pub fn plan_crops(specs: &[CropSpec]) -> BatchReport<CropPlan> {
    plan_each(specs, fit::plan_crop)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_bad_frame_does_not_abort_the_batch() {
        let frames = [
            (Rect::new(0.0, 0.0, 100.0, 50.0), PixelSize::new(200, 200)),
            (Rect::new(0.0, 0.0, 100.0, 50.0), PixelSize::new(0, 0)),
            (Rect::new(0.0, 0.0, 80.0, 80.0), PixelSize::new(400, 100)),
        ];
        let report = fill_frames(&frames);

        assert!(!report.is_complete());
        assert_eq!(report.completed.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, 1);
        assert_eq!(report.completed[0].0, 0);
        assert_eq!(report.completed[1].0, 2);
    }

    #[test]
    fn test_all_good_batch_is_complete() {
        let frames = [
            (Rect::new(0.0, 0.0, 10.0, 10.0), PixelSize::new(5, 5)),
            (Rect::new(0.0, 0.0, 20.0, 10.0), PixelSize::new(50, 50)),
        ];
        let report = fill_frames(&frames);
        assert!(report.is_complete());
        assert_eq!(report.completed.len(), 2);
    }
}
