//! Saved tool preferences
//!
//! The grid tool remembers its last-used parameters between runs. The
//! preferences file is a plain JSON key-value store; the planners never
//! read it themselves.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::{GridSpec, HorizontalAlign, VerticalAlign};

/// Persisted grid tool parameters.
///
/// The aspect ratio is stored as a width/height integer pair the way the
/// tool presents it; an `aspect_height` of 0 means the cells keep their
/// full computed size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub columns: u32,
    pub rows: u32,
    pub gap: f64,
    pub aspect_width: u32,
    pub aspect_height: u32,
    pub scale_percent: f64,
    pub horizontal_align: HorizontalAlign,
    pub vertical_align: VerticalAlign,
    /// Whether caption bands are enabled at all
    pub caption: bool,
    pub caption_height: f64,
    pub remove_source: bool,
    pub alternate_border: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            columns: 2,
            rows: 2,
            gap: 0.0,
            aspect_width: 0,
            aspect_height: 0,
            scale_percent: 100.0,
            horizontal_align: HorizontalAlign::Left,
            vertical_align: VerticalAlign::Top,
            caption: false,
            caption_height: 0.0,
            remove_source: false,
            alternate_border: false,
        }
    }
}

impl Preferences {
    /// Target aspect ratio encoded by the width/height pair, 0 when
    /// unconstrained
    pub fn aspect_ratio(&self) -> f64 {
        if self.aspect_height == 0 {
            0.0
        } else {
            self.aspect_width as f64 / self.aspect_height as f64
        }
    }

    /// Grid spec these preferences describe.
    ///
    /// The caption height only takes effect when captions are enabled.
    pub fn to_grid_spec(&self) -> GridSpec {
        GridSpec {
            columns: self.columns,
            rows: self.rows,
            gap: self.gap,
            target_aspect: self.aspect_ratio(),
            scale_percent: self.scale_percent,
            horizontal_align: self.horizontal_align,
            vertical_align: self.vertical_align,
            caption_height: if self.caption { self.caption_height } else { 0.0 },
            remove_source: self.remove_source,
            alternate_border: self.alternate_border,
        }
    }

    /// Load preferences from a JSON file, falling back to defaults when
    /// the file does not exist yet
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Save preferences to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_aspect_pair_to_ratio() {
        let prefs = Preferences {
            aspect_width: 3,
            aspect_height: 2,
            ..Preferences::default()
        };
        assert!((prefs.aspect_ratio() - 1.5).abs() < 1e-9);

        // height 0 disables the constraint
        let unconstrained = Preferences {
            aspect_width: 4,
            aspect_height: 0,
            ..Preferences::default()
        };
        assert_eq!(unconstrained.aspect_ratio(), 0.0);
    }

    #[test]
    fn test_caption_flag_gates_caption_height() {
        let mut prefs = Preferences {
            caption: false,
            caption_height: 18.0,
            ..Preferences::default()
        };
        assert_eq!(prefs.to_grid_spec().caption_height, 0.0);

        prefs.caption = true;
        assert_eq!(prefs.to_grid_spec().caption_height, 18.0);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let prefs = Preferences::load(Path::new("does-not-exist.json")).unwrap();
        assert_eq!(prefs, Preferences::default());
    }
}
