//! Application configuration.
//!
//! Loaded from JSON; every field is optional and falls back to the defaults
//! below, so a partial document only overrides what it names.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use segview_cache::CachePolicy;
use segview_core::SegmentTable;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Viewport grid layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of viewport rows.
    pub rows: usize,
    /// Number of viewport columns.
    pub cols: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { rows: 2, cols: 1 }
    }
}

impl GridConfig {
    /// Number of viewports (render slots) in the grid.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// `(row, col)` of slot `index`, filled row by row.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<(usize, usize)> {
        (self.cols > 0 && index < self.slot_count()).then(|| (index / self.cols, index % self.cols))
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory receiving derived masks, meshes and STL files.
    pub output_dir: PathBuf,
    /// Label volume segments are extracted from. When unset, the most
    /// recently opened CT file is used.
    pub source_volume: Option<PathBuf>,
    /// Segment selector entries.
    pub segments: SegmentTable,
    /// Viewport grid.
    pub grid: GridConfig,
    /// Reuse policy for derived artifacts.
    pub cache_policy: CachePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            source_volume: None,
            segments: SegmentTable::default(),
            grid: GridConfig::default(),
            cache_policy: CachePolicy::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not valid JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is malformed or holds an invalid label.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.grid.slot_count(), 2);
        assert_eq!(config.cache_policy, CachePolicy::Presence);
        assert_eq!(config.segments.len(), 4);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = AppConfig::from_json(r#"{ "output_dir": "/tmp/derived" }"#).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/derived"));
        assert_eq!(config.grid, GridConfig::default());
        assert!(config.source_volume.is_none());
    }

    #[test]
    fn test_full_config() {
        let json = r#"{
            "output_dir": "derived",
            "source_volume": "volume Rendering/CT_Masks.nrrd",
            "grid": { "rows": 2, "cols": 2 },
            "cache_policy": "fingerprint",
            "segments": {
                "segments": [
                    { "name": "Liver", "label": 1.0 },
                    { "name": "Tumor", "label": 2.0 }
                ],
                "fallback": 1.0
            }
        }"#;
        let config = AppConfig::from_json(json).unwrap();
        assert_eq!(config.grid.slot_count(), 4);
        assert_eq!(config.cache_policy, CachePolicy::Fingerprint);
        assert_eq!(config.segments.name_for(1), "Tumor");
        assert_eq!(config.segments.label_for(1).get(), 2.0);
        assert_eq!(
            config.source_volume.as_deref(),
            Some(Path::new("volume Rendering/CT_Masks.nrrd"))
        );
    }

    #[test]
    fn test_non_finite_label_rejected() {
        let json = r#"{ "segments": { "segments": [], "fallback": "x" } }"#;
        assert!(AppConfig::from_json(json).is_err());
    }

    #[test]
    fn test_grid_positions() {
        let grid = GridConfig { rows: 2, cols: 3 };
        assert_eq!(grid.position(0), Some((0, 0)));
        assert_eq!(grid.position(4), Some((1, 1)));
        assert_eq!(grid.position(6), None);
        assert_eq!(GridConfig { rows: 0, cols: 0 }.position(0), None);
    }
}
