//! Configuration loading and management.
//!
//! [`TableConfig`] carries every tunable of the reconstruction pipeline. It
//! can be created with [`Default::default`], assembled programmatically, or
//! loaded from a TOML file.
//!
//! # Resolution dependence
//!
//! The clustering distances and line tolerances are absolute pixel values in
//! the coordinate space of the source image. They are calibrated for
//! ~200-300 DPI scans; callers working at other resolutions must rescale
//! them, since the library deliberately does not normalize to detected text
//! metrics (the attendant heuristics cut both ways).

use crate::error::{Result, TafelError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the table reconstruction pipeline.
///
/// # Example
///
/// ```rust
/// use tafel::TableConfig;
///
/// let config = TableConfig {
///     row_cluster_distance: 14.0,
///     ..TableConfig::default()
/// };
/// assert_eq!(config.column_cluster_distance, 60.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Tokens with OCR confidence at or below this value are dropped.
    /// Tesseract's `-1` "no text" sentinel always fails this check.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,

    /// Maximum vertical distance (px) between word centers in one row
    /// cluster (borderless mode).
    #[serde(default = "default_row_cluster_distance")]
    pub row_cluster_distance: f64,

    /// Maximum horizontal distance (px) between word centers in one column
    /// cluster (borderless mode). Wider than the row distance because word
    /// spacing exceeds line spacing.
    #[serde(default = "default_column_cluster_distance")]
    pub column_cluster_distance: f64,

    /// Similarity (0-100) above which two header labels are treated as the
    /// same column when merging grids.
    #[serde(default = "default_merge_similarity_threshold")]
    pub merge_similarity_threshold: f64,

    /// Grey level at or below which a pixel counts as ink for line
    /// detection.
    #[serde(default = "default_ink_threshold")]
    pub ink_threshold: u8,

    /// Minimum fraction of the page width (height) a dark run must span to
    /// count as a horizontal (vertical) ruling line.
    #[serde(default = "default_min_line_length_ratio")]
    pub min_line_length_ratio: f64,

    /// Ruling-line candidates within this many pixels of each other are
    /// merged into one line, keeping the outermost extent.
    #[serde(default = "default_line_merge_tolerance")]
    pub line_merge_tolerance: i32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
            row_cluster_distance: default_row_cluster_distance(),
            column_cluster_distance: default_column_cluster_distance(),
            merge_similarity_threshold: default_merge_similarity_threshold(),
            ink_threshold: default_ink_threshold(),
            min_line_length_ratio: default_min_line_length_ratio(),
            line_merge_tolerance: default_line_merge_tolerance(),
        }
    }
}

fn default_min_confidence() -> f64 {
    0.6
}

fn default_row_cluster_distance() -> f64 {
    10.0
}

fn default_column_cluster_distance() -> f64 {
    60.0
}

fn default_merge_similarity_threshold() -> f64 {
    96.0
}

fn default_ink_threshold() -> u8 {
    128
}

fn default_min_line_length_ratio() -> f64 {
    0.5
}

fn default_line_merge_tolerance() -> i32 {
    5
}

impl TableConfig {
    /// Load configuration from a TOML file.
    ///
    /// Missing fields fall back to their defaults. IO errors bubble up
    /// unchanged; TOML syntax errors become parsing errors with context.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content).map_err(|e| {
            TafelError::parsing_with_source(
                format!("invalid config file {}", path.as_ref().display()),
                e,
            )
        })
    }
}
