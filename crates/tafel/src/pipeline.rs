//! Extraction orchestration.
//!
//! Ties the stages together for one table instance: normalize tokens,
//! detect ruling lines, dispatch to the assignment strategy selected by the
//! caller's [`TableType`], aggregate into a [`Grid`].
//!
//! The strategy outcome is typed: a bordered request on a page without
//! enough ruling lines yields [`ExtractionOutcome::InsufficientLines`]
//! instead of a silent empty table, so callers can distinguish "no table
//! found" from "wrong strategy chosen" and fall back deliberately.
//!
//! Instances are independent — each owns its image, tokens, and label — so
//! batches run in parallel; the output order matches the input order, which
//! keeps a subsequent [merge](crate::merge) deterministic.

use crate::config::TableConfig;
use crate::error::{Result, TafelError};
use crate::extract::{bordered, borderless};
use crate::grid::{Grid, build_grid};
use crate::line::detect_lines;
use crate::token::{RawToken, normalize};
use image::GrayImage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which assignment strategy to use for a table instance.
///
/// Supplied externally (detector collaborator or caller configuration); the
/// core does not infer it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableType {
    Bordered,
    Borderless,
}

impl FromStr for TableType {
    type Err = TafelError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bordered" => Ok(TableType::Bordered),
            "borderless" => Ok(TableType::Borderless),
            other => Err(TafelError::validation(format!(
                "table type must be 'bordered' or 'borderless', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableType::Bordered => write!(f, "bordered"),
            TableType::Borderless => write!(f, "borderless"),
        }
    }
}

/// The typed result of one extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum ExtractionOutcome {
    /// Grid reconstructed from ruling-line intervals.
    Bordered { grid: Grid },
    /// Grid reconstructed from center-distance clustering.
    Borderless { grid: Grid },
    /// Bordered mode was requested but fewer than two ruling lines were
    /// detected on one of the axes.
    InsufficientLines { horizontal: usize, vertical: usize },
}

impl ExtractionOutcome {
    /// The reconstructed grid, if a strategy produced one.
    pub fn grid(&self) -> Option<&Grid> {
        match self {
            ExtractionOutcome::Bordered { grid } | ExtractionOutcome::Borderless { grid } => Some(grid),
            ExtractionOutcome::InsufficientLines { .. } => None,
        }
    }

    pub fn into_grid(self) -> Option<Grid> {
        match self {
            ExtractionOutcome::Bordered { grid } | ExtractionOutcome::Borderless { grid } => Some(grid),
            ExtractionOutcome::InsufficientLines { .. } => None,
        }
    }
}

/// One independent page or crop to extract a table from.
#[derive(Debug, Clone)]
pub struct TableInstance {
    pub image: GrayImage,
    pub tokens: Vec<RawToken>,
    pub table_type: TableType,
}

/// Reconstruct the table structure of a single page or crop.
///
/// A page with no surviving tokens produces an empty grid, not an error:
/// an empty table is a legitimate outcome.
pub fn extract_table(
    image: &GrayImage,
    tokens: &[RawToken],
    table_type: TableType,
    config: &TableConfig,
) -> ExtractionOutcome {
    let words = normalize(tokens, config.min_confidence);
    let lines = detect_lines(image, &words, config);

    match table_type {
        TableType::Bordered => match bordered::assign(&words, &lines) {
            Ok(assigned) => ExtractionOutcome::Bordered {
                grid: build_grid(&assigned),
            },
            Err(insufficient) => {
                tracing::warn!(%insufficient, "bordered extraction not possible");
                ExtractionOutcome::InsufficientLines {
                    horizontal: insufficient.horizontal,
                    vertical: insufficient.vertical,
                }
            }
        },
        TableType::Borderless => {
            let assigned = borderless::assign(&words, &lines.vertical, config);
            ExtractionOutcome::Borderless {
                grid: build_grid(&assigned),
            }
        }
    }
}

/// Extract tables from a batch of independent instances in parallel.
///
/// Output order matches input order.
pub fn extract_tables(instances: &[TableInstance], config: &TableConfig) -> Vec<ExtractionOutcome> {
    instances
        .par_iter()
        .map(|instance| extract_table(&instance.image, &instance.tokens, instance.table_type, config))
        .collect()
}
