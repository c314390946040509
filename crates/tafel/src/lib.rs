//! Tafel - Table-Structure Reconstruction for Scanned Documents
//!
//! Tafel rebuilds tabular structure (rows, columns, cell text) from the flat
//! token list an OCR engine produces for a scanned page. No table markup is
//! required — only pixel geometry and, when present, ruling lines.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tafel::{TableConfig, TableType, extract_table, parse_tsv_tokens};
//!
//! # fn main() -> tafel::Result<()> {
//! let image = image::GrayImage::from_pixel(800, 600, image::Luma([255]));
//! let tokens = parse_tsv_tokens(&std::fs::read_to_string("page.tsv")?)?;
//!
//! let outcome = extract_table(&image, &tokens, TableType::Borderless, &TableConfig::default());
//! if let Some(grid) = outcome.grid() {
//!     println!("{}", grid.to_markdown());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Token normalization** (`token`): filter and enrich raw OCR tokens
//! - **Line detection** (`line`): find horizontal/vertical ruling lines
//! - **Assignment** (`extract`): bordered (ruling intervals) or borderless
//!   (center-distance clustering) mapping of words to cells
//! - **Aggregation** (`grid`): dense rectangular grid with header row
//! - **Merging** (`merge`): fuzzy-unify per-page grids into one table
//! - **Pipeline** (`pipeline`): per-instance orchestration, parallel batches

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod extract;
pub mod grid;
pub mod line;
pub mod merge;
pub mod pipeline;
pub mod token;

pub use config::TableConfig;
pub use error::{Result, TafelError};
pub use grid::{Grid, build_grid};
pub use line::{LineSegment, Orientation, RulingLines, detect_lines};
pub use merge::merge_grids;
pub use pipeline::{ExtractionOutcome, TableInstance, TableType, extract_table, extract_tables};
pub use token::{RawToken, Word, normalize, parse_tsv_tokens};
