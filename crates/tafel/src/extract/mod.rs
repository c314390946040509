//! Row/column assignment strategies.
//!
//! Two structurally different strategies map normalized words to (row,
//! column) cells:
//!
//! - [`bordered`] uses detected ruling lines as cell boundaries. It needs at
//!   least two lines per axis and reports an insufficient-lines condition
//!   otherwise, so callers can fall back to the borderless strategy.
//! - [`borderless`] clusters word centers by distance, refined by whatever
//!   vertical lines were detected. It always succeeds and is the default
//!   for tables without reliable rulings.
//!
//! Both are deterministic: the same words and lines always produce the
//! same assignment.

pub mod bordered;
pub mod borderless;
pub mod cluster;

use crate::token::Word;

/// A word bound to its cell coordinates. Indices are zero-based and dense;
/// increasing row means further down the page, increasing column further
/// right.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedWord {
    pub word: Word,
    pub row: usize,
    pub column: usize,
}
