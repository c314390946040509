//! Bordered-table assignment.
//!
//! Ruling lines bound the cells directly: consecutive horizontal lines form
//! row intervals and consecutive vertical lines form column intervals. A
//! word lands in the row interval that fully contains its vertical span and
//! in the first column interval whose upper bound clears its right edge.
//!
//! Scanned tables routinely omit an outer border, so when words lie outside
//! the detected lines a virtual boundary line is added at the outermost
//! word edge before intervals are built. The precondition (two lines per
//! axis) is checked against the *detected* lines only.

use super::AssignedWord;
use crate::line::RulingLines;
use crate::token::Word;
use std::fmt;

/// Bordered assignment cannot bound any cell: fewer than two ruling lines
/// were detected on one of the axes. Callers typically fall back to the
/// borderless strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientLines {
    pub horizontal: usize,
    pub vertical: usize,
}

impl fmt::Display for InsufficientLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no usable ruling lines: {} horizontal, {} vertical (need at least 2 of each)",
            self.horizontal, self.vertical
        )
    }
}

impl std::error::Error for InsufficientLines {}

/// A half-open interval between two consecutive ruling lines.
///
/// The lower bound is exclusive and the upper inclusive, except for the
/// first interval which includes both, so words sitting exactly on the
/// outermost boundary are not lost.
#[derive(Debug, Clone, Copy)]
struct Interval {
    min: i32,
    max: i32,
    first: bool,
}

impl Interval {
    fn contains_span(&self, low: i32, high: i32) -> bool {
        let above_min = if self.first { low >= self.min } else { low > self.min };
        above_min && high <= self.max
    }

    fn admits_edge(&self, edge: i32) -> bool {
        edge <= self.max
    }
}

/// Assign words to cells using ruling-line intervals.
///
/// Words that match no interval stay unassigned: they are excluded from the
/// result and logged, never dropped silently or raised as errors.
pub fn assign(words: &[Word], lines: &RulingLines) -> Result<Vec<AssignedWord>, InsufficientLines> {
    if lines.horizontal.len() < 2 || lines.vertical.len() < 2 {
        return Err(InsufficientLines {
            horizontal: lines.horizontal.len(),
            vertical: lines.vertical.len(),
        });
    }

    let row_intervals = intervals(&row_boundaries(words, lines));
    let column_intervals = intervals(&column_boundaries(words, lines));

    let mut assigned = Vec::with_capacity(words.len());
    for word in words {
        let row = row_intervals
            .iter()
            .position(|iv| iv.contains_span(word.top, word.bottom()));
        let column = column_intervals.iter().position(|iv| iv.admits_edge(word.right()));

        match (row, column) {
            (Some(row), Some(column)) => assigned.push(AssignedWord {
                word: word.clone(),
                row,
                column,
            }),
            _ => {
                tracing::debug!(
                    text = %word.text,
                    left = word.left,
                    top = word.top,
                    "word matched no ruling interval, leaving unassigned"
                );
            }
        }
    }

    Ok(assigned)
}

/// Horizontal line positions, extended with virtual boundaries where words
/// overhang the outermost detected lines (tables missing a border edge).
fn row_boundaries(words: &[Word], lines: &RulingLines) -> Vec<i32> {
    let mut positions: Vec<i32> = lines.horizontal.iter().map(|l| l.position()).collect();

    if let Some(top) = words.iter().map(|w| w.top).min()
        && top < positions[0]
    {
        positions.insert(0, top);
    }
    if let Some(bottom) = words.iter().map(|w| w.bottom()).max()
        && bottom > positions[positions.len() - 1]
    {
        positions.push(bottom);
    }
    positions
}

/// Vertical line positions, extended on the right where words overhang the
/// last detected line. No extension is needed on the left: column matching
/// tests the right edge against interval upper bounds only.
fn column_boundaries(words: &[Word], lines: &RulingLines) -> Vec<i32> {
    let mut positions: Vec<i32> = lines.vertical.iter().map(|l| l.position()).collect();

    if let Some(right) = words.iter().map(|w| w.right()).max()
        && right > positions[positions.len() - 1]
    {
        positions.push(right);
    }
    positions
}

fn intervals(boundaries: &[i32]) -> Vec<Interval> {
    boundaries
        .windows(2)
        .enumerate()
        .map(|(i, pair)| Interval {
            min: pair[0],
            max: pair[1],
            first: i == 0,
        })
        .collect()
}
