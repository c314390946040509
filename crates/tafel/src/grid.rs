//! Grid aggregation.
//!
//! Turns a cell-assigned word set into a dense rectangular [`Grid`]. A cell
//! holding several words gets their text space-joined in left-to-right
//! order by the `left` coordinate — explicitly not insertion order, so the
//! cell text is reproducible no matter how the OCR engine ordered its
//! output. Cells no word landed in carry the explicit empty marker
//! (`None`), which downstream consumers can distinguish from a
//! present-but-blank string.

use crate::extract::AssignedWord;
use serde::{Deserialize, Serialize};

/// A dense rectangular grid of cell text for one table instance.
///
/// Every row has the same length. `None` marks a cell no word was assigned
/// to. Row 0 is treated as the header row by convention once the grid is
/// handed onward; header semantics (deduplication, fuzzy unification) live
/// in the [merger](crate::merge).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub cells: Vec<Vec<Option<String>>>,
}

impl Grid {
    pub fn new(cells: Vec<Vec<Option<String>>>) -> Self {
        Self { cells }
    }

    /// Number of rows, including the header row.
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns. Zero for an empty grid.
    pub fn columns(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Header labels (row 0), with empty markers rendered as empty strings.
    pub fn header(&self) -> Vec<String> {
        self.cells
            .first()
            .map(|row| row.iter().map(|cell| cell.clone().unwrap_or_default()).collect())
            .unwrap_or_default()
    }

    /// Data rows (everything below the header).
    pub fn data_rows(&self) -> &[Vec<Option<String>>] {
        if self.cells.is_empty() { &[] } else { &self.cells[1..] }
    }

    /// Render the grid as a GitHub-flavored Markdown table.
    ///
    /// An empty grid renders as an empty string; empty-marker cells render
    /// blank.
    pub fn to_markdown(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut markdown = String::new();

        markdown.push_str("| ");
        for label in self.header() {
            markdown.push_str(&label);
            markdown.push_str(" | ");
        }
        markdown.push('\n');

        markdown.push('|');
        for _ in 0..self.columns() {
            markdown.push_str("------|");
        }
        markdown.push('\n');

        for row in self.data_rows() {
            markdown.push_str("| ");
            for cell in row {
                if let Some(text) = cell {
                    markdown.push_str(text);
                }
                markdown.push_str(" | ");
            }
            markdown.push('\n');
        }

        markdown
    }
}

/// Aggregate cell-assigned words into a dense grid.
///
/// Dimensions come from the highest assigned indices; an empty assignment
/// set yields a zero-row grid.
pub fn build_grid(assigned: &[AssignedWord]) -> Grid {
    let Some(rows) = assigned.iter().map(|a| a.row).max().map(|m| m + 1) else {
        return Grid::default();
    };
    let columns = assigned.iter().map(|a| a.column).max().map_or(0, |m| m + 1);

    let mut buckets: Vec<Vec<Vec<&AssignedWord>>> = vec![vec![Vec::new(); columns]; rows];
    for aw in assigned {
        buckets[aw.row][aw.column].push(aw);
    }

    let cells = buckets
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|mut cell| {
                    if cell.is_empty() {
                        return None;
                    }
                    cell.sort_by_key(|aw| aw.word.left);
                    let texts: Vec<&str> = cell.iter().map(|aw| aw.word.text.as_str()).collect();
                    Some(texts.join(" "))
                })
                .collect()
        })
        .collect();

    Grid::new(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Word;

    fn assigned(text: &str, left: i32, row: usize, column: usize) -> AssignedWord {
        AssignedWord {
            word: Word {
                text: text.to_string(),
                confidence: 95.0,
                left,
                top: row as i32 * 20,
                width: 30,
                height: 10,
            },
            row,
            column,
        }
    }

    #[test]
    fn test_build_grid_basic() {
        let words = vec![
            assigned("Name", 0, 0, 0),
            assigned("Amount", 60, 0, 1),
            assigned("Jane", 0, 1, 0),
            assigned("100", 60, 1, 1),
        ];

        let grid = build_grid(&words);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 2);
        assert_eq!(grid.cells[0][0].as_deref(), Some("Name"));
        assert_eq!(grid.cells[1][1].as_deref(), Some("100"));
    }

    #[test]
    fn test_grid_is_rectangular_with_gaps() {
        let words = vec![assigned("a", 0, 0, 0), assigned("b", 120, 2, 3)];

        let grid = build_grid(&words);
        assert_eq!(grid.rows(), 3);
        for row in &grid.cells {
            assert_eq!(row.len(), 4);
        }
        assert_eq!(grid.cells[1][2], None);
    }

    #[test]
    fn test_multi_word_cell_joined_left_to_right() {
        // Insertion order is right-to-left; output must follow `left`.
        let words = vec![assigned("Fund", 40, 0, 0), assigned("Mutual", 0, 0, 0)];

        let grid = build_grid(&words);
        assert_eq!(grid.cells[0][0].as_deref(), Some("Mutual Fund"));
    }

    #[test]
    fn test_empty_assignment_yields_zero_rows() {
        let grid = build_grid(&[]);
        assert!(grid.is_empty());
        assert_eq!(grid.rows(), 0);
        assert_eq!(grid.columns(), 0);
    }

    #[test]
    fn test_header_and_data_rows() {
        let words = vec![
            assigned("Name", 0, 0, 0),
            assigned("Amount", 60, 0, 1),
            assigned("Jane", 0, 1, 0),
        ];

        let grid = build_grid(&words);
        assert_eq!(grid.header(), vec!["Name", "Amount"]);
        assert_eq!(grid.data_rows().len(), 1);
        assert_eq!(grid.data_rows()[0][1], None);
    }

    #[test]
    fn test_to_markdown() {
        let words = vec![
            assigned("Name", 0, 0, 0),
            assigned("Amount", 60, 0, 1),
            assigned("Jane", 0, 1, 0),
            assigned("100", 60, 1, 1),
        ];

        let markdown = build_grid(&words).to_markdown();
        assert!(markdown.contains("| Name | Amount | "));
        assert!(markdown.contains("|------|------|"));
        assert!(markdown.contains("| Jane | 100 | "));
    }

    #[test]
    fn test_to_markdown_empty_grid() {
        assert_eq!(Grid::default().to_markdown(), "");
    }

    #[test]
    fn test_to_markdown_renders_empty_marker_blank() {
        let words = vec![
            assigned("Name", 0, 0, 0),
            assigned("Amount", 60, 0, 1),
            assigned("Jane", 0, 1, 0),
        ];

        let markdown = build_grid(&words).to_markdown();
        assert!(markdown.contains("| Jane |  | "));
    }

    #[test]
    fn test_serde_roundtrip() {
        let grid = build_grid(&[assigned("x", 0, 0, 0)]);
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }
}
