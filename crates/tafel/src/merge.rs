//! Table merging.
//!
//! One logical table often arrives as several per-page grids whose header
//! rows differ by OCR noise ("Grantee" vs "Grante"). The merger folds those
//! headers into one canonical schema by fuzzy matching, then concatenates
//! every grid's data rows under that schema.
//!
//! Canonical labels are built incrementally in input order: the first
//! occurrence of a label becomes canonical; a later label whose best match
//! scores above the similarity threshold reuses that canonical label,
//! otherwise it is appended as a new one. Once assigned, a canonical label
//! is never revisited, so the result is deterministic for a fixed input
//! order. Callers merging grids produced in parallel must first sort them
//! by a stable key (e.g. source page index).

use crate::config::TableConfig;
use crate::grid::Grid;
use strsim::jaro_winkler;

/// Similarity of two header labels on a 0-100 scale.
///
/// Jaro-Winkler favors shared prefixes, which suits OCR header noise where
/// the tail of a word is the part that degrades.
fn similarity(a: &str, b: &str) -> f64 {
    jaro_winkler(a, b) * 100.0
}

/// Merge a list of grids into one grid under a canonical header schema.
///
/// Header labels fold together when their similarity exceeds
/// `config.merge_similarity_threshold`. Grids with no rows or no columns
/// contribute nothing. Data rows whose cells are all empty are dropped.
/// Canonical columns a grid lacks are filled with the empty marker for
/// that grid's rows.
pub fn merge_grids(grids: &[Grid], config: &TableConfig) -> Grid {
    let mut canonical: Vec<String> = Vec::new();
    let mut merged_rows: Vec<Vec<Option<String>>> = Vec::new();

    for grid in grids {
        if grid.rows() == 0 || grid.columns() == 0 {
            continue;
        }

        // Column translation: source column index -> canonical column index.
        let translation: Vec<usize> = grid
            .header()
            .iter()
            .map(|label| canonical_index(&mut canonical, label, config.merge_similarity_threshold))
            .collect();

        for row in grid.data_rows() {
            if is_blank_row(row) {
                continue;
            }
            let mut merged = vec![None; canonical.len()];
            for (src, cell) in row.iter().enumerate().take(translation.len()) {
                let dst = translation[src];
                if merged[dst].is_none() {
                    merged[dst] = cell.clone();
                }
            }
            merged_rows.push(merged);
        }
    }

    if canonical.is_empty() {
        return Grid::default();
    }

    // Earlier rows were sized before later grids widened the schema.
    for row in &mut merged_rows {
        row.resize(canonical.len(), None);
    }

    let mut cells = Vec::with_capacity(merged_rows.len() + 1);
    cells.push(canonical.into_iter().map(Some).collect());
    cells.extend(merged_rows);
    Grid::new(cells)
}

/// Find or create the canonical column for a header label.
fn canonical_index(canonical: &mut Vec<String>, label: &str, threshold: f64) -> usize {
    let best = canonical
        .iter()
        .enumerate()
        .map(|(i, existing)| (i, similarity(label, existing)))
        .max_by(|a, b| a.1.total_cmp(&b.1));

    match best {
        Some((i, score)) if score > threshold => {
            if canonical[i] != label {
                tracing::debug!(label, canonical = %canonical[i], score, "folded header label");
            }
            i
        }
        _ => {
            canonical.push(label.to_string());
            canonical.len() - 1
        }
    }
}

fn is_blank_row(row: &[Option<String>]) -> bool {
    row.iter()
        .all(|cell| cell.as_deref().is_none_or(|text| text.trim().is_empty()))
}
