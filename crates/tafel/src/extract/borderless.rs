//! Borderless-table assignment.
//!
//! Without rulings, structure is inferred from spacing alone: word centers
//! are clustered along each axis with a maximum merge distance, small for
//! rows (line spacing) and larger for columns (word spacing).
//!
//! Distance clustering conflates adjacent columns whose words happen to sit
//! close together. Detected vertical lines, even partial ones, are
//! authoritative evidence of a column boundary, so any vertical line falling
//! strictly inside a column cluster's span splits that cluster: words whose
//! right edge reaches the line move to a new column inserted immediately
//! after, and indices are re-densified.

use super::cluster::cluster_indices;
use super::AssignedWord;
use crate::config::TableConfig;
use crate::line::LineSegment;
use crate::token::Word;

/// Assign words to cells by center-distance clustering, refined by any
/// detected vertical lines.
pub fn assign(words: &[Word], vertical_lines: &[LineSegment], config: &TableConfig) -> Vec<AssignedWord> {
    if words.is_empty() {
        return Vec::new();
    }

    let y_centers: Vec<f64> = words.iter().map(Word::y_center).collect();
    let rows = cluster_indices(&y_centers, config.row_cluster_distance);

    let x_centers: Vec<f64> = words.iter().map(Word::x_center).collect();
    let column_clusters = cluster_indices(&x_centers, config.column_cluster_distance);
    let columns = split_on_vertical_lines(words, &column_clusters, vertical_lines);

    words
        .iter()
        .zip(rows.iter().zip(columns.iter()))
        .map(|(word, (&row, &column))| AssignedWord {
            word: word.clone(),
            row,
            column,
        })
        .collect()
}

/// Refine column clusters with vertical ruling lines.
///
/// Columns are kept as ordered groups of word indices. For each line (in
/// increasing `x`), the group whose horizontal span strictly contains the
/// line's x-position is split in two at the line; the right part is inserted
/// immediately after the left. The final column index of a word is its
/// group's position after all splits.
fn split_on_vertical_lines(
    words: &[Word],
    column_clusters: &[usize],
    vertical_lines: &[LineSegment],
) -> Vec<usize> {
    let group_count = column_clusters.iter().copied().max().map_or(0, |m| m + 1);
    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); group_count];
    for (i, &cluster) in column_clusters.iter().enumerate() {
        groups[cluster].push(i);
    }

    for line in vertical_lines {
        let x = line.position();
        let target = groups.iter().position(|group| {
            let left = group.iter().map(|&i| words[i].left).min().unwrap_or(i32::MAX);
            let right = group.iter().map(|&i| words[i].right()).max().unwrap_or(i32::MIN);
            x > left && x <= right
        });

        if let Some(index) = target {
            let (stays, moves): (Vec<usize>, Vec<usize>) =
                groups[index].iter().partition(|&&i| words[i].right() < x);
            if stays.is_empty() || moves.is_empty() {
                continue;
            }
            tracing::debug!(x, column = index, moved = moves.len(), "split column on vertical line");
            groups[index] = stays;
            groups.insert(index + 1, moves);
        }
    }

    let mut columns = vec![0; words.len()];
    for (column, group) in groups.iter().enumerate() {
        for &i in group {
            columns[i] = column;
        }
    }
    columns
}
