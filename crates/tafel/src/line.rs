//! Ruling-line detection.
//!
//! Scans a grayscale page (or table crop) for the horizontal and vertical
//! ruling lines of a table. The technique is a run-length scan: a row
//! (column) whose longest uninterrupted run of ink pixels spans at least a
//! configurable fraction of the page width (height) is a line candidate.
//! Pixels inside word bounding boxes are ignored so dense text rows are not
//! misread as rulings. Candidates within a small positional tolerance are
//! merged into one line, keeping the outermost extent.
//!
//! The returned lists are deduplicated and sorted (horizontal by `y`,
//! vertical by `x`); the assigners rely on both properties.

use crate::config::TableConfig;
use crate::token::Word;
use image::GrayImage;
use serde::{Deserialize, Serialize};

/// Orientation of a detected ruling line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// An axis-aligned ruling-line segment in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub orientation: Orientation,
}

impl LineSegment {
    pub fn horizontal(y: i32, x1: i32, x2: i32) -> Self {
        Self {
            x1,
            y1: y,
            x2,
            y2: y,
            orientation: Orientation::Horizontal,
        }
    }

    pub fn vertical(x: i32, y1: i32, y2: i32) -> Self {
        Self {
            x1: x,
            y1,
            x2: x,
            y2,
            orientation: Orientation::Vertical,
        }
    }

    /// The sort position of the line: `y` for horizontal, `x` for vertical.
    pub fn position(&self) -> i32 {
        match self.orientation {
            Orientation::Horizontal => self.y1,
            Orientation::Vertical => self.x1,
        }
    }
}

/// Detected ruling lines for one page or crop.
///
/// `horizontal` is sorted by increasing `y`, `vertical` by increasing `x`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulingLines {
    pub horizontal: Vec<LineSegment>,
    pub vertical: Vec<LineSegment>,
}

/// Detect horizontal and vertical ruling lines in a grayscale image.
///
/// `words` mask out regions that are known text, so a tightly printed line
/// of characters does not register as a ruling.
pub fn detect_lines(image: &GrayImage, words: &[Word], config: &TableConfig) -> RulingLines {
    let width = image.width() as i32;
    let height = image.height() as i32;
    if width == 0 || height == 0 {
        return RulingLines::default();
    }

    let mask = word_mask(words, width, height);
    let ink = |x: i32, y: i32| -> bool {
        image.get_pixel(x as u32, y as u32).0[0] <= config.ink_threshold
            && !mask[(y * width + x) as usize]
    };

    // Horizontal pass: longest ink run per row.
    let min_h_len = (width as f64 * config.min_line_length_ratio) as i32;
    let mut h_candidates = Vec::new();
    for y in 0..height {
        if let Some((start, end)) = longest_run(width, |x| ink(x, y))
            && end - start + 1 >= min_h_len
        {
            h_candidates.push((y, start, end));
        }
    }

    // Vertical pass: longest ink run per column.
    let min_v_len = (height as f64 * config.min_line_length_ratio) as i32;
    let mut v_candidates = Vec::new();
    for x in 0..width {
        if let Some((start, end)) = longest_run(height, |y| ink(x, y))
            && end - start + 1 >= min_v_len
        {
            v_candidates.push((x, start, end));
        }
    }

    let lines = RulingLines {
        horizontal: merge_candidates(&h_candidates, config.line_merge_tolerance)
            .into_iter()
            .map(|(y, x1, x2)| LineSegment::horizontal(y, x1, x2))
            .collect(),
        vertical: merge_candidates(&v_candidates, config.line_merge_tolerance)
            .into_iter()
            .map(|(x, y1, y2)| LineSegment::vertical(x, y1, y2))
            .collect(),
    };

    tracing::debug!(
        horizontal = lines.horizontal.len(),
        vertical = lines.vertical.len(),
        "detected ruling lines"
    );

    lines
}

fn word_mask(words: &[Word], width: i32, height: i32) -> Vec<bool> {
    let mut mask = vec![false; (width * height) as usize];
    for word in words {
        let x1 = word.left.clamp(0, width);
        let x2 = word.right().clamp(0, width);
        let y1 = word.top.clamp(0, height);
        let y2 = word.bottom().clamp(0, height);
        for y in y1..y2 {
            for x in x1..x2 {
                mask[(y * width + x) as usize] = true;
            }
        }
    }
    mask
}

/// Longest contiguous run of positions in `0..len` satisfying `pred`,
/// returned as inclusive `(start, end)`.
fn longest_run(len: i32, pred: impl Fn(i32) -> bool) -> Option<(i32, i32)> {
    let mut best: Option<(i32, i32)> = None;
    let mut run_start: Option<i32> = None;

    for pos in 0..len {
        if pred(pos) {
            run_start.get_or_insert(pos);
        } else if let Some(start) = run_start.take() {
            update_best(&mut best, start, pos - 1);
        }
    }
    if let Some(start) = run_start {
        update_best(&mut best, start, len - 1);
    }
    best
}

fn update_best(best: &mut Option<(i32, i32)>, start: i32, end: i32) {
    if best.is_none_or(|(s, e)| end - start > e - s) {
        *best = Some((start, end));
    }
}

/// Merge near-coincident candidates (sorted by position) into single lines.
///
/// A merged line takes the midpoint position of its group and the outermost
/// extent across the group's members.
fn merge_candidates(candidates: &[(i32, i32, i32)], tolerance: i32) -> Vec<(i32, i32, i32)> {
    let mut merged = Vec::new();
    let mut iter = candidates.iter().copied();

    let Some((pos, start, end)) = iter.next() else {
        return merged;
    };
    let mut group = (pos, pos, start, end);

    for (pos, start, end) in iter {
        if pos - group.1 <= tolerance {
            group.1 = pos;
            group.2 = group.2.min(start);
            group.3 = group.3.max(end);
        } else {
            merged.push(((group.0 + group.1) / 2, group.2, group.3));
            group = (pos, pos, start, end);
        }
    }
    merged.push(((group.0 + group.1) / 2, group.2, group.3));
    merged
}
