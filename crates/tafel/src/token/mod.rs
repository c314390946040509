//! OCR token normalization.
//!
//! Raw OCR output arrives as a flat list of positioned text fragments with
//! confidence scores. This module filters that list down to the clean word
//! set the assigners operate on: low-confidence and empty tokens are
//! dropped, text is trimmed, and derived geometry (right/bottom edges,
//! centers) becomes available through [`Word`] accessors.
//!
//! Normalization is a pure transform. An empty result is a legitimate
//! outcome for a page with no recognizable text and flows through the rest
//! of the pipeline as an empty grid, never as an error.

pub mod tsv;

use serde::{Deserialize, Serialize};

pub use tsv::parse_tsv_tokens;

/// A raw OCR token as handed over by the OCR collaborator.
///
/// Coordinates are in the pixel space of the source image. `confidence` is
/// on whatever scale the OCR engine reports, as long as it is consistent
/// across calls; Tesseract's `-1.0` "no text" sentinel is always filtered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawToken {
    pub text: String,
    pub confidence: f64,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

/// A normalized word: trimmed text, confidence above threshold, with
/// derived geometry accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub confidence: f64,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Word {
    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn x_center(&self) -> f64 {
        self.left as f64 + self.width as f64 / 2.0
    }

    pub fn y_center(&self) -> f64 {
        self.top as f64 + self.height as f64 / 2.0
    }
}

/// Filter raw tokens down to the normalized word set.
///
/// Drops tokens whose confidence is at or below `min_confidence` (sentinel
/// confidences like Tesseract's `-1.0` always fail this check), trims the
/// text, and drops tokens that are empty after trimming.
pub fn normalize(raw: &[RawToken], min_confidence: f64) -> Vec<Word> {
    let words: Vec<Word> = raw
        .iter()
        .filter(|token| token.confidence > min_confidence)
        .filter_map(|token| {
            let text = token.text.trim();
            if text.is_empty() {
                return None;
            }
            Some(Word {
                text: text.to_string(),
                confidence: token.confidence,
                left: token.left,
                top: token.top,
                width: token.width,
                height: token.height,
            })
        })
        .collect();

    tracing::debug!(
        raw = raw.len(),
        kept = words.len(),
        min_confidence,
        "normalized OCR tokens"
    );

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str, confidence: f64, left: i32, top: i32, width: i32, height: i32) -> RawToken {
        RawToken {
            text: text.to_string(),
            confidence,
            left,
            top,
            width,
            height,
        }
    }

    #[test]
    fn test_normalize_drops_low_confidence() {
        let tokens = vec![
            raw("Hello", 95.5, 100, 50, 80, 30),
            raw("World", 50.0, 190, 50, 70, 30),
        ];

        let words = normalize(&tokens, 90.0);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "Hello");
    }

    #[test]
    fn test_normalize_drops_sentinel_confidence() {
        let tokens = vec![
            raw("", -1.0, 0, 0, 200, 40),
            raw("Visible", 88.0, 10, 10, 60, 12),
        ];

        let words = normalize(&tokens, 0.6);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "Visible");
    }

    #[test]
    fn test_normalize_trims_and_drops_whitespace_only() {
        let tokens = vec![
            raw("  padded  ", 90.0, 0, 0, 40, 10),
            raw("   ", 90.0, 50, 0, 40, 10),
            raw("\t\n", 90.0, 100, 0, 40, 10),
        ];

        let words = normalize(&tokens, 0.6);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "padded");
    }

    #[test]
    fn test_normalize_empty_input() {
        let words = normalize(&[], 0.6);
        assert!(words.is_empty());
    }

    #[test]
    fn test_word_derived_geometry() {
        let word = Word {
            text: "Hello".to_string(),
            confidence: 95.5,
            left: 100,
            top: 50,
            width: 80,
            height: 30,
        };

        assert_eq!(word.right(), 180);
        assert_eq!(word.bottom(), 80);
        assert_eq!(word.x_center(), 140.0);
        assert_eq!(word.y_center(), 65.0);
    }

    #[test]
    fn test_normalize_threshold_is_exclusive() {
        let tokens = vec![raw("edge", 0.6, 0, 0, 10, 10)];
        assert!(normalize(&tokens, 0.6).is_empty());
    }
}
