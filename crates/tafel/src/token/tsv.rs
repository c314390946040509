//! Tesseract TSV ingestion.
//!
//! Parses the TSV emitted by `tesseract ... tsv` (or a prior OCR run saved
//! to disk) into [`RawToken`]s, so token sets can be replayed without
//! re-running OCR.

use super::RawToken;
use crate::error::Result;

/// Tesseract TSV level value for word records.
const TSV_WORD_LEVEL: u32 = 5;

/// Minimum field count for a well-formed word row.
const TSV_MIN_FIELDS: usize = 12;

/// Extract raw tokens from Tesseract TSV output.
///
/// Only word-level records (level 5) are kept; malformed or short lines are
/// skipped rather than failing the whole parse, since Tesseract output for
/// noisy scans routinely contains them. Confidence filtering is left to
/// [`normalize`](super::normalize) so the caller keeps one place to tune it.
pub fn parse_tsv_tokens(tsv_data: &str) -> Result<Vec<RawToken>> {
    let mut tokens = Vec::new();

    for (line_num, line) in tsv_data.lines().enumerate() {
        if line_num == 0 {
            continue;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < TSV_MIN_FIELDS {
            continue;
        }

        let level = fields[0].parse::<u32>().unwrap_or(0);
        if level != TSV_WORD_LEVEL {
            continue;
        }

        tokens.push(RawToken {
            text: fields[11].to_string(),
            confidence: fields[10].parse().unwrap_or(-1.0),
            left: fields[6].parse().unwrap_or(0),
            top: fields[7].parse().unwrap_or(0),
            width: fields[8].parse().unwrap_or(0),
            height: fields[9].parse().unwrap_or(0),
        });
    }

    Ok(tokens)
}
