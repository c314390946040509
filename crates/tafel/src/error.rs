//! Error types for tafel.
//!
//! All fallible operations in the library return [`Result`]. The error
//! handling policy follows two rules:
//!
//! - **System errors bubble up unchanged**: `TafelError::Io` wraps
//!   `std::io::Error` via `#[from]` and is never re-wrapped, so filesystem
//!   and permission problems surface as-is.
//! - **Application errors carry context**: validation, parsing, and
//!   serialization errors wrap a message plus an optional source error.
//!
//! Per-token and per-instance conditions (an unassignable word, a page with
//! no table) are *not* errors — they produce degenerate results and are
//! logged. Only malformed configuration is fatal, and only to the instance
//! it configures.
use thiserror::Error;

/// Result type alias using [`TafelError`].
pub type Result<T> = std::result::Result<T, TafelError>;

/// Main error type for all tafel operations.
#[derive(Debug, Error)]
pub enum TafelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl From<serde_json::Error> for TafelError {
    fn from(err: serde_json::Error) -> Self {
        TafelError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl TafelError {
    /// Create a Validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Parsing error with source
    pub fn parsing_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Parsing {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TafelError = io_err.into();
        assert!(matches!(err, TafelError::Io(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_validation_error() {
        let err = TafelError::validation("invalid table type");
        assert_eq!(err.to_string(), "Validation error: invalid table type");
    }

    #[test]
    fn test_parsing_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad data");
        let err = TafelError::parsing_with_source("invalid TSV", source);
        assert_eq!(err.to_string(), "Parsing error: invalid TSV");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: TafelError = json_err.into();
        assert!(matches!(err, TafelError::Serialization { .. }));
    }

    #[test]
    fn test_io_error_bubbles_unchanged() {
        fn read_file() -> Result<String> {
            let content = std::fs::read_to_string("/nonexistent/file.txt")?;
            Ok(content)
        }

        let result = read_file();
        assert!(matches!(result.unwrap_err(), TafelError::Io(_)));
    }
}
