//! Unified error types for linechat.
//!
//! Parsing a chat export is deliberately permissive: unrecognized lines,
//! unterminated quotes, missing metadata and out-of-range clock values are
//! all absorbed by the parser and never surface here. What remains are the
//! failures that happen *around* the parser: reading the file, decoding
//! user-supplied filter dates, rendering output, and the background worker.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for linechat operations.
///
/// # Example
///
/// ```rust
/// use linechat::error::Result;
/// use linechat::ChatRecord;
///
/// fn load() -> Result<ChatRecord> {
///     Ok(linechat::parse_str(""))
/// }
/// ```
pub type Result<T> = std::result::Result<T, LineChatError>;

/// The error type for all linechat operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LineChatError {
    /// An I/O error occurred.
    ///
    /// This typically happens when the export file does not exist, cannot
    /// be read, or is not valid UTF-8.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Invalid date string in a filter specification.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// The requested output format is unknown or not compiled in.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// What kind of format was being selected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV rendering error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 error while converting rendered output to a string.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// The background parse worker failed to run to completion.
    #[error("Parse worker failed: {0}")]
    Worker(String),

    /// The background parse was abandoned before it finished.
    #[error("Parse was cancelled before completion")]
    Cancelled,
}

impl From<std::string::FromUtf8Error> for LineChatError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        LineChatError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl LineChatError {
    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        LineChatError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        LineChatError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates a worker failure error.
    pub fn worker(message: impl Into<String>) -> Self {
        LineChatError::Worker(message.into())
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, LineChatError::Io(_))
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, LineChatError::InvalidDate { .. })
    }

    /// Returns `true` if the background parse was abandoned.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LineChatError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err: LineChatError = io_err.into();
        assert!(err.is_io());
        assert!(err.to_string().contains("no such file"));
    }

    #[test]
    fn test_invalid_date_display() {
        let err = LineChatError::invalid_date("31/03/2022");
        assert!(err.is_invalid_date());
        let msg = err.to_string();
        assert!(msg.contains("31/03/2022"));
        assert!(msg.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_invalid_format_display() {
        let err = LineChatError::invalid_format("output", "unknown extension");
        assert_eq!(err.to_string(), "Invalid output format: unknown extension");
    }

    #[test]
    fn test_worker_and_cancelled() {
        assert!(LineChatError::worker("panicked").to_string().contains("panicked"));
        assert!(LineChatError::Cancelled.is_cancelled());
        assert!(!LineChatError::Cancelled.is_io());
    }

    #[test]
    fn test_utf8_error_conversion() {
        let bad = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err: LineChatError = bad.into();
        assert!(err.to_string().contains("output conversion"));
    }
}
