//! Error types for registry dump reading and tool reporting.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for spec-level operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors raised while reading the registry dump.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The dump could not be read from disk.
    #[error("Failed to read registry dump {path}: {source}")]
    ReadDump {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dump has an odd number of payload bytes and cannot be UTF-16.
    #[error("Registry dump is truncated: {len} bytes is not a whole number of UTF-16 code units")]
    TruncatedUtf16 { len: usize },

    /// The dump contains unpaired surrogates.
    #[error("Registry dump is not valid UTF-16")]
    InvalidUtf16,
}

impl ErrorCode for SpecError {
    fn code(&self) -> &'static str {
        match self {
            SpecError::ReadDump { .. } => "SPEC_001",
            SpecError::TruncatedUtf16 { .. } => "SPEC_002",
            SpecError::InvalidUtf16 => "SPEC_003",
        }
    }
}

/// Common trait for errors that are reported with a stable code.
///
/// Every library error type implements this trait so the CLI can report
/// failures uniformly, and so tool failures can be carried across the
/// [`crate::tools`] capability traits without this crate depending on
/// any backend.
///
/// # Example
///
/// ```ignore
/// use iconsextract_spec::ErrorCode;
///
/// fn report<E: ErrorCode>(err: E) {
///     eprintln!("[{}] {}", err.code(), err.message());
/// }
/// ```
pub trait ErrorCode: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "SPEC_001" or "TOOL_004". Codes are
    /// stable across releases.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Exit code of the external process behind this error, if one ran.
    fn exit_code(&self) -> Option<i32> {
        None
    }
}

/// A type-erased failure returned by an external tool implementation.
///
/// Captures the code, message and exit code from any [`ErrorCode`]
/// implementor.
#[derive(Debug)]
pub struct ToolFailure {
    /// The error code (e.g., "TOOL_004").
    pub code: &'static str,
    /// The human-readable error message.
    pub message: String,
    /// Exit code of the tool process, when it ran to completion.
    pub exit_code: Option<i32>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ToolFailure {
    /// Create a `ToolFailure` from any `ErrorCode` implementor.
    pub fn from_error<E: ErrorCode + Send + Sync + 'static>(err: E) -> Self {
        Self {
            code: err.code(),
            message: err.message(),
            exit_code: err.exit_code(),
            source: Some(Box::new(err)),
        }
    }

    /// Create a `ToolFailure` with explicit values.
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            exit_code: None,
            source: None,
        }
    }

    /// Attach the exit code of the failed process.
    pub fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = Some(exit_code);
        self
    }
}

impl std::fmt::Display for ToolFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_error_codes() {
        let err = SpecError::TruncatedUtf16 { len: 7 };
        assert_eq!(err.code(), "SPEC_002");
        assert!(err.to_string().contains("7 bytes"));
        assert_eq!(err.exit_code(), None);
    }

    #[test]
    fn test_tool_failure_from_error() {
        let failure = ToolFailure::from_error(SpecError::InvalidUtf16);
        assert_eq!(failure.code, "SPEC_003");
        assert_eq!(failure.to_string(), "[SPEC_003] Registry dump is not valid UTF-16");
        assert!(std::error::Error::source(&failure).is_some());
    }

    #[test]
    fn test_tool_failure_with_exit_code() {
        let failure = ToolFailure::new("TOOL_004", "exited").with_exit_code(3);
        assert_eq!(failure.exit_code, Some(3));
        assert!(std::error::Error::source(&failure).is_none());
    }
}
