//! Run-level precondition failures.

use std::path::PathBuf;
use thiserror::Error;

/// Conditions that abort a run before any record is processed.
#[derive(Debug, Error)]
pub enum PreconditionError {
    /// The host cannot run the NirSoft tools.
    #[error("Windows is required (running on {os})")]
    UnsupportedPlatform { os: &'static str },

    /// The output directory already holds files.
    #[error("'{}' directory exists and is not empty. Please remove it first.", path.display())]
    OutputNotEmpty { path: PathBuf },

    /// The output path exists but is not a directory.
    #[error("'{}' exists and is not a directory", path.display())]
    OutputNotDirectory { path: PathBuf },
}

/// Fails unless running on Windows.
pub fn ensure_supported_platform() -> Result<(), PreconditionError> {
    if cfg!(windows) {
        Ok(())
    } else {
        Err(PreconditionError::UnsupportedPlatform {
            os: std::env::consts::OS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_not_empty_message() {
        let err = PreconditionError::OutputNotEmpty {
            path: PathBuf::from("icons"),
        };
        assert_eq!(
            err.to_string(),
            "'icons' directory exists and is not empty. Please remove it first."
        );
    }

    #[test]
    fn test_platform_check_matches_target() {
        assert_eq!(ensure_supported_platform().is_ok(), cfg!(windows));
    }
}
