//! Error types for the NirSoft backend.

use iconsextract_spec::{ErrorCode, SpecError, ToolFailure};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for NirSoft backend operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors that can occur while locating or running a NirSoft tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool executable not found.
    #[error("{tool} not found. Place it next to iconsextract, put it in PATH, or set {env_var}")]
    NotFound {
        tool: &'static str,
        env_var: &'static str,
    },

    /// An explicitly configured tool path does not exist.
    #[error("Configured {tool} path does not exist: {path}")]
    ConfiguredPathMissing { tool: &'static str, path: PathBuf },

    /// Failed to spawn the tool process.
    #[error("Failed to spawn {tool}: {source}")]
    SpawnFailed {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Tool process timed out.
    #[error("{tool} timed out after {timeout_secs} seconds")]
    Timeout {
        tool: &'static str,
        timeout_secs: u64,
    },

    /// Tool process exited with non-zero status.
    #[error("{tool} exited with status {exit_code}: {stderr}")]
    ProcessFailed {
        tool: &'static str,
        exit_code: i32,
        stderr: String,
    },

    /// The registry dump written by the enumerator could not be read.
    #[error("Failed to load registry dump: {0}")]
    Dump(#[from] SpecError),
}

impl ToolError {
    /// Creates a new process failed error.
    pub fn process_failed(tool: &'static str, exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::ProcessFailed {
            tool,
            exit_code,
            stderr: stderr.into(),
        }
    }
}

impl ErrorCode for ToolError {
    fn code(&self) -> &'static str {
        match self {
            ToolError::NotFound { .. } => "TOOL_001",
            ToolError::ConfiguredPathMissing { .. } => "TOOL_002",
            ToolError::SpawnFailed { .. } => "TOOL_003",
            ToolError::Timeout { .. } => "TOOL_004",
            ToolError::ProcessFailed { .. } => "TOOL_005",
            ToolError::Dump(_) => "TOOL_006",
        }
    }

    fn exit_code(&self) -> Option<i32> {
        match self {
            ToolError::ProcessFailed { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

impl From<ToolError> for ToolFailure {
    fn from(err: ToolError) -> Self {
        ToolFailure::from_error(err)
    }
}
