//! NirSoft subprocess orchestrator.
//!
//! This module locates the tool executables and runs them as blocking
//! subprocesses.

use std::ffi::OsStr;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{ToolError, ToolResult};

/// The external NirSoft utilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NirsoftTool {
    /// File type enumerator.
    FileTypesMan,
    /// Icon resource extractor.
    IconsExt,
}

impl NirsoftTool {
    /// Returns the executable file name.
    pub fn file_name(&self) -> &'static str {
        match self {
            NirsoftTool::FileTypesMan => "FileTypesMan.exe",
            NirsoftTool::IconsExt => "iconsext.exe",
        }
    }

    /// Returns the environment variable that overrides the executable path.
    pub fn env_var(&self) -> &'static str {
        match self {
            NirsoftTool::FileTypesMan => "ICONSEXTRACT_FILETYPESMAN",
            NirsoftTool::IconsExt => "ICONSEXTRACT_ICONSEXT",
        }
    }

    /// Returns the NirSoft download page for the tool.
    pub fn download_url(&self) -> &'static str {
        match self {
            NirsoftTool::FileTypesMan => "http://www.nirsoft.net/utils/filetypesman.zip",
            NirsoftTool::IconsExt => "http://www.nirsoft.net/utils/iconsext.zip",
        }
    }
}

/// Configuration for locating and running the tools.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Explicit path to `FileTypesMan.exe`.
    pub filetypesman_path: Option<PathBuf>,
    /// Explicit path to `iconsext.exe`.
    pub iconsext_path: Option<PathBuf>,
    /// Directory searched before PATH (default: the running executable's directory).
    pub tools_dir: Option<PathBuf>,
    /// Kill a tool that runs longer than this. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Whether to capture the tools' stderr.
    pub capture_output: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            filetypesman_path: None,
            iconsext_path: None,
            tools_dir: None,
            timeout: None,
            capture_output: true,
        }
    }
}

impl ToolConfig {
    /// Creates a config that searches `tools_dir` before PATH.
    pub fn with_tools_dir(tools_dir: impl Into<PathBuf>) -> Self {
        Self {
            tools_dir: Some(tools_dir.into()),
            ..Default::default()
        }
    }

    /// Sets the `FileTypesMan.exe` path.
    pub fn filetypesman_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.filetypesman_path = Some(path.into());
        self
    }

    /// Sets the `iconsext.exe` path.
    pub fn iconsext_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.iconsext_path = Some(path.into());
        self
    }

    /// Sets the timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    fn explicit_path(&self, tool: NirsoftTool) -> Option<&PathBuf> {
        match tool {
            NirsoftTool::FileTypesMan => self.filetypesman_path.as_ref(),
            NirsoftTool::IconsExt => self.iconsext_path.as_ref(),
        }
    }
}

/// Outcome of a tool run that completed.
#[derive(Debug)]
pub struct ToolOutput {
    /// Exit status of the process.
    pub status: ExitStatus,
    /// Captured stderr (empty when not captured).
    pub stderr: String,
}

/// Locates and runs NirSoft tools.
#[derive(Debug, Clone, Default)]
pub struct ToolRunner {
    config: ToolConfig,
}

impl ToolRunner {
    /// Creates a new runner with the given configuration.
    pub fn with_config(config: ToolConfig) -> Self {
        Self { config }
    }

    /// Finds the executable for `tool`.
    pub fn locate(&self, tool: NirsoftTool) -> ToolResult<PathBuf> {
        // Explicit configuration wins, and must point at a real file.
        if let Some(path) = self.config.explicit_path(tool) {
            if path.exists() {
                return Ok(path.clone());
            }
            return Err(ToolError::ConfiguredPathMissing {
                tool: tool.file_name(),
                path: path.clone(),
            });
        }

        if let Some(path) = std::env::var_os(tool.env_var()) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
            return Err(ToolError::ConfiguredPathMissing {
                tool: tool.file_name(),
                path,
            });
        }

        if let Some(dir) = self.tools_dir() {
            let candidate = dir.join(tool.file_name());
            if candidate.is_file() {
                return Ok(candidate);
            }
        }

        if let Ok(path) = which::which(tool.file_name()) {
            return Ok(path);
        }

        Err(ToolError::NotFound {
            tool: tool.file_name(),
            env_var: tool.env_var(),
        })
    }

    fn tools_dir(&self) -> Option<PathBuf> {
        self.config.tools_dir.clone().or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf))
        })
    }

    /// Runs `program` with `args` and waits for it to exit.
    ///
    /// A non-zero exit status is returned in [`ToolOutput`], not as an error;
    /// callers decide whether it matters.
    pub fn run(
        &self,
        tool: NirsoftTool,
        program: &Path,
        args: &[&OsStr],
    ) -> ToolResult<ToolOutput> {
        let mut cmd = Command::new(program);
        cmd.args(args).stdin(Stdio::null());

        if self.config.capture_output {
            cmd.stdout(Stdio::null()).stderr(Stdio::piped());
        }

        debug!(tool = tool.file_name(), program = %program.display(), ?args, "Spawning tool");
        let child = cmd.spawn().map_err(|source| ToolError::SpawnFailed {
            tool: tool.file_name(),
            source,
        })?;

        let output = match self.config.timeout {
            Some(timeout) => wait_with_timeout(child, tool, timeout, self.config.capture_output)?,
            None => {
                let output = child.wait_with_output().map_err(|source| ToolError::SpawnFailed {
                    tool: tool.file_name(),
                    source,
                })?;
                ToolOutput {
                    status: output.status,
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                }
            }
        };

        debug!(tool = tool.file_name(), status = %output.status, "Tool exited");
        Ok(output)
    }
}

fn wait_with_timeout(
    mut child: Child,
    tool: NirsoftTool,
    timeout: Duration,
    capture_output: bool,
) -> ToolResult<ToolOutput> {
    let start = Instant::now();

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ToolError::Timeout {
                        tool: tool.file_name(),
                        timeout_secs: timeout.as_secs(),
                    });
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(source) => {
                return Err(ToolError::SpawnFailed {
                    tool: tool.file_name(),
                    source,
                })
            }
        }
    };

    let stderr = if capture_output {
        let mut buf = String::new();
        if let Some(mut err) = child.stderr.take() {
            let _ = err.read_to_string(&mut buf);
        }
        buf
    } else {
        String::new()
    };

    Ok(ToolOutput { status, stderr })
}
