//! Icon extraction through `iconsext.exe`.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use iconsextract_spec::{IconExtractor, ToolFailure};
use tracing::debug;

use crate::error::{ToolError, ToolResult};
use crate::orchestrator::{NirsoftTool, ToolConfig, ToolRunner};

/// The IconsExtract command-line interface.
#[derive(Debug, Clone)]
pub struct IconsExt {
    runner: ToolRunner,
    executable: PathBuf,
}

impl IconsExt {
    /// Locates `iconsext.exe` using `config`.
    pub fn new(config: ToolConfig) -> ToolResult<Self> {
        let runner = ToolRunner::with_config(config);
        let executable = runner.locate(NirsoftTool::IconsExt)?;
        Ok(Self { runner, executable })
    }

    /// Path of the executable in use.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Runs `iconsext.exe /save <container> <out_dir> -icons`.
    ///
    /// Fails on a non-zero exit status, though the tool may still have
    /// written some icons.
    pub fn save_icons(&self, container: &str, out_dir: &Path) -> ToolResult<()> {
        let args = save_args(container, out_dir);
        let output = self
            .runner
            .run(NirsoftTool::IconsExt, &self.executable, &args)?;

        if !output.status.success() {
            let exit_code = output.status.code().unwrap_or(-1);
            return Err(ToolError::process_failed(
                NirsoftTool::IconsExt.file_name(),
                exit_code,
                output.stderr,
            ));
        }
        debug!(container, out_dir = %out_dir.display(), "Extracted icons");
        Ok(())
    }
}

fn save_args<'a>(container: &'a str, out_dir: &'a Path) -> [&'a OsStr; 4] {
    [
        OsStr::new("/save"),
        OsStr::new(container),
        out_dir.as_os_str(),
        OsStr::new("-icons"),
    ]
}

impl IconExtractor for IconsExt {
    fn extract(&self, container: &str, out_dir: &Path) -> Result<(), ToolFailure> {
        self.save_icons(container, out_dir).map_err(ToolFailure::from)
    }
}
