//! File type enumeration through `FileTypesMan.exe`.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use iconsextract_spec::{read_registry_dump, FileTypeSource, IconRecord, ToolFailure};
use tracing::info;

use crate::error::{ToolError, ToolResult};
use crate::orchestrator::{NirsoftTool, ToolConfig, ToolRunner};

/// The FileTypesMan command-line interface.
#[derive(Debug, Clone)]
pub struct FileTypesMan {
    runner: ToolRunner,
    executable: PathBuf,
}

impl FileTypesMan {
    /// Locates `FileTypesMan.exe` using `config`.
    pub fn new(config: ToolConfig) -> ToolResult<Self> {
        let runner = ToolRunner::with_config(config);
        let executable = runner.locate(NirsoftTool::FileTypesMan)?;
        Ok(Self { runner, executable })
    }

    /// Path of the executable in use.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Writes the tab-separated file type table to `dump_path` and parses it.
    pub fn dump(&self, dump_path: &Path) -> ToolResult<Vec<IconRecord>> {
        let args = [OsStr::new("/stab"), dump_path.as_os_str()];
        let output = self
            .runner
            .run(NirsoftTool::FileTypesMan, &self.executable, &args)?;

        if !output.status.success() {
            let exit_code = output.status.code().unwrap_or(1);
            return Err(ToolError::process_failed(
                NirsoftTool::FileTypesMan.file_name(),
                exit_code,
                output.stderr,
            ));
        }

        let records = read_registry_dump(dump_path)?;
        info!(count = records.len(), "Enumerated file type records");
        Ok(records)
    }
}

impl FileTypeSource for FileTypesMan {
    fn list_file_types(&self, dump_path: &Path) -> Result<Vec<IconRecord>, ToolFailure> {
        self.dump(dump_path).map_err(ToolFailure::from)
    }
}
