//! Test harness for running sessions in a scratch directory.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use iconsextract_cli::commands::run::{execute, RunOptions};
use iconsextract_cli::RunReport;
use iconsextract_spec::{FileTypeSource, IconExtractor, MapEnv};

/// A scratch directory holding the output dir, workspace root and sources.
pub struct TestHarness {
    /// Working directory for test outputs.
    pub work_dir: TempDir,
    /// Environment used to expand `%NAME%` references.
    pub env: MapEnv,
    /// Lookup directories tried for relative containers.
    pub lookup_dirs: Vec<String>,
}

impl TestHarness {
    /// Create a new test harness.
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().expect("Failed to create work dir"),
            env: MapEnv::new()
                .with("ProgramFiles", r"C:\Program Files (x86)")
                .with("ProgramW6432", r"C:\Program Files")
                .with("SystemRoot", r"C:\Windows"),
            lookup_dirs: Vec::new(),
        }
    }

    /// Set the lookup directories for relative containers.
    pub fn with_lookup_dirs(mut self, dirs: &[&str]) -> Self {
        self.lookup_dirs = dirs.iter().map(|d| d.to_string()).collect();
        self
    }

    /// Get the working directory path.
    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Directory receiving the exported icons.
    pub fn output_dir(&self) -> PathBuf {
        self.path().join("icons")
    }

    /// Root of the temporary workspace.
    pub fn temp_root(&self) -> PathBuf {
        self.path().join("workspace")
    }

    /// Path an icon for `extension` is exported to.
    pub fn output_icon(&self, extension: &str) -> PathBuf {
        self.output_dir().join(format!("{}.ico", extension))
    }

    /// Write a standalone `.ico` source file and return its path.
    pub fn write_ico(&self, name: &str, contents: &[u8]) -> PathBuf {
        let dir = self.path().join("sources");
        fs::create_dir_all(&dir).expect("Failed to create sources dir");
        let path = dir.join(name);
        fs::write(&path, contents).expect("Failed to write source icon");
        path
    }

    /// Run options pointing at this harness.
    pub fn options(&self) -> RunOptions {
        RunOptions {
            output_dir: self.output_dir(),
            temp_dir: Some(self.temp_root()),
            ..Default::default()
        }
    }

    /// Run a whole session against the given tools.
    pub fn execute(
        &self,
        enumerator: &dyn FileTypeSource,
        extractor: &dyn IconExtractor,
    ) -> anyhow::Result<RunReport> {
        execute(
            &self.options(),
            enumerator,
            extractor,
            &self.env,
            self.lookup_dirs.clone(),
        )
    }

    /// Read an exported icon as text (fake icons hold their source name).
    pub fn read_output(&self, extension: &str) -> String {
        fs::read_to_string(self.output_icon(extension)).expect("Failed to read output icon")
    }

    /// Names of the files in the output directory, sorted.
    pub fn output_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.output_dir())
            .expect("Failed to read output dir")
            .map(|e| {
                e.expect("Failed to read entry")
                    .file_name()
                    .to_string_lossy()
                    .to_string()
            })
            .collect();
        names.sort();
        names
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
