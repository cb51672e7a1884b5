//! Fake tools implementing the capability traits.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use iconsextract_spec::{FileTypeSource, IconExtractor, IconRecord, ToolFailure};

/// Extractor that writes canned files for known containers.
///
/// Unknown containers fail the way the real tool does when the file is
/// missing. Every call is logged in order.
#[derive(Debug, Default)]
pub struct FakeExtractor {
    containers: HashMap<String, Vec<String>>,
    calls: RefCell<Vec<String>>,
}

impl FakeExtractor {
    /// Create an extractor that knows no containers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the files produced for `container`.
    ///
    /// File contents are the file name, so copies can be traced back.
    pub fn with_container(mut self, container: &str, files: &[&str]) -> Self {
        self.containers.insert(
            container.to_string(),
            files.iter().map(|f| f.to_string()).collect(),
        );
        self
    }

    /// Containers passed to `extract`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Number of times `container` was requested.
    pub fn call_count(&self, container: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == container).count()
    }
}

impl IconExtractor for FakeExtractor {
    fn extract(&self, container: &str, out_dir: &Path) -> Result<(), ToolFailure> {
        self.calls.borrow_mut().push(container.to_string());
        let files = self.containers.get(container).ok_or_else(|| {
            ToolFailure::new("TOOL_005", format!("{} not found", container))
                .with_exit_code(1)
        })?;
        for file in files {
            fs::write(out_dir.join(file), file.as_bytes())
                .map_err(|e| ToolFailure::new("TOOL_005", e.to_string()))?;
        }
        Ok(())
    }
}

/// Enumerator returning a fixed set of records, or a fixed failure.
#[derive(Debug, Default)]
pub struct FakeFileTypes {
    records: Vec<IconRecord>,
    exit_code: Option<i32>,
    dump_paths: RefCell<Vec<PathBuf>>,
}

impl FakeFileTypes {
    /// Create an enumerator yielding `(extension, raw icon spec)` rows.
    pub fn new(rows: &[(&str, &str)]) -> Self {
        Self {
            records: rows
                .iter()
                .map(|(ext, raw)| IconRecord::new(*ext, raw))
                .collect(),
            ..Default::default()
        }
    }

    /// Create an enumerator whose process exits with `exit_code`.
    pub fn failing(exit_code: i32) -> Self {
        Self {
            exit_code: Some(exit_code),
            ..Default::default()
        }
    }

    /// Dump paths the enumerator was asked to write.
    pub fn dump_paths(&self) -> Vec<PathBuf> {
        self.dump_paths.borrow().clone()
    }
}

impl FileTypeSource for FakeFileTypes {
    fn list_file_types(&self, dump_path: &Path) -> Result<Vec<IconRecord>, ToolFailure> {
        self.dump_paths.borrow_mut().push(dump_path.to_path_buf());
        if let Some(code) = self.exit_code {
            return Err(ToolFailure::new(
                "TOOL_005",
                format!("FileTypesMan.exe exited with code {}", code),
            )
            .with_exit_code(code));
        }
        Ok(self.records.clone())
    }
}
