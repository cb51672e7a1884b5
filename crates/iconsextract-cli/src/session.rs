//! Per-record pipeline for one run.
//!
//! For each record: parse the icon location, then either copy the `.ico` it
//! names or extract its container and select an icon. Failures are confined
//! to the record that caused them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use iconsextract_spec::{Environment, IconExtractor, IconRecord, IconSpec, ResolvedPath, SkipReason};
use tracing::{debug, warn};

use crate::error::PreconditionError;
use crate::extraction::ExtractionCache;
use crate::report::{RecordOutcome, RunReport};
use crate::selector::choose_icon;
use crate::workspace::Workspace;

/// Default output directory name.
pub const DEFAULT_OUTPUT_DIR: &str = "icons";

/// Checks that `dir` is absent or empty, then creates it.
pub fn prepare_output_dir(dir: &Path) -> anyhow::Result<()> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(PreconditionError::OutputNotDirectory {
                path: dir.to_path_buf(),
            }
            .into());
        }
        if fs::read_dir(dir)?.next().is_some() {
            return Err(PreconditionError::OutputNotEmpty {
                path: dir.to_path_buf(),
            }
            .into());
        }
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

/// State shared by every record of a run.
pub struct Session<'a> {
    output_dir: PathBuf,
    env: &'a dyn Environment,
    cache: ExtractionCache<'a>,
}

impl<'a> Session<'a> {
    /// Creates a session writing icons to `output_dir`.
    pub fn new(
        output_dir: impl Into<PathBuf>,
        workspace: &'a Workspace,
        extractor: &'a dyn IconExtractor,
        env: &'a dyn Environment,
        lookup_dirs: Vec<String>,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            env,
            cache: ExtractionCache::new(workspace, extractor, lookup_dirs),
        }
    }

    /// Processes every record in order.
    pub fn run<'r>(&mut self, records: impl IntoIterator<Item = &'r IconRecord>) -> RunReport {
        let mut report = RunReport::default();
        for record in records {
            let outcome = self.process(record);
            report.push(record.extension.clone(), outcome);
        }
        report
    }

    /// Processes one record.
    pub fn process(&mut self, record: &IconRecord) -> RecordOutcome {
        if record.extension.is_empty() {
            return skipped(SkipReason::EmptyExtension);
        }

        let spec = match IconSpec::parse(&record.raw_spec, self.env) {
            Ok(spec) => spec,
            Err(reason) => {
                debug!(extension = %record.extension, %reason, "Skipping record");
                return skipped(reason);
            }
        };

        let output = self.output_dir.join(record.output_file_name());
        let result = match spec.resolve() {
            ResolvedPath::DirectIcoFile => copy_direct(&spec, &output),
            ResolvedPath::ContainerResource => self.extract_and_choose(&spec, &output),
        };

        result.unwrap_or_else(|e| {
            warn!(extension = %record.extension, path = %spec.path, error = %e, "Record failed");
            RecordOutcome::Failed {
                reason: format!("{}: {}", spec.path, e),
            }
        })
    }

    fn extract_and_choose(&mut self, spec: &IconSpec, output: &Path) -> io::Result<RecordOutcome> {
        let no_icon = || RecordOutcome::NoIcon {
            container: spec.path.clone(),
        };

        let Some(dir) = self.cache.resource_dir(spec)? else {
            return Ok(no_icon());
        };

        Ok(match choose_icon(&dir, spec.resource_index, output)? {
            Some(source) => RecordOutcome::Extracted {
                container: spec.path.clone(),
                source,
                output: output.to_path_buf(),
            },
            None => no_icon(),
        })
    }
}

fn copy_direct(spec: &IconSpec, output: &Path) -> io::Result<RecordOutcome> {
    let source = PathBuf::from(&spec.path);
    fs::copy(&source, output)?;
    debug!(source = %source.display(), output = %output.display(), "Copied icon file");
    Ok(RecordOutcome::Copied {
        source,
        output: output.to_path_buf(),
    })
}

fn skipped(reason: SkipReason) -> RecordOutcome {
    RecordOutcome::Skipped {
        reason: reason.to_string(),
    }
}
