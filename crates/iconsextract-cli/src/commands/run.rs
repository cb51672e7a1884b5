//! Run command implementation
//!
//! Enumerates registered file types and writes one `.ico` per extension.

use anyhow::{Context, Result};
use colored::Colorize;
use iconsextract_backend_nirsoft::{FileTypesMan, IconsExt, ToolConfig};
use iconsextract_spec::{lookup_dirs_from, Environment, FileTypeSource, IconExtractor, ProcessEnv};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use crate::error::ensure_supported_platform;
use crate::report::RunReport;
use crate::session::{prepare_output_dir, Session, DEFAULT_OUTPUT_DIR};
use crate::workspace::Workspace;

/// Options for a run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory receiving `<extension>.ico` files.
    pub output_dir: PathBuf,
    /// Workspace root (default: `<system temp>/iconsextract`).
    pub temp_dir: Option<PathBuf>,
    /// Tool discovery and subprocess settings.
    pub tools: ToolConfig,
    /// Print the report as JSON instead of coloured text.
    pub json: bool,
    /// List every extension in the human-readable report.
    pub verbose: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            temp_dir: None,
            tools: ToolConfig::default(),
            json: false,
            verbose: false,
        }
    }
}

/// Run the extraction against the real NirSoft tools.
///
/// # Returns
/// Exit code: 0 on success. Fatal errors are returned as `Err`.
pub fn run(options: &RunOptions) -> Result<ExitCode> {
    let start = Instant::now();
    ensure_supported_platform()?;

    let enumerator = FileTypesMan::new(options.tools.clone())?;
    let extractor = IconsExt::new(options.tools.clone())?;
    let lookup_dirs = std::env::var_os("PATH")
        .map(|path| lookup_dirs_from(&path))
        .unwrap_or_default();

    if !options.json {
        println!(
            "{} {}",
            "Exporting icons to:".cyan().bold(),
            options.output_dir.display()
        );
        println!("{} {}", "Enumerator:".dimmed(), enumerator.executable().display());
        println!("{} {}", "Extractor:".dimmed(), extractor.executable().display());
    }

    let report = execute(options, &enumerator, &extractor, &ProcessEnv, lookup_dirs)?;

    if options.json {
        println!("{}", report.to_json_pretty()?);
    } else {
        report.print_summary(options.verbose);
        println!(
            "{} {:.1}s",
            "Elapsed:".dimmed(),
            start.elapsed().as_secs_f64()
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// Runs a full session against the given tools.
///
/// Checks the output directory, creates the workspace, enumerates file
/// types, and processes every record. The workspace is removed before this
/// returns, whether it succeeds or not.
pub fn execute(
    options: &RunOptions,
    enumerator: &dyn FileTypeSource,
    extractor: &dyn IconExtractor,
    env: &dyn Environment,
    lookup_dirs: Vec<String>,
) -> Result<RunReport> {
    prepare_output_dir(&options.output_dir)?;

    let root = options
        .temp_dir
        .clone()
        .unwrap_or_else(Workspace::default_root);
    let workspace = Workspace::create(&root)
        .with_context(|| format!("Failed to create workspace: {}", root.display()))?;

    let records = enumerator
        .list_file_types(&workspace.dump_path())
        .context("Failed to enumerate registered file types")?;

    let mut session = Session::new(&options.output_dir, &workspace, extractor, env, lookup_dirs);
    Ok(session.run(&records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = RunOptions::default();
        assert_eq!(options.output_dir, PathBuf::from("icons"));
        assert_eq!(options.temp_dir, None);
        assert!(!options.json);
    }

    #[cfg(not(windows))]
    #[test]
    fn test_run_requires_windows() {
        let err = run(&RunOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Windows is required"));
    }
}
