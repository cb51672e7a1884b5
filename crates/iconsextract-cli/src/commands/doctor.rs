//! Doctor command implementation
//!
//! Checks the host, the NirSoft tools, and the output directory.

use anyhow::Result;
use colored::Colorize;
use iconsextract_backend_nirsoft::{NirsoftTool, ToolConfig, ToolError, ToolRunner};
use iconsextract_spec::lookup_dirs_from;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use crate::error::ensure_supported_platform;

/// Run the doctor command
///
/// Checks:
/// - Host platform
/// - FileTypesMan and IconsExtract availability
/// - Output directory state
/// - PATH lookup directories
///
/// # Returns
/// Exit code: 0 if all checks pass, 1 if any fail
pub fn run(tools: &ToolConfig, output_dir: &Path) -> Result<ExitCode> {
    println!("{}", "iconsextract Doctor".cyan().bold());
    println!("{}", "===================".cyan());
    println!();

    let mut all_ok = true;

    println!("{}", "Versions:".bold());
    println!(
        "  {} iconsextract-cli v{}",
        "->".green(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("{}", "Platform:".bold());
    match ensure_supported_platform() {
        Ok(()) => println!("  {} {}", "ok".green(), std::env::consts::OS),
        Err(e) => {
            println!("  {} {}", "!!".red(), e);
            all_ok = false;
        }
    }
    println!();

    println!("{}", "Tools:".bold());
    let runner = ToolRunner::with_config(tools.clone());
    for tool in [NirsoftTool::FileTypesMan, NirsoftTool::IconsExt] {
        match check_tool(&runner, tool) {
            ToolStatus::Found(path) => {
                println!("  {} {} ({})", "ok".green(), tool.file_name(), path);
            }
            ToolStatus::Missing(message) => {
                println!("  {} {}", "!!".red(), message);
                println!(
                    "     {}",
                    format!("Download from {}", tool.download_url()).dimmed()
                );
                all_ok = false;
            }
        }
    }
    println!();

    println!("{}", "Output:".bold());
    match output_dir_status(output_dir) {
        OutputStatus::Missing => println!(
            "  {} {} will be created",
            "ok".green(),
            output_dir.display()
        ),
        OutputStatus::Empty => println!("  {} {} is empty", "ok".green(), output_dir.display()),
        OutputStatus::Populated => {
            println!(
                "  {} {} exists and is not empty",
                "!!".yellow(),
                output_dir.display()
            );
            all_ok = false;
        }
        OutputStatus::Unreadable(e) => {
            println!("  {} {}: {}", "!!".red(), output_dir.display(), e);
            all_ok = false;
        }
    }
    println!();

    println!("{}", "Lookup directories:".bold());
    let lookup_dirs = std::env::var_os("PATH")
        .map(|path| lookup_dirs_from(&path))
        .unwrap_or_default();
    println!(
        "  {} {} entries from PATH",
        "->".green(),
        lookup_dirs.len()
    );
    println!();

    if all_ok {
        println!("{} All checks passed!", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} Some checks failed. See above for details.",
            "WARNING".yellow().bold()
        );
        Ok(ExitCode::from(1))
    }
}

/// Status of a tool lookup
enum ToolStatus {
    Found(String),
    Missing(String),
}

fn check_tool(runner: &ToolRunner, tool: NirsoftTool) -> ToolStatus {
    match runner.locate(tool) {
        Ok(path) => ToolStatus::Found(path.display().to_string()),
        Err(e @ ToolError::NotFound { .. }) | Err(e @ ToolError::ConfiguredPathMissing { .. }) => {
            ToolStatus::Missing(e.to_string())
        }
        Err(e) => ToolStatus::Missing(format!("{} check failed: {}", tool.file_name(), e)),
    }
}

/// State of the output directory
#[derive(Debug)]
enum OutputStatus {
    Missing,
    Empty,
    Populated,
    Unreadable(String),
}

fn output_dir_status(dir: &Path) -> OutputStatus {
    if !dir.exists() {
        return OutputStatus::Missing;
    }
    match fs::read_dir(dir) {
        Ok(mut entries) => {
            if entries.next().is_some() {
                OutputStatus::Populated
            } else {
                OutputStatus::Empty
            }
        }
        Err(e) => OutputStatus::Unreadable(e.to_string()),
    }
}
