//! iconsextract CLI - Export the icon of every registered file extension
//!
//! This binary enumerates the file types registered on a Windows host and
//! writes one `<extension>.ico` per extension into an output directory.

use clap::{Args, Parser, Subcommand};
use iconsextract_backend_nirsoft::ToolConfig;
use iconsextract_spec::ToolFailure;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use iconsextract_cli::commands;
use iconsextract_cli::commands::run::RunOptions;

/// iconsextract - Export file type icons as .ico files
#[derive(Parser)]
#[command(name = "iconsextract")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export one .ico per registered file extension
    Run {
        /// Output directory (must be absent or empty)
        #[arg(short, long, default_value = "icons")]
        output_dir: PathBuf,

        /// Temporary workspace root (default: <system temp>/iconsextract)
        #[arg(long)]
        temp_dir: Option<PathBuf>,

        #[command(flatten)]
        tools: ToolArgs,

        /// Output the run report as JSON (no colored output)
        #[arg(long)]
        json: bool,

        /// List the outcome for every extension
        #[arg(short, long)]
        verbose: bool,
    },

    /// Check platform, tools, and output directory
    Doctor {
        /// Output directory to check
        #[arg(short, long, default_value = "icons")]
        output_dir: PathBuf,

        #[command(flatten)]
        tools: ToolArgs,
    },
}

/// Tool discovery options shared by every command.
#[derive(Args, Debug, Default)]
struct ToolArgs {
    /// Directory containing FileTypesMan.exe and iconsext.exe
    #[arg(long)]
    tools_dir: Option<PathBuf>,

    /// Path to iconsext.exe
    #[arg(long)]
    iconsext: Option<PathBuf>,

    /// Path to FileTypesMan.exe
    #[arg(long)]
    filetypesman: Option<PathBuf>,

    /// Kill a tool invocation that runs longer than this many seconds
    #[arg(long)]
    tool_timeout_secs: Option<u64>,
}

impl ToolArgs {
    fn into_config(self) -> ToolConfig {
        let mut config = ToolConfig {
            tools_dir: self.tools_dir,
            ..Default::default()
        };
        if let Some(path) = self.iconsext {
            config = config.iconsext_path(path);
        }
        if let Some(path) = self.filetypesman {
            config = config.filetypesman_path(path);
        }
        if let Some(secs) = self.tool_timeout_secs {
            config = config.timeout_secs(secs);
        }
        config
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Exit code for a fatal error: the enumerator's own code when it failed.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ToolFailure>()
        .and_then(|failure| failure.exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .filter(|code| *code != 0)
        .unwrap_or(1)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Commands::Run {
            output_dir,
            temp_dir,
            tools,
            json,
            verbose,
        } => commands::run::run(&RunOptions {
            output_dir,
            temp_dir,
            tools: tools.into_config(),
            json,
            verbose,
        }),
        Commands::Doctor { output_dir, tools } => {
            commands::doctor::run(&tools.into_config(), &output_dir)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(exit_code_for(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_cli_parses_run_defaults() {
        let cli = Cli::try_parse_from(["iconsextract", "run"]).unwrap();
        match cli.command {
            Commands::Run {
                output_dir,
                temp_dir,
                tools,
                json,
                verbose,
            } => {
                assert_eq!(output_dir, PathBuf::from("icons"));
                assert_eq!(temp_dir, None);
                assert!(!json);
                assert!(!verbose);
                assert_eq!(tools.tools_dir, None);
                assert_eq!(tools.tool_timeout_secs, None);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_cli_parses_run_options() {
        let cli = Cli::try_parse_from([
            "iconsextract",
            "run",
            "--output-dir",
            "out",
            "--iconsext",
            "C:/nirsoft/iconsext.exe",
            "--tool-timeout-secs",
            "30",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                output_dir,
                tools,
                json,
                ..
            } => {
                assert_eq!(output_dir, PathBuf::from("out"));
                assert!(json);
                let config = tools.into_config();
                assert_eq!(
                    config.iconsext_path,
                    Some(PathBuf::from("C:/nirsoft/iconsext.exe"))
                );
                assert_eq!(config.filetypesman_path, None);
                assert_eq!(config.timeout, Some(Duration::from_secs(30)));
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_cli_parses_doctor() {
        let cli =
            Cli::try_parse_from(["iconsextract", "doctor", "--tools-dir", "C:/nirsoft"]).unwrap();
        match cli.command {
            Commands::Doctor { output_dir, tools } => {
                assert_eq!(output_dir, PathBuf::from("icons"));
                assert_eq!(tools.into_config().tools_dir, Some(PathBuf::from("C:/nirsoft")));
            }
            _ => panic!("expected doctor command"),
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["iconsextract"]).is_err());
    }

    #[test]
    fn test_exit_code_propagates_tool_failure() {
        let failure = ToolFailure::new("TOOL_005", "FileTypesMan.exe exited").with_exit_code(7);
        let err = anyhow::Error::new(failure).context("Failed to enumerate registered file types");
        assert_eq!(exit_code_for(&err), 7);

        let err = anyhow::anyhow!("plain failure");
        assert_eq!(exit_code_for(&err), 1);
    }
}
