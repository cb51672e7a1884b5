//! Per-record outcomes and the run summary.

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

/// What happened to one extension record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordOutcome {
    /// The icon location was unusable.
    Skipped { reason: String },
    /// A standalone `.ico` was copied.
    Copied { source: PathBuf, output: PathBuf },
    /// An icon was selected from an extracted container.
    Extracted {
        container: String,
        source: PathBuf,
        output: PathBuf,
    },
    /// The container yielded no matching icon.
    NoIcon { container: String },
    /// A filesystem operation failed for this record only.
    Failed { reason: String },
}

impl RecordOutcome {
    /// Returns true when an output icon was written.
    pub fn wrote_icon(&self) -> bool {
        matches!(
            self,
            RecordOutcome::Copied { .. } | RecordOutcome::Extracted { .. }
        )
    }
}

/// One line of the run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordReport {
    /// Extension as written in the registry (no leading dot).
    pub extension: String,
    /// Outcome for the extension.
    #[serde(flatten)]
    pub outcome: RecordOutcome,
}

/// Summary counts for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunCounts {
    pub records: usize,
    pub copied: usize,
    pub extracted: usize,
    pub no_icon: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Everything a run did, in record order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub entries: Vec<RecordReport>,
}

impl RunReport {
    /// Appends the outcome for `extension`.
    pub fn push(&mut self, extension: impl Into<String>, outcome: RecordOutcome) {
        self.entries.push(RecordReport {
            extension: extension.into(),
            outcome,
        });
    }

    /// Returns the latest outcome recorded for `extension` (case-insensitive).
    pub fn outcome_for(&self, extension: &str) -> Option<&RecordOutcome> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.extension.eq_ignore_ascii_case(extension))
            .map(|e| &e.outcome)
    }

    /// Tallies the outcomes.
    pub fn counts(&self) -> RunCounts {
        let mut counts = RunCounts {
            records: self.entries.len(),
            ..Default::default()
        };
        for entry in &self.entries {
            match entry.outcome {
                RecordOutcome::Skipped { .. } => counts.skipped += 1,
                RecordOutcome::Copied { .. } => counts.copied += 1,
                RecordOutcome::Extracted { .. } => counts.extracted += 1,
                RecordOutcome::NoIcon { .. } => counts.no_icon += 1,
                RecordOutcome::Failed { .. } => counts.failed += 1,
            }
        }
        counts
    }

    /// Serializes the report with its counts.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct Output<'a> {
            counts: RunCounts,
            entries: &'a [RecordReport],
        }
        serde_json::to_string_pretty(&Output {
            counts: self.counts(),
            entries: &self.entries,
        })
    }

    /// Prints the human-readable summary.
    pub fn print_summary(&self, verbose: bool) {
        if verbose {
            for entry in &self.entries {
                print_entry(entry);
            }
            println!();
        }

        let counts = self.counts();
        let written = self
            .entries
            .iter()
            .filter(|e| e.outcome.wrote_icon())
            .count();
        println!(
            "{} {} icons written ({} copied, {} extracted) from {} extensions",
            "Done:".green().bold(),
            written,
            counts.copied,
            counts.extracted,
            counts.records
        );
        if counts.no_icon > 0 || counts.skipped > 0 {
            println!(
                "  {} {} without icon, {} skipped",
                "-".dimmed(),
                counts.no_icon,
                counts.skipped
            );
        }
        if counts.failed > 0 {
            println!("  {} {} failed", "!".yellow(), counts.failed);
        }
    }
}

fn print_entry(entry: &RecordReport) {
    let ext = format!(".{}", entry.extension);
    match &entry.outcome {
        RecordOutcome::Copied { source, .. } => {
            println!("  {} {} <- {}", "ok".green(), ext, source.display())
        }
        RecordOutcome::Extracted {
            container, source, ..
        } => println!(
            "  {} {} <- {} ({})",
            "ok".green(),
            ext,
            container,
            source
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default()
        ),
        RecordOutcome::NoIcon { container } => {
            println!("  {} {} no icon in {}", "--".dimmed(), ext, container)
        }
        RecordOutcome::Skipped { reason } => {
            println!("  {} {} {}", "--".dimmed(), ext, reason.dimmed())
        }
        RecordOutcome::Failed { reason } => println!("  {} {} {}", "!!".yellow(), ext, reason),
    }
}
