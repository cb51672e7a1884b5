//! iconsextract CLI library.
//!
//! This crate provides the core functionality for the iconsextract CLI:
//! the temporary workspace, the per-container extraction cache, icon
//! selection, the per-record session, and the `run`/`doctor` commands.

pub mod commands;
pub mod error;
pub mod extraction;
pub mod report;
pub mod selector;
pub mod session;
pub mod workspace;

pub use error::PreconditionError;
pub use extraction::ExtractionCache;
pub use report::{RecordOutcome, RecordReport, RunReport};
pub use session::Session;
pub use workspace::Workspace;

// Used by main.rs binary
use tracing_subscriber as _;
