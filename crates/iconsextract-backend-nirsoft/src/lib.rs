//! iconsextract NirSoft Backend
//!
//! This crate drives the two NirSoft utilities iconsextract depends on, each
//! run as a blocking subprocess:
//!
//! - **FileTypesMan** (`FileTypesMan.exe /stab <file>`) dumps every registered
//!   file type, including its `DefaultIcon` location, as UTF-16 TSV.
//! - **IconsExtract** (`iconsext.exe /save <container> <dir> -icons`) writes
//!   the icon resources of an executable or library into a directory, one
//!   `.ico` per resource, named `<container>_<id>.ico`.
//!
//! They are exposed through the [`iconsextract_spec::FileTypeSource`] and
//! [`iconsextract_spec::IconExtractor`] traits.
//!
//! # Tool Requirements
//!
//! Neither executable is bundled. Each is searched for in:
//!
//! 1. An explicit path in [`ToolConfig`]
//! 2. The `ICONSEXTRACT_FILETYPESMAN` / `ICONSEXTRACT_ICONSEXT` environment variables
//! 3. The configured tools directory (default: next to the running executable)
//! 4. System PATH
//!
//! # Crate Structure
//!
//! - [`orchestrator`] - Tool discovery and subprocess management
//! - [`filetypesman`] - Registry enumeration
//! - [`iconsext`] - Icon extraction
//! - [`error`] - Error types

pub mod error;
pub mod filetypesman;
pub mod iconsext;
pub mod orchestrator;

pub use error::{ToolError, ToolResult};
pub use filetypesman::FileTypesMan;
pub use iconsext::IconsExt;
pub use orchestrator::{NirsoftTool, ToolConfig, ToolRunner};
