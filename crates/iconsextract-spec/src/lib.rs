//! iconsextract Spec Library
//!
//! This crate provides the platform-neutral half of iconsextract: reading the
//! file-type registry dump, parsing the loosely structured icon-location
//! strings it contains, and classifying the result.
//!
//! # Overview
//!
//! Each extension row of the registry dump carries a `DefaultIcon` field such as:
//!
//! | Raw field | Meaning |
//! |-----------|---------|
//! | `C:\Python27\DLLs\py.ico` | A standalone icon file |
//! | `%SystemRoot%\System32\shell32.dll,2` | Resource index 2 of a container |
//! | `imageres.dll,-67` | Resource ID 67 of a container found on `PATH` |
//! | `%ProgramFiles%\Windows Journal\Journal.exe,2` | Also tried under `%ProgramW6432%` |
//! | `%1` | Unusable, skipped |
//!
//! # Example
//!
//! ```
//! use iconsextract_spec::{IconSpec, MapEnv, ResolvedPath};
//!
//! let env = MapEnv::new().with("SystemRoot", r"C:\Windows");
//! let spec = IconSpec::parse(r"%SystemRoot%\System32\shell32.dll,2", &env).unwrap();
//!
//! assert_eq!(spec.path, r"C:\Windows\System32\shell32.dll");
//! assert_eq!(spec.resource_index, 2);
//! assert_eq!(spec.resolve(), ResolvedPath::ContainerResource);
//! ```
//!
//! # Modules
//!
//! - [`env`]: `%NAME%` expansion and lookup-directory discovery
//! - [`error`]: Error types and the shared error-code trait
//! - [`icon_spec`]: Icon-location parsing
//! - [`record`]: Registry dump decoding
//! - [`resolve`]: Direct-file vs container classification and path helpers
//! - [`tools`]: Capability traits for the external enumeration and extraction tools

pub mod env;
pub mod error;
pub mod icon_spec;
pub mod record;
pub mod resolve;
pub mod tools;

// Re-export commonly used types at the crate root
pub use env::{expand_vars, lookup_dirs_from, Environment, MapEnv, ProcessEnv};
pub use error::{ErrorCode, SpecError, SpecResult, ToolFailure};
pub use icon_spec::{IconSpec, SkipReason};
pub use record::{decode_utf16, parse_registry_dump, read_registry_dump, IconRecord};
pub use resolve::{base_name, is_rooted, join_lookup, ResolvedPath};
pub use tools::{FileTypeSource, IconExtractor};
