//! Capability traits for the external tools.
//!
//! The enumeration and extraction tools are opaque processes. The session
//! only talks to them through these traits so it can run against fakes.

use std::path::Path;

use crate::error::ToolFailure;
use crate::record::IconRecord;

/// Extracts the icon resources embedded in a container.
pub trait IconExtractor {
    /// Writes the icons found in `container` into `out_dir`.
    ///
    /// Callers treat any error as "nothing extracted"; an empty `out_dir`
    /// after the call is the real failure signal.
    fn extract(&self, container: &str, out_dir: &Path) -> Result<(), ToolFailure>;
}

/// Enumerates the registered file types.
pub trait FileTypeSource {
    /// Produces the extension records, using `dump_path` as scratch space.
    fn list_file_types(&self, dump_path: &Path) -> Result<Vec<IconRecord>, ToolFailure>;
}
