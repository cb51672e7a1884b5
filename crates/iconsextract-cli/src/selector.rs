//! Icon selection among extracted resources.
//!
//! Registry resource indices and extracted file names use different
//! numbering. A non-negative index `k` is zero-based and corresponds to the
//! tool's one-based identifier `k + 1`; a negative index `-k` already names
//! identifier `k`. A file whose name carries `_<id>.` wins outright; failing
//! that, the `id`-th file in listing order is used.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Converts a registry resource index into the extraction tool's identifier.
pub fn target_id(resource_index: i32) -> u64 {
    let index = i64::from(resource_index);
    if index >= 0 {
        (index + 1) as u64
    } else {
        (-index) as u64
    }
}

/// Returns true when `file_name` is tagged with resource identifier `id`.
pub fn matches_resource_id(file_name: &str, id: u64) -> bool {
    file_name.contains(&format!("_{}.", id))
}

/// Lists the files in `dir`, sorted by name ignoring case as NTFS does.
pub fn list_candidates(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort_by_cached_key(|path| {
        path.file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });
    Ok(files)
}

/// Picks the candidate for `resource_index`, if any.
///
/// An exact identifier match takes precedence over the positional fallback.
pub fn select_candidate(candidates: &[PathBuf], resource_index: i32) -> Option<&PathBuf> {
    let id = target_id(resource_index);
    let mut fallback = None;

    for (i, candidate) in candidates.iter().enumerate() {
        let name = candidate
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        if matches_resource_id(&name, id) {
            return Some(candidate);
        }
        if i as u64 == id - 1 {
            fallback = Some(candidate);
        }
    }

    fallback
}

/// Chooses an icon from `resource_dir` and copies it to `output`.
///
/// Returns the chosen source file, or `None` when the directory is empty or
/// nothing matches; no output is written in that case.
pub fn choose_icon(
    resource_dir: &Path,
    resource_index: i32,
    output: &Path,
) -> io::Result<Option<PathBuf>> {
    let candidates = list_candidates(resource_dir)?;
    let Some(chosen) = select_candidate(&candidates, resource_index) else {
        debug!(
            dir = %resource_dir.display(),
            resource_index,
            candidates = candidates.len(),
            "No icon selected"
        );
        return Ok(None);
    };

    fs::copy(chosen, output)?;
    debug!(source = %chosen.display(), output = %output.display(), "Installed icon");
    Ok(Some(chosen.clone()))
}
