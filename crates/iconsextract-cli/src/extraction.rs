//! Per-container extraction with at-most-once caching.
//!
//! Every container is extracted into its own workspace directory the first
//! time a record references it. The directory is keyed by the container's
//! lowercased base file name, so `C:\Windows\System32\shell32.dll` and
//! `shell32.dll,4` share one extraction. Later references reuse the result
//! without invoking the extractor again.
//!
//! When nothing is extracted from a relative container path, each lookup
//! directory is tried in turn until one yields icons. That search runs at
//! most once per key, on the first relative reference that finds the
//! directory empty.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use iconsextract_spec::{base_name, is_rooted, join_lookup, IconExtractor, IconSpec};
use tracing::debug;

use crate::workspace::Workspace;

/// One extracted container.
#[derive(Debug)]
struct CacheEntry {
    dir: PathBuf,
    /// Whether the lookup directories have been searched for this key.
    lookup_tried: bool,
}

/// Extraction orchestrator holding the container cache for one run.
pub struct ExtractionCache<'a> {
    workspace: &'a Workspace,
    extractor: &'a dyn IconExtractor,
    lookup_dirs: Vec<String>,
    entries: HashMap<String, CacheEntry>,
}

impl<'a> ExtractionCache<'a> {
    /// Creates an empty cache writing into `workspace`.
    pub fn new(
        workspace: &'a Workspace,
        extractor: &'a dyn IconExtractor,
        lookup_dirs: Vec<String>,
    ) -> Self {
        Self {
            workspace,
            extractor,
            lookup_dirs,
            entries: HashMap::new(),
        }
    }

    /// Cache key for a container path, or `None` if it has no file name.
    pub fn cache_key(container: &str) -> Option<String> {
        let name = base_name(container).trim();
        if name.is_empty() || name == "." || name == ".." {
            return None;
        }
        Some(name.to_lowercase())
    }

    /// Returns the resource directory for `spec`, extracting it on first use.
    ///
    /// A relative path that maps to an empty cached directory still gets one
    /// search of the lookup directories, even if an earlier rooted path with
    /// the same file name skipped it.
    ///
    /// Returns `Ok(None)` when the container path has no usable file name.
    pub fn resource_dir(&mut self, spec: &IconSpec) -> io::Result<Option<PathBuf>> {
        let Some(key) = Self::cache_key(&spec.path) else {
            return Ok(None);
        };

        let cached = self
            .entries
            .get(&key)
            .map(|entry| (entry.dir.clone(), entry.lookup_tried));
        if let Some((dir, lookup_tried)) = cached {
            debug!(container = %spec.path, key, "Reusing extracted container");
            if !lookup_tried && !is_rooted(&spec.path) && is_empty_dir(&dir)? {
                self.search_lookup_dirs(&spec.path, &dir)?;
                if let Some(entry) = self.entries.get_mut(&key) {
                    entry.lookup_tried = true;
                }
            }
            return Ok(Some(dir));
        }

        let dir = self.workspace.container_dir(&key);
        fs::create_dir_all(&dir)?;
        self.extract(&spec.path, &dir);
        if let Some(alt) = &spec.alt_path {
            self.extract(alt, &dir);
        }

        let lookup_tried = !is_rooted(&spec.path);
        if lookup_tried && is_empty_dir(&dir)? {
            self.search_lookup_dirs(&spec.path, &dir)?;
        }

        self.entries.insert(
            key,
            CacheEntry {
                dir: dir.clone(),
                lookup_tried,
            },
        );
        Ok(Some(dir))
    }

    /// Tries `<lookup>\<path>` for each lookup directory until one yields icons.
    fn search_lookup_dirs(&self, path: &str, dir: &Path) -> io::Result<()> {
        for lookup in &self.lookup_dirs {
            self.extract(&join_lookup(lookup, path), dir);
            if !is_empty_dir(dir)? {
                debug!(container = %path, lookup, "Found container in lookup directory");
                break;
            }
        }
        Ok(())
    }

    fn extract(&self, container: &str, dir: &Path) {
        // Tool failures only show up as an empty directory downstream.
        if let Err(e) = self.extractor.extract(container, dir) {
            debug!(container, error = %e, "Extraction attempt failed");
        }
    }
}

fn is_empty_dir(dir: &Path) -> io::Result<bool> {
    Ok(fs::read_dir(dir)?.next().is_none())
}
