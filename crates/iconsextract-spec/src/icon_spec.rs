//! Icon-location parsing.
//!
//! Turns one raw `DefaultIcon` field into an [`IconSpec`]. Fields come in
//! several shapes, none of which is guaranteed:
//!
//! - `path`
//! - `path,index` (index may be negative and may carry spaces)
//! - `%Var%\path,index`
//! - a placeholder such as `%1`, which names no file at all

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::env::{expand_vars, Environment};
use crate::resolve::ResolvedPath;

/// The 32-bit program files token found in registry paths.
pub const PROGRAM_FILES_TOKEN: &str = "%ProgramFiles%";

/// The token that always expands to the 64-bit program files root.
pub const PROGRAM_FILES_64_TOKEN: &str = "%ProgramW6432%";

/// Fields this short or shorter carry no usable path.
pub const MAX_UNUSABLE_LEN: usize = 2;

/// A parsed icon location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconSpec {
    /// Expanded path to an `.ico` file or an icon container.
    pub path: String,
    /// Resource index; zero-based when non-negative, a resource ID when negative.
    pub resource_index: i32,
    /// Same path re-rooted under the 64-bit program files directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_path: Option<String>,
}

/// Why a record was skipped without producing an icon.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// The field is empty or a bare placeholder.
    #[error("icon location '{raw}' is too short to name a file")]
    TooShort { raw: String },

    /// The field has a resource index but nothing before the comma.
    #[error("icon location has a resource index but no path")]
    EmptyPath,

    /// The text after the comma is not a signed integer.
    #[error("resource index '{text}' is not an integer")]
    InvalidIndex { text: String },

    /// The record has no extension name.
    #[error("record has an empty extension")]
    EmptyExtension,
}

impl IconSpec {
    /// Parses a raw icon location, expanding environment references.
    ///
    /// `raw` must already be stripped of quote characters; see
    /// [`crate::record::IconRecord`].
    pub fn parse(raw: &str, env: &dyn Environment) -> Result<Self, SkipReason> {
        if raw.chars().count() <= MAX_UNUSABLE_LEN {
            return Err(SkipReason::TooShort {
                raw: raw.to_string(),
            });
        }

        let (path, resource_index) = match raw.split_once(',') {
            Some((path, index_text)) => {
                if path.is_empty() {
                    return Err(SkipReason::EmptyPath);
                }
                let index = index_text
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| SkipReason::InvalidIndex {
                        text: index_text.to_string(),
                    })?;
                (path, index)
            }
            None => (raw, 0),
        };

        let alt_path = replace_ignore_ascii_case(path, PROGRAM_FILES_TOKEN, PROGRAM_FILES_64_TOKEN)
            .map(|variant| expand_vars(&variant, env));

        let spec = Self {
            path: expand_vars(path, env),
            resource_index,
            alt_path,
        };
        debug!(raw, path = %spec.path, index = spec.resource_index, "Parsed icon location");
        Ok(spec)
    }

    /// Classifies the expanded path.
    pub fn resolve(&self) -> ResolvedPath {
        ResolvedPath::classify(&self.path)
    }
}

/// Replaces every occurrence of the ASCII `needle`, ignoring case.
///
/// Returns `None` when `needle` does not occur.
fn replace_ignore_ascii_case(haystack: &str, needle: &str, replacement: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets aligned with `haystack`.
    let lowered = haystack.to_ascii_lowercase();
    let needle = needle.to_ascii_lowercase();

    let mut result = String::with_capacity(haystack.len());
    let mut last = 0;
    for (start, _) in lowered.match_indices(&needle) {
        result.push_str(&haystack[last..start]);
        result.push_str(replacement);
        last = start + needle.len();
    }

    if last == 0 {
        return None;
    }
    result.push_str(&haystack[last..]);
    Some(result)
}
