//! Environment variable expansion for registry path strings.
//!
//! Registry icon locations use the Windows `%NAME%` syntax. Expansion goes
//! through the [`Environment`] trait so tests can supply a fixed set of
//! variables instead of the process environment.

use std::collections::HashMap;
use std::ffi::OsStr;

/// Source of environment variable values.
pub trait Environment {
    /// Returns the value of `name`, or `None` when it is not set.
    fn var(&self, name: &str) -> Option<String>;
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed, case-insensitive set of variables.
///
/// Names are matched ignoring ASCII case, the way Windows resolves them.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Creates an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable.
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.vars.insert(name.to_ascii_uppercase(), value.into());
        self
    }
}

impl Environment for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(&name.to_ascii_uppercase()).cloned()
    }
}

/// Expands every `%NAME%` reference in `input`.
///
/// Unknown variables are left verbatim (including their `%` delimiters), `%%`
/// collapses to a single `%`, and an unterminated `%` is copied as-is.
pub fn expand_vars(input: &str, env: &dyn Environment) -> String {
    let mut result = String::with_capacity(input.len());
    let mut remain = input;

    while let Some(start) = remain.find('%') {
        result.push_str(&remain[..start]);
        let tail = &remain[start + 1..];

        let Some(end) = tail.find('%') else {
            result.push_str(&remain[start..]);
            return result;
        };

        let name = &tail[..end];
        if name.is_empty() {
            result.push('%');
        } else if let Some(value) = env.var(name) {
            result.push_str(&value);
        } else {
            result.push('%');
            result.push_str(name);
            result.push('%');
        }
        remain = &tail[end + 1..];
    }

    result.push_str(remain);
    result
}

/// Splits a `PATH`-style value into lookup directories.
///
/// Uses the platform path-list separator; empty entries are dropped.
pub fn lookup_dirs_from(path_value: &OsStr) -> Vec<String> {
    std::env::split_paths(path_value)
        .map(|p| p.to_string_lossy().into_owned())
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> MapEnv {
        MapEnv::new()
            .with("SystemRoot", r"C:\Windows")
            .with("ProgramFiles", r"C:\Program Files (x86)")
    }

    #[test]
    fn test_expand_known_variable() {
        assert_eq!(
            expand_vars(r"%SystemRoot%\System32\shell32.dll", &env()),
            r"C:\Windows\System32\shell32.dll"
        );
    }

    #[test]
    fn test_expand_is_case_insensitive() {
        assert_eq!(
            expand_vars(r"%SYSTEMROOT%\notepad.exe", &env()),
            r"C:\Windows\notepad.exe"
        );
    }

    #[test]
    fn test_unknown_variable_left_verbatim() {
        assert_eq!(expand_vars(r"%Nope%\x.dll", &env()), r"%Nope%\x.dll");
    }

    #[test]
    fn test_double_percent_and_unterminated() {
        assert_eq!(expand_vars("100%%", &env()), "100%");
        assert_eq!(expand_vars("%1", &env()), "%1");
        assert_eq!(expand_vars("a%SystemRoot", &env()), "a%SystemRoot");
    }

    #[test]
    fn test_multiple_references() {
        assert_eq!(
            expand_vars("%SystemRoot%;%ProgramFiles%", &env()),
            r"C:\Windows;C:\Program Files (x86)"
        );
    }

    #[test]
    fn test_lookup_dirs_drop_empty_entries() {
        let joined = std::env::join_paths(["/usr/bin", "", "/opt/tools"]).unwrap();
        assert_eq!(lookup_dirs_from(&joined), vec!["/usr/bin", "/opt/tools"]);
    }
}
