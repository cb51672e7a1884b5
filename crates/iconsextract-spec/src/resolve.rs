//! Path classification and Windows path helpers.
//!
//! Icon locations are Windows paths handed verbatim to external tools, so
//! they are handled as strings with Windows rules regardless of the host.

use serde::Serialize;

/// How an icon location is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedPath {
    /// The path is an `.ico` file that is copied as-is.
    DirectIcoFile,
    /// The path is an executable or library whose resources must be extracted.
    ContainerResource,
}

impl ResolvedPath {
    /// Classifies an expanded icon path.
    pub fn classify(path: &str) -> Self {
        if path.to_ascii_lowercase().ends_with(".ico") {
            ResolvedPath::DirectIcoFile
        } else {
            ResolvedPath::ContainerResource
        }
    }
}

fn is_separator(c: char) -> bool {
    c == '\\' || c == '/'
}

/// Returns true when `path` starts at a root once any drive letter is removed.
///
/// `C:\x`, `\x` and `\\server\share` are rooted; `x.dll` and `C:x.dll` are not.
pub fn is_rooted(path: &str) -> bool {
    strip_drive(path).starts_with(is_separator)
}

/// Removes a leading `X:` drive designator.
fn strip_drive(path: &str) -> &str {
    let mut chars = path.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic() => chars.as_str(),
        _ => path,
    }
}

/// Returns the final component of a Windows path, without any drive.
pub fn base_name(path: &str) -> &str {
    let path = strip_drive(path);
    path.rsplit(is_separator).next().unwrap_or(path)
}

/// Joins a lookup directory and a relative path with a Windows separator.
pub fn join_lookup(dir: &str, path: &str) -> String {
    if dir.is_empty() {
        path.to_string()
    } else if dir.ends_with(is_separator) || dir.ends_with(':') {
        format!("{}{}", dir, path)
    } else {
        format!("{}\\{}", dir, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_ico_ignores_case() {
        assert_eq!(
            ResolvedPath::classify(r"C:\Python27\DLLs\py.ico"),
            ResolvedPath::DirectIcoFile
        );
        assert_eq!(ResolvedPath::classify(r"C:\x\Y.ICO"), ResolvedPath::DirectIcoFile);
        assert_eq!(ResolvedPath::classify("y.Ico"), ResolvedPath::DirectIcoFile);
    }

    #[test]
    fn test_classify_container() {
        assert_eq!(
            ResolvedPath::classify(r"C:\Windows\System32\shell32.dll"),
            ResolvedPath::ContainerResource
        );
        assert_eq!(ResolvedPath::classify("icons.ico.exe"), ResolvedPath::ContainerResource);
    }

    #[test]
    fn test_is_rooted() {
        assert!(is_rooted(r"C:\Windows\System32\icardres.dll"));
        assert!(is_rooted(r"\Windows\notepad.exe"));
        assert!(is_rooted(r"\\server\share\app.exe"));
        assert!(is_rooted("c:/tools/app.exe"));
        assert!(!is_rooted("imageres.dll"));
        assert!(!is_rooted(r"C:relative.dll"));
        assert!(!is_rooted(r"sub\lib.dll"));
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name(r"C:\Windows\System32\shell32.dll"), "shell32.dll");
        assert_eq!(base_name("c:/tools/app.exe"), "app.exe");
        assert_eq!(base_name("cryptui.dll"), "cryptui.dll");
        assert_eq!(base_name(r"C:\dir\"), "");
        assert_eq!(base_name("C:foo.dll"), "foo.dll");
        assert_eq!(base_name("C:"), "");
    }

    #[test]
    fn test_join_lookup() {
        assert_eq!(
            join_lookup(r"C:\Windows\system32", "imageres.dll"),
            r"C:\Windows\system32\imageres.dll"
        );
        assert_eq!(join_lookup(r"C:\Tools\", "a.dll"), r"C:\Tools\a.dll");
        assert_eq!(join_lookup("", "a.dll"), "a.dll");
    }
}
