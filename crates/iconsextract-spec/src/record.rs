//! Registry dump decoding.
//!
//! The file-type enumerator writes a UTF-16, tab-separated table. Column 0
//! holds the file type name (extensions start with `.`) and column 10 holds the
//! `DefaultIcon` location.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{SpecError, SpecResult};

/// Column holding the file type name.
pub const EXTENSION_COLUMN: usize = 0;

/// Column holding the raw icon location.
pub const ICON_COLUMN: usize = 10;

/// One extension row of the registry dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconRecord {
    /// Extension without the leading dot, as written in the registry.
    pub extension: String,
    /// Icon location with quote markers removed.
    pub raw_spec: String,
}

impl IconRecord {
    /// Creates a record, stripping quote markers from `raw_spec`.
    pub fn new(extension: impl Into<String>, raw_spec: &str) -> Self {
        Self {
            extension: extension.into(),
            raw_spec: strip_quotes(raw_spec),
        }
    }

    /// Parses one dump row, returning `None` for non-extension rows.
    pub fn from_row(row: &str) -> Option<Self> {
        let columns: Vec<&str> = row.split('\t').collect();
        let extension = columns.get(EXTENSION_COLUMN)?.strip_prefix('.')?;
        let raw_spec = columns.get(ICON_COLUMN)?;
        Some(Self::new(extension, raw_spec))
    }

    /// Name of the output icon for this extension.
    ///
    /// Extensions are case-insensitive, so the name is always lowercase.
    pub fn output_file_name(&self) -> String {
        format!("{}.ico", self.extension.to_lowercase())
    }
}

/// Removes literal `"` characters and `&quot;` entities.
fn strip_quotes(raw: &str) -> String {
    raw.replace('"', "").replace("&quot;", "")
}

/// Parses decoded dump text into extension records.
pub fn parse_registry_dump(text: &str) -> Vec<IconRecord> {
    let records: Vec<IconRecord> = text.lines().filter_map(IconRecord::from_row).collect();
    debug!(count = records.len(), "Parsed registry dump");
    records
}

/// Decodes UTF-16 bytes, honouring a byte-order mark.
///
/// Without a BOM the data is read as little-endian, which is what the
/// enumerator writes.
pub fn decode_utf16(bytes: &[u8]) -> SpecResult<String> {
    let (body, big_endian) = match bytes {
        [0xFF, 0xFE, rest @ ..] => (rest, false),
        [0xFE, 0xFF, rest @ ..] => (rest, true),
        _ => (bytes, false),
    };

    if body.len() % 2 != 0 {
        return Err(SpecError::TruncatedUtf16 { len: bytes.len() });
    }

    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| {
            if big_endian {
                u16::from_be_bytes([pair[0], pair[1]])
            } else {
                u16::from_le_bytes([pair[0], pair[1]])
            }
        })
        .collect();

    String::from_utf16(&units).map_err(|_| SpecError::InvalidUtf16)
}

/// Reads and parses a registry dump file.
pub fn read_registry_dump(path: &Path) -> SpecResult<Vec<IconRecord>> {
    let bytes = fs::read(path).map_err(|source| SpecError::ReadDump {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode_utf16(&bytes)?;
    Ok(parse_registry_dump(&text))
}
