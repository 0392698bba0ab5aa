//! Plain-text persistence for [`TokenTable`].
//!
//! One entry per line, `<id> <count> <key>`, in table order. Keys are written
//! verbatim, so a key may contain spaces but not a newline.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{info, warn};
use tempfile::Builder;
use thiserror::Error;

use super::entry::TokenEntry;
use super::table::TokenTable;
use crate::types::identifiers::{TableVersion, TokenId};

#[derive(Debug, Error)]
pub enum TableFileError {
    #[error("I/O error for {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Failure of the reader passed to [`TokenTable::read_from`]. Path-based
    /// loads report [`TableFileError::Io`] instead.
    #[error("I/O error while reading token table: {0}")]
    Reader(#[source] io::Error),
    #[error("Malformed token table line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("Token table version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        expected: TableVersion,
        found: TableVersion,
    },
}

impl TableFileError {
    /// Kind of the underlying I/O failure, if this is one.
    pub fn kind(&self) -> Option<io::ErrorKind> {
        match self {
            TableFileError::Io { source, .. } | TableFileError::Reader(source) => {
                Some(source.kind())
            }
            TableFileError::Parse { .. } | TableFileError::VersionMismatch { .. } => None,
        }
    }

    fn at_path(self, path: &Path) -> Self {
        match self {
            TableFileError::Reader(source) => TableFileError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        }
    }
}

impl TokenTable {
    /// Load a table from `path` into a fresh, frozen table.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TableFileError> {
        let mut table = TokenTable::new();
        table.load(path)?;
        Ok(table)
    }

    /// Write the table to `path`, replacing any existing file.
    ///
    /// The content goes to a temporary file next to `path` first and is
    /// renamed into place, so a failed save leaves the old file intact. A
    /// replaced file keeps its permissions; a new one gets the same mode a
    /// plain `File::create` would.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TableFileError> {
        let path = path.as_ref();
        let io_error = |source: io::Error| TableFileError::Io {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut builder = Builder::new();
        builder.prefix(".tokens");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // Masked by the process umask at creation, like File::create.
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let mut tmp = builder.tempfile_in(dir).map_err(io_error)?;
        if let Ok(existing) = fs::metadata(path) {
            tmp.as_file()
                .set_permissions(existing.permissions())
                .map_err(io_error)?;
        }
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            self.write_to(&mut writer).map_err(io_error)?;
            writer.flush().map_err(io_error)?;
        }
        tmp.as_file().sync_all().map_err(io_error)?;
        tmp.persist(path).map_err(|e| io_error(e.error))?;

        info!("saved {} tokens to {}", self.len(), path.display());
        Ok(())
    }

    /// Replace the table's content with the entries stored at `path`.
    ///
    /// The table is frozen afterwards, whatever its previous state. On any
    /// error the table is left unchanged. Returns the number of entries read.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<usize, TableFileError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TableFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let loaded = self
            .read_from(BufReader::new(file))
            .map_err(|e| e.at_path(path))?;

        info!("loaded {} tokens from {}", loaded, path.display());
        Ok(loaded)
    }

    /// Like [`load`](Self::load), but only accept a file whose content
    /// hashes to `expected`, the [`version`](Self::version) of the table a
    /// model was trained with. On a mismatch the table is left unchanged.
    pub fn load_verified(
        &mut self,
        path: impl AsRef<Path>,
        expected: &TableVersion,
    ) -> Result<usize, TableFileError> {
        let mut staged = self.empty_like();
        let loaded = staged.load(path)?;

        let found = staged.version();
        if &found != expected {
            return Err(TableFileError::VersionMismatch {
                expected: expected.clone(),
                found,
            });
        }

        *self = staged;
        Ok(loaded)
    }

    /// Write every entry in table order.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for (key, entry) in &self.entries {
            writer.write_all(format_line(key, entry).as_bytes())?;
        }
        Ok(())
    }

    /// Replace the table's content with the entries read from `reader`.
    ///
    /// Same semantics as [`load`](Self::load).
    pub fn read_from<R: BufRead>(&mut self, reader: R) -> Result<usize, TableFileError> {
        let mut entries = IndexMap::new();
        let mut max_id: Option<TokenId> = None;

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(TableFileError::Reader)?;
            let line_no = index + 1;
            let parsed = parse_line(&line).map_err(|reason| TableFileError::Parse {
                line: line_no,
                reason,
            })?;
            let Some((key, entry)) = parsed else {
                continue;
            };

            max_id = max_id.max(Some(entry.id));
            if entries.insert(key.to_string(), entry).is_some() {
                warn!("duplicate token {key:?} on line {line_no}, keeping the later entry");
            }
        }

        self.entries = entries;
        // Loaded ids stay reserved should the table be thawed later. A loaded
        // u32::MAX leaves no id to hand out.
        if let Some(max_id) = max_id {
            self.next_id = match (self.next_id, max_id.checked_next()) {
                (Some(current), Some(reserved)) => Some(current.max(reserved)),
                _ => None,
            };
        }
        self.freeze();
        Ok(self.entries.len())
    }
}

pub(crate) fn format_line(key: &str, entry: &TokenEntry) -> String {
    format!("{} {} {}\n", entry.id, entry.count, key)
}

/// Parse one line; `Ok(None)` for a blank line.
fn parse_line(line: &str) -> Result<Option<(&str, TokenEntry)>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (id, rest) = split_field(line);
    let (count, key) = split_field(rest);
    if count.is_empty() {
        return Err("missing count".to_string());
    }
    if key.is_empty() {
        return Err("missing token".to_string());
    }

    let id = id
        .parse::<TokenId>()
        .map_err(|e| format!("invalid id {id:?}: {e}"))?;
    let count = count
        .parse::<u64>()
        .map_err(|e| format!("invalid count {count:?}: {e}"))?;

    Ok(Some((key, TokenEntry { id, count })))
}

/// Split off the first field at the first whitespace run.
fn split_field(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(at) => (&s[..at], s[at..].trim_start()),
        None => (s, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, count: u64) -> TokenEntry {
        TokenEntry {
            id: TokenId::new(id),
            count,
        }
    }

    #[test]
    fn parses_well_formed_line() {
        assert_eq!(parse_line("3 7 fox"), Ok(Some(("fox", entry(3, 7)))));
    }

    #[test]
    fn key_keeps_inner_whitespace() {
        assert_eq!(
            parse_line("12  4\tnew  york \r"),
            Ok(Some(("new  york", entry(12, 4))))
        );
    }

    #[test]
    fn blank_line_is_skipped() {
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line(""), Ok(None));
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert_eq!(parse_line("1"), Err("missing count".to_string()));
        assert_eq!(parse_line("1 2"), Err("missing token".to_string()));
    }

    #[test]
    fn non_numeric_fields_are_rejected() {
        assert!(parse_line("x 2 fox").unwrap_err().starts_with("invalid id"));
        assert!(parse_line("1 two fox").unwrap_err().starts_with("invalid count"));
        assert!(parse_line("-1 2 fox").unwrap_err().starts_with("invalid id"));
    }

    #[test]
    fn format_matches_parse() {
        let line = format_line("new york", &entry(5, 9));
        assert_eq!(line, "5 9 new york\n");
        assert_eq!(parse_line(&line), Ok(Some(("new york", entry(5, 9)))));
    }

    #[test]
    fn split_field_without_whitespace() {
        assert_eq!(split_field("abc"), ("abc", ""));
        assert_eq!(split_field("a  b c"), ("a", "b c"));
    }
}
