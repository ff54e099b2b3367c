//! Reading and writing translation documents as UTF-8 JSON.
//!
//! Output uses a four-space indent, keeps key order as held in memory and
//! writes non-ASCII characters literally.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use locale_sync_tree::{Document, NotAnObject};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use thiserror::Error;

const INDENT: &[u8] = b"    ";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unexpected document shape in {}", path.display())]
    NotAnObject {
        path: PathBuf,
        #[source]
        source: NotAnObject,
    },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Io { path, .. }
            | LoadError::Parse { path, .. }
            | LoadError::NotAnObject { path, .. } => path,
        }
    }

    /// `true` when the file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to encode {}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WriteError {
    pub fn path(&self) -> &Path {
        match self {
            WriteError::Encode { path, .. } | WriteError::Io { path, .. } => path,
        }
    }
}

/// Load a document from `path`.
pub fn load(path: &Path) -> Result<Document, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_str(&text, path)
}

/// Parse a document from text; `origin` is only used for error reporting.
pub fn from_str(text: &str, origin: &Path) -> Result<Document, LoadError> {
    let value: Value = serde_json::from_str(text).map_err(|source| LoadError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;
    Document::try_from(value).map_err(|source| LoadError::NotAnObject {
        path: origin.to_path_buf(),
        source,
    })
}

/// Serialize a document the way [`save`] writes it.
pub fn to_string(doc: &Document) -> Result<String, serde_json::Error> {
    let value = Value::from(doc);
    let mut buf = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;
    // serde_json only ever emits UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `doc` to `path`, replacing any existing file.
///
/// The text is written to a sibling temporary file first and renamed over
/// the destination, so readers never observe a half-written document. A
/// symlinked destination is written through, and the replaced file's
/// permissions carry over. The temporary file never outlives a failed save.
pub fn save(path: &Path, doc: &Document) -> Result<(), WriteError> {
    let text = to_string(doc).map_err(|source| WriteError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    let dest = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let tmp = tmp_path(&dest);
    if let Err(source) = replace_with(&tmp, &dest, text.as_bytes()) {
        let _ = fs::remove_file(&tmp);
        return Err(WriteError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn replace_with(tmp: &Path, dest: &Path, bytes: &[u8]) -> io::Result<()> {
    fs::write(tmp, bytes)?;
    if let Ok(meta) = fs::metadata(dest) {
        fs::set_permissions(tmp, meta.permissions())?;
    }
    fs::rename(tmp, dest)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
