//! # Loading and Saving
//!
//! The only fallible part of the library. Documents are read from a file, from
//! JSON text, or from an already-parsed [`serde_json::Value`], and written back
//! as 2-space indented UTF-8 JSON.
//!
//! ## Atomic Saves
//! [`save`] writes to a temporary file in the destination directory and renames
//! it over the destination, so a failed save leaves the previous file intact.
//! An overwritten file keeps its permissions; a new file gets the same
//! permissions `fs::write` would give it.
//!
//! ## Example
//! ```rust,no_run
//! use jmon::{load, save, JmonSource};
//!
//! let mut doc = load(JmonSource::path("song.jmon"))?;
//! doc.set_tempo(140.0);
//! save(&doc, "song.jmon")?;
//! # Ok::<(), jmon::JmonError>(())
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::Value;
use tempfile::{Builder, NamedTempFile};

use crate::document::JmonDocument;
use crate::error::JmonError;

/// Where to read a document from.
#[derive(Debug, Clone, PartialEq)]
pub enum JmonSource {
    /// A file containing JSON text.
    Path(PathBuf),
    /// JSON text.
    Text(String),
    /// An already-parsed value.
    Value(Value),
}

impl JmonSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        JmonSource::Path(path.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        JmonSource::Text(text.into())
    }
}

impl From<&Path> for JmonSource {
    fn from(path: &Path) -> Self {
        JmonSource::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for JmonSource {
    fn from(path: PathBuf) -> Self {
        JmonSource::Path(path)
    }
}

impl From<Value> for JmonSource {
    fn from(value: Value) -> Self {
        JmonSource::Value(value)
    }
}

/// Load a document from any [`JmonSource`].
///
/// Fields absent from the input stay absent; defaults are applied only by
/// `summarize` and the accessors on [`JmonDocument`].
///
/// # Errors
/// - [`JmonError::NotFoundError`] - the path does not exist or is a directory
/// - [`JmonError::IoError`] - the file exists but cannot be read
/// - [`JmonError::ParseError`] - the text is not valid JSON
/// - [`JmonError::SchemaError`] - the JSON is not an object
pub fn load(source: impl Into<JmonSource>) -> Result<JmonDocument, JmonError> {
    match source.into() {
        JmonSource::Path(path) => load_file(path),
        JmonSource::Text(text) => load_str(&text),
        JmonSource::Value(value) => load_value(value),
    }
}

/// Read and parse a JMON file.
pub fn load_file(path: impl AsRef<Path>) -> Result<JmonDocument, JmonError> {
    let path = path.as_ref();
    if path.is_dir() {
        return Err(JmonError::NotFoundError {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => JmonError::NotFoundError {
            path: path.to_path_buf(),
        },
        _ => JmonError::io(path, e),
    })?;
    debug!("Read {} bytes from {}", text.len(), path.display());

    let value: Value =
        serde_json::from_str(&text).map_err(|e| JmonError::parse(path.display().to_string(), e))?;
    load_value(value)
}

/// Parse JSON text into a document.
pub fn load_str(text: &str) -> Result<JmonDocument, JmonError> {
    let value: Value = serde_json::from_str(text).map_err(|e| JmonError::parse("<text>", e))?;
    load_value(value)
}

/// Convert an already-parsed value into a document.
///
/// Only the top level is checked: it must be a JSON object.
pub fn load_value(value: Value) -> Result<JmonDocument, JmonError> {
    if !value.is_object() {
        return Err(JmonError::SchemaError(format!(
            "expected a JSON object at the top level, found {}",
            json_kind(&value)
        )));
    }

    let doc: JmonDocument =
        serde_json::from_value(value).map_err(|e| JmonError::SchemaError(e.to_string()))?;
    debug!(
        "Loaded document {:?} with {} track(s)",
        doc.name(),
        doc.tracks().count()
    );
    Ok(doc)
}

/// Serialize a document as 2-space indented JSON.
pub fn to_json_string(doc: &JmonDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}

/// Write a document to `path`, creating or replacing the file.
///
/// # Errors
/// [`JmonError::IoError`] when the directory is missing or not writable, or the
/// write itself fails. The destination is untouched in that case.
pub fn save(doc: &JmonDocument, path: impl AsRef<Path>) -> Result<(), JmonError> {
    let path = path.as_ref();
    let text = to_json_string(doc).map_err(|e| JmonError::io(path, e.into()))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = temp_file_in(dir).map_err(|e| JmonError::io(path, e))?;
    if let Ok(existing) = fs::metadata(path) {
        if existing.is_file() {
            tmp.as_file()
                .set_permissions(existing.permissions())
                .map_err(|e| JmonError::io(path, e))?;
        }
    }
    tmp.write_all(text.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| JmonError::io(path, e))?;
    tmp.persist(path).map_err(|e| JmonError::io(path, e.error))?;

    debug!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}

/// Temp file that is created with the process umask applied, like a plain
/// `File::create`, instead of owner-only.
#[cfg(unix)]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    Builder::new()
        .prefix(".jmon")
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    Builder::new().prefix(".jmon").tempfile_in(dir)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
