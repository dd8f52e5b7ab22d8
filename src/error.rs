//! # Error Types
//!
//! This module defines all error types for the JMON library.
//!
//! Only the I/O boundary (`load`, `save`) and configuration parsing can fail.
//! Derived computations (`compute_duration`, `summarize`, `validate`) never
//! return errors: problems in the document are reported as data.
//!
//! ## Error Types
//! - `NotFoundError` - A path given to `load` does not exist
//! - `ParseError` - Text is not valid JSON, with line and column information
//! - `SchemaError` - Valid JSON that is not a JMON document (not an object)
//! - `IoError` - Any other filesystem failure, with the offending path
//! - `ConfigError` - Invalid widget configuration
//! - `LanguageError` - Unsupported interface language
//!
//! ## Usage
//! ```rust
//! use jmon::{load_str, JmonError};
//!
//! match load_str("[1, 2, 3]") {
//!     Ok(doc) => println!("Loaded {:?}", doc.name()),
//!     Err(JmonError::ParseError { line, column, message, .. }) => {
//!         eprintln!("Bad JSON at {}:{}: {}", line, column, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JmonError {
    /// The path passed to `load` does not resolve to an existing file.
    ///
    /// # Example
    /// ```
    /// # use jmon::JmonError;
    /// let err = JmonError::NotFoundError { path: "song.jmon".into() };
    /// assert_eq!(err.to_string(), "File not found: song.jmon");
    /// ```
    #[error("File not found: {}", path.display())]
    NotFoundError { path: PathBuf },

    /// Invalid JSON text.
    ///
    /// `origin` is the file path, or `<text>` for in-memory sources.
    ///
    /// # Example
    /// ```
    /// # use jmon::JmonError;
    /// let err = JmonError::ParseError {
    ///     origin: "<text>".to_string(),
    ///     line: 1,
    ///     column: 2,
    ///     message: "expected value".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Parse error in <text> at line 1, column 2: expected value");
    /// ```
    #[error("Parse error in {origin} at line {line}, column {column}: {message}")]
    ParseError {
        origin: String,
        line: usize,
        column: usize,
        message: String,
    },

    /// Parsed JSON that is not shaped like a document (an array or a scalar).
    #[error("Invalid document: {0}")]
    SchemaError(String),

    /// Read or write failure other than a missing input file.
    #[error("I/O error on {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid widget configuration.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Interface language outside the supported set.
    #[error("Unsupported language: {0}")]
    LanguageError(String),
}

impl JmonError {
    pub(crate) fn parse(origin: impl Into<String>, err: serde_json::Error) -> Self {
        JmonError::ParseError {
            origin: origin.into(),
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        JmonError::IoError {
            path: path.into(),
            source,
        }
    }
}
