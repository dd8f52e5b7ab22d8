//! # Host Interface
//!
//! A renderer (notebook widget, DAW front-end) needs two things from the
//! model: the current document, and a way to hand back an edited one. That
//! pair is the [`DocumentHost`] trait. How edits travel between the view and
//! the host is up to the implementor.
//!
//! [`WidgetState`] is the in-memory host: it owns one document plus the
//! [`WidgetConfig`] the renderer is created with.
//!
//! ## Example
//! ```rust
//! use jmon::{sample, DocumentHost, SampleKind, WidgetConfig, WidgetState};
//!
//! let mut widget = WidgetState::new(WidgetConfig::default());
//! widget.replace_document(sample(SampleKind::Full));
//!
//! let info = widget.project_info();
//! assert_eq!(info.track_count, 3);
//!
//! widget.set_language("fr")?;
//! assert_eq!(widget.config().language.code(), "fr");
//! # Ok::<(), jmon::JmonError>(())
//! ```

use std::path::Path;

use log::debug;

use crate::config::WidgetConfig;
use crate::document::JmonDocument;
use crate::error::JmonError;
use crate::io::{load, save, JmonSource};
use crate::sample::{sample, SampleKind};
use crate::summary::{summarize, ProjectInfo};
use crate::validate::{validate, ValidationResult};

/// Get / replace access to the document a renderer displays.
pub trait DocumentHost {
    fn document(&self) -> &JmonDocument;

    fn replace_document(&mut self, doc: JmonDocument);

    fn project_info(&self) -> ProjectInfo {
        summarize(self.document())
    }

    fn validation(&self) -> ValidationResult {
        validate(self.document())
    }
}

/// A document together with its display settings.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetState {
    config: WidgetConfig,
    document: JmonDocument,
}

impl WidgetState {
    /// Start with an empty project.
    pub fn new(config: WidgetConfig) -> Self {
        Self::with_document(config, sample(SampleKind::Minimal))
    }

    pub fn with_document(config: WidgetConfig, document: JmonDocument) -> Self {
        WidgetState { config, document }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn document_mut(&mut self) -> &mut JmonDocument {
        &mut self.document
    }

    /// Load a document and make it current. On error the current document is kept.
    pub fn load_jmon(&mut self, source: impl Into<JmonSource>) -> Result<(), JmonError> {
        let doc = load(source)?;
        self.replace_document(doc);
        Ok(())
    }

    pub fn save_jmon(&self, path: impl AsRef<Path>) -> Result<(), JmonError> {
        save(&self.document, path)
    }

    /// Switch the interface language. Accepts `en`, `fr` and `es`.
    pub fn set_language(&mut self, code: &str) -> Result<(), JmonError> {
        self.config.language = code.parse()?;
        Ok(())
    }
}

impl Default for WidgetState {
    fn default() -> Self {
        Self::new(WidgetConfig::default())
    }
}

impl DocumentHost for WidgetState {
    fn document(&self) -> &JmonDocument {
        &self.document
    }

    fn replace_document(&mut self, doc: JmonDocument) {
        debug!(
            "Replacing document {:?} with {:?}",
            self.document.name(),
            doc.name()
        );
        self.document = doc;
    }
}
