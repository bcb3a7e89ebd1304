// ============================================================
// Layer 3 — Document Domain Types
// ============================================================
// A Document is only a path plus its detected extension.
// The byte payload is read by the extractor while processing
// and never kept on the struct.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::category::DocumentClass;

/// A file submitted to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path:      PathBuf,
    extension: Option<String>,
}

impl Document {
    /// The extension is detected once, lower-cased, without the dot.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let extension = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase);
        Self { path, extension }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lower-case extension without the leading dot, if the path has one.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub fn file_name(&self) -> Option<&OsStr> {
        self.path.file_name()
    }
}

/// One row of a labeled training corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledDocument {
    pub text:     String,
    pub category: DocumentClass,
}

impl LabeledDocument {
    pub fn new(text: impl Into<String>, category: DocumentClass) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}
