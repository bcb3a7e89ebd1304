// ============================================================
// Layer 2 — ExtractUseCase
// ============================================================
// Text of a single file, without classifying or moving it.
// Useful to check what the OCR engine sees before training.

use anyhow::{Context, Result};

use crate::data::extractor::Extractor;
use crate::domain::branch::ExtensionTable;
use crate::domain::document::Document;
use crate::error::PipelineError;

pub struct ExtractUseCase {
    extensions: ExtensionTable,
    extractor:  Extractor,
}

impl ExtractUseCase {
    pub fn new(extensions: ExtensionTable, extractor: Extractor) -> Self {
        Self { extensions, extractor }
    }

    pub fn execute(&self, document: &Document) -> Result<String> {
        let extension = document.extension().unwrap_or_default();
        let branch = self.extensions.lookup(extension).ok_or_else(|| {
            PipelineError::UnsupportedFileType {
                path:      document.path().to_path_buf(),
                extension: extension.to_string(),
            }
        })?;

        self.extractor
            .extract(document, branch)
            .with_context(|| format!("cannot extract '{}'", document.path().display()))
    }
}
