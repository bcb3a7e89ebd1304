// ============================================================
// Layer 2 — Router
// ============================================================
// Per-document decision:
//
//   1. lower-case the extension
//   2. Branch::Ocr(_)          extract → vectorize → classify
//                              (file stays where it is)
//   3. Branch::Dispatch(fam)   move into RoutingTable[fam], confidence 1.0
//   4. no branch               UnsupportedFileType, nothing moves
//
// The router holds only read-only state: extension table, routing
// table, extractor and an optional Arc<FittedModel>. `route` takes
// `&self`, so one Router can serve several worker threads. Swapping
// in a retrained model needs `&mut self` and therefore cannot race
// with inference.
//
// Destination collisions are not de-duplicated: routing two files
// with the same basename into one family leaves the second one.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::data::extractor::Extractor;
use crate::domain::branch::{normalize_extension, Branch, ExtensionTable, OcrInput};
use crate::domain::category::{Category, FileFamily};
use crate::domain::document::Document;
use crate::domain::result::{preview, ClassificationResult};
use crate::error::{PipelineError, Result};
use crate::infra::routing_table::RoutingTable;
use crate::ml::model::FittedModel;

pub struct Router {
    /// Extension → branch lookup.
    extensions:    ExtensionTable,
    /// Destination directory per file family.
    routes:        RoutingTable,
    /// Text source for the OCR branch.
    extractor:     Extractor,
    /// Absent until a model is trained or loaded; only the OCR branch needs it.
    model:         Option<Arc<FittedModel>>,
    /// Characters of extracted text kept in a result.
    preview_chars: usize,
}

impl Router {
    pub fn new(
        extensions:    ExtensionTable,
        routes:        RoutingTable,
        extractor:     Extractor,
        preview_chars: usize,
    ) -> Self {
        Self {
            extensions,
            routes,
            extractor,
            model: None,
            preview_chars,
        }
    }

    pub fn with_model(mut self, model: Arc<FittedModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Install a retrained model; the previous one is dropped whole.
    pub fn replace_model(&mut self, model: Arc<FittedModel>) {
        self.model = Some(model);
    }

    pub fn model(&self) -> Option<&Arc<FittedModel>> {
        self.model.as_ref()
    }

    pub fn routes(&self) -> &RoutingTable {
        &self.routes
    }

    /// Classify or dispatch one document.
    pub fn route(&self, document: &Document) -> Result<ClassificationResult> {
        let path = document.path();
        let extension = document.extension().map(normalize_extension).unwrap_or_default();

        let branch = self.extensions.lookup(&extension).ok_or_else(|| {
            PipelineError::UnsupportedFileType {
                path: path.to_path_buf(),
                extension: extension.clone(),
            }
        })?;
        tracing::debug!(path = %path.display(), ?branch, "branch selected");

        match branch {
            Branch::Ocr(input) => self.classify(document, input),
            Branch::Dispatch(family) => self.dispatch(document, family),
        }
    }

    fn classify(&self, document: &Document, input: OcrInput) -> Result<ClassificationResult> {
        // checked before extraction so a missing model fails without running OCR
        let model = self
            .model
            .as_deref()
            .ok_or(PipelineError::NotFitted { component: "classifier" })?;

        let text = self.extractor.extract_ocr(document, input)?;
        let prediction = model.classify(&text)?;

        tracing::info!(
            path = %document.path().display(),
            category = %prediction.class,
            confidence = prediction.confidence,
            "document classified"
        );

        Ok(ClassificationResult {
            path:        document.path().to_path_buf(),
            category:    Category::Classified(prediction.class),
            confidence:  prediction.confidence,
            text:        preview(&text, self.preview_chars),
            destination: None,
        })
    }

    fn dispatch(&self, document: &Document, family: FileFamily) -> Result<ClassificationResult> {
        let from = document.path();
        let dir = self.routes.destination(family);
        let file_name = document.file_name().ok_or_else(|| PipelineError::Relocation {
            from:   from.to_path_buf(),
            to:     dir.to_path_buf(),
            reason: "path has no file name".into(),
        })?;
        let to = dir.join(file_name);

        relocate(from, &to)?;

        tracing::info!(
            from = %from.display(),
            to = %to.display(),
            %family,
            "file dispatched by extension"
        );

        let note = format!("File moved to {}", dir.display());
        Ok(ClassificationResult::dispatched(from, family, to, note))
    }
}

/// Move `from` to `to`, overwriting an existing `to`, then check the
/// result on disk rather than trusting the return code.
fn relocate(from: &Path, to: &Path) -> Result<()> {
    let fail = |reason: String| PipelineError::Relocation {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        reason,
    };

    if !from.is_file() {
        return Err(fail("source file does not exist".into()));
    }
    if let Some(dir) = to.parent() {
        fs::create_dir_all(dir).map_err(|e| fail(format!("cannot create destination: {e}")))?;
    }
    if same_file(from, to) {
        tracing::debug!(path = %from.display(), "already in its destination");
        return Ok(());
    }

    if let Err(rename_err) = fs::rename(from, to) {
        // rename cannot cross filesystems; fall back to copy + remove
        tracing::debug!(error = %rename_err, "rename failed, copying instead");
        fs::copy(from, to).map_err(|e| fail(format!("{rename_err}; copy failed: {e}")))?;
        fs::remove_file(from).map_err(|e| fail(format!("copied but source not removed: {e}")))?;
    }

    if from.exists() || !to.is_file() {
        return Err(fail("post-condition failed: source still present or destination missing".into()));
    }
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
