// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Seams between the pipeline and the outside world:
//
//   CorpusSource   → CsvCorpusLoader (data layer)
//   OcrEngine      → Tesseract       (infra layer)
//   PageRasterizer → Poppler         (infra layer)
//
// Tests substitute in-memory fakes for the OCR seams so no
// external binaries are needed.
//
// OcrEngine and PageRasterizer are Send + Sync so one extractor
// can be shared by several worker threads calling `route`.

use std::path::Path;

use crate::domain::document::LabeledDocument;
use crate::error::{OcrError, Result};

/// Anything that can supply a labeled training corpus.
pub trait CorpusSource {
    fn load_all(&self) -> Result<Vec<LabeledDocument>>;
}

/// Optical character recognition over an encoded image.
pub trait OcrEngine: Send + Sync {
    /// Recognize text in `image` (any format the engine can decode;
    /// the extractor always passes PNG). Blank input may yield "".
    fn recognize(&self, image: &[u8]) -> std::result::Result<String, OcrError>;
}

/// Turns a paged document into one encoded image per page.
pub trait PageRasterizer: Send + Sync {
    fn page_count(&self, path: &Path) -> std::result::Result<usize, OcrError>;

    /// Render a single page (1-based) and return its encoded image.
    fn render_page(&self, path: &Path, page: usize) -> std::result::Result<Vec<u8>, OcrError>;
}
