// ============================================================
// Layer 4 — Extractor
// ============================================================
// Turns a document into raw text, according to its branch:
//
//   Ocr(Raster)       image → preprocess → OCR
//   Ocr(Paged)        pdf → rasterize page i → OCR → concatenate
//   Dispatch(Word)    .docx → docx-rs paragraphs
//   Dispatch(other)   "" (media and binary office formats)
//
// No retries and no disk writes of its own: rasters live in memory
// or in the rasterizer's temporary directory. Any failure becomes
// PipelineError::Extraction with the document path and stage.

use std::path::Path;
use std::sync::Arc;

use crate::data::docx::docx_text;
use crate::data::imaging::{self, PreparedImage};
use crate::data::preprocessor::TextNormalizer;
use crate::domain::branch::{Branch, OcrInput};
use crate::domain::category::FileFamily;
use crate::domain::document::Document;
use crate::domain::traits::{OcrEngine, PageRasterizer};
use crate::error::{PipelineError, Result};

/// Knobs for the image preprocessing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preprocessing {
    /// Downscale wider images to this width before thresholding.
    pub resize_width: Option<u32>,
}

impl Default for Preprocessing {
    fn default() -> Self {
        Self { resize_width: Some(1200) }
    }
}

pub struct Extractor {
    ocr:           Arc<dyn OcrEngine>,
    rasterizer:    Arc<dyn PageRasterizer>,
    preprocessing: Preprocessing,
    normalizer:    TextNormalizer,
}

impl Extractor {
    pub fn new(
        ocr:           Arc<dyn OcrEngine>,
        rasterizer:    Arc<dyn PageRasterizer>,
        preprocessing: Preprocessing,
    ) -> Self {
        Self {
            ocr,
            rasterizer,
            preprocessing,
            normalizer: TextNormalizer::new(),
        }
    }

    /// Extract text for `document` following `branch`.
    pub fn extract(&self, document: &Document, branch: Branch) -> Result<String> {
        match branch {
            Branch::Ocr(input) => self.extract_ocr(document, input),
            Branch::Dispatch(FileFamily::Word) if document.extension() == Some("docx") => {
                docx_text(document.path())
            }
            Branch::Dispatch(family) => {
                tracing::debug!(
                    path = %document.path().display(),
                    %family,
                    "no text layer extracted for this family"
                );
                Ok(String::new())
            }
        }
    }

    /// OCR path shared by `extract` and the router.
    pub fn extract_ocr(&self, document: &Document, input: OcrInput) -> Result<String> {
        let raw = match input {
            OcrInput::Raster => self.ocr_image(document.path())?,
            OcrInput::Paged => self.ocr_pages(document.path())?,
        };
        Ok(self.normalizer.clean(&raw))
    }

    fn ocr_image(&self, path: &Path) -> Result<String> {
        let image = image::open(path).map_err(|e| PipelineError::extraction(path, "decode", e))?;

        match imaging::prepare_for_ocr(image, self.preprocessing.resize_width) {
            PreparedImage::Blank => {
                tracing::debug!(path = %path.display(), "blank image, skipping OCR");
                Ok(String::new())
            }
            PreparedImage::Binarized { image, threshold } => {
                tracing::debug!(path = %path.display(), threshold, "binarized with Otsu threshold");
                let png = imaging::encode_png(&image)
                    .map_err(|e| PipelineError::extraction(path, "preprocess", e))?;
                self.ocr
                    .recognize(&png)
                    .map_err(|e| PipelineError::extraction(path, "ocr", e))
            }
        }
    }

    fn ocr_pages(&self, path: &Path) -> Result<String> {
        if !path.is_file() {
            return Err(PipelineError::extraction(path, "open", "file does not exist or is not readable"));
        }

        let pages = self
            .rasterizer
            .page_count(path)
            .map_err(|e| PipelineError::extraction(path, "rasterize", e))?;
        tracing::debug!(path = %path.display(), pages, "rasterizing paged document");

        let mut text = String::new();
        for page in 1..=pages {
            let raster = self
                .rasterizer
                .render_page(path, page)
                .map_err(|e| PipelineError::extraction(path, "rasterize", e))?;
            let page_text = self
                .ocr
                .recognize(&raster)
                .map_err(|e| PipelineError::extraction(path, "ocr", e))?;
            tracing::debug!(page, chars = page_text.len(), "page recognized");
            text.push_str(&page_text);
        }
        Ok(text)
    }
}
