// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between a file on disk and plain text:
//
//   scanned image / pdf            labeled CSV corpus
//         │                               │
//         ▼                               ▼
//   imaging (Otsu)                  CsvCorpusLoader
//         │                               │
//         ▼                               ▼
//   Extractor → OCR engine         stratified_split (80/20)
//         │
//         ▼
//   TextNormalizer
//
// Each module handles one step so it can be tested alone.

/// Reads `text,category` CSV corpora
pub mod loader;

/// Stratified, seeded train/holdout split
pub mod splitter;

/// Cleans OCR output
pub mod preprocessor;

/// Grayscale, Otsu thresholding, binarization
pub mod imaging;

/// .docx paragraph text via docx-rs
pub mod docx;

/// Document → text, per processing branch
pub mod extractor;
