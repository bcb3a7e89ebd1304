// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the outside world on behalf of the
// other layers:
//
//   config.rs        — PipelineConfig (JSON file + defaults) and the
//                      factories that turn it into runtime pieces
//
//   routing_table.rs — destination directory per file family
//
//   ocr.rs           — tesseract / pdftoppm / pdfinfo processes,
//                      each bounded by a timeout
//
//   model_store.rs   — versioned JSON artifact of the fitted model
//
//   metrics.rs       — one CSV row per training run
//
// The domain traits (OcrEngine, PageRasterizer) are implemented here;
// tests substitute in-memory fakes.

/// Deployment configuration
pub mod config;

/// Family → directory mapping
pub mod routing_table;

/// External OCR processes
pub mod ocr;

/// Fitted model persistence
pub mod model_store;

/// Training run log
pub mod metrics;
