// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types that define what the pipeline works with:
// documents, the closed category sets, processing branches,
// and classification results.
//
// Rules for this layer:
//   - NO image decoding, OCR processes or file moves
//   - NO model math
//   - Only structs, enums, traits and their invariants

/// A document identified by its path
pub mod document;

/// Closed category enumerations (statistical + extension families)
pub mod category;

/// Extension families and the extension → branch table
pub mod branch;

/// The per-document outcome reported to callers
pub mod result;

/// Seams implemented by the infra and data layers
pub mod traits;
