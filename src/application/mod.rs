// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Coordinates the other layers to accomplish one goal each:
// routing a batch of files, training, evaluating, extracting.
//
// Rules for this layer:
//   - No model math here (Layer 5)
//   - No printing here (Layer 1)
//   - No process or file-format details (Layers 4 and 6)
//
// The Router lives here too: it is the per-document decision that
// every use case that touches incoming files goes through.

/// Per-document branch decision and dispatch
pub mod router;

/// Batch routing
pub mod route_use_case;

/// Training workflow
pub mod train_use_case;

/// Scoring a stored model
pub mod evaluate_use_case;

/// Text extraction only
pub mod extract_use_case;
