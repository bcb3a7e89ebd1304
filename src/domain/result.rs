// ============================================================
// Layer 3 — ClassificationResult
// ============================================================
// Exactly one result per processed document. Confidence 1.0 is
// reserved for extension dispatch; statistical predictions are
// always strictly below it.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::category::{Category, FileFamily};

/// Confidence reported for extension-based dispatch.
pub const DISPATCH_CONFIDENCE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    /// Source path as submitted (may no longer exist after dispatch).
    pub path:        PathBuf,
    pub category:    Category,
    /// Posterior probability of `category`, in `[0, 1]`.
    pub confidence:  f64,
    /// Extracted-text preview, or a relocation note for dispatched files.
    pub text:        String,
    /// Where the file now lives, for dispatched files.
    pub destination: Option<PathBuf>,
}

impl ClassificationResult {
    pub fn dispatched(path: &Path, family: FileFamily, destination: PathBuf, note: String) -> Self {
        Self {
            path:        path.to_path_buf(),
            category:    Category::Dispatched(family),
            confidence:  DISPATCH_CONFIDENCE,
            text:        note,
            destination: Some(destination),
        }
    }

    pub fn is_dispatch(&self) -> bool {
        self.destination.is_some()
    }
}

/// Rendered the way the desktop front end shows a result.
impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| self.path.to_string_lossy());
        writeln!(f, "File: {name}")?;
        writeln!(f, "Type: {}", self.category)?;
        writeln!(f, "Confidence: {:.2}%", self.confidence * 100.0)?;
        writeln!(f)?;
        writeln!(f, "Extracted Text:")?;
        write!(f, "{}", self.text)
    }
}

/// First `limit` characters of `text`, with `...` appended when cut.
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
