// ============================================================
// Error Taxonomy
// ============================================================
// Every failure the pipeline can surface to its caller.
// The core never retries or swallows these: each variant carries
// enough context (document path, stage) for the batch driver to
// log and report it.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Errors raised by the classification-and-routing pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// OCR, rasterization or decoding failed, or the OCR engine timed out.
    #[error("extraction failed for '{}' during {stage}: {reason}", path.display())]
    Extraction {
        path:   PathBuf,
        stage:  &'static str,
        reason: String,
    },

    /// A model component was used before being fitted.
    #[error("{component} has not been fitted; train a model first")]
    NotFitted { component: &'static str },

    /// A feature vector does not match the fitted feature space.
    #[error("feature dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Term weights must be finite and non-negative.
    #[error("invalid weight {weight} for feature {index}")]
    InvalidFeatureWeight { index: usize, weight: f64 },

    /// The document's extension maps to no processing branch.
    #[error("unsupported file type '{extension}' for '{}'", path.display())]
    UnsupportedFileType { path: PathBuf, extension: String },

    /// Moving a file into its destination failed.
    #[error("failed to move '{}' to '{}': {reason}", from.display(), to.display())]
    Relocation {
        from:   PathBuf,
        to:     PathBuf,
        reason: String,
    },

    #[error("invalid training corpus: {0}")]
    Corpus(String),

    #[error("vocabulary is empty: the corpus contains no usable terms")]
    EmptyVocabulary,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("model store error at '{}': {reason}", path.display())]
    ModelStore { path: PathBuf, reason: String },

    #[error("model artifact format {found} is not supported (expected {expected})")]
    IncompatibleModel { found: u32, expected: u32 },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn extraction(path: &Path, stage: &'static str, reason: impl ToString) -> Self {
        Self::Extraction {
            path:   path.to_path_buf(),
            stage,
            reason: reason.to_string(),
        }
    }

    /// The document path this error concerns, when there is one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Extraction { path, .. }
            | Self::UnsupportedFileType { path, .. }
            | Self::ModelStore { path, .. } => Some(path),
            Self::Relocation { from, .. } => Some(from),
            _ => None,
        }
    }

    /// Short name of the pipeline stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Extraction { stage, .. } => *stage,
            Self::NotFitted { .. }
            | Self::DimensionMismatch { .. }
            | Self::InvalidFeatureWeight { .. } => "classify",
            Self::UnsupportedFileType { .. } => "dispatch",
            Self::Relocation { .. } => "relocate",
            Self::Corpus(_) | Self::EmptyVocabulary => "train",
            Self::Config(_) => "config",
            Self::ModelStore { .. } | Self::IncompatibleModel { .. } => "model-store",
            Self::Io(_) | Self::Json(_) => "io",
        }
    }
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

/// Failures of an external OCR or rasterization process.
/// Mapped into [`PipelineError::Extraction`] by the extractor,
/// which knows the document path and stage.
#[derive(Error, Debug)]
pub enum OcrError {
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source:  io::Error,
    },

    #[error("'{program}' timed out after {}s", timeout.as_secs_f32())]
    Timeout { program: String, timeout: Duration },

    #[error("'{program}' failed: {detail}")]
    Failed { program: String, detail: String },

    #[error("I/O error while talking to OCR process: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_error_reports_path_and_stage() {
        let err = PipelineError::extraction(Path::new("/tmp/scan.png"), "ocr", "boom");
        assert_eq!(err.stage(), "ocr");
        assert_eq!(err.path(), Some(Path::new("/tmp/scan.png")));
        assert!(err.to_string().contains("/tmp/scan.png"));
    }

    #[test]
    fn not_fitted_has_no_path() {
        let err = PipelineError::NotFitted { component: "classifier" };
        assert!(err.path().is_none());
        assert_eq!(err.stage(), "classify");

        let err = PipelineError::InvalidFeatureWeight { index: 4, weight: -1.5 };
        assert_eq!(err.stage(), "classify");
        assert!(err.to_string().contains("-1.5"));
    }

    #[test]
    fn timeout_message_mentions_program() {
        let err = OcrError::Timeout {
            program: "tesseract".into(),
            timeout: Duration::from_secs(30),
        };
        assert!(err.to_string().contains("tesseract"));
    }
}
