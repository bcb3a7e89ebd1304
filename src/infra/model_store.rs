// ============================================================
// Layer 6 — Model Store
// ============================================================
// Persists the fitted model so routing does not retrain on every
// start. One JSON file holds everything inference needs:
//
//   {
//     "format_version": 1,
//     "trained_at":     "2026-03-02T09:14:00Z",
//     "categories":     ["Application", "Report", ...],
//     "model":          { "vectorizer": {...}, "classifier": {...} }
//   }
//
// Writes go to `<file>.tmp` first and are renamed into place, so a
// crash mid-write never leaves a truncated model behind.
// Loading checks `format_version` before touching the payload and
// re-validates the model's dimensions afterwards.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::category::DocumentClass;
use crate::error::{PipelineError, Result};
use crate::ml::model::FittedModel;

/// Bumped whenever the serialized model layout changes.
pub const MODEL_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub trained_at:     DateTime<Utc>,
    pub categories:     Vec<DocumentClass>,
    pub model:          FittedModel,
}

/// Only the version field, read before the full artifact.
#[derive(Deserialize)]
struct VersionProbe {
    format_version: u32,
}

pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Write `model` to disk, replacing any previous artifact.
    pub fn save(&self, model: &FittedModel, trained_at: DateTime<Utc>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| self.error(e))?;
        }

        let artifact = ModelArtifact {
            format_version: MODEL_FORMAT_VERSION,
            trained_at,
            categories: model.categories().to_vec(),
            model: model.clone(),
        };

        let temp_path = self.path.with_extension("tmp");
        let file = File::create(&temp_path).map_err(|e| self.error(e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &artifact)?;
        writer.flush().map_err(|e| self.error(e))?;
        drop(writer);

        fs::rename(&temp_path, &self.path).map_err(|e| self.error(e))?;

        tracing::info!(
            path = %self.path.display(),
            categories = artifact.categories.len(),
            "model saved"
        );
        Ok(())
    }

    /// Load the stored artifact; `Ok(None)` when nothing has been saved yet.
    pub fn load_artifact(&self) -> Result<Option<ModelArtifact>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no stored model");
                return Ok(None);
            }
            Err(e) => return Err(self.error(e)),
        };

        let probe: VersionProbe = serde_json::from_str(&json).map_err(|e| self.error(e))?;
        if probe.format_version != MODEL_FORMAT_VERSION {
            return Err(PipelineError::IncompatibleModel {
                found:    probe.format_version,
                expected: MODEL_FORMAT_VERSION,
            });
        }

        let artifact: ModelArtifact = serde_json::from_str(&json).map_err(|e| self.error(e))?;
        artifact.model.validate()?;

        tracing::info!(
            path = %self.path.display(),
            trained_at = %artifact.trained_at,
            "model loaded"
        );
        Ok(Some(artifact))
    }

    pub fn load(&self) -> Result<Option<FittedModel>> {
        Ok(self.load_artifact()?.map(|artifact| artifact.model))
    }

    fn error(&self, reason: impl ToString) -> PipelineError {
        PipelineError::ModelStore {
            path:   self.path.clone(),
            reason: reason.to_string(),
        }
    }
}
