// ============================================================
// Layer 6 — Pipeline Configuration
// ============================================================
// Everything deployment-specific: base directory, extension table,
// OCR binaries and settings, preprocessing, model location.
//
// Loaded from an optional JSON file; any field left out takes its
// default. Example:
//
//   {
//     "base_dir": "/srv/ministry",
//     "ocr": { "language": "eng+fra", "page_timeout_secs": 60 },
//     "extensions": [
//       { "extension": "pdf",  "branch": { "ocr": "paged" } },
//       { "extension": "docx", "branch": { "dispatch": "word" } }
//     ]
//   }
//
// The config is read once at startup. Router and Extractor get the
// pieces they need at construction and never look at it again.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::data::extractor::{Extractor, Preprocessing};
use crate::domain::branch::{default_rules, ExtensionRule, ExtensionTable};
use crate::error::{PipelineError, Result};
use crate::infra::ocr::{Poppler, Tesseract};
use crate::infra::routing_table::RoutingTable;

/// Directory name used under the user's Documents folder.
const DEFAULT_BASE_NAME: &str = "Ministry_Docs";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Root of the destination layout (`OCR_Documents`, `MS_Office_Documents`, `Media_Files`).
    pub base_dir:      PathBuf,
    /// Defaults to `<base_dir>/models/classifier.json`.
    pub model_path:    Option<PathBuf>,
    /// Characters of extracted text kept in a result.
    pub preview_chars: usize,
    /// Extension → branch rules; must not repeat an extension.
    pub extensions:    Vec<ExtensionRule>,
    pub ocr:           OcrSettings,
    pub preprocessing: PreprocessingSettings,
}

/// External OCR binaries and the flags passed to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// Binary names are looked up on `PATH` unless given as paths.
    pub tesseract:         PathBuf,
    pub pdftoppm:          PathBuf,
    pub pdfinfo:           PathBuf,
    /// Tesseract language pack(s), e.g. `eng` or `eng+fra`.
    pub language:          String,
    /// Page segmentation mode (6 = single uniform block of text).
    pub psm:               u8,
    /// OCR engine mode (3 = default engine).
    pub oem:               u8,
    /// Wall-clock limit for each external call, per page.
    pub page_timeout_secs: u64,
    /// Rasterization resolution for PDF pages.
    pub dpi:               u32,
}

/// Image cleanup applied before OCR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessingSettings {
    /// Images wider than this are downscaled before thresholding.
    pub resize_width: Option<u32>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_dir:      default_base_dir(),
            model_path:    None,
            preview_chars: 500,
            extensions:    default_rules(),
            ocr:           OcrSettings::default(),
            preprocessing: PreprocessingSettings::default(),
        }
    }
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            tesseract:         PathBuf::from("tesseract"),
            pdftoppm:          PathBuf::from("pdftoppm"),
            pdfinfo:           PathBuf::from("pdfinfo"),
            language:          "eng".to_string(),
            psm:               6,
            oem:               3,
            page_timeout_secs: 30,
            dpi:               300,
        }
    }
}

impl Default for PreprocessingSettings {
    fn default() -> Self {
        Self { resize_width: Some(1200) }
    }
}

/// `~/Documents/Ministry_Docs`, falling back to the home directory and
/// then the working directory when the platform has no Documents folder.
pub fn default_base_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_BASE_NAME)
}

impl PipelineConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("cannot read '{}': {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|e| {
            PipelineError::Config(format!("cannot parse '{}': {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// `load` when a path is given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.model_path
            .clone()
            .unwrap_or_else(|| self.base_dir.join("models").join("classifier.json"))
    }

    /// Training log, kept beside the model file.
    pub fn metrics_path(&self) -> PathBuf {
        let model = self.model_path();
        model
            .parent()
            .map(|dir| dir.join("metrics.csv"))
            .unwrap_or_else(|| PathBuf::from("metrics.csv"))
    }

    pub fn routing_table(&self) -> RoutingTable {
        RoutingTable::new(&self.base_dir)
    }

    /// Validates the declared extensions; a duplicate is a Config error.
    pub fn extension_table(&self) -> Result<ExtensionTable> {
        ExtensionTable::from_rules(&self.extensions)
    }

    pub fn preprocessing(&self) -> Preprocessing {
        Preprocessing {
            resize_width: self.preprocessing.resize_width,
        }
    }

    pub fn tesseract(&self) -> Tesseract {
        Tesseract {
            binary:   self.ocr.tesseract.clone(),
            language: self.ocr.language.clone(),
            psm:      self.ocr.psm,
            oem:      self.ocr.oem,
            timeout:  self.page_timeout(),
        }
    }

    pub fn poppler(&self) -> Poppler {
        Poppler {
            pdfinfo:  self.ocr.pdfinfo.clone(),
            pdftoppm: self.ocr.pdftoppm.clone(),
            dpi:      self.ocr.dpi,
            timeout:  self.page_timeout(),
        }
    }

    /// Extractor wired to the external tesseract and poppler binaries.
    pub fn extractor(&self) -> Extractor {
        Extractor::new(
            Arc::new(self.tesseract()),
            Arc::new(self.poppler()),
            self.preprocessing(),
        )
    }

    fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.ocr.page_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::branch::{Branch, OcrInput};
    use crate::domain::category::FileFamily;

    #[test]
    fn defaults_match_the_deployment() {
        let cfg = PipelineConfig::default();
        assert!(cfg.base_dir.ends_with("Ministry_Docs"));
        assert_eq!(cfg.preview_chars, 500);
        assert_eq!(cfg.ocr.psm, 6);
        assert_eq!(cfg.ocr.oem, 3);
        assert_eq!(cfg.ocr.page_timeout_secs, 30);
        assert_eq!(cfg.preprocessing.resize_width, Some(1200));

        let table = cfg.extension_table().unwrap();
        assert_eq!(table.lookup("pdf"), Some(Branch::Ocr(OcrInput::Paged)));
        assert_eq!(table.lookup("gif"), Some(Branch::Dispatch(FileFamily::Image)));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(
            &path,
            r#"{ "base_dir": "/srv/docs", "ocr": { "language": "eng+fra" } }"#,
        )
        .unwrap();

        let cfg = PipelineConfig::load(&path).unwrap();
        assert_eq!(cfg.base_dir, PathBuf::from("/srv/docs"));
        assert_eq!(cfg.ocr.language, "eng+fra");
        assert_eq!(cfg.ocr.dpi, 300);
        assert_eq!(cfg.model_path(), PathBuf::from("/srv/docs/models/classifier.json"));
        assert_eq!(cfg.metrics_path(), PathBuf::from("/srv/docs/models/metrics.csv"));
    }

    #[test]
    fn duplicate_extension_in_file_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(
            &path,
            r#"{ "extensions": [
                { "extension": "png", "branch": { "ocr": "raster" } },
                { "extension": ".PNG", "branch": { "dispatch": "image" } }
            ] }"#,
        )
        .unwrap();

        let cfg = PipelineConfig::load(&path).unwrap();
        assert!(matches!(cfg.extension_table(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(PipelineConfig::load(&path), Err(PipelineError::Config(_))));
        assert!(matches!(
            PipelineConfig::load(&tmp.path().join("missing.json")),
            Err(PipelineError::Config(_))
        ));
    }
}
