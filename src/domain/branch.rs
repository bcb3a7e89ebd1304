// ============================================================
// Layer 3 — Processing Branches
// ============================================================
// An extension selects exactly one branch:
//
//   Branch::Ocr(Raster | Paged)  → extract → vectorize → classify
//   Branch::Dispatch(family)     → move into the family directory
//
// The table is built once from configuration. An extension that
// appears twice is rejected at build time instead of letting the
// later declaration silently win.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::category::FileFamily;
use crate::error::{PipelineError, Result};

/// How an OCR-required document is turned into images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrInput {
    /// A single-frame image file.
    Raster,
    /// A multi-page document rasterized page by page.
    Paged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    Ocr(OcrInput),
    Dispatch(FileFamily),
}

/// One `extension → branch` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRule {
    pub extension: String,
    pub branch:    Branch,
}

impl ExtensionRule {
    pub fn new(extension: impl Into<String>, branch: Branch) -> Self {
        Self {
            extension: extension.into(),
            branch,
        }
    }
}

/// Read-only lookup from normalized extension to branch.
#[derive(Debug, Clone, Default)]
pub struct ExtensionTable {
    branches: HashMap<String, Branch>,
}

impl ExtensionTable {
    pub fn from_rules<'a>(rules: impl IntoIterator<Item = &'a ExtensionRule>) -> Result<Self> {
        let mut branches = HashMap::new();
        for rule in rules {
            let key = normalize_extension(&rule.extension);
            if key.is_empty() {
                return Err(PipelineError::Config(format!(
                    "empty extension in rule for {:?}",
                    rule.branch
                )));
            }
            if let Some(previous) = branches.insert(key.clone(), rule.branch) {
                return Err(PipelineError::Config(format!(
                    "extension '.{key}' is declared twice ({previous:?} and {:?})",
                    rule.branch
                )));
            }
        }
        Ok(Self { branches })
    }

    pub fn lookup(&self, extension: &str) -> Option<Branch> {
        self.branches.get(&normalize_extension(extension)).copied()
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Extensions (sorted) routed to the given branch.
    pub fn extensions_for(&self, branch: Branch) -> Vec<&str> {
        let mut found: Vec<&str> = self
            .branches
            .iter()
            .filter(|(_, b)| **b == branch)
            .map(|(ext, _)| ext.as_str())
            .collect();
        found.sort_unstable();
        found
    }
}

/// `".PNG"`, `"png"` and `" .png "` all become `"png"`.
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_lowercase()
}

/// The stock rule set. Image extensions that can carry scanned text
/// go through OCR; `.gif` is treated as media.
pub fn default_rules() -> Vec<ExtensionRule> {
    use Branch::{Dispatch, Ocr};

    let mut rules = vec![ExtensionRule::new("pdf", Ocr(OcrInput::Paged))];
    rules.extend(
        ["png", "jpg", "jpeg"]
            .into_iter()
            .map(|ext| ExtensionRule::new(ext, Ocr(OcrInput::Raster))),
    );

    let families: [(&[&str], FileFamily); 6] = [
        (&["doc", "docx"], FileFamily::Word),
        (&["xls", "xlsx"], FileFamily::Excel),
        (&["ppt", "pptx"], FileFamily::PowerPoint),
        (&["gif"], FileFamily::Image),
        (&["mp3", "wav", "ogg"], FileFamily::Audio),
        (&["mp4", "avi", "mov"], FileFamily::Video),
    ];
    for (extensions, family) in families {
        rules.extend(
            extensions
                .iter()
                .map(|ext| ExtensionRule::new(*ext, Dispatch(family))),
        );
    }
    rules
}
