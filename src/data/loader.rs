// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Reads a labeled corpus from a CSV table. The only contract is a
// header row containing `text` and `category`; any other columns
// (ids, sources, dates) are ignored.
//
//   text,category,source
//   "Please find attached my application...",Application,portal
//   "Quarterly figures for the ministry...",Report,email
//
// Labels are parsed into the closed DocumentClass set; a label
// outside that set fails the whole load with its row number.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::category::DocumentClass;
use crate::domain::document::LabeledDocument;
use crate::domain::traits::CorpusSource;
use crate::error::{PipelineError, Result};

#[derive(Debug, Deserialize)]
struct CorpusRow {
    text:     String,
    category: String,
}

/// Loads a `text,category` CSV file.
pub struct CsvCorpusLoader {
    path: PathBuf,
}

impl CsvCorpusLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CorpusSource for CsvCorpusLoader {
    fn load_all(&self) -> Result<Vec<LabeledDocument>> {
        let file = File::open(&self.path).map_err(|e| {
            PipelineError::Corpus(format!("cannot open '{}': {e}", self.path.display()))
        })?;
        let docs = parse_corpus(file, &self.path.display().to_string())?;
        tracing::info!(
            path = %self.path.display(),
            records = docs.len(),
            "loaded labeled corpus"
        );
        Ok(docs)
    }
}

/// Parse CSV corpus data from any reader. `origin` names the source
/// in error messages.
pub fn parse_corpus<R: Read>(reader: R, origin: &str) -> Result<Vec<LabeledDocument>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| PipelineError::Corpus(format!("{origin}: unreadable header: {e}")))?;
    for required in ["text", "category"] {
        if !headers.iter().any(|h| h == required) {
            return Err(PipelineError::Corpus(format!(
                "{origin}: missing required column '{required}'"
            )));
        }
    }

    let mut docs = Vec::new();
    for (idx, row) in csv_reader.deserialize::<CorpusRow>().enumerate() {
        // +2: one for the header, one for 1-based numbering
        let line = idx + 2;
        let row = row.map_err(|e| PipelineError::Corpus(format!("{origin}, row {line}: {e}")))?;
        let category: DocumentClass = row
            .category
            .parse()
            .map_err(|e| PipelineError::Corpus(format!("{origin}, row {line}: {e}")))?;
        docs.push(LabeledDocument::new(row.text, category));
    }

    Ok(docs)
}
