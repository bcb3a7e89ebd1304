// ============================================================
// Layer 2 — EvaluateUseCase
// ============================================================
// Scores the stored model against a labeled CSV, using the whole
// file as holdout. The model is read-only here.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::data::loader::CsvCorpusLoader;
use crate::domain::traits::CorpusSource;
use crate::error::PipelineError;
use crate::infra::model_store::ModelStore;
use crate::ml::evaluator::{evaluate, EvaluationReport};

pub struct EvaluateUseCase {
    corpus:     PathBuf,
    model_path: PathBuf,
}

impl EvaluateUseCase {
    pub fn new(corpus: PathBuf, model_path: PathBuf) -> Self {
        Self { corpus, model_path }
    }

    pub fn execute(&self) -> Result<EvaluationReport> {
        let model = ModelStore::new(&self.model_path)
            .load()
            .context("cannot load model")?
            .ok_or(PipelineError::NotFitted { component: "classifier" })
            .with_context(|| format!("no model at '{}'", self.model_path.display()))?;

        let holdout = CsvCorpusLoader::new(&self.corpus)
            .load_all()
            .with_context(|| format!("cannot load corpus '{}'", self.corpus.display()))?;

        Ok(evaluate(&model, &holdout)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::trainer::Trainer;
    use crate::test_support::two_class_corpus;
    use chrono::Utc;
    use std::fs;

    #[test]
    fn stored_model_is_scored() {
        let tmp = tempfile::tempdir().unwrap();
        let model_path = tmp.path().join("classifier.json");
        let mut trainer = Trainer::default();
        let model = trainer.train(&two_class_corpus()).unwrap();
        ModelStore::new(&model_path).save(model, Utc::now()).unwrap();

        let corpus = tmp.path().join("holdout.csv");
        fs::write(
            &corpus,
            "text,category\n\
             application for a trading permit,Application\n\
             annual broadband statistics report,Report\n",
        )
        .unwrap();

        let report = EvaluateUseCase::new(corpus, model_path).execute().unwrap();
        assert_eq!(report.test_size, 2);
        assert_eq!(report.correct, 2);
    }

    #[test]
    fn no_stored_model_is_not_fitted() {
        let tmp = tempfile::tempdir().unwrap();
        let corpus = tmp.path().join("holdout.csv");
        fs::write(&corpus, "text,category\nsome memo,Memo\n").unwrap();

        let err = EvaluateUseCase::new(corpus, tmp.path().join("none.json"))
            .execute()
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::NotFitted { .. })
        ));
    }
}
