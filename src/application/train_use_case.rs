// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates a training run in order:
//
//   Step 1: Load the labeled CSV corpus      (Layer 4 - data)
//   Step 2: Stratified 80/20 split           (Layer 4 - data)
//   Step 3: Fit vectorizer + classifier      (Layer 5 - ml)
//   Step 4: Evaluate on the holdout          (Layer 5 - ml)
//   Step 5: Save the model artifact          (Layer 6 - infra)
//   Step 6: Append a row to metrics.csv      (Layer 6 - infra)
//
// The holdout is never shown to the trainer, and the model is
// saved only after evaluation succeeded.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::data::loader::CsvCorpusLoader;
use crate::data::splitter::{stratified_split, HOLDOUT_FRACTION, SPLIT_SEED};
use crate::domain::traits::CorpusSource;
use crate::infra::metrics::{MetricsLogger, TrainingRun};
use crate::infra::model_store::ModelStore;
use crate::ml::evaluator::EvaluationReport;
use crate::ml::model::FittedModel;
use crate::ml::trainer::Trainer;

// ─── Training Configuration ──────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub corpus:           PathBuf,
    pub model_path:       PathBuf,
    pub metrics_path:     PathBuf,
    pub holdout_fraction: f64,
    pub seed:             u64,
}

impl TrainConfig {
    pub fn new(corpus: PathBuf, model_path: PathBuf, metrics_path: PathBuf) -> Self {
        Self {
            corpus,
            model_path,
            metrics_path,
            holdout_fraction: HOLDOUT_FRACTION,
            seed:             SPLIT_SEED,
        }
    }
}

/// What one run produced.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub model:      FittedModel,
    pub report:     EvaluationReport,
    pub train_size: usize,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<TrainOutcome> {
        let cfg = &self.config;

        // ── Step 1: Load corpus ──────────────────────────────────────────────
        tracing::info!(corpus = %cfg.corpus.display(), "loading training corpus");
        let corpus = CsvCorpusLoader::new(&cfg.corpus)
            .load_all()
            .with_context(|| format!("cannot load corpus '{}'", cfg.corpus.display()))?;

        // ── Step 2: Stratified split ─────────────────────────────────────────
        let (train, holdout) =
            stratified_split(corpus, |d| d.category, cfg.holdout_fraction, cfg.seed);
        tracing::info!(train = train.len(), holdout = holdout.len(), "corpus split");

        // ── Step 3 + 4: Fit, then evaluate ───────────────────────────────────
        let mut trainer = Trainer::default();
        trainer.train(&train).context("training failed")?;
        let report = trainer.evaluate(&holdout).context("evaluation failed")?;
        let model = trainer
            .into_model()
            .context("trainer finished without a model")?;

        // ── Step 5: Persist ──────────────────────────────────────────────────
        let trained_at = Utc::now();
        ModelStore::new(&cfg.model_path)
            .save(&model, trained_at)
            .context("cannot save model")?;

        // ── Step 6: Metrics ──────────────────────────────────────────────────
        let metrics = MetricsLogger::new(&cfg.metrics_path)
            .with_context(|| format!("cannot open '{}'", cfg.metrics_path.display()))?;
        // history only feeds a comparison; a damaged file must not lose this run
        let previous = match metrics.last_run() {
            Ok(previous) => previous,
            Err(e) => {
                tracing::warn!(
                    path = %cfg.metrics_path.display(),
                    error = %e,
                    "cannot read previous training run; skipping comparison"
                );
                None
            }
        };
        let run = TrainingRun::new(trained_at, train.len(), &report);
        metrics.log(&run)?;
        if let Some(previous) = previous {
            if !run.is_improvement(&previous) {
                tracing::warn!(
                    previous = previous.accuracy,
                    current = run.accuracy,
                    "holdout accuracy did not improve on the previous run"
                );
            }
        }

        Ok(TrainOutcome {
            model,
            report,
            train_size: train.len(),
        })
    }
}
