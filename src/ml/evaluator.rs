// ============================================================
// Layer 5 — Evaluator
// ============================================================
// Accuracy = exact label matches / holdout size.
// Takes the model by shared reference: evaluation cannot modify it.

use serde::{Deserialize, Serialize};

use crate::domain::document::LabeledDocument;
use crate::error::Result;
use crate::ml::model::FittedModel;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Fraction of holdout documents classified correctly, in `[0, 1]`.
    pub accuracy:  f64,
    pub correct:   usize,
    pub test_size: usize,
}

pub fn evaluate(model: &FittedModel, holdout: &[LabeledDocument]) -> Result<EvaluationReport> {
    let mut correct = 0usize;
    for doc in holdout {
        if model.classify(&doc.text)?.class == doc.category {
            correct += 1;
        }
    }

    let accuracy = if holdout.is_empty() {
        0.0
    } else {
        correct as f64 / holdout.len() as f64
    };

    tracing::info!(
        accuracy,
        correct,
        test_size = holdout.len(),
        "model evaluated"
    );

    Ok(EvaluationReport {
        accuracy,
        correct,
        test_size: holdout.len(),
    })
}
