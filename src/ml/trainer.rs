// ============================================================
// Layer 5 — Trainer
// ============================================================
// Fits the vectorizer, then the classifier on the vectorizer's
// output, in one call. The pair only becomes usable as a
// FittedModel once both have been fit on the same corpus.
//
// Training is blocking and takes `&mut self`: the borrow checker
// already keeps anyone from evaluating on a half-trained Trainer.
// A new `train` call replaces the previous model wholesale.

use crate::domain::document::LabeledDocument;
use crate::error::{PipelineError, Result};
use crate::ml::evaluator::{evaluate, EvaluationReport};
use crate::ml::model::FittedModel;
use crate::ml::naive_bayes::NaiveBayes;
use crate::ml::vectorizer::TfidfVectorizer;

#[derive(Debug, Default)]
pub struct Trainer {
    vectorizer: TfidfVectorizer,
    classifier: NaiveBayes,
    fitted:     Option<FittedModel>,
}

impl Trainer {
    pub fn new(vectorizer: TfidfVectorizer, classifier: NaiveBayes) -> Self {
        Self {
            vectorizer,
            classifier,
            fitted: None,
        }
    }

    /// Fit on `corpus` and keep the resulting model.
    pub fn train(&mut self, corpus: &[LabeledDocument]) -> Result<&FittedModel> {
        let texts: Vec<&str> = corpus.iter().map(|d| d.text.as_str()).collect();
        let labels: Vec<_> = corpus.iter().map(|d| d.category).collect();

        tracing::info!(samples = corpus.len(), "training classification model");

        let vectorizer = self.vectorizer.fit(&texts)?;
        let features   = vectorizer.transform_many(&texts);
        let classifier = self.classifier.fit(&features, &labels)?;
        let model      = FittedModel::new(vectorizer, classifier)?;

        tracing::info!(
            vocabulary = model.vectorizer().vocabulary_size(),
            classes = model.categories().len(),
            "model training completed"
        );

        Ok(self.fitted.insert(model))
    }

    /// Accuracy of the current model on `holdout`.
    pub fn evaluate(&self, holdout: &[LabeledDocument]) -> Result<EvaluationReport> {
        let model = self.fitted.as_ref().ok_or(PipelineError::NotFitted { component: "classifier" })?;
        evaluate(model, holdout)
    }

    pub fn model(&self) -> Option<&FittedModel> {
        self.fitted.as_ref()
    }

    pub fn into_model(self) -> Option<FittedModel> {
        self.fitted
    }
}
