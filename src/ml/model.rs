// ============================================================
// Layer 5 — Fitted Model
// ============================================================
// The vectorizer and classifier from ONE training call, as a single
// immutable value. Inference only needs `&FittedModel`, so an
// `Arc<FittedModel>` can be shared by any number of routing threads
// without locks; retraining builds a new value and swaps it in whole.

use serde::{Deserialize, Serialize};

use crate::domain::category::DocumentClass;
use crate::error::{PipelineError, Result};
use crate::ml::features::FeatureVector;
use crate::ml::naive_bayes::{FittedClassifier, Prediction};
use crate::ml::vectorizer::FittedVectorizer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    vectorizer: FittedVectorizer,
    classifier: FittedClassifier,
}

impl FittedModel {
    /// Pair a vectorizer with a classifier fitted on its output.
    pub(crate) fn new(vectorizer: FittedVectorizer, classifier: FittedClassifier) -> Result<Self> {
        let model = Self { vectorizer, classifier };
        model.validate()?;
        Ok(model)
    }

    pub fn vectorizer(&self) -> &FittedVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &FittedClassifier {
        &self.classifier
    }

    pub fn categories(&self) -> &[DocumentClass] {
        self.classifier.classes()
    }

    pub fn embed(&self, text: &str) -> FeatureVector {
        self.vectorizer.transform(text)
    }

    /// Vectorize and classify in one step.
    pub fn classify(&self, text: &str) -> Result<Prediction> {
        self.classifier.predict(&self.embed(text))
    }

    /// Both halves must describe the same feature space.
    pub(crate) fn validate(&self) -> Result<()> {
        self.vectorizer.validate()?;
        self.classifier.validate()?;
        if self.vectorizer.vocabulary_size() != self.classifier.n_features() {
            return Err(PipelineError::DimensionMismatch {
                expected: self.classifier.n_features(),
                found:    self.vectorizer.vocabulary_size(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::naive_bayes::NaiveBayes;
    use crate::ml::vectorizer::TfidfVectorizer;

    #[test]
    fn classifier_from_another_vocabulary_is_rejected() {
        let small = TfidfVectorizer::new().fit(&["alpha beta"]).unwrap();
        let large = TfidfVectorizer::new().fit(&["alpha beta gamma delta"]).unwrap();
        let x = large.transform_many(&["alpha beta gamma delta"]);
        let clf = NaiveBayes::default().fit(&x, &[DocumentClass::Memo]).unwrap();

        let err = FittedModel::new(small, clf).unwrap_err();
        assert!(matches!(err, PipelineError::DimensionMismatch { expected: 4, found: 2 }));
    }
}
