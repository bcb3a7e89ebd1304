// ============================================================
// Layer 5 — Multinomial Naive Bayes
// ============================================================
// TF-IDF weights are treated as pseudo-counts of each term.
//
// Fitting, with Laplace smoothing α:
//   count[c][j]   = Σ x_j over training vectors labeled c
//   log P(j | c)  = ln((count[c][j] + α) / (Σ_j count[c][j] + α·d))
//   log P(c)      = ln(n_c / n)
//
// Prediction:
//   score(c)      = log P(c) + Σ_j x_j · log P(j | c)
//   P(c | x)      = exp(score(c) − logsumexp(scores))
//
// Classes are kept in label-name order and ties go to the first,
// so predict is a pure function of the fitted parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::category::DocumentClass;
use crate::error::{PipelineError, Result};
use crate::ml::features::FeatureVector;

/// Statistical confidence stays strictly below 1.0, which marks
/// extension dispatch.
pub const MAX_STATISTICAL_CONFIDENCE: f64 = 1.0 - f64::EPSILON;

/// Unfitted classifier settings.
#[derive(Debug, Clone, Copy)]
pub struct NaiveBayes {
    alpha: f64,
}

impl Default for NaiveBayes {
    fn default() -> Self {
        Self { alpha: 1.0 }
    }
}

impl NaiveBayes {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }

    pub fn fit(&self, features: &[FeatureVector], labels: &[DocumentClass]) -> Result<FittedClassifier> {
        if features.is_empty() {
            return Err(PipelineError::Corpus("cannot fit classifier without samples".into()));
        }
        if features.len() != labels.len() {
            return Err(PipelineError::Corpus(format!(
                "{} feature vectors but {} labels",
                features.len(),
                labels.len()
            )));
        }
        if self.alpha.is_nan() || self.alpha <= 0.0 {
            return Err(PipelineError::Config(format!(
                "smoothing alpha must be positive, got {}",
                self.alpha
            )));
        }

        let dim = features[0].dim();
        if let Some(bad) = features.iter().find(|f| f.dim() != dim) {
            return Err(PipelineError::DimensionMismatch {
                expected: dim,
                found:    bad.dim(),
            });
        }
        for x in features {
            x.validate_weights()?;
        }

        // per-class sample counts and term pseudo-counts
        let mut per_class: BTreeMap<&'static str, (DocumentClass, usize, Vec<f64>)> = BTreeMap::new();
        for (x, &label) in features.iter().zip(labels) {
            let (_, n, counts) = per_class
                .entry(label.as_str())
                .or_insert_with(|| (label, 0, vec![0.0; dim]));
            *n += 1;
            for &(j, w) in x.entries() {
                counts[j] += w;
            }
        }

        let total = features.len() as f64;
        let mut classes          = Vec::with_capacity(per_class.len());
        let mut class_log_prior  = Vec::with_capacity(per_class.len());
        let mut feature_log_prob = Vec::with_capacity(per_class.len());

        for (_, (class, n, counts)) in per_class {
            let denominator = counts.iter().sum::<f64>() + self.alpha * dim as f64;
            classes.push(class);
            class_log_prior.push((n as f64 / total).ln());
            feature_log_prob.push(
                counts
                    .iter()
                    .map(|c| ((c + self.alpha) / denominator).ln())
                    .collect(),
            );
        }

        tracing::debug!(classes = classes.len(), features = dim, "classifier fitted");

        Ok(FittedClassifier {
            classes,
            class_log_prior,
            feature_log_prob,
            n_features: dim,
        })
    }
}

/// A predicted label and its posterior probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub class:      DocumentClass,
    pub confidence: f64,
}

/// Parameters learned by [`NaiveBayes::fit`]. Immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedClassifier {
    /// Labels seen during fit, in label-name order.
    classes:          Vec<DocumentClass>,
    /// ln(n_c / n), parallel to `classes`.
    class_log_prior:  Vec<f64>,
    /// One row per class of smoothed ln P(term | class), `n_features` wide.
    feature_log_prob: Vec<Vec<f64>>,
    /// Vocabulary size of the vectorizer this was fitted against.
    n_features:       usize,
}

impl FittedClassifier {
    /// Label set seen during fit, in label-name order.
    pub fn classes(&self) -> &[DocumentClass] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Posterior probability of every class, in [`classes`](Self::classes) order.
    pub fn predict_proba(&self, x: &FeatureVector) -> Result<Vec<(DocumentClass, f64)>> {
        if x.dim() != self.n_features {
            return Err(PipelineError::DimensionMismatch {
                expected: self.n_features,
                found:    x.dim(),
            });
        }
        x.validate_weights()?;

        let scores: Vec<f64> = self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| {
                prior + x.entries().iter().map(|&(j, w)| w * log_probs[j]).sum::<f64>()
            })
            .collect();

        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let log_norm = max + scores.iter().map(|s| (s - max).exp()).sum::<f64>().ln();

        Ok(self
            .classes
            .iter()
            .zip(scores)
            .map(|(&class, s)| (class, (s - log_norm).exp()))
            .collect())
    }

    pub fn predict(&self, x: &FeatureVector) -> Result<Prediction> {
        let probabilities = self.predict_proba(x)?;

        let mut best = probabilities[0];
        for &candidate in &probabilities[1..] {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }

        Ok(Prediction {
            class:      best.0,
            confidence: best.1.clamp(0.0, MAX_STATISTICAL_CONFIDENCE),
        })
    }

    /// Internal consistency check for artifacts loaded from disk.
    pub(crate) fn validate(&self) -> Result<()> {
        let k = self.classes.len();
        if k == 0 || self.class_log_prior.len() != k || self.feature_log_prob.len() != k {
            return Err(PipelineError::Corpus("classifier parameters are inconsistent".into()));
        }
        if let Some(row) = self.feature_log_prob.iter().find(|r| r.len() != self.n_features) {
            return Err(PipelineError::DimensionMismatch {
                expected: self.n_features,
                found:    row.len(),
            });
        }
        let finite = self
            .class_log_prior
            .iter()
            .chain(self.feature_log_prob.iter().flatten())
            .all(|p| p.is_finite());
        if !finite {
            return Err(PipelineError::Corpus("classifier parameters are not finite".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fv(dim: usize, entries: &[(usize, f64)]) -> FeatureVector {
        FeatureVector::new(dim, entries.to_vec()).unwrap()
    }

    fn fitted() -> FittedClassifier {
        let x = vec![
            fv(3, &[(0, 1.0)]),
            fv(3, &[(0, 0.8), (1, 0.2)]),
            fv(3, &[(2, 1.0)]),
            fv(3, &[(1, 0.3), (2, 0.7)]),
        ];
        let y = [
            DocumentClass::Memo,
            DocumentClass::Memo,
            DocumentClass::Invoice,
            DocumentClass::Invoice,
        ];
        NaiveBayes::default().fit(&x, &y).unwrap()
    }

    #[test]
    fn classes_are_the_fitted_label_set_in_name_order() {
        assert_eq!(fitted().classes(), &[DocumentClass::Invoice, DocumentClass::Memo]);
    }

    #[test]
    fn predicts_the_dominant_class() {
        let clf = fitted();
        let p = clf.predict(&fv(3, &[(0, 1.0)])).unwrap();
        assert_eq!(p.class, DocumentClass::Memo);
        let p = clf.predict(&fv(3, &[(2, 1.0)])).unwrap();
        assert_eq!(p.class, DocumentClass::Invoice);
        assert!(p.confidence > 0.5 && p.confidence < 1.0);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let probs = fitted().predict_proba(&fv(3, &[(1, 1.0)])).unwrap();
        let total: f64 = probs.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(probs.iter().all(|(_, p)| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn prediction_is_deterministic() {
        let clf = fitted();
        let x = fv(3, &[(0, 0.4), (2, 0.6)]);
        let first = clf.predict(&x).unwrap();
        for _ in 0..10 {
            assert_eq!(clf.predict(&x).unwrap(), first);
        }
    }

    #[test]
    fn zero_vector_falls_back_to_priors() {
        let p = fitted().predict(&FeatureVector::zeros(3)).unwrap();
        // equal priors → tie → first class in name order
        assert_eq!(p.class, DocumentClass::Invoice);
        assert!((p.confidence - 0.5).abs() < 1e-12);
    }

    #[test]
    fn confidence_never_reaches_one() {
        let x = vec![fv(1, &[(0, 1.0)]), fv(1, &[(0, 1.0)])];
        let clf = NaiveBayes::default().fit(&x, &[DocumentClass::Letter, DocumentClass::Letter]).unwrap();
        let p = clf.predict(&fv(1, &[(0, 1.0)])).unwrap();
        assert_eq!(p.class, DocumentClass::Letter);
        assert!(p.confidence < 1.0);
    }

    #[test]
    fn wrong_dimension_is_rejected() {
        let err = fitted().predict(&FeatureVector::zeros(4)).unwrap_err();
        assert!(matches!(err, PipelineError::DimensionMismatch { expected: 3, found: 4 }));
    }

    #[test]
    fn mismatched_labels_are_rejected() {
        let err = NaiveBayes::default()
            .fit(&[FeatureVector::zeros(2)], &[])
            .unwrap_err();
        assert!(matches!(err, PipelineError::Corpus(_)));
    }

    #[test]
    fn mixed_dimensions_are_rejected() {
        let x = vec![FeatureVector::zeros(2), FeatureVector::zeros(3)];
        let err = NaiveBayes::default()
            .fit(&x, &[DocumentClass::Memo, DocumentClass::Report])
            .unwrap_err();
        assert!(matches!(err, PipelineError::DimensionMismatch { expected: 2, found: 3 }));
    }

    #[test]
    fn negative_weights_cannot_reach_the_posterior() {
        // a negative pseudo-count would push ln((c + α) / denominator) to NaN
        assert!(matches!(
            FeatureVector::new(2, vec![(0, -1.5)]),
            Err(PipelineError::InvalidFeatureWeight { index: 0, .. })
        ));

        let x = vec![
            FeatureVector::from_sorted(2, vec![(0, -1.5)]),
            fv(2, &[(1, 1.0)]),
        ];
        let err = NaiveBayes::default()
            .fit(&x, &[DocumentClass::Memo, DocumentClass::Report])
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidFeatureWeight { index: 0, .. }));

        let err = fitted()
            .predict(&FeatureVector::from_sorted(3, vec![(1, f64::NAN)]))
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidFeatureWeight { index: 1, .. }));
    }

    #[test]
    fn non_finite_parameters_fail_validation() {
        let mut clf = fitted();
        clf.feature_log_prob[0][1] = f64::NAN;
        assert!(clf.validate().is_err());
        assert!(fitted().validate().is_ok());
    }
}
