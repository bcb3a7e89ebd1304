// ============================================================
// Layer 5 — TF-IDF Vectorizer
// ============================================================
// fit(corpus) learns a vocabulary and per-term IDF weights;
// transform(text) maps any text into that fixed feature space.
//
//   tokens : lower-cased runs matching \b\w\w+\b
//   tf     : raw count of the term in the document
//   idf    : ln((1 + n) / (1 + df)) + 1      (smoothed)
//   weight : tf · idf, then the vector is L2-normalized
//
// Vocabulary indices follow lexicographic term order, so the same
// corpus always yields the same feature space regardless of the
// order documents were seen in.
//
// Terms unseen at fit time are ignored by transform. A text with no
// known terms maps to the zero vector; that is not an error.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::ml::features::FeatureVector;

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\w\w+\b").unwrap_or_else(|e| panic!("token pattern must compile: {e}"))
});

/// Split text into lower-case tokens of two or more word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN.find_iter(&lower).map(|m| m.as_str().to_string()).collect()
}

/// An unfitted vectorizer. Fitting produces a [`FittedVectorizer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TfidfVectorizer;

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self
    }

    pub fn fit<S: AsRef<str>>(&self, corpus: &[S]) -> Result<FittedVectorizer> {
        if corpus.is_empty() {
            return Err(PipelineError::Corpus("cannot fit vectorizer on an empty corpus".into()));
        }

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for doc in corpus {
            let unique: BTreeSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(PipelineError::EmptyVocabulary);
        }

        let n = corpus.len() as f64;
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (idx, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, idx);
        }

        tracing::debug!(terms = idf.len(), documents = corpus.len(), "vectorizer fitted");

        Ok(FittedVectorizer {
            vocabulary,
            idf,
            n_documents: corpus.len(),
        })
    }
}

/// Vocabulary and IDF weights learned by [`TfidfVectorizer::fit`].
/// Immutable; safe to share across threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedVectorizer {
    vocabulary:  HashMap<String, usize>,
    idf:         Vec<f64>,
    n_documents: usize,
}

impl FittedVectorizer {
    pub fn transform(&self, text: &str) -> FeatureVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut entries {
                *w /= norm;
            }
        }

        FeatureVector::from_sorted(self.idf.len(), entries)
    }

    pub fn transform_many<S: AsRef<str>>(&self, texts: &[S]) -> Vec<FeatureVector> {
        texts.iter().map(|t| self.transform(t.as_ref())).collect()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Internal consistency check for artifacts loaded from disk.
    pub(crate) fn validate(&self) -> Result<()> {
        let dim = self.idf.len();
        if self.vocabulary.len() != dim || self.vocabulary.values().any(|&i| i >= dim) {
            return Err(PipelineError::DimensionMismatch {
                expected: dim,
                found:    self.vocabulary.len(),
            });
        }
        if let Some((index, &weight)) = self
            .idf
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w <= 0.0)
        {
            return Err(PipelineError::InvalidFeatureWeight { index, weight });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<&'static str> {
        vec![
            "The invoice is due",
            "Invoice number 42 for network equipment",
            "Memo: staff meeting on Friday",
        ]
    }

    #[test]
    fn tokenizer_lowercases_and_drops_single_chars() {
        assert_eq!(tokenize("A Memo, RE: budget-2024"), vec!["memo", "re", "budget", "2024"]);
    }

    #[test]
    fn vocabulary_is_lexicographic() {
        let v = TfidfVectorizer::new().fit(&corpus()).unwrap();
        assert_eq!(v.index_of("42"), Some(0));
        assert!(v.index_of("due").unwrap() < v.index_of("invoice").unwrap());
        assert_eq!(v.index_of("a"), None);
    }

    #[test]
    fn vectors_are_l2_normalized() {
        let v = TfidfVectorizer::new().fit(&corpus()).unwrap();
        let x = v.transform("invoice for equipment");
        assert!((x.norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rarer_terms_weigh_more() {
        let v = TfidfVectorizer::new().fit(&corpus()).unwrap();
        let x = v.transform("invoice equipment");
        let invoice = x.get(v.index_of("invoice").unwrap());
        let equipment = x.get(v.index_of("equipment").unwrap());
        assert!(equipment > invoice);
    }

    #[test]
    fn unseen_terms_are_ignored() {
        let v = TfidfVectorizer::new().fit(&corpus()).unwrap();
        let x = v.transform("zebra quantum");
        assert!(x.is_zero());
        assert_eq!(x.dim(), v.vocabulary_size());
    }

    #[test]
    fn nonzero_dimensions_lie_in_vocabulary() {
        let docs = corpus();
        let v = TfidfVectorizer::new().fit(&docs).unwrap();
        for doc in &docs {
            let x = v.transform(doc);
            assert!(!x.is_zero());
            for (idx, _) in x.entries() {
                assert!(*idx < v.vocabulary_size());
            }
        }
    }

    #[test]
    fn fit_is_order_independent() {
        let mut reversed = corpus();
        reversed.reverse();
        let a = TfidfVectorizer::new().fit(&corpus()).unwrap();
        let b = TfidfVectorizer::new().fit(&reversed).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_corpus_is_rejected() {
        let err = TfidfVectorizer::new().fit::<&str>(&[]).unwrap_err();
        assert!(matches!(err, PipelineError::Corpus(_)));
    }

    #[test]
    fn corpus_without_terms_is_rejected() {
        let err = TfidfVectorizer::new().fit(&["", "a b c", "!!"]).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyVocabulary));
    }

    #[test]
    fn negative_idf_fails_validation() {
        let mut fitted = TfidfVectorizer::new().fit(&corpus()).unwrap();
        assert!(fitted.validate().is_ok());
        fitted.idf[0] = -1.0;
        assert!(matches!(
            fitted.validate(),
            Err(PipelineError::InvalidFeatureWeight { index: 0, .. })
        ));
    }
}
