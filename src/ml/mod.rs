// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// All model math lives here and nowhere else.
//
//   text ──► FittedVectorizer ──► FeatureVector ──► FittedClassifier ──► (label, confidence)
//            (TF-IDF, L2)          (sparse)          (multinomial NB)
//
// Unfitted settings (TfidfVectorizer, NaiveBayes) and fitted values
// (FittedVectorizer, FittedClassifier, FittedModel) are separate
// types: a fitted value is immutable and can only come out of `fit`
// or a validated artifact on disk.

/// Sparse feature vectors
pub mod features;

/// TF-IDF vocabulary and weighting
pub mod vectorizer;

/// Multinomial Naive Bayes classifier
pub mod naive_bayes;

/// Vectorizer + classifier from one training call
pub mod model;

/// Fits a model on a labeled corpus
pub mod trainer;

/// Holdout accuracy
pub mod evaluator;
