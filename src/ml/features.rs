// ============================================================
// Layer 5 — Sparse Feature Vectors
// ============================================================
// A TF-IDF vector touches only the handful of vocabulary terms that
// occur in one document, so it is stored as sorted (index, weight)
// pairs plus the dimension of the feature space it belongs to.

use crate::error::{PipelineError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    dim:     usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// Build from arbitrary pairs: sorts by index, merges duplicates,
    /// and rejects indices outside `dim` as well as negative or
    /// non-finite weights.
    pub fn new(dim: usize, mut entries: Vec<(usize, f64)>) -> Result<Self> {
        entries.sort_by_key(|(idx, _)| *idx);
        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (idx, weight) in entries {
            if idx >= dim {
                return Err(PipelineError::DimensionMismatch {
                    expected: dim,
                    found:    idx + 1,
                });
            }
            check_weight(idx, weight)?;
            match merged.last_mut() {
                Some((last, w)) if *last == idx => *w += weight,
                _ => merged.push((idx, weight)),
            }
        }
        Ok(Self { dim, entries: merged })
    }

    /// Caller guarantees `entries` are sorted, unique, `< dim` and
    /// carry finite non-negative weights.
    pub(crate) fn from_sorted(dim: usize, entries: Vec<(usize, f64)>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        debug_assert!(entries.iter().all(|(i, _)| *i < dim));
        Self { dim, entries }
    }

    pub fn zeros(dim: usize) -> Self {
        Self { dim, entries: Vec::new() }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn get(&self, idx: usize) -> f64 {
        self.entries
            .binary_search_by_key(&idx, |(i, _)| *i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, w)| *w == 0.0)
    }

    /// Re-check every weight; vectors built through `from_sorted` skip it.
    pub(crate) fn validate_weights(&self) -> Result<()> {
        self.entries
            .iter()
            .try_for_each(|&(idx, weight)| check_weight(idx, weight))
    }
}

fn check_weight(index: usize, weight: f64) -> Result<()> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(PipelineError::InvalidFeatureWeight { index, weight })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sorts_and_merges() {
        let v = FeatureVector::new(5, vec![(3, 1.0), (1, 2.0), (3, 0.5)]).unwrap();
        assert_eq!(v.entries(), &[(1, 2.0), (3, 1.5)]);
        assert_eq!(v.get(3), 1.5);
        assert_eq!(v.get(0), 0.0);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let err = FeatureVector::new(2, vec![(2, 1.0)]).unwrap_err();
        assert!(matches!(err, PipelineError::DimensionMismatch { expected: 2, found: 3 }));
    }

    #[test]
    fn negative_and_non_finite_weights_are_rejected() {
        for bad in [-1.5, f64::NAN, f64::INFINITY] {
            let err = FeatureVector::new(3, vec![(1, 0.2), (0, bad)]).unwrap_err();
            assert!(
                matches!(err, PipelineError::InvalidFeatureWeight { index: 0, .. }),
                "{bad}: {err}"
            );
        }
        assert!(FeatureVector::new(3, vec![(0, 0.0)]).is_ok());
    }

    #[test]
    fn zero_vector() {
        let v = FeatureVector::zeros(10);
        assert!(v.is_zero());
        assert_eq!(v.norm(), 0.0);
        assert_eq!(v.dim(), 10);
    }
}
