// ============================================================
// Layer 4 — Stratified Train/Holdout Splitter
// ============================================================
// Splits labeled samples into (train, holdout) so that every label
// keeps roughly the same proportion in both sets.
//
// Per label:
//   1. shuffle that label's samples with a seeded StdRng
//   2. move round(n * holdout_fraction) of them to the holdout
//   3. keep at least one sample of every label in training
//
// Labels are visited in sorted order and the RNG is seeded, so the
// same corpus always produces the same split.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Holdout proportion used by the train command.
pub const HOLDOUT_FRACTION: f64 = 0.2;

/// Seed used by the train command.
pub const SPLIT_SEED: u64 = 42;

/// Stratified split of `samples` by `label_of`.
///
/// Returns `(train, holdout)`. Both outputs are shuffled with the same
/// seeded RNG so labels are interleaved.
pub fn stratified_split<T, K, F>(
    samples:          Vec<T>,
    label_of:         F,
    holdout_fraction: f64,
    seed:             u64,
) -> (Vec<T>, Vec<T>)
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let fraction = holdout_fraction.clamp(0.0, 1.0);
    let total    = samples.len();
    let mut rng  = StdRng::seed_from_u64(seed);

    let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for sample in samples {
        groups.entry(label_of(&sample)).or_default().push(sample);
    }

    let mut train   = Vec::with_capacity(total);
    let mut holdout = Vec::new();

    for (_, mut group) in groups {
        group.shuffle(&mut rng);
        let n = group.len();
        let wanted = ((n as f64) * fraction).round() as usize;
        // a label that exists only in the holdout could never be predicted
        let take = wanted.min(n.saturating_sub(1));
        let keep = n - take;
        holdout.extend(group.split_off(keep));
        train.extend(group);
    }

    train.shuffle(&mut rng);
    holdout.shuffle(&mut rng);

    tracing::debug!(
        train = train.len(),
        holdout = holdout.len(),
        "stratified split"
    );

    (train, holdout)
}
