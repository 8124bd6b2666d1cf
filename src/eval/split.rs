// Deterministic train/test partitioning
//
// Every evaluation run must reproduce the same partition for a given
// (dataset order, seed), regardless of which reference database is being
// scored, so that accuracy comparisons are apples-to-apples.

use crate::constants::{SPLIT_SEED, TEST_FRACTION};
use crate::dictionary::DatabaseRow;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;
use tracing::warn;

/// Split labeled rows into (train, test) index sets using the fixed
/// evaluation fraction and seed. Rows must already be label-filtered.
pub fn split_rows(rows: &[DatabaseRow]) -> (Vec<usize>, Vec<usize>) {
    let labels: Vec<&str> = rows
        .iter()
        .map(|row| row.application.as_deref().unwrap_or_default())
        .collect();
    train_test_split(&labels, TEST_FRACTION, SPLIT_SEED)
}

/// Deterministic (train, test) split of `labels.len()` items.
///
/// Stratifies by label so each class keeps the test fraction; when
/// stratification is impossible (a single class, a class with fewer than two
/// members, or a class whose rounded test share would leave either partition
/// empty) it falls back to an unstratified shuffle with the same seed.
pub fn train_test_split(
    labels: &[&str],
    test_fraction: f64,
    seed: u64,
) -> (Vec<usize>, Vec<usize>) {
    match stratified_split(labels, test_fraction, seed) {
        Some(partition) => partition,
        None => {
            warn!("couldn't stratify split due to rare classes, falling back to unstratified split");
            shuffled_split(labels.len(), test_fraction, seed)
        }
    }
}

fn stratified_split(
    labels: &[&str],
    test_fraction: f64,
    seed: u64,
) -> Option<(Vec<usize>, Vec<usize>)> {
    // BTreeMap keeps class iteration order deterministic
    let mut classes: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, label) in labels.iter().enumerate() {
        classes.entry(*label).or_default().push(idx);
    }

    if classes.len() < 2 {
        return None;
    }
    for members in classes.values() {
        if members.len() < 2 {
            return None;
        }
        let take = test_count(members.len(), test_fraction);
        if take == 0 || take == members.len() {
            return None;
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();
    for members in classes.values() {
        let mut shuffled = members.clone();
        shuffled.shuffle(&mut rng);
        let take = test_count(shuffled.len(), test_fraction);
        test.extend_from_slice(&shuffled[..take]);
        train.extend_from_slice(&shuffled[take..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    Some((train, test))
}

fn shuffled_split(n: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut rng);

    let take = test_count(n, test_fraction);
    let mut test: Vec<usize> = indices[..take].to_vec();
    let mut train: Vec<usize> = indices[take..].to_vec();

    train.sort_unstable();
    test.sort_unstable();
    (train, test)
}

fn test_count(n: usize, test_fraction: f64) -> usize {
    (n as f64 * test_fraction).round() as usize
}
