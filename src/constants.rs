// ja4dict - Exact-match dictionary engine for JA4+ network fingerprints
// Copyright (C) 2025 ja4dict contributors
// Licensed under GPL-3.0

//! Engine and evaluation constants
//!
//! Centralized constants for the dictionary engine and the evaluation
//! harness, eliminating magic numbers throughout the codebase.

/// Maximum number of ranked candidates returned per match.
///
/// Distinct metadata combinations beyond this limit are counted in
/// `hidden_count` rather than returned.
pub const TOP_MATCHES_LIMIT: usize = 5;

/// Separator joining fingerprint components into a composite index key.
pub const KEY_SEPARATOR: char = '|';

/// Fraction of the labeled dataset held out as the evaluation test set.
pub const TEST_FRACTION: f64 = 0.2;

/// Fixed seed for the train/test split.
///
/// Every evaluation run must reproduce the same partition so that accuracy
/// numbers from different reference databases are comparable.
pub const SPLIT_SEED: u64 = 42;
