// ja4dict - Exact-match dictionary engine for JA4+ network fingerprints
// Copyright (C) 2025 ja4dict contributors
// Licensed under GPL-3.0

//! ja4dict classifies network traffic flows into originating applications by
//! exact-matching JA4-family fingerprint strings against a reference table of
//! known fingerprint-to-application associations.
//!
//! The engine builds a composite lookup index from a fingerprint database
//! under a configurable strictness mode, resolves queries against that index,
//! and disambiguates collisions (one fingerprint key observed with multiple
//! distinct application/metadata combinations) by frequency ranking.

pub mod cli;
pub mod constants;
pub mod dictionary;
pub mod error;
pub mod eval;

// Re-export commonly used types
pub use crate::cli::Args;
pub use crate::dictionary::{
    CompositeIndex, FingerprintQuery, FingerprintRecord, Ja4PlusDatabase, MatchMode, MatchResult,
    RankedCandidate,
};
pub use crate::error::{DictionaryError, Result};
pub use crate::eval::PredictionRecord;
