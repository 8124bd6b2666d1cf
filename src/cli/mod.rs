// CLI module - Command line interface and argument parsing
// Copyright (C) 2025 ja4dict contributors
// Licensed under GPL-3.0

use clap::Parser;
use std::path::PathBuf;

/// ja4dict - Evaluate a labeled JA4+ dataset against a fingerprint dictionary
///
/// Runs the fixed 80/20 train/test split over the dataset, evaluates the
/// unseen test samples against the chosen reference database, and saves the
/// standardized prediction payload for downstream comparison tooling.
#[derive(Parser, Debug, Clone)]
#[command(name = "ja4dict", version, about)]
pub struct Args {
    /// Path to the full labeled dataset file (JSON array of rows)
    #[arg(long, value_name = "FILE")]
    pub dataset_file: PathBuf,

    /// Path to the dictionary database to evaluate against
    /// (e.g. the official JA4+ DB or a self-built one)
    #[arg(long, value_name = "FILE")]
    pub db_file: PathBuf,

    /// Name of the model being tested, used in log output only
    #[arg(long, default_value = "Dictionary")]
    pub model_name: String,

    /// Strictness mode: ja4_only, ja4_ja4s or ja4_ja4s_ja4ts
    #[arg(long, default_value = "ja4_ja4s_ja4ts")]
    pub mode: String,

    /// Path to save the prediction payload JSON
    #[arg(long, value_name = "FILE")]
    pub output_file: PathBuf,

    /// Also build a deduplicated reference database from the training split
    /// and save it to this path
    #[arg(long, value_name = "FILE")]
    pub build_db: Option<PathBuf>,
}
