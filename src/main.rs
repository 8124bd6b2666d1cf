// ja4dict - Exact-match dictionary engine for JA4+ network fingerprints
// Copyright (C) 2025 ja4dict contributors
// Licensed under GPL-3.0

use anyhow::Result;
use clap::Parser;
use ja4dict::dictionary::{Ja4PlusDatabase, MatchMode};
use ja4dict::eval::{
    build_training_database, evaluate_rows, load_labeled_dataset, split_rows, write_database,
    write_predictions,
};
use ja4dict::Args;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Initialize logging - respect RUST_LOG environment variable
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    // Fail fast on an unsupported mode, before any file is read
    let mode = args.mode.parse::<MatchMode>()?;

    let rows = load_labeled_dataset(&args.dataset_file)?;
    let (train, test) = split_rows(&rows);

    if let Some(db_path) = &args.build_db {
        let database = build_training_database(&rows, &train);
        write_database(db_path, &database)?;
        info!(path = %db_path.display(), "training-split database saved");
    }

    let db = Ja4PlusDatabase::from_file(&args.db_file, mode)?;
    info!(
        model = %args.model_name,
        db = %args.db_file.display(),
        "evaluating test split against dictionary"
    );

    let predictions = evaluate_rows(&rows, &test, &db);
    write_predictions(&args.output_file, &predictions)?;

    info!(
        count = predictions.len(),
        path = %args.output_file.display(),
        "evaluation complete"
    );
    Ok(())
}
