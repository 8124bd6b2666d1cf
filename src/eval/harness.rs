// Evaluation harness - batch-drives the dictionary engine over the test split

use crate::dictionary::{DatabaseRow, FingerprintQuery, Ja4PlusDatabase, MatchResult};
use crate::error::{DictionaryError, Result};
use crate::eval::dataset::load_labeled_dataset;
use crate::eval::split::split_rows;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Standardized prediction record consumed by external reporting tooling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Ground-truth application label
    pub true_app: String,
    /// First ranked application label, or the literal "Unknown"
    pub prediction: String,
    /// Ranked application labels, deduplicated, order preserved
    pub top_k: Vec<String>,
    /// Total distinct metadata combinations found for the query key
    pub matches_count: usize,
}

/// Evaluate the held-out test partition of a labeled dataset file against an
/// already-built dictionary engine.
///
/// Training rows are never queried. The partition depends only on the
/// dataset contents and the fixed seed, never on the reference database.
pub fn evaluate_test_set(
    dataset_path: impl AsRef<Path>,
    db: &Ja4PlusDatabase,
) -> Result<Vec<PredictionRecord>> {
    let rows = load_labeled_dataset(dataset_path)?;
    let (_train, test) = split_rows(&rows);
    Ok(evaluate_rows(&rows, &test, db))
}

/// Evaluate the given test indices of pre-loaded, label-filtered rows
pub fn evaluate_rows(
    rows: &[DatabaseRow],
    test: &[usize],
    db: &Ja4PlusDatabase,
) -> Vec<PredictionRecord> {
    info!(
        samples = test.len(),
        mode = %db.mode(),
        "evaluating unseen test samples against dictionary"
    );
    test.iter().map(|&idx| evaluate_row(&rows[idx], db)).collect()
}

fn evaluate_row(row: &DatabaseRow, db: &Ja4PlusDatabase) -> PredictionRecord {
    let query = FingerprintQuery::from_row(row);
    let result = db.predict(&query);

    let mut top_k: Vec<String> = Vec::new();
    let mut matches_count = 0;
    if let MatchResult::Match {
        ranked_candidates,
        total_distinct_combinations,
        ..
    } = result
    {
        matches_count = total_distinct_combinations;
        for candidate in &ranked_candidates {
            let app = &candidate.record.application;
            if !app.is_empty() && !top_k.iter().any(|seen| seen == app) {
                top_k.push(app.clone());
            }
        }
    }

    let prediction = top_k
        .first()
        .cloned()
        .unwrap_or_else(|| "Unknown".to_string());

    PredictionRecord {
        true_app: row.application.clone().unwrap_or_default(),
        prediction,
        top_k,
        matches_count,
    }
}

/// Write prediction records as a pretty-printed JSON payload
pub fn write_predictions(path: impl AsRef<Path>, records: &[PredictionRecord]) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(records).map_err(|source| DictionaryError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| DictionaryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(count = records.len(), path = %path.display(), "saved prediction payload");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::MatchMode;

    fn db_row(ja4: &str, app: &str) -> DatabaseRow {
        DatabaseRow {
            ja4_fingerprint: Some(ja4.to_string()),
            application: Some(app.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_unmatched_row_projects_to_unknown() {
        let db = Ja4PlusDatabase::from_rows(&[db_row("A", "App1")], MatchMode::Ja4Only);
        let rows = vec![db_row("B", "App2")];

        let records = evaluate_rows(&rows, &[0], &db);
        assert_eq!(records[0].prediction, "Unknown");
        assert_eq!(records[0].true_app, "App2");
        assert!(records[0].top_k.is_empty());
        assert_eq!(records[0].matches_count, 0);
    }

    #[test]
    fn test_top_k_dedupes_and_skips_empty_labels() {
        // Same key: two "App1" entries differing in OS (distinct combinations,
        // same label) plus one entry with an empty label
        let reference = vec![
            db_row("X", "App1"),
            DatabaseRow {
                ja4_fingerprint: Some("X".to_string()),
                application: Some("App1".to_string()),
                os: Some("Linux".to_string()),
                ..Default::default()
            },
            DatabaseRow {
                ja4_fingerprint: Some("X".to_string()),
                application: Some("".to_string()),
                ..Default::default()
            },
        ];
        let db = Ja4PlusDatabase::from_rows(&reference, MatchMode::Ja4Only);

        let rows = vec![db_row("X", "App1")];
        let records = evaluate_rows(&rows, &[0], &db);

        assert_eq!(records[0].prediction, "App1");
        assert_eq!(records[0].top_k, vec!["App1".to_string()]);
        assert_eq!(records[0].matches_count, 3);
    }
}
