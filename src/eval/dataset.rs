// Dataset loading for the evaluation harness
//
// Unlike the reference database, individual malformed dataset rows are
// skipped row-by-row instead of aborting the whole run.

use crate::dictionary::DatabaseRow;
use crate::error::{DictionaryError, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load a labeled dataset file as raw rows.
///
/// The file must exist and hold a JSON array; rows inside the array that
/// fail to deserialize are skipped with a warning and never reach the
/// evaluation output.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<DatabaseRow>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DictionaryError::NotFound {
            path: path.to_path_buf(),
        });
    }

    info!(path = %path.display(), "loading dataset");
    let contents = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: Vec<serde_json::Value> =
        serde_json::from_str(&contents).map_err(|source| DictionaryError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows = Vec::with_capacity(raw.len());
    let mut skipped = 0usize;
    for (position, value) in raw.into_iter().enumerate() {
        match serde_json::from_value::<DatabaseRow>(value) {
            Ok(row) => rows.push(row),
            Err(err) => {
                warn!(position, %err, "skipping malformed dataset row");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        debug!(skipped, kept = rows.len(), "dataset rows skipped");
    }
    Ok(rows)
}

/// Load a dataset and drop rows without a ground-truth `application` label.
///
/// Empty-string labels are kept; only null/absent labels are dropped.
pub fn load_labeled_dataset(path: impl AsRef<Path>) -> Result<Vec<DatabaseRow>> {
    let rows = load_dataset(path)?;
    let total = rows.len();
    let labeled: Vec<DatabaseRow> = rows
        .into_iter()
        .filter(|row| row.application.is_some())
        .collect();

    if labeled.len() < total {
        debug!(
            dropped = total - labeled.len(),
            "rows without ground-truth label dropped"
        );
    }
    Ok(labeled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = load_dataset("/nonexistent/dataset.json").unwrap_err();
        assert!(matches!(err, DictionaryError::NotFound { .. }));
    }

    #[test]
    fn test_malformed_rows_are_skipped_not_fatal() {
        let file = write_temp(
            r#"[
                {"application": "App1", "ja4_fingerprint": "A"},
                {"application": ["not", "a", "string"]},
                {"application": "App2", "ja4_fingerprint": "B"}
            ]"#,
        );

        let rows = load_dataset(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].application.as_deref(), Some("App1"));
        assert_eq!(rows[1].application.as_deref(), Some("App2"));
    }

    #[test]
    fn test_unlabeled_rows_dropped_empty_labels_kept() {
        let file = write_temp(
            r#"[
                {"application": "App1", "ja4_fingerprint": "A"},
                {"ja4_fingerprint": "B"},
                {"application": null, "ja4_fingerprint": "C"},
                {"application": "", "ja4_fingerprint": "D"}
            ]"#,
        );

        let rows = load_labeled_dataset(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].application.as_deref(), Some(""));
    }

    #[test]
    fn test_non_array_payload_is_parse_error() {
        let file = write_temp(r#"{"application": "App1"}"#);
        let err = load_dataset(file.path()).unwrap_err();
        assert!(matches!(err, DictionaryError::Parse { .. }));
    }
}
