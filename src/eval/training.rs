// Training-split database construction
//
// Builds a self-made reference database from the training partition of a
// labeled dataset, deduplicated so it is shaped like the official database
// but tailored to self-captured traffic labels.

use crate::dictionary::DatabaseRow;
use crate::error::{DictionaryError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

/// Collect the training rows into a deduplicated reference database.
///
/// Duplicates are detected by full raw-field equality; the first occurrence
/// is kept, preserving dataset order.
pub fn build_training_database(rows: &[DatabaseRow], train: &[usize]) -> Vec<DatabaseRow> {
    let mut seen: HashSet<&DatabaseRow> = HashSet::new();
    let mut database = Vec::new();

    for &idx in train {
        let row = &rows[idx];
        if seen.insert(row) {
            database.push(row.clone());
        }
    }

    info!(
        source_rows = train.len(),
        unique_rows = database.len(),
        "built training-split reference database"
    );
    database
}

/// Write database rows as a pretty-printed JSON file
pub fn write_database(path: impl AsRef<Path>, rows: &[DatabaseRow]) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(rows).map_err(|source| DictionaryError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| DictionaryError::Io {
        path: path.to_path_buf(),
        source,
    })
}
