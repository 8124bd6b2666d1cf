// Composite index - mode-keyed exact-match dictionary over a fingerprint database

use crate::dictionary::mode::{KeyComponents, MatchMode};
use crate::dictionary::record::{DatabaseRow, FingerprintQuery, FingerprintRecord};
use crate::dictionary::resolver::{rank_candidates, MatchResult};
use crate::error::{DictionaryError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Mapping from composite key to the records observed under that key.
///
/// Bucket order is the row order of the source database. Built in one pass
/// and never mutated afterwards, so concurrent read-only lookups are safe.
#[derive(Debug, Clone, Default)]
pub struct CompositeIndex {
    buckets: HashMap<String, Vec<FingerprintRecord>>,
}

impl CompositeIndex {
    /// Build the index from raw rows under the given mode.
    ///
    /// Rows that cannot produce a key (missing the components the mode
    /// requires) contribute nothing and are silently dropped.
    pub fn build(rows: &[DatabaseRow], mode: MatchMode) -> Self {
        let mut buckets: HashMap<String, Vec<FingerprintRecord>> = HashMap::new();
        let mut dropped = 0usize;

        for row in rows {
            let components = KeyComponents::from_row(row);
            match mode.build_key(&components) {
                Some(key) => buckets
                    .entry(key)
                    .or_default()
                    .push(FingerprintRecord::from_row(row)),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            debug!(dropped, %mode, "rows without required key components were skipped");
        }

        Self { buckets }
    }

    /// Records observed under a key, if any
    pub fn get(&self, key: &str) -> Option<&[FingerprintRecord]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    /// Number of unique keys in the index
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Exact-match dictionary engine for JA4+ fingerprints.
///
/// Loads a reference database, builds the composite index for one strictness
/// mode, and resolves queries against it. A new database file or mode
/// requires a new engine instance; there is no incremental update.
#[derive(Debug, Clone)]
pub struct Ja4PlusDatabase {
    mode: MatchMode,
    index: CompositeIndex,
}

impl Ja4PlusDatabase {
    /// Load a reference database from a JSON file and build the index.
    ///
    /// Fails with `NotFound` when the file does not exist and `Parse` when
    /// its contents are not a JSON array of row objects.
    pub fn from_file(path: impl AsRef<Path>, mode: MatchMode) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DictionaryError::NotFound {
                path: path.to_path_buf(),
            });
        }

        info!(path = %path.display(), %mode, "loading fingerprint database");
        let contents = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rows: Vec<DatabaseRow> =
            serde_json::from_str(&contents).map_err(|source| DictionaryError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::from_rows(&rows, mode))
    }

    /// Build the engine directly from in-memory rows
    pub fn from_rows(rows: &[DatabaseRow], mode: MatchMode) -> Self {
        let index = CompositeIndex::build(rows, mode);
        info!(keys = index.len(), %mode, "fingerprint index built");
        Self { mode, index }
    }

    /// Resolve a query against the index, strictly enforcing the engine mode.
    ///
    /// Returns `Unknown` with a reason when the query lacks the components
    /// the mode requires, `Unknown` without a reason when the key is built
    /// but absent, and a frequency-ranked `Match` otherwise.
    pub fn predict(&self, query: &FingerprintQuery) -> MatchResult {
        let components = KeyComponents::from_query(query);
        let Some(key) = self.mode.build_key(&components) else {
            return MatchResult::Unknown {
                reason: Some(self.mode.missing_reason().to_string()),
            };
        };

        match self.index.get(&key) {
            Some(bucket) => rank_candidates(bucket),
            None => MatchResult::Unknown { reason: None },
        }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Number of unique keys in the underlying index
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(ja4: &str, app: &str) -> DatabaseRow {
        DatabaseRow {
            ja4_fingerprint: Some(ja4.to_string()),
            application: Some(app.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_rows_without_key_are_dropped() {
        let rows = vec![
            row("t13d1516h2_8daaf6152771_02713d6af862", "Firefox"),
            DatabaseRow {
                application: Some("Ghost".to_string()),
                ..Default::default()
            },
        ];

        let index = CompositeIndex::build(&rows, MatchMode::Ja4Only);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_bucket_preserves_row_order() {
        let rows = vec![row("X", "First"), row("X", "Second")];
        let index = CompositeIndex::build(&rows, MatchMode::Ja4Only);

        let bucket = index.get("X").unwrap();
        assert_eq!(bucket[0].application, "First");
        assert_eq!(bucket[1].application, "Second");
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        fn assert_sync<T: Sync + Send>() {}
        assert_sync::<Ja4PlusDatabase>();
    }
}
