// Match resolver - collision disambiguation and frequency ranking

use crate::constants::TOP_MATCHES_LIMIT;
use crate::dictionary::record::FingerprintRecord;
use serde::Serialize;

/// One distinct metadata combination with its occurrence count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub record: FingerprintRecord,
    pub occurrences_in_database: usize,
}

/// Outcome of a dictionary query.
///
/// `Unknown` is a query result, not an error: either the required components
/// for the active mode were missing (`reason` set), or the key was simply
/// absent from the index (`reason` empty). Serialized field names match the
/// prediction payload schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MatchResult {
    Unknown {
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    Match {
        #[serde(rename = "top_matches")]
        ranked_candidates: Vec<RankedCandidate>,
        #[serde(rename = "additional_results_count")]
        hidden_count: usize,
        #[serde(rename = "total_unique_combinations_found")]
        total_distinct_combinations: usize,
    },
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Match { .. })
    }
}

/// Aggregate an index bucket into a ranked `Match`.
///
/// Records are grouped by full-field equality; groups keep first-occurrence
/// order within the bucket. The stable descending sort on count therefore
/// breaks ties by first occurrence in the original database order.
pub fn rank_candidates(bucket: &[FingerprintRecord]) -> MatchResult {
    let mut groups: Vec<(&FingerprintRecord, usize)> = Vec::new();
    for record in bucket {
        match groups.iter_mut().find(|(existing, _)| *existing == record) {
            Some((_, count)) => *count += 1,
            None => groups.push((record, 1)),
        }
    }

    groups.sort_by(|a, b| b.1.cmp(&a.1));

    let total = groups.len();
    let hidden = total.saturating_sub(TOP_MATCHES_LIMIT);
    let ranked = groups
        .into_iter()
        .take(TOP_MATCHES_LIMIT)
        .map(|(record, count)| RankedCandidate {
            record: record.clone(),
            occurrences_in_database: count,
        })
        .collect();

    MatchResult::Match {
        ranked_candidates: ranked,
        hidden_count: hidden,
        total_distinct_combinations: total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(app: &str, os: &str) -> FingerprintRecord {
        FingerprintRecord {
            application: app.to_string(),
            library: String::new(),
            device: String::new(),
            os: os.to_string(),
            user_agent: String::new(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_single_record_bucket() {
        let bucket = vec![record("App1", "Linux")];
        let result = rank_candidates(&bucket);

        match result {
            MatchResult::Match {
                ranked_candidates,
                hidden_count,
                total_distinct_combinations,
            } => {
                assert_eq!(ranked_candidates.len(), 1);
                assert_eq!(ranked_candidates[0].occurrences_in_database, 1);
                assert_eq!(ranked_candidates[0].record.application, "App1");
                assert_eq!(hidden_count, 0);
                assert_eq!(total_distinct_combinations, 1);
            }
            MatchResult::Unknown { .. } => panic!("expected match"),
        }
    }

    #[test]
    fn test_frequency_ranking() {
        // "Firefox" appears twice, should outrank "curl" despite later first
        // occurrence of its second instance
        let bucket = vec![
            record("curl", "Linux"),
            record("Firefox", "Windows"),
            record("Firefox", "Windows"),
        ];

        match rank_candidates(&bucket) {
            MatchResult::Match {
                ranked_candidates, ..
            } => {
                assert_eq!(ranked_candidates[0].record.application, "Firefox");
                assert_eq!(ranked_candidates[0].occurrences_in_database, 2);
                assert_eq!(ranked_candidates[1].record.application, "curl");
                assert_eq!(ranked_candidates[1].occurrences_in_database, 1);
            }
            MatchResult::Unknown { .. } => panic!("expected match"),
        }
    }

    #[test]
    fn test_ties_keep_first_occurrence_order() {
        let bucket = vec![
            record("Zebra", "Linux"),
            record("Alpha", "Linux"),
            record("Mango", "Linux"),
        ];

        match rank_candidates(&bucket) {
            MatchResult::Match {
                ranked_candidates, ..
            } => {
                let apps: Vec<&str> = ranked_candidates
                    .iter()
                    .map(|c| c.record.application.as_str())
                    .collect();
                assert_eq!(apps, vec!["Zebra", "Alpha", "Mango"]);
            }
            MatchResult::Unknown { .. } => panic!("expected match"),
        }
    }

    #[test]
    fn test_results_capped_with_hidden_count() {
        let bucket: Vec<FingerprintRecord> =
            (0..7).map(|i| record(&format!("App{i}"), "Linux")).collect();

        match rank_candidates(&bucket) {
            MatchResult::Match {
                ranked_candidates,
                hidden_count,
                total_distinct_combinations,
            } => {
                assert_eq!(ranked_candidates.len(), 5);
                assert_eq!(hidden_count, 2);
                assert_eq!(total_distinct_combinations, 7);
            }
            MatchResult::Unknown { .. } => panic!("expected match"),
        }
    }

    #[test]
    fn test_identical_records_differing_in_metadata_split_groups() {
        // Same application, different OS: two distinct combinations
        let bucket = vec![record("App1", "Linux"), record("App1", "Windows")];

        match rank_candidates(&bucket) {
            MatchResult::Match {
                total_distinct_combinations,
                ..
            } => assert_eq!(total_distinct_combinations, 2),
            MatchResult::Unknown { .. } => panic!("expected match"),
        }
    }

    #[test]
    fn test_match_serializes_with_payload_keys() {
        let result = rank_candidates(&[record("App1", "Linux")]);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["result"], "match");
        assert_eq!(json["top_matches"][0]["Application"], "App1");
        assert_eq!(json["top_matches"][0]["occurrences_in_database"], 1);
        assert_eq!(json["additional_results_count"], 0);
        assert_eq!(json["total_unique_combinations_found"], 1);
    }

    #[test]
    fn test_unknown_serialization_omits_absent_reason() {
        let bare = MatchResult::Unknown { reason: None };
        let json = serde_json::to_value(&bare).unwrap();
        assert_eq!(json["result"], "unknown");
        assert!(json.get("reason").is_none());

        let with_reason = MatchResult::Unknown {
            reason: Some("Missing required JA4 string".to_string()),
        };
        let json = serde_json::to_value(&with_reason).unwrap();
        assert_eq!(json["reason"], "Missing required JA4 string");
    }
}
