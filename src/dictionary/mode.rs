// Mode policy - strictness modes and composite key construction
//
// The same key construction runs at index build time and at query time; any
// asymmetry between the two would be a correctness bug.

use crate::constants::KEY_SEPARATOR;
use crate::dictionary::record::{normalize, DatabaseRow, FingerprintQuery};
use crate::error::DictionaryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Strictness mode controlling which fingerprint components form the key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Match strictly on the JA4 string (TLS client properties).
    /// Less specific, finds more generic matches.
    Ja4Only,
    /// Match on the combined JA4 (client) and JA4S (server) strings.
    /// Highly specific to a particular client-server interaction.
    Ja4Ja4s,
    /// Match on all three components combined. Extremely rigid; only
    /// matches exact replicas of observed traffic.
    Ja4Ja4sJa4ts,
}

impl MatchMode {
    /// Build the composite index key for a set of components, or `None` when
    /// the mode's presence requirement is not met.
    ///
    /// Components that are part of the mode's key shape but empty on a given
    /// row keep their position as empty placeholders (e.g. `"abc|"`).
    pub fn build_key(&self, components: &KeyComponents) -> Option<String> {
        let KeyComponents { ja4, ja4s, ja4ts } = components;
        match self {
            MatchMode::Ja4Only => {
                if ja4.is_empty() {
                    return None;
                }
                Some(ja4.clone())
            }
            MatchMode::Ja4Ja4s => {
                if ja4.is_empty() && ja4s.is_empty() {
                    return None;
                }
                Some(format!("{ja4}{KEY_SEPARATOR}{ja4s}"))
            }
            MatchMode::Ja4Ja4sJa4ts => {
                if ja4.is_empty() && ja4s.is_empty() && ja4ts.is_empty() {
                    return None;
                }
                Some(format!(
                    "{ja4}{KEY_SEPARATOR}{ja4s}{KEY_SEPARATOR}{ja4ts}"
                ))
            }
        }
    }

    /// Reason reported when a query lacks the components this mode requires
    pub fn missing_reason(&self) -> &'static str {
        match self {
            MatchMode::Ja4Only => "Missing required JA4 string",
            MatchMode::Ja4Ja4s => "Missing required JA4 or JA4S strings for this mode",
            MatchMode::Ja4Ja4sJa4ts => "Missing required strings for this mode",
        }
    }
}

impl FromStr for MatchMode {
    type Err = DictionaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ja4_only" => Ok(MatchMode::Ja4Only),
            "ja4_ja4s" => Ok(MatchMode::Ja4Ja4s),
            "ja4_ja4s_ja4ts" => Ok(MatchMode::Ja4Ja4sJa4ts),
            other => Err(DictionaryError::Configuration {
                mode: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchMode::Ja4Only => "ja4_only",
            MatchMode::Ja4Ja4s => "ja4_ja4s",
            MatchMode::Ja4Ja4sJa4ts => "ja4_ja4s_ja4ts",
        };
        f.write_str(name)
    }
}

/// Trimmed raw fingerprint components with the JA4TS→JA4T fallback applied.
///
/// Built the same way from database rows and from queries so that equal raw
/// components always produce equal keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyComponents {
    pub ja4: String,
    pub ja4s: String,
    pub ja4ts: String,
}

impl KeyComponents {
    pub fn new(
        ja4: Option<&str>,
        ja4s: Option<&str>,
        ja4ts: Option<&str>,
        ja4t: Option<&str>,
    ) -> Self {
        let ja4ts = {
            let primary = normalize(ja4ts);
            if primary.is_empty() {
                normalize(ja4t)
            } else {
                primary
            }
        };
        Self {
            ja4: normalize(ja4),
            ja4s: normalize(ja4s),
            ja4ts,
        }
    }

    pub fn from_row(row: &DatabaseRow) -> Self {
        Self::new(
            row.ja4_fingerprint.as_deref(),
            row.ja4s_fingerprint.as_deref(),
            row.ja4ts_fingerprint.as_deref(),
            row.ja4t_fingerprint.as_deref(),
        )
    }

    pub fn from_query(query: &FingerprintQuery) -> Self {
        Self::new(
            query.ja4.as_deref(),
            query.ja4s.as_deref(),
            query.ja4ts.as_deref(),
            query.ja4t.as_deref(),
        )
    }
}
