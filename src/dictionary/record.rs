// Fingerprint record store - typed rows and normalized metadata entries

use serde::{Deserialize, Serialize};

/// Raw row of a reference database or labeled dataset file.
///
/// All fields are optional in the source JSON; absent and null are treated
/// identically. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatabaseRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ja4_fingerprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ja4s_fingerprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ja4ts_fingerprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ja4t_fingerprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Query-side fingerprint components.
///
/// Field names follow the raw-capture JSON shape (`ja4`, not
/// `ja4_fingerprint`). `ja4t` is accepted as a fallback for `ja4ts`, applied
/// by the mode policy identically to index build time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintQuery {
    #[serde(default)]
    pub ja4: Option<String>,
    #[serde(default)]
    pub ja4s: Option<String>,
    #[serde(default)]
    pub ja4ts: Option<String>,
    #[serde(default)]
    pub ja4t: Option<String>,
}

impl FingerprintQuery {
    /// Build a query from the fingerprint columns of a dataset row
    pub fn from_row(row: &DatabaseRow) -> Self {
        Self {
            ja4: row.ja4_fingerprint.clone(),
            ja4s: row.ja4s_fingerprint.clone(),
            ja4ts: row.ja4ts_fingerprint.clone(),
            ja4t: row.ja4t_fingerprint.clone(),
        }
    }
}

/// Normalized, immutable metadata entry stored in an index bucket.
///
/// Two records are identical iff all six fields compare equal. Serialized
/// field names match the prediction payload schema consumed by the
/// comparison tooling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FingerprintRecord {
    #[serde(rename = "Application")]
    pub application: String,
    #[serde(rename = "Library")]
    pub library: String,
    #[serde(rename = "Device")]
    pub device: String,
    #[serde(rename = "OS")]
    pub os: String,
    #[serde(rename = "UserAgent")]
    pub user_agent: String,
    #[serde(rename = "Notes")]
    pub notes: String,
}

impl FingerprintRecord {
    /// Extract the normalized metadata of a raw database row.
    ///
    /// Null/missing values become the empty string; surrounding whitespace
    /// is trimmed. Empty metadata is stored as-is, never rejected.
    pub fn from_row(row: &DatabaseRow) -> Self {
        Self {
            application: normalize(row.application.as_deref()),
            library: normalize(row.library.as_deref()),
            device: normalize(row.device.as_deref()),
            os: normalize(row.os.as_deref()),
            user_agent: normalize(row.user_agent_string.as_deref()),
            notes: normalize(row.notes.as_deref()),
        }
    }
}

/// Trim-normalize an optional raw field into an owned string
pub(crate) fn normalize(value: Option<&str>) -> String {
    value.unwrap_or_default().trim().to_string()
}
