// Error types for ja4dict
//
// This module provides structured error types using thiserror so callers can
// match exhaustively on failure kinds instead of inspecting strings.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dictionary engine operations
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// Unsupported strictness mode supplied at construction
    #[error("Invalid mode '{mode}'. Must be one of: ja4_only, ja4_ja4s, ja4_ja4s_ja4ts")]
    Configuration { mode: String },

    /// Backing database or dataset file does not exist
    #[error("Database file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// File exists but its JSON payload could not be parsed
    #[error("Failed to parse JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// I/O error reading or writing a file
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for dictionary engine operations
pub type Result<T> = std::result::Result<T, DictionaryError>;
