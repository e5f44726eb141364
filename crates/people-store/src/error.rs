//! Store and reconciliation error types.
//!
//! Store errors carry user-facing messages and optional remediation hints so
//! a caller can report a failed save without crashing the session.

use std::path::PathBuf;
use thiserror::Error;

/// Slot store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O error.
    #[error("Failed to {operation} slot file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key cannot be mapped onto the store.
    #[error("Invalid slot key: {key:?}")]
    InvalidKey { key: String },

    /// The store refuses the operation (disabled or over quota).
    #[error("Store unavailable: {reason}")]
    Unavailable { reason: String },
}

impl StoreError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the saved table at {}", operation, path.display())
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the table to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::InvalidKey { key } => {
                format!("'{key}' cannot be used as a storage key.")
            }
            Self::Unavailable { reason } => {
                format!("Local storage is unavailable: {reason}")
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that you have permission to read the store directory.".into())
                } else {
                    Some("Check that you have permission to write to the store directory.".into())
                }
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or choose a different store directory.".into())
            }
            Self::InvalidKey { .. } => {
                Some("Use only letters, digits, '-', '_' and '.' in keys.".into())
            }
            Self::Unavailable { .. } => None,
        }
    }
}

/// Forest serialization error.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Failed to serialize records")]
    Encode(#[source] serde_json::Error),
    #[error("Failed to deserialize records")]
    Decode(#[source] serde_json::Error),
    /// A salary is NaN or infinite and has no JSON encoding.
    #[error("Record {id} has a non-finite salary")]
    NonFiniteSalary { id: String },
}

/// Reconciler error.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The slot could not be read.
    #[error("Failed to read slot {key}")]
    StoreRead {
        key: String,
        #[source]
        source: StoreError,
    },

    /// The slot holds content that does not decode as a forest.
    #[error("Slot {key} holds corrupt content")]
    CorruptSlot {
        key: String,
        #[source]
        source: CodecError,
    },

    /// The slot could not be written. In-memory state already reflects the
    /// change and remains authoritative.
    #[error("Failed to write slot {key}")]
    StoreWrite {
        key: String,
        #[source]
        source: StoreError,
    },

    /// The forest could not be serialized.
    #[error("Failed to encode records")]
    Encode(#[source] CodecError),

    /// A replacement record was refused before it reached the forest.
    #[error("Record {id} rejected: {reason}")]
    InvalidRecord { id: String, reason: String },

    /// Reload was asked for while the slot lags behind in-memory state.
    #[error("Slot {key} has unsaved changes")]
    UnsavedChanges {
        key: String,
        #[source]
        source: Box<ReconcileError>,
    },
}

impl ReconcileError {
    /// Returns true when the failure left unsaved in-memory changes.
    pub fn is_unsaved_change(&self) -> bool {
        matches!(
            self,
            Self::StoreWrite { .. } | Self::Encode(_) | Self::UnsavedChanges { .. }
        )
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::StoreRead { source, .. } | Self::StoreWrite { source, .. } => {
                source.user_message()
            }
            Self::CorruptSlot { key, .. } => {
                format!("The saved table in '{key}' could not be read. It may be corrupted.")
            }
            Self::Encode(_) => "An error occurred while saving the table data.".to_string(),
            Self::InvalidRecord { id, reason } => {
                format!("Record {id} was not changed: {reason}.")
            }
            Self::UnsavedChanges { source, .. } => {
                format!("The table was not reloaded. {}", source.user_message())
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::StoreRead { source, .. } | Self::StoreWrite { source, .. } => {
                source.suggestion()
            }
            Self::CorruptSlot { .. } => {
                Some("Reset the store to regenerate the table.".into())
            }
            Self::Encode(_) | Self::InvalidRecord { .. } => None,
            Self::UnsavedChanges { source, .. } => source.suggestion(),
        }
    }
}

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias for reconciler operations.
pub type Result<T> = std::result::Result<T, ReconcileError>;
