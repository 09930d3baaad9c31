//! Error types for ShelfKV
//!
//! Provides a unified error type for all catalog operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using ShelfError
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Unified error type for ShelfKV operations
#[derive(Debug, Error)]
pub enum ShelfError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Backing Document Errors
    // -------------------------------------------------------------------------
    #[error("Store file {} not found", .path.display())]
    StoreMissing { path: PathBuf },

    #[error("Failed to decode store file {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Catalog Errors
    // -------------------------------------------------------------------------
    #[error("Book with ID {id} not found")]
    NotFound { id: u64 },

    #[error("No ids left: highest id {last} cannot be incremented")]
    IdExhausted { last: u64 },

    #[error("Store is empty")]
    EmptyCollection,

    #[error("Invalid status '{0}': expected 'available' or 'checked_out'")]
    InvalidStatus(String),

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ShelfError {
    /// Expected catalog conditions that callers report and move on from.
    ///
    /// Everything else (I/O faults, serialization, bad configuration) is a
    /// real failure.
    pub fn is_store_condition(&self) -> bool {
        matches!(
            self,
            ShelfError::StoreMissing { .. }
                | ShelfError::Decode { .. }
                | ShelfError::NotFound { .. }
                | ShelfError::EmptyCollection
                | ShelfError::IdExhausted { .. }
                | ShelfError::InvalidStatus(_)
        )
    }
}
