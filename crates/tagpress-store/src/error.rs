//! # Storage Error Types
//!
//! Error types for blob store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Filesystem Error (std::io::Error)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds operation context and blob name       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BotError (bot app) ← Mapped to a user-facing reply                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Blob store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Blob name rejected before touching the filesystem.
    ///
    /// ## When This Occurs
    /// - Name is empty
    /// - Name contains a path separator or traversal component
    #[error("Invalid blob name: '{name}'")]
    InvalidName { name: String },

    /// No blob with this name exists in the category.
    #[error("Blob not found: '{name}'")]
    NotFound { name: String },

    /// Writing the blob failed.
    ///
    /// ## When This Occurs
    /// - Disk full
    /// - Directory permissions issue
    #[error("Failed to write blob '{name}': {source}")]
    WriteFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading the blob failed for a reason other than absence.
    #[error("Failed to read blob '{name}': {source}")]
    ReadFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Listing a category directory failed.
    #[error("Failed to list store directory: {0}")]
    ListFailed(std::io::Error),

    /// Creating the store's directory layout failed.
    #[error("Failed to initialize store at '{path}': {source}")]
    InitFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for blob store operations.
pub type StoreResult<T> = Result<T, StoreError>;
