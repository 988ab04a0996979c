//! # Error Types
//!
//! Domain-specific error types for tagpress-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tagpress-core errors (this file)                                      │
//! │  └── CoreError        - Parsing and session rule violations            │
//! │                                                                         │
//! │  tagpress-store errors (separate crate)                                │
//! │  └── StoreError       - Blob store read/write/list failures            │
//! │                                                                         │
//! │  Bot app errors                                                        │
//! │  ├── RasterizerError  - External HTML→PDF renderer failures            │
//! │  └── BotError         - Wraps all of the above, maps to reply text     │
//! │                                                                         │
//! │  Flow: CoreError/StoreError/RasterizerError → BotError → user reply    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants, never String
//! 3. Each error variant maps to a user-facing message
//! 4. Recoverable failures leave session state unchanged

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent rule violations in parsing or session flow. They are all
/// recoverable: the session re-prompts or guides the user, never aborts.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A raw record block could not be parsed into a line item.
    ///
    /// ## When This Occurs
    /// - Fewer than 2 non-blank lines in the block (need at least a name
    ///   line and a price line)
    ///
    /// ## Recovery
    /// The session stays in its current state and re-prompts with guidance.
    /// Note: a price line without digits is NOT malformed — it degrades to
    /// a zero price instead of blocking the flow.
    #[error("Malformed record: {reason}")]
    MalformedRecord { reason: String },

    /// A save was requested while the queue is empty.
    ///
    /// ## Recovery
    /// User is guided to add data first.
    #[error("Queue is empty, nothing to save")]
    EmptyQueue,

    /// Generation was requested without a committed snapshot.
    ///
    /// ## Recovery
    /// User is guided to save before generating. Session state unchanged.
    #[error("No snapshot available, save before generating")]
    MissingSnapshot,

    /// An export encoder failed to produce bytes.
    ///
    /// ## When This Occurs
    /// - CSV writer flush failure (should not happen for in-memory buffers)
    /// - JSON serialization failure
    #[error("Export encoding failed: {0}")]
    ExportFailed(String),

    /// A snapshot blob could not be decoded back into a Snapshot.
    ///
    /// ## When This Occurs
    /// - Archive file was corrupted or hand-edited
    /// - Archive file predates a snapshot format change
    #[error("Snapshot decode failed: {0}")]
    SnapshotDecodeFailed(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::MalformedRecord {
            reason: "need at least a name line and a price line".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed record: need at least a name line and a price line"
        );

        assert_eq!(
            CoreError::EmptyQueue.to_string(),
            "Queue is empty, nothing to save"
        );
        assert_eq!(
            CoreError::MissingSnapshot.to_string(),
            "No snapshot available, save before generating"
        );
    }
}
