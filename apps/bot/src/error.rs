//! # Bot Error Type
//!
//! Unified error type for the orchestration layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tagpress                               │
//! │                                                                         │
//! │  CoreError ───────┐                                                     │
//! │  (parse, export)  │                                                     │
//! │                   ├──► BotError ──► user_message() ──► chat reply      │
//! │  StoreError ──────┤        │                                            │
//! │  (blob I/O)       │        └──► tracing::warn! with full detail        │
//! │                   │                                                     │
//! │  RasterizerError ─┘                                                     │
//! │  (PDF rendering)                                                        │
//! │                                                                         │
//! │  The session state machine never sees these: a failed effect leaves    │
//! │  the session exactly where it was, so the user can retry.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::rasterizer::RasterizerError;
use tagpress_core::CoreError;
use tagpress_store::StoreError;

/// Errors produced while executing a session effect or running the app.
#[derive(Debug, Error)]
pub enum BotError {
    /// Pure-logic failure (parsing, encoding, decoding).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Blob store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// PDF rendering failure.
    #[error(transparent)]
    Rasterizer(#[from] RasterizerError),

    /// Rendering exceeded the configured deadline.
    #[error("Rendering timed out after {0} seconds")]
    RenderTimeout(u64),

    /// Console transport I/O failure.
    #[error("Console I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Startup configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BotError {
    /// A short message safe to show the user in a chat reply.
    ///
    /// Full error detail goes to the log; the user gets enough to know
    /// whether retrying makes sense.
    pub fn user_message(&self) -> String {
        match self {
            BotError::Core(err) => format!("{err}."),
            BotError::Store(_) => {
                "Couldn't reach storage. Nothing was lost - try again.".to_string()
            }
            BotError::Rasterizer(_) => {
                "PDF rendering failed. The snapshot is still saved - try generating again."
                    .to_string()
            }
            BotError::RenderTimeout(secs) => format!(
                "PDF rendering took longer than {secs} seconds and was cancelled. \
                 The snapshot is still saved - try again."
            ),
            BotError::Io(_) | BotError::Config(_) => "Internal error.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_pass_their_message_through() {
        let err = BotError::from(CoreError::EmptyQueue);
        assert!(err.user_message().contains("empty"));
    }

    #[test]
    fn test_store_errors_are_not_leaked_verbatim() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "/secret/path denied");
        let err = BotError::from(StoreError::WriteFailed {
            name: "x.json".to_string(),
            source: io,
        });
        assert!(!err.user_message().contains("/secret/path"));
        assert!(err.user_message().contains("try again"));
    }

    #[test]
    fn test_timeout_message_names_the_deadline() {
        assert!(BotError::RenderTimeout(60).user_message().contains("60"));
    }
}
