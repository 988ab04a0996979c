//! # tagpress-store: Blob Storage Layer for Tagpress
//!
//! Flat-file persistence for everything Tagpress produces: structured and
//! tabular snapshot exports plus rendered print documents.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   tagpress-core ──(bytes)──► bot app ──(write/read/list)──► THIS CRATE │
//! │                                                                         │
//! │   The store is byte-oriented: it never encodes, decodes, or inspects   │
//! │   blob contents. Categories partition the root directory; names are    │
//! │   validated so user input can never escape it.                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`blob`] - The [`BlobStore`] trait and filesystem implementation
//! - [`error`] - Storage error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod blob;
pub mod error;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use blob::{BlobStore, Category, FsBlobStore};
pub use error::{StoreError, StoreResult};
