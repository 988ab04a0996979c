//! # tagpress-core: Pure Business Logic for Tagpress
//!
//! This crate is the **heart** of Tagpress. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Tagpress Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Chat Transport (bot app)                       │   │
//! │  │     inbound messages ──► events; replies/menus ──► outbound    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Event / Step                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ tagpress-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  session  │  │  parser   │  │pagination │  │  layout   │  │   │
//! │  │   │  Session  │  │  records  │  │  expand   │  │ HTML 3×3  │  │   │
//! │  │   │   Step    │  │ quantity  │  │ paginate  │  │   grid    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                 │   │
//! │  │   │   types   │  │   price   │  │  export   │                 │   │
//! │  │   │ LineItem  │  │   Price   │  │ CSV/JSON  │                 │   │
//! │  │   │ Snapshot  │  │ RP format │  │ encoders  │                 │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILESYSTEM • NO SUBPROCESS • PURE FUNCTIONS      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │         tagpress-store (blob store) + rasterizer (bot app)      │   │
//! │  │        flat-file persistence, headless-browser PDF render       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ParsedRecord, LineItem, Snapshot)
//! - [`price`] - Integer price type with Indonesian tag formatting
//! - [`parser`] - Record block / quantity parsing and label sanitizing
//! - [`session`] - Per-user conversational state machine
//! - [`pagination`] - Quantity expansion and 9-per-page chunking
//! - [`layout`] - Print-ready HTML rendering (A4 landscape, 3×3 grid)
//! - [`export`] - CSV and JSON snapshot encoders
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Filesystem, subprocess, network access is FORBIDDEN here
//! 3. **Integer Prices**: All monetary values are whole rupiah (u64), never floats
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Effects, not actions**: the session returns [`session::Step`] values
//!    describing what to do; the app layer performs the I/O and commits
//!
//! ## Example Usage
//!
//! ```rust
//! use tagpress_core::parser::parse_record;
//! use tagpress_core::pagination::paginate;
//! use tagpress_core::layout::render_document;
//!
//! let record = parse_record("LaptopX\nRAM 8GB\nRp 4.500.000,-").unwrap();
//! let items = vec![record.with_quantity(3)];
//!
//! // 3 physical labels fit on a single 3×3 sheet
//! let pages = paginate(&items);
//! assert_eq!(pages.len(), 1);
//!
//! let html = render_document(&pages);
//! assert!(html.contains("RP 4.500.000,-"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod export;
pub mod layout;
pub mod pagination;
pub mod parser;
pub mod price;
pub mod session;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tagpress_core::Session` instead of
// `use tagpress_core::session::Session`

pub use error::{CoreError, CoreResult};
pub use price::Price;
pub use session::{Event, MenuAction, Reply, Session, SessionState, Step};
pub use types::{LineItem, ParsedRecord, Snapshot};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Physical labels per printed sheet.
///
/// ## Why a constant?
/// The stylesheet in [`layout`] hard-codes a 3×3 grid of fixed-size cells;
/// the page capacity must match it exactly or labels would overflow the
/// sheet. Always equals [`GRID_COLUMNS`] × [`GRID_ROWS`].
pub const LABELS_PER_PAGE: usize = 9;

/// Columns in the printed label grid.
pub const GRID_COLUMNS: usize = 3;

/// Rows in the printed label grid.
pub const GRID_ROWS: usize = 3;

/// Maximum archived snapshots offered in one browse listing.
///
/// ## Why a constant?
/// Chat menus degrade badly past a handful of buttons; the archive listing
/// shows the most recent entries only, newest first.
pub const ARCHIVE_BROWSE_LIMIT: usize = 10;
