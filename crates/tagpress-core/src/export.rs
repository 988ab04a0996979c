//! # Export Encoders
//!
//! Two independent, order-preserving encoders over the same snapshot.
//!
//! ## Encoder Outputs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Export Encoders                                   │
//! │                                                                         │
//! │  Snapshot ──┬──► encode_csv  ──► tabular bytes (one row per item,      │
//! │             │                     newlines in descriptions flattened    │
//! │             │                     to spaces, fields quoted as needed)   │
//! │             │                                                           │
//! │             └──► encode_json ──► structured bytes (self-describing     │
//! │                                   document: who, label, when, items    │
//! │                                   verbatim with multi-line specs)      │
//! │                                                                         │
//! │  The JSON document doubles as the snapshot blob format, so archive     │
//! │  browsing decodes it back with decode_snapshot.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both encoders are pure functions of the snapshot. Blob-store write
//! failures belong to the caller and are never retried here.

use crate::error::{CoreError, CoreResult};
use crate::types::Snapshot;

// =============================================================================
// Tabular Encoder (CSV)
// =============================================================================

/// Encodes the snapshot's item list as CSV.
///
/// ## Format
/// - Header row: `name,description,unit_price,quantity`
/// - One row per line item, in queue order
/// - Embedded newlines in descriptions replaced by single spaces
/// - Quoting/escaping of embedded commas handled by the `csv` crate
pub fn encode_csv(snapshot: &Snapshot) -> CoreResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["name", "description", "unit_price", "quantity"])
        .map_err(|e| CoreError::ExportFailed(e.to_string()))?;

    for item in &snapshot.items {
        writer
            .write_record([
                item.name.as_str(),
                &item.description.replace('\n', " "),
                &item.unit_price.amount().to_string(),
                &item.quantity.to_string(),
            ])
            .map_err(|e| CoreError::ExportFailed(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| CoreError::ExportFailed(e.to_string()))
}

// =============================================================================
// Structured Encoder (JSON)
// =============================================================================

/// Encodes the snapshot as a pretty-printed, self-describing JSON document:
/// originating display name, snapshot label and id, generation timestamp,
/// and the ordered item list verbatim (multi-line descriptions intact).
pub fn encode_json(snapshot: &Snapshot) -> CoreResult<Vec<u8>> {
    serde_json::to_vec_pretty(snapshot).map_err(|e| CoreError::ExportFailed(e.to_string()))
}

/// Decodes a snapshot blob written by [`encode_json`].
///
/// Used when loading historical snapshots from the archive.
pub fn decode_snapshot(bytes: &[u8]) -> CoreResult<Snapshot> {
    serde_json::from_slice(bytes).map_err(|e| CoreError::SnapshotDecodeFailed(e.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================
