//! # Domain Types
//!
//! Core domain types used throughout Tagpress.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ParsedRecord   │   │    LineItem     │   │    Snapshot     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │──►│  name           │──►│  id (UUID)      │       │
//! │  │  description    │   │  description    │   │  label          │       │
//! │  │  unit_price     │   │  unit_price     │   │  generated_by   │       │
//! │  │  (no quantity   │   │  quantity ≥ 1   │   │  generated_at   │       │
//! │  │   yet)          │   │                 │   │  items          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ParsedRecord + quantity = LineItem                                     │
//! │  Vec<LineItem> frozen at save time = Snapshot                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! A snapshot has:
//! - `id`: UUID v4 - immutable, globally unique
//! - `label`: sanitized human-readable name - addresses the blob on disk

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::price::Price;

// =============================================================================
// Parsed Record
// =============================================================================

/// A record parsed from a raw text block, awaiting its quantity.
///
/// This is the session's pending item: the two-step elicitation asks for the
/// spec block first and the print-run count second, so the same record can be
/// requested in variable runs without re-entering specs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRecord {
    /// Product name (first non-blank line of the block). Never empty.
    pub name: String,

    /// Spec lines joined with newlines. May be empty when the block had
    /// exactly two lines.
    pub description: String,

    /// Unit price extracted from the last line's digit run (zero when the
    /// line carried no digits).
    pub unit_price: Price,
}

impl ParsedRecord {
    /// Completes the record with a quantity, producing an immutable line item.
    pub fn with_quantity(self, quantity: u32) -> LineItem {
        LineItem {
            name: self.name,
            description: self.description,
            unit_price: self.unit_price,
            quantity: quantity.max(1),
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One logical product record before quantity expansion.
///
/// ## Invariants
/// - `name` is non-empty
/// - `quantity >= 1`
/// - Immutable once appended to a queue (edits require re-adding)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Display name shown on the tag's title band.
    pub name: String,

    /// Multi-line spec text. Each line renders as a separate marked line.
    pub description: String,

    /// Unit price printed on the tag's price band.
    pub unit_price: Price,

    /// Number of physical labels to print for this record.
    pub quantity: u32,
}

impl LineItem {
    /// Iterates the description's individual lines.
    ///
    /// An empty description yields no lines (rather than one empty line).
    pub fn description_lines(&self) -> impl Iterator<Item = &str> {
        self.description
            .split('\n')
            .filter(|_| !self.description.is_empty())
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// An immutable, named copy of the queue taken at save time.
///
/// The snapshot is the unit of durability and the unit that pagination and
/// the export encoders consume. Generation never operates on the live
/// mutable queue — only on a committed snapshot. Serialized as-is, this type
/// is also the structured export and the archive blob format, so archive
/// browsing round-trips through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Sanitized human-readable label; addresses the blob on disk.
    pub label: String,

    /// Display name of the user who saved the snapshot.
    pub generated_by: String,

    /// When the snapshot was taken.
    pub generated_at: DateTime<Utc>,

    /// The frozen, ordered item list.
    pub items: Vec<LineItem>,
}

impl Snapshot {
    /// Takes a snapshot of the given queue.
    ///
    /// ## Immutability
    /// The items are deep-copied: mutating the live queue afterwards never
    /// changes a previously taken snapshot's content.
    pub fn take(generated_by: &str, label: &str, items: &[LineItem]) -> Self {
        Snapshot {
            id: Uuid::new_v4().to_string(),
            label: label.to_string(),
            generated_by: generated_by.to_string(),
            generated_at: Utc::now(),
            items: items.to_vec(),
        }
    }

    /// Checks if the snapshot holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of logical records (before quantity expansion).
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of physical labels (after quantity expansion).
    pub fn label_count(&self) -> usize {
        self.items.iter().map(|i| i.quantity as usize).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, quantity: u32) -> LineItem {
        LineItem {
            name: name.to_string(),
            description: "RAM 8GB\nSSD 256GB".to_string(),
            unit_price: Price::new(4_500_000),
            quantity,
        }
    }

    #[test]
    fn test_with_quantity_floors_at_one() {
        let parsed = ParsedRecord {
            name: "LaptopX".to_string(),
            description: String::new(),
            unit_price: Price::zero(),
        };
        let item = parsed.with_quantity(0);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_description_lines() {
        let item = item("LaptopX", 1);
        let lines: Vec<&str> = item.description_lines().collect();
        assert_eq!(lines, vec!["RAM 8GB", "SSD 256GB"]);

        let empty = LineItem {
            description: String::new(),
            ..item
        };
        assert_eq!(empty.description_lines().count(), 0);
    }

    #[test]
    fn test_snapshot_is_deep_copy() {
        let mut queue = vec![item("A", 1), item("B", 2)];
        let snapshot = Snapshot::take("Budi", "stok_april", &queue);

        // Mutate the live queue after the snapshot is taken
        queue.push(item("C", 3));
        queue[0].quantity = 99;

        assert_eq!(snapshot.item_count(), 2);
        assert_eq!(snapshot.items[0].quantity, 1);
        assert_eq!(snapshot.label_count(), 3);
    }

    #[test]
    fn test_snapshot_counts() {
        let snapshot = Snapshot::take("Budi", "x", &[item("A", 3), item("B", 1)]);
        assert_eq!(snapshot.item_count(), 2);
        assert_eq!(snapshot.label_count(), 4);
        assert!(!snapshot.is_empty());

        let empty = Snapshot::take("Budi", "y", &[]);
        assert!(empty.is_empty());
        assert_eq!(empty.label_count(), 0);
    }
}
