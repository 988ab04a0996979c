//! # Pagination Engine
//!
//! Expands stocked items into individual physical labels and partitions them
//! into fixed-capacity pages.
//!
//! ## Two-Step Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Pagination Pipeline                                │
//! │                                                                         │
//! │  Snapshot items:   [A×2, B×1, C×3]                                     │
//! │       │                                                                 │
//! │       ▼  Step 1: expansion (stable, order-preserving)                   │
//! │  Physical labels:  [A, A, B, C, C, C]                                  │
//! │       │                                                                 │
//! │       ▼  Step 2: positional chunking (at most 9 per page)               │
//! │  Pages:            [[A, A, B, C, C, C]]                                │
//! │                                                                         │
//! │  page[i] = expanded[9i .. min(9i+9, N)]                                │
//! │                                                                         │
//! │  No bin-packing, no reordering: determinism and input-order            │
//! │  preservation take priority over page-fill efficiency.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::types::LineItem;
use crate::LABELS_PER_PAGE;

// =============================================================================
// Page
// =============================================================================

/// A group of at most [`LABELS_PER_PAGE`] physical labels for one print
/// sheet.
///
/// Labels borrow the underlying records: every repetition of a quantity-k
/// item references the same [`LineItem`].
#[derive(Debug, Clone)]
pub struct Page<'a> {
    labels: Vec<&'a LineItem>,
}

impl<'a> Page<'a> {
    /// The labels on this page, in row-major fill order.
    pub fn labels(&self) -> &[&'a LineItem] {
        &self.labels
    }

    /// Number of filled cells on this page (1..=9).
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Checks if the page has no labels. Pages built by [`paginate`] always
    /// hold at least one.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

// =============================================================================
// Expansion
// =============================================================================

/// Expands items into physical labels: each item repeated `quantity` times,
/// contiguously, preserving queue order.
pub fn expand(items: &[LineItem]) -> Vec<&LineItem> {
    let total: usize = items.iter().map(|i| i.quantity as usize).sum();
    let mut labels = Vec::with_capacity(total);
    for item in items {
        for _ in 0..item.quantity {
            labels.push(item);
        }
    }
    labels
}

// =============================================================================
// Chunking
// =============================================================================

/// Partitions items into pages of at most [`LABELS_PER_PAGE`] physical
/// labels.
///
/// ## Guarantees
/// - Exactly ⌈N/9⌉ pages for N physical labels
/// - All pages except the last hold exactly 9 labels
/// - Concatenating all pages in order reconstructs the expansion exactly
/// - Empty input yields zero pages
pub fn paginate(items: &[LineItem]) -> Vec<Page<'_>> {
    expand(items)
        .chunks(LABELS_PER_PAGE)
        .map(|chunk| Page {
            labels: chunk.to_vec(),
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::Price;

    fn item(name: &str, quantity: u32) -> LineItem {
        LineItem {
            name: name.to_string(),
            description: String::new(),
            unit_price: Price::new(100_000),
            quantity,
        }
    }

    #[test]
    fn test_expansion_repeats_contiguously() {
        let items = vec![item("A", 2), item("B", 1), item("C", 3)];
        let labels = expand(&items);

        let names: Vec<&str> = labels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["A", "A", "B", "C", "C", "C"]);
    }

    #[test]
    fn test_expansion_references_same_record() {
        let items = vec![item("A", 3)];
        let labels = expand(&items);

        assert!(labels.iter().all(|l| std::ptr::eq(*l, &items[0])));
    }

    #[test]
    fn test_quantity_three_yields_three_labels() {
        let items = vec![item("LaptopX", 3)];
        assert_eq!(expand(&items).len(), 3);
    }

    #[test]
    fn test_empty_input_yields_zero_pages() {
        assert!(paginate(&[]).is_empty());
    }

    #[test]
    fn test_ten_singles_split_nine_one() {
        let items: Vec<LineItem> = (0..10).map(|i| item(&format!("I{}", i), 1)).collect();
        let pages = paginate(&items);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 9);
        assert_eq!(pages[1].len(), 1);
    }

    #[test]
    fn test_page_count_is_ceil_n_over_nine() {
        for n in 1..40u32 {
            let items = vec![item("A", n)];
            let pages = paginate(&items);
            let expected = (n as usize + LABELS_PER_PAGE - 1) / LABELS_PER_PAGE;
            assert_eq!(pages.len(), expected, "n = {}", n);

            // All pages but the last are full
            for page in &pages[..pages.len() - 1] {
                assert_eq!(page.len(), LABELS_PER_PAGE);
            }
        }
    }

    #[test]
    fn test_concatenation_reconstructs_expansion() {
        let items = vec![item("A", 7), item("B", 5), item("C", 11)];
        let expanded: Vec<&str> = expand(&items).iter().map(|l| l.name.as_str()).collect();

        let pages = paginate(&items);
        let rejoined: Vec<&str> = pages
            .iter()
            .flat_map(|p| p.labels().iter().map(|l| l.name.as_str()))
            .collect();

        assert_eq!(rejoined, expanded);
    }
}
