//! # Record Parser
//!
//! Turns raw multi-line text blocks into structured records.
//!
//! ## Parsing Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Record Block Layout                                │
//! │                                                                         │
//! │  User sends:                      Parsed as:                            │
//! │  ──────────                       ─────────                             │
//! │  LaptopX                ────────► name                                  │
//! │  RAM 8GB                ──┐                                             │
//! │  SSD 256GB              ──┴─────► description (joined with \n)          │
//! │  Rp 4.500.000,-         ────────► unit_price (digit run: 4500000)      │
//! │                                                                         │
//! │  Blank lines are stripped first. Fewer than 2 remaining lines is a     │
//! │  MalformedRecord. A price line with no digits degrades to 0 instead    │
//! │  of failing - permissive parsing over hard failure for free text.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quantity arrives in a separate follow-up message and is parsed by
//! [`parse_quantity`]: digit run extracted, empty or zero defaults to 1.

use crate::error::{CoreError, CoreResult};
use crate::price::Price;
use crate::types::ParsedRecord;

// =============================================================================
// Record Parsing
// =============================================================================

/// Parses a raw text block into a [`ParsedRecord`].
///
/// ## Contract
/// - Blank lines are stripped
/// - `< 2` non-blank lines → [`CoreError::MalformedRecord`]
/// - First remaining line is the name
/// - Last remaining line's digit run is the unit price (0 when no digits)
/// - Interior lines joined with newlines form the description (may be empty)
///
/// ## Example
/// ```rust
/// use tagpress_core::parser::parse_record;
///
/// let record = parse_record("LaptopX\nRAM 8GB\nSSD 256GB\n4500000").unwrap();
/// assert_eq!(record.name, "LaptopX");
/// assert_eq!(record.description, "RAM 8GB\nSSD 256GB");
/// assert_eq!(record.unit_price.amount(), 4_500_000);
/// ```
pub fn parse_record(text: &str) -> CoreResult<ParsedRecord> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.len() < 2 {
        return Err(CoreError::MalformedRecord {
            reason: "need at least a name line and a price line".to_string(),
        });
    }

    let name = lines[0].to_string();
    let price = Price::new(digit_run(lines[lines.len() - 1]).unwrap_or(0));
    let description = lines[1..lines.len() - 1].join("\n");

    Ok(ParsedRecord {
        name,
        description,
        unit_price: price,
    })
}

/// Parses a quantity from a follow-up message.
///
/// Digit run extracted; empty or zero defaults to 1. Never fails — a
/// nonsensical count should not block the add flow.
///
/// ## Example
/// ```rust
/// use tagpress_core::parser::parse_quantity;
///
/// assert_eq!(parse_quantity("3"), 3);
/// assert_eq!(parse_quantity("x12 sheets"), 12);
/// assert_eq!(parse_quantity("lots"), 1);
/// assert_eq!(parse_quantity("0"), 1);
/// ```
pub fn parse_quantity(text: &str) -> u32 {
    match digit_run(text) {
        Some(0) | None => 1,
        Some(n) => u32::try_from(n).unwrap_or(u32::MAX),
    }
}

/// Extracts the concatenated digit run from a line, discarding every
/// non-digit character.
///
/// `"Rp 1.200.000,-"` → `Some(1200000)`. Returns `None` when the line has no
/// digits at all. Overflowing runs saturate rather than fail.
fn digit_run(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse::<u64>().unwrap_or(u64::MAX))
}

// =============================================================================
// Label Sanitizing
// =============================================================================

/// Sanitizes user-supplied text into a snapshot label safe for use as a
/// blob name.
///
/// ## Rules
/// - Whitespace runs collapse to a single underscore
/// - Only alphanumerics, `-` and `_` survive; everything else is dropped
///   (path separators and dots must never reach the blob store)
/// - An empty result falls back to `"untitled"`
///
/// ## Example
/// ```rust
/// use tagpress_core::parser::sanitize_label;
///
/// assert_eq!(sanitize_label("stok april 2024"), "stok_april_2024");
/// assert_eq!(sanitize_label("../../etc/passwd"), "etcpasswd");
/// assert_eq!(sanitize_label("  "), "untitled");
/// ```
pub fn sanitize_label(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = false;

    for c in text.trim().chars() {
        if c.is_whitespace() {
            if !last_was_space && !out.is_empty() {
                out.push('_');
            }
            last_was_space = true;
        } else if c.is_alphanumeric() || c == '-' || c == '_' {
            out.push(c);
            last_was_space = false;
        } else {
            last_was_space = false;
        }
    }

    let out = out.trim_matches('_').to_string();
    if out.is_empty() {
        "untitled".to_string()
    } else {
        out
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_full_block() {
        let record = parse_record("LaptopX\nRAM 8GB\nSSD 256GB\n4500000").unwrap();
        assert_eq!(record.name, "LaptopX");
        assert_eq!(record.description, "RAM 8GB\nSSD 256GB");
        assert_eq!(record.unit_price.amount(), 4_500_000);
    }

    #[test]
    fn test_parse_record_two_lines_has_empty_description() {
        let record = parse_record("Mouse\n150000").unwrap();
        assert_eq!(record.name, "Mouse");
        assert_eq!(record.description, "");
        assert_eq!(record.unit_price.amount(), 150_000);
    }

    #[test]
    fn test_parse_record_strips_blank_lines() {
        let record = parse_record("\n\nLaptopX\n\n  \nRAM 8GB\n\n4500000\n\n").unwrap();
        assert_eq!(record.name, "LaptopX");
        assert_eq!(record.description, "RAM 8GB");
        assert_eq!(record.unit_price.amount(), 4_500_000);
    }

    #[test]
    fn test_parse_record_too_few_lines_fails() {
        assert!(matches!(
            parse_record("LaptopX"),
            Err(CoreError::MalformedRecord { .. })
        ));
        assert!(matches!(
            parse_record(""),
            Err(CoreError::MalformedRecord { .. })
        ));
        assert!(matches!(
            parse_record("\n  \n\n"),
            Err(CoreError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_price_extraction_ignores_noise() {
        // Formatted Indonesian price with currency prefix and separators
        let record = parse_record("Item\nRp 1.200.000,-").unwrap();
        assert_eq!(record.unit_price.amount(), 1_200_000);
    }

    #[test]
    fn test_price_without_digits_defaults_to_zero() {
        let record = parse_record("Item\ncall for price").unwrap();
        assert!(record.unit_price.is_zero());
    }

    #[test]
    fn test_parse_quantity_defaults() {
        assert_eq!(parse_quantity("3"), 3);
        assert_eq!(parse_quantity("x12 sheets"), 12);
        assert_eq!(parse_quantity(""), 1);
        assert_eq!(parse_quantity("lots"), 1);
        assert_eq!(parse_quantity("0"), 1);
        assert_eq!(parse_quantity("000"), 1);
    }

    #[test]
    fn test_sanitize_label() {
        assert_eq!(sanitize_label("stok april 2024"), "stok_april_2024");
        assert_eq!(sanitize_label("  padded  "), "padded");
        assert_eq!(sanitize_label("a   b"), "a_b");
        assert_eq!(sanitize_label("../../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_label("laptop.json"), "laptopjson");
        assert_eq!(sanitize_label(""), "untitled");
        assert_eq!(sanitize_label("@#$%"), "untitled");
    }
}
