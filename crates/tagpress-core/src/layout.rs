//! # Layout Renderer
//!
//! Maps pages of physical labels into a print-ready HTML description.
//!
//! ## Print Flow Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One A4 Landscape Sheet (3×3 grid)                    │
//! │                                                                         │
//! │   ┌─────────┐  ┌─────────┐  ┌─────────┐                                │
//! │   │ LAPTOPX │  │ LAPTOPX │  │ MOUSE   │   Each cell:                   │
//! │   │ > RAM.. │  │ > RAM.. │  │         │   • name band (uppercase)      │
//! │   │ RP 4.5..│  │ RP 4.5..│  │ RP 150..│   • one marked line per        │
//! │   └─────────┘  └─────────┘  └─────────┘     description line           │
//! │   ┌─────────┐  ┌─────────┐  ┌─────────┐   • price band (RP …,-)        │
//! │   │   ...   │  │   ...   │  │   ...   │                                │
//! │   └─────────┘  └─────────┘  └─────────┘   Cells fill row-major.        │
//! │   ┌─────────┐                             Unfilled trailing cells on   │
//! │   │   ...   │      (blank)     (blank)    the final page stay blank    │
//! │   └─────────┘                             (fixed size, not stretched). │
//! │                                                                         │
//! │  Page breaks between sheets, none after the last.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The returned string is handed to the external rasterizer verbatim; this
//! module performs no I/O. All user-supplied text is HTML-escaped.

use std::fmt::Write;

use crate::pagination::Page;
use crate::types::LineItem;

// =============================================================================
// Stylesheet
// =============================================================================

/// Fixed print stylesheet: A4 landscape, zero margin, 3×3 grid of
/// fixed-size cells, page break after every sheet except the last.
const STYLESHEET: &str = "\
@media print {
  @page { size: A4 landscape; margin: 0; }
  body { font-family: 'Fira Code', monospace; margin: 0; background-color: #fff; }
  .page { width: 29.7cm; height: 21cm; padding: 1.5cm; display: grid; grid-template-columns: repeat(3, 8.7cm); grid-template-rows: repeat(3, 5.7cm); gap: 0.5cm; page-break-after: always; justify-content: center; align-content: center; }
  .page:last-child { page-break-after: auto; }
  .label { width: 8.7cm; height: 5.7cm; border: 1px solid #000; padding: 0.4cm; display: flex; flex-direction: column; justify-content: space-between; box-sizing: border-box; overflow: hidden; background: white; }
  .product-name { font-size: 14pt; font-weight: 700; background: #0da11a; color: #fff; text-align: center; margin: -0.4cm -0.4cm 0.2cm -0.4cm; padding: 0.2cm 0; }
  .spec-box { font-size: 10pt; font-weight: 400; flex-grow: 1; color: #333; line-height: 1.4; padding-top: 5px; }
  .price { font-size: 13pt; font-weight: 700; background: #0da11a; color: #fff; text-align: center; margin: 0.2cm -0.4cm -0.4cm -0.4cm; padding: 0.2cm 0; }
}
";

// =============================================================================
// Document Rendering
// =============================================================================

/// Renders pages into a single self-contained HTML document.
///
/// Zero pages produce a valid empty-body document; callers that consider an
/// empty print run an error must reject it before rendering.
pub fn render_document(pages: &[Page<'_>]) -> String {
    let mut body = String::new();
    for page in pages {
        render_page(&mut body, page);
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <style>\n{STYLESHEET}</style>\n</head>\n<body>{body}</body>\n</html>\n"
    )
}

/// Renders one 3×3 sheet. Only filled cells are emitted; the fixed grid
/// template keeps trailing cells blank at their fixed size.
fn render_page(out: &mut String, page: &Page<'_>) {
    out.push_str("<div class=\"page\">");
    for label in page.labels() {
        render_label(out, label);
    }
    out.push_str("</div>");
}

/// Renders one label cell: name band, marked spec lines, price band.
fn render_label(out: &mut String, item: &LineItem) {
    let _ = write!(
        out,
        "<div class=\"label\"><div class=\"product-name\">{}</div><div class=\"spec-box\">",
        escape_html(&item.name.to_uppercase())
    );
    for line in item.description_lines() {
        let _ = write!(out, "<div>&gt; {}</div>", escape_html(line));
    }
    let _ = write!(
        out,
        "</div><div class=\"price\">{}</div></div>",
        escape_html(&item.unit_price.tag_format())
    );
}

/// Escapes text for safe interpolation into HTML element content.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::paginate;
    use crate::price::Price;

    fn item(name: &str, quantity: u32) -> LineItem {
        LineItem {
            name: name.to_string(),
            description: "RAM 8GB\nSSD 256GB".to_string(),
            unit_price: Price::new(4_500_000),
            quantity,
        }
    }

    #[test]
    fn test_zero_pages_render_empty_body() {
        let html = render_document(&[]);
        assert!(html.contains("<body></body>"));
        assert!(!html.contains("class=\"page\""));
    }

    #[test]
    fn test_one_sheet_per_page() {
        let items: Vec<LineItem> = (0..10).map(|i| item(&format!("I{}", i), 1)).collect();
        let pages = paginate(&items);
        let html = render_document(&pages);

        assert_eq!(html.matches("<div class=\"page\">").count(), 2);
        assert_eq!(html.matches("<div class=\"label\">").count(), 10);
    }

    #[test]
    fn test_name_is_uppercased() {
        let items = [item("LaptopX", 1)];
        let pages = paginate(&items);
        let html = render_document(&pages);
        assert!(html.contains(">LAPTOPX</div>"));
    }

    #[test]
    fn test_description_lines_are_marked() {
        let items = [item("LaptopX", 1)];
        let pages = paginate(&items);
        let html = render_document(&pages);
        assert!(html.contains("<div>&gt; RAM 8GB</div>"));
        assert!(html.contains("<div>&gt; SSD 256GB</div>"));
    }

    #[test]
    fn test_price_band_format() {
        let items = [item("LaptopX", 1)];
        let pages = paginate(&items);
        let html = render_document(&pages);
        assert!(html.contains(">RP 4.500.000,-</div>"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let hostile = LineItem {
            name: "<script>alert(1)</script>".to_string(),
            description: "a & b\n\"quoted\"".to_string(),
            unit_price: Price::zero(),
            quantity: 1,
        };
        let items = vec![hostile];
        let html = render_document(&paginate(&items));

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;SCRIPT&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(html.contains("&quot;quoted&quot;"));
    }

    #[test]
    fn test_stylesheet_declares_fixed_grid() {
        let html = render_document(&paginate(&[item("A", 1)]));
        assert!(html.contains("size: A4 landscape"));
        assert!(html.contains("repeat(3, 8.7cm)"));
        assert!(html.contains("repeat(3, 5.7cm)"));
        assert!(html.contains(".page:last-child { page-break-after: auto; }"));
    }
}
