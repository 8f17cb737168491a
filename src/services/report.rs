// src/services/report.rs
//
// Analysis reports rendered with printpdf: a centred Helvetica title and one
// "label: value" line per row, paginated on US Letter.

use log::debug;
use printpdf::{BuiltinFont, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

pub const REPORT_TITLE: &str = "Real Estate Investment Report";
pub const REPORT_FILE_NAME: &str = "investment_report.pdf";

const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 25.4;
const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 12.0;
const LINE_HEIGHT: f32 = 7.0;
const LAYER_NAME: &str = "Report";
const MM_PER_POINT: f32 = 0.3528;
// Helvetica glyphs average roughly half the font size in width
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// Builtin fonts only cover Latin-1; anything outside it prints as '?'.
fn printable(text: &str) -> String {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7e | 0xa0..=0xff => c,
            _ => '?',
        })
        .collect()
}

fn title_x(title: &str) -> f32 {
    let width = title.chars().count() as f32 * TITLE_SIZE * AVG_GLYPH_WIDTH * MM_PER_POINT;
    ((PAGE_WIDTH - width) / 2.0).max(MARGIN)
}

pub fn report_lines(rows: &[(&str, String)]) -> Vec<String> {
    rows.iter()
        .map(|(label, value)| printable(&format!("{}: {}", label, value)))
        .collect()
}

fn lines_per_page(with_title: bool) -> usize {
    let usable = PAGE_HEIGHT - 2.0 * MARGIN - if with_title { LINE_HEIGHT * 2.0 } else { 0.0 };
    (usable / LINE_HEIGHT) as usize + 1
}

/// Split report lines into pages; the first page leaves room for the title.
pub fn paginate(lines: Vec<String>) -> Vec<Vec<String>> {
    let mut pages = Vec::new();
    let mut remaining = lines.into_iter().peekable();
    let mut first = true;
    loop {
        let page: Vec<String> = remaining.by_ref().take(lines_per_page(first)).collect();
        pages.push(page);
        first = false;
        if remaining.peek().is_none() {
            break;
        }
    }
    pages
}

fn page_layer(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
    doc.get_page(page).get_layer(layer)
}

/// Render a report as PDF bytes.
pub fn render_pdf(title: &str, rows: &[(&str, String)]) -> Result<Vec<u8>, printpdf::Error> {
    let pages = paginate(report_lines(rows));

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    for (i, page_lines) in pages.iter().enumerate() {
        let mut y = PAGE_HEIGHT - MARGIN;
        let layer = if i == 0 {
            let layer = doc.get_page(first_page).get_layer(first_layer);
            let title = printable(title);
            layer.use_text(title.as_str(), TITLE_SIZE, Mm(title_x(&title)), Mm(y), &font);
            // blank line under the title
            y -= LINE_HEIGHT * 2.0;
            layer
        } else {
            page_layer(&doc)
        };

        for line in page_lines {
            layer.use_text(line.as_str(), BODY_SIZE, Mm(MARGIN), Mm(y), &font);
            y -= LINE_HEIGHT;
        }
    }

    let pdf = doc.save_to_bytes()?;
    debug!("Rendered {}-page report ({} bytes)", pages.len(), pdf.len());
    Ok(pdf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_count(pdf: &[u8]) -> usize {
        lopdf::Document::load_mem(pdf).unwrap().get_pages().len()
    }

    #[test]
    fn test_report_structure() {
        let rows = vec![("ROI %", "7.33".to_string()), ("Recommendation", "Buy".to_string())];
        let pdf = render_pdf(REPORT_TITLE, &rows).unwrap();

        assert!(pdf.starts_with(b"%PDF-"));
        let tail = String::from_utf8_lossy(&pdf[pdf.len().saturating_sub(32)..]).to_string();
        assert!(tail.contains("%%EOF"));
        assert_eq!(page_count(&pdf), 1);
    }

    #[test]
    fn test_report_lines_are_label_value_pairs() {
        let rows = vec![("ROI %", "7.33".to_string()), ("Recommendation", "Buy".to_string())];
        assert_eq!(report_lines(&rows), vec!["ROI %: 7.33", "Recommendation: Buy"]);
    }

    #[test]
    fn test_text_outside_latin1_is_replaced() {
        assert_eq!(printable("café (a) \\b"), "café (a) \\b");
        assert_eq!(printable("🏘 ok"), "? ok");

        let rows = vec![("Location (city)", "Zürich 🏘".to_string())];
        let pdf = render_pdf("Report (draft)", &rows).unwrap();
        assert_eq!(page_count(&pdf), 1);
    }

    #[test]
    fn test_title_is_centred() {
        let x = title_x(REPORT_TITLE);
        let width = PAGE_WIDTH - 2.0 * x;
        assert!(x > MARGIN);
        assert!(width > 0.0);
        // very long titles stay inside the margin
        assert_eq!(title_x(&"W".repeat(200)), MARGIN);
    }

    #[test]
    fn test_long_reports_paginate() {
        let rows: Vec<(&str, String)> = (0..100).map(|i| ("Row", i.to_string())).collect();
        let pages = paginate(report_lines(&rows));

        assert!(pages.len() > 1);
        assert_eq!(pages[0].len(), lines_per_page(true));
        assert_eq!(pages.iter().map(Vec::len).sum::<usize>(), 100);
        assert_eq!(pages.last().unwrap().last().unwrap(), "Row: 99");

        let pdf = render_pdf(REPORT_TITLE, &rows).unwrap();
        assert_eq!(page_count(&pdf), pages.len());
    }

    #[test]
    fn test_empty_report_has_one_page() {
        assert_eq!(paginate(Vec::new()).len(), 1);
        let pdf = render_pdf(REPORT_TITLE, &[]).unwrap();
        assert_eq!(page_count(&pdf), 1);
    }
}
