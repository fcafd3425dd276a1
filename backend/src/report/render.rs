//! Render laid-out pages to PDF bytes with printpdf

use super::layout::{DrawOp, FontWeight, Page, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use anyhow::Result;
use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};

const LAYER: &str = "Content";

/// The builtin Helvetica fonts only cover Latin-1
fn printable(text: &str) -> String {
    text.chars()
        .filter(|c| (*c as u32) < 0x100 && !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

fn draw(layer: &PdfLayerReference, op: &DrawOp, regular: &IndirectFontRef, bold: &IndirectFontRef) {
    match op {
        DrawOp::Text {
            x,
            y,
            size,
            weight,
            text,
        } => {
            let font = match weight {
                FontWeight::Regular => regular,
                FontWeight::Bold => bold,
            };
            layer.use_text(printable(text), *size, Mm(*x), Mm(PAGE_HEIGHT_MM - y), font);
        }
        DrawOp::Line { x1, x2, y } => {
            let y = Mm(PAGE_HEIGHT_MM - y);
            layer.set_outline_thickness(0.5);
            layer.add_line(Line {
                points: vec![(Point::new(Mm(*x1), y), false), (Point::new(Mm(*x2), y), false)],
                is_closed: false,
            });
        }
    }
}

/// A4 document with one PDF page per layout page
pub fn render_pdf(title: &str, pages: &[Page]) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER);
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| anyhow::anyhow!("Failed to load Helvetica: {}", e))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| anyhow::anyhow!("Failed to load Helvetica-Bold: {}", e))?;

    for (i, page) in pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (p, l) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER);
            doc.get_page(p).get_layer(l)
        };
        for op in &page.ops {
            draw(&layer, op, &regular, &bold);
        }
    }

    doc.save_to_bytes()
        .map_err(|e| anyhow::anyhow!("Failed to write PDF: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::layout::{ReportLayout, LEFT_MARGIN_MM};

    #[test]
    fn test_printable_strips_emoji() {
        assert_eq!(printable("🥗 Salad café"), "Salad café");
    }

    #[test]
    fn test_render_multi_page() {
        let mut layout = ReportLayout::new(270.0);
        for i in 0..80 {
            layout.line(LEFT_MARGIN_MM, format!("Line {}", i), 12.0, FontWeight::Regular);
        }
        layout.rule();
        let pages = layout.finish();
        assert!(pages.len() > 1);

        let bytes = render_pdf("Test", &pages).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
