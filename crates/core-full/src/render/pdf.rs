//! Printable A4 binder sheets: one outlined slot per card, labelled with
//! the card name and number in the PDF builtin Helvetica faces.

use super::layout::{paginate, summarize, BinderPage, CardSlot};
use super::{DocumentRenderer, RenderOptions, RenderSummary};
use binder_core::error::{BinderError, Result};
use binder_core::util::file::write_atomic;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};
use serde_json::{Map, Value};
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 10.0;
const GAP: f32 = 3.0;
const HEADER_HEIGHT: f32 = 16.0;
const FOOTER_HEIGHT: f32 = 8.0;
// Rough Helvetica advance per point of font size, in mm
const CHAR_WIDTH_PER_PT: f32 = 0.18;

pub struct PdfBinderRenderer;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PdfBinderRenderer {
    /// Build the whole document in memory
    pub fn generate_pdf(
        sections: &Map<String, Value>,
        options: &RenderOptions,
    ) -> Result<(Vec<u8>, RenderSummary)> {
        let binder = paginate(sections, options)?;
        let title = options.title.as_deref().unwrap_or("Binder");

        let (doc, first_page, first_layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Cards");
        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?,
        };

        for (index, page) in binder.iter().enumerate() {
            let (page_index, layer_index) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Cards")
            };
            let layer = doc.get_page(page_index).get_layer(layer_index);
            draw_page(&layer, page, options, &fonts);
        }

        let mut writer = BufWriter::new(Vec::new());
        doc.save(&mut writer).map_err(pdf_error)?;
        let bytes = writer.into_inner().map_err(pdf_error)?;
        Ok((bytes, summarize(&binder)))
    }
}

impl DocumentRenderer for PdfBinderRenderer {
    fn render(
        &self,
        sections: &Map<String, Value>,
        options: &RenderOptions,
        output: &Path,
    ) -> Result<RenderSummary> {
        let (bytes, summary) = Self::generate_pdf(sections, options)?;
        write_atomic(output, &bytes)?;
        debug!("Wrote PDF binder ({} bytes) to {:?}", bytes.len(), output);
        Ok(summary)
    }
}

fn pdf_error(err: impl std::fmt::Display) -> BinderError {
    BinderError::render(format!("PDF generation failed: {}", err))
}

fn draw_page(layer: &PdfLayerReference, page: &BinderPage, options: &RenderOptions, fonts: &Fonts) {
    let mut top = PAGE_HEIGHT - MARGIN;
    if let Some(header) = &page.header {
        layer.use_text(header.title.as_str(), 16.0, Mm(MARGIN), Mm(top - 6.0), &fonts.bold);
        if let Some(description) = &header.description {
            let fitted = fit(description, PAGE_WIDTH - 2.0 * MARGIN, 10.0);
            layer.use_text(fitted, 10.0, Mm(MARGIN), Mm(top - 12.0), &fonts.regular);
        }
        top -= HEADER_HEIGHT;
    }

    let bottom = MARGIN + FOOTER_HEIGHT;
    let columns = options.columns as f32;
    let rows = options.rows as f32;
    let slot_width = (PAGE_WIDTH - 2.0 * MARGIN - GAP * (columns - 1.0)) / columns;
    let slot_height = (top - bottom - GAP * (rows - 1.0)) / rows;

    layer.set_outline_thickness(0.3);
    for row in 0..options.rows {
        for column in 0..options.columns {
            let x = MARGIN + column as f32 * (slot_width + GAP);
            let y = top - row as f32 * (slot_height + GAP) - slot_height;
            let slot = page.slots.get(row * options.columns + column);
            let grey = if slot.is_some() { 0.55 } else { 0.85 };
            layer.set_outline_color(Color::Rgb(Rgb::new(grey, grey, grey, None)));
            layer.add_line(outline(x, y, slot_width, slot_height));
            if let Some(slot) = slot {
                draw_slot(layer, slot, x, y, slot_width, fonts);
            }
        }
    }

    layer.use_text(
        page.number.to_string(),
        9.0,
        Mm(PAGE_WIDTH / 2.0),
        Mm(MARGIN),
        &fonts.regular,
    );
}

fn draw_slot(
    layer: &PdfLayerReference,
    slot: &CardSlot,
    x: f32,
    y: f32,
    width: f32,
    fonts: &Fonts,
) {
    let inner = width - 4.0;
    layer.use_text(fit(&slot.name, inner, 9.0), 9.0, Mm(x + 2.0), Mm(y + 7.0), &fonts.bold);
    if let Some(number) = &slot.number {
        layer.use_text(fit(number, inner, 7.0), 7.0, Mm(x + 2.0), Mm(y + 3.0), &fonts.regular);
    }
}

/// Rectangle outline with its lower-left corner at (x, y)
fn outline(x: f32, y: f32, width: f32, height: f32) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(x), Mm(y)), false),
            (Point::new(Mm(x + width), Mm(y)), false),
            (Point::new(Mm(x + width), Mm(y + height)), false),
            (Point::new(Mm(x), Mm(y + height)), false),
        ],
        is_closed: true,
    }
}

/// Cut `text` so it roughly fits `width` mm at `size` pt, marking the cut with "..."
fn fit(text: &str, width: f32, size: f32) -> String {
    let max_chars = (width / (size * CHAR_WIDTH_PER_PT)).floor().max(4.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars - 3).collect();
    format!("{}...", kept)
}
