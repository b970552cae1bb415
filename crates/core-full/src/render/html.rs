/// Print-paginated HTML binder
use super::layout::{paginate, summarize, BinderPage, CardSlot};
use super::{DocumentRenderer, RenderOptions, RenderSummary};
use binder_core::error::Result;
use binder_core::util::file::write_atomic;
use binder_core::util::html::HtmlEscape;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="{{LANG}}">
<head>
<meta charset="utf-8">
<title>{{TITLE}}</title>
<style>
@page { size: A4; margin: 10mm; }
body { font-family: sans-serif; margin: 0; }
.page { page-break-after: always; break-after: page; display: flex; flex-direction: column; min-height: 277mm; }
.page header h2 { margin: 0 0 2mm 0; }
.page header p { margin: 0 0 4mm 0; color: #444; }
.grid { display: grid; grid-template-columns: repeat({{COLUMNS}}, 1fr); grid-template-rows: repeat({{ROWS}}, 1fr); gap: 3mm; flex: 1; }
.slot { border: 1px dashed #999; border-radius: 3mm; display: flex; flex-direction: column; align-items: center; justify-content: flex-end; padding: 2mm; overflow: hidden; }
.slot img { max-width: 100%; max-height: 75%; object-fit: contain; }
.slot.empty { border-color: #ddd; }
.slot .name { font-weight: bold; }
.slot .number { font-size: 0.8em; color: #666; }
footer { text-align: center; font-size: 0.8em; color: #666; margin-top: 2mm; }
</style>
</head>
<body>
{{PAGES}}
</body>
</html>
"#;

pub struct HtmlBinderRenderer;

impl HtmlBinderRenderer {
    /// Build the whole document in memory
    pub fn generate_html(
        sections: &Map<String, Value>,
        options: &RenderOptions,
    ) -> Result<(String, RenderSummary)> {
        let binder = paginate(sections, options)?;
        let per_page = options.cards_per_page()?;

        let mut pages = String::new();
        for page in &binder {
            Self::write_page(&mut pages, page, per_page);
        }

        let title = options.title.as_deref().unwrap_or("Binder");
        let html = TEMPLATE
            .replace("{{LANG}}", &HtmlEscape::escape_attribute(&options.language))
            .replace("{{TITLE}}", &HtmlEscape::escape_content(title))
            .replace("{{COLUMNS}}", &options.columns.to_string())
            .replace("{{ROWS}}", &options.rows.to_string())
            .replace("{{PAGES}}", &pages);

        Ok((html, summarize(&binder)))
    }

    fn write_page(out: &mut String, page: &BinderPage, per_page: usize) {
        out.push_str("<section class=\"page\">\n");
        if let Some(header) = &page.header {
            out.push_str("<header>");
            out.push_str(&format!("<h2>{}</h2>", HtmlEscape::escape_content(&header.title)));
            if let Some(description) = &header.description {
                out.push_str(&format!("<p>{}</p>", HtmlEscape::escape_content(description)));
            }
            out.push_str("</header>\n");
        }

        out.push_str("<div class=\"grid\">\n");
        for slot in &page.slots {
            Self::write_slot(out, slot);
        }
        for _ in page.slots.len()..per_page {
            out.push_str("<div class=\"slot empty\"></div>\n");
        }
        out.push_str("</div>\n");
        out.push_str(&format!("<footer>{}</footer>\n</section>\n", page.number));
    }

    fn write_slot(out: &mut String, slot: &CardSlot) {
        out.push_str("<div class=\"slot\">");
        if let Some(image) = &slot.image {
            out.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\">",
                HtmlEscape::escape_attribute(image),
                HtmlEscape::escape_attribute(&slot.name)
            ));
        }
        out.push_str(&format!(
            "<span class=\"name\">{}</span>",
            HtmlEscape::escape_content(&slot.name)
        ));
        if let Some(number) = &slot.number {
            out.push_str(&format!(
                "<span class=\"number\">{}</span>",
                HtmlEscape::escape_content(number)
            ));
        }
        out.push_str("</div>\n");
    }
}

impl DocumentRenderer for HtmlBinderRenderer {
    fn render(
        &self,
        sections: &Map<String, Value>,
        options: &RenderOptions,
        output: &Path,
    ) -> Result<RenderSummary> {
        let (html, summary) = Self::generate_html(sections, options)?;
        write_atomic(output, html.as_bytes())?;
        debug!("Wrote HTML binder to {:?}", output);
        Ok(summary)
    }
}
