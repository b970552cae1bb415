//! Document renderers consuming the sections format

pub mod html;
pub mod layout;
pub mod pdf;

pub use html::HtmlBinderRenderer;
pub use pdf::PdfBinderRenderer;

use binder_core::config::constants;
use binder_core::error::{BinderError, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// Layout and language choices for one rendered binder
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub language: String,
    pub default_language: String,
    pub columns: usize,
    pub rows: usize,
    pub title: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            language: constants::DEFAULT_LANGUAGE.to_string(),
            default_language: constants::DEFAULT_LANGUAGE.to_string(),
            columns: constants::DEFAULT_COLUMNS as usize,
            rows: constants::DEFAULT_ROWS as usize,
            title: None,
        }
    }
}

impl RenderOptions {
    /// Slots per page, or a render error when the grid is out of bounds
    pub fn cards_per_page(&self) -> Result<usize> {
        let max = constants::MAX_GRID_SIZE as usize;
        if !(1..=max).contains(&self.columns) || !(1..=max).contains(&self.rows) {
            return Err(BinderError::render(format!(
                "page grid must be between 1x1 and {}x{}, got {}x{}",
                max, max, self.columns, self.rows
            )));
        }
        self.columns
            .checked_mul(self.rows)
            .ok_or_else(|| BinderError::render("page grid overflows"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub pages: usize,
    pub cards: usize,
}

/// Output document kinds `render_binder` can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    Html,
    Pdf,
}

impl RenderFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "html" | "htm" => Some(Self::Html),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Pdf => "pdf",
        }
    }

    /// Guess from the output file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::parse)
    }
}

/// Turns a `sections` mapping into a document file
pub trait DocumentRenderer: Send + Sync {
    fn render(
        &self,
        sections: &Map<String, Value>,
        options: &RenderOptions,
        output: &Path,
    ) -> Result<RenderSummary>;
}
