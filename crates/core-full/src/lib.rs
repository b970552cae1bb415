pub mod client;
pub mod io;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use client::{CachedFetcher, ClientConfig, DataFetcher, HttpClient, ImageFetcher};
pub use io::NameIndex;
pub use pipeline::{StepServices, register_steps};
pub use render::{DocumentRenderer, HtmlBinderRenderer, PdfBinderRenderer, RenderFormat, RenderOptions};
