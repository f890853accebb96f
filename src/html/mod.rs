//! HTML processing for page content
//!
//! - `highlight_injector`: wraps annotated text in highlight spans
//! - `text`: plain-text extraction used for selection offsets

mod highlight_injector;
mod text;

pub use highlight_injector::{
    existing_markers, inject_highlights, render_highlights, HighlightConfig, InjectError,
    InjectionResult,
};
pub use text::{locate_text, normalize_whitespace, page_text};
