//! Reading view
//!
//! Session state for an open textbook plus the settings and keyboard
//! handling around it.

mod input;
mod session;
mod settings;

pub use input::{navigation_for_key, KeyTarget, NavigationAction};
pub use session::{ReaderHeader, ReaderSession, ReaderView, RenderedPage, PAGE_NOT_FOUND};
pub use settings::{
    FontFamily, ReadingSettings, Theme, MAX_FONT_SIZE, MAX_LINE_HEIGHT, MIN_FONT_SIZE,
    MIN_LINE_HEIGHT,
};
