//! Annotation module
//!
//! Highlights and notes created from reader selections.
//!
//! # Features
//!
//! - Annotation types:
//!   - Highlights (colored span, no text)
//!   - Notes (span plus reader-authored text)
//!
//! - Append-only in-memory store shared by handle
//! - Search panel filters (text, type, color, date/page ordering)

mod search;
mod store;
mod types;

pub use search::{AnnotationQuery, SearchResults, SortBy};
pub use store::AnnotationStore;
pub use types::{Annotation, AnnotationDraft, AnnotationType, HighlightColor};
