//! Bibliography Generation Module
//!
//! Generates citations for quoted passages from textbook metadata and keeps
//! the user's saved-citation list.
//!
//! # Supported Formats
//!
//! - **APA**: `Author (Year). Title (Edition). Publisher. (p. N)`
//! - **MLA**: `Author. Title. Edition, Publisher, Year, p. N.`
//! - **Chicago**: `Author. Title. Edition. Publisher, Year. N.`

mod formatter;
mod types;

pub use formatter::{
    citation_draft, download_filename, download_text, generate_apa, generate_chicago,
    generate_citation, generate_mla,
};
pub use types::{
    Citation, CitationDraft, CitationError, CitationFormat, CitationResult, SavedCitations,
};
