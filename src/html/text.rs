//! Plain-text view of page HTML
//!
//! Selections arrive as rendered text, so offsets are computed against the
//! page's text content with entities decoded and whitespace runs collapsed
//! the way a browser lays the text out.

use lol_html::{doc_text, rewrite_str, RewriteStrSettings};

use super::InjectError;

/// Text content of an HTML fragment, entities decoded
pub fn page_text(html: &str) -> Result<String, InjectError> {
    let mut raw = String::new();

    rewrite_str(
        html,
        RewriteStrSettings {
            document_content_handlers: vec![doc_text!(|t| {
                raw.push_str(t.as_str());
                Ok(())
            })],
            ..RewriteStrSettings::default()
        },
    )
    .map_err(|e| InjectError::RewriteError(e.to_string()))?;

    Ok(html_escape::decode_html_entities(&raw).into_owned())
}

/// Collapse whitespace runs to single spaces and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Character offsets of the first occurrence of `needle` in the page text
///
/// Both sides are whitespace-normalized first. Returns `None` when the
/// needle is empty or does not occur.
pub fn locate_text(html: &str, needle: &str) -> Option<(usize, usize)> {
    let needle = normalize_whitespace(needle);
    if needle.is_empty() {
        return None;
    }

    let text = match page_text(html) {
        Ok(text) => normalize_whitespace(&text),
        Err(e) => {
            tracing::warn!("Could not extract page text: {}", e);
            return None;
        }
    };

    let byte_start = text.find(&needle)?;
    let start = text[..byte_start].chars().count();
    Some((start, start + needle.chars().count()))
}
