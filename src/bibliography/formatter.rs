//! Citation formatter
//!
//! Builds citation strings for a quoted annotation.

use chrono::NaiveDate;

use super::types::{CitationDraft, CitationFormat, CitationError, CitationResult};
use crate::annotations::Annotation;
use crate::library::TextbookMetadata;

/// Generate a citation for a quoted annotation in the given format
pub fn generate_citation(
    metadata: &TextbookMetadata,
    annotation: &Annotation,
    format: CitationFormat,
) -> CitationResult<String> {
    if annotation.textbook_id != metadata.id {
        return Err(CitationError::TextbookMismatch {
            annotation: annotation.id.clone(),
            textbook: metadata.id.clone(),
        });
    }

    let page = annotation.page_number;
    Ok(match format {
        CitationFormat::APA => generate_apa(metadata, page),
        CitationFormat::MLA => generate_mla(metadata, page),
        CitationFormat::Chicago => generate_chicago(metadata, page),
    })
}

/// Format: Author (Year). Title (Edition). Publisher. (p. N)
pub fn generate_apa(metadata: &TextbookMetadata, page: u32) -> String {
    format!(
        "{} ({}). {} ({}). {}. (p. {})",
        metadata.author,
        metadata.publication_year,
        metadata.title,
        metadata.edition,
        metadata.publisher,
        page
    )
}

/// Format: Author. Title. Edition, Publisher, Year, p. N.
pub fn generate_mla(metadata: &TextbookMetadata, page: u32) -> String {
    format!(
        "{}. {}. {}, {}, {}, p. {}.",
        metadata.author,
        metadata.title,
        metadata.edition,
        metadata.publisher,
        metadata.publication_year,
        page
    )
}

/// Format: Author. Title. Edition. Publisher, Year. N.
pub fn generate_chicago(metadata: &TextbookMetadata, page: u32) -> String {
    format!(
        "{}. {}. {}. {}, {}. {}.",
        metadata.author,
        metadata.title,
        metadata.edition,
        metadata.publisher,
        metadata.publication_year,
        page
    )
}

/// Draft for the saved-citation list
pub fn citation_draft(
    metadata: &TextbookMetadata,
    annotation: &Annotation,
    format: CitationFormat,
) -> CitationResult<CitationDraft> {
    Ok(CitationDraft {
        textbook_id: metadata.id.clone(),
        annotation_id: annotation.id.clone(),
        format,
        citation_text: generate_citation(metadata, annotation, format)?,
        page_number: annotation.page_number,
    })
}

/// Plain-text file body for a downloaded citation
pub fn download_text(citation: &str, quote: &str, generated_on: NaiveDate) -> String {
    format!(
        "Citation for \"{quote}\"\n\n{citation}\n\nQuoted text: \"{quote}\"\n\nGenerated on: {}",
        generated_on.format("%-m/%-d/%Y")
    )
}

/// File name for a downloaded citation
pub fn download_filename(metadata: &TextbookMetadata, page: u32) -> String {
    let slug = metadata
        .title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    format!("citation-{}-p{}.txt", slug, page)
}
