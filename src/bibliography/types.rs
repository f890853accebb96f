//! Bibliography types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Citation style options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CitationFormat {
    /// APA 7th edition
    #[default]
    APA,
    /// MLA 9th edition
    MLA,
    /// Chicago Manual of Style
    Chicago,
}

impl CitationFormat {
    pub const ALL: [CitationFormat; 3] = [Self::APA, Self::MLA, Self::Chicago];
}

impl std::fmt::Display for CitationFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::APA => write!(f, "APA"),
            Self::MLA => write!(f, "MLA"),
            Self::Chicago => write!(f, "Chicago"),
        }
    }
}

impl std::str::FromStr for CitationFormat {
    type Err = CitationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "apa" | "apa7" => Ok(Self::APA),
            "mla" | "mla9" => Ok(Self::MLA),
            "chicago" | "cmos" => Ok(Self::Chicago),
            _ => Err(CitationError::InvalidFormat(s.to_string())),
        }
    }
}

/// A citation kept in the user's saved list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub id: String,
    pub textbook_id: String,
    pub annotation_id: String,
    pub format: CitationFormat,
    pub citation_text: String,
    pub page_number: u32,
    pub created_at: DateTime<Utc>,
}

/// A citation before it is saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationDraft {
    pub textbook_id: String,
    pub annotation_id: String,
    pub format: CitationFormat,
    pub citation_text: String,
    pub page_number: u32,
}

impl Citation {
    pub fn from_draft(draft: CitationDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            textbook_id: draft.textbook_id,
            annotation_id: draft.annotation_id,
            format: draft.format,
            citation_text: draft.citation_text,
            page_number: draft.page_number,
            created_at: Utc::now(),
        }
    }
}

/// Saved citations, newest last
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavedCitations {
    citations: Vec<Citation>,
}

impl SavedCitations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a citation and return its stored form
    pub fn save(&mut self, draft: CitationDraft) -> &Citation {
        let citation = Citation::from_draft(draft);
        tracing::debug!(id = %citation.id, format = %citation.format, "Saved citation");
        let index = self.citations.len();
        self.citations.push(citation);
        &self.citations[index]
    }

    pub fn all(&self) -> &[Citation] {
        &self.citations
    }

    pub fn for_textbook(&self, textbook_id: &str) -> Vec<&Citation> {
        self.citations
            .iter()
            .filter(|c| c.textbook_id == textbook_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.citations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.citations.is_empty()
    }
}

/// Citation errors
#[derive(Debug, Error)]
pub enum CitationError {
    #[error("Invalid citation format: {0}")]
    InvalidFormat(String),

    #[error("Annotation {annotation} does not belong to textbook {textbook}")]
    TextbookMismatch { annotation: String, textbook: String },
}

pub type CitationResult<T> = Result<T, CitationError>;
