//! Annotation types
//!
//! An annotation marks a span of text on one page of one textbook. Field
//! names serialize in camelCase so records line up with the catalog JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ReaderError;

/// A stored highlight or note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// Unique identifier (UUID)
    pub id: String,
    /// The textbook this annotation belongs to
    pub textbook_id: String,
    /// Page the annotation was created on (1-based)
    pub page_number: u32,
    /// Exact text the reader selected, never empty
    pub selected_text: String,
    /// Best-effort character offset of the selection start
    pub start_offset: usize,
    /// Best-effort character offset of the selection end
    pub end_offset: usize,
    /// Highlight or note
    #[serde(rename = "type")]
    pub annotation_type: AnnotationType,
    pub color: HighlightColor,
    /// Note text, present for notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Types of annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationType {
    /// Colored text highlight
    Highlight,
    /// Text span with reader-authored text
    Note,
}

/// Fixed highlight palette
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightColor {
    #[default]
    Yellow,
    Green,
    Blue,
    Pink,
    Orange,
}

impl HighlightColor {
    /// Every palette entry, in display order
    pub const ALL: [HighlightColor; 5] = [
        HighlightColor::Yellow,
        HighlightColor::Green,
        HighlightColor::Blue,
        HighlightColor::Pink,
        HighlightColor::Orange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Pink => "pink",
            Self::Orange => "orange",
        }
    }
}

impl std::fmt::Display for HighlightColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HighlightColor {
    type Err = ReaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ReaderError::invalid_value("color", s))
    }
}

impl AnnotationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Highlight => "highlight",
            Self::Note => "note",
        }
    }
}

impl std::fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AnnotationType {
    type Err = ReaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "highlight" => Ok(Self::Highlight),
            "note" => Ok(Self::Note),
            _ => Err(ReaderError::invalid_value("annotation type", s)),
        }
    }
}

/// An annotation before the store assigns identity and timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationDraft {
    pub textbook_id: String,
    pub page_number: u32,
    pub selected_text: String,
    pub start_offset: usize,
    pub end_offset: usize,
    #[serde(rename = "type")]
    pub annotation_type: AnnotationType,
    pub color: HighlightColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AnnotationDraft {
    /// Draft a highlight over `selected_text`
    ///
    /// Offsets default to `0..len` (in characters); callers holding a real
    /// position can overwrite them with [`AnnotationDraft::at_offsets`].
    pub fn highlight(
        textbook_id: &str,
        page_number: u32,
        selected_text: &str,
        color: HighlightColor,
    ) -> Self {
        Self {
            textbook_id: textbook_id.to_string(),
            page_number,
            selected_text: selected_text.to_string(),
            start_offset: 0,
            end_offset: selected_text.chars().count(),
            annotation_type: AnnotationType::Highlight,
            color,
            note: None,
        }
    }

    /// Draft a note over `selected_text`
    ///
    /// Returns `None` when the note text is blank; submitting an empty note
    /// is a no-op rather than an error.
    pub fn note(
        textbook_id: &str,
        page_number: u32,
        selected_text: &str,
        color: HighlightColor,
        note: &str,
    ) -> Option<Self> {
        if note.trim().is_empty() {
            return None;
        }

        Some(Self {
            annotation_type: AnnotationType::Note,
            note: Some(note.to_string()),
            ..Self::highlight(textbook_id, page_number, selected_text, color)
        })
    }

    /// Override the recorded offsets
    pub fn at_offsets(mut self, start_offset: usize, end_offset: usize) -> Self {
        self.start_offset = start_offset;
        self.end_offset = end_offset;
        self
    }
}

impl Annotation {
    /// Promote a draft to a stored annotation with a fresh id and timestamps
    pub fn from_draft(draft: AnnotationDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            textbook_id: draft.textbook_id,
            page_number: draft.page_number,
            selected_text: draft.selected_text,
            start_offset: draft.start_offset,
            end_offset: draft.end_offset,
            annotation_type: draft.annotation_type,
            color: draft.color,
            note: draft.note,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_highlight(&self) -> bool {
        self.annotation_type == AnnotationType::Highlight
    }

    /// CSS class list for the rendered highlight, e.g. `highlight highlight-green`
    pub fn highlight_class(&self, prefix: &str) -> String {
        format!("{} {}-{}", prefix, prefix, self.color)
    }
}
