//! Textbook catalog types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bibliographic and display metadata for a textbook
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextbookMetadata {
    /// Unique textbook identifier (opaque key, e.g. `physics-101`)
    pub id: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub publication_year: i32,
    pub isbn: String,
    /// Edition label (e.g. "4th Edition")
    pub edition: String,
    pub subject: String,
    /// Library shelf the book is filed under
    pub category: String,
    pub description: String,
    pub cover_image: String,
    pub total_pages: u32,
    pub language: String,
}

/// A chapter spanning an inclusive page range
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub start_page: u32,
    pub end_page: u32,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    pub start_page: u32,
    pub end_page: u32,
}

/// Stored HTML content of one page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextbookPage {
    pub page_number: u32,
    /// HTML fragment
    pub content: String,
    pub chapter_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Textbook {
    pub metadata: TextbookMetadata,
    pub chapters: Vec<Chapter>,
    pub pages: Vec<TextbookPage>,
}

/// Per-textbook reading progress
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingProgress {
    pub textbook_id: String,
    pub current_page: u32,
    /// Minutes spent reading
    pub total_time_read: u32,
    pub pages_read: Vec<u32>,
    pub last_read_at: DateTime<Utc>,
    /// 0-100
    pub completion_percentage: f64,
}

/// A timed reading session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: String,
    pub textbook_id: String,
    pub start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub pages_read: u32,
    pub annotations_created: u32,
}

impl Chapter {
    pub fn contains(&self, page: u32) -> bool {
        (self.start_page..=self.end_page).contains(&page)
    }
}

impl Textbook {
    pub fn id(&self) -> &str {
        &self.metadata.id
    }

    pub fn page(&self, page_number: u32) -> Option<&TextbookPage> {
        self.pages.iter().find(|p| p.page_number == page_number)
    }

    pub fn chapter_by_page(&self, page_number: u32) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.contains(page_number))
    }
}

impl ReadingProgress {
    /// Fresh progress for a textbook opened at page 1
    pub fn new(textbook_id: &str, total_pages: u32) -> Self {
        let mut progress = Self {
            textbook_id: textbook_id.to_string(),
            current_page: 1,
            total_time_read: 0,
            pages_read: Vec::new(),
            last_read_at: Utc::now(),
            completion_percentage: 0.0,
        };
        progress.record_page(1, total_pages);
        progress
    }

    /// Record a visit to `page`
    ///
    /// Completion is the position reached in the book (`page / total`).
    pub fn record_page(&mut self, page: u32, total_pages: u32) {
        self.current_page = page;
        if let Err(pos) = self.pages_read.binary_search(&page) {
            self.pages_read.insert(pos, page);
        }
        self.last_read_at = Utc::now();
        self.completion_percentage = if total_pages == 0 {
            0.0
        } else {
            f64::from(page) / f64::from(total_pages) * 100.0
        };
    }
}

impl StudySession {
    /// Length in minutes, zero while the session is still open
    pub fn duration_minutes(&self) -> f64 {
        self.end_time
            .map(|end| (end - self.start_time).num_milliseconds() as f64 / 60_000.0)
            .unwrap_or(0.0)
    }
}
