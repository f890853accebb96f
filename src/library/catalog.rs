//! Textbook catalog
//!
//! In-memory collection of textbooks that also serves as the page content
//! provider for the reading view. The sample library is bundled with the
//! crate; a replacement can be loaded from a JSON file with the same shape.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::types::{Chapter, ReadingProgress, Textbook};
use crate::error::{ReaderError, Result};

const BUNDLED_CATALOG: &str = include_str!("../../data/textbooks.json");

/// Page content lookups needed by the reading view
pub trait ContentProvider: Send + Sync {
    /// Look up a textbook by id
    fn textbook(&self, textbook_id: &str) -> Option<&Textbook>;

    /// HTML fragment for a page, `None` when the page has no stored content
    fn page_content(&self, textbook_id: &str, page_number: u32) -> Option<&str> {
        self.textbook(textbook_id)?
            .page(page_number)
            .map(|p| p.content.as_str())
    }

    /// Chapter whose page range covers `page_number`
    fn chapter_by_page(&self, textbook_id: &str, page_number: u32) -> Option<&Chapter> {
        self.textbook(textbook_id)?.chapter_by_page(page_number)
    }
}

/// On-disk catalog layout
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    textbooks: Vec<Textbook>,
    #[serde(default)]
    reading_progress: Vec<ReadingProgress>,
}

/// Library search criteria
#[derive(Debug, Clone, Default)]
pub struct LibraryFilter {
    /// Case-insensitive match against title, author or subject
    pub query: String,
    /// Exact category, `None` for all categories
    pub category: Option<String>,
}

impl LibraryFilter {
    /// Build a filter from UI values, where the category `all` means no filter
    pub fn new(query: &str, category: &str) -> Self {
        Self {
            query: query.to_string(),
            category: Some(category)
                .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"))
                .map(str::to_string),
        }
    }

    pub fn matches(&self, book: &Textbook) -> bool {
        let q = self.query.to_lowercase();
        let meta = &book.metadata;
        let matches_search = meta.title.to_lowercase().contains(&q)
            || meta.author.to_lowercase().contains(&q)
            || meta.subject.to_lowercase().contains(&q);
        let matches_category = self
            .category
            .as_ref()
            .map_or(true, |c| &meta.category == c);

        matches_search && matches_category
    }
}

/// The textbook library
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    textbooks: Vec<Textbook>,
    progress: Vec<ReadingProgress>,
}

impl Catalog {
    pub fn new(textbooks: Vec<Textbook>, progress: Vec<ReadingProgress>) -> Self {
        Self {
            textbooks,
            progress,
        }
    }

    /// The sample library shipped with the crate
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Parse a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let catalog = Self::new(file.textbooks, file.reading_progress);
        catalog.check_integrity();
        Ok(catalog)
    }

    /// Load a catalog from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            "Loaded {} textbooks from {}",
            catalog.textbooks.len(),
            path.display()
        );
        Ok(catalog)
    }

    fn check_integrity(&self) {
        for (i, book) in self.textbooks.iter().enumerate() {
            if self.textbooks[..i].iter().any(|b| b.id() == book.id()) {
                tracing::warn!(id = %book.id(), "Duplicate textbook id in catalog; first entry wins");
            }
            for page in &book.pages {
                if page.page_number == 0 || page.page_number > book.metadata.total_pages {
                    tracing::warn!(
                        id = %book.id(),
                        page = page.page_number,
                        "Page outside the textbook's page range"
                    );
                }
            }
        }
    }

    pub fn textbooks(&self) -> &[Textbook] {
        &self.textbooks
    }

    /// Look up a textbook, failing with `NotFound`
    pub fn require(&self, textbook_id: &str) -> Result<&Textbook> {
        self.textbook(textbook_id)
            .ok_or_else(|| ReaderError::NotFound(format!("textbook {}", textbook_id)))
    }

    pub fn reading_progress(&self, textbook_id: &str) -> Option<&ReadingProgress> {
        self.progress.iter().find(|p| p.textbook_id == textbook_id)
    }

    pub fn all_progress(&self) -> &[ReadingProgress] {
        &self.progress
    }

    /// Category tabs: `all` first, then each distinct category in catalog order
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec!["all".to_string()];
        for book in &self.textbooks {
            if !categories.contains(&book.metadata.category) {
                categories.push(book.metadata.category.clone());
            }
        }
        categories
    }

    /// Textbooks matching `filter`, in catalog order
    pub fn search(&self, filter: &LibraryFilter) -> Vec<&Textbook> {
        self.textbooks.iter().filter(|b| filter.matches(b)).collect()
    }

    /// The textbook read most recently, with its progress
    pub fn most_recent(&self) -> Option<(&Textbook, &ReadingProgress)> {
        self.progress
            .iter()
            .filter_map(|p| self.textbook(&p.textbook_id).map(|b| (b, p)))
            .max_by_key(|(_, p)| p.last_read_at)
    }
}

impl ContentProvider for Catalog {
    fn textbook(&self, textbook_id: &str) -> Option<&Textbook> {
        self.textbooks.iter().find(|b| b.metadata.id == textbook_id)
    }
}
