//! Table of contents

use serde::Serialize;

use super::types::Textbook;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TocLevel {
    Chapter,
    Section,
}

/// A navigable table-of-contents row
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TocEntry {
    pub level: TocLevel,
    pub id: String,
    pub title: String,
    /// Page the entry navigates to
    pub start_page: u32,
    pub end_page: u32,
    /// Whether `current_page` falls inside this entry
    pub is_current: bool,
}

/// Flatten chapters and their sections, marking the ones covering `current_page`
pub fn table_of_contents(book: &Textbook, current_page: u32) -> Vec<TocEntry> {
    let covers = |start: u32, end: u32| (start..=end).contains(&current_page);

    book.chapters
        .iter()
        .flat_map(|chapter| {
            let heading = TocEntry {
                level: TocLevel::Chapter,
                id: chapter.id.clone(),
                title: chapter.title.clone(),
                start_page: chapter.start_page,
                end_page: chapter.end_page,
                is_current: covers(chapter.start_page, chapter.end_page),
            };
            let sections = chapter.sections.iter().map(move |s| TocEntry {
                level: TocLevel::Section,
                id: s.id.clone(),
                title: s.title.clone(),
                start_page: s.start_page,
                end_page: s.end_page,
                is_current: covers(s.start_page, s.end_page),
            });
            std::iter::once(heading).chain(sections)
        })
        .collect()
}
