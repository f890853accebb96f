//! Reading session
//!
//! The reading surface for one open textbook. The session owns navigation,
//! settings and the active selection; page content and annotations come in
//! as handles so the same store can back the search panel and dashboard.

use std::sync::Arc;

use serde::Serialize;

use super::input::{navigation_for_key, KeyTarget, NavigationAction};
use super::settings::ReadingSettings;
use crate::annotations::{AnnotationDraft, AnnotationStore, AnnotationType, HighlightColor};
use crate::assistant::{StudyContext, StudyContextKind};
use crate::error::{ReaderError, Result};
use crate::html::render_highlights;
use crate::library::{table_of_contents, ContentProvider, ReadingProgress, TextbookMetadata, TocEntry};
use crate::pagination::{DisplayedPages, Navigator};
use crate::selection::{Selection, SelectionCapture, SelectionEvent, SelectionSurface};

/// Rendered in place of a page that has no stored content
pub const PAGE_NOT_FOUND: &str = "<p>Page not found</p>";

/// Header line of the reading view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderHeader {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_title: Option<String>,
    pub current_page: u32,
    pub total_pages: u32,
}

impl ReaderHeader {
    /// "{chapter} • Page X of N"
    pub fn subtitle(&self) -> String {
        let page = format!("Page {} of {}", self.current_page, self.total_pages);
        match &self.chapter_title {
            Some(chapter) => format!("{} • {}", chapter, page),
            None => page,
        }
    }
}

/// One page ready for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPage {
    pub page_number: u32,
    pub html: String,
}

/// Everything the reading view shows for the current position
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderView {
    pub header: ReaderHeader,
    pub left: RenderedPage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<RenderedPage>,
    pub page_style: String,
    pub theme_class: &'static str,
    /// 0-100
    pub progress_percent: f64,
    pub can_go_prev: bool,
    pub can_go_next: bool,
}

/// An open textbook
pub struct ReaderSession {
    content: Arc<dyn ContentProvider>,
    store: AnnotationStore,
    metadata: TextbookMetadata,
    navigator: Navigator,
    settings: ReadingSettings,
    selection: SelectionCapture,
    progress: ReadingProgress,
}

impl ReaderSession {
    /// Open `textbook_id` at page 1
    pub fn open(
        content: Arc<dyn ContentProvider>,
        store: AnnotationStore,
        textbook_id: &str,
        settings: ReadingSettings,
    ) -> Result<Self> {
        let metadata = content
            .textbook(textbook_id)
            .map(|b| b.metadata.clone())
            .ok_or_else(|| ReaderError::NotFound(format!("textbook {}", textbook_id)))?;

        tracing::info!(textbook_id, title = %metadata.title, "Opening textbook");

        let navigator = Navigator::new(metadata.total_pages, settings.page_layout);
        let progress = ReadingProgress::new(textbook_id, metadata.total_pages);

        Ok(Self {
            content,
            store,
            metadata,
            navigator,
            settings,
            selection: SelectionCapture::new(),
            progress,
        })
    }

    pub fn textbook_id(&self) -> &str {
        &self.metadata.id
    }

    pub fn metadata(&self) -> &TextbookMetadata {
        &self.metadata
    }

    pub fn current_page(&self) -> u32 {
        self.navigator.current()
    }

    pub fn settings(&self) -> &ReadingSettings {
        &self.settings
    }

    pub fn progress(&self) -> &ReadingProgress {
        &self.progress
    }

    pub fn annotations(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn update_settings(&mut self, settings: ReadingSettings) {
        self.navigator.set_layout(settings.page_layout);
        self.settings = settings.normalized();
    }

    pub fn visible_pages(&self) -> DisplayedPages {
        self.navigator.displayed()
    }

    pub fn go_to_page(&mut self, page: u32) -> bool {
        let changed = self.navigator.go_to(page);
        if changed {
            self.on_page_changed();
        }
        changed
    }

    pub fn next_page(&mut self) -> bool {
        let changed = self.navigator.next();
        if changed {
            self.on_page_changed();
        }
        changed
    }

    pub fn prev_page(&mut self) -> bool {
        let changed = self.navigator.prev();
        if changed {
            self.on_page_changed();
        }
        changed
    }

    fn on_page_changed(&mut self) {
        let page = self.navigator.current();
        self.progress.record_page(page, self.metadata.total_pages);
        tracing::debug!(textbook_id = %self.metadata.id, page, "Page changed");
    }

    /// Handle a key press; returns whether the page changed
    pub fn handle_key(&mut self, key: &str, target: KeyTarget) -> bool {
        match navigation_for_key(key, target) {
            Some(NavigationAction::PrevPage) => self.prev_page(),
            Some(NavigationAction::NextPage) => self.next_page(),
            None => false,
        }
    }

    /// Feed a selection event from the reading surface
    ///
    /// Selections on pages that are not currently displayed count as
    /// outside the reading surface.
    pub fn handle_selection(&mut self, event: &SelectionEvent) -> bool {
        let page = match event.surface {
            SelectionSurface::Page(page) => page,
            SelectionSurface::Outside => return false,
        };

        let shown = self.visible_pages();
        if page != shown.left && Some(page) != shown.right {
            tracing::debug!(page, "Ignoring selection on a page that is not displayed");
            return false;
        }

        let html = self.content.page_content(&self.metadata.id, page);
        self.selection.handle(event, &self.metadata.id, html)
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.active()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Store a new annotation and clear the active selection
    pub fn create_annotation(&mut self, draft: AnnotationDraft) {
        self.store.add(draft);
        self.selection.clear();
    }

    /// Highlight the active selection; returns whether anything was stored
    pub fn highlight_selection(&mut self, color: HighlightColor) -> bool {
        match self.selection.active().map(|s| s.highlight(color)) {
            Some(draft) => {
                self.create_annotation(draft);
                true
            }
            None => false,
        }
    }

    /// Attach a note to the active selection
    ///
    /// Blank note text is a no-op and keeps the selection.
    pub fn note_selection(&mut self, color: HighlightColor, note: &str) -> bool {
        match self.selection.active().and_then(|s| s.note(color, note)) {
            Some(draft) => {
                self.create_annotation(draft);
                true
            }
            None => false,
        }
    }

    /// HTML for one page with its highlights applied
    pub fn render_page(&self, page_number: u32) -> String {
        match self.content.page_content(&self.metadata.id, page_number) {
            Some(content) => {
                let highlights =
                    self.store
                        .for_page(&self.metadata.id, page_number, Some(AnnotationType::Highlight));
                render_highlights(content, &highlights)
            }
            None => PAGE_NOT_FOUND.to_string(),
        }
    }

    /// Build the full reading view for the current position
    pub fn render(&self) -> ReaderView {
        let shown = self.visible_pages();
        let current = self.navigator.current();

        let chapter_title = self
            .content
            .chapter_by_page(&self.metadata.id, current)
            .map(|c| c.title.clone());

        let right = shown
            .right
            .filter(|page| self.content.page_content(&self.metadata.id, *page).is_some())
            .map(|page| RenderedPage {
                page_number: page,
                html: self.render_page(page),
            });

        ReaderView {
            header: ReaderHeader {
                title: self.metadata.title.clone(),
                chapter_title,
                current_page: current,
                total_pages: self.metadata.total_pages,
            },
            left: RenderedPage {
                page_number: shown.left,
                html: self.render_page(shown.left),
            },
            right,
            page_style: self.settings.page_style(),
            theme_class: self.settings.theme.css_class(),
            progress_percent: self.navigator.progress() * 100.0,
            can_go_prev: self.navigator.can_go_prev(),
            can_go_next: self.navigator.can_go_next(),
        }
    }

    pub fn toc(&self) -> Vec<TocEntry> {
        self.content
            .textbook(&self.metadata.id)
            .map(|book| table_of_contents(book, self.navigator.current()))
            .unwrap_or_default()
    }

    /// Navigate to a table-of-contents entry
    pub fn select_toc_entry(&mut self, entry: &TocEntry) -> bool {
        self.go_to_page(entry.start_page)
    }

    /// Context for the study assistant: the selection if any, else the page
    pub fn study_context(&self) -> StudyContext {
        let page = self.navigator.current();
        let chapter_id = self
            .content
            .chapter_by_page(&self.metadata.id, page)
            .map(|c| c.id.clone());

        match self.selection.active() {
            Some(selection) => StudyContext {
                kind: StudyContextKind::Text,
                content: selection.text.clone(),
                textbook_id: self.metadata.id.clone(),
                page_number: Some(selection.page_number),
                chapter_id,
                selected_text: Some(selection.text.clone()),
            },
            None => StudyContext {
                kind: StudyContextKind::Page,
                content: self
                    .content
                    .page_content(&self.metadata.id, page)
                    .unwrap_or_default()
                    .to_string(),
                textbook_id: self.metadata.id.clone(),
                page_number: Some(page),
                chapter_id,
                selected_text: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Catalog;
    use crate::pagination::PageLayout;

    fn session(layout: PageLayout) -> ReaderSession {
        let catalog = Arc::new(Catalog::bundled().unwrap());
        let settings = ReadingSettings {
            page_layout: layout,
            ..Default::default()
        };
        ReaderSession::open(catalog, AnnotationStore::new(), "physics-101", settings).unwrap()
    }

    #[test]
    fn test_open_unknown_textbook() {
        let catalog = Arc::new(Catalog::bundled().unwrap());
        let result = ReaderSession::open(
            catalog,
            AnnotationStore::new(),
            "missing",
            ReadingSettings::default(),
        );
        assert!(matches!(result, Err(ReaderError::NotFound(_))));
    }

    #[test]
    fn test_highlight_end_to_end() {
        let mut reader = session(PageLayout::Single);
        let store = reader.annotations().clone();

        reader.create_annotation(AnnotationDraft {
            textbook_id: "physics-101".to_string(),
            page_number: 1,
            selected_text: "Kinematics".to_string(),
            start_offset: 0,
            end_offset: 10,
            annotation_type: AnnotationType::Highlight,
            color: HighlightColor::Yellow,
            note: None,
        });

        let stored = store.for_page("physics-101", 1, None);
        assert_eq!(stored.len(), 1);
        let id = &stored[0].id;

        let html = reader.render_page(1);
        let span = format!(
            "<span class=\"highlight highlight-yellow\" data-annotation-id=\"{}\">Kinematics</span>",
            id
        );
        // first literal occurrence is the section heading
        assert!(html.contains(&format!("<h2>1.1 {}</h2>", span)));
        assert_eq!(html.matches("data-annotation-id").count(), 1);

        // re-rendering does not double wrap
        assert_eq!(reader.render_page(1), html);
    }

    #[test]
    fn test_selection_to_highlight_clears_selection() {
        let mut reader = session(PageLayout::Spread);

        assert!(reader.handle_selection(&SelectionEvent::on_page(1, " Velocity ")));
        assert_eq!(reader.selection().unwrap().text, "Velocity");

        assert!(reader.highlight_selection(HighlightColor::Green));
        assert!(reader.selection().is_none());
        assert_eq!(reader.annotations().len(), 1);
        assert!(reader.render_page(1).contains("highlight-green"));

        assert!(!reader.highlight_selection(HighlightColor::Green));
    }

    #[test]
    fn test_blank_note_keeps_selection() {
        let mut reader = session(PageLayout::Spread);
        reader.handle_selection(&SelectionEvent::on_page(2, "Acceleration"));

        assert!(!reader.note_selection(HighlightColor::Blue, "  "));
        assert!(reader.selection().is_some());
        assert!(reader.annotations().is_empty());

        assert!(reader.note_selection(HighlightColor::Blue, "dv/dt"));
        let notes = reader.annotations().for_page("physics-101", 2, Some(AnnotationType::Note));
        assert_eq!(notes.len(), 1);
        // notes are not rendered as highlights
        assert!(!reader.render_page(2).contains("data-annotation-id"));
    }

    #[test]
    fn test_selection_on_hidden_page_is_ignored() {
        let mut reader = session(PageLayout::Single);
        assert!(!reader.handle_selection(&SelectionEvent::on_page(2, "Acceleration")));
        assert!(!reader.handle_selection(&SelectionEvent::outside("Library")));
        assert!(reader.selection().is_none());
    }

    #[test]
    fn test_spread_render() {
        let mut reader = session(PageLayout::Spread);
        reader.go_to_page(2);

        let view = reader.render();
        assert_eq!(view.left.page_number, 1);
        assert_eq!(view.right.as_ref().unwrap().page_number, 2);
        assert_eq!(view.header.subtitle(), "Introduction to Motion • Page 2 of 350");
        assert!(view.can_go_prev);
    }

    #[test]
    fn test_missing_pages() {
        let mut reader = session(PageLayout::Spread);
        reader.go_to_page(45);

        let view = reader.render();
        // 45 has no content and 46 does
        assert_eq!(view.left.html, PAGE_NOT_FOUND);
        assert_eq!(view.right.unwrap().page_number, 46);

        reader.go_to_page(200);
        let view = reader.render();
        assert_eq!(view.left.html, PAGE_NOT_FOUND);
        assert!(view.right.is_none());
        assert!(view.header.chapter_title.is_none());
    }

    #[test]
    fn test_navigation_records_progress() {
        let mut reader = session(PageLayout::Spread);
        assert!(reader.handle_key("ArrowRight", KeyTarget::Reader));
        assert_eq!(reader.current_page(), 3);
        assert!(!reader.handle_key("ArrowRight", KeyTarget::TextInput));
        assert!(!reader.go_to_page(351));

        assert_eq!(reader.progress().pages_read, vec![1, 3]);
        assert_eq!(reader.progress().current_page, 3);
    }

    #[test]
    fn test_toc_navigation() {
        let mut reader = session(PageLayout::Single);
        let toc = reader.toc();
        let chapter_two = toc.iter().find(|e| e.id == "ch2").unwrap().clone();

        assert!(reader.select_toc_entry(&chapter_two));
        assert_eq!(reader.current_page(), 46);
        assert!(reader.render().header.subtitle().starts_with("Forces and Newton's Laws"));
    }

    #[test]
    fn test_settings_switch_layout() {
        let mut reader = session(PageLayout::Spread);
        reader.update_settings(ReadingSettings {
            page_layout: PageLayout::Single,
            font_size: 99,
            ..Default::default()
        });

        assert_eq!(reader.settings().font_size, 24);
        assert!(reader.render().right.is_none());
        reader.next_page();
        assert_eq!(reader.current_page(), 2);
    }

    #[test]
    fn test_study_context() {
        let mut reader = session(PageLayout::Single);
        let page_ctx = reader.study_context();
        assert_eq!(page_ctx.kind, StudyContextKind::Page);
        assert_eq!(page_ctx.chapter_id.as_deref(), Some("ch1"));

        reader.handle_selection(&SelectionEvent::on_page(1, "Velocity"));
        let text_ctx = reader.study_context();
        assert_eq!(text_ctx.kind, StudyContextKind::Text);
        assert_eq!(text_ctx.selected_text.as_deref(), Some("Velocity"));
    }
}
