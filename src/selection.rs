//! Selection capture
//!
//! Turns raw text-selection events from the reading surface into the active
//! selection that annotation actions operate on. Selections made outside a
//! displayed page, or consisting only of whitespace, never change state.

use crate::annotations::{AnnotationDraft, HighlightColor};
use crate::html::locate_text;

/// Where a selection gesture ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSurface {
    /// Inside the displayed page with this number
    Page(u32),
    /// Anywhere outside the reading surface (toolbars, panels, inputs)
    Outside,
}

/// A selection change reported by the UI
#[derive(Debug, Clone)]
pub struct SelectionEvent {
    pub text: String,
    pub surface: SelectionSurface,
}

impl SelectionEvent {
    pub fn on_page(page_number: u32, text: &str) -> Self {
        Self {
            text: text.to_string(),
            surface: SelectionSurface::Page(page_number),
        }
    }

    pub fn outside(text: &str) -> Self {
        Self {
            text: text.to_string(),
            surface: SelectionSurface::Outside,
        }
    }
}

/// The reader's current, non-empty selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub textbook_id: String,
    pub page_number: u32,
    /// Trimmed selected text
    pub text: String,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl Selection {
    pub fn highlight(&self, color: HighlightColor) -> AnnotationDraft {
        AnnotationDraft::highlight(&self.textbook_id, self.page_number, &self.text, color)
            .at_offsets(self.start_offset, self.end_offset)
    }

    /// Note draft, `None` for blank note text
    pub fn note(&self, color: HighlightColor, note: &str) -> Option<AnnotationDraft> {
        AnnotationDraft::note(&self.textbook_id, self.page_number, &self.text, color, note)
            .map(|d| d.at_offsets(self.start_offset, self.end_offset))
    }
}

/// Holds the active selection between a gesture and an annotation action
#[derive(Debug, Default)]
pub struct SelectionCapture {
    active: Option<Selection>,
}

impl SelectionCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a selection event
    ///
    /// `page_html` is the content of the page the selection landed on; when
    /// the text can be located there, offsets are its character position in
    /// the page text, otherwise `0..len`. Returns whether the active
    /// selection changed.
    pub fn handle(&mut self, event: &SelectionEvent, textbook_id: &str, page_html: Option<&str>) -> bool {
        let page_number = match event.surface {
            SelectionSurface::Page(page) => page,
            SelectionSurface::Outside => return false,
        };

        let text = event.text.trim();
        if text.is_empty() {
            return false;
        }

        let (start_offset, end_offset) = page_html
            .and_then(|html| locate_text(html, text))
            .unwrap_or((0, text.chars().count()));

        tracing::debug!(page = page_number, chars = text.chars().count(), "Selection captured");
        self.active = Some(Selection {
            textbook_id: textbook_id.to_string(),
            page_number,
            text: text.to_string(),
            start_offset,
            end_offset,
        });
        true
    }

    pub fn active(&self) -> Option<&Selection> {
        self.active.as_ref()
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::AnnotationType;

    const PAGE: &str = "<h2>1.1 Kinematics</h2>\n<p>Velocity is the rate of change.</p>";

    #[test]
    fn test_captures_trimmed_selection() {
        let mut capture = SelectionCapture::new();
        assert!(capture.handle(&SelectionEvent::on_page(1, "  Velocity \n"), "physics-101", Some(PAGE)));

        let selection = capture.active().unwrap();
        assert_eq!(selection.text, "Velocity");
        assert_eq!(selection.page_number, 1);
        assert_eq!(selection.textbook_id, "physics-101");
        // "1.1 Kinematics Velocity ..."
        assert_eq!((selection.start_offset, selection.end_offset), (15, 23));
    }

    #[test]
    fn test_unlocated_text_falls_back_to_length() {
        let mut capture = SelectionCapture::new();
        capture.handle(&SelectionEvent::on_page(1, "elsewhere"), "physics-101", Some(PAGE));

        let selection = capture.active().unwrap();
        assert_eq!((selection.start_offset, selection.end_offset), (0, 9));

        capture.handle(&SelectionEvent::on_page(2, "no page"), "physics-101", None);
        assert_eq!(capture.active().unwrap().end_offset, 7);
    }

    #[test]
    fn test_whitespace_and_outside_selections_are_ignored() {
        let mut capture = SelectionCapture::new();
        capture.handle(&SelectionEvent::on_page(1, "Velocity"), "physics-101", Some(PAGE));

        assert!(!capture.handle(&SelectionEvent::on_page(1, "  \n\t"), "physics-101", Some(PAGE)));
        assert!(!capture.handle(&SelectionEvent::outside("Settings"), "physics-101", Some(PAGE)));
        assert_eq!(capture.active().unwrap().text, "Velocity");

        capture.clear();
        assert!(capture.active().is_none());
    }

    #[test]
    fn test_selection_drafts() {
        let mut capture = SelectionCapture::new();
        capture.handle(&SelectionEvent::on_page(1, "Velocity"), "physics-101", Some(PAGE));
        let selection = capture.active().unwrap();

        let draft = selection.highlight(HighlightColor::Green);
        assert_eq!(draft.annotation_type, AnnotationType::Highlight);
        assert_eq!(draft.start_offset, 15);

        assert!(selection.note(HighlightColor::Green, "").is_none());
        let note = selection.note(HighlightColor::Green, "dx/dt").unwrap();
        assert_eq!(note.end_offset, 23);
    }
}
