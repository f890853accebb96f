//! In-memory annotation store
//!
//! Append-only collection of the annotations created during a reading
//! session. The store is a cheap handle: clones share the same collection,
//! so the reading view, search panel and dashboard all see one sequence.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;

use super::types::{Annotation, AnnotationDraft, AnnotationType};

/// Shared, ordered annotation collection
#[derive(Clone, Default)]
pub struct AnnotationStore {
    annotations: Arc<RwLock<Vec<Annotation>>>,
}

impl std::fmt::Debug for AnnotationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationStore")
            .field("len", &self.len())
            .finish()
    }
}

impl AnnotationStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a draft, assigning a fresh id and timestamps
    ///
    /// Drafts with blank selected text cannot come out of selection capture;
    /// they are dropped with a warning instead of being stored.
    pub fn add(&self, draft: AnnotationDraft) {
        if draft.selected_text.trim().is_empty() {
            tracing::warn!(
                textbook_id = %draft.textbook_id,
                page = draft.page_number,
                "Ignoring annotation draft with empty selected text"
            );
            return;
        }

        let annotation = Annotation::from_draft(draft);
        tracing::debug!(
            id = %annotation.id,
            textbook_id = %annotation.textbook_id,
            page = annotation.page_number,
            kind = %annotation.annotation_type,
            "Annotation added"
        );

        self.annotations.write().push(annotation);
    }

    /// Annotations on one page, in insertion order, optionally by type
    pub fn for_page(
        &self,
        textbook_id: &str,
        page_number: u32,
        annotation_type: Option<AnnotationType>,
    ) -> Vec<Annotation> {
        self.annotations
            .read()
            .iter()
            .filter(|a| a.textbook_id == textbook_id && a.page_number == page_number)
            .filter(|a| annotation_type.map_or(true, |t| a.annotation_type == t))
            .cloned()
            .collect()
    }

    /// Every annotation, in insertion order
    pub fn all(&self) -> Vec<Annotation> {
        self.annotations.read().clone()
    }

    /// Look up an annotation by id
    pub fn get(&self, id: &str) -> Option<Annotation> {
        self.annotations.read().iter().find(|a| a.id == id).cloned()
    }

    /// Replace the note text of an annotation
    ///
    /// The id never changes; `updated_at` is bumped. Returns `false` when no
    /// annotation has the given id.
    pub fn update_note(&self, id: &str, note: &str) -> bool {
        let mut annotations = self.annotations.write();
        match annotations.iter_mut().find(|a| a.id == id) {
            Some(annotation) => {
                annotation.note = Some(note.to_string());
                annotation.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.annotations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.read().is_empty()
    }
}
