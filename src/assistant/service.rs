//! Study assistant service
//!
//! Drives the assistant panel: opening it for a context, running both
//! lookups concurrently and publishing the results. Each request is stamped
//! with a sequence number and a response is only applied while its request
//! is still the latest one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::provider::StudyLookup;
use super::types::{StudyAssistantState, StudyContext};

/// Error shown on the panel when a lookup fails
pub const LOAD_ERROR: &str = "Failed to load study resources";

pub struct StudyAssistant {
    lookup: Arc<dyn StudyLookup>,
    state: Mutex<StudyAssistantState>,
    sequence: AtomicU64,
}

impl StudyAssistant {
    pub fn new(lookup: Arc<dyn StudyLookup>) -> Self {
        Self {
            lookup,
            state: Mutex::new(StudyAssistantState::default()),
            sequence: AtomicU64::new(0),
        }
    }

    /// Current panel state
    pub fn state(&self) -> StudyAssistantState {
        self.state.lock().clone()
    }

    /// Open the panel for `context` and load resources and an explanation
    ///
    /// Returns whether this request's results were applied; a newer request
    /// started in the meantime makes this one stale.
    pub async fn open_with_context(&self, context: StudyContext) -> bool {
        let request = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock();
            state.is_open = true;
            state.current_context = Some(context.clone());
            state.is_loading = true;
            state.error = None;
        }

        tracing::debug!(request, textbook_id = %context.textbook_id, "Study lookup started");

        let (resources, explanation) = tokio::join!(
            self.lookup.search_resources(&context),
            self.lookup.explain(&context)
        );

        let mut state = self.state.lock();
        if self.sequence.load(Ordering::SeqCst) != request {
            tracing::debug!(request, "Discarding stale study lookup response");
            return false;
        }

        match (resources, explanation) {
            (Ok(resources), Ok(explanation)) => {
                state.related_resources = resources;
                state.ai_explanation = Some(explanation);
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("Study lookup failed: {}", e);
                state.error = Some(LOAD_ERROR.to_string());
            }
        }
        state.is_loading = false;
        true
    }

    /// Hide the panel, keeping its data
    pub fn close(&self) {
        self.state.lock().is_open = false;
    }

    pub fn clear_error(&self) {
        self.state.lock().error = None;
    }
}
