//! Study Assistant Module
//!
//! Contextual help for the passage being read: related resources and an
//! explanation, fetched through a pluggable [`StudyLookup`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use textbook_reader::assistant::{MockStudyLookup, StudyAssistant};
//!
//! let assistant = StudyAssistant::new(Arc::new(MockStudyLookup::default()));
//! assistant.open_with_context(session.study_context()).await;
//! let state = assistant.state();
//! ```

mod provider;
mod service;
mod types;

pub use provider::{MockStudyLookup, StudyLookup};
pub use service::{StudyAssistant, LOAD_ERROR};
pub use types::*;
