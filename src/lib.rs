//! Textbook Reader Library
//!
//! Reading core for an e-textbook application: page navigation, text
//! selection, highlights and notes rendered into page HTML, plus the study
//! tools built on top of annotations.
//!
//! # Modules
//!
//! - `annotations`: Annotation records, the shared store and search
//! - `html`: Highlight injection and page text extraction
//! - `selection`: Selection capture from the reading surface
//! - `pagination`: Single-page and two-page spread navigation
//! - `reader`: The reading session, settings and keyboard handling
//! - `library`: Textbook catalog, reading progress and table of contents
//! - `bibliography`: Citations for quoted passages
//! - `flashcards`: Flashcards created from annotations
//! - `dashboard`: Study statistics
//! - `assistant`: Contextual study assistant

pub mod annotations;
pub mod assistant;
pub mod bibliography;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod flashcards;
pub mod html;
pub mod library;
pub mod pagination;
pub mod reader;
pub mod selection;

pub use error::{ReaderError, Result};
