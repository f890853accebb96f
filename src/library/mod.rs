//! Library module for textbook management
//!
//! Handles the textbook catalog, page content lookup, reading progress and
//! table-of-contents navigation.

mod catalog;
mod toc;
mod types;

pub use catalog::*;
pub use toc::*;
pub use types::*;
