//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `VisitedSet`: URLs already fetched during one run
//! - `PageOutcome`: what processing a single intermediate page produced

mod page_outcome;
mod visited;

// Re-export main types
pub use page_outcome::PageOutcome;
pub use visited::{KeyMode, VisitedSet};
