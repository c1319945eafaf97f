//! wsic-lexical
//!
//! Tantivy-backed lexical search over published topics. The index stores
//! title/description full text plus the metadata the engine needs to rebuild
//! a `SearchResult` without a catalog round trip.

pub mod index;
pub mod schema;
pub mod search;

pub use index::TopicIndexer;
pub use search::TopicSearcher;
