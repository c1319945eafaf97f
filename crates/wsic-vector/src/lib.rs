//! wsic-vector
//!
//! LanceDB-backed approximate nearest-neighbor search over topic embeddings,
//! with a typed filter specification rendered to query predicates.

pub mod filter;
pub mod index;
pub mod schema;

pub use index::TopicVectorIndex;
