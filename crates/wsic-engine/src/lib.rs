//! wsic-engine
//!
//! The topic-search core: the pure reconciliation engine, the concurrent
//! search orchestrator, and the generation trigger. Collaborators (lexical
//! index, embedding provider, vector index, job queue) arrive by injection
//! through the `wsic-core` traits.

pub mod orchestrator;
pub mod queue;
pub mod reconcile;
pub mod trigger;

pub use orchestrator::{SearchOrchestrator, SearchReply, SearchResponse};
pub use queue::MemoryQueue;
pub use reconcile::{reconcile, EngineParams};
pub use trigger::GenerationTrigger;
