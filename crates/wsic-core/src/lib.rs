//! wsic-core
//!
//! Domain types, collaborator traits, error taxonomy, and configuration for
//! the WSIC topic-search subsystem. Engines and adapters live in sibling
//! crates; everything here is I/O-free except the catalog loader.
#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
