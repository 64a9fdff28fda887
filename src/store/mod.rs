//! Document store abstraction
//!
//! The rating engine persists through a generic document-style store rather
//! than a concrete backend, so the orchestration is testable without a live
//! service. The store exposes get/query/set/update/add plus a conditional
//! create-if-absent used for the uniqueness guard.

pub mod document;
pub mod memory;

// Re-export commonly used types
pub use document::{Document, DocumentStore};
pub use memory::InMemoryDocumentStore;
