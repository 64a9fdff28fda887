//! Document store trait
//!
//! This module defines the interface the rating engine requires from its
//! backing store. Documents are loosely structured json objects; the typed
//! layer above decodes them through strict schemas.

use crate::error::Result;
use async_trait::async_trait;

/// A stored document: a json object keyed by field name
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Trait for document store operations.
///
/// `create_if_absent` is the only concurrency control this crate relies on:
/// the uniqueness guard for rating submissions is sound exactly when the
/// backing store implements it atomically. A backend without a conditional
/// primitive degrades to check-then-write and leaves a race window between
/// two concurrent submissions under the same key.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document by id
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Fetch all documents in a collection whose field equals the given value
    async fn query(
        &self,
        collection: &str,
        field: &str,
        value: &serde_json::Value,
    ) -> Result<Vec<Document>>;

    /// Create or replace a document under a known id
    async fn set(&self, collection: &str, id: &str, document: Document) -> Result<()>;

    /// Merge fields into an existing document
    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<()>;

    /// Append a document under a generated id; returns the id
    async fn add(&self, collection: &str, document: Document) -> Result<String>;

    /// Create a document only if the id is unused. Returns true when the
    /// write happened, false when a document already existed under the id.
    async fn create_if_absent(&self, collection: &str, id: &str, document: Document)
        -> Result<bool>;
}
