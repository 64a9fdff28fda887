//! In-memory document store implementation
//!
//! Backed by nested hash maps behind an RwLock. Used in tests and local
//! runs; `create_if_absent` is atomic under the write lock, so the
//! uniqueness guard holds here.

use crate::error::{RatingError, Result};
use crate::store::document::{Document, DocumentStore};
use crate::utils::generate_history_id;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

type Collection = HashMap<String, Document>;

/// In-memory document store
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_lock(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Collection>>> {
        self.collections
            .read()
            .map_err(|_| {
                RatingError::InternalError {
                    message: "Failed to acquire collections read lock".to_string(),
                }
                .into()
            })
    }

    fn write_lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Collection>>> {
        self.collections
            .write()
            .map_err(|_| {
                RatingError::InternalError {
                    message: "Failed to acquire collections write lock".to_string(),
                }
                .into()
            })
    }

    /// Number of documents in a collection (for tests and diagnostics)
    pub fn count(&self, collection: &str) -> Result<usize> {
        let collections = self.read_lock()?;
        Ok(collections.get(collection).map_or(0, |c| c.len()))
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let collections = self.read_lock()?;
        Ok(collections
            .get(collection)
            .and_then(|c| c.get(id))
            .cloned())
    }

    async fn query(
        &self,
        collection: &str,
        field: &str,
        value: &serde_json::Value,
    ) -> Result<Vec<Document>> {
        let collections = self.read_lock()?;
        let matches = collections
            .get(collection)
            .map(|c| {
                c.values()
                    .filter(|doc| doc.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(matches)
    }

    async fn set(&self, collection: &str, id: &str, document: Document) -> Result<()> {
        let mut collections = self.write_lock()?;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);

        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<()> {
        let mut collections = self.write_lock()?;
        let existing = collections
            .get_mut(collection)
            .and_then(|c| c.get_mut(id))
            .ok_or_else(|| RatingError::PersistenceFailure {
                message: format!("update of missing document {}/{}", collection, id),
            })?;

        for (key, value) in fields {
            existing.insert(key, value);
        }

        Ok(())
    }

    async fn add(&self, collection: &str, document: Document) -> Result<String> {
        let id = generate_history_id();

        let mut collections = self.write_lock()?;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), document);

        Ok(id)
    }

    async fn create_if_absent(
        &self,
        collection: &str,
        id: &str,
        document: Document,
    ) -> Result<bool> {
        let mut collections = self.write_lock()?;
        let entry = collections.entry(collection.to_string()).or_default();

        if entry.contains_key(id) {
            return Ok(false);
        }

        entry.insert(id.to_string(), document);
        Ok(true)
    }
}
