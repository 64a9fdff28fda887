//! Test fixtures and mock implementations for integration testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use teamatch_rating::error::{RatingError, Result};
use teamatch_rating::store::{Document, DocumentStore, InMemoryDocumentStore};
use teamatch_rating::types::RatingSubmission;

/// Initialize test logging once per process
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Build a well-formed submission for tests
pub fn submission(match_id: &str, rater: &str, player: &str, scores: Vec<f64>) -> RatingSubmission {
    RatingSubmission {
        rater_id: rater.to_string(),
        rated_player_id: player.to_string(),
        match_id: match_id.to_string(),
        scores,
    }
}

/// Store wrapper whose writes can be switched to fail, for exercising
/// persistence-failure paths. Reads always pass through.
pub struct FlakyStore {
    inner: InMemoryDocumentStore,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryDocumentStore::new(),
            fail_writes: AtomicBool::new(false),
        })
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &InMemoryDocumentStore {
        &self.inner
    }

    fn check_writes(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RatingError::PersistenceFailure {
                message: "injected write failure".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.inner.get(collection, id).await
    }

    async fn query(
        &self,
        collection: &str,
        field: &str,
        value: &serde_json::Value,
    ) -> Result<Vec<Document>> {
        self.inner.query(collection, field, value).await
    }

    async fn set(&self, collection: &str, id: &str, document: Document) -> Result<()> {
        self.check_writes()?;
        self.inner.set(collection, id, document).await
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<()> {
        self.check_writes()?;
        self.inner.update(collection, id, fields).await
    }

    async fn add(&self, collection: &str, document: Document) -> Result<String> {
        self.check_writes()?;
        self.inner.add(collection, document).await
    }

    async fn create_if_absent(
        &self,
        collection: &str,
        id: &str,
        document: Document,
    ) -> Result<bool> {
        self.check_writes()?;
        self.inner.create_if_absent(collection, id, document).await
    }
}
