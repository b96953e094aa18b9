//! Key-value store abstraction.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value as JsonValue;
use thiserror::Error;

/// Key-value operation error.
///
/// These are infrastructure errors (storage, serialization at the boundary),
/// as opposed to domain errors (validation, invariants).
#[derive(Debug, Error)]
pub enum KvError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("stored value for {key} failed to decode: {source}")]
    Decode {
        key: String,
        source: serde_json::Error,
    },

    #[error("value for {key} failed to encode: {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

/// Whole-value key-value store.
///
/// Values are JSON documents. Writes replace the whole value; there are no
/// partial updates and no transactions (last-writer-wins at the store).
#[async_trait::async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch the value at `key`; `None` when the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<JsonValue>, KvError>;

    /// Replace the value at `key`.
    async fn put(&self, key: &str, value: JsonValue) -> Result<(), KvError>;
}

#[async_trait::async_trait]
impl<S> KvStore for Arc<S>
where
    S: KvStore + ?Sized,
{
    async fn get(&self, key: &str) -> Result<Option<JsonValue>, KvError> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, value: JsonValue) -> Result<(), KvError> {
        (**self).put(key, value).await
    }
}

/// In-memory store for tests/dev and single-process deployments.
#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    inner: RwLock<HashMap<String, JsonValue>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

#[async_trait::async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<JsonValue>, KvError> {
        let map = self
            .inner
            .read()
            .map_err(|_| KvError::Storage("kv lock poisoned".to_string()))?;
        Ok(map.get(key).cloned())
    }

    async fn put(&self, key: &str, value: JsonValue) -> Result<(), KvError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| KvError::Storage("kv lock poisoned".to_string()))?;
        map.insert(key.to_string(), value);
        Ok(())
    }
}
