use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::AppResult;

/// Persistent per-path view counts.
///
/// `increment` must be a single atomic insert-or-increment at the storage
/// layer: concurrent calls for one path are all reflected in the final count.
#[async_trait]
pub trait ViewStore: Send + Sync {
    /// Creates the record with 1 or adds 1, returning the new count.
    async fn increment(&self, path: &str) -> AppResult<i64>;

    /// Current count, 0 when the path was never recorded.
    async fn get(&self, path: &str) -> AppResult<i64>;
}

/// In-process store for tests and local runs.
#[derive(Clone, Default)]
pub struct MemoryViewStore {
    inner: Arc<RwLock<HashMap<String, i64>>>,
}

impl MemoryViewStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ViewStore for MemoryViewStore {
    async fn increment(&self, path: &str) -> AppResult<i64> {
        let mut map = self.inner.write().await;
        let views = map.entry(path.to_string()).or_insert(0);
        *views += 1;
        Ok(*views)
    }

    async fn get(&self, path: &str) -> AppResult<i64> {
        let map = self.inner.read().await;
        Ok(map.get(path).copied().unwrap_or(0))
    }
}
