use async_trait::async_trait;
use redis::AsyncCommands;

use crate::database::RedisConnection;
use crate::errors::AppResult;
use crate::services::view_store::ViewStore;

const KEY_PREFIX: &str = "views:";

/// Counts kept as plain Redis integers; `INCR` is atomic per key.
pub struct RedisViewStore {
    redis: RedisConnection,
}

impl RedisViewStore {
    pub fn new(redis: RedisConnection) -> Self {
        Self { redis }
    }

    pub fn key(path: &str) -> String {
        format!("{KEY_PREFIX}{path}")
    }
}

#[async_trait]
impl ViewStore for RedisViewStore {
    async fn increment(&self, path: &str) -> AppResult<i64> {
        let mut conn = self.redis.manager.clone();
        let views: i64 = conn.incr(Self::key(path), 1).await?;
        Ok(views)
    }

    async fn get(&self, path: &str) -> AppResult<i64> {
        let mut conn = self.redis.manager.clone();
        let views: Option<i64> = conn.get(Self::key(path)).await?;
        Ok(views.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced() {
        assert_eq!(RedisViewStore::key("home"), "views:home");
        assert_eq!(RedisViewStore::key("blog/post"), "views:blog/post");
    }
}
