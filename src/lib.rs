pub mod config;
pub mod database;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use config::{Config, StoreBackend};
use database::{Database, RedisConnection};
use services::pg_view_store::PgViewStore;
use services::redis_view_store::RedisViewStore;
use services::view_store::{MemoryViewStore, ViewStore};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Arc<dyn ViewStore>,
    pub config: Config,
}

impl AppStateInner {
    pub fn new(store: Arc<dyn ViewStore>, config: Config) -> AppState {
        Arc::new(Self { store, config })
    }
}

/// Connects the backend selected by `config.store`.
pub async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn ViewStore>> {
    match config.store {
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for the postgres store"))?;

            tracing::info!("Connecting to database...");
            let db = Database::new(url).await?;
            db.migrate().await?;
            if let Err(e) = db.test_connection().await {
                tracing::error!("Database test failed: {}", e);
                tracing::warn!("Please check your DATABASE_URL and ensure the database is running");
            } else {
                tracing::info!("Database connection successful");
            }

            Ok(Arc::new(PgViewStore::new(db)))
        }
        StoreBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("REDIS_URL is required for the redis store"))?;

            tracing::info!("Connecting to redis...");
            let redis = RedisConnection::new(url).await?;
            if let Err(e) = redis.test_connection().await {
                tracing::error!("Redis test failed: {}", e);
            } else {
                tracing::info!("Redis connection successful");
            }

            Ok(Arc::new(RedisViewStore::new(redis)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory view store, counts are lost on restart");
            Ok(Arc::new(MemoryViewStore::new()))
        }
    }
}
