use std::sync::Arc;

use crate::errors::AppResult;
use crate::models::view_model::ViewResponse;
use crate::services::view_store::ViewStore;

pub struct ViewService {
    store: Arc<dyn ViewStore>,
}

impl ViewService {
    pub fn new(store: Arc<dyn ViewStore>) -> Self {
        Self { store }
    }

    pub async fn record_view(&self, path: &str) -> AppResult<ViewResponse> {
        let views = self.store.increment(path).await.map_err(|e| {
            tracing::error!(path, "Error recording view: {}", e);
            e
        })?;

        tracing::debug!(path, views, "View recorded");
        Ok(ViewResponse::new(path, views))
    }

    pub async fn get_views(&self, path: &str) -> AppResult<ViewResponse> {
        let views = self.store.get(path).await.map_err(|e| {
            tracing::error!(path, "Error reading views: {}", e);
            e
        })?;

        Ok(ViewResponse::new(path, views))
    }
}
