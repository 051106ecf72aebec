//! Client side of the view counter: at most one increment per path per
//! browsing session, best effort.

use async_trait::async_trait;
use reqwest::Client;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::errors::ClientError;
use crate::models::view_model::ViewResponse;

/// Session-scoped key/value storage, cleared when the session ends.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

#[derive(Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        let map = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        map.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut map = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        map.insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
pub trait ViewApi: Send + Sync {
    async fn record_view(&self, path: &str) -> Result<ViewResponse, ClientError>;
    async fn get_views(&self, path: &str) -> Result<ViewResponse, ClientError>;
}

/// Talks to the counter service over HTTP.
#[derive(Clone)]
pub struct HttpViewApi {
    client: Client,
    base_url: String,
}

impl HttpViewApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn read_response(res: reqwest::Response) -> Result<ViewResponse, ClientError> {
        let status = res.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }
        Ok(res.json::<ViewResponse>().await?)
    }
}

#[async_trait]
impl ViewApi for HttpViewApi {
    async fn record_view(&self, path: &str) -> Result<ViewResponse, ClientError> {
        let res = self.client.post(self.endpoint(path)).send().await?;
        Self::read_response(res).await
    }

    async fn get_views(&self, path: &str) -> Result<ViewResponse, ClientError> {
        let res = self.client.get(self.endpoint(path)).send().await?;
        Self::read_response(res).await
    }
}

pub struct ClientViewGate<S> {
    session: S,
}

impl<S: SessionStore> ClientViewGate<S> {
    pub fn new(session: S) -> Self {
        Self { session }
    }

    pub fn storage_key(path: &str) -> String {
        format!("viewed_{path}")
    }

    pub fn should_record(&self, path: &str) -> bool {
        self.session.get(&Self::storage_key(path)).as_deref() != Some("true")
    }

    pub fn mark_recorded(&self, path: &str) {
        self.session.set(&Self::storage_key(path), "true");
    }
}

pub struct ViewCounter<A, S> {
    api: A,
    gate: ClientViewGate<S>,
    /// Paths with a record request still outstanding.
    in_flight: Mutex<HashSet<String>>,
}

impl<A: ViewApi, S: SessionStore> ViewCounter<A, S> {
    pub fn new(api: A, session: S) -> Self {
        Self {
            api,
            gate: ClientViewGate::new(session),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Claims `path` for one record attempt. The gate check and the claim
    /// happen under the same lock so overlapping calls cannot both win.
    fn claim(&self, path: &str) -> bool {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if !self.gate.should_record(path) || in_flight.contains(path) {
            return false;
        }
        in_flight.insert(path.to_string());
        true
    }

    fn release(&self, path: &str, recorded: bool) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if recorded {
            self.gate.mark_recorded(path);
        }
        in_flight.remove(path);
    }

    /// Records a view of `path` unless this session already did.
    ///
    /// Returns whether an increment went through. Failures are logged and
    /// leave the path unmarked so a later call can retry.
    pub async fn init(&self, path: &str) -> bool {
        if !self.claim(path) {
            return false;
        }

        let recorded = match self.api.record_view(path).await {
            Ok(response) => {
                tracing::debug!(path, views = response.views, "view recorded");
                true
            }
            Err(e) => {
                tracing::warn!(path, "View counter unavailable: {}", e);
                false
            }
        };

        self.release(path, recorded);
        recorded
    }

    pub async fn views(&self, path: &str) -> Option<i64> {
        match self.api.get_views(path).await {
            Ok(response) => Some(response.views),
            Err(e) => {
                tracing::debug!(path, "View count unavailable: {}", e);
                None
            }
        }
    }
}
