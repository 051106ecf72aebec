use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Path recorded for the site root.
pub const HOME_PATH: &str = "home";

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ViewRecord {
    pub path: String,
    pub views: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewResponse {
    pub path: String,
    pub views: i64,
}

impl ViewResponse {
    pub fn new(path: impl Into<String>, views: i64) -> Self {
        Self {
            path: path.into(),
            views,
        }
    }
}
