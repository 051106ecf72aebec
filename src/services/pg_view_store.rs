use async_trait::async_trait;

use crate::database::Database;
use crate::errors::AppResult;
use crate::models::view_model::ViewRecord;
use crate::services::view_store::ViewStore;

pub struct PgViewStore {
    db: Database,
}

impl PgViewStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ViewStore for PgViewStore {
    async fn increment(&self, path: &str) -> AppResult<i64> {
        let record = sqlx::query_as::<_, ViewRecord>(
            r#"
            INSERT INTO views (path, views)
            VALUES ($1, 1)
            ON CONFLICT (path) DO UPDATE SET views = views.views + 1
            RETURNING views.path, views.views
            "#,
        )
        .bind(path)
        .fetch_one(&self.db.pool)
        .await?;

        Ok(record.views)
    }

    async fn get(&self, path: &str) -> AppResult<i64> {
        let record = sqlx::query_as::<_, ViewRecord>(
            r#"SELECT path, views FROM views WHERE path = $1"#,
        )
        .bind(path)
        .fetch_optional(&self.db.pool)
        .await?;

        Ok(record.map(|r| r.views).unwrap_or(0))
    }
}
