use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::cmp::Reverse;
use std::path::Path;

use crate::models::paging::{paginate, PaginatedResponse, PaginationParams};
use crate::models::portfolio_model::{Dated, PortfolioData};

/// Orders records newest first. Records whose period cannot be parsed go
/// last, keeping their original relative order.
pub fn sort_newest_first<T: Dated>(items: &mut [T]) {
    items.sort_by_cached_key(|item| Reverse(item.end_date()));
}

pub struct PortfolioService;

impl PortfolioService {
    /// Loads `experience.json`, `projects.json` and `certifications.json`
    /// from `dir`, each sorted newest first. A missing file is an empty list.
    pub async fn load(dir: impl AsRef<Path>) -> Result<PortfolioData> {
        let dir = dir.as_ref();

        let mut data = PortfolioData {
            experience: Self::read_list(&dir.join("experience.json")).await?,
            projects: Self::read_list(&dir.join("projects.json")).await?,
            certifications: Self::read_list(&dir.join("certifications.json")).await?,
        };

        sort_newest_first(&mut data.experience);
        sort_newest_first(&mut data.projects);
        sort_newest_first(&mut data.certifications);

        tracing::info!(
            experience = data.experience.len(),
            projects = data.projects.len(),
            certifications = data.certifications.len(),
            "Loaded portfolio data from {}",
            dir.display()
        );

        Ok(data)
    }

    pub fn page<T: Clone>(items: &[T], params: &PaginationParams) -> PaginatedResponse<T> {
        paginate(items, params)
    }

    async fn read_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("{} not found, using an empty list", path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };

        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
    }
}
