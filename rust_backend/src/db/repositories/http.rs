//! Remote roster repository over the public-works REST API.
//!
//! Reads are plain JSON `GET`s:
//!
//! - `{base_url}/health`
//! - `{base_url}/asignaciones` (optionally `?obra_id=N`)
//! - `{base_url}/obras`

use async_trait::async_trait;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::HttpSettings;
use crate::db::repository::{RepositoryError, RepositoryResult, RosterRepository};
use crate::models::{ContractRecord, ObraId, ProfessionalAssignment};

pub struct HttpRosterRepository {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRosterRepository {
    pub fn new(settings: &HttpSettings) -> RepositoryResult<Self> {
        if settings.base_url.trim().is_empty() {
            return Err(RepositoryError::ConfigurationError(
                "HTTP repository requires 'http.base_url' setting".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| {
                RepositoryError::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> RepositoryResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| RepositoryError::ConnectionError(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<empty response>".to_string());
            warn!("GET {} returned {}", url, status);
            return Err(RepositoryError::QueryError(format!(
                "GET {} returned {}: {}",
                url,
                status,
                body.trim()
            )));
        }

        response.json::<T>().await.map_err(|e| {
            RepositoryError::ValidationError(format!("Failed to decode {} response: {}", path, e))
        })
    }
}

#[async_trait]
impl RosterRepository for HttpRosterRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                warn!("Health check against {} failed: {}", url, e);
                Ok(false)
            }
        }
    }

    async fn list_assignments(
        &self,
        obra_id: Option<ObraId>,
    ) -> RepositoryResult<Vec<ProfessionalAssignment>> {
        let query: Vec<(&str, String)> = obra_id
            .map(|id| vec![("obra_id", id.value().to_string())])
            .unwrap_or_default();
        self.get_json("asignaciones", &query).await
    }

    async fn list_contracts(&self) -> RepositoryResult<Vec<ContractRecord>> {
        self.get_json("obras", &[]).await
    }
}
