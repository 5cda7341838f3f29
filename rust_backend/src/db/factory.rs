//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository instances
//! based on runtime configuration.

use log::info;
use std::path::Path;
use std::sync::Arc;

use super::repositories::{LocalRepository, RosterFixture};
use super::repository::{RepositoryError, RepositoryResult, RosterRepository};
use crate::config::HttpSettings;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory roster
    Local,
    /// Public-works REST API
    Http,
}

impl RepositoryType {
    /// Parse repository type from string ("local", "http").
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            "http" | "rest" => Ok(Self::Http),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }

    /// Get repository type from the `REPOSITORY_TYPE` environment variable.
    ///
    /// Defaults to `Local` if unset or unrecognized.
    pub fn from_env() -> Self {
        std::env::var("REPOSITORY_TYPE")
            .ok()
            .and_then(|s| Self::from_str(&s).ok())
            .unwrap_or(Self::Local)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Http => "http",
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```
/// use obras_rust::db::{RepositoryFactory, RepositoryType};
///
/// let repo = RepositoryFactory::create(RepositoryType::Local, None).unwrap();
/// # let _ = repo;
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// `http` settings are required for [`RepositoryType::Http`] and ignored
    /// otherwise.
    pub fn create(
        repo_type: RepositoryType,
        http: Option<&HttpSettings>,
    ) -> RepositoryResult<Arc<dyn RosterRepository>> {
        info!("Creating {} roster repository", repo_type.as_str());
        match repo_type {
            RepositoryType::Local => Ok(Self::create_local()),
            RepositoryType::Http => {
                let settings = http.ok_or_else(|| {
                    RepositoryError::ConfigurationError(
                        "HTTP repository requires [http] settings".to_string(),
                    )
                })?;
                Self::create_http(settings)
            }
        }
    }

    /// Create a repository able to answer availability queries.
    ///
    /// A roster fixture, when given, seeds an in-memory backend whatever the
    /// configured type. An empty local backend is refused because it would
    /// report every professional as available without checking anything.
    pub fn create_for_availability(
        repo_type: RepositoryType,
        http: Option<&HttpSettings>,
        roster: Option<&Path>,
    ) -> RepositoryResult<Arc<dyn RosterRepository>> {
        match (roster, repo_type) {
            (Some(path), _) => {
                let fixture = RosterFixture::from_file(path)?;
                Ok(Arc::new(LocalRepository::from_fixture(fixture)))
            }
            (None, RepositoryType::Local) => Err(RepositoryError::ConfigurationError(
                "Local repository has no roster to check against; provide a roster fixture \
                 or configure the http repository"
                    .to_string(),
            )),
            (None, RepositoryType::Http) => Self::create(repo_type, http),
        }
    }

    /// Create an empty in-memory repository.
    pub fn create_local() -> Arc<dyn RosterRepository> {
        Arc::new(LocalRepository::new())
    }

    #[cfg(feature = "http-repo")]
    pub fn create_http(settings: &HttpSettings) -> RepositoryResult<Arc<dyn RosterRepository>> {
        let repo = super::repositories::HttpRosterRepository::new(settings)?;
        Ok(Arc::new(repo))
    }

    #[cfg(not(feature = "http-repo"))]
    pub fn create_http(_settings: &HttpSettings) -> RepositoryResult<Arc<dyn RosterRepository>> {
        Err(RepositoryError::ConfigurationError(
            "HTTP repository support not compiled in; enable the 'http-repo' feature".to_string(),
        ))
    }

    /// Create the repository selected by `REPOSITORY_TYPE`.
    ///
    /// The HTTP backend reads its base URL from `ROSTER_API_URL`.
    pub fn from_env() -> RepositoryResult<Arc<dyn RosterRepository>> {
        match RepositoryType::from_env() {
            RepositoryType::Local => Ok(Self::create_local()),
            RepositoryType::Http => {
                let base_url = std::env::var("ROSTER_API_URL").map_err(|_| {
                    RepositoryError::ConfigurationError(
                        "ROSTER_API_URL must be set for the http repository".to_string(),
                    )
                })?;
                let settings = HttpSettings {
                    base_url,
                    ..HttpSettings::default()
                };
                Self::create_http(&settings)
            }
        }
    }
}
