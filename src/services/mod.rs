//! Business logic services

pub mod visitors;

use crate::{config::VisitorsConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub visitors: visitors::VisitorsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, visitors_config: VisitorsConfig) -> Self {
        Self {
            visitors: visitors::VisitorsService::new(repository.clone(), visitors_config),
            repository,
        }
    }

    /// Check that storage is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.visitors.ping().await
    }

    /// Close storage connections; called once the server has stopped
    pub async fn shutdown(&self) {
        self.repository.close().await;
    }
}
