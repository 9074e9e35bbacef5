//! Readiness check

use crate::{error::AppResult, repository::Repository};

#[derive(Clone)]
pub struct HealthService {
    repository: Repository,
}

impl HealthService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Succeeds when the database answers a trivial query
    pub async fn ready(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
