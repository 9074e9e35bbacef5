//! Business logic services

pub mod health;
pub mod registry;
pub mod resources;

use crate::repository::Repository;

use self::registry::ResourceRegistry;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub resources: resources::ResourceService,
    pub health: health::HealthService,
}

impl Services {
    /// Create all services backed by the given repository
    pub fn new(repository: Repository) -> Self {
        let registry = ResourceRegistry::from_repository(&repository);
        Self::with_registry(repository, registry)
    }

    /// Create services that resolve resources through a custom registry
    pub fn with_registry(repository: Repository, registry: ResourceRegistry) -> Self {
        Self {
            resources: resources::ResourceService::new(registry),
            health: health::HealthService::new(repository),
        }
    }
}
