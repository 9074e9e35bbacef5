//! Resource registry: the store bound to each resource kind

use std::sync::Arc;

use crate::{
    models::ResourceKind,
    repository::{Repository, ResourceStore},
};

/// Stores indexed by resource kind, fixed at start-up
#[derive(Clone)]
pub struct ResourceRegistry {
    books: Arc<dyn ResourceStore>,
    genres: Arc<dyn ResourceStore>,
    readers: Arc<dyn ResourceStore>,
}

impl ResourceRegistry {
    pub fn new(
        books: Arc<dyn ResourceStore>,
        genres: Arc<dyn ResourceStore>,
        readers: Arc<dyn ResourceStore>,
    ) -> Self {
        Self {
            books,
            genres,
            readers,
        }
    }

    /// Bind every kind to its Postgres repository
    pub fn from_repository(repository: &Repository) -> Self {
        Self::new(
            Arc::new(repository.books.clone()),
            Arc::new(repository.genres.clone()),
            Arc::new(repository.readers.clone()),
        )
    }

    pub fn resolve(&self, kind: ResourceKind) -> &dyn ResourceStore {
        match kind {
            ResourceKind::Book => self.books.as_ref(),
            ResourceKind::Genre => self.genres.as_ref(),
            ResourceKind::Reader => self.readers.as_ref(),
        }
    }
}
