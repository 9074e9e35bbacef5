//! Resource service: list, create, get, update and delete for every resource kind
//!
//! Every operation resolves the store for the requested kind, attaches the
//! related kind on reads, and redacts each record before it is returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use super::registry::ResourceRegistry;
use crate::{
    error::{AppError, AppResult},
    models::{map_errors, redact_all, FieldViolation, Record, RecordView, Redact, ResourceKind, WriteOutcome},
};

/// Success body of a resource operation
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Body {
    One(RecordView),
    Many(Vec<RecordView>),
}

/// Status and body produced by a resource operation
#[derive(Debug)]
pub struct Outcome {
    pub status: StatusCode,
    pub body: Option<Body>,
}

impl Outcome {
    fn record(status: StatusCode, record: Record) -> Self {
        Self {
            status,
            body: Some(Body::One(record.redact())),
        }
    }

    fn records(records: Vec<Record>) -> Self {
        Self {
            status: StatusCode::OK,
            body: Some(Body::Many(redact_all(records))),
        }
    }

    fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            body: None,
        }
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}

#[derive(Clone)]
pub struct ResourceService {
    registry: ResourceRegistry,
}

impl ResourceService {
    pub fn new(registry: ResourceRegistry) -> Self {
        Self { registry }
    }

    /// List every record of a kind, with its association attached
    pub async fn list(&self, kind: ResourceKind) -> AppResult<Outcome> {
        let records = self.registry.resolve(kind).find_all(kind.related()).await?;
        tracing::debug!("Listed {} {}", records.len(), kind.collection());
        Ok(Outcome::records(records))
    }

    /// Create a record from a raw payload
    pub async fn create(&self, kind: ResourceKind, payload: &Value) -> AppResult<Outcome> {
        match self.registry.resolve(kind).create(payload).await? {
            WriteOutcome::Written(record) => {
                tracing::info!("Created {} {}", record.kind(), record.id());
                Ok(Outcome::record(StatusCode::CREATED, record))
            }
            WriteOutcome::Rejected(violations) => Err(validation_failure(kind, violations)),
        }
    }

    /// Get one record, with its association attached
    pub async fn get_by_id(&self, kind: ResourceKind, id: i32) -> AppResult<Outcome> {
        let record = self.fetch(kind, id).await?;
        Ok(Outcome::record(StatusCode::OK, record))
    }

    /// Apply a partial update. Existence is checked before anything is written.
    pub async fn update(&self, kind: ResourceKind, id: i32, payload: &Value) -> AppResult<Outcome> {
        let store = self.registry.resolve(kind);
        if store.find_by_id(id, None).await?.is_none() {
            return Err(AppError::NotFound(kind));
        }

        match store.update(id, payload).await? {
            WriteOutcome::Rejected(violations) => return Err(validation_failure(kind, violations)),
            // Removed between the check and the write
            WriteOutcome::Written(0) => return Err(AppError::NotFound(kind)),
            WriteOutcome::Written(_) => {}
        }

        tracing::info!("Updated {} {}", kind, id);
        let record = self.fetch(kind, id).await?;
        Ok(Outcome::record(StatusCode::OK, record))
    }

    /// Permanently delete a record
    pub async fn delete(&self, kind: ResourceKind, id: i32) -> AppResult<Outcome> {
        let store = self.registry.resolve(kind);
        if store.find_by_id(id, None).await?.is_none() {
            return Err(AppError::NotFound(kind));
        }

        store.destroy(id).await?;
        tracing::info!("Deleted {} {}", kind, id);
        Ok(Outcome::no_content())
    }

    async fn fetch(&self, kind: ResourceKind, id: i32) -> AppResult<Record> {
        self.registry
            .resolve(kind)
            .find_by_id(id, kind.related())
            .await?
            .ok_or(AppError::NotFound(kind))
    }
}

fn validation_failure(kind: ResourceKind, violations: Vec<FieldViolation>) -> AppError {
    tracing::debug!("Rejected {} write: {:?}", kind, violations);
    AppError::Validation(map_errors(violations))
}
