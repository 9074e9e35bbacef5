//! Reader API endpoints
//!
//! Passwords are accepted on create and update and are never returned.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::{
    error::AppResult,
    models::ResourceKind,
    services::resources::Outcome,
};

use super::parse_id;

/// List all readers
#[utoipa::path(
    get,
    path = "/readers",
    tag = "readers",
    responses(
        (status = 200, description = "Readers, without their passwords", body = Vec<crate::models::ReaderView>)
    )
)]
pub async fn list_readers(State(state): State<crate::AppState>) -> AppResult<Outcome> {
    state.services.resources.list(ResourceKind::Reader).await
}

/// Get reader by ID
#[utoipa::path(
    get,
    path = "/readers/{id}",
    tag = "readers",
    params(("id" = i32, Path, description = "Reader ID")),
    responses(
        (status = 200, description = "Reader without password", body = crate::models::ReaderView),
        (status = 404, description = "Reader not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_reader(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Outcome> {
    let id = parse_id(ResourceKind::Reader, &id)?;
    state.services.resources.get_by_id(ResourceKind::Reader, id).await
}

/// Create reader
#[utoipa::path(
    post,
    path = "/readers",
    tag = "readers",
    request_body = crate::models::NewReader,
    responses(
        (status = 201, description = "Reader created", body = crate::models::ReaderView),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_reader(
    State(state): State<crate::AppState>,
    Json(payload): Json<Value>,
) -> AppResult<Outcome> {
    state.services.resources.create(ResourceKind::Reader, &payload).await
}

/// Update reader
#[utoipa::path(
    patch,
    path = "/readers/{id}",
    tag = "readers",
    params(("id" = i32, Path, description = "Reader ID")),
    request_body = crate::models::ReaderChanges,
    responses(
        (status = 200, description = "Reader updated", body = crate::models::ReaderView),
        (status = 400, description = "Validation failed, nothing was written", body = crate::error::ErrorResponse),
        (status = 404, description = "Reader not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_reader(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> AppResult<Outcome> {
    let id = parse_id(ResourceKind::Reader, &id)?;
    state.services.resources.update(ResourceKind::Reader, id, &payload).await
}

/// Delete reader
#[utoipa::path(
    delete,
    path = "/readers/{id}",
    tag = "readers",
    params(("id" = i32, Path, description = "Reader ID")),
    responses(
        (status = 204, description = "Reader deleted"),
        (status = 404, description = "Reader not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_reader(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Outcome> {
    let id = parse_id(ResourceKind::Reader, &id)?;
    state.services.resources.delete(ResourceKind::Reader, id).await
}
