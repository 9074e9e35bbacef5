//! Genre API endpoints

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

/// List all genres
#[utoipa::path(
    get,
    path = "/genres",
    tag = "genres",
    responses(
        (status = 200, description = "Genres, each with the books filed under it", body = Vec<crate::models::Genre>)
    )
)]
pub async fn list_genres(State(state): State<crate::AppState>) -> AppResult<Outcome> {
    state.services.resources.list(ResourceKind::Genre).await
}

/// Get genre by ID
#[utoipa::path(
    get,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre with its books", body = crate::models::Genre),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_genre(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Outcome> {
    let id = parse_id(ResourceKind::Genre, &id)?;
    state.services.resources.get_by_id(ResourceKind::Genre, id).await
}

/// Create genre
#[utoipa::path(
    post,
    path = "/genres",
    tag = "genres",
    request_body = crate::models::NewGenre,
    responses(
        (status = 201, description = "Genre created", body = crate::models::Genre),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_genre(
    State(state): State<crate::AppState>,
    Json(payload): Json<Value>,
) -> AppResult<Outcome> {
    state.services.resources.create(ResourceKind::Genre, &payload).await
}

/// Update genre
#[utoipa::path(
    patch,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    request_body = crate::models::GenreChanges,
    responses(
        (status = 200, description = "Genre updated", body = crate::models::Genre),
        (status = 400, description = "Validation failed, nothing was written", body = crate::error::ErrorResponse),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_genre(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> AppResult<Outcome> {
    let id = parse_id(ResourceKind::Genre, &id)?;
    state.services.resources.update(ResourceKind::Genre, id, &payload).await
}

/// Delete genre
#[utoipa::path(
    delete,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 204, description = "Genre deleted, its books are kept without a genre"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_genre(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Outcome> {
    let id = parse_id(ResourceKind::Genre, &id)?;
    state.services.resources.delete(ResourceKind::Genre, id).await
}
