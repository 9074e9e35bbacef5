//! Book API endpoints

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

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Books, each with its genre when it has one", body = Vec<crate::models::Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Outcome> {
    state.services.resources.list(ResourceKind::Book).await
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book with its genre", body = crate::models::Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Outcome> {
    let id = parse_id(ResourceKind::Book, &id)?;
    state.services.resources.get_by_id(ResourceKind::Book, id).await
}

/// Create book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = crate::models::NewBook,
    responses(
        (status = 201, description = "Book created", body = crate::models::Book),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(payload): Json<Value>,
) -> AppResult<Outcome> {
    state.services.resources.create(ResourceKind::Book, &payload).await
}

/// Update book
#[utoipa::path(
    patch,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = crate::models::BookChanges,
    responses(
        (status = 200, description = "Book updated", body = crate::models::Book),
        (status = 400, description = "Validation failed, nothing was written", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> AppResult<Outcome> {
    let id = parse_id(ResourceKind::Book, &id)?;
    state.services.resources.update(ResourceKind::Book, id, &payload).await
}

/// Delete book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Outcome> {
    let id = parse_id(ResourceKind::Book, &id)?;
    state.services.resources.delete(ResourceKind::Book, id).await
}
