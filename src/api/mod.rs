//! API handlers for the library REST endpoints

pub mod books;
pub mod genres;
pub mod health;
pub mod openapi;
pub mod readers;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::{AppError, AppResult},
    models::ResourceKind,
    AppState,
};

/// Build the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book).patch(books::update_book).delete(books::delete_book),
        )
        // Genres
        .route("/genres", get(genres::list_genres).post(genres::create_genre))
        .route(
            "/genres/:id",
            get(genres::get_genre).patch(genres::update_genre).delete(genres::delete_genre),
        )
        // Readers
        .route("/readers", get(readers::list_readers).post(readers::create_reader))
        .route(
            "/readers/:id",
            get(readers::get_reader).patch(readers::update_reader).delete(readers::delete_reader),
        )
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// A path id that is not an integer can match no record
pub(crate) fn parse_id(kind: ResourceKind, raw: &str) -> AppResult<i32> {
    raw.parse().map_err(|_| AppError::NotFound(kind))
}
