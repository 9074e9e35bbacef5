//! Library catalog API
//!
//! A REST JSON API over three resources (books, genres and readers) stored in
//! PostgreSQL. Every resource shares one set of list, create, get, update and
//! delete operations; books and genres are returned with their association
//! attached, and readers never expose their password.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
