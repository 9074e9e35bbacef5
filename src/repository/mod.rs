//! Repository layer for database operations
//!
//! Each resource type has one repository implementing [`ResourceStore`], the
//! storage port used by the resource service. Repositories own the schema rules:
//! they validate payloads, run the SQL, and translate constraint failures into
//! field violations.

pub mod books;
pub mod genres;
pub mod readers;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{error::ErrorKind, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{FieldViolation, Record, ResourceKind, WriteOutcome},
};

/// Storage port for one resource type.
///
/// A write that comes back [`WriteOutcome::Rejected`] has changed nothing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// All records, with the `include` association attached when given
    async fn find_all(&self, include: Option<ResourceKind>) -> AppResult<Vec<Record>>;

    /// One record, with the `include` association attached when given
    async fn find_by_id(&self, id: i32, include: Option<ResourceKind>) -> AppResult<Option<Record>>;

    /// Validate and insert a new record
    async fn create(&self, payload: &Value) -> AppResult<WriteOutcome<Record>>;

    /// Validate and apply the supplied fields. Returns the number of rows touched.
    async fn update(&self, id: i32, payload: &Value) -> AppResult<WriteOutcome<u64>>;

    /// Permanently remove a record. Returns the number of rows removed.
    async fn destroy(&self, id: i32) -> AppResult<u64>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub genres: genres::GenresRepository,
    pub readers: readers::ReadersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            genres: genres::GenresRepository::new(pool.clone()),
            readers: readers::ReadersRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check the database answers
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Storage constraint reported to callers as a field violation
#[derive(Debug, Clone, Copy)]
pub struct Constraint {
    pub name: &'static str,
    pub field: &'static str,
    pub message: &'static str,
}

/// Turn a unique, foreign key or check failure on a known constraint into a
/// rejection. Any other error is an infrastructure fault.
pub(crate) fn rejected<T>(err: sqlx::Error, constraints: &[Constraint]) -> AppResult<WriteOutcome<T>> {
    if let sqlx::Error::Database(ref db) = err {
        let is_constraint = matches!(
            db.kind(),
            ErrorKind::UniqueViolation | ErrorKind::ForeignKeyViolation | ErrorKind::CheckViolation
        );
        let known = db
            .constraint()
            .and_then(|name| constraints.iter().find(|c| c.name == name));

        if let (true, Some(constraint)) = (is_constraint, known) {
            tracing::debug!("Write rejected by constraint {}", constraint.name);
            return Ok(WriteOutcome::Rejected(vec![FieldViolation::new(
                constraint.field,
                constraint.message,
            )]));
        }
    }
    Err(err.into())
}

/// Whether a read should attach `include`. Asking a store for an association it
/// does not have is a wiring defect.
pub(crate) fn wants_include(
    owner: ResourceKind,
    include: Option<ResourceKind>,
    supported: Option<ResourceKind>,
) -> AppResult<bool> {
    match include {
        None => Ok(false),
        Some(kind) if Some(kind) == supported => Ok(true),
        Some(kind) => Err(AppError::Internal(format!(
            "{} records have no association with {}",
            owner, kind
        ))),
    }
}
