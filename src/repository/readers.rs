//! Readers repository

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::{Pool, Postgres};

use super::{rejected, wants_include, Constraint, ResourceStore};
use crate::{
    error::{AppError, AppResult},
    models::{NewReader, Reader, ReaderChanges, Record, ResourceKind, WriteOutcome},
};

const CONSTRAINTS: &[Constraint] = &[
    Constraint {
        name: "readers_email_key",
        field: "email",
        message: "Readers.email must be unique",
    },
    Constraint {
        name: "readers_name_check",
        field: "name",
        message: "Name cannot be empty",
    },
    Constraint {
        name: "readers_email_check",
        field: "email",
        message: "Email cannot be empty",
    },
];

#[derive(Clone)]
pub struct ReadersRepository {
    pool: Pool<Postgres>,
}

impl ReadersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all readers
    pub async fn list(&self) -> AppResult<Vec<Reader>> {
        let rows = sqlx::query_as::<_, Reader>("SELECT * FROM readers ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get reader by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Reader>> {
        let row = sqlx::query_as::<_, Reader>("SELECT * FROM readers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Insert a validated reader with an already hashed password
    pub async fn insert(&self, name: &str, email: &str, password_hash: &str) -> Result<Reader, sqlx::Error> {
        sqlx::query_as::<_, Reader>(
            r#"
            INSERT INTO readers (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
    }

    /// Apply validated changes; `password_hash` replaces the stored hash when given
    pub async fn update_fields(
        &self,
        id: i32,
        data: &ReaderChanges,
        password_hash: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE readers
            SET updated_at = $1,
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                password = COALESCE($4, password)
            WHERE id = $5
            "#,
        )
        .bind(Utc::now())
        .bind(&data.name)
        .bind(&data.email)
        .bind(password_hash)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete reader
    pub async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM readers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Hash a password with argon2 and a random salt
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

#[async_trait]
impl ResourceStore for ReadersRepository {
    async fn find_all(&self, include: Option<ResourceKind>) -> AppResult<Vec<Record>> {
        wants_include(ResourceKind::Reader, include, ResourceKind::Reader.related())?;
        let readers = self.list().await?;
        Ok(readers.into_iter().map(Record::from).collect())
    }

    async fn find_by_id(&self, id: i32, include: Option<ResourceKind>) -> AppResult<Option<Record>> {
        wants_include(ResourceKind::Reader, include, ResourceKind::Reader.related())?;
        Ok(self.get_by_id(id).await?.map(Record::from))
    }

    async fn create(&self, payload: &Value) -> AppResult<WriteOutcome<Record>> {
        let data = match NewReader::from_payload(payload) {
            Ok(data) => data,
            Err(violations) => return Ok(WriteOutcome::Rejected(violations)),
        };

        let name = data.name.unwrap_or_default();
        let email = data.email.unwrap_or_default();
        let password_hash = hash_password(&data.password.unwrap_or_default())?;

        match self.insert(&name, &email, &password_hash).await {
            Ok(reader) => Ok(WriteOutcome::Written(reader.into())),
            Err(err) => rejected(err, CONSTRAINTS),
        }
    }

    async fn update(&self, id: i32, payload: &Value) -> AppResult<WriteOutcome<u64>> {
        let data = match ReaderChanges::from_payload(payload) {
            Ok(data) => data,
            Err(violations) => return Ok(WriteOutcome::Rejected(violations)),
        };

        let password_hash = data.password.as_deref().map(hash_password).transpose()?;

        match self.update_fields(id, &data, password_hash.as_deref()).await {
            Ok(rows) => Ok(WriteOutcome::Written(rows)),
            Err(err) => rejected(err, CONSTRAINTS),
        }
    }

    async fn destroy(&self, id: i32) -> AppResult<u64> {
        self.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    #[test]
    fn test_hash_password_verifies() {
        let hash = hash_password("secret-password").unwrap();
        assert_ne!(hash, "secret-password");

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(Argon2::default()
            .verify_password(b"secret-password", &parsed)
            .is_ok());
        assert!(Argon2::default()
            .verify_password(b"wrong-password", &parsed)
            .is_err());
    }
}
