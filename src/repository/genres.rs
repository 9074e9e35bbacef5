//! Genres repository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::{Pool, Postgres};

use super::{books, rejected, wants_include, Constraint, ResourceStore};
use crate::{
    error::AppResult,
    models::{Book, Genre, GenreChanges, NewGenre, Record, ResourceKind, WriteOutcome},
};

const CONSTRAINTS: &[Constraint] = &[
    Constraint {
        name: "genres_genre_key",
        field: "genre",
        message: "Genres.genre must be unique",
    },
    Constraint {
        name: "genres_genre_check",
        field: "genre",
        message: "Genre cannot be empty",
    },
];

#[derive(Clone)]
pub struct GenresRepository {
    pool: Pool<Postgres>,
}

impl GenresRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all genres
    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>("SELECT * FROM genres ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get genre by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>("SELECT * FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Insert a validated genre
    pub async fn insert(&self, data: &NewGenre) -> Result<Genre, sqlx::Error> {
        sqlx::query_as::<_, Genre>("INSERT INTO genres (genre) VALUES ($1) RETURNING *")
            .bind(&data.genre)
            .fetch_one(&self.pool)
            .await
    }

    /// Apply validated changes
    pub async fn update_fields(&self, id: i32, data: &GenreChanges) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE genres SET updated_at = $1, genre = COALESCE($2, genre) WHERE id = $3",
        )
        .bind(Utc::now())
        .bind(&data.genre)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete genre. Books filed under it keep existing without a genre.
    pub async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Attach the books filed under each genre
    async fn attach_books(&self, genres: &mut [Genre]) -> AppResult<()> {
        if genres.is_empty() {
            return Ok(());
        }

        let ids: Vec<i32> = genres.iter().map(|g| g.id).collect();
        let books = books::fetch_by_genre_ids(&self.pool, &ids).await?;
        group_books(genres, books);
        Ok(())
    }
}

/// Give each genre the books filed under it, in the order given.
/// A genre without books gets an empty list.
fn group_books(genres: &mut [Genre], books: Vec<Book>) {
    let mut by_genre: HashMap<i32, Vec<Book>> = HashMap::new();
    for book in books {
        if let Some(genre_id) = book.genre_id {
            by_genre.entry(genre_id).or_default().push(book);
        }
    }

    for genre in genres.iter_mut() {
        genre.books = Some(by_genre.remove(&genre.id).unwrap_or_default());
    }
}

/// Genres with the given ids
pub(crate) async fn fetch_by_ids(pool: &Pool<Postgres>, ids: &[i32]) -> AppResult<Vec<Genre>> {
    let rows = sqlx::query_as::<_, Genre>("SELECT * FROM genres WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

#[async_trait]
impl ResourceStore for GenresRepository {
    async fn find_all(&self, include: Option<ResourceKind>) -> AppResult<Vec<Record>> {
        let mut genres = self.list().await?;
        if wants_include(ResourceKind::Genre, include, ResourceKind::Genre.related())? {
            self.attach_books(&mut genres).await?;
        }
        Ok(genres.into_iter().map(Record::from).collect())
    }

    async fn find_by_id(&self, id: i32, include: Option<ResourceKind>) -> AppResult<Option<Record>> {
        let Some(genre) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let mut genres = [genre];
        if wants_include(ResourceKind::Genre, include, ResourceKind::Genre.related())? {
            self.attach_books(&mut genres).await?;
        }
        let [genre] = genres;
        Ok(Some(genre.into()))
    }

    async fn create(&self, payload: &Value) -> AppResult<WriteOutcome<Record>> {
        let data = match NewGenre::from_payload(payload) {
            Ok(data) => data,
            Err(violations) => return Ok(WriteOutcome::Rejected(violations)),
        };

        match self.insert(&data).await {
            Ok(genre) => Ok(WriteOutcome::Written(genre.into())),
            Err(err) => rejected(err, CONSTRAINTS),
        }
    }

    async fn update(&self, id: i32, payload: &Value) -> AppResult<WriteOutcome<u64>> {
        let data = match GenreChanges::from_payload(payload) {
            Ok(data) => data,
            Err(violations) => return Ok(WriteOutcome::Rejected(violations)),
        };

        match self.update_fields(id, &data).await {
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

    fn genre(id: i32) -> Genre {
        Genre {
            id,
            genre: format!("genre {}", id),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            books: None,
        }
    }

    fn book(id: i32, genre_id: Option<i32>) -> Book {
        Book {
            id,
            title: format!("Book {}", id),
            author: "Ian Rankin".to_string(),
            isbn: None,
            genre_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            genre: None,
        }
    }

    #[test]
    fn test_group_books_by_genre() {
        let mut genres = vec![genre(1), genre(2), genre(3)];

        group_books(
            &mut genres,
            vec![book(10, Some(2)), book(11, Some(1)), book(12, Some(2)), book(13, None)],
        );

        let ids = |g: &Genre| -> Vec<i32> { g.books.as_ref().unwrap().iter().map(|b| b.id).collect() };
        assert_eq!(ids(&genres[0]), vec![11]);
        assert_eq!(ids(&genres[1]), vec![10, 12]);
        assert_eq!(ids(&genres[2]), Vec::<i32>::new());
    }
}
