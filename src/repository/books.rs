//! Books repository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::{Pool, Postgres};

use super::{genres, rejected, wants_include, Constraint, ResourceStore};
use crate::{
    error::AppResult,
    models::{Book, BookChanges, Genre, NewBook, Record, ResourceKind, WriteOutcome},
};

const CONSTRAINTS: &[Constraint] = &[
    Constraint {
        name: "books_genre_id_fkey",
        field: "genre_id",
        message: "genre_id must reference an existing genre",
    },
    Constraint {
        name: "books_title_check",
        field: "title",
        message: "Title cannot be empty",
    },
    Constraint {
        name: "books_author_check",
        field: "author",
        message: "Author cannot be empty",
    },
];

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all books
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Insert a validated book
    pub async fn insert(&self, data: &NewBook) -> Result<Book, sqlx::Error> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, isbn, genre_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(data.isbn)
        .bind(data.genre_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Apply validated changes in a single statement
    pub async fn update_fields(&self, id: i32, data: &BookChanges) -> Result<u64, sqlx::Error> {
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.title, "title");
        add_field!(data.author, "author");
        add_field!(data.isbn, "isbn");
        add_field!(data.genre_id, "genre_id");

        let query = format!("UPDATE books SET {} WHERE id = ${}", sets.join(", "), idx);

        let mut builder = sqlx::query(&query).bind(Utc::now());

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.title);
        bind_field!(data.author);
        bind_field!(data.isbn);
        bind_field!(data.genre_id);

        let result = builder.bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Delete book
    pub async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Attach each book's genre
    async fn attach_genres(&self, books: &mut [Book]) -> AppResult<()> {
        let mut ids: Vec<i32> = books.iter().filter_map(|b| b.genre_id).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(());
        }

        let found = genres::fetch_by_ids(&self.pool, &ids).await?;
        embed_genres(books, found);
        Ok(())
    }
}

/// Set each book's genre from `found`, matched on `genre_id`
fn embed_genres(books: &mut [Book], found: Vec<Genre>) {
    let by_id: HashMap<i32, Genre> = found.into_iter().map(|g| (g.id, g)).collect();
    for book in books.iter_mut() {
        book.genre = book.genre_id.and_then(|id| by_id.get(&id).cloned());
    }
}

/// Books filed under any of the given genres
pub(crate) async fn fetch_by_genre_ids(pool: &Pool<Postgres>, genre_ids: &[i32]) -> AppResult<Vec<Book>> {
    let rows = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE genre_id = ANY($1) ORDER BY id")
        .bind(genre_ids)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

#[async_trait]
impl ResourceStore for BooksRepository {
    async fn find_all(&self, include: Option<ResourceKind>) -> AppResult<Vec<Record>> {
        let mut books = self.list().await?;
        if wants_include(ResourceKind::Book, include, ResourceKind::Book.related())? {
            self.attach_genres(&mut books).await?;
        }
        Ok(books.into_iter().map(Record::from).collect())
    }

    async fn find_by_id(&self, id: i32, include: Option<ResourceKind>) -> AppResult<Option<Record>> {
        let Some(book) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let mut books = [book];
        if wants_include(ResourceKind::Book, include, ResourceKind::Book.related())? {
            self.attach_genres(&mut books).await?;
        }
        let [book] = books;
        Ok(Some(book.into()))
    }

    async fn create(&self, payload: &Value) -> AppResult<WriteOutcome<Record>> {
        let data = match NewBook::from_payload(payload) {
            Ok(data) => data,
            Err(violations) => return Ok(WriteOutcome::Rejected(violations)),
        };

        match self.insert(&data).await {
            Ok(book) => Ok(WriteOutcome::Written(book.into())),
            Err(err) => rejected(err, CONSTRAINTS),
        }
    }

    async fn update(&self, id: i32, payload: &Value) -> AppResult<WriteOutcome<u64>> {
        let data = match BookChanges::from_payload(payload) {
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

    fn book(id: i32, genre_id: Option<i32>) -> Book {
        Book {
            id,
            title: format!("Book {}", id),
            author: "Walt Whitman".to_string(),
            isbn: None,
            genre_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            genre: None,
        }
    }

    fn genre(id: i32, name: &str) -> Genre {
        Genre {
            id,
            genre: name.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            books: None,
        }
    }

    #[test]
    fn test_embed_genres_matches_on_genre_id() {
        let mut books = vec![book(1, Some(2)), book(2, None), book(3, Some(1)), book(4, Some(2))];

        embed_genres(&mut books, vec![genre(1, "poetry"), genre(2, "crime")]);

        assert_eq!(books[0].genre.as_ref().map(|g| g.genre.as_str()), Some("crime"));
        assert!(books[1].genre.is_none());
        assert_eq!(books[2].genre.as_ref().map(|g| g.id), Some(1));
        assert_eq!(books[3].genre.as_ref().map(|g| g.id), Some(2));
    }

    #[test]
    fn test_embed_genres_unknown_genre_stays_empty() {
        let mut books = vec![book(1, Some(9))];
        embed_genres(&mut books, vec![genre(1, "poetry")]);
        assert!(books[0].genre.is_none());
    }
}
