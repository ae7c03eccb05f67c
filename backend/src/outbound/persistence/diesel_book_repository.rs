//! PostgreSQL-backed `BookRepository` implementation using Diesel ORM.
//!
//! Deletes are soft: the row keeps its data and gains a `deleted_at`
//! timestamp, after which every query here ignores it. Identifiers always come
//! from the table sequence; a client-supplied id is not persisted.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BookRepository, BookRepositoryError};
use crate::domain::{Book, BookId, NewBook};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{BookRow, BookUpdate, NewBookRow};
use super::pool::DbPool;
use super::schema::books;

/// Diesel-backed implementation of the `BookRepository` port.
#[derive(Clone)]
pub struct DieselBookRepository {
    pool: DbPool,
}

impl DieselBookRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_book(row: BookRow) -> Book {
    Book {
        id: BookId::new(row.id),
        title: row.title,
        author: row.author,
        year: row.year,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn new_row(book: &NewBook) -> NewBookRow<'_> {
    NewBookRow {
        title: book.title.as_str(),
        author: book.author.as_str(),
        year: book.year,
    }
}

#[async_trait]
impl BookRepository for DieselBookRepository {
    async fn list(&self) -> Result<Vec<Book>, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<BookRow> = books::table
            .filter(books::deleted_at.is_null())
            .order(books::id.asc())
            .select(BookRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_book).collect())
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<BookRow> = books::table
            .filter(books::id.eq(id.as_i64()))
            .filter(books::deleted_at.is_null())
            .select(BookRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_book))
    }

    async fn create(&self, book: &NewBook) -> Result<Book, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: BookRow = diesel::insert_into(books::table)
            .values(&new_row(book))
            .returning(BookRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_book(row))
    }

    async fn create_many(&self, new_books: &[NewBook]) -> Result<Vec<Book>, BookRepositoryError> {
        if new_books.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // A multi-row INSERT is one statement, so a constraint failure on any
        // row rolls back the whole batch.
        let values: Vec<NewBookRow<'_>> = new_books.iter().map(new_row).collect();
        let rows: Vec<BookRow> = diesel::insert_into(books::table)
            .values(&values)
            .returning(BookRow::as_returning())
            .get_results(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_book).collect())
    }

    async fn update(&self, id: BookId, book: &Book) -> Result<Book, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = BookUpdate {
            title: book.title.as_str(),
            author: book.author.as_str(),
            year: book.year,
            updated_at: Utc::now(),
        };
        let row: Option<BookRow> = diesel::update(
            books::table
                .filter(books::id.eq(id.as_i64()))
                .filter(books::deleted_at.is_null()),
        )
        .set(&changes)
        .returning(BookRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_book)
            .ok_or_else(|| BookRepositoryError::not_found(id))
    }

    async fn delete(&self, id: BookId) -> Result<(), BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(
            books::table
                .filter(books::id.eq(id.as_i64()))
                .filter(books::deleted_at.is_null()),
        )
        .set(books::deleted_at.eq(Some(Utc::now())))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        if affected == 0 {
            return Err(BookRepositoryError::not_found(id));
        }
        Ok(())
    }
}
