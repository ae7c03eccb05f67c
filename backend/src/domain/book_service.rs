//! Book domain service.
//!
//! Implements the driving ports over a [`BookRepository`], turning repository
//! failures into domain [`Error`]s. Every use-case makes at most two storage
//! calls; the load-then-write sequence in `update_book` is not atomic against
//! concurrent writers to the same id.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{BookRepository, BookRepositoryError, BooksCommand, BooksQuery};
use crate::domain::{Book, BookId, BookPatch, Error, NewBook};

/// Book service implementing [`BooksQuery`] and [`BooksCommand`].
#[derive(Clone)]
pub struct BookService<R> {
    repository: Arc<R>,
}

impl<R> BookService<R> {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_repository_error(err: BookRepositoryError) -> Error {
    match err {
        BookRepositoryError::Connection { message } => {
            error!(%message, "book repository unavailable");
            Error::internal(format!("book repository unavailable: {message}"))
        }
        BookRepositoryError::Query { message } => {
            error!(%message, "book repository query failed");
            Error::internal(format!("book repository error: {message}"))
        }
        BookRepositoryError::Conflict { message } => {
            debug!(%message, "book write rejected by constraint");
            Error::conflict(message)
        }
        BookRepositoryError::NotFound { id } => Error::not_found(format!("book {id} not found")),
    }
}

fn not_found(id: BookId) -> Error {
    Error::not_found(format!("book {id} not found"))
}

#[async_trait]
impl<R> BooksQuery for BookService<R>
where
    R: BookRepository,
{
    async fn list_books(&self) -> Result<Vec<Book>, Error> {
        self.repository.list().await.map_err(map_repository_error)
    }

    async fn get_book(&self, id: BookId) -> Result<Book, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }
}

#[async_trait]
impl<R> BooksCommand for BookService<R>
where
    R: BookRepository,
{
    async fn create_book(&self, book: NewBook) -> Result<Book, Error> {
        self.repository
            .create(&book)
            .await
            .map_err(map_repository_error)
    }

    async fn create_books(&self, books: Vec<NewBook>) -> Result<Vec<Book>, Error> {
        if books.is_empty() {
            return Ok(Vec::new());
        }
        self.repository
            .create_many(&books)
            .await
            .map_err(map_repository_error)
    }

    async fn update_book(&self, id: BookId, patch: BookPatch) -> Result<Book, Error> {
        let current = self.get_book(id).await?;
        let merged = patch.apply_to(current, id);
        self.repository
            .update(id, &merged)
            .await
            .map_err(map_repository_error)
    }

    async fn delete_book(&self, id: BookId) -> Result<(), Error> {
        self.repository
            .delete(id)
            .await
            .map_err(map_repository_error)
    }
}
