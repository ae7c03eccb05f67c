//! In-memory `BookRepository` backed by an ordered map.
//!
//! Honours client-supplied identifiers and otherwise assigns the next free id.
//! Rows are removed outright on delete. Titles are unique unless the
//! repository is built with [`InMemoryBookRepository::without_unique_titles`].

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{BookRepository, BookRepositoryError};
use crate::domain::{Book, BookId, NewBook};

#[derive(Debug)]
struct Rows {
    books: BTreeMap<BookId, Book>,
    next_id: i64,
}

impl Default for Rows {
    fn default() -> Self {
        Self {
            books: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl Rows {
    fn title_taken(&self, title: &str, except: Option<BookId>) -> bool {
        self.books
            .values()
            .any(|book| book.title == title && Some(book.id) != except)
    }

    fn allocate_id(&mut self, requested: Option<BookId>) -> BookId {
        let id = requested.unwrap_or(BookId::new(self.next_id));
        self.next_id = self.next_id.max(id.as_i64().saturating_add(1));
        id
    }

    fn insert(&mut self, new_book: &NewBook) -> Book {
        let id = self.allocate_id(new_book.id);
        let now = Utc::now();
        let book = Book {
            id,
            title: new_book.title.clone(),
            author: new_book.author.clone(),
            year: new_book.year,
            created_at: now,
            updated_at: now,
        };
        self.books.insert(id, book.clone());
        book
    }
}

/// Process-local book store.
#[derive(Debug)]
pub struct InMemoryBookRepository {
    rows: Mutex<Rows>,
    unique_titles: bool,
}

impl Default for InMemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBookRepository {
    /// Create an empty store that rejects duplicate titles.
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Rows::default()),
            unique_titles: true,
        }
    }

    /// Create an empty store that accepts duplicate titles.
    pub fn without_unique_titles() -> Self {
        Self {
            unique_titles: false,
            ..Self::new()
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Rows>, BookRepositoryError> {
        self.rows
            .lock()
            .map_err(|_| BookRepositoryError::query("in-memory book store lock poisoned"))
    }

    /// Check `candidate` against stored rows and the ids/titles already staged
    /// by the current write.
    fn check_insert(
        &self,
        rows: &Rows,
        candidate: &NewBook,
        staged: &[&NewBook],
    ) -> Result<(), BookRepositoryError> {
        if let Some(id) = candidate.id {
            let staged_clash = staged.iter().any(|other| other.id == Some(id));
            if rows.books.contains_key(&id) || staged_clash {
                return Err(BookRepositoryError::conflict(format!(
                    "a book with id {id} already exists"
                )));
            }
        }
        if self.unique_titles {
            let staged_clash = staged.iter().any(|other| other.title == candidate.title);
            if rows.title_taken(&candidate.title, None) || staged_clash {
                return Err(BookRepositoryError::conflict(format!(
                    "a book titled {:?} already exists",
                    candidate.title
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn list(&self) -> Result<Vec<Book>, BookRepositoryError> {
        Ok(self.lock()?.books.values().cloned().collect())
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookRepositoryError> {
        Ok(self.lock()?.books.get(&id).cloned())
    }

    async fn create(&self, book: &NewBook) -> Result<Book, BookRepositoryError> {
        let mut rows = self.lock()?;
        self.check_insert(&rows, book, &[])?;
        Ok(rows.insert(book))
    }

    async fn create_many(&self, books: &[NewBook]) -> Result<Vec<Book>, BookRepositoryError> {
        let mut rows = self.lock()?;
        let mut staged: Vec<&NewBook> = Vec::with_capacity(books.len());
        for book in books {
            self.check_insert(&rows, book, &staged)?;
            staged.push(book);
        }
        Ok(staged.into_iter().map(|book| rows.insert(book)).collect())
    }

    async fn update(&self, id: BookId, book: &Book) -> Result<Book, BookRepositoryError> {
        let mut rows = self.lock()?;
        if !rows.books.contains_key(&id) {
            return Err(BookRepositoryError::not_found(id));
        }
        if self.unique_titles && rows.title_taken(&book.title, Some(id)) {
            return Err(BookRepositoryError::conflict(format!(
                "a book titled {:?} already exists",
                book.title
            )));
        }
        let stored = rows
            .books
            .get_mut(&id)
            .ok_or_else(|| BookRepositoryError::not_found(id))?;
        stored.title = book.title.clone();
        stored.author = book.author.clone();
        stored.year = book.year;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: BookId) -> Result<(), BookRepositoryError> {
        self.lock()?
            .books
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| BookRepositoryError::not_found(id))
    }
}
