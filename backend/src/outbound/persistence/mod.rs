//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Connections come from a `bb8` pool through `diesel-async`. Row structs and
//! the table definition stay private to this module; callers only see domain
//! types and the mapped [`BookRepositoryError`](crate::domain::ports::BookRepositoryError).
//!
//! # Example
//!
//! ```ignore
//! use books_api::outbound::persistence::{DbPool, DieselBookRepository, PoolConfig, run_migrations};
//!
//! run_migrations("postgres://localhost/books").await?;
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/books")).await?;
//! let repo = DieselBookRepository::new(pool);
//! ```

mod diesel_book_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_book_repository::DieselBookRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
