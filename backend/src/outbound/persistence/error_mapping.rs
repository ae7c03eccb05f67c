//! Diesel and pool error mapping for the book repository.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::BookRepositoryError;

use super::pool::PoolError;

/// Map pool failures to connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> BookRepositoryError {
    BookRepositoryError::connection(error.message())
}

/// Map Diesel failures to repository errors.
///
/// Unique and other integrity violations become `Conflict`; a closed
/// connection becomes `Connection`; everything else is a `Query` failure.
pub(crate) fn map_diesel_error(error: DieselError) -> BookRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            match info.constraint_name() {
                Some(constraint) if constraint.contains("title") => {
                    BookRepositoryError::conflict("a book with this title already exists")
                }
                Some(constraint) => BookRepositoryError::conflict(format!(
                    "unique constraint {constraint} violated"
                )),
                None => BookRepositoryError::conflict("unique constraint violated"),
            }
        }
        DieselError::DatabaseError(
            DatabaseErrorKind::NotNullViolation | DatabaseErrorKind::CheckViolation,
            info,
        ) => BookRepositoryError::conflict(info.message().to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            BookRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => BookRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => BookRepositoryError::query("database query error"),
        _ => BookRepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct FakeInfo {
        message: &'static str,
        constraint: Option<&'static str>,
    }

    impl diesel::result::DatabaseErrorInformation for FakeInfo {
        fn message(&self) -> &str {
            self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            Some("books")
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(
        kind: DatabaseErrorKind,
        constraint: Option<&'static str>,
    ) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(FakeInfo {
                message: "constraint violated",
                constraint,
            }),
        )
    }

    #[rstest]
    fn unique_title_violation_is_conflict() {
        let err = map_diesel_error(database_error(
            DatabaseErrorKind::UniqueViolation,
            Some("books_title_idx"),
        ));
        assert_eq!(
            err,
            BookRepositoryError::conflict("a book with this title already exists")
        );
    }

    #[rstest]
    fn other_unique_violation_names_constraint() {
        let err = map_diesel_error(database_error(
            DatabaseErrorKind::UniqueViolation,
            Some("books_pkey"),
        ));
        assert_eq!(
            err,
            BookRepositoryError::conflict("unique constraint books_pkey violated")
        );
    }

    #[rstest]
    fn closed_connection_is_connection_error() {
        let err = map_diesel_error(database_error(DatabaseErrorKind::ClosedConnection, None));
        assert!(matches!(err, BookRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn not_found_is_query_error() {
        let err = map_diesel_error(DieselError::NotFound);
        assert_eq!(err, BookRepositoryError::query("record not found"));
    }

    #[rstest]
    fn pool_errors_are_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, BookRepositoryError::connection("timed out"));
    }
}
