//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Book records.
    ///
    /// Rows with a non-null `deleted_at` are soft-deleted and hidden from
    /// every read. `title` is unique among live rows.
    books (id) {
        /// Primary key assigned from the `books_id_seq` sequence.
        id -> Int8,
        /// Book title.
        title -> Text,
        /// Author name.
        author -> Text,
        /// Publication year.
        year -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
        /// Soft-delete timestamp, null while the row is live.
        deleted_at -> Nullable<Timestamptz>,
    }
}
