//! OpenAPI schema definitions for envelope responses.
//!
//! The envelope and pagination types stay free of `ToSchema` derives. These
//! wrappers mirror their JSON shape for each payload the API returns so the
//! generated document shows concrete response bodies.

use utoipa::ToSchema;

use crate::inbound::http::books::{BatchCreatedResponseBody, BookResponseBody};

/// OpenAPI schema for [`crate::inbound::http::envelope::StatusWord`].
#[derive(ToSchema)]
#[schema(as = StatusWord)]
pub enum StatusWordSchema {
    /// The request succeeded.
    #[schema(rename = "success")]
    Success,
    /// The request failed.
    #[schema(rename = "error")]
    Error,
}

/// OpenAPI schema for [`crate::inbound::http::envelope::EnvelopeStatus`].
#[derive(ToSchema)]
#[schema(as = EnvelopeStatus)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EnvelopeStatusSchema {
    /// HTTP status code repeated in the body.
    #[schema(example = 200)]
    code: u16,
    /// Outcome word.
    message: StatusWordSchema,
}

/// OpenAPI schema for [`pagination::Pagination`].
#[derive(ToSchema)]
#[schema(as = Pagination)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PaginationSchema {
    /// Number of records in the collection.
    total_records: usize,
    /// Always 1.
    current_page: usize,
    /// Always 1.
    total_pages: usize,
    /// Always null.
    next_page: Option<usize>,
    /// Always null.
    prev_page: Option<usize>,
    /// Equal to `total_records`.
    page_size: usize,
}

/// Envelope carrying one book.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BookEnvelopeSchema {
    /// Status block.
    status: EnvelopeStatusSchema,
    /// The book.
    data: BookResponseBody,
    /// Always empty.
    errors: Vec<String>,
    /// Always null.
    pagination: Option<PaginationSchema>,
}

/// Envelope carrying every live book.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BookListEnvelopeSchema {
    /// Status block.
    status: EnvelopeStatusSchema,
    /// Books ordered by id.
    data: Vec<BookResponseBody>,
    /// Always empty.
    errors: Vec<String>,
    /// Single-page metadata.
    pagination: PaginationSchema,
}

/// Envelope carrying the result of a batch insert.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BatchEnvelopeSchema {
    /// Status block.
    status: EnvelopeStatusSchema,
    /// Count and inserted books.
    data: BatchCreatedResponseBody,
    /// Always empty.
    errors: Vec<String>,
    /// Always null.
    pagination: Option<PaginationSchema>,
}

/// Envelope with no payload, returned on delete and on every failure.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EmptyEnvelopeSchema {
    /// Status block.
    status: EnvelopeStatusSchema,
    /// Always null.
    data: Option<serde_json::Value>,
    /// Error messages; one entry on failure.
    #[schema(example = json!(["book 7 not found"]))]
    errors: Vec<String>,
    /// Always null.
    pagination: Option<PaginationSchema>,
}
