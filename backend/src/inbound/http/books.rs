//! Book HTTP handlers.
//!
//! ```text
//! GET    /books
//! POST   /books
//! POST   /books/batch
//! GET    /books/{id}
//! PUT    /books/{id}
//! DELETE /books/{id}
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::Pagination;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Book, BookId, BookPatch, NewBook};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::{
    BatchEnvelopeSchema, BookEnvelopeSchema, BookListEnvelopeSchema, EmptyEnvelopeSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{decode_json_body, parse_book_id};

/// A book as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookResponseBody {
    /// Store identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Book title.
    #[schema(example = "Dune")]
    pub title: String,
    /// Author name.
    #[schema(example = "Frank Herbert")]
    pub author: String,
    /// Publication year.
    #[schema(example = 1965)]
    pub year: i32,
    /// Insertion time, RFC 3339.
    #[schema(example = "2025-01-01T00:00:00+00:00")]
    pub created_at: String,
    /// Last modification time, RFC 3339.
    #[schema(example = "2025-01-01T00:00:00+00:00")]
    pub updated_at: String,
}

impl From<Book> for BookResponseBody {
    fn from(value: Book) -> Self {
        Self {
            id: value.id.as_i64(),
            title: value.title,
            author: value.author,
            year: value.year,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Request payload for creating a book.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateBookRequestBody {
    /// Client-chosen identifier. Only the in-memory store honours it.
    pub id: Option<i64>,
    /// Book title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Publication year.
    pub year: i32,
}

impl From<CreateBookRequestBody> for NewBook {
    fn from(value: CreateBookRequestBody) -> Self {
        Self {
            id: value.id.map(BookId::new),
            title: value.title,
            author: value.author,
            year: value.year,
        }
    }
}

/// Request payload for updating a book. Absent fields are left unchanged and
/// any `id` in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateBookRequestBody {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement author.
    pub author: Option<String>,
    /// Replacement publication year.
    pub year: Option<i32>,
}

impl From<UpdateBookRequestBody> for BookPatch {
    fn from(value: UpdateBookRequestBody) -> Self {
        Self {
            title: value.title,
            author: value.author,
            year: value.year,
        }
    }
}

/// Payload returned by a batch insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BatchCreatedResponseBody {
    /// Number of books inserted.
    pub count: usize,
    /// The inserted books in request order.
    pub books: Vec<BookResponseBody>,
}

fn book_bodies(books: Vec<Book>) -> Vec<BookResponseBody> {
    books.into_iter().map(BookResponseBody::from).collect()
}

/// List every live book.
#[utoipa::path(
    get,
    path = "/books",
    responses(
        (status = 200, description = "All books on one page", body = BookListEnvelopeSchema),
        (status = 500, description = "Internal server error", body = EmptyEnvelopeSchema)
    ),
    tags = ["books"],
    operation_id = "listBooks"
)]
#[get("/books")]
pub async fn list_books(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let books = book_bodies(state.books_query.list_books().await?);
    let pagination = Pagination::single_page(books.len());
    Ok(Envelope::success(StatusCode::OK, books)
        .with_pagination(pagination)
        .into_response())
}

/// Fetch one book.
#[utoipa::path(
    get,
    path = "/books/{id}",
    params(("id" = i64, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "The book", body = BookEnvelopeSchema),
        (status = 400, description = "Non-integer id", body = EmptyEnvelopeSchema),
        (status = 404, description = "No such book", body = EmptyEnvelopeSchema),
        (status = 500, description = "Internal server error", body = EmptyEnvelopeSchema)
    ),
    tags = ["books"],
    operation_id = "getBook"
)]
#[get("/books/{id}")]
pub async fn get_book(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_book_id(&path)?;
    let book = state.books_query.get_book(id).await?;
    Ok(Envelope::success(StatusCode::OK, BookResponseBody::from(book)).into_response())
}

/// Create one book.
#[utoipa::path(
    post,
    path = "/books",
    request_body = CreateBookRequestBody,
    responses(
        (status = 201, description = "Book created", body = BookEnvelopeSchema),
        (status = 400, description = "Malformed JSON", body = EmptyEnvelopeSchema),
        (status = 409, description = "Duplicate title or id", body = EmptyEnvelopeSchema),
        (status = 500, description = "Internal server error", body = EmptyEnvelopeSchema)
    ),
    tags = ["books"],
    operation_id = "createBook"
)]
#[post("/books")]
pub async fn create_book(
    state: web::Data<HttpState>,
    payload: web::Json<CreateBookRequestBody>,
) -> ApiResult<HttpResponse> {
    let book = state
        .books_command
        .create_book(payload.into_inner().into())
        .await?;
    debug!(id = %book.id, "book created");
    Ok(Envelope::success(StatusCode::CREATED, BookResponseBody::from(book)).into_response())
}

/// Create several books at once. Either every book is stored or none is.
#[utoipa::path(
    post,
    path = "/books/batch",
    request_body = Vec<CreateBookRequestBody>,
    responses(
        (status = 201, description = "Books created", body = BatchEnvelopeSchema),
        (status = 400, description = "Malformed JSON", body = EmptyEnvelopeSchema),
        (status = 409, description = "A book in the batch conflicts", body = EmptyEnvelopeSchema),
        (status = 500, description = "Internal server error", body = EmptyEnvelopeSchema)
    ),
    tags = ["books"],
    operation_id = "createBooks"
)]
#[post("/books/batch")]
pub async fn create_books(
    state: web::Data<HttpState>,
    payload: web::Json<Vec<CreateBookRequestBody>>,
) -> ApiResult<HttpResponse> {
    let new_books = payload.into_inner().into_iter().map(NewBook::from).collect();
    let books = book_bodies(state.books_command.create_books(new_books).await?);
    debug!(count = books.len(), "book batch created");
    let body = BatchCreatedResponseBody {
        count: books.len(),
        books,
    };
    Ok(Envelope::success(StatusCode::CREATED, body).into_response())
}

/// Merge the supplied fields into an existing book.
///
/// The body is decoded after the path id, so a missing book is reported as
/// 404 even when the body is malformed.
#[utoipa::path(
    put,
    path = "/books/{id}",
    params(("id" = i64, Path, description = "Book identifier")),
    request_body = UpdateBookRequestBody,
    responses(
        (status = 200, description = "Book updated", body = BookEnvelopeSchema),
        (status = 400, description = "Non-integer id or malformed JSON", body = EmptyEnvelopeSchema),
        (status = 404, description = "No such book", body = EmptyEnvelopeSchema),
        (status = 409, description = "Duplicate title", body = EmptyEnvelopeSchema),
        (status = 500, description = "Internal server error", body = EmptyEnvelopeSchema)
    ),
    tags = ["books"],
    operation_id = "updateBook"
)]
#[put("/books/{id}")]
pub async fn update_book(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let id = parse_book_id(&path)?;
    let patch: BookPatch = match decode_json_body::<UpdateBookRequestBody>(&body) {
        Ok(payload) => payload.into(),
        Err(err) => {
            state.books_query.get_book(id).await?;
            return Err(err);
        }
    };
    let book = state.books_command.update_book(id, patch).await?;
    Ok(Envelope::success(StatusCode::OK, BookResponseBody::from(book)).into_response())
}

/// Delete a book.
#[utoipa::path(
    delete,
    path = "/books/{id}",
    params(("id" = i64, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "Book deleted", body = EmptyEnvelopeSchema),
        (status = 400, description = "Non-integer id", body = EmptyEnvelopeSchema),
        (status = 404, description = "No such book", body = EmptyEnvelopeSchema),
        (status = 500, description = "Internal server error", body = EmptyEnvelopeSchema)
    ),
    tags = ["books"],
    operation_id = "deleteBook"
)]
#[delete("/books/{id}")]
pub async fn delete_book(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_book_id(&path)?;
    state.books_command.delete_book(id).await?;
    debug!(%id, "book deleted");
    Ok(Envelope::<Value>::empty(StatusCode::OK).into_response())
}

#[cfg(test)]
mod tests {
    //! Handler tests against a mocked repository.

    use std::sync::Arc;

    use actix_web::{App, test as actix_test};
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;
    use crate::domain::BookService;
    use crate::domain::ports::{BookRepositoryError, MockBookRepository};
    use crate::inbound::http::configure;

    #[fixture]
    fn stored() -> Book {
        let at = Utc
            .with_ymd_and_hms(2025, 1, 2, 3, 4, 5)
            .single()
            .expect("valid timestamp");
        Book {
            id: BookId::new(4),
            title: "Dune".to_owned(),
            author: "Frank Herbert".to_owned(),
            year: 1965,
            created_at: at,
            updated_at: at,
        }
    }

    async fn call(
        mock: MockBookRepository,
        request: actix_test::TestRequest,
    ) -> (StatusCode, Value) {
        let state = HttpState::from_service(BookService::new(Arc::new(mock)));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body: Value = actix_test::read_body_json(response).await;
        (status, body)
    }

    #[rstest]
    fn response_body_renders_rfc3339_timestamps(stored: Book) {
        let body = BookResponseBody::from(stored);

        assert_eq!(body.created_at, "2025-01-02T03:04:05+00:00");
        assert_eq!(body.id, 4);
    }

    #[rstest]
    #[actix_web::test]
    async fn get_renders_book_inside_envelope(stored: Book) {
        let mut mock = MockBookRepository::new();
        mock.expect_find_by_id()
            .return_once(move |_| Ok(Some(stored)));

        let (status, body) = call(mock, actix_test::TestRequest::get().uri("/books/4")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!({"code": 200, "message": "success"}));
        assert_eq!(body["data"]["title"], "Dune");
        assert_eq!(body["errors"], json!([]));
        assert_eq!(body["pagination"], Value::Null);
    }

    #[rstest]
    #[actix_web::test]
    async fn storage_failure_is_a_redacted_500() {
        let mut mock = MockBookRepository::new();
        mock.expect_list()
            .return_once(|| Err(BookRepositoryError::connection("pool timed out")));

        let (status, body) = call(mock, actix_test::TestRequest::get().uri("/books")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], json!({"code": 500, "message": "error"}));
        assert_eq!(body["errors"], json!(["Internal server error"]));
        assert_eq!(body["data"], Value::Null);
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_json_is_a_400_envelope() {
        let mock = MockBookRepository::new();
        let request = actix_test::TestRequest::post()
            .uri("/books")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"title\": ");

        let (status, body) = call(mock, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"]["message"], "error");
        assert_eq!(body["errors"].as_array().map(Vec::len), Some(1));
    }

    #[rstest]
    #[actix_web::test]
    async fn create_without_year_is_rejected() {
        let mock = MockBookRepository::new();
        let request = actix_test::TestRequest::post()
            .uri("/books")
            .set_json(json!({"title": "Dune", "author": "Frank Herbert"}));

        let (status, _) = call(mock, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn update_with_bad_body_checks_existence_first() {
        let mut mock = MockBookRepository::new();
        mock.expect_find_by_id().times(1).return_once(|_| Ok(None));
        let request = actix_test::TestRequest::put()
            .uri("/books/42")
            .set_payload("{not json");

        let (status, body) = call(mock, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errors"], json!(["book 42 not found"]));
    }

    #[rstest]
    #[actix_web::test]
    async fn update_of_existing_book_with_bad_body_is_400(stored: Book) {
        let mut mock = MockBookRepository::new();
        mock.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(stored)));
        mock.expect_update().never();
        let request = actix_test::TestRequest::put()
            .uri("/books/4")
            .set_payload("{not json");

        let (status, body) = call(mock, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"]["message"], "error");
    }

    #[rstest]
    #[actix_web::test]
    async fn delete_returns_null_data() {
        let mut mock = MockBookRepository::new();
        mock.expect_delete().return_once(|_| Ok(()));

        let (status, body) = call(mock, actix_test::TestRequest::delete().uri("/books/4")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"]["message"], "success");
        assert_eq!(body["data"], Value::Null);
    }

    #[rstest]
    #[actix_web::test]
    async fn empty_batch_reports_zero() {
        let mock = MockBookRepository::new();
        let request = actix_test::TestRequest::post()
            .uri("/books/batch")
            .set_json(json!([]));

        let (status, body) = call(mock, request).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"], json!({"count": 0, "books": []}));
    }
}
