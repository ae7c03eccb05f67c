//! End-to-end HTTP tests for the book routes over the in-memory store.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use books_api::domain::BookService;
use books_api::inbound::http::state::HttpState;
use books_api::outbound::memory::InMemoryBookRepository;
use books_api::server::build_app;

#[fixture]
fn state() -> web::Data<HttpState> {
    let service = BookService::new(Arc::new(InMemoryBookRepository::new()));
    web::Data::new(HttpState::from_service(service))
}

macro_rules! books_app {
    ($state:expr) => {
        test::init_service(build_app($state)).await
    };
}

macro_rules! send {
    ($app:expr, $req:expr) => {{
        let res = test::call_service(&$app, $req.to_request()).await;
        let status = res.status();
        let body: Value = test::read_body_json(res).await;
        (status, body)
    }};
}

fn dune() -> Value {
    json!({"title": "Dune", "author": "Frank Herbert", "year": 1965})
}

fn list_count(body: &Value) -> usize {
    body["data"].as_array().map_or(0, Vec::len)
}

#[rstest]
#[actix_web::test]
async fn create_then_get_returns_the_same_book(state: web::Data<HttpState>) {
    let app = books_app!(state);

    let (status, created) = send!(app, test::TestRequest::post().uri("/books").set_json(dune()));
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], json!({"code": 201, "message": "success"}));
    let id = created["data"]["id"].as_i64().expect("numeric id");

    let (status, fetched) = send!(
        app,
        test::TestRequest::get().uri(&format!("/books/{id}"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"], created["data"]);
    assert_eq!(fetched["errors"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn list_wraps_books_in_a_single_page(state: web::Data<HttpState>) {
    let app = books_app!(state);
    send!(app, test::TestRequest::post().uri("/books").set_json(dune()));

    let (status, body) = send!(app, test::TestRequest::get().uri("/books"));

    assert_eq!(status, StatusCode::OK);
    assert_eq!(list_count(&body), 1);
    assert_eq!(
        body["pagination"],
        json!({
            "total_records": 1,
            "current_page": 1,
            "total_pages": 1,
            "next_page": null,
            "prev_page": null,
            "page_size": 1,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn duplicate_title_conflicts_without_inserting(state: web::Data<HttpState>) {
    let app = books_app!(state);
    send!(app, test::TestRequest::post().uri("/books").set_json(dune()));

    let (status, body) = send!(app, test::TestRequest::post().uri("/books").set_json(dune()));

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], json!({"code": 409, "message": "error"}));
    assert_eq!(body["data"], Value::Null);
    let (_, listed) = send!(app, test::TestRequest::get().uri("/books"));
    assert_eq!(list_count(&listed), 1);
}

#[rstest]
#[actix_web::test]
async fn update_merges_fields_and_keeps_path_id(state: web::Data<HttpState>) {
    let app = books_app!(state);
    let (_, created) = send!(app, test::TestRequest::post().uri("/books").set_json(dune()));
    let id = created["data"]["id"].as_i64().expect("numeric id");

    let (status, updated) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/books/{id}"))
            .set_json(json!({"id": 999, "year": 1966}))
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["id"], json!(id));
    assert_eq!(updated["data"]["year"], json!(1966));
    assert_eq!(updated["data"]["title"], json!("Dune"));
    assert_eq!(updated["data"]["author"], json!("Frank Herbert"));
    let (status, _) = send!(app, test::TestRequest::get().uri("/books/999"));
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn update_of_missing_book_is_404(state: web::Data<HttpState>) {
    let app = books_app!(state);

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri("/books/42")
            .set_json(json!({"title": "Ghost"}))
    );

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errors"], json!(["book 42 not found"]));
}

#[rstest]
#[actix_web::test]
async fn update_to_taken_title_conflicts_and_keeps_book(state: web::Data<HttpState>) {
    let app = books_app!(state);
    send!(app, test::TestRequest::post().uri("/books").set_json(dune()));
    let (_, emma) = send!(
        app,
        test::TestRequest::post()
            .uri("/books")
            .set_json(json!({"title": "Emma", "author": "Jane Austen", "year": 1815}))
    );
    let id = emma["data"]["id"].as_i64().expect("numeric id");

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/books/{id}"))
            .set_json(json!({"title": "Dune"}))
    );

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], json!({"code": 409, "message": "error"}));
    let (_, fetched) = send!(app, test::TestRequest::get().uri(&format!("/books/{id}")));
    assert_eq!(fetched["data"], emma["data"]);
}

#[rstest]
#[actix_web::test]
async fn malformed_update_of_missing_book_is_404(state: web::Data<HttpState>) {
    let app = books_app!(state);

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri("/books/42")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
    );

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errors"], json!(["book 42 not found"]));
}

#[rstest]
#[actix_web::test]
async fn delete_then_get_is_404(state: web::Data<HttpState>) {
    let app = books_app!(state);
    let (_, created) = send!(app, test::TestRequest::post().uri("/books").set_json(dune()));
    let id = created["data"]["id"].as_i64().expect("numeric id");

    let (status, deleted) = send!(
        app,
        test::TestRequest::delete().uri(&format!("/books/{id}"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["data"], Value::Null);
    assert_eq!(deleted["status"]["message"], "success");

    let (status, _) = send!(app, test::TestRequest::get().uri(&format!("/books/{id}")));
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send!(
        app,
        test::TestRequest::delete().uri(&format!("/books/{id}"))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[case(test::TestRequest::get())]
#[case(test::TestRequest::delete())]
#[case(test::TestRequest::put().set_json(json!({"year": 2000})))]
#[actix_web::test]
async fn non_integer_id_is_400(state: web::Data<HttpState>, #[case] request: test::TestRequest) {
    let app = books_app!(state);

    let (status, body) = send!(app, request.uri("/books/abc"));

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], json!({"code": 400, "message": "error"}));
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(1));
}

#[rstest]
#[actix_web::test]
async fn batch_inserts_every_book(state: web::Data<HttpState>) {
    let app = books_app!(state);
    let batch = json!([
        {"title": "Dune", "author": "Frank Herbert", "year": 1965},
        {"title": "Emma", "author": "Jane Austen", "year": 1815},
        {"title": "Ulysses", "author": "James Joyce", "year": 1922},
    ]);

    let (status, body) = send!(
        app,
        test::TestRequest::post().uri("/books/batch").set_json(batch)
    );

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["count"], json!(3));
    let ids: Vec<i64> = body["data"]["books"]
        .as_array()
        .expect("books array")
        .iter()
        .filter_map(|book| book["id"].as_i64())
        .collect();
    assert_eq!(ids.len(), 3);
    for id in ids {
        let (status, _) = send!(app, test::TestRequest::get().uri(&format!("/books/{id}")));
        assert_eq!(status, StatusCode::OK);
    }
    let (_, listed) = send!(app, test::TestRequest::get().uri("/books"));
    assert_eq!(list_count(&listed), 3);
}

#[rstest]
#[actix_web::test]
async fn failing_batch_leaves_store_unchanged(state: web::Data<HttpState>) {
    let app = books_app!(state);
    send!(app, test::TestRequest::post().uri("/books").set_json(dune()));
    let batch = json!([
        {"title": "Emma", "author": "Jane Austen", "year": 1815},
        {"title": "Dune", "author": "Someone Else", "year": 2001},
    ]);

    let (status, _) = send!(
        app,
        test::TestRequest::post().uri("/books/batch").set_json(batch)
    );

    assert_eq!(status, StatusCode::CONFLICT);
    let (_, listed) = send!(app, test::TestRequest::get().uri("/books"));
    assert_eq!(list_count(&listed), 1);
}

#[rstest]
#[actix_web::test]
async fn client_supplied_id_is_honoured(state: web::Data<HttpState>) {
    let app = books_app!(state);

    let (status, created) = send!(
        app,
        test::TestRequest::post()
            .uri("/books")
            .set_json(json!({"id": 77, "title": "Emma", "author": "Jane Austen", "year": 1815}))
    );

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["id"], json!(77));
}

#[rstest]
#[actix_web::test]
async fn json_without_content_type_is_accepted(state: web::Data<HttpState>) {
    let app = books_app!(state);

    let (status, created) = send!(
        app,
        test::TestRequest::post()
            .uri("/books")
            .set_payload(dune().to_string())
    );

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["title"], json!("Dune"));
}

#[rstest]
#[actix_web::test]
async fn malformed_body_is_400(state: web::Data<HttpState>) {
    let app = books_app!(state);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/books/batch")
            .insert_header(("content-type", "application/json"))
            .set_payload("[{\"title\": 1}]")
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"]["message"], "error");
}

#[rstest]
#[actix_web::test]
async fn responses_carry_a_trace_id(state: web::Data<HttpState>) {
    let app = books_app!(state);

    let res = test::call_service(&app, test::TestRequest::get().uri("/books/1").to_request()).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().contains_key("trace-id"));
}
