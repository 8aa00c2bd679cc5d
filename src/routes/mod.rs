//! Router assembly: trivia endpoints, JSON fallbacks, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

const ALLOW_HEADERS: &str = "Content-Type,Authorization,true";
const ALLOW_METHODS: &str = "GET,PUT,POST,PATCH,DELETE,OPTIONS";

/// Build the application router with:
/// - the trivia endpoints (`/categories`, `/questions`, `/quizzes`, ...)
/// - JSON bodies for unknown paths (404) and wrong methods (405)
/// - CORS (any origin) plus fixed allow-headers/allow-methods on every response
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(http::http_health))
        .route("/categories", get(http::http_get_categories))
        .route("/categories/:id/questions", get(http::http_get_category_questions))
        .route("/questions", get(http::http_get_questions).post(http::http_post_question))
        .route("/questions/search", post(http::http_post_search))
        .route("/questions/:id", delete(http::http_delete_question))
        .route("/quizzes", post(http::http_post_quiz))
        .fallback(http::http_not_found)
        .with_state(state)
        .layer(middleware::map_response(http::json_method_not_allowed))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::PUT,
                    Method::POST,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers(Any),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        body::Body,
        http::{HeaderMap, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::TriviaConfig;
    use crate::domain::{Category, NewQuestion};
    use crate::logic::tests::BrokenStore;

    /// Categories 1..=3; twelve questions: ids 1..=8 in category 1, 9..=12 in category 2.
    async fn app() -> Router {
        app_with_page_size(10).await
    }

    async fn app_with_page_size(page_size: usize) -> Router {
        let categories = vec![
            Category { id: 1, kind: "Science".into() },
            Category { id: 2, kind: "Art".into() },
            Category { id: 3, kind: "Geography".into() },
        ];
        let questions = (1..=12)
            .map(|i| NewQuestion {
                question: if i % 3 == 0 { format!("What is the Title of work {i}?") } else { format!("Question {i}") },
                answer: format!("Answer {i}"),
                difficulty: 1 + (i % 5) as i32,
                category: if i <= 8 { 1 } else { 2 },
            })
            .collect();
        let cfg = TriviaConfig { page_size, use_seed_bank: false, quiz_seed: Some(11), categories, questions };
        build_router(Arc::new(AppState::from_config(cfg).await))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value, HeaderMap) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(v) => builder
                .header("content-type", "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let v = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, v, headers)
    }

    fn ids(v: &Value) -> Vec<i64> {
        v["questions"].as_array().unwrap().iter().map(|q| q["id"].as_i64().unwrap()).collect()
    }

    #[tokio::test]
    async fn categories_are_listed_as_id_to_type() {
        let app = app().await;
        let (status, v, _) = send(&app, "GET", "/categories", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v, json!({ "success": true, "categories": { "1": "Science", "2": "Art", "3": "Geography" } }));
    }

    #[tokio::test]
    async fn empty_category_store_is_404() {
        let cfg = TriviaConfig { use_seed_bank: false, ..Default::default() };
        let app = build_router(Arc::new(AppState::from_config(cfg).await));
        let (status, v, _) = send(&app, "GET", "/categories", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(v["message"], "Not found: server cannot find the requested resource.");
    }

    #[tokio::test]
    async fn twelve_questions_paginate_ten_two_then_404() {
        let app = app().await;

        let (status, v, _) = send(&app, "GET", "/questions?page=1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&v), (1..=10).collect::<Vec<_>>());
        assert_eq!(v["total_questions"], 12);
        assert_eq!(v["categories"]["2"], "Art");
        assert!(v["current_category"].is_null());

        let (status, v, _) = send(&app, "GET", "/questions?page=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&v), vec![11, 12]);

        let (status, v, _) = send(&app, "GET", "/questions?page=3", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(v, json!({ "success": false, "error": 404, "message": "Not found: server cannot find the requested resource." }));
    }

    #[tokio::test]
    async fn configured_page_size_drives_listing() {
        let app = app_with_page_size(5).await;
        let (status, v, _) = send(&app, "GET", "/questions?page=1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&v), vec![1, 2, 3, 4, 5]);

        let (status, v, _) = send(&app, "GET", "/questions?page=3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&v), vec![11, 12]);
        assert_eq!(v["total_questions"], 12);

        let (status, _, _) = send(&app, "GET", "/questions?page=4", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn category_listing_pages_with_configured_size() {
        let app = app_with_page_size(5).await;
        let (status, v, _) = send(&app, "GET", "/categories/1/questions?page=1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&v), vec![1, 2, 3, 4, 5]);

        let (status, v, _) = send(&app, "GET", "/categories/1/questions?page=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&v), vec![6, 7, 8]);
        assert_eq!(v["total_questions"], 8);

        let (status, v, _) = send(&app, "GET", "/categories/1/questions?page=3", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(v["error"], 404);

        let (status, _, _) = send(&app, "GET", "/categories/1/questions?page=0", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_page_is_page_one_and_bad_pages_are_400() {
        let app = app().await;
        let (status, v, _) = send(&app, "GET", "/questions", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&v).len(), 10);

        for uri in ["/questions?page=0", "/questions?page=-1", "/questions?page=abc"] {
            let (status, v, _) = send(&app, "GET", uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(v["error"], 400);
        }
    }

    #[tokio::test]
    async fn delete_existing_then_unknown() {
        let app = app().await;
        let (status, v, _) = send(&app, "DELETE", "/questions/9", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v, json!({ "success": true, "deleted": 9 }));

        let (_, v, _) = send(&app, "GET", "/questions?page=1", None).await;
        assert_eq!(v["total_questions"], 11);
        assert!(!ids(&v).contains(&9));

        let (status, v, _) = send(&app, "DELETE", "/questions/10000", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(v, json!({ "success": false, "error": 422, "message": "Request is unprocessable." }));

        let (status, _, _) = send(&app, "DELETE", "/questions/9", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn create_question_appends_with_next_id() {
        let app = app().await;
        let body = json!({ "question": "Some test question", "answer": "Some test answer", "difficulty": 1, "category": "2" });
        let (status, v, _) = send(&app, "POST", "/questions", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v, json!({ "success": true, "created": 13 }));

        let (_, v, _) = send(&app, "GET", "/questions?page=2", None).await;
        assert_eq!(ids(&v), vec![11, 12, 13]);
    }

    #[tokio::test]
    async fn bad_create_bodies_are_500() {
        let app = app().await;
        let bodies = [
            json!({ "questions": "blah" }),
            json!({ "question": "Q", "answer": "A", "difficulty": 1, "category": 42 }),
            json!({ "question": "", "answer": "A", "difficulty": 1, "category": 1 }),
        ];
        for body in bodies {
            let (status, v, _) = send(&app, "POST", "/questions", Some(body)).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(v["message"], "Internal server error.");
        }
        let (_, v, _) = send(&app, "GET", "/questions", None).await;
        assert_eq!(v["total_questions"], 12);
    }

    #[tokio::test]
    async fn search_ignores_case() {
        let app = app().await;
        let (status, lower, _) = send(&app, "POST", "/questions/search", Some(json!({ "searchTerm": "title" }))).await;
        assert_eq!(status, StatusCode::OK);
        let (_, upper, _) = send(&app, "POST", "/questions/search", Some(json!({ "searchTerm": "TITLE" }))).await;
        assert_eq!(ids(&lower), vec![3, 6, 9, 12]);
        assert_eq!(lower, upper);
        assert_eq!(lower["total_questions"], 4);
        assert!(lower["current_category"].is_null());
    }

    #[tokio::test]
    async fn empty_search_term_matches_everything_in_id_order() {
        let app = app().await;
        let (_, v, _) = send(&app, "POST", "/questions/search", Some(json!({ "searchTerm": "" }))).await;
        assert_eq!(v["total_questions"], 12);
        assert_eq!(ids(&v), (1..=10).collect::<Vec<_>>());

        let (_, v, _) = send(&app, "POST", "/questions/search?page=2", Some(json!({ "searchTerm": "" }))).await;
        assert_eq!(ids(&v), vec![11, 12]);
    }

    #[tokio::test]
    async fn search_without_hits_is_still_success() {
        let app = app().await;
        let (status, v, _) = send(&app, "POST", "/questions/search", Some(json!({ "searchTerm": "zebra" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["total_questions"], 0);
    }

    #[tokio::test]
    async fn questions_by_category() {
        let app = app().await;
        let (status, v, _) = send(&app, "GET", "/categories/2/questions", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&v), vec![9, 10, 11, 12]);
        assert_eq!(v["total_questions"], 4);

        for uri in ["/categories/999/questions", "/categories/3/questions", "/categories/abc/questions"] {
            let (status, v, _) = send(&app, "GET", uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(v["success"], false);
        }
    }

    #[tokio::test]
    async fn quiz_serves_only_unseen_question() {
        let app = app().await;
        let body = json!({ "quiz_category": { "type": "Art", "id": 2 }, "previous_questions": [9, 10, 11] });
        let (status, v, _) = send(&app, "POST", "/quizzes", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["success"], true);
        assert_eq!(v["question"]["id"], 12);
        assert_eq!(v["question"]["category"], 2);
    }

    #[tokio::test]
    async fn quiz_exhausted_is_success_with_null_question() {
        let app = app().await;
        let body = json!({ "quiz_category": { "type": "Art", "id": 2 }, "previous_questions": [9, 10, 11, 12] });
        let (status, v, _) = send(&app, "POST", "/quizzes", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v, json!({ "success": true, "question": null }));
    }

    #[tokio::test]
    async fn quiz_history_may_hold_string_ids() {
        let app = app().await;
        let body = json!({ "quiz_category": { "type": "Art", "id": "2" }, "previous_questions": ["9", "10", 11] });
        let (status, v, _) = send(&app, "POST", "/quizzes", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["question"]["id"], 12);
    }

    #[tokio::test]
    async fn quiz_on_empty_category_is_422() {
        let app = app().await;
        for id in [3, 999] {
            let body = json!({ "quiz_category": { "type": "Geography", "id": id }, "previous_questions": [] });
            let (status, v, _) = send(&app, "POST", "/quizzes", Some(body)).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(v["error"], 422);
        }
    }

    #[tokio::test]
    async fn quiz_over_all_categories_walks_every_question_once() {
        let app = app().await;
        let mut previous: Vec<i64> = Vec::new();
        loop {
            let body = json!({ "quiz_category": { "type": "click", "id": 0 }, "previous_questions": previous });
            let (status, v, _) = send(&app, "POST", "/quizzes", Some(body)).await;
            assert_eq!(status, StatusCode::OK);
            match v["question"]["id"].as_i64() {
                Some(id) => {
                    assert!(!previous.contains(&id), "id {id} repeated");
                    previous.push(id);
                }
                None => break,
            }
        }
        previous.sort_unstable();
        assert_eq!(previous, (1..=12).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn malformed_quiz_body_is_422() {
        let app = app().await;
        let (status, _, _) = send(&app, "POST", "/quizzes", Some(json!({ "previous_questions": [] }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn cors_headers_on_every_response() {
        let app = app().await;
        for (method, uri) in [("GET", "/categories"), ("GET", "/questions?page=99"), ("DELETE", "/questions/10000")] {
            let (_, _, headers) = send(&app, method, uri, None).await;
            assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], ALLOW_HEADERS, "{method} {uri}");
            assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOW_METHODS, "{method} {uri}");
        }
        let req = Request::builder()
            .uri("/categories")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn wrong_method_and_unknown_path_are_json() {
        let app = app().await;
        let (status, v, headers) = send(&app, "PUT", "/categories", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(v, json!({ "success": false, "error": 405, "message": "Request method not allowed." }));
        assert!(headers.contains_key(header::ALLOW));

        let (status, v, _) = send(&app, "GET", "/nowhere", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(v["error"], 404);
    }

    #[tokio::test]
    async fn broken_store_search_is_422_over_http() {
        let app = build_router(Arc::new(AppState::with_store(Arc::new(BrokenStore), 10, None)));
        let (status, v, _) = send(&app, "POST", "/questions/search", Some(json!({ "searchTerm": "x" }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(v["success"], false);
        let (status, _, _) = send(&app, "GET", "/categories", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = app().await;
        let (status, v, _) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v, json!({ "success": true }));
    }
}
