//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Extractor rejections are turned into the JSON error shape here so a bad
//! query string or body never leaks axum's plain-text rejection.

use std::sync::Arc;
use axum::{
  extract::{
    rejection::{JsonRejection, PathRejection, QueryRejection},
    Path, Query, State,
  },
  http::{header, StatusCode},
  response::{IntoResponse, Response},
  Json,
};
use tracing::{debug, instrument};

use crate::error::{ApiError, ApiResult};
use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

fn page_of(q: Result<Query<PageQuery>, QueryRejection>) -> ApiResult<Option<i64>> {
  match q {
    Ok(Query(q)) => Ok(q.page),
    Err(e) => {
      debug!(target: "trivia", error = %e, "Bad page query");
      Err(ApiError::BadRequest)
    }
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(SuccessOut { success: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_categories(State(state): State<Arc<AppState>>) -> ApiResult<Json<CategoriesOut>> {
  list_categories(&state).await.map(Json)
}

#[instrument(level = "info", skip_all)]
pub async fn http_get_questions(
  State(state): State<Arc<AppState>>,
  q: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<QuestionsOut>> {
  let req = resolve_page(&state, page_of(q)?)?;
  list_questions(&state, req).await.map(Json)
}

#[instrument(level = "info", skip_all)]
pub async fn http_get_category_questions(
  State(state): State<Arc<AppState>>,
  id: Result<Path<i64>, PathRejection>,
  q: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<QuestionsOut>> {
  let Path(id) = id.map_err(|_| ApiError::NotFound)?;
  let req = resolve_page(&state, page_of(q)?)?;
  questions_by_category(&state, id, req).await.map(Json)
}

#[instrument(level = "info", skip_all)]
pub async fn http_delete_question(
  State(state): State<Arc<AppState>>,
  id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<DeletedOut>> {
  let Path(id) = id.map_err(|_| ApiError::NotFound)?;
  delete_question(&state, id).await.map(Json)
}

/// Any failure while creating a question, a malformed body included, is a 500.
#[instrument(level = "info", skip_all)]
pub async fn http_post_question(
  State(state): State<Arc<AppState>>,
  body: Result<Json<NewQuestionIn>, JsonRejection>,
) -> ApiResult<Json<CreatedOut>> {
  let Json(body) = body.map_err(|e| {
    debug!(target: "trivia", error = %e, "Bad create body");
    ApiError::ServerError
  })?;
  create_question(&state, body).await.map(Json)
}

#[instrument(level = "info", skip_all)]
pub async fn http_post_search(
  State(state): State<Arc<AppState>>,
  q: Result<Query<PageQuery>, QueryRejection>,
  body: Result<Json<SearchIn>, JsonRejection>,
) -> ApiResult<Json<SearchOut>> {
  let Json(body) = body.map_err(|_| ApiError::Unprocessable)?;
  let req = resolve_page(&state, page_of(q)?)?;
  search_questions(&state, &body.search_term, req).await.map(Json)
}

#[instrument(level = "info", skip_all)]
pub async fn http_post_quiz(
  State(state): State<Arc<AppState>>,
  body: Result<Json<QuizIn>, JsonRejection>,
) -> ApiResult<Json<QuizOut>> {
  let Json(body) = body.map_err(|_| ApiError::Unprocessable)?;
  play_quiz(&state, body).await.map(Json)
}

/// Router fallback for unknown paths.
pub async fn http_not_found() -> ApiError { ApiError::NotFound }

/// Swap axum's empty 405 for the JSON error body, keeping the `Allow` header.
pub async fn json_method_not_allowed(res: Response) -> Response {
  if res.status() != StatusCode::METHOD_NOT_ALLOWED {
    return res;
  }
  let allow = res.headers().get(header::ALLOW).cloned();
  let mut out = ApiError::MethodNotAllowed.into_response();
  if let Some(v) = allow {
    out.headers_mut().insert(header::ALLOW, v);
  }
  out
}
