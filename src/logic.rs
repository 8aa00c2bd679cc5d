//! Endpoint behaviors behind the HTTP handlers.
//!
//! Each function reads/writes through the stores and translates failures into
//! the `ApiError` taxonomy:
//!   - listing reads that come back empty      -> NotFound
//!   - delete / search / quiz store failures    -> Unprocessable
//!   - insert failures and bad create bodies   -> ServerError
//!   - quiz on a category with no questions    -> Unprocessable
//!   - quiz whose history covers every question -> success with `question: null`

use std::collections::HashSet;

use tracing::{debug, error, info, instrument, warn};

use crate::domain::{CategoryFilter, NewQuestion};
use crate::error::{ApiError, ApiResult};
use crate::paginate::{paginate, PageRequest};
use crate::protocol::*;
use crate::quiz::{draw, Draw};
use crate::state::AppState;
use crate::store::StoreError;
use crate::util::trunc_for_log;

/// Missing page means page 1; zero or negative pages are a client error.
pub fn resolve_page(state: &AppState, page: Option<i64>) -> ApiResult<PageRequest> {
  let page = page.unwrap_or(1);
  state.page_request(page).ok_or_else(|| {
    debug!(target: "trivia", page, "Rejected non-positive page");
    ApiError::BadRequest
  })
}

async fn category_map_or_500(state: &AppState) -> ApiResult<CategoryMap> {
  let cats = state.categories.categories().await.map_err(|e| {
    error!(target: "trivia", error = %e, "Category read failed");
    ApiError::ServerError
  })?;
  Ok(category_map(&cats))
}

#[instrument(level = "info", skip(state))]
pub async fn list_categories(state: &AppState) -> ApiResult<CategoriesOut> {
  let categories = category_map_or_500(state).await?;
  if categories.is_empty() {
    return Err(ApiError::NotFound);
  }
  Ok(CategoriesOut { success: true, categories })
}

#[instrument(level = "info", skip(state, req), fields(page = req.page()))]
pub async fn list_questions(state: &AppState, req: PageRequest) -> ApiResult<QuestionsOut> {
  let selection = state.questions.all().await.map_err(|e| {
    error!(target: "trivia", error = %e, "Question read failed");
    ApiError::ServerError
  })?;
  let current = paginate(&selection, req);
  if current.is_empty() {
    return Err(ApiError::NotFound);
  }
  Ok(QuestionsOut {
    success: true,
    questions: current.to_vec(),
    total_questions: selection.len(),
    categories: category_map_or_500(state).await?,
    current_category: None,
  })
}

#[instrument(level = "info", skip(state, req), fields(page = req.page()))]
pub async fn questions_by_category(state: &AppState, category: i64, req: PageRequest) -> ApiResult<QuestionsOut> {
  let known = state.categories.category(category).await.map_err(|e| {
    error!(target: "trivia", category, error = %e, "Category lookup failed");
    ApiError::ServerError
  })?;
  if known.is_none() {
    debug!(target: "trivia", category, "Unknown category");
    return Err(ApiError::NotFound);
  }
  let selection = state.questions.by_category(category).await.map_err(|e| {
    error!(target: "trivia", category, error = %e, "Category question read failed");
    ApiError::ServerError
  })?;
  let current = paginate(&selection, req);
  if current.is_empty() {
    return Err(ApiError::NotFound);
  }
  Ok(QuestionsOut {
    success: true,
    questions: current.to_vec(),
    total_questions: selection.len(),
    categories: category_map_or_500(state).await?,
    current_category: None,
  })
}

#[instrument(level = "info", skip(state, body), fields(category = body.category, difficulty = body.difficulty))]
pub async fn create_question(state: &AppState, body: NewQuestionIn) -> ApiResult<CreatedOut> {
  let difficulty = i32::try_from(body.difficulty).map_err(|_| ApiError::ServerError)?;
  let new = NewQuestion { question: body.question, answer: body.answer, difficulty, category: body.category };
  match state.questions.insert(new).await {
    Ok(q) => {
      info!(target: "trivia", id = q.id, question = %trunc_for_log(&q.question, 60), "Question created");
      Ok(CreatedOut { success: true, created: q.id })
    }
    Err(e) => {
      error!(target: "trivia", error = %e, "Question insert failed");
      Err(ApiError::ServerError)
    }
  }
}

#[instrument(level = "info", skip(state))]
pub async fn delete_question(state: &AppState, id: i64) -> ApiResult<DeletedOut> {
  let existing = state.questions.get(id).await.map_err(|e| {
    error!(target: "trivia", id, error = %e, "Question lookup failed");
    ApiError::Unprocessable
  })?;
  if existing.is_none() {
    warn!(target: "trivia", id, "Delete of unknown question");
    return Err(ApiError::Unprocessable);
  }
  // A concurrent delete can still win between the lookup and here.
  match state.questions.delete(id).await {
    Ok(()) => {
      info!(target: "trivia", id, "Question deleted");
      Ok(DeletedOut { success: true, deleted: id })
    }
    Err(StoreError::NotFound(_)) => {
      warn!(target: "trivia", id, "Delete of unknown question");
      Err(ApiError::Unprocessable)
    }
    Err(e) => {
      error!(target: "trivia", id, error = %e, "Question delete failed");
      Err(ApiError::Unprocessable)
    }
  }
}

#[instrument(level = "info", skip(state, term, req), fields(term = %trunc_for_log(term, 40), page = req.page()))]
pub async fn search_questions(state: &AppState, term: &str, req: PageRequest) -> ApiResult<SearchOut> {
  let matches = state.questions.search(term).await.map_err(|e| {
    error!(target: "trivia", error = %e, "Question search failed");
    ApiError::Unprocessable
  })?;
  debug!(target: "trivia", hits = matches.len(), "Search done");
  Ok(SearchOut {
    success: true,
    questions: paginate(&matches, req).to_vec(),
    total_questions: matches.len(),
    current_category: None,
  })
}

#[instrument(level = "info", skip(state, body), fields(category = body.quiz_category.id, history = body.previous_questions.len()))]
pub async fn play_quiz(state: &AppState, body: QuizIn) -> ApiResult<QuizOut> {
  let filter = CategoryFilter::from_quiz_category(body.quiz_category.id, body.quiz_category.kind.as_deref());
  let candidates = match filter {
    CategoryFilter::All => state.questions.all().await,
    CategoryFilter::Only(id) => state.questions.by_category(id).await,
  }
  .map_err(|e| {
    error!(target: "trivia", %filter, error = %e, "Quiz candidate read failed");
    ApiError::Unprocessable
  })?;

  let previous: HashSet<i64> = body.previous_questions.into_iter().collect();
  match draw(&candidates, &previous, &mut state.rng()) {
    Draw::Next(q) => {
      info!(target: "trivia", %filter, id = q.id, candidates = candidates.len(), "Quiz question served");
      Ok(QuizOut { success: true, question: Some(q) })
    }
    Draw::Exhausted => {
      info!(target: "trivia", %filter, "Quiz exhausted");
      Ok(QuizOut { success: true, question: None })
    }
    Draw::NoCandidates => {
      warn!(target: "trivia", %filter, "Quiz requested for a category without questions");
      Err(ApiError::Unprocessable)
    }
  }
}
