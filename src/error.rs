//! API error taxonomy and its HTTP rendering.
//!
//! Every failure leaves the service as
//! `{"success": false, "error": <status>, "message": <fixed text>}`.
//! Store failures are translated at the endpoint boundary (see `logic`),
//! deliberately coarse: the message never carries the underlying cause.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use thiserror::Error;

use crate::protocol::ErrorOut;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ApiError {
  #[error("bad request")]
  BadRequest,
  // Nothing in the API is access-controlled yet; kept so the 403 body exists.
  #[allow(dead_code)]
  #[error("forbidden")]
  Forbidden,
  #[error("not found")]
  NotFound,
  #[error("method not allowed")]
  MethodNotAllowed,
  #[error("unprocessable")]
  Unprocessable,
  #[error("server error")]
  ServerError,
}

impl ApiError {
  pub fn status(self) -> StatusCode {
    match self {
      ApiError::BadRequest => StatusCode::BAD_REQUEST,
      ApiError::Forbidden => StatusCode::FORBIDDEN,
      ApiError::NotFound => StatusCode::NOT_FOUND,
      ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
      ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  pub fn message(self) -> &'static str {
    match self {
      ApiError::BadRequest => "Bad client request.",
      ApiError::Forbidden => "Access forbidden.",
      ApiError::NotFound => "Not found: server cannot find the requested resource.",
      ApiError::MethodNotAllowed => "Request method not allowed.",
      ApiError::Unprocessable => "Request is unprocessable.",
      ApiError::ServerError => "Internal server error.",
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let body = ErrorOut { success: false, error: status.as_u16(), message: self.message() };
    (status, Json(body)).into_response()
  }
}

pub type ApiResult<T> = Result<T, ApiError>;
