//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use kringum_fill::FillError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// A required setting is missing or blank.
  #[error("{0}")]
  Configuration(String),

  #[error("{0}")]
  Upstream(String),

  /// The generated reply could not be parsed; `raw` is echoed to the client.
  #[error("{message}")]
  Parse { message: String, raw: String },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<FillError> for ApiError {
  fn from(err: FillError) -> Self {
    let message = err.to_string();
    match err {
      FillError::PortNotFound(_) => ApiError::NotFound(message),
      FillError::PromptNotConfigured => ApiError::Configuration(message),
      FillError::Upstream(_) => ApiError::Upstream(message),
      FillError::Parse { raw, .. } => ApiError::Parse { message, raw },
      FillError::Store(e) => ApiError::Store(e),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "error": m })),
      ApiError::BadRequest(m) | ApiError::Configuration(m) => {
        (StatusCode::BAD_REQUEST, json!({ "error": m }))
      }
      ApiError::Upstream(m) => (StatusCode::BAD_GATEWAY, json!({ "error": m })),
      ApiError::Parse { message, raw } => (
        StatusCode::BAD_GATEWAY,
        json!({ "error": message, "raw": raw }),
      ),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": e.to_string() }))
      }
    };
    (status, Json(body)).into_response()
  }
}
