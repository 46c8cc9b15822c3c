//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Client errors carry their reason to the caller. Every internal failure is
//! logged here with full detail and answered with the same generic 500 body.

use std::time::Duration;

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// An error returned by the contact handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("method not allowed")]
  MethodNotAllowed,

  #[error("request body too large")]
  PayloadTooLarge,

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("invalid submission: {0}")]
  Validation(#[from] folio_core::Error),

  #[error("storage unavailable: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("delivery unavailable for submission {submission_id}: {source}")]
  Delivery {
    submission_id: Uuid,
    #[source]
    source:        Box<dyn std::error::Error + Send + Sync>,
  },

  #[error("{0} call timed out after {1:?}")]
  Timeout(&'static str, Duration),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match &self {
      ApiError::MethodNotAllowed => {
        let mut res = message(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
        res
          .headers_mut()
          .insert(header::ALLOW, HeaderValue::from_static("POST"));
        res
      }
      ApiError::PayloadTooLarge => message(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large"),
      ApiError::BadRequest(m) => message(StatusCode::BAD_REQUEST, m),
      ApiError::Validation(e) => message(StatusCode::BAD_REQUEST, &e.to_string()),
      ApiError::Storage(_) | ApiError::Delivery { .. } | ApiError::Timeout(..) => {
        tracing::error!(error = %self, "contact submission failed");
        message(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
      }
    }
  }
}

fn message(status: StatusCode, message: &str) -> Response {
  (status, Json(json!({ "message": message }))).into_response()
}
