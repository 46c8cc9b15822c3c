//! Handler for `/contact`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/contact` | Body: [`ContactMessage`]; returns 201 + `{"success":true}` |
//! | other  | `/contact` | 405 + `Allow: POST`, nothing else runs |
//!
//! An accepted request is stored, then notified. The two steps are not
//! coupled: a failed notification leaves the stored record in place.
//! A store timeout abandons the wait but not the write, so a record may still
//! be committed after the caller has seen a 500. No notification is sent for
//! it.

use axum::{
  Json,
  body::Body,
  extract::{FromRequest, Request, State},
  http::{Method, StatusCode},
  response::{IntoResponse, Response},
};
use bytes::Bytes;
use folio_core::{
  notify::NotificationDispatcher,
  store::SubmissionStore,
  submission::{ContactMessage, NewSubmission},
};
use serde_json::json;
use tokio::time::timeout;

use crate::{AppState, error::ApiError};

/// Largest accepted request body, enforced through
/// [`axum::extract::DefaultBodyLimit`] on the API router.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// `ANY /contact`
pub async fn handler<S, D>(State(state): State<AppState<S, D>>, req: Request<Body>) -> Response
where
  S: SubmissionStore + 'static,
  D: NotificationDispatcher + 'static,
{
  if *req.method() != Method::POST {
    return ApiError::MethodNotAllowed.into_response();
  }
  match submit(&state, req).await {
    Ok(r) => r,
    Err(e) => e.into_response(),
  }
}

async fn submit<S, D>(state: &AppState<S, D>, req: Request<Body>) -> Result<Response, ApiError>
where
  S: SubmissionStore + 'static,
  D: NotificationDispatcher + 'static,
{
  let body = collect_body(req).await?;
  let raw: ContactMessage = serde_json::from_slice(&body)
    .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {e}")))?;
  let input = NewSubmission::parse(raw)?;

  let limit = state.timeouts.store;
  let record = timeout(limit, state.store.create(input))
    .await
    .map_err(|_| ApiError::Timeout("store", limit))?
    .map_err(|e| ApiError::Storage(Box::new(e)))?;
  tracing::info!(submission_id = %record.submission_id, "contact submission stored");

  let limit = state.timeouts.mail;
  timeout(limit, state.dispatcher.notify(&record))
    .await
    .map_err(|_| ApiError::Timeout("mail", limit))?
    .map_err(|e| ApiError::Delivery {
      submission_id: record.submission_id,
      source:        Box::new(e),
    })?;

  Ok((StatusCode::CREATED, Json(json!({ "success": true }))).into_response())
}

async fn collect_body(req: Request<Body>) -> Result<Bytes, ApiError> {
  Bytes::from_request(req, &()).await.map_err(|rejection| {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
      ApiError::PayloadTooLarge
    } else {
      ApiError::BadRequest(rejection.body_text())
    }
  })
}
