//! Error taxonomy for the tutor core and its HTTP surface.
//!
//! Recoverable conditions (bad numeric input, missing lesson, missing diagram)
//! are handled where they occur; only the transport decides how to show them.

use std::path::PathBuf;

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};

use crate::domain::Shape;
use crate::protocol::ErrorOut;

#[derive(Debug, thiserror::Error)]
pub enum TutorError {
  #[error("answer is not a number: {raw:?}")]
  InvalidInput { raw: String },

  #[error("unknown shape: {0:?}")]
  UnknownShape(String),

  #[error("no lesson found for {0}")]
  MissingLessonContent(Shape),

  #[error("diagram asset missing: {}", .0.display())]
  MissingDiagramAsset(PathBuf),

  #[error("invalid transition: {0}")]
  InvalidTransition(&'static str),

  #[error("unknown session: {0}")]
  UnknownSession(String),
}

impl IntoResponse for TutorError {
  fn into_response(self) -> Response {
    let status = match &self {
      TutorError::InvalidInput { .. } | TutorError::UnknownShape(_) => StatusCode::BAD_REQUEST,
      TutorError::MissingLessonContent(_) | TutorError::UnknownSession(_) => StatusCode::NOT_FOUND,
      TutorError::InvalidTransition(_) => StatusCode::CONFLICT,
      TutorError::MissingDiagramAsset(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorOut { error: self.to_string() })).into_response()
  }
}
