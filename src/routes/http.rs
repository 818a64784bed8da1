//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs include parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use tracing::{info, instrument};

use crate::diagram::Diagram;
use crate::domain::Lesson;
use crate::error::TutorError;
use crate::logic::*;
use crate::protocol::*;
use crate::session::Command;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_create_session(State(state): State<Arc<AppState>>) -> Result<Json<SessionView>, TutorError> {
  let view = open_session(&state).await?;
  info!(target: "tutor", session_id = %view.session_id, "HTTP session created");
  Ok(Json(view))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<SessionView>, TutorError> {
  Ok(Json(session_view(&state, &id).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<StatusCode, TutorError> {
  close_session(&state, &id).await?;
  info!(target: "tutor", session_id = %id, "HTTP session ended");
  Ok(StatusCode::NO_CONTENT)
}

#[instrument(level = "info", skip(state, body), fields(%id, answer_len = body.answer.len()))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  Json(body): Json<AnswerIn>,
) -> Result<Json<SessionView>, TutorError> {
  Ok(Json(run_command(&state, &id, Command::CheckAnswer(body.answer)).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_skip(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<SessionView>, TutorError> {
  Ok(Json(run_command(&state, &id, Command::Skip).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_next(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<SessionView>, TutorError> {
  Ok(Json(run_command(&state, &id, Command::Next).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_adaptive(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<SessionView>, TutorError> {
  Ok(Json(run_command(&state, &id, Command::StartAdaptive).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_diagnostic(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<SessionView>, TutorError> {
  Ok(Json(run_command(&state, &id, Command::RestartDiagnostic).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_hint(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<HintOut>, TutorError> {
  let text = get_hint_text(&state, &id).await?;
  Ok(Json(HintOut { text }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_diagram(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<Diagram>, TutorError> {
  Ok(Json(get_diagram(&state, &id).await?))
}

#[instrument(level = "info", skip(state), fields(shape = %q.shape))]
pub async fn http_get_lesson(
  State(state): State<Arc<AppState>>,
  Query(q): Query<LessonQuery>,
) -> Result<Json<Lesson>, TutorError> {
  Ok(Json(get_lesson(&state, &q.shape)?))
}
