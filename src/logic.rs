//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Opening sessions and rendering their view
//!   - Running named session commands (check, skip, next, start adaptive, restart)
//!   - Hints, diagrams and lesson lookups

use tracing::{debug, info, instrument};

use crate::diagram::Diagram;
use crate::domain::Lesson;
use crate::error::TutorError;
use crate::lessons::lookup;
use crate::protocol::{to_view, SessionView};
use crate::session::Command;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn open_session(state: &AppState) -> Result<SessionView, TutorError> {
  let id = state.create_session().await;
  session_view(state, &id).await
}

#[instrument(level = "info", skip(state))]
pub async fn close_session(state: &AppState, session_id: &str) -> Result<(), TutorError> {
  state.end_session(session_id).await
}

#[instrument(level = "debug", skip(state))]
pub async fn session_view(state: &AppState, session_id: &str) -> Result<SessionView, TutorError> {
  state.with_session(session_id, |s| to_view(state, session_id, s)).await
}

/// Apply one command and return the resulting view.
/// Non-numeric answers are not an error here: the view carries the feedback.
#[instrument(level = "info", skip(state, cmd), fields(%session_id))]
pub async fn run_command(state: &AppState, session_id: &str, cmd: Command) -> Result<SessionView, TutorError> {
  let name = command_name(&cmd);
  state
    .with_session(session_id, |s| {
      match s.apply(cmd) {
        Ok(()) => {}
        Err(TutorError::InvalidInput { raw }) => {
          debug!(target: "tutor", %session_id, input_len = raw.len(), "Non-numeric answer");
        }
        Err(e) => return Err(e),
      }
      info!(target: "tutor", %session_id, command = name, mode = ?s.mode(), answered = s.answered(), "Command applied");
      Ok(to_view(state, session_id, s))
    })
    .await?
}

#[instrument(level = "info", skip(state))]
pub async fn get_hint_text(state: &AppState, session_id: &str) -> Result<String, TutorError> {
  let shape = state
    .with_session(session_id, |s| s.hint())
    .await?
    .ok_or(TutorError::InvalidTransition("no open question to hint for"))?;
  info!(target: "tutor", %session_id, %shape, "Hint served");
  Ok(state.hint_text(shape))
}

#[instrument(level = "info", skip(state))]
pub async fn get_diagram(state: &AppState, session_id: &str) -> Result<Diagram, TutorError> {
  let problem = state
    .with_session(session_id, |s| s.current_problem().cloned())
    .await?;
  Ok(match problem {
    Some(p) => state.diagrams.render(&p),
    None => Diagram::Placeholder(state.messages.diagram_placeholder.clone()),
  })
}

#[instrument(level = "info", skip(state))]
pub fn get_lesson(state: &AppState, shape: &str) -> Result<Lesson, TutorError> {
  let lesson = lookup(state.lessons.as_ref(), shape)?;
  info!(target: "lesson", shape = %lesson.shape, steps = lesson.worked_steps.len(), "Lesson served");
  Ok(lesson)
}

/// Learner-facing wording for an error.
pub fn error_message(state: &AppState, err: &TutorError) -> String {
  match err {
    TutorError::MissingLessonContent(_) => state.messages.no_lesson.clone(),
    TutorError::InvalidInput { .. } => state.messages.invalid_input.clone(),
    other => other.to_string(),
  }
}

fn command_name(cmd: &Command) -> &'static str {
  match cmd {
    Command::CheckAnswer(_) => "check_answer",
    Command::Skip => "skip",
    Command::Next => "next",
    Command::StartAdaptive => "start_adaptive",
    Command::RestartDiagnostic => "restart_diagnostic",
  }
}
