//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::diagnostic::Tally;
use crate::domain::{Lesson, Mode, Problem, Shape};
use crate::mastery::MasteryBand;
use crate::session::{Actions, Session};
use crate::state::AppState;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    NewSession,
    GetSession {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    CheckAnswer {
        #[serde(rename = "sessionId")]
        session_id: String,
        answer: String,
    },
    Skip {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    Next {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    StartAdaptive {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    RestartDiagnostic {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    Hint {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    Diagram {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    Lesson {
        shape: String,
    },
    EndSession {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Session {
        session: SessionView,
    },
    Hint {
        text: String,
    },
    Diagram {
        diagram: crate::diagram::Diagram,
    },
    Lesson {
        lesson: Lesson,
    },
    SessionEnded {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    Error {
        message: String,
    },
}

/// Problem as shown to the learner. The expected area is never sent.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemOut {
    pub shape: Shape,
    pub dimensions: Vec<DimensionOut>,
    pub prompt_text: String,
}

#[derive(Debug, Serialize)]
pub struct DimensionOut {
    pub name: &'static str,
    pub value: u32,
}

#[derive(Debug, Serialize)]
pub struct MasteryOut {
    pub shape: Shape,
    pub score: u8,
    pub band: MasteryBand,
}

#[derive(Debug, Serialize)]
pub struct TallyOut {
    pub shape: Shape,
    pub label: &'static str,
    pub correct: u32,
    pub attempts: u32,
    pub percent: u32,
}

#[derive(Debug, Serialize)]
pub struct DiagnosticOut {
    pub position: usize,
    pub total: usize,
    pub complete: bool,
    /// Present once the battery is exhausted and results are still held.
    pub summary: Option<Vec<TallyOut>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionsOut {
    pub check: bool,
    pub hint: bool,
    pub skip: bool,
    pub next: bool,
    pub start_adaptive: bool,
}

impl From<Actions> for ActionsOut {
    fn from(a: Actions) -> Self {
        Self { check: a.check, hint: a.hint, skip: a.skip, next: a.next, start_adaptive: a.start_adaptive }
    }
}

/// Everything the presentation layer needs to render one session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: String,
    pub mode: Mode,
    pub problem: Option<ProblemOut>,
    pub answered: bool,
    pub feedback: String,
    pub mastery: Vec<MasteryOut>,
    pub diagnostic: Option<DiagnosticOut>,
    pub actions: ActionsOut,
}

pub fn problem_out(p: &Problem) -> ProblemOut {
    ProblemOut {
        shape: p.shape,
        dimensions: p
            .dimensions
            .entries()
            .into_iter()
            .map(|(name, value)| DimensionOut { name, value })
            .collect(),
        prompt_text: p.prompt_text.clone(),
    }
}

/// Convert a `Session` (internal) to the public view.
pub fn to_view(state: &AppState, session_id: &str, s: &Session) -> SessionView {
    let diagnostic = (s.mode() == Mode::Diagnostic).then(|| {
        let complete = s.diagnostic_exhausted();
        DiagnosticOut {
            position: s.diagnostic_position().min(s.diagnostic_len()),
            total: s.diagnostic_len(),
            complete,
            summary: (complete && !s.diagnostic_results().is_empty()).then(|| {
                s.diagnostic_summary()
                    .into_iter()
                    .map(|(shape, t): (Shape, Tally)| TallyOut {
                        shape,
                        label: shape.label(),
                        correct: t.correct,
                        attempts: t.attempts,
                        percent: t.percent(),
                    })
                    .collect()
            }),
        }
    });

    SessionView {
        session_id: session_id.to_string(),
        mode: s.mode(),
        problem: s.current_problem().map(problem_out),
        answered: s.answered(),
        feedback: state.feedback_text(s.feedback()),
        mastery: s
            .mastery()
            .iter()
            .map(|(shape, score)| MasteryOut { shape, score, band: MasteryBand::from_score(score) })
            .collect(),
        diagnostic,
        actions: s.available_actions().into(),
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct LessonQuery {
    pub shape: String,
}

#[derive(Deserialize)]
pub struct AnswerIn {
    pub answer: String,
}

#[derive(Serialize)]
pub struct HintOut {
    pub text: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}
