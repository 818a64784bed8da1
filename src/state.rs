//! Application state: per-learner sessions, lesson repository, diagrams, messages.
//!
//! Every learner gets an independent `Session` keyed by a random id; nothing
//! is shared between sessions. All user-visible wording comes from `Messages`
//! (TOML overridable), so the session core never formats text itself.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use rand::{rngs::StdRng, SeedableRng};
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::{load_tutor_config_from_env, resolve_diagrams_dir, Messages, TutorConfig};
use crate::diagram::SvgDiagrams;
use crate::domain::Shape;
use crate::error::TutorError;
use crate::lessons::{LessonBank, LessonRepository};
use crate::session::{Feedback, Session};
use crate::util::fill_template;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<String, Session>>>,
    pub lessons: Arc<dyn LessonRepository>,
    pub diagrams: SvgDiagrams,
    pub messages: Messages,
    rng_seed: Option<u64>,
    opened: Arc<AtomicU64>,
}

impl AppState {
    /// Build state from env: load config, lesson bank and diagram location.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_tutor_config_from_env();
        let diagrams_dir = resolve_diagrams_dir(cfg.as_ref());
        Self::from_config(cfg.unwrap_or_default(), diagrams_dir)
    }

    pub fn from_config(cfg: TutorConfig, diagrams_dir: String) -> Self {
        let lessons = LessonBank::from_config(&cfg.lessons);
        let diagrams = SvgDiagrams::new(diagrams_dir, cfg.messages.diagram_placeholder.clone());
        info!(
            target: "areatutor_backend",
            diagrams_dir = %diagrams.dir().display(),
            seeded = cfg.rng_seed.is_some(),
            "Tutor state ready"
        );
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            lessons: Arc::new(lessons),
            diagrams,
            messages: cfg.messages,
            rng_seed: cfg.rng_seed,
            opened: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Open a new learner session; the diagnostic starts right away.
    #[instrument(level = "info", skip(self))]
    pub async fn create_session(&self) -> String {
        let ordinal = self.opened.fetch_add(1, Ordering::Relaxed);
        let rng = match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(ordinal)),
            None => StdRng::from_entropy(),
        };
        let id = Uuid::new_v4().to_string();
        self.sessions.write().await.insert(id.clone(), Session::new(rng));
        info!(target: "tutor", session_id = %id, ordinal, "Session opened");
        id
    }

    /// Close a session; its problems and results are dropped with it.
    #[instrument(level = "info", skip(self))]
    pub async fn end_session(&self, id: &str) -> Result<(), TutorError> {
        let session = self
            .sessions
            .write()
            .await
            .remove(id)
            .ok_or_else(|| TutorError::UnknownSession(id.to_string()))?;
        info!(target: "tutor", session_id = %id, mode = ?session.mode(), "Session ended");
        Ok(())
    }

    /// Run `f` against one session under the write lock.
    pub async fn with_session<T>(&self, id: &str, f: impl FnOnce(&mut Session) -> T) -> Result<T, TutorError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| TutorError::UnknownSession(id.to_string()))?;
        Ok(f(session))
    }

    pub fn feedback_text(&self, feedback: Feedback) -> String {
        let m = &self.messages;
        match feedback {
            Feedback::Idle => m.idle.clone(),
            Feedback::InvalidInput => m.invalid_input.clone(),
            Feedback::DiagnosticCorrect => m.diagnostic_correct.clone(),
            Feedback::DiagnosticIncorrect => m.diagnostic_incorrect.clone(),
            Feedback::Correct(shape) => fill_template(&m.correct, &[("shape", shape.name())]),
            Feedback::Incorrect => m.incorrect.clone(),
            Feedback::Skipped => m.skipped.clone(),
            Feedback::DiagnosticComplete => m.diagnostic_complete.clone(),
        }
    }

    pub fn hint_text(&self, shape: Shape) -> String {
        fill_template(&self.messages.hint, &[("shape", shape.name()), ("formula", shape.formula())])
    }
}
