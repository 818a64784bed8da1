//! Loading tutor configuration (messages, lesson bank, asset paths) from TOML.
//!
//! See `TutorConfig` and `Messages` for expected schema.

use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_DIAGRAMS_DIR: &str = "./diagrams";

#[derive(Clone, Debug, Deserialize, Default)]
pub struct TutorConfig {
  #[serde(default)]
  pub diagrams_dir: Option<String>,
  /// Seeds every new session deterministically (seed + session ordinal).
  #[serde(default)]
  pub rng_seed: Option<u64>,
  #[serde(default)]
  pub messages: Messages,
  #[serde(default)]
  pub lessons: Vec<LessonCfg>,
}

/// Lesson entry accepted in TOML configuration.
/// Missing fields fall back to the "not found" texts.
#[derive(Clone, Debug, Deserialize)]
pub struct LessonCfg {
  pub shape: String,
  #[serde(default)]
  pub lesson_text: Option<String>,
  #[serde(default)]
  pub formula_text: Option<String>,
  #[serde(default)]
  pub worked_steps: Vec<String>,
}

/// User-visible feedback strings. `{shape}` and `{formula}` are filled where noted.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Messages {
  pub idle: String,
  pub invalid_input: String,
  pub diagnostic_correct: String,
  pub diagnostic_incorrect: String,
  /// `{shape}`
  pub correct: String,
  pub incorrect: String,
  pub skipped: String,
  pub diagnostic_complete: String,
  /// `{shape}`, `{formula}`
  pub hint: String,
  pub no_lesson: String,
  pub diagram_placeholder: String,
}

impl Default for Messages {
  fn default() -> Self {
    Self {
      idle: "Awaiting student action…".into(),
      invalid_input: "⚠️ Please enter a valid number.".into(),
      diagnostic_correct: "✅ Correct!".into(),
      diagnostic_incorrect: "❌ Incorrect.".into(),
      correct: "✅ Correct! {shape} area is right.".into(),
      incorrect: "❌ Incorrect. Try again or use a hint.".into(),
      skipped: "⏭️ Question skipped.".into(),
      diagnostic_complete: "📊 Diagnostic complete! See results below.".into(),
      hint: "💡 Hint: Use formula for {shape}: {formula}".into(),
      no_lesson: "No lesson found for this shape.".into(),
      diagram_placeholder: "Diagram not available.".into(),
    }
  }
}

pub fn parse_config(s: &str) -> Result<TutorConfig, toml::de::Error> {
  toml::from_str::<TutorConfig>(s)
}

/// Attempt to load `TutorConfig` from TUTOR_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_tutor_config_from_env() -> Option<TutorConfig> {
  let path = std::env::var("TUTOR_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_config(&s) {
      Ok(cfg) => {
        info!(target: "areatutor_backend", %path, lessons = cfg.lessons.len(), "Loaded tutor config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "areatutor_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "areatutor_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

/// DIAGRAMS_DIR wins over the TOML value, which wins over the default.
pub fn resolve_diagrams_dir(cfg: Option<&TutorConfig>) -> String {
  std::env::var("DIAGRAMS_DIR")
    .ok()
    .or_else(|| cfg.and_then(|c| c.diagrams_dir.clone()))
    .unwrap_or_else(|| DEFAULT_DIAGRAMS_DIR.to_string())
}
