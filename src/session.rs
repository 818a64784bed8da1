//! Session controller: the diagnostic/adaptive state machine for one learner.
//!
//! A session starts in Diagnostic mode with a shuffled battery of two problems
//! per shape. Each diagnostic question is single-attempt; its outcome is
//! recorded and the learner moves on. Once the battery is exhausted the session
//! rests with no current problem until `switch_to_adaptive` is called. Adaptive
//! mode always serves the shape with the lowest mastery score and allows
//! retries after an incorrect answer.

use std::collections::BTreeMap;

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info};

use crate::diagnostic::{summarize, Tally};
use crate::domain::{Mode, Outcome, Problem, Shape};
use crate::error::TutorError;
use crate::generator::{diagnostic_battery, generate};
use crate::mastery::MasteryMap;

/// Last thing the learner should be told. Rendered to text by the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
  Idle,
  InvalidInput,
  DiagnosticCorrect,
  DiagnosticIncorrect,
  Correct(Shape),
  Incorrect,
  Skipped,
  DiagnosticComplete,
}

/// Result of `check_answer` when the input parsed (or was ignored).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
  /// Already answered, or nothing to answer.
  Ignored,
  Correct,
  Incorrect,
}

/// Result of moving to the next question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
  Loaded(Shape),
  DiagnosticComplete,
}

/// Named commands issued by the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
  CheckAnswer(String),
  Skip,
  Next,
  StartAdaptive,
  RestartDiagnostic,
}

/// Which commands the presentation layer should offer right now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Actions {
  pub check: bool,
  pub hint: bool,
  pub skip: bool,
  pub next: bool,
  pub start_adaptive: bool,
}

#[derive(Debug)]
pub struct Session {
  mode: Mode,
  current: Option<Problem>,
  answered: bool,
  feedback: Feedback,
  mastery: MasteryMap,
  queue: Vec<Problem>,
  index: usize,
  results: Vec<(Shape, Outcome)>,
  rng: StdRng,
}

impl Session {
  /// Fresh session; the diagnostic battery is built immediately.
  pub fn new(rng: StdRng) -> Self {
    let mut s = Self {
      mode: Mode::Diagnostic,
      current: None,
      answered: false,
      feedback: Feedback::Idle,
      mastery: MasteryMap::new(),
      queue: Vec::new(),
      index: 0,
      results: Vec::new(),
      rng,
    };
    s.start_diagnostic();
    s
  }

  pub fn with_seed(seed: u64) -> Self {
    Self::new(StdRng::seed_from_u64(seed))
  }

  pub fn mode(&self) -> Mode {
    self.mode
  }

  pub fn current_problem(&self) -> Option<&Problem> {
    self.current.as_ref()
  }

  pub fn answered(&self) -> bool {
    self.answered
  }

  pub fn feedback(&self) -> Feedback {
    self.feedback
  }

  pub fn mastery(&self) -> &MasteryMap {
    &self.mastery
  }

  pub fn diagnostic_results(&self) -> &[(Shape, Outcome)] {
    &self.results
  }

  pub fn diagnostic_position(&self) -> usize {
    self.index
  }

  pub fn diagnostic_len(&self) -> usize {
    self.queue.len()
  }

  /// True once every diagnostic question has been consumed.
  pub fn diagnostic_exhausted(&self) -> bool {
    self.mode == Mode::Diagnostic && self.current.is_none()
  }

  pub fn diagnostic_summary(&self) -> BTreeMap<Shape, Tally> {
    summarize(&self.results, &Shape::ALL)
  }

  pub fn start_diagnostic(&mut self) {
    self.queue = diagnostic_battery(&mut self.rng);
    self.index = 0;
    self.results.clear();
    self.mode = Mode::Diagnostic;
    self.load_queued();
    info!(target: "tutor", questions = self.queue.len(), "Diagnostic started");
  }

  /// Mode-dependent "next question". An open question must be answered (or
  /// skipped) first; an exhausted diagnostic stays where it is.
  pub fn advance(&mut self) -> Result<Step, TutorError> {
    if self.current.is_some() && !self.answered {
      return Err(TutorError::InvalidTransition("answer or skip the current question first"));
    }
    Ok(self.step_forward())
  }

  fn step_forward(&mut self) -> Step {
    match self.mode {
      Mode::Diagnostic => {
        if self.current.is_some() {
          self.index += 1;
        }
        self.load_queued()
      }
      Mode::Adaptive => self.load_adaptive(),
    }
  }

  /// Parse and grade `raw`. Invalid input leaves the question open.
  pub fn check_answer(&mut self, raw: &str) -> Result<AnswerOutcome, TutorError> {
    if self.answered {
      return Ok(AnswerOutcome::Ignored);
    }
    let Some(problem) = &self.current else {
      return Ok(AnswerOutcome::Ignored);
    };
    let value: f64 = match raw.trim().parse() {
      Ok(v) => v,
      Err(_) => {
        self.feedback = Feedback::InvalidInput;
        return Err(TutorError::InvalidInput { raw: raw.to_string() });
      }
    };

    let shape = problem.shape;
    let correct = problem.is_correct(value);
    debug!(target: "tutor", %shape, correct, mode = ?self.mode, "Answer graded");

    match self.mode {
      Mode::Diagnostic => {
        let outcome = if correct { Outcome::Correct } else { Outcome::Incorrect };
        self.results.push((shape, outcome));
        self.feedback = if correct { Feedback::DiagnosticCorrect } else { Feedback::DiagnosticIncorrect };
        self.answered = true;
      }
      Mode::Adaptive => {
        if correct {
          let score = self.mastery.record_correct(shape);
          info!(target: "tutor", %shape, score, "Mastery increased");
          self.feedback = Feedback::Correct(shape);
          self.answered = true;
        } else {
          self.feedback = Feedback::Incorrect;
        }
      }
    }
    Ok(if correct { AnswerOutcome::Correct } else { AnswerOutcome::Incorrect })
  }

  /// Give up on the current question.
  pub fn skip(&mut self) -> Step {
    match self.mode {
      Mode::Diagnostic => {
        // an answered question already has its result
        if let (Some(p), false) = (&self.current, self.answered) {
          self.results.push((p.shape, Outcome::Skipped));
          info!(target: "tutor", shape = %p.shape, "Diagnostic question skipped");
        }
        self.step_forward()
      }
      Mode::Adaptive => {
        let step = self.load_adaptive();
        self.feedback = Feedback::Skipped;
        step
      }
    }
  }

  /// Leave an exhausted diagnostic for adaptive practice.
  pub fn switch_to_adaptive(&mut self) -> Result<Step, TutorError> {
    if !self.diagnostic_exhausted() {
      return Err(TutorError::InvalidTransition(
        "adaptive practice starts only after the diagnostic is complete",
      ));
    }
    self.results.clear();
    self.mode = Mode::Adaptive;
    info!(target: "tutor", "Switched to adaptive practice");
    Ok(self.load_adaptive())
  }

  /// Shape to hint about, while a question is open.
  pub fn hint(&self) -> Option<Shape> {
    match (&self.current, self.answered) {
      (Some(p), false) => Some(p.shape),
      _ => None,
    }
  }

  pub fn available_actions(&self) -> Actions {
    let open = self.current.is_some() && !self.answered;
    Actions {
      check: open,
      hint: open,
      skip: open,
      next: self.current.is_some() && self.answered,
      start_adaptive: self.diagnostic_exhausted(),
    }
  }

  /// Dispatch a named command. `InvalidInput` is reported but leaves state intact.
  pub fn apply(&mut self, cmd: Command) -> Result<(), TutorError> {
    match cmd {
      Command::CheckAnswer(raw) => self.check_answer(&raw).map(|_| ()),
      Command::Skip => {
        self.skip();
        Ok(())
      }
      Command::Next => self.advance().map(|_| ()),
      Command::StartAdaptive => self.switch_to_adaptive().map(|_| ()),
      Command::RestartDiagnostic => {
        self.start_diagnostic();
        Ok(())
      }
    }
  }

  fn load_queued(&mut self) -> Step {
    match self.queue.get(self.index) {
      Some(p) => {
        let shape = p.shape;
        self.current = Some(p.clone());
        self.answered = false;
        self.feedback = Feedback::Idle;
        Step::Loaded(shape)
      }
      None => {
        if self.current.take().is_some() {
          info!(target: "tutor", answered = self.results.len(), "Diagnostic complete");
        }
        self.answered = true;
        self.feedback = Feedback::DiagnosticComplete;
        Step::DiagnosticComplete
      }
    }
  }

  fn load_adaptive(&mut self) -> Step {
    let shape = self.mastery.weakest();
    self.current = Some(generate(shape, &mut self.rng));
    self.answered = false;
    self.feedback = Feedback::Idle;
    debug!(target: "tutor", %shape, score = self.mastery.get(shape), "Adaptive problem loaded");
    Step::Loaded(shape)
  }
}
