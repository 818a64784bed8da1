//! Lesson lookup keyed by shape.

use std::collections::HashMap;

use tracing::{error, instrument};

use crate::config::LessonCfg;
use crate::domain::{Lesson, Shape};
use crate::error::TutorError;
use crate::seeds::seed_lessons;

const NO_LESSON_TEXT: &str = "Lesson description not found.";
const NO_FORMULA_TEXT: &str = "Formula not found.";
const NO_WORKED_STEPS: &str = "No worked examples available.";

pub trait LessonRepository: Send + Sync {
  fn get(&self, shape: Shape) -> Option<Lesson>;
}

/// In-memory lesson store.
#[derive(Clone, Debug, Default)]
pub struct LessonBank {
  by_shape: HashMap<Shape, Lesson>,
}

impl LessonBank {
  pub fn empty() -> Self {
    Self::default()
  }

  /// Built-in lessons overlaid with config entries for the same shape.
  pub fn from_config(entries: &[LessonCfg]) -> Self {
    let mut bank = Self::empty();
    for l in seed_lessons() {
      bank.insert(l);
    }
    for entry in entries {
      let shape = match entry.shape.parse::<Shape>() {
        Ok(s) => s,
        Err(e) => {
          error!(target: "lesson", error = %e, "Skipping lesson entry");
          continue;
        }
      };
      bank.insert(lesson_from_cfg(shape, entry));
    }
    bank
  }

  pub fn insert(&mut self, lesson: Lesson) {
    self.by_shape.insert(lesson.shape, lesson);
  }
}

impl LessonRepository for LessonBank {
  fn get(&self, shape: Shape) -> Option<Lesson> {
    self.by_shape.get(&shape).cloned()
  }
}

fn lesson_from_cfg(shape: Shape, entry: &LessonCfg) -> Lesson {
  let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());
  let steps: Vec<String> = entry.worked_steps.iter().filter(|s| !s.trim().is_empty()).cloned().collect();
  Lesson {
    shape,
    lesson_text: non_empty(&entry.lesson_text).unwrap_or_else(|| NO_LESSON_TEXT.into()),
    formula_text: non_empty(&entry.formula_text).unwrap_or_else(|| NO_FORMULA_TEXT.into()),
    worked_steps: if steps.is_empty() { vec![NO_WORKED_STEPS.into()] } else { steps },
  }
}

/// Resolve a free-text shape name against a repository.
#[instrument(level = "debug", skip(repo))]
pub fn lookup(repo: &dyn LessonRepository, shape_name: &str) -> Result<Lesson, TutorError> {
  let shape: Shape = shape_name.parse()?;
  repo.get(shape).ok_or(TutorError::MissingLessonContent(shape))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn built_in_bank_covers_every_shape() {
    let bank = LessonBank::from_config(&[]);
    for shape in Shape::ALL {
      let l = bank.get(shape).expect("lesson");
      assert_eq!(l.shape, shape);
      assert!(!l.worked_steps.is_empty());
    }
  }

  #[test]
  fn config_entries_override_and_fill_gaps() {
    let entries = vec![
      LessonCfg {
        shape: "Circle".into(),
        lesson_text: None,
        formula_text: Some("A = πr²".into()),
        worked_steps: vec![],
      },
      LessonCfg {
        shape: "hexagon".into(),
        lesson_text: Some("six sides".into()),
        formula_text: None,
        worked_steps: vec![],
      },
    ];
    let bank = LessonBank::from_config(&entries);
    let circle = bank.get(Shape::Circle).expect("circle");
    assert_eq!(circle.formula_text, "A = πr²");
    assert_eq!(circle.lesson_text, NO_LESSON_TEXT);
    assert_eq!(circle.worked_steps, vec![NO_WORKED_STEPS.to_string()]);
    assert_eq!(bank.by_shape.len(), 6);
  }

  #[test]
  fn lookup_distinguishes_unknown_shape_from_missing_lesson() {
    let bank = LessonBank::empty();
    assert!(matches!(lookup(&bank, "square"), Err(TutorError::MissingLessonContent(Shape::Square))));
    assert!(matches!(lookup(&bank, "hexagon"), Err(TutorError::UnknownShape(_))));
    let full = LessonBank::from_config(&[]);
    assert_eq!(lookup(&full, "Triangle").expect("lesson").shape, Shape::Triangle);
  }
}
