//! Per-shape tallies over a diagnostic run.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{Outcome, Shape};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
  pub correct: u32,
  /// Skips count as attempts.
  pub attempts: u32,
}

impl Tally {
  /// Whole-number percentage; zero when nothing was attempted.
  pub fn percent(&self) -> u32 {
    if self.attempts == 0 { 0 } else { self.correct * 100 / self.attempts }
  }
}

pub fn summarize(results: &[(Shape, Outcome)], shapes: &[Shape]) -> BTreeMap<Shape, Tally> {
  let mut out: BTreeMap<Shape, Tally> = shapes.iter().map(|&s| (s, Tally::default())).collect();
  for (shape, outcome) in results {
    if let Some(t) = out.get_mut(shape) {
      t.attempts += 1;
      if *outcome == Outcome::Correct {
        t.correct += 1;
      }
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_results_report_zeros() {
    let s = summarize(&[], &Shape::ALL);
    assert_eq!(s.len(), 6);
    assert!(s.values().all(|t| *t == Tally::default()));
  }

  #[test]
  fn skips_count_as_attempts_but_not_correct() {
    let results = [
      (Shape::Square, Outcome::Correct),
      (Shape::Square, Outcome::Skipped),
      (Shape::Circle, Outcome::Incorrect),
      (Shape::Circle, Outcome::Correct),
      (Shape::Trapezium, Outcome::Skipped),
    ];
    let s = summarize(&results, &Shape::ALL);
    assert_eq!(s[&Shape::Square], Tally { correct: 1, attempts: 2 });
    assert_eq!(s[&Shape::Circle], Tally { correct: 1, attempts: 2 });
    assert_eq!(s[&Shape::Trapezium], Tally { correct: 0, attempts: 1 });
    assert_eq!(s[&Shape::Triangle], Tally::default());
    assert_eq!(s[&Shape::Square].percent(), 50);
  }

  #[test]
  fn shapes_outside_the_requested_set_are_ignored() {
    let results = [(Shape::Square, Outcome::Correct), (Shape::Circle, Outcome::Correct)];
    let s = summarize(&results, &[Shape::Circle]);
    assert_eq!(s.len(), 1);
    assert_eq!(s[&Shape::Circle], Tally { correct: 1, attempts: 1 });
  }
}
