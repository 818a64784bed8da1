//! Per-shape mastery scores (0..=100).

use serde::Serialize;

use crate::domain::Shape;

pub const MASTERY_STEP: u8 = 10;
pub const MASTERY_MAX: u8 = 100;

/// Dashboard classification of a score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryBand {
  Low,
  Developing,
  Strong,
}

impl MasteryBand {
  pub fn from_score(score: u8) -> Self {
    match score {
      0..=39 => MasteryBand::Low,
      40..=79 => MasteryBand::Developing,
      _ => MasteryBand::Strong,
    }
  }
}

/// Scores indexed by shape. Starts at zero and never decreases.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MasteryMap {
  scores: [u8; Shape::ALL.len()],
}

impl MasteryMap {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, shape: Shape) -> u8 {
    self.scores[shape.index()]
  }

  /// Credit one correct adaptive answer. Returns the new score.
  pub fn record_correct(&mut self, shape: Shape) -> u8 {
    let slot = &mut self.scores[shape.index()];
    *slot = slot.saturating_add(MASTERY_STEP).min(MASTERY_MAX);
    *slot
  }

  /// Shape with the lowest score; ties go to the earliest in `Shape::ALL`.
  pub fn weakest(&self) -> Shape {
    let mut best = Shape::ALL[0];
    for shape in Shape::ALL {
      if self.get(shape) < self.get(best) {
        best = shape;
      }
    }
    best
  }

  pub fn iter(&self) -> impl Iterator<Item = (Shape, u8)> + '_ {
    Shape::ALL.into_iter().map(|s| (s, self.get(s)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn starts_at_zero_everywhere() {
    let m = MasteryMap::new();
    assert!(m.iter().all(|(_, score)| score == 0));
  }

  #[test]
  fn clamps_at_one_hundred() {
    let mut m = MasteryMap::new();
    for _ in 0..15 {
      m.record_correct(Shape::Triangle);
    }
    assert_eq!(m.get(Shape::Triangle), 100);
    assert_eq!(m.get(Shape::Square), 0);
  }

  #[test]
  fn weakest_breaks_ties_in_declaration_order() {
    let mut m = MasteryMap::new();
    assert_eq!(m.weakest(), Shape::Square);
    m.record_correct(Shape::Square);
    assert_eq!(m.weakest(), Shape::Rectangle);
    for shape in [Shape::Rectangle, Shape::Triangle, Shape::Parallelogram, Shape::Trapezium] {
      m.record_correct(shape);
    }
    assert_eq!(m.weakest(), Shape::Circle);
    m.record_correct(Shape::Circle);
    m.record_correct(Shape::Circle);
    assert_eq!(m.weakest(), Shape::Square);
  }

  #[test]
  fn bands_follow_dashboard_thresholds() {
    assert_eq!(MasteryBand::from_score(0), MasteryBand::Low);
    assert_eq!(MasteryBand::from_score(39), MasteryBand::Low);
    assert_eq!(MasteryBand::from_score(40), MasteryBand::Developing);
    assert_eq!(MasteryBand::from_score(79), MasteryBand::Developing);
    assert_eq!(MasteryBand::from_score(80), MasteryBand::Strong);
    assert_eq!(MasteryBand::from_score(100), MasteryBand::Strong);
  }
}
