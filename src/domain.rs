//! Domain models: shapes, their dimension schemas, problems, lessons and modes.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::TutorError;

/// The closed set of 2D shapes the tutor teaches.
/// Declaration order is the fixed iteration order (and the tie-break order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
  Square,
  Rectangle,
  Triangle,
  Parallelogram,
  Trapezium,
  Circle,
}

impl Shape {
  pub const ALL: [Shape; 6] = [
    Shape::Square,
    Shape::Rectangle,
    Shape::Triangle,
    Shape::Parallelogram,
    Shape::Trapezium,
    Shape::Circle,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Shape::Square => "square",
      Shape::Rectangle => "rectangle",
      Shape::Triangle => "triangle",
      Shape::Parallelogram => "parallelogram",
      Shape::Trapezium => "trapezium",
      Shape::Circle => "circle",
    }
  }

  /// Capitalised name for dashboards and summaries.
  pub fn label(self) -> &'static str {
    match self {
      Shape::Square => "Square",
      Shape::Rectangle => "Rectangle",
      Shape::Triangle => "Triangle",
      Shape::Parallelogram => "Parallelogram",
      Shape::Trapezium => "Trapezium",
      Shape::Circle => "Circle",
    }
  }

  /// Short formula text, used by hints.
  pub fn formula(self) -> &'static str {
    match self {
      Shape::Square => "A = side²",
      Shape::Rectangle => "A = length × width",
      Shape::Triangle => "A = ½ × base × height",
      Shape::Parallelogram => "A = base × height",
      Shape::Trapezium => "A = ½ × (a + b) × height",
      Shape::Circle => "A = π × radius²",
    }
  }

  pub(crate) fn index(self) -> usize {
    self as usize
  }
}

impl fmt::Display for Shape {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Shape {
  type Err = TutorError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim().to_lowercase();
    Shape::ALL
      .into_iter()
      .find(|shape| shape.name() == wanted)
      .ok_or_else(|| TutorError::UnknownShape(s.to_string()))
  }
}

/// Named dimensions of a problem, one variant per shape.
/// All values are positive integers drawn by the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimensions {
  Square { side: u32 },
  Rectangle { length: u32, width: u32 },
  Triangle { base: u32, height: u32 },
  Parallelogram { base: u32, height: u32 },
  /// `b` is always the longer parallel side.
  Trapezium { a: u32, b: u32, height: u32 },
  Circle { radius: u32 },
}

impl Dimensions {
  pub fn shape(&self) -> Shape {
    match self {
      Dimensions::Square { .. } => Shape::Square,
      Dimensions::Rectangle { .. } => Shape::Rectangle,
      Dimensions::Triangle { .. } => Shape::Triangle,
      Dimensions::Parallelogram { .. } => Shape::Parallelogram,
      Dimensions::Trapezium { .. } => Shape::Trapezium,
      Dimensions::Circle { .. } => Shape::Circle,
    }
  }

  /// Ordered (name, value) pairs in the shape's schema order.
  pub fn entries(&self) -> Vec<(&'static str, u32)> {
    match *self {
      Dimensions::Square { side } => vec![("side", side)],
      Dimensions::Rectangle { length, width } => vec![("length", length), ("width", width)],
      Dimensions::Triangle { base, height } | Dimensions::Parallelogram { base, height } => {
        vec![("base", base), ("height", height)]
      }
      Dimensions::Trapezium { a, b, height } => vec![("a", a), ("b", b), ("height", height)],
      Dimensions::Circle { radius } => vec![("radius", radius)],
    }
  }

  /// Unrounded area from the shape's formula.
  pub fn area(&self) -> f64 {
    match *self {
      Dimensions::Square { side } => f64::from(side * side),
      Dimensions::Rectangle { length, width } => f64::from(length * width),
      Dimensions::Triangle { base, height } => 0.5 * f64::from(base) * f64::from(height),
      Dimensions::Parallelogram { base, height } => f64::from(base * height),
      Dimensions::Trapezium { a, b, height } => 0.5 * f64::from(a + b) * f64::from(height),
      Dimensions::Circle { radius } => std::f64::consts::PI * f64::from(radius * radius),
    }
  }
}

/// One posed question. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Problem {
  pub shape: Shape,
  pub dimensions: Dimensions,
  /// Rounded to 2 dp, half away from zero.
  pub expected_area: f64,
  pub prompt_text: String,
}

impl Problem {
  pub fn new(dimensions: Dimensions) -> Self {
    let shape = dimensions.shape();
    Self {
      shape,
      dimensions,
      expected_area: round2(dimensions.area()),
      prompt_text: format!(
        "Find the area of {} with dimensions: {}",
        shape,
        format_dims(&dimensions)
      ),
    }
  }

  pub fn is_correct(&self, answer: f64) -> bool {
    (answer - self.expected_area).abs() < 0.01
  }
}

fn round2(v: f64) -> f64 {
  (v * 100.0).round() / 100.0
}

fn format_dims(dims: &Dimensions) -> String {
  dims
    .entries()
    .iter()
    .map(|(k, v)| format!("{}: {}", k, v))
    .collect::<Vec<_>>()
    .join(", ")
}

/// Which half of the session state machine is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
  Diagnostic,
  Adaptive,
}

/// How a diagnostic question ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
  Correct,
  Incorrect,
  Skipped,
}

/// Static lesson content for one shape.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Lesson {
  pub shape: Shape,
  pub lesson_text: String,
  pub formula_text: String,
  pub worked_steps: Vec<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_shape_names_case_insensitively() {
    assert_eq!("Circle".parse::<Shape>().unwrap(), Shape::Circle);
    assert_eq!(" trapezium ".parse::<Shape>().unwrap(), Shape::Trapezium);
    assert!(matches!("hexagon".parse::<Shape>(), Err(TutorError::UnknownShape(s)) if s == "hexagon"));
  }

  #[test]
  fn area_formulas_match_known_values() {
    assert_eq!(Problem::new(Dimensions::Square { side: 5 }).expected_area, 25.0);
    assert_eq!(Problem::new(Dimensions::Rectangle { length: 7, width: 3 }).expected_area, 21.0);
    assert_eq!(Problem::new(Dimensions::Triangle { base: 5, height: 3 }).expected_area, 7.5);
    assert_eq!(Problem::new(Dimensions::Parallelogram { base: 6, height: 4 }).expected_area, 24.0);
    assert_eq!(Problem::new(Dimensions::Trapezium { a: 4, b: 10, height: 6 }).expected_area, 42.0);
    assert_eq!(Problem::new(Dimensions::Circle { radius: 3 }).expected_area, 28.27);
  }

  #[test]
  fn prompt_lists_dimensions_in_schema_order() {
    let p = Problem::new(Dimensions::Trapezium { a: 4, b: 9, height: 3 });
    assert_eq!(p.prompt_text, "Find the area of trapezium with dimensions: a: 4, b: 9, height: 3");
  }

  #[test]
  fn correctness_uses_a_hundredth_tolerance() {
    let p = Problem::new(Dimensions::Circle { radius: 3 });
    assert!(p.is_correct(28.27));
    assert!(p.is_correct(28.275));
    assert!(!p.is_correct(28.3));
    assert!(!p.is_correct(28.0));
  }
}
