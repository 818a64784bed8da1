//! Built-in lesson content so the tutor is useful without any config.

use crate::domain::{Lesson, Shape};

fn lesson(shape: Shape, text: &str, formula: &str, steps: &[&str]) -> Lesson {
  Lesson {
    shape,
    lesson_text: text.into(),
    formula_text: formula.into(),
    worked_steps: steps.iter().map(|s| s.to_string()).collect(),
  }
}

pub fn seed_lessons() -> Vec<Lesson> {
  vec![
    lesson(
      Shape::Square,
      "A square has four equal sides. Its area is the side length multiplied by itself.",
      "Area = side × side",
      &["A square has side 6 cm.", "Area = 6 × 6 = 36 cm²."],
    ),
    lesson(
      Shape::Rectangle,
      "A rectangle has two pairs of equal sides meeting at right angles. Multiply length by width.",
      "Area = length × width",
      &["A rectangle is 8 cm long and 5 cm wide.", "Area = 8 × 5 = 40 cm²."],
    ),
    lesson(
      Shape::Triangle,
      "A triangle is half of a parallelogram with the same base and height.",
      "Area = ½ × base × height",
      &["A triangle has base 10 cm and height 4 cm.", "Area = ½ × 10 × 4 = 20 cm²."],
    ),
    lesson(
      Shape::Parallelogram,
      "Cutting a triangle off one end of a parallelogram and moving it to the other end makes a rectangle. Use the perpendicular height, not the slanted side.",
      "Area = base × height",
      &["A parallelogram has base 9 cm and height 5 cm.", "Area = 9 × 5 = 45 cm²."],
    ),
    lesson(
      Shape::Trapezium,
      "A trapezium has one pair of parallel sides, a and b. Average them and multiply by the height.",
      "Area = ½ × (a + b) × height",
      &[
        "A trapezium has parallel sides 4 cm and 10 cm, height 6 cm.",
        "a + b = 14.",
        "Area = ½ × 14 × 6 = 42 cm².",
      ],
    ),
    lesson(
      Shape::Circle,
      "The area of a circle depends only on its radius, the distance from the centre to the edge.",
      "Area = π × radius²",
      &["A circle has radius 3 cm.", "radius² = 9.", "Area = π × 9 ≈ 28.27 cm²."],
    ),
  ]
}
