//! Randomised problem generation.
//!
//! Each shape draws integer dimensions from fixed inclusive bounds; the
//! expected area follows from `Problem::new`. The random source is always
//! passed in so sessions (and tests) control reproducibility.

use rand::{seq::SliceRandom, Rng};

use crate::domain::{Dimensions, Problem, Shape};

/// Problems per shape in one diagnostic battery.
pub const DIAGNOSTIC_PER_SHAPE: usize = 2;

pub fn generate<R: Rng + ?Sized>(shape: Shape, rng: &mut R) -> Problem {
  let dimensions = match shape {
    Shape::Square => Dimensions::Square { side: rng.gen_range(3..=12) },
    Shape::Rectangle => Dimensions::Rectangle {
      length: rng.gen_range(5..=15),
      width: rng.gen_range(3..=10),
    },
    Shape::Triangle => Dimensions::Triangle {
      base: rng.gen_range(5..=15),
      height: rng.gen_range(3..=10),
    },
    Shape::Parallelogram => Dimensions::Parallelogram {
      base: rng.gen_range(5..=15),
      height: rng.gen_range(3..=10),
    },
    Shape::Trapezium => {
      let a = rng.gen_range(4..=10);
      Dimensions::Trapezium {
        a,
        b: rng.gen_range(a + 2..=a + 10),
        height: rng.gen_range(3..=10),
      }
    }
    Shape::Circle => Dimensions::Circle { radius: rng.gen_range(3..=10) },
  };
  Problem::new(dimensions)
}

/// Two problems per shape, shuffled.
pub fn diagnostic_battery<R: Rng + ?Sized>(rng: &mut R) -> Vec<Problem> {
  let mut queue: Vec<Problem> = Shape::ALL
    .iter()
    .flat_map(|&shape| std::iter::repeat(shape).take(DIAGNOSTIC_PER_SHAPE))
    .map(|shape| generate(shape, &mut *rng))
    .collect();
  queue.shuffle(rng);
  queue
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::{rngs::StdRng, SeedableRng};

  fn in_range(v: u32, lo: u32, hi: u32) -> bool {
    (lo..=hi).contains(&v)
  }

  #[test]
  fn dimensions_stay_within_bounds() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
      for shape in Shape::ALL {
        let p = generate(shape, &mut rng);
        assert_eq!(p.shape, shape);
        match p.dimensions {
          Dimensions::Square { side } => assert!(in_range(side, 3, 12)),
          Dimensions::Rectangle { length, width } => {
            assert!(in_range(length, 5, 15) && in_range(width, 3, 10))
          }
          Dimensions::Triangle { base, height } | Dimensions::Parallelogram { base, height } => {
            assert!(in_range(base, 5, 15) && in_range(height, 3, 10))
          }
          Dimensions::Trapezium { a, b, height } => {
            assert!(in_range(a, 4, 10));
            assert!(in_range(b, a + 2, a + 10), "b={b} a={a}");
            assert!(in_range(height, 3, 10));
          }
          Dimensions::Circle { radius } => assert!(in_range(radius, 3, 10)),
        }
      }
    }
  }

  #[test]
  fn same_seed_gives_same_problem() {
    let a = generate(Shape::Circle, &mut StdRng::seed_from_u64(42));
    let b = generate(Shape::Circle, &mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
  }

  #[test]
  fn expected_area_is_rounded_to_two_places() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
      let p = generate(Shape::Circle, &mut rng);
      let scaled = p.expected_area * 100.0;
      assert!((scaled - scaled.round()).abs() < 1e-6, "{}", p.expected_area);
    }
  }

  #[test]
  fn battery_has_two_per_shape() {
    let queue = diagnostic_battery(&mut StdRng::seed_from_u64(11));
    assert_eq!(queue.len(), DIAGNOSTIC_PER_SHAPE * Shape::ALL.len());
    for shape in Shape::ALL {
      assert_eq!(queue.iter().filter(|p| p.shape == shape).count(), DIAGNOSTIC_PER_SHAPE);
    }
  }
}
