//! SVG diagrams annotated with the problem's dimensions.
//!
//! Base drawings live at `<dir>/<shape>.svg`. Fixed width/height attributes on
//! the root element are stripped so the client can scale them, and one `<text>`
//! label per dimension is injected before `</svg>`. A missing asset degrades to
//! placeholder text.

use std::{
  path::{Path, PathBuf},
  sync::OnceLock,
};

use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{Dimensions, Problem, Shape};
use crate::error::TutorError;

const LABEL_FONT_SIZE: u32 = 12;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum Diagram {
  Svg(String),
  Placeholder(String),
}

#[derive(Clone, Debug)]
pub struct SvgDiagrams {
  dir: PathBuf,
  placeholder: String,
}

impl SvgDiagrams {
  pub fn new(dir: impl Into<PathBuf>, placeholder: impl Into<String>) -> Self {
    Self { dir: dir.into(), placeholder: placeholder.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  /// Never fails: a missing or unreadable asset becomes a placeholder.
  pub fn render(&self, problem: &Problem) -> Diagram {
    match self.load(problem.shape) {
      Ok(svg) => {
        debug!(target: "lesson", shape = %problem.shape, "Diagram rendered");
        Diagram::Svg(annotate(&svg, &problem.dimensions))
      }
      Err(e) => {
        warn!(target: "lesson", error = %e, "Diagram unavailable; using placeholder");
        Diagram::Placeholder(self.placeholder.clone())
      }
    }
  }

  fn load(&self, shape: Shape) -> Result<String, TutorError> {
    let path = self.dir.join(format!("{}.svg", shape));
    std::fs::read_to_string(&path).map_err(|_| TutorError::MissingDiagramAsset(path))
  }
}

fn root_tag_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"<svg\b[^>]*>").expect("static regex"))
}

fn size_attr_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r#"\s+(width|height)="[^"]+""#).expect("static regex"))
}

/// Label placements (x, y, text) for each dimension, in drawing coordinates.
fn labels(dims: &Dimensions) -> Vec<(u32, u32, String)> {
  match *dims {
    Dimensions::Square { side } => vec![(100, 40, format!("s={}", side))],
    Dimensions::Rectangle { length, width } => vec![
      (125, 25, format!("l={}", length)),
      (5, 85, format!("w={}", width)),
    ],
    Dimensions::Triangle { base, height } => vec![
      (120, 165, format!("b={}", base)),
      (130, 95, format!("h={}", height)),
    ],
    Dimensions::Parallelogram { base, height } => vec![
      (120, 165, format!("b={}", base)),
      (105, 105, format!("h={}", height)),
    ],
    Dimensions::Trapezium { a, b, height } => vec![
      (125, 40, format!("a={}", a)),
      (125, 165, format!("b={}", b)),
      (130, 105, format!("h={}", height)),
    ],
    Dimensions::Circle { radius } => vec![(190, 150, format!("r={}", radius))],
  }
}

/// Only the root element loses its size; shapes inside keep theirs.
pub fn annotate(svg: &str, dims: &Dimensions) -> String {
  let stripped = root_tag_re().replace(svg, |caps: &regex::Captures| {
    size_attr_re().replace_all(&caps[0], "").into_owned()
  });
  let text: String = labels(dims)
    .into_iter()
    .map(|(x, y, label)| {
      format!(r#"<text x="{}" y="{}" font-size="{}">{}</text>"#, x, y, LABEL_FONT_SIZE, label)
    })
    .collect();
  stripped.replace("</svg>", &format!("{}</svg>", text))
}
