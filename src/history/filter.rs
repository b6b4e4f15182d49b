use crate::history::scale::Projection;
use crate::model::CommitSummary;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Screen-space rectangle with normalized corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRect {
    pub fn new(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            x0: a.0.min(b.0),
            y0: a.1.min(b.1),
            x1: a.0.max(b.0),
            y1: a.1.max(b.1),
        }
    }

    /// Edges count as inside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x0 <= x && x <= self.x1 && self.y0 <= y && y <= self.y1
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }
}

/// Active filter of a view. Cutoff and brush are never combined.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Selection {
    #[default]
    None,
    Cutoff(DateTime<FixedOffset>),
    Brush(BrushRect),
}

pub fn up_to<'a>(commits: &'a [CommitSummary], cutoff: &DateTime<FixedOffset>) -> Vec<&'a CommitSummary> {
    commits.iter().filter(|c| c.datetime <= *cutoff).collect()
}

pub fn brushed<'a>(
    commits: &'a [CommitSummary],
    rect: Option<&BrushRect>,
    projection: &Projection,
) -> Vec<&'a CommitSummary> {
    let Some(rect) = rect else {
        return Vec::new();
    };
    commits
        .iter()
        .filter(|c| {
            let (x, y) = projection.project(c);
            rect.contains(x, y)
        })
        .collect()
}

/// Commits left in view under `selection`; no selection keeps everything.
pub fn apply<'a>(
    commits: &'a [CommitSummary],
    selection: &Selection,
    projection: Option<&Projection>,
) -> Vec<&'a CommitSummary> {
    match (selection, projection) {
        (Selection::None, _) => commits.iter().collect(),
        (Selection::Cutoff(t), _) => up_to(commits, t),
        (Selection::Brush(rect), Some(p)) => brushed(commits, Some(rect), p),
        (Selection::Brush(_), None) => Vec::new(),
    }
}
