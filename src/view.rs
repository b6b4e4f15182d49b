//! Interaction state of the history view. Every handler takes the current
//! state by value and returns the next one.

use crate::history::{apply, brushed, BrushRect, CommitHistory, PlotArea, Projection, Selection, SliderScale};
use crate::model::CommitSummary;
use crate::story::{cutoff_for_step, Step};
use chrono::{DateTime, FixedOffset};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub projection: Option<Projection>,
    pub slider_scale: Option<SliderScale>,
    pub selection: Selection,
    pub cursor: (f64, f64),
    pub anchor: Option<(f64, f64)>,
    pub slider: u8,
    pub step: Option<usize>,
}

impl ViewState {
    pub fn new(history: &CommitHistory, area: PlotArea) -> Self {
        let projection = Projection::for_commits(history.commits(), area);
        Self {
            projection,
            slider_scale: SliderScale::for_commits(history.commits()),
            selection: Selection::None,
            cursor: (
                (area.left() + area.right()) / 2.0,
                (area.top() + area.bottom()) / 2.0,
            ),
            anchor: None,
            slider: SliderScale::MAX,
            step: None,
        }
    }

    pub fn area(&self) -> PlotArea {
        self.projection.map(|p| p.area).unwrap_or_default()
    }

    pub fn with_slider(mut self, position: u8) -> Self {
        self.slider = position.min(SliderScale::MAX);
        self.anchor = None;
        self.step = None;
        self.selection = match &self.slider_scale {
            Some(scale) => Selection::Cutoff(scale.cutoff(self.slider)),
            None => Selection::None,
        };
        debug!(slider = self.slider, "slider moved");
        self
    }

    /// Shows commits up to `cutoff` and parks the slider at its position.
    pub fn with_cutoff(mut self, cutoff: DateTime<FixedOffset>) -> Self {
        self.anchor = None;
        self.step = None;
        self.selection = Selection::Cutoff(cutoff);
        self.slider = self
            .slider_scale
            .map(|s| s.position(&cutoff))
            .unwrap_or(SliderScale::MAX);
        self
    }

    pub fn nudge_slider(self, delta: i16) -> Self {
        let next = (self.slider as i16 + delta).clamp(0, SliderScale::MAX as i16) as u8;
        self.with_slider(next)
    }

    /// Anchors a brush at the cursor. The rectangle follows the cursor until
    /// `finish_brush`.
    pub fn begin_brush(mut self) -> Self {
        self.anchor = Some(self.cursor);
        self.step = None;
        self.slider = SliderScale::MAX;
        self.selection = Selection::Brush(BrushRect::new(self.cursor, self.cursor));
        self
    }

    pub fn move_cursor(mut self, dx: f64, dy: f64) -> Self {
        let area = self.area();
        self.cursor = (
            (self.cursor.0 + dx).clamp(0.0, area.width),
            (self.cursor.1 + dy).clamp(0.0, area.height),
        );
        if let Some(anchor) = self.anchor {
            self.selection = Selection::Brush(BrushRect::new(anchor, self.cursor));
        }
        self
    }

    pub fn finish_brush(mut self) -> Self {
        if let Some(anchor) = self.anchor.take() {
            self.selection = Selection::Brush(BrushRect::new(anchor, self.cursor));
        }
        self
    }

    pub fn clear_selection(mut self) -> Self {
        self.selection = Selection::None;
        self.anchor = None;
        self.step = None;
        self.slider = SliderScale::MAX;
        self
    }

    pub fn enter_step(mut self, index: usize, steps: &[Step]) -> Self {
        match cutoff_for_step(steps, index) {
            Some(cutoff) => {
                self.step = Some(index);
                self.anchor = None;
                self.selection = Selection::Cutoff(cutoff);
                self.slider = self
                    .slider_scale
                    .map(|s| s.position(&cutoff))
                    .unwrap_or(SliderScale::MAX);
            }
            None => debug!(index, "no such step"),
        }
        self
    }

    pub fn is_brushing(&self) -> bool {
        self.anchor.is_some()
    }

    /// Commits drawn on the plot: the cutoff applies, a brush does not hide points.
    pub fn visible<'a>(&self, history: &'a CommitHistory) -> Vec<&'a CommitSummary> {
        match self.selection {
            Selection::Brush(_) => history.commits().iter().collect(),
            ref other => apply(history.commits(), other, self.projection.as_ref()),
        }
    }

    /// Commits inside the brush; empty without one.
    pub fn selected<'a>(&self, history: &'a CommitHistory) -> Vec<&'a CommitSummary> {
        match (&self.selection, &self.projection) {
            (Selection::Brush(rect), Some(p)) => brushed(history.commits(), Some(rect), p),
            _ => Vec::new(),
        }
    }

    /// Commit nearest the cursor within `radius` pixels.
    pub fn hovered<'a>(&self, history: &'a CommitHistory, radius: f64) -> Option<&'a CommitSummary> {
        let projection = self.projection.as_ref()?;
        self.visible(history)
            .into_iter()
            .map(|c| {
                let (x, y) = projection.project(c);
                let d = ((x - self.cursor.0).powi(2) + (y - self.cursor.1).powi(2)).sqrt();
                (c, d)
            })
            .filter(|(_, d)| *d <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(c, _)| c)
    }
}
