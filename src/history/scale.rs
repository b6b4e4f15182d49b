use crate::history::aggregate::extent;
use crate::model::CommitSummary;
use chrono::{DateTime, FixedOffset, TimeZone};

pub const HOURS_PER_DAY: f64 = 24.0;

/// Continuous linear map from a domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// A zero-width domain maps everything to the middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = if d1 == d0 { 0.5 } else { (value - d0) / (d1 - d0) };
        r0 + t * (r1 - r0)
    }

    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = if r1 == r0 { 0.5 } else { (px - r0) / (r1 - r0) };
        d0 + t * (d1 - d0)
    }
}

/// Linear map from timestamps onto pixels. Inverted values carry the offset
/// of the domain's upper end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>, range: (f64, f64)) -> Self {
        let linear = LinearScale::new((millis(&start), millis(&end)), range);
        Self { start, end, linear }
    }

    pub fn domain(&self) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
        (self.start, self.end)
    }

    pub fn range(&self) -> (f64, f64) {
        self.linear.range
    }

    pub fn map(&self, t: &DateTime<FixedOffset>) -> f64 {
        self.linear.map(millis(t))
    }

    pub fn invert(&self, px: f64) -> DateTime<FixedOffset> {
        let ms = self.linear.invert(px).round() as i64;
        self.end
            .offset()
            .timestamp_millis_opt(ms)
            .single()
            .unwrap_or(self.end)
    }
}

fn millis(t: &DateTime<FixedOffset>) -> f64 {
    t.timestamp_millis() as f64
}

/// Canvas size and margins of the scatterplot, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
}

impl Default for PlotArea {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            margin_top: 10.0,
            margin_right: 10.0,
            margin_bottom: 30.0,
            margin_left: 20.0,
        }
    }
}

impl PlotArea {
    pub fn left(&self) -> f64 {
        self.margin_left
    }

    pub fn right(&self) -> f64 {
        self.width - self.margin_right
    }

    pub fn top(&self) -> f64 {
        self.margin_top
    }

    pub fn bottom(&self) -> f64 {
        self.height - self.margin_bottom
    }
}

/// Axis scales placing each commit at (time, hour of day).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub area: PlotArea,
    pub x: TimeScale,
    pub y: LinearScale,
}

impl Projection {
    pub fn for_commits<'a, I>(commits: I, area: PlotArea) -> Option<Self>
    where
        I: IntoIterator<Item = &'a CommitSummary>,
    {
        let (start, end) = extent(commits)?;
        Some(Self {
            area,
            x: TimeScale::new(start, end, (area.left(), area.right())),
            y: LinearScale::new((0.0, HOURS_PER_DAY), (area.bottom(), area.top())),
        })
    }

    pub fn project(&self, commit: &CommitSummary) -> (f64, f64) {
        (self.x.map(&commit.datetime), self.y.map(commit.hour_frac))
    }
}

/// Maps a 0..=100 slider onto the commit time extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderScale {
    time: TimeScale,
}

impl SliderScale {
    pub const MAX: u8 = 100;

    pub fn for_commits<'a, I>(commits: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a CommitSummary>,
    {
        let (start, end) = extent(commits)?;
        Some(Self {
            time: TimeScale::new(start, end, (0.0, Self::MAX as f64)),
        })
    }

    pub fn cutoff(&self, position: u8) -> DateTime<FixedOffset> {
        let position = position.min(Self::MAX);
        if position == Self::MAX {
            return self.time.domain().1;
        }
        self.time.invert(position as f64)
    }

    pub fn position(&self, t: &DateTime<FixedOffset>) -> u8 {
        self.time.map(t).round().clamp(0.0, Self::MAX as f64) as u8
    }
}
