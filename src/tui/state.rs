use std::time::Instant;

use crate::history::{CommitHistory, PlotArea};
use crate::view::ViewState;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tab {
    Scatter,
    Summary,
    Story,
}

impl Tab {
    pub const TITLES: [&'static str; 3] = ["Scatter", "Summary", "Story"];

    pub fn index(self) -> usize {
        match self {
            Tab::Scatter => 0,
            Tab::Summary => 1,
            Tab::Story => 2,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Scatter => Tab::Summary,
            Tab::Summary => Tab::Story,
            Tab::Story => Tab::Scatter,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Tab::Scatter => Tab::Story,
            Tab::Summary => Tab::Scatter,
            Tab::Story => Tab::Summary,
        }
    }
}

pub struct TuiState {
    pub view: ViewState,
    pub tab: Tab,
    pub show_help: bool,
    pub status_message: Option<(String, Instant)>,
}

impl TuiState {
    pub fn new(history: &CommitHistory) -> Self {
        Self {
            view: ViewState::new(history, PlotArea::default()),
            tab: Tab::Scatter,
            show_help: false,
            status_message: None,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Status text younger than three seconds.
    pub fn current_status(&self) -> Option<&str> {
        self.status_message
            .as_ref()
            .filter(|(_, at)| at.elapsed().as_secs() < 3)
            .map(|(msg, _)| msg.as_str())
    }
}
