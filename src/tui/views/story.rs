use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

use crate::story::Step;
use crate::tui::state::TuiState;

pub fn draw_story_view(f: &mut Frame, area: Rect, steps: &[Step], state: &TuiState) {
    let items: Vec<ListItem> = steps
        .iter()
        .map(|s| match &s.url {
            Some(url) => ListItem::new(format!("{:>3}. {}\n     {url}", s.index + 1, s.text)),
            None => ListItem::new(format!("{:>3}. {}", s.index + 1, s.text)),
        })
        .collect();

    let title = match state.view.step {
        Some(i) => format!("Story (step {} of {})", i + 1, steps.len()),
        None => format!("Story ({} steps, n to begin)", steps.len()),
    };
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(state.view.step);
    f.render_stateful_widget(list, area, &mut list_state);
}
