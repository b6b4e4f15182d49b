use std::io;
use std::time::Duration;

use crossterm::event::{poll, read, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Terminal;
use tracing::{error, info};

use crate::cli::CommonArgs;
use crate::history::{fetch_history, resolve_cutoff};
use crate::story::build_steps;

use super::events::handle_key_event;
use super::state::{Tab, TuiState};
use super::views::{draw_help_overlay, draw_scatter_view, draw_story_view, draw_summary_view};

pub fn run(common: &CommonArgs) -> io::Result<()> {
    let history = fetch_history(common, true).map_err(|e| io::Error::other(format!("{e:#}")))?;
    let steps = build_steps(&history);
    let mut state = TuiState::new(&history);
    match (common.slider, common.until.as_deref()) {
        (Some(position), _) => state.view = state.view.with_slider(position),
        (None, Some(until)) => {
            let cutoff = resolve_cutoff(&history, Some(until), None).map_err(|e| io::Error::other(e.to_string()))?;
            if let Some(t) = cutoff {
                state.view = state.view.with_cutoff(t);
            }
        }
        (None, None) => {}
    }
    info!(commits = history.len(), steps = steps.len(), "starting interactive view");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let result = (|| -> io::Result<()> {
        loop {
            let draw_result = terminal.draw(|f| {
                let size = f.size();

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
                    .split(size);

                let tabs = Tabs::new(Tab::TITLES.to_vec())
                    .block(Block::default().borders(Borders::ALL).title("lochist"))
                    .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                    .select(state.tab.index());
                f.render_widget(tabs, chunks[0]);

                match state.tab {
                    Tab::Scatter => draw_scatter_view(f, chunks[1], &history, &state),
                    Tab::Summary => draw_summary_view(f, chunks[1], &history, &state),
                    Tab::Story => draw_story_view(f, chunks[1], &steps, &state),
                }

                let status = match state.current_status() {
                    Some(msg) => Line::from(Span::styled(msg.to_string(), Style::default().fg(Color::Yellow))),
                    None => Line::from(Span::styled(
                        "q quit | h help | Tab views | [ ] slider | b brush | n/p story | y copy",
                        Style::default().fg(Color::DarkGray),
                    )),
                };
                f.render_widget(Paragraph::new(status), chunks[2]);

                if state.show_help {
                    draw_help_overlay(f, size);
                }
            });

            if let Err(e) = draw_result {
                error!(error = %e, "TUI draw error");
            }

            if poll(Duration::from_millis(200))? {
                if let Event::Key(key_event) = read()? {
                    if handle_key_event(key_event, &mut state, &history, &steps) {
                        break;
                    }
                }
            }
        }
        Ok(())
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}
