use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use crate::history::{language_breakdown, summarize, CommitHistory, Selection};
use crate::model::CommitSummary;
use crate::tui::draw::language_color;
use crate::tui::state::TuiState;

/// Render the site summary for the commits in view, the slider position and
/// the per-language line counts.
pub fn draw_summary_view(f: &mut Frame, area: Rect, history: &CommitHistory, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let view = &state.view;
    let (commits, scope): (Vec<&CommitSummary>, &str) = match view.selection {
        Selection::Brush(_) => (view.selected(history), "Brushed commits"),
        Selection::Cutoff(_) => (view.visible(history), "Commits up to cutoff"),
        Selection::None => (view.visible(history), "All commits"),
    };
    let summary = summarize(history, &commits);

    let label = Style::default().fg(Color::White);
    let period = summary
        .most_active_period
        .map(|p| p.to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    let rows = [
        ("Commits", summary.commits.to_string()),
        ("Files", summary.files.to_string()),
        ("Total LOC", summary.total_lines.to_string()),
        ("Days Worked", summary.days_worked.to_string()),
        ("Most Active Period", period),
        ("Avg. File Length", summary.avg_file_length.to_string()),
    ];
    let mut text = vec![
        Line::from(Span::styled(
            scope,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    text.extend(rows.into_iter().map(|(name, value)| {
        Line::from(vec![
            Span::styled(format!("{:<20}", name.to_uppercase()), label),
            Span::styled(value, Style::default().fg(Color::Cyan)),
        ])
    }));
    f.render_widget(
        Paragraph::new(text).block(Block::default().title("Site Summary").borders(Borders::ALL)),
        chunks[0],
    );

    let cutoff_label = match view.selection {
        Selection::Cutoff(t) => t.format("%Y-%m-%d %H:%M").to_string(),
        _ => "latest".to_string(),
    };
    let gauge = Gauge::default()
        .block(Block::default().title("Time Slider").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(view.slider as u16)
        .label(format!("{}% ({cutoff_label})", view.slider));
    f.render_widget(gauge, chunks[1]);

    let languages = language_breakdown(history, &commits);
    let total: usize = languages.iter().map(|l| l.lines).sum();
    let width = chunks[2].width.saturating_sub(24) as usize;
    let lines: Vec<Line> = languages
        .iter()
        .map(|l| {
            let share = if total == 0 { 0.0 } else { l.lines as f64 / total as f64 };
            let bar = "█".repeat(((share * width as f64).round() as usize).max(1));
            let name = if l.kind.is_empty() { "(none)" } else { l.kind.as_str() };
            Line::from(vec![
                Span::styled(format!("{name:<8} {:>6} ", l.lines), label),
                Span::styled(bar, Style::default().fg(language_color(&l.kind))),
            ])
        })
        .collect();
    f.render_widget(
        Paragraph::new(lines).block(Block::default().title("Languages").borders(Borders::ALL)),
        chunks[2],
    );
}
