use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::layout::centered_rect;

fn heading(text: &str) -> Line<'_> {
    Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )])
}

/// Draw the modal help overlay describing navigation, selection, and shortcuts.
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let block = Block::default().title("Help").borders(Borders::ALL);
    let help_area = centered_rect(70, 80, area);

    f.render_widget(Clear, help_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "lochist - Help",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        heading("Time slider:"),
        Line::from("  [ / ]       Move cutoff by 5%"),
        Line::from("  { / }       Move cutoff by 1%"),
        Line::from(""),
        heading("Brush:"),
        Line::from("  Arrows      Move cursor (Shift for larger steps)"),
        Line::from("  b           Start a brush at the cursor"),
        Line::from("  Enter       Finish the brush"),
        Line::from("  Esc         Clear slider, brush and step"),
        Line::from(""),
        heading("Story:"),
        Line::from("  n / p       Next / previous step"),
        Line::from(""),
        heading("General:"),
        Line::from("  Tab         Next view (Scatter/Summary/Story)"),
        Line::from("  Shift+Tab   Previous view"),
        Line::from("  y           Copy commit id under cursor"),
        Line::from("  h, F1       Toggle this help"),
        Line::from("  q           Quit application"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press 'h' or 'Esc' to close this help",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(help_paragraph, help_area);
}
