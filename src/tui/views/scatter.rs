use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::history::{CommitHistory, Selection};
use crate::tui::draw::hour_label;
use crate::tui::events::HOVER_RADIUS;
use crate::tui::state::TuiState;

/// Render commits as a time x hour-of-day scatterplot with the brush and tooltip.
pub fn draw_scatter_view(f: &mut Frame, area: Rect, history: &CommitHistory, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let view = &state.view;
    let Some(projection) = view.projection.as_ref() else {
        let empty = Paragraph::new("No commits to plot").block(Block::default().title("Commits").borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    };
    let plot = projection.area;
    // Chart y grows upwards, pixel y grows downwards.
    let flip = |(x, y): (f64, f64)| (x, plot.height - y);

    let visible = view.visible(history);
    let selected = view.selected(history);
    let points: Vec<(f64, f64)> = visible.iter().map(|c| flip(projection.project(c))).collect();
    let picked: Vec<(f64, f64)> = selected.iter().map(|c| flip(projection.project(c))).collect();
    let cursor = vec![flip(view.cursor)];
    let outline: Vec<(f64, f64)> = match view.selection {
        Selection::Brush(r) => [(r.x0, r.y0), (r.x1, r.y0), (r.x1, r.y1), (r.x0, r.y1), (r.x0, r.y0)]
            .into_iter()
            .map(flip)
            .collect(),
        _ => Vec::new(),
    };

    let mut datasets = vec![Dataset::default()
        .name("commits")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(Color::Green))
        .data(&points)];
    if !outline.is_empty() {
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Cyan))
                .data(&outline),
        );
    }
    if !picked.is_empty() {
        datasets.push(
            Dataset::default()
                .name("selected")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                .data(&picked),
        );
    }
    datasets.push(
        Dataset::default()
            .marker(symbols::Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Red))
            .data(&cursor),
    );

    let (start, end) = projection.x.domain();
    let x_labels = vec![
        Span::raw(start.format("%Y-%m-%d").to_string()),
        Span::raw(projection.x.invert((plot.left() + plot.right()) / 2.0).format("%Y-%m-%d").to_string()),
        Span::raw(end.format("%Y-%m-%d").to_string()),
    ];
    let y_labels = [0, 6, 12, 18, 24].iter().map(|&h| Span::raw(hour_label(h))).collect();

    let title = format!("Commits ({} shown, slider {}%)", visible.len(), view.slider);
    let chart = Chart::new(datasets)
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(Color::Gray))
                .bounds([plot.left(), plot.right()])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Hour")
                .style(Style::default().fg(Color::Gray))
                .bounds([plot.height - plot.bottom(), plot.height - plot.top()])
                .labels(y_labels),
        );
    f.render_widget(chart, chunks[0]);

    let tooltip = match view.hovered(history, HOVER_RADIUS) {
        Some(c) => Line::from(vec![
            Span::styled("Commit ", Style::default().fg(Color::Gray)),
            Span::styled(
                c.url.clone().unwrap_or_else(|| c.short_id()),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled("  Date ", Style::default().fg(Color::Gray)),
            Span::raw(c.datetime.format("%Y-%m-%d %H:%M %:z").to_string()),
            Span::styled("  Author ", Style::default().fg(Color::Gray)),
            Span::raw(c.author.clone()),
            Span::styled("  # Lines ", Style::default().fg(Color::Gray)),
            Span::styled(c.total_lines.to_string(), Style::default().fg(Color::Cyan)),
        ]),
        None if !selected.is_empty() => Line::from(format!("{} commits selected", selected.len())),
        None => Line::from(Span::styled(
            "Move the cursor onto a commit for details",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(
        Paragraph::new(tooltip).block(Block::default().title("Tooltip").borders(Borders::ALL)),
        chunks[1],
    );
}
