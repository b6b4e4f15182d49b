use ratatui::style::Color;

/// Bar color per language tag; unknown tags are grey.
pub fn language_color(kind: &str) -> Color {
    match kind {
        "html" => Color::Rgb(0xe3, 0x4c, 0x26),
        "css" => Color::Rgb(0x56, 0x3d, 0x7c),
        "js" => Color::Rgb(0xf1, 0xe0, 0x5a),
        "md" => Color::Rgb(0x08, 0x3f, 0xa1),
        "json" => Color::Rgb(0x29, 0x29, 0x29),
        _ => Color::Rgb(0x99, 0x99, 0x99),
    }
}

/// Format an hour-of-day axis tick as `HH:00`.
pub fn hour_label(hour: u32) -> String {
    format!("{:02}:00", hour % 24)
}
