//! Reusable TUI widgets and style mapping.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use cairn_core::style::Tint;

/// Bottom status bar.
pub(crate) fn status_bar(msg: &str) -> Paragraph<'_> {
    Paragraph::new(format!(" {msg}")).style(
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::White),
    )
}

/// Map a core tint to a terminal color.
pub(crate) fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Magenta => Color::Magenta,
        Tint::Blue => Color::Blue,
        Tint::Green => Color::Green,
        Tint::Cyan => Color::Cyan,
        Tint::Yellow => Color::Yellow,
        Tint::Red => Color::Red,
        Tint::Gray => Color::DarkGray,
    }
}
