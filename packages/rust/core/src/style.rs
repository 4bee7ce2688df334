//! UI-agnostic style attributes carried on renderable rows.
//!
//! Core rows name a [`Tint`] rather than a terminal color so this crate
//! stays free of UI dependencies; the TUI maps tints to `ratatui` colors.

/// Named color attached to an icon glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Magenta,
    Blue,
    Green,
    Cyan,
    Yellow,
    Red,
    Gray,
}
