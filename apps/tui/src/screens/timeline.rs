//! "Timeline" screen — recent lifecycle events.

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use cairn_core::timeline::{TimelineRow, format_timeline};
use cairn_core::workspace::Workspace;
use cairn_shared::Result;

use crate::widgets::tint_color;

pub(crate) struct TimelineScreen {
    /// Formatted rows from the last refresh.
    rows: Vec<TimelineRow>,
    /// Reference instant captured at refresh time.
    as_of: DateTime<Utc>,
    max_events: usize,
    status: String,
}

impl TimelineScreen {
    pub(crate) fn new(max_events: usize) -> Self {
        Self {
            rows: Vec::new(),
            as_of: Utc::now(),
            max_events,
            status: "Press 'r' to reload the workspace.".to_string(),
        }
    }

    /// Reformat the timeline from the current workspace snapshot.
    ///
    /// The reference instant is captured once per refresh, not per
    /// frame, so the rendering stays stable between reloads.
    pub(crate) fn refresh(&mut self, workspace: &Workspace) -> Result<()> {
        self.as_of = Utc::now();
        self.rows = format_timeline(workspace.events(), self.max_events, self.as_of)?;
        self.status = format!(
            "Showing up to {} of {} event(s).",
            self.max_events,
            workspace.events().len()
        );
        Ok(())
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(1),    // Timeline
                Constraint::Length(3), // Status
            ])
            .split(area);

        let items: Vec<ListItem> = self
            .rows
            .iter()
            .map(|row| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{} ", row.icon),
                        Style::default().fg(tint_color(row.tint)),
                    ),
                    Span::styled(
                        row.label.clone(),
                        Style::default().fg(tint_color(row.tint)),
                    ),
                    Span::raw(format!(" {} ", row.rel_time)),
                    Span::styled(row.actor.clone(), Style::default().fg(Color::White)),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Recent Events "),
        );
        f.render_widget(list, chunks[0]);

        let status = Paragraph::new(self.status.as_str())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(status, chunks[1]);
    }

    /// Handle a key. Returns `true` when the caller should reload the
    /// workspace snapshot from disk.
    pub(crate) fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('r') => {
                self.status = "Reloading workspace...".to_string();
                true
            }
            _ => false,
        }
    }
}
