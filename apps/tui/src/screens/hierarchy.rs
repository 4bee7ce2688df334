//! "Hierarchy" screen — the artifact tree view.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use cairn_core::hierarchy::{TreeRow, build_tree};
use cairn_core::workspace::Workspace;

use crate::widgets::tint_color;

pub(crate) struct HierarchyScreen {
    /// Rendered tree rows from the last refresh.
    rows: Vec<TreeRow>,
    header: &'static str,
    selected: usize,
    status: String,
}

impl HierarchyScreen {
    pub(crate) fn new() -> Self {
        Self {
            rows: Vec::new(),
            header: "",
            selected: 0,
            status: "Press 'r' to reload the workspace.".to_string(),
        }
    }

    /// Rebuild the tree from the current workspace snapshot.
    pub(crate) fn refresh(&mut self, workspace: &Workspace) {
        match build_tree(workspace.artifacts()) {
            Some(tree) => {
                self.header = tree.header;
                self.rows = tree.rows;
            }
            None => {
                self.header = "";
                self.rows.clear();
            }
        }
        if self.selected >= self.rows.len() {
            self.selected = 0;
        }
        self.status = format!("{} artifact(s) in view.", self.rows.len());
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(1),    // Tree
                Constraint::Length(3), // Status
            ])
            .split(area);

        if self.rows.is_empty() {
            let empty = Paragraph::new(
                "No artifacts to show.\n\nUse the 'New Artifact' tab to create one, \
                 or press 'r' to reload the workspace.",
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Artifacts "));
            f.render_widget(empty, chunks[0]);
        } else {
            let items: Vec<ListItem> = self
                .rows
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    let mut style = Style::default().fg(tint_color(row.tint));
                    if i == self.selected {
                        style = style.add_modifier(Modifier::BOLD);
                    }
                    let marker = if i == self.selected { "▸ " } else { "  " };
                    ListItem::new(format!("{marker}{}", row.to_text())).style(style)
                })
                .collect();

            let list = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ({}) ", self.header, self.rows.len())),
            );
            f.render_widget(list, chunks[0]);
        }

        let status = Paragraph::new(self.status.as_str())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(status, chunks[1]);
    }

    /// Handle a key. Returns `true` when the caller should reload the
    /// workspace snapshot from disk.
    pub(crate) fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.rows.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('r') => {
                self.status = "Reloading workspace...".to_string();
                return true;
            }
            _ => {}
        }
        false
    }
}
