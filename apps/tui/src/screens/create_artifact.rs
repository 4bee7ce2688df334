//! "New Artifact" screen — guided creation wizard.
//!
//! Parent id and title fields; the kind of the new artifact is derived
//! from the parent id shape and shown live. Ctrl-Enter creates the
//! artifact through the in-memory workspace.

use chrono::Utc;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use cairn_core::workspace::Workspace;
use cairn_shared::{ArtifactId, ArtifactKind};

/// Which input field is focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Parent,
    Title,
}

pub(crate) struct CreateArtifactScreen {
    parent: String,
    title: String,
    focused: Field,
    editing: bool,
    status: String,
}

impl CreateArtifactScreen {
    pub(crate) fn new() -> Self {
        Self {
            parent: String::new(),
            title: String::new(),
            focused: Field::Parent,
            editing: false,
            status: "Fill in the fields and press Ctrl-Enter to create.".to_string(),
        }
    }

    pub(crate) fn is_editing(&self) -> bool {
        self.editing
    }

    /// Kind the new artifact would get, derived from the parent field.
    fn derived_kind(&self) -> Option<ArtifactKind> {
        if self.parent.trim().is_empty() {
            return Some(ArtifactKind::Initiative);
        }
        let parent: ArtifactId = self.parent.trim().parse().ok()?;
        Some(parent.child(1).kind())
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Parent id
                Constraint::Length(3), // Title
                Constraint::Length(3), // Derived kind
                Constraint::Length(3), // Action hint
                Constraint::Min(1),    // Status
            ])
            .split(area);

        // Parent field
        let parent_style = if self.focused == Field::Parent && self.editing {
            Style::default().fg(Color::Yellow)
        } else if self.focused == Field::Parent {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let parent_block = Block::default()
            .borders(Borders::ALL)
            .title(" Parent id (blank for a new initiative) ")
            .border_style(parent_style);
        let parent_text = Paragraph::new(self.parent.as_str()).block(parent_block);
        f.render_widget(parent_text, chunks[0]);

        // Title field
        let title_style = if self.focused == Field::Title && self.editing {
            Style::default().fg(Color::Yellow)
        } else if self.focused == Field::Title {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let title_block = Block::default()
            .borders(Borders::ALL)
            .title(" Title ")
            .border_style(title_style);
        let title_text = Paragraph::new(self.title.as_str()).block(title_block);
        f.render_widget(title_text, chunks[1]);

        // Derived kind
        let kind_line = match self.derived_kind() {
            Some(kind) if self.parent.trim().is_empty() => {
                format!("Will create: top-level {kind}")
            }
            Some(kind) => format!("Will create: {kind} under {}", self.parent.trim()),
            None => "Parent id is malformed.".to_string(),
        };
        let kind_block = Block::default().borders(Borders::ALL).title(" Kind ");
        let kind_text = Paragraph::new(kind_line).block(kind_block);
        f.render_widget(kind_text, chunks[2]);

        // Action hint
        let hint = if self.editing {
            "Type to edit · Esc to stop editing · Tab to next field"
        } else {
            "Enter to edit · Tab to next field · Ctrl-Enter to create"
        };
        let hint_p = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(hint_p, chunks[3]);

        // Status area
        let status_block = Block::default().borders(Borders::ALL).title(" Status ");
        let status_text = Paragraph::new(self.status.as_str()).block(status_block);
        f.render_widget(status_text, chunks[4]);
    }

    /// Handle a key. Returns `true` when an artifact was created and
    /// the other screens should refresh.
    pub(crate) fn handle_key(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        workspace: &mut Workspace,
        actor: &str,
    ) -> bool {
        if code == KeyCode::Enter && modifiers.contains(KeyModifiers::CONTROL) {
            return self.submit(workspace, actor);
        }

        if self.editing {
            match code {
                KeyCode::Esc => {
                    self.editing = false;
                }
                KeyCode::Tab => {
                    self.editing = false;
                    self.next_field();
                }
                KeyCode::Backspace => {
                    self.current_field_mut().pop();
                }
                KeyCode::Char(c) => {
                    self.current_field_mut().push(c);
                }
                _ => {}
            }
        } else {
            match code {
                KeyCode::Enter => self.editing = true,
                KeyCode::Tab | KeyCode::Down => self.next_field(),
                KeyCode::BackTab | KeyCode::Up => self.next_field(),
                _ => {}
            }
        }
        false
    }

    fn submit(&mut self, workspace: &mut Workspace, actor: &str) -> bool {
        let parent = match self.parent.trim() {
            "" => None,
            raw => match raw.parse::<ArtifactId>() {
                Ok(id) => Some(id),
                Err(e) => {
                    self.status = e.to_string();
                    return false;
                }
            },
        };

        match workspace.create_artifact(parent.as_ref(), &self.title, actor, Utc::now()) {
            Ok(id) => {
                self.status = format!("Created {} {id} — {}", id.kind(), self.title.trim());
                self.title.clear();
                self.editing = false;
                true
            }
            Err(e) => {
                self.status = e.to_string();
                false
            }
        }
    }

    fn current_field_mut(&mut self) -> &mut String {
        match self.focused {
            Field::Parent => &mut self.parent,
            Field::Title => &mut self.title,
        }
    }

    fn next_field(&mut self) {
        self.focused = match self.focused {
            Field::Parent => Field::Title,
            Field::Title => Field::Parent,
        };
    }
}
