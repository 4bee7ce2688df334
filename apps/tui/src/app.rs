//! Core TUI application state and event loop.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

use cairn_core::workspace::Workspace;
use cairn_shared::{AppConfig, WorkspaceData};

use crate::screens::ScreenId;
use crate::screens::create_artifact::CreateArtifactScreen;
use crate::screens::hierarchy::HierarchyScreen;
use crate::screens::timeline::TimelineScreen;
use crate::widgets::status_bar;

/// Application state.
pub(crate) struct App {
    /// Currently active screen tab.
    pub active_tab: usize,
    /// Available screens.
    pub screens: Vec<ScreenId>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Status message shown in bottom bar.
    pub status: String,
    /// Whether help overlay is visible.
    pub show_help: bool,
    /// Error overlay text, if any.
    pub error: Option<String>,

    hierarchy: HierarchyScreen,
    timeline: TimelineScreen,
    create: CreateArtifactScreen,

    /// In-memory workspace snapshot.
    workspace: Workspace,
    /// Snapshot file the workspace was loaded from.
    workspace_path: PathBuf,
    /// Actor recorded on artifacts created from this session.
    actor: String,
}

impl App {
    fn new(workspace_path: PathBuf, config: &AppConfig) -> Self {
        let mut app = Self {
            active_tab: 0,
            screens: vec![ScreenId::Hierarchy, ScreenId::Timeline, ScreenId::NewArtifact],
            should_quit: false,
            status: "Ready — press ? for help".to_string(),
            show_help: false,
            error: None,
            hierarchy: HierarchyScreen::new(),
            timeline: TimelineScreen::new(config.defaults.max_events.max(1)),
            create: CreateArtifactScreen::new(),
            workspace: Workspace::default(),
            workspace_path,
            actor: config.defaults.actor.clone(),
        };
        app.reload_workspace();
        app
    }

    /// Reload the snapshot from disk and refresh every screen.
    fn reload_workspace(&mut self) {
        match load_snapshot(&self.workspace_path) {
            Ok(data) => {
                self.workspace = Workspace::new(data);
                self.refresh_screens();
            }
            Err(message) => self.error = Some(message),
        }
    }

    /// Refresh screens from the current in-memory workspace.
    fn refresh_screens(&mut self) {
        self.hierarchy.refresh(&self.workspace);
        if let Err(e) = self.timeline.refresh(&self.workspace) {
            self.error = Some(e.to_string());
        }
    }

    fn is_editing(&self) -> bool {
        self.screens[self.active_tab] == ScreenId::NewArtifact && self.create.is_editing()
    }
}

/// Read and parse a workspace snapshot. A missing file is an empty
/// workspace, not an error.
fn load_snapshot(path: &Path) -> Result<WorkspaceData, String> {
    if !path.exists() {
        tracing::debug!(?path, "workspace file not found, starting empty");
        return Ok(WorkspaceData::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {e}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| format!("cannot parse '{}': {e}", path.display()))
}

/// Entry point — sets up terminal, runs event loop, restores terminal.
pub(crate) fn run(workspace_path: PathBuf, config: AppConfig) -> Result<()> {
    // Setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, workspace_path, &config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    workspace_path: PathBuf,
    config: &AppConfig,
) -> Result<()> {
    let mut app = App::new(workspace_path, config);

    loop {
        terminal.draw(|f| draw(f, &app))?;

        // Poll for events with 100ms timeout for responsive UI
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handle_key(&mut app, key.code, key.modifiers);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    // Global keybindings (always active)
    match code {
        KeyCode::Char('q') | KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') if !app.is_editing() => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') if !app.is_editing() => {
            app.show_help = !app.show_help;
            return;
        }
        KeyCode::Esc if app.show_help => {
            app.show_help = false;
            return;
        }
        KeyCode::Esc if app.error.is_some() => {
            app.error = None;
            return;
        }
        // Tab navigation with number keys
        KeyCode::Char(c @ '1'..='3') if !app.is_editing() => {
            let idx = (c as usize) - ('1' as usize);
            if idx < app.screens.len() {
                app.active_tab = idx;
                app.status = format!("{}", app.screens[idx]);
            }
            return;
        }
        KeyCode::Tab if !app.is_editing() => {
            app.active_tab = (app.active_tab + 1) % app.screens.len();
            app.status = format!("{}", app.screens[app.active_tab]);
            return;
        }
        KeyCode::BackTab if !app.is_editing() => {
            app.active_tab = if app.active_tab == 0 {
                app.screens.len() - 1
            } else {
                app.active_tab - 1
            };
            app.status = format!("{}", app.screens[app.active_tab]);
            return;
        }
        _ => {}
    }

    // Overlays consume any key to dismiss
    if app.show_help {
        app.show_help = false;
        return;
    }
    if app.error.is_some() {
        app.error = None;
        return;
    }

    // Delegate to current screen
    match app.screens[app.active_tab] {
        ScreenId::Hierarchy => {
            if app.hierarchy.handle_key(code, modifiers) {
                app.reload_workspace();
            }
        }
        ScreenId::Timeline => {
            if app.timeline.handle_key(code, modifiers) {
                app.reload_workspace();
            }
        }
        ScreenId::NewArtifact => {
            let actor = app.actor.clone();
            if app
                .create
                .handle_key(code, modifiers, &mut app.workspace, &actor)
            {
                app.refresh_screens();
            }
        }
    }
}

fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    // Tab bar
    let tab_titles: Vec<Line> = app
        .screens
        .iter()
        .map(|s| Line::from(format!("{s}")))
        .collect();

    let tabs = Tabs::new(tab_titles)
        .block(Block::default().borders(Borders::ALL).title(" cairn "))
        .select(app.active_tab)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" │ ");

    f.render_widget(tabs, chunks[0]);

    // Content area — delegate to screen
    match app.screens[app.active_tab] {
        ScreenId::Hierarchy => app.hierarchy.draw(f, chunks[1]),
        ScreenId::Timeline => app.timeline.draw(f, chunks[1]),
        ScreenId::NewArtifact => app.create.draw(f, chunks[1]),
    }

    // Status bar
    let bar = status_bar(&app.status);
    f.render_widget(bar, chunks[2]);

    // Overlays
    if app.show_help {
        draw_help_overlay(f);
    }
    if let Some(message) = &app.error {
        draw_error_overlay(f, message);
    }
}

fn draw_help_overlay(f: &mut Frame) {
    let area = centered_rect(60, 60, f.area());

    let help_text = vec![
        Line::from(format!("cairn v{}", env!("CARGO_PKG_VERSION")))
            .style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("Keybindings").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("  1-3          Switch to screen"),
        Line::from("  Tab/S-Tab    Next/previous screen"),
        Line::from("  ?            Toggle this help"),
        Line::from("  q / Ctrl-C   Quit"),
        Line::from(""),
        Line::from("Screen-specific:").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("  r            Reload workspace"),
        Line::from("  ↑/↓ or k/j   Navigate the tree"),
        Line::from("  Enter        Edit a wizard field"),
        Line::from("  Ctrl-Enter   Create the artifact"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help — press any key to close ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));

    // Clear background
    f.render_widget(ratatui::widgets::Clear, area);
    f.render_widget(help, area);
}

fn draw_error_overlay(f: &mut Frame, message: &str) {
    let area = centered_rect(60, 30, f.area());

    let error = Paragraph::new(message)
        .wrap(ratatui::widgets::Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Error — press any key to close ")
                .border_style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::Red));

    f.render_widget(ratatui::widgets::Clear, area);
    f.render_widget(error, area);
}

/// Create a centered rectangle with percentage width and height.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
