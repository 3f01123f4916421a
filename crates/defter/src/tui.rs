//! Terminal frontend for the shell, driven by the core's run loop.

use std::fs;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs};

use defter_core::shell::error::ShellError;
use defter_core::shell::{LayoutDirection, Shell, ShellAction, ShellFrontend, ShellState};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct TerminalFrontend {
    theme_dir: PathBuf,
    accent: Color,
    right_to_left: bool,
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
}

impl TerminalFrontend {
    pub fn new(theme_dir: PathBuf) -> Self {
        Self {
            theme_dir,
            accent: Color::Cyan,
            right_to_left: false,
            terminal: None,
        }
    }

    /// Accent color for the configured style, from the bundled theme file.
    /// Unknown styles or a missing theme fall back to the default accent.
    fn accent_for_style(&self, style: &str) -> Color {
        let theme_path = self.theme_dir.join("theme.toml");
        let Ok(raw) = fs::read_to_string(&theme_path) else {
            return Color::Cyan;
        };
        let Ok(table) = raw.parse::<toml::Table>() else {
            log::warn!("unparseable theme file {}", theme_path.display());
            return Color::Cyan;
        };
        table
            .get("styles")
            .and_then(|styles| styles.get(style))
            .and_then(|entry| entry.get("accent"))
            .and_then(|accent| accent.as_str())
            .map(color_by_name)
            .unwrap_or(Color::Cyan)
    }

    fn alignment(&self) -> Alignment {
        if self.right_to_left {
            Alignment::Right
        } else {
            Alignment::Left
        }
    }
}

fn color_by_name(name: &str) -> Color {
    match name {
        "blue" => Color::Blue,
        "green" => Color::Green,
        "magenta" => Color::Magenta,
        "yellow" => Color::Yellow,
        "white" => Color::White,
        _ => Color::Cyan,
    }
}

/// Centered overlay area for the about dialog.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

impl ShellFrontend for TerminalFrontend {
    fn name(&self) -> &str {
        "terminal"
    }

    fn initialize(&mut self, shell: &Shell) -> Result<(), ShellError> {
        self.accent = self.accent_for_style(shell.style());
        self.right_to_left = shell.layout_direction() == LayoutDirection::RightToLeft;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        self.terminal = Some(terminal);
        Ok(())
    }

    fn render(&mut self, shell: &Shell, state: &ShellState) -> Result<(), ShellError> {
        let accent = self.accent;
        let alignment = self.alignment();
        let right_to_left = self.right_to_left;
        let terminal = self
            .terminal
            .as_mut()
            .ok_or_else(|| ShellError::frontend("terminal", "render before initialize"))?;

        terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // title + menu bar
                    Constraint::Length(3), // tabs
                    Constraint::Min(5),    // active module body
                    Constraint::Length(3), // status surface
                ])
                .split(frame.area());

            // Title bar with the menu groups as chrome.
            let menu_line = shell
                .menu()
                .iter()
                .map(|group| group.label)
                .collect::<Vec<_>>()
                .join("   ");
            let header = Paragraph::new(menu_line)
                .alignment(alignment)
                .style(Style::default().fg(accent))
                .block(Block::default().borders(Borders::ALL).title(shell.title().to_string()));
            frame.render_widget(header, chunks[0]);

            // One tab per module, in registry order.
            let tabs = Tabs::new(shell.tab_labels())
                .select(state.active_tab())
                .highlight_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
                .block(Block::default().borders(Borders::ALL).title("Modules"));
            frame.render_widget(tabs, chunks[1]);

            // Body of the active tab comes from the module itself.
            let (body_text, body_title) = match shell.tabs().get(state.active_tab()) {
                Some(active) => (active.module.body_lines().join("\n"), active.label.clone()),
                None => (String::new(), String::new()),
            };
            let body = Paragraph::new(body_text)
                .alignment(alignment)
                .block(Block::default().borders(Borders::ALL).title(body_title));
            frame.render_widget(body, chunks[2]);

            // Status surface plus key hints; RTL mirrors the ordering.
            let hints = "q: quit | Tab/arrows: switch | 1-6: jump | F1: about";
            let status_line = if right_to_left {
                format!("{}  |  {}", hints, state.status_message())
            } else {
                format!("{}  |  {}", state.status_message(), hints)
            };
            let status = Paragraph::new(status_line)
                .alignment(alignment)
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(status, chunks[3]);

            if state.about_visible() {
                let area = centered_rect(frame.area(), 48, 7);
                let about = Paragraph::new(format!("{}\n\nEsc to dismiss", shell.about_text()))
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL).title("About"));
                frame.render_widget(Clear, area);
                frame.render_widget(about, area);
            }
        })?;
        Ok(())
    }

    fn poll_action(&mut self) -> Result<ShellAction, ShellError> {
        if !event::poll(POLL_INTERVAL)? {
            return Ok(ShellAction::None);
        }
        let Event::Key(key) = event::read()? else {
            return Ok(ShellAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ShellAction::None);
        }

        let action = match key.code {
            KeyCode::Char('q') => ShellAction::Close,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                ShellAction::Close
            }
            KeyCode::Esc => ShellAction::DismissDialog,
            KeyCode::F(1) => ShellAction::ShowAbout,
            KeyCode::Tab => ShellAction::NextTab,
            KeyCode::BackTab => ShellAction::PrevTab,
            // Arrow keys follow the layout direction.
            KeyCode::Right if self.right_to_left => ShellAction::PrevTab,
            KeyCode::Right => ShellAction::NextTab,
            KeyCode::Left if self.right_to_left => ShellAction::NextTab,
            KeyCode::Left => ShellAction::PrevTab,
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                ShellAction::SelectTab(c as usize - '1' as usize)
            }
            _ => ShellAction::None,
        };
        Ok(action)
    }

    fn finalize(&mut self) -> Result<(), ShellError> {
        if let Some(mut terminal) = self.terminal.take() {
            disable_raw_mode()?;
            execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
            terminal.show_cursor()?;
        }
        Ok(())
    }
}
