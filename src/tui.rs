//! TUI (Terminal User Interface) module for the Wordle game
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: owns the terminal, turns key events into `UserAction`s and
//!   draws whatever `GameSession` it is handed
//! - `render_static`: pure layout/rendering of one frame, usable with any backend
//!
//! # State Machine
//! - `Playing` → `GameOver` once the session completes; any key then leaves

use crate::cli::KEYBOARD_ROWS;
use crate::error::GameError;
use crate::evaluator::Feedback;
use crate::game_state::{GameInterface, UserAction, outcome_message, welcome_message};
use crate::session::{Command, GameSession};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, PartialEq, Debug)]
enum CellState {
    Empty,
    Entered,
    Marked(Feedback),
}

impl CellState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Empty | Self::Entered => (Color::DarkGray, Color::White),
            Self::Marked(Feedback::Hit) => (Color::Green, Color::Black),
            Self::Marked(Feedback::Present) => (Color::Yellow, Color::Black),
            Self::Marked(Feedback::Miss) => (Color::Gray, Color::White),
        }
    }
}

fn key_style(hint: Option<Feedback>) -> Style {
    match hint {
        Some(Feedback::Hit) => Style::new().fg(Color::Black).bg(Color::Green),
        Some(Feedback::Present) => Style::new().fg(Color::Black).bg(Color::Yellow),
        // Disabled: the letter is not in the word
        Some(Feedback::Miss) => Style::new().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        None => Style::new().fg(Color::White).bg(Color::DarkGray),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TuiState {
    Playing,
    GameOver,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
pub struct RenderContext<'a> {
    pub session: &'a GameSession,
    pub message: &'a str,
    pub error_message: &'a str,
    pub status: &'a str,
    pub player: Option<&'a str>,
    pub game_over: bool,
}

/// Render the complete UI layout using the provided context.
pub fn render_static(f: &mut Frame, ctx: &RenderContext) {
    #[allow(clippy::cast_possible_truncation)]
    let board_height = ctx.session.config().max_attempts as u16 * ROW_SPACING + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Title
            Constraint::Length(board_height), // Guess grid
            Constraint::Length(5),            // Keyboard
            Constraint::Min(3),               // Messages
            Constraint::Length(3),            // Status line
            Constraint::Length(3),            // Instructions
        ])
        .split(f.area());

    render_title(f, chunks[0], ctx.player);
    render_board(f, chunks[1], ctx.session);
    render_keyboard(f, chunks[2], ctx.session);
    render_info(f, chunks[3], ctx.message, ctx.error_message, ctx.game_over);
    render_status(f, chunks[4], ctx.status);
    render_instructions(f, chunks[5], ctx.game_over);
}

fn render_title(f: &mut Frame, area: Rect, player: Option<&str>) {
    let text = match player.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("WORDLE - {name}"),
        None => "WORDLE".to_string(),
    };
    let title = Paragraph::new(text)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_board(f: &mut Frame, area: Rect, session: &GameSession) {
    let config = session.config();
    let block = Block::default()
        .title(format!("Guesses ({}/{})", session.attempts(), config.max_attempts))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    for row in 0..config.max_attempts {
        let cells: Vec<(char, CellState)> = if let Some(record) = session.history().get(row) {
            record
                .word
                .chars()
                .zip(record.feedback.iter().map(|m| CellState::Marked(*m)))
                .collect()
        } else if row == session.attempts() && !session.is_complete() {
            let mut typed = session.current_guess().chars();
            (0..config.word_length)
                .map(|_| typed.next().map_or((' ', CellState::Empty), |c| (c, CellState::Entered)))
                .collect()
        } else {
            vec![(' ', CellState::Empty); config.word_length]
        };
        render_guess_row(f, inner, row, &cells);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn render_guess_row(f: &mut Frame, area: Rect, row_index: usize, cells: &[(char, CellState)]) {
    let y = area.y + (row_index as u16 * ROW_SPACING);
    if y >= area.y + area.height {
        return;
    }

    let mut spans = vec![Span::raw("  ")];
    for (letter, state) in cells {
        let (bg_color, fg_color) = state.colors();
        spans.push(Span::styled(
            format!(" {letter} "),
            Style::default().fg(fg_color).bg(bg_color),
        ));
        spans.push(Span::raw(" "));
    }

    render_line(f, area, y, spans);
}

fn render_line(f: &mut Frame, area: Rect, y: u16, spans: Vec<Span>) {
    let line = Line::from(spans);
    let paragraph = Paragraph::new(line);
    f.render_widget(
        paragraph,
        Rect {
            x: area.x,
            y,
            width: area.width,
            height: 1,
        },
    );
}

fn render_keyboard(f: &mut Frame, area: Rect, session: &GameSession) {
    let hints = session.hints();
    let lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .enumerate()
        .map(|(indent, row)| {
            let mut spans = vec![Span::raw(" ".repeat(indent + 1))];
            for c in row.chars() {
                spans.push(Span::styled(format!(" {c} "), key_style(hints.get(c))));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        })
        .collect();

    let paragraph =
        Paragraph::new(lines).block(Block::default().title("Keyboard").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_info(f: &mut Frame, area: Rect, message: &str, error_message: &str, game_over: bool) {
    let mut lines = Vec::new();

    if !message.is_empty() {
        let style = if game_over { SUCCESS_STYLE } else { MESSAGE_STYLE };
        lines.push(Line::from(vec![Span::styled(message, style)]));
    }

    if !error_message.is_empty() {
        lines.push(Line::from(vec![Span::styled(error_message, ERROR_STYLE)]));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Information").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, game_over: bool) {
    let text = if game_over {
        "Press any key to quit"
    } else {
        "Type letters | BACKSPACE: Delete | ENTER: Submit | ESC: Quit"
    };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, area: Rect, status: &str) {
    let status_text = if status.is_empty() { "Ready" } else { status };
    let paragraph = Paragraph::new(status_text)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}

fn has_modifier_keys(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Map a key press during play to a game action.
///
/// Non-letter characters are passed through so the session can reject them.
#[must_use]
pub fn key_to_action(key: KeyEvent) -> Option<UserAction> {
    match key.code {
        KeyCode::Esc => Some(UserAction::Exit),
        KeyCode::Enter => Some(UserAction::Command(Command::Submit)),
        KeyCode::Backspace => Some(UserAction::Command(Command::Delete)),
        KeyCode::Char(_) if has_modifier_keys(&key) => {
            debug_log!("key_to_action() - Ignoring character with modifier: {:?}", key.modifiers);
            None
        }
        // Replacement and control characters show up from escape sequences when alt-tabbing
        KeyCode::Char(c) if c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD => {
            debug_log!("key_to_action() - Ignoring invalid character: {:?}", c);
            None
        }
        KeyCode::Char(c) => Some(UserAction::Command(Command::PressLetter(c))),
        _ => None,
    }
}

/// Main TUI interface component.
///
/// Manages terminal rendering and input handling; all game state lives in the
/// `GameSession` passed to each call.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    state: TuiState,
    message: String,
    error_message: String,
    status: String,
    player: Option<String>,
}

impl TuiInterface {
    pub fn new(player: Option<String>) -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            state: TuiState::Playing,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
            player,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self, session: &GameSession) -> Result<(), io::Error> {
        let ctx = RenderContext {
            session,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
            player: self.player.as_deref(),
            game_over: self.state == TuiState::GameOver,
        };

        self.terminal.draw(|f| render_static(f, &ctx))?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self, session: &GameSession) {
        if let Err(e) = self.draw(session) {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Wait up to one poll interval for a key press.
    fn next_key_press() -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }
        match event::read()? {
            // Only process Press events, ignore Release and Repeat to avoid double input
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            other => {
                debug_log!("next_key_press() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_welcome(&mut self, session: &GameSession) {
        self.message = welcome_message(session, self.player.as_deref());
    }

    fn render(&mut self, session: &GameSession) {
        self.status = format!(
            "Attempt {} of {} - {} letters",
            (session.attempts() + 1).min(session.config().max_attempts),
            session.config().max_attempts,
            session.config().word_length
        );
        self.draw_or_log(session);
    }

    fn read_action(&mut self, _session: &GameSession) -> Option<UserAction> {
        match Self::next_key_press() {
            Ok(Some(key)) => {
                let action = key_to_action(key);
                if action.is_some() {
                    self.error_message.clear();
                }
                action
            }
            Ok(None) => None,
            Err(e) => {
                info_log!("read_action() - Error handling input, returning Exit: {}", e);
                Some(UserAction::Exit)
            }
        }
    }

    fn display_error(&mut self, error: &GameError) {
        self.error_message = match error {
            GameError::InvalidLength { expected, .. } => {
                format!("Guess must be exactly {expected} letters!")
            }
            GameError::InvalidLetter(c) => format!("Only letters are allowed! ('{c}' is not a letter)"),
            GameError::GameAlreadyComplete => "The game is over.".to_string(),
            GameError::NoAttempts => "At least one attempt is required.".to_string(),
        };
    }

    fn display_outcome(&mut self, session: &GameSession, elapsed: Duration) {
        self.state = TuiState::GameOver;
        self.message = outcome_message(session, elapsed, self.player.as_deref());
        self.error_message.clear();
        self.status = format!("Game Over - {:?}", session.status());
        self.draw_or_log(session);

        // Keep the final board on screen until the player is done with it
        loop {
            match Self::next_key_press() {
                Ok(Some(_)) | Err(_) => break,
                Ok(None) => {}
            }
        }
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
