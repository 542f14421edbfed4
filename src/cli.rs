use crate::error::GameError;
use crate::evaluator::Feedback;
use crate::game_state::{GameInterface, UserAction, outcome_message, welcome_message};
use crate::session::{DEFAULT_MAX_ATTEMPTS, GameSession, GuessRecord, KeyboardHints};
use crate::wordbank::todays_secret;
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;

/// Wordle game CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Secret word to play against (defaults to today's word)
    #[arg(short = 's', long = "secret")]
    pub secret: Option<String>,

    /// Number of guesses allowed
    #[arg(short = 'm', long = "max-attempts", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Player name used in the greeting and the final message
    #[arg(short = 'n', long = "name")]
    pub name: Option<String>,

    /// Use the line-based interface instead of the full-screen one
    #[arg(long = "plain")]
    pub plain: bool,

    /// Where to write the log file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

impl Cli {
    /// The secret given on the command line, or today's word.
    #[must_use]
    pub fn secret(&self) -> &str {
        match self.secret.as_deref() {
            Some(secret) => secret,
            None => todays_secret(),
        }
    }
}

pub const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

/// `C R A N E  ⬛🟨🟩⬛🟩`
#[must_use]
pub fn format_row(record: &GuessRecord) -> String {
    let letters: Vec<String> = record.word.chars().map(|c| c.to_string()).collect();
    let marks: String = record.feedback.iter().map(|f| f.symbol()).collect();
    format!("{}  {}", letters.join(" "), marks)
}

/// Keyboard rows with each known letter tagged by its hint code, e.g. `Q W E(G) R(Y)`.
/// Letters known to be absent are shown as `·`.
#[must_use]
pub fn format_hints(hints: &KeyboardHints) -> Vec<String> {
    KEYBOARD_ROWS
        .iter()
        .map(|row| {
            row.chars()
                .map(|c| match hints.get(c) {
                    Some(Feedback::Miss) => "·".to_string(),
                    Some(mark) => format!("{c}({})", mark.to_char()),
                    None => c.to_string(),
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

pub fn display_board(session: &GameSession) {
    println!();
    for record in session.history() {
        println!("{}", format_row(record));
    }
    if !session.hints().is_empty() {
        for line in format_hints(session.hints()) {
            println!("  {line}");
        }
    }
}

#[must_use]
pub fn error_message(error: &GameError) -> String {
    match error {
        GameError::InvalidLength { .. } | GameError::InvalidLetter(_) => {
            format!("Invalid guess: {error}.")
        }
        GameError::GameAlreadyComplete | GameError::NoAttempts => {
            let mut text = error.to_string();
            if let Some(first) = text.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            format!("{text}.")
        }
    }
}

pub fn display_error(error: &GameError) {
    println!("{}", error_message(error));
}

pub fn display_exit_message() {
    println!("Exiting.");
}

/// Read one line and turn it into an action. End of input counts as exit.
pub fn read_guess<R: BufRead>(reader: &mut R, session: &GameSession) -> UserAction {
    println!(
        "\nEnter your guess ({} letters, {} attempts left, or 'exit' to quit):",
        session.config().word_length,
        session.remaining_attempts()
    );
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => UserAction::Exit,
        Ok(_) => {
            let input = input.trim().to_uppercase();
            if input == "EXIT" {
                UserAction::Exit
            } else {
                UserAction::Guess(input)
            }
        }
    }
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and reads one whole guess per line
pub struct CliInterface<R: BufRead> {
    reader: R,
    player: Option<String>,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            player: None,
        }
    }

    #[must_use]
    pub fn with_player(mut self, player: Option<String>) -> Self {
        self.player = player;
        self
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_welcome(&mut self, session: &GameSession) {
        println!("{}", welcome_message(session, self.player.as_deref()));
    }

    fn render(&mut self, session: &GameSession) {
        display_board(session);
    }

    fn read_action(&mut self, session: &GameSession) -> Option<UserAction> {
        Some(read_guess(&mut self.reader, session))
    }

    fn display_error(&mut self, error: &GameError) {
        display_error(error);
    }

    fn display_outcome(&mut self, session: &GameSession, elapsed: Duration) {
        println!("{}", outcome_message(session, elapsed, self.player.as_deref()));
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}
