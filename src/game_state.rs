use crate::error::GameError;
use crate::session::{Command, CommandOutcome, GameSession, GameStatus};
use crate::{debug_log, info_log};
use std::time::{Duration, Instant};

/// Input produced by a front-end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAction {
    /// One keystroke-level command (TUI)
    Command(Command),
    /// A whole word typed at once (line-oriented CLI)
    Guess(String),
    Exit,
}

/// Presentation seam: everything the game loop needs from a front-end.
///
/// Implementations read the session passed in and keep no game state of their own.
pub trait GameInterface {
    /// Called once before the first render.
    fn display_welcome(&mut self, session: &GameSession);
    fn render(&mut self, session: &GameSession);
    /// `None` means no action yet; the loop re-renders and asks again.
    fn read_action(&mut self, session: &GameSession) -> Option<UserAction>;
    fn display_error(&mut self, error: &GameError);
    fn display_outcome(&mut self, session: &GameSession, elapsed: Duration);
    fn display_exit_message(&mut self);
}

/// Blank names count as no name.
fn player_name(player: Option<&str>) -> Option<&str> {
    player.map(str::trim).filter(|name| !name.is_empty())
}

/// Greeting shown before the first guess.
#[must_use]
pub fn welcome_message(session: &GameSession, player: Option<&str>) -> String {
    let greeting = match player_name(player) {
        Some(name) => format!("Welcome, {name}!"),
        None => "Welcome!".to_string(),
    };
    format!(
        "{} Guess the {}-letter word in {} attempts.",
        greeting,
        session.config().word_length,
        session.config().max_attempts
    )
}

/// Outcome text shown when a game ends, addressed to the player if named.
#[must_use]
pub fn outcome_message(session: &GameSession, elapsed: Duration, player: Option<&str>) -> String {
    let player = player_name(player);
    match session.status() {
        GameStatus::Won => {
            let attempts = session.attempts();
            let plural = if attempts == 1 { "" } else { "s" };
            let greeting = match player {
                Some(name) => format!("Congratulations, {name}!"),
                None => "Congratulations!".to_string(),
            };
            format!(
                "{} You guessed '{}' in {} attempt{} and it took {:.2} seconds!",
                greeting,
                session.secret(),
                attempts,
                plural,
                elapsed.as_secs_f64()
            )
        }
        GameStatus::Lost => {
            let apology = match player {
                Some(name) => format!("Sorry, {name}. You've"),
                None => "Sorry, you've".to_string(),
            };
            format!(
                "{} used all your attempts. The word was '{}'.",
                apology,
                session.secret()
            )
        }
        GameStatus::InProgress => String::new(),
    }
}

/// Drive `session` with input from `interface` until the game ends or the
/// player quits. Returns the final status, or `None` on an early exit.
pub fn game_loop<I: GameInterface>(session: &mut GameSession, interface: &mut I) -> Option<GameStatus> {
    interface.display_welcome(session);
    let started = Instant::now();

    while !session.is_complete() {
        interface.render(session);

        let Some(action) = interface.read_action(session) else {
            continue;
        };
        debug_log!("game_loop() - action: {:?}", action);

        let result = match action {
            UserAction::Exit => {
                info_log!("Player exited after {} attempts", session.attempts());
                interface.display_exit_message();
                return None;
            }
            UserAction::Command(command) => session.apply(command),
            UserAction::Guess(guess) => session
                .submit(&guess)
                .map(|(feedback, status)| CommandOutcome::Submitted { feedback, status }),
        };

        if let Err(e) = result {
            debug_log!("game_loop() - rejected: {}", e);
            interface.display_error(&e);
        }
    }

    interface.render(session);
    interface.display_outcome(session, started.elapsed());
    Some(session.status())
}
