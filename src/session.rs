//! Game session state machine.
//!
//! A `GameSession` owns one secret word and everything the player has done
//! against it: submitted guesses, their feedback rows, the letters typed so
//! far for the next guess and the aggregated keyboard hints.
//!
//! # State Machine
//! - `InProgress` → `Won` when a guess equals the secret
//! - `InProgress` → `Lost` when the last attempt misses
//! - `Won` and `Lost` are terminal; further input fails with
//!   [`GameError::GameAlreadyComplete`]

use crate::error::GameError;
use crate::evaluator::{Feedback, evaluate, is_solved};
use crate::info_log;
use std::collections::HashMap;

pub const DEFAULT_WORD_LENGTH: usize = 5;
pub const DEFAULT_MAX_ATTEMPTS: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub word_length: usize,
    pub max_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            word_length: DEFAULT_WORD_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// Discrete player input applied to a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    PressLetter(char),
    Delete,
    Submit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The in-progress guess changed
    Updated,
    /// Nothing to do (full buffer or disabled letter on a press, empty buffer on delete)
    Ignored,
    Submitted {
        feedback: Vec<Feedback>,
        status: GameStatus,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuessRecord {
    pub word: String,
    pub feedback: Vec<Feedback>,
}

/// Best status seen for each letter across all guesses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyboardHints {
    letters: HashMap<char, Feedback>,
}

impl KeyboardHints {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one feedback row in. A letter is never downgraded.
    pub fn merge(&mut self, guess: &str, feedback: &[Feedback]) {
        for (letter, mark) in guess.chars().zip(feedback.iter().copied()) {
            self.letters
                .entry(letter)
                .and_modify(|best| *best = (*best).max(mark))
                .or_insert(mark);
        }
    }

    #[must_use]
    pub fn get(&self, letter: char) -> Option<Feedback> {
        self.letters.get(&letter.to_ascii_uppercase()).copied()
    }

    /// Letters known to be absent from the secret.
    #[must_use]
    pub fn is_disabled(&self, letter: char) -> bool {
        self.get(letter) == Some(Feedback::Miss)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, Feedback)> + '_ {
        self.letters.iter().map(|(c, f)| (*c, *f))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct GameSession {
    secret: String,
    config: GameConfig,
    history: Vec<GuessRecord>,
    current_guess: String,
    hints: KeyboardHints,
    status: GameStatus,
}

fn normalize_word(word: &str) -> Result<String, GameError> {
    let word = word.trim().to_ascii_uppercase();
    if let Some(bad) = word.chars().find(|c| !c.is_ascii_alphabetic()) {
        return Err(GameError::InvalidLetter(bad));
    }
    Ok(word)
}

fn check_length(word: &str, expected: usize) -> Result<(), GameError> {
    let actual = word.chars().count();
    if actual == expected {
        Ok(())
    } else {
        Err(GameError::InvalidLength { expected, actual })
    }
}

impl GameSession {
    /// # Errors
    /// Fails if the secret is empty, does not have `config.word_length`
    /// letters or contains a non-letter, and with [`GameError::NoAttempts`]
    /// if `config.max_attempts` is zero.
    pub fn new(secret: &str, config: GameConfig) -> Result<Self, GameError> {
        if config.max_attempts == 0 {
            return Err(GameError::NoAttempts);
        }
        let secret = normalize_word(secret)?;
        if secret.is_empty() {
            return Err(GameError::InvalidLength {
                expected: config.word_length.max(1),
                actual: 0,
            });
        }
        check_length(&secret, config.word_length)?;
        info_log!(
            "New session: {} letters, {} attempts",
            config.word_length,
            config.max_attempts
        );
        Ok(Self {
            secret,
            config,
            history: Vec::with_capacity(config.max_attempts),
            current_guess: String::with_capacity(config.word_length),
            hints: KeyboardHints::new(),
            status: GameStatus::InProgress,
        })
    }

    /// Session with the default attempt limit and a word length taken from
    /// the secret itself.
    ///
    /// # Errors
    /// Fails if the secret is empty or contains a non-letter.
    pub fn with_secret(secret: &str) -> Result<Self, GameError> {
        let word_length = secret.trim().chars().count();
        Self::new(
            secret,
            GameConfig {
                word_length,
                ..GameConfig::default()
            },
        )
    }

    /// Evaluate a complete guess and advance the state machine.
    ///
    /// # Errors
    /// [`GameError::GameAlreadyComplete`] once the game has ended, otherwise
    /// [`GameError::InvalidLength`] or [`GameError::InvalidLetter`] for a
    /// malformed guess. A rejected guess leaves the session untouched.
    pub fn submit(&mut self, guess: &str) -> Result<(Vec<Feedback>, GameStatus), GameError> {
        if self.is_complete() {
            return Err(GameError::GameAlreadyComplete);
        }
        let guess = normalize_word(guess)?;
        check_length(&guess, self.config.word_length)?;

        let feedback = evaluate(&guess, &self.secret)?;
        self.hints.merge(&guess, &feedback);
        self.history.push(GuessRecord {
            word: guess,
            feedback: feedback.clone(),
        });
        self.current_guess.clear();

        self.status = if is_solved(&feedback) {
            GameStatus::Won
        } else if self.history.len() >= self.config.max_attempts {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        };
        info_log!(
            "Attempt {}/{} -> {:?}",
            self.history.len(),
            self.config.max_attempts,
            self.status
        );
        Ok((feedback, self.status))
    }

    /// Apply one player command.
    ///
    /// # Errors
    /// Same conditions as [`GameSession::submit`]; `PressLetter` with a
    /// non-letter yields [`GameError::InvalidLetter`] and `Submit` with a
    /// short buffer yields [`GameError::InvalidLength`]. Pressing a letter
    /// already known to be absent is ignored, like a grayed-out key.
    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome, GameError> {
        if self.is_complete() {
            return Err(GameError::GameAlreadyComplete);
        }
        match command {
            Command::PressLetter(c) => {
                if !c.is_ascii_alphabetic() {
                    return Err(GameError::InvalidLetter(c));
                }
                if self.current_guess.len() >= self.config.word_length
                    || self.hints.is_disabled(c)
                {
                    return Ok(CommandOutcome::Ignored);
                }
                self.current_guess.push(c.to_ascii_uppercase());
                Ok(CommandOutcome::Updated)
            }
            Command::Delete => Ok(if self.current_guess.pop().is_some() {
                CommandOutcome::Updated
            } else {
                CommandOutcome::Ignored
            }),
            Command::Submit => {
                let guess = self.current_guess.clone();
                let (feedback, status) = self.submit(&guess)?;
                Ok(CommandOutcome::Submitted { feedback, status })
            }
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    #[must_use]
    pub fn attempts(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn remaining_attempts(&self) -> usize {
        self.config.max_attempts.saturating_sub(self.history.len())
    }

    #[must_use]
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    #[must_use]
    pub fn current_guess(&self) -> &str {
        &self.current_guess
    }

    #[must_use]
    pub fn hints(&self) -> &KeyboardHints {
        &self.hints
    }

    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Feedback::{Hit, Miss, Present};

    fn amber() -> GameSession {
        GameSession::new("AMBER", GameConfig::default()).unwrap()
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = amber();
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.attempts(), 0);
        assert_eq!(session.remaining_attempts(), 6);
        assert!(session.history().is_empty());
        assert!(session.hints().is_empty());
        assert_eq!(session.current_guess(), "");
    }

    #[test]
    fn test_new_session_normalizes_secret() {
        let session = GameSession::new(" amber ", GameConfig::default()).unwrap();
        assert_eq!(session.secret(), "AMBER");
    }

    #[test]
    fn test_new_session_rejects_bad_secret() {
        assert_eq!(
            GameSession::new("AMBERS", GameConfig::default()).unwrap_err(),
            GameError::InvalidLength {
                expected: 5,
                actual: 6
            }
        );
        assert_eq!(
            GameSession::new("AMB3R", GameConfig::default()).unwrap_err(),
            GameError::InvalidLetter('3')
        );
        assert!(GameSession::with_secret("").is_err());
        assert!(
            GameSession::new(
                "",
                GameConfig {
                    word_length: 0,
                    max_attempts: 6
                }
            )
            .is_err()
        );
    }

    #[test]
    fn test_new_session_rejects_zero_attempts() {
        let config = GameConfig {
            word_length: 5,
            max_attempts: 0,
        };
        assert_eq!(
            GameSession::new("AMBER", config).unwrap_err(),
            GameError::NoAttempts
        );
    }

    #[test]
    fn test_attempts_never_exceed_limit() {
        let config = GameConfig {
            word_length: 5,
            max_attempts: 1,
        };
        let mut session = GameSession::new("AMBER", config).unwrap();
        session.submit("FLUNK").unwrap();
        assert!(session.submit("FLUNK").is_err());
        assert!(session.attempts() <= session.config().max_attempts);
    }

    #[test]
    fn test_with_secret_uses_secret_length() {
        let session = GameSession::with_secret("PLANETS").unwrap();
        assert_eq!(session.config().word_length, 7);
        assert_eq!(session.config().max_attempts, DEFAULT_MAX_ATTEMPTS);
    }

    #[test]
    fn test_win_on_first_guess() {
        let mut session = amber();
        let (feedback, status) = session.submit("amber").unwrap();
        assert_eq!(feedback, vec![Hit; 5]);
        assert_eq!(status, GameStatus::Won);
        assert!(session.is_complete());
        assert_eq!(session.attempts(), 1);
    }

    #[test]
    fn test_win_before_max_attempts() {
        let mut session = amber();
        session.submit("RATES").unwrap();
        session.submit("CRANE").unwrap();
        let (_, status) = session.submit("AMBER").unwrap();
        assert_eq!(status, GameStatus::Won);
        assert_eq!(session.attempts(), 3);
        assert_eq!(session.remaining_attempts(), 3);
    }

    #[test]
    fn test_lost_exactly_at_max_attempts() {
        let mut session = amber();
        for _ in 0..5 {
            let (_, status) = session.submit("FLUNK").unwrap();
            assert_eq!(status, GameStatus::InProgress);
        }
        let (_, status) = session.submit("FLUNK").unwrap();
        assert_eq!(status, GameStatus::Lost);
        assert_eq!(session.attempts(), 6);
        assert_eq!(session.remaining_attempts(), 0);
    }

    #[test]
    fn test_win_on_last_attempt() {
        let mut session = amber();
        for _ in 0..5 {
            session.submit("FLUNK").unwrap();
        }
        let (_, status) = session.submit("AMBER").unwrap();
        assert_eq!(status, GameStatus::Won);
    }

    #[test]
    fn test_submit_after_complete_fails() {
        let mut session = amber();
        session.submit("AMBER").unwrap();
        assert_eq!(
            session.submit("CRANE").unwrap_err(),
            GameError::GameAlreadyComplete
        );
        assert_eq!(
            session.apply(Command::PressLetter('A')).unwrap_err(),
            GameError::GameAlreadyComplete
        );
        assert_eq!(session.attempts(), 1);
    }

    #[test]
    fn test_invalid_guess_leaves_session_untouched() {
        let mut session = amber();
        assert_eq!(
            session.submit("CRAN").unwrap_err(),
            GameError::InvalidLength {
                expected: 5,
                actual: 4
            }
        );
        assert_eq!(
            session.submit("CR4NE").unwrap_err(),
            GameError::InvalidLetter('4')
        );
        assert_eq!(session.attempts(), 0);
        assert!(session.hints().is_empty());
    }

    #[test]
    fn test_history_records_feedback() {
        let mut session = amber();
        session.submit("RATES").unwrap();
        let record = &session.history()[0];
        assert_eq!(record.word, "RATES");
        assert_eq!(record.feedback, vec![Present, Present, Miss, Hit, Miss]);
    }

    #[test]
    fn test_hints_never_downgrade() {
        let mut session = amber();
        // E is a hit at index 3
        session.submit("RATES").unwrap();
        assert_eq!(session.hints().get('E'), Some(Hit));
        // E at index 0 is only present now, and the second E misses
        session.submit("EERIE").unwrap();
        assert_eq!(session.hints().get('E'), Some(Hit));
        assert_eq!(session.hints().get('T'), Some(Miss));
        assert!(session.hints().is_disabled('T'));
        assert!(!session.hints().is_disabled('E'));
    }

    #[test]
    fn test_hints_upgrade_present_to_hit() {
        let mut hints = KeyboardHints::new();
        hints.merge("RATES", &[Present, Present, Miss, Hit, Miss]);
        assert_eq!(hints.get('A'), Some(Present));
        hints.merge("AMBER", &[Hit; 5]);
        assert_eq!(hints.get('a'), Some(Hit));
        assert_eq!(hints.get('Z'), None);
        assert_eq!(hints.len(), 7);
    }

    #[test]
    fn test_hints_duplicate_letter_in_one_guess() {
        let mut hints = KeyboardHints::new();
        // Later Miss for the same letter in the same row must not win
        hints.merge("EERIE", &[Miss, Miss, Present, Miss, Hit]);
        assert_eq!(hints.get('E'), Some(Hit));
    }

    #[test]
    fn test_commands_build_guess() {
        let mut session = amber();
        for c in "crane".chars() {
            assert_eq!(
                session.apply(Command::PressLetter(c)).unwrap(),
                CommandOutcome::Updated
            );
        }
        assert_eq!(session.current_guess(), "CRANE");
        assert_eq!(
            session.apply(Command::PressLetter('X')).unwrap(),
            CommandOutcome::Ignored
        );
        assert_eq!(session.apply(Command::Delete).unwrap(), CommandOutcome::Updated);
        assert_eq!(session.current_guess(), "CRAN");
    }

    #[test]
    fn test_command_disabled_letter_is_ignored() {
        let mut session = amber();
        session.submit("FLUNK").unwrap();
        assert!(session.hints().is_disabled('F'));
        assert_eq!(
            session.apply(Command::PressLetter('f')).unwrap(),
            CommandOutcome::Ignored
        );
        assert_eq!(session.current_guess(), "");
        // Letters still in play are accepted
        assert_eq!(
            session.apply(Command::PressLetter('a')).unwrap(),
            CommandOutcome::Updated
        );
        assert_eq!(session.current_guess(), "A");
    }

    #[test]
    fn test_command_delete_on_empty() {
        let mut session = amber();
        assert_eq!(session.apply(Command::Delete).unwrap(), CommandOutcome::Ignored);
    }

    #[test]
    fn test_command_rejects_non_letter() {
        let mut session = amber();
        assert_eq!(
            session.apply(Command::PressLetter('1')).unwrap_err(),
            GameError::InvalidLetter('1')
        );
        assert_eq!(session.current_guess(), "");
    }

    #[test]
    fn test_command_submit_short_guess_keeps_buffer() {
        let mut session = amber();
        session.apply(Command::PressLetter('A')).unwrap();
        assert_eq!(
            session.apply(Command::Submit).unwrap_err(),
            GameError::InvalidLength {
                expected: 5,
                actual: 1
            }
        );
        assert_eq!(session.current_guess(), "A");
        assert_eq!(session.attempts(), 0);
    }

    #[test]
    fn test_command_submit_clears_buffer() {
        let mut session = amber();
        for c in "AMBER".chars() {
            session.apply(Command::PressLetter(c)).unwrap();
        }
        let outcome = session.apply(Command::Submit).unwrap();
        assert_eq!(
            outcome,
            CommandOutcome::Submitted {
                feedback: vec![Hit; 5],
                status: GameStatus::Won
            }
        );
        assert_eq!(session.current_guess(), "");
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig {
            word_length: 4,
            max_attempts: 2,
        };
        let mut session = GameSession::new("TOOT", config).unwrap();
        session.submit("OTTO").unwrap();
        let (_, status) = session.submit("TOTO").unwrap();
        assert_eq!(status, GameStatus::Lost);
    }
}
