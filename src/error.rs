use thiserror::Error;

/// Precondition violations raised by the evaluator and the game session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("expected {expected} letters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("the game is already complete")]
    GameAlreadyComplete,
    #[error("'{0}' is not a letter")]
    InvalidLetter(char),
    #[error("at least one attempt is required")]
    NoAttempts,
}
