// Library interface for wordle-game
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod evaluator;
pub mod game_state;
pub mod logging;
pub mod session;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::GameError;
pub use evaluator::{Feedback, evaluate, is_solved};
pub use game_state::{GameInterface, UserAction, game_loop};
pub use session::{
    Command, CommandOutcome, GameConfig, GameSession, GameStatus, GuessRecord, KeyboardHints,
};
pub use wordbank::{daily_secret, todays_secret};
