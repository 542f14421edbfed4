use anyhow::{Context, Result};
use std::io;
use wordle_game::cli::{CliInterface, parse_cli};
use wordle_game::logging::{default_log_path, init_logging};
use wordle_game::tui::TuiInterface;
use wordle_game::{GameConfig, GameSession, game_loop};

fn main() -> Result<()> {
    let cli = parse_cli();

    if let Some(path) = cli.log_file.clone().or_else(default_log_path)
        && let Err(e) = init_logging(&path)
    {
        eprintln!("Logging disabled, cannot open '{}': {e}", path.display());
    }

    let secret = cli.secret();
    let config = GameConfig {
        word_length: secret.trim().chars().count(),
        max_attempts: cli.max_attempts,
    };
    let mut session = GameSession::new(secret, config).context("cannot start the game")?;
    log::info!(
        "Starting game: {} letters, {} attempts",
        config.word_length,
        config.max_attempts
    );

    let result = if cli.plain {
        let mut interface = CliInterface::new(io::stdin().lock()).with_player(cli.name.clone());
        game_loop(&mut session, &mut interface)
    } else {
        // Terminal state is restored when the interface is dropped.
        let mut interface = TuiInterface::new(cli.name.clone()).context("failed to initialize terminal")?;
        game_loop(&mut session, &mut interface)
    };

    log::info!("Game finished: {result:?}");
    Ok(())
}
