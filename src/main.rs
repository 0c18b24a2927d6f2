//! Goban-rs: a Go rules engine with a random-move bot.
//!
//! ## Usage
//!
//! - `goban-rs` - Watch two random bots play (same as `bot-v-bot`)
//! - `goban-rs human-v-bot` - Play Black against the random bot
//! - `goban-rs gtp` - Start GTP server for GUI integration
//!
//! Log verbosity follows `RUST_LOG` (default `goban_rs=info`); logs go to
//! stderr.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail, ensure};
use clap::{Parser, Subcommand};
use tracing::info;

use goban_rs::agent::{Agent, RandomAgent};
use goban_rs::constants::{
    DEFAULT_BOARD_SIZE, DEFAULT_MAX_MOVES, DEFAULT_MOVE_DELAY_MS, MAX_BOARD_SIZE,
};
use goban_rs::coords::{format_move, parse_move};
use goban_rs::game::GameState;
use goban_rs::gtp::GtpEngine;
use goban_rs::types::Player;

/// Goban-rs: a Go rules engine with a random-move bot
#[derive(Parser)]
#[command(name = "goban-rs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Board size (1 to 19)
    #[arg(long, global = true, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    /// Seed for the bots' random number generators
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Let two random bots play each other
    BotVBot {
        /// Pause between moves in milliseconds
        #[arg(long, default_value_t = DEFAULT_MOVE_DELAY_MS)]
        delay_ms: u64,

        /// Stop after this many moves even if the game is not over
        #[arg(long, default_value_t = DEFAULT_MAX_MOVES)]
        max_moves: usize,
    },
    /// Play Black against the random bot on stdin
    HumanVBot,
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "goban_rs=info".into()),
        )
        .init();

    let cli = Cli::parse();
    ensure!(
        (1..=MAX_BOARD_SIZE).contains(&cli.size),
        "board size must be between 1 and {MAX_BOARD_SIZE}, got {}",
        cli.size
    );

    match cli.command {
        Some(Commands::HumanVBot) => human_v_bot(cli.size, cli.seed),
        Some(Commands::Gtp) => {
            let mut engine = match cli.seed {
                Some(seed) => GtpEngine::with_seed(cli.size, seed),
                None => GtpEngine::new(cli.size),
            };
            engine
                .run(io::stdin().lock(), io::stdout())
                .context("GTP session failed")
        }
        Some(Commands::BotVBot { delay_ms, max_moves }) => {
            bot_v_bot(cli.size, cli.seed, delay_ms, max_moves)
        }
        None => bot_v_bot(cli.size, cli.seed, DEFAULT_MOVE_DELAY_MS, DEFAULT_MAX_MOVES),
    }
}

fn make_agent(seed: Option<u64>) -> RandomAgent {
    seed.map_or_else(RandomAgent::new, RandomAgent::with_seed)
}

fn bot_v_bot(size: usize, seed: Option<u64>, delay_ms: u64, max_moves: usize) -> Result<()> {
    let mut bots = [make_agent(seed), make_agent(seed.map(|s| s.wrapping_add(1)))];
    let mut game = GameState::new_game(size);
    let mut stdout = io::stdout().lock();

    while !game.is_over() && game.move_number() < max_moves {
        if delay_ms > 0 {
            thread::sleep(Duration::from_millis(delay_ms));
            // clear screen and home the cursor
            write!(stdout, "\x1b[2J\x1b[H")?;
        }
        writeln!(stdout, "{}", game.board())?;

        let player = game.next_player();
        let mv = bots[player.index()].select_move(&game);
        writeln!(stdout, "{}", format_move(player, mv))?;
        game = game.apply_move(mv);
    }

    writeln!(stdout, "{}", game.board())?;
    report_result(&game);
    Ok(())
}

fn human_v_bot(size: usize, seed: Option<u64>) -> Result<()> {
    let mut bot = make_agent(seed);
    let mut game = GameState::new_game(size);
    let mut lines = io::stdin().lock().lines();

    while !game.is_over() {
        println!("{}", game.board());
        let player = game.next_player();

        let mv = if player == Player::Black {
            print!("Enter your move: ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                bail!("input closed before the game ended");
            };
            let line = line.context("failed to read move")?;
            let mv = match parse_move(&line) {
                Ok(mv) => mv,
                Err(e) => {
                    eprintln!("{e}");
                    continue;
                }
            };
            if let Err(e) = game.check_move(mv) {
                eprintln!("{e}");
                continue;
            }
            mv
        } else {
            bot.select_move(&game)
        };

        println!("{}", format_move(player, mv));
        game = game.apply_move(mv);
    }

    println!("{}", game.board());
    report_result(&game);
    Ok(())
}

fn report_result(game: &GameState) {
    match game.winner() {
        Some(winner) => info!(%winner, moves = game.move_number(), "game over by resignation"),
        None if game.is_over() => info!(moves = game.move_number(), "game over after two passes"),
        None => info!(moves = game.move_number(), "move limit reached"),
    }
}
