//! Go Text Protocol (GTP) front-end.
//!
//! GTP is a text-based protocol for communicating with Go-playing programs.
//! This module implements the subset of GTP version 2 needed to play a game
//! against the random agent from a graphical interface.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <size>` - Set board size (1 to 19) and clear the board
//! - `clear_board` - Reset to an empty board
//! - `play <color> <vertex>` - Play a move for the side to move
//! - `genmove <color>` - Generate and play a move for the side to move
//! - `showboard` - Render the current board
//!
//! ## Example
//!
//! ```
//! use goban_rs::gtp::GtpEngine;
//!
//! let mut engine = GtpEngine::with_seed(9, 1);
//! let mut out = Vec::new();
//! engine.run("play black D4\nquit\n".as_bytes(), &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().starts_with("= "));
//! ```

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::agent::{Agent, RandomAgent};
use crate::constants::MAX_BOARD_SIZE;
use crate::coords::{move_to_string, parse_move};
use crate::game::GameState;
use crate::types::Player;

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "version",
];

/// GTP engine state.
pub struct GtpEngine {
    game: GameState,
    board_size: usize,
    agent: RandomAgent,
}

impl GtpEngine {
    pub fn new(board_size: usize) -> Self {
        Self::with_agent(board_size, RandomAgent::new())
    }

    /// Engine whose move generator is seeded, for reproducible sessions.
    pub fn with_seed(board_size: usize, seed: u64) -> Self {
        Self::with_agent(board_size, RandomAgent::with_seed(seed))
    }

    fn with_agent(board_size: usize, agent: RandomAgent) -> Self {
        GtpEngine {
            game: GameState::new_game(board_size),
            board_size,
            agent,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Run the GTP command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            if !success {
                debug!(%command, %message, "command failed");
            }

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    fn parse_color(s: &str) -> Option<Player> {
        match s.to_lowercase().as_str() {
            "b" | "black" => Some(Player::Black),
            "w" | "white" => Some(Player::White),
            _ => None,
        }
    }

    /// Check the color argument against the side to move.
    fn expect_turn(&self, arg: Option<&&str>) -> Result<Player, String> {
        let arg = arg.ok_or_else(|| "missing argument".to_string())?;
        let color = Self::parse_color(arg).ok_or_else(|| format!("invalid color '{arg}'"))?;
        if color != self.game.next_player() {
            return Err("illegal move: out of turn".to_string());
        }
        Ok(color)
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                match args[0].parse::<usize>() {
                    Ok(size) if (1..=MAX_BOARD_SIZE).contains(&size) => {
                        self.board_size = size;
                        self.game = GameState::new_game(size);
                        (true, String::new())
                    }
                    Ok(size) => (
                        false,
                        format!("unacceptable size, must be 1 to {MAX_BOARD_SIZE} (got {size})"),
                    ),
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                self.game = GameState::new_game(self.board_size);
                (true, String::new())
            }

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                if let Err(e) = self.expect_turn(args.first()) {
                    return (false, e);
                }
                let mv = match parse_move(args[1]) {
                    Ok(mv) => mv,
                    Err(e) => return (false, e.to_string()),
                };
                match self.game.check_move(mv) {
                    Ok(()) => {
                        self.game = self.game.apply_move(mv);
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let player = match self.expect_turn(args.first()) {
                    Ok(player) => player,
                    Err(e) => return (false, e),
                };
                if self.game.is_over() {
                    return (false, "game is over".to_string());
                }
                let mv = self.agent.select_move(&self.game);
                info!(%player, %mv, "generated move");
                self.game = self.game.apply_move(mv);
                (true, move_to_string(mv))
            }

            "showboard" => (true, format!("\n{}", self.game.board())),

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
