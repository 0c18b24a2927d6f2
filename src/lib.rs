//! Goban-rs: a Go rules engine with Zobrist-hashed situational superko.
//!
//! The engine keeps an immutable, backward-linked history of game states.
//! Every applied move produces a new [`game::GameState`]; earlier states are
//! never mutated, so they can be shared freely between lookahead branches.
//!
//! ## Modules
//!
//! - [`constants`] - Board-size limits, Zobrist seed and driver defaults
//! - [`types`] - Players and points
//! - [`zobrist`] - Position fingerprints
//! - [`board`] - Stone strings, placement and capture
//! - [`game`] - Moves, legality (self-capture, superko) and game end
//! - [`agent`] - Move-selection policies (random legal moves)
//! - [`coords`] - Coordinate strings such as "D4"
//! - [`gtp`] - Go Text Protocol front-end
//!
//! ## Example
//!
//! ```
//! use goban_rs::game::{GameState, Move};
//! use goban_rs::types::{Player, Point};
//!
//! let game = GameState::new_game(9);
//! let mv = Move::play(Point::new(3, 3));
//! assert!(game.is_valid_move(mv));
//!
//! let game = game.apply_move(mv);
//! assert_eq!(game.next_player(), Player::White);
//! assert!(!game.is_valid_move(mv));
//! ```

pub mod agent;
pub mod board;
pub mod constants;
pub mod coords;
pub mod game;
pub mod gtp;
pub mod types;
pub mod zobrist;
