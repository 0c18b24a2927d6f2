//! Move-selection policies.
//!
//! An [`Agent`] looks at a [`GameState`] and proposes a move. Agents only
//! read the state; the caller decides whether to apply the move.

use tracing::trace;

use crate::board::Board;
use crate::game::{GameState, Move};
use crate::types::{Player, Point};

pub trait Agent {
    fn select_move(&mut self, game_state: &GameState) -> Move;
}

/// Picks uniformly among valid plays that do not fill one of its own eyes,
/// and passes when there are none.
pub struct RandomAgent {
    rng: fastrand::Rng,
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: fastrand::Rng::new(),
        }
    }

    /// Agent with a fixed seed, for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Every valid play for the player to move that does not fill their own eye.
    pub fn candidate_points(game_state: &GameState) -> Vec<Point> {
        let board = game_state.board();
        let player = game_state.next_player();
        board
            .points()
            .filter(|&p| game_state.is_valid_move(Move::play(p)))
            .filter(|&p| !is_point_an_eye(board, p, player))
            .collect()
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, game_state: &GameState) -> Move {
        let candidates = Self::candidate_points(game_state);
        trace!(candidates = candidates.len(), "random agent choosing");
        if candidates.is_empty() {
            return Move::pass_turn();
        }
        Move::play(candidates[self.rng.usize(..candidates.len())])
    }
}

/// Whether `point` is an eye of `color`.
///
/// The point must be empty with every on-board orthogonal neighbor held by
/// `color`. On the edge or in a corner every on-board diagonal must also be
/// friendly; in the center at least three of the four diagonals must be.
pub fn is_point_an_eye(board: &Board, point: Point, color: Player) -> bool {
    if board.is_point_occupied(point) {
        return false;
    }
    for neighbor in point.neighbors() {
        if board.is_on_grid(neighbor) && board.get_player(neighbor) != Some(color) {
            return false;
        }
    }

    let mut friendly_corners = 0;
    let mut off_board_corners = 0;
    for corner in point.corners() {
        if !board.is_on_grid(corner) {
            off_board_corners += 1;
        } else if board.get_player(corner) == Some(color) {
            friendly_corners += 1;
        }
    }

    if off_board_corners > 0 {
        off_board_corners + friendly_corners == 4
    } else {
        friendly_corners >= 3
    }
}
