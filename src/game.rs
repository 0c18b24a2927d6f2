//! Game state: move legality, situational superko and game termination.
//!
//! A [`GameState`] is an immutable node in a backward-linked history. Applying
//! a move never touches the current state; it builds a new node that owns a
//! new (or, for pass and resign, shared) board and points back at its
//! predecessor. Many lookahead branches can share one history prefix.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::board::Board;
use crate::types::{Player, Point};
use crate::zobrist::Zobrist;

/// A player's action on their turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Play(Point),
    Pass,
    Resign,
}

impl Move {
    pub fn play(point: Point) -> Move {
        Move::Play(point)
    }

    pub fn pass_turn() -> Move {
        Move::Pass
    }

    pub fn resign_turn() -> Move {
        Move::Resign
    }

    pub fn is_play(&self) -> bool {
        matches!(self, Move::Play(_))
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }

    pub fn is_resign(&self) -> bool {
        matches!(self, Move::Resign)
    }

    /// The target point of a play, `None` for pass and resign.
    pub fn point(&self) -> Option<Point> {
        match self {
            Move::Play(point) => Some(*point),
            Move::Pass | Move::Resign => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Play(point) => write!(f, "play {point}"),
            Move::Pass => write!(f, "pass"),
            Move::Resign => write!(f, "resign"),
        }
    }
}

/// Why a move is not valid in a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The game has already ended
    GameOver,
    /// Point is not on the board
    OffBoard,
    /// Point is not empty
    Occupied,
    /// Move would leave its own string without liberties
    SelfCapture,
    /// Move recreates an earlier (position, player to move) situation
    Ko,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::GameOver => write!(f, "illegal move: game is over"),
            MoveError::OffBoard => write!(f, "illegal move: point not on board"),
            MoveError::Occupied => write!(f, "illegal move: point not empty"),
            MoveError::SelfCapture => write!(f, "illegal move: self-capture"),
            MoveError::Ko => write!(f, "illegal move: violates superko"),
        }
    }
}

impl std::error::Error for MoveError {}

/// A position plus whose turn it is, identified by fingerprint.
pub type Situation = (Player, Zobrist);

/// Cheap-to-clone handle to one node of a game history.
#[derive(Clone)]
pub struct GameState {
    node: Arc<StateNode>,
}

struct StateNode {
    board: Arc<Board>,
    next_player: Player,
    previous_state: Option<GameState>,
    last_move: Option<Move>,
    /// Every situation departed from on the way to this state.
    previous_states: HashSet<Situation>,
    move_number: usize,
    over: bool,
    winner: Option<Player>,
}

impl Drop for StateNode {
    // Unlink the history iteratively; dropping a long chain recursively
    // could overflow the stack.
    fn drop(&mut self) {
        let mut previous = self.previous_state.take();
        while let Some(state) = previous {
            match Arc::try_unwrap(state.node) {
                Ok(mut node) => previous = node.previous_state.take(),
                Err(_) => break,
            }
        }
    }
}

impl GameState {
    /// Empty `board_size` x `board_size` board, Black to move.
    pub fn new_game(board_size: usize) -> GameState {
        GameState {
            node: Arc::new(StateNode {
                board: Arc::new(Board::new(board_size, board_size)),
                next_player: Player::Black,
                previous_state: None,
                last_move: None,
                previous_states: HashSet::new(),
                move_number: 0,
                over: false,
                winner: None,
            }),
        }
    }

    pub fn board(&self) -> &Board {
        &self.node.board
    }

    pub fn next_player(&self) -> Player {
        self.node.next_player
    }

    pub fn last_move(&self) -> Option<Move> {
        self.node.last_move
    }

    pub fn previous_state(&self) -> Option<&GameState> {
        self.node.previous_state.as_ref()
    }

    /// Plies played since the empty board.
    pub fn move_number(&self) -> usize {
        self.node.move_number
    }

    pub fn situation(&self) -> Situation {
        (self.node.next_player, self.node.board.zobrist_hash())
    }

    /// Apply `mv` for the player to move.
    ///
    /// The move is not validated; gate it through [`GameState::is_valid_move`]
    /// first. Placing on an occupied or off-board point panics.
    pub fn apply_move(&self, mv: Move) -> GameState {
        let player = self.next_player();
        let board = match mv {
            Move::Play(point) => {
                let mut next_board = Board::clone(&self.node.board);
                next_board.place_stone(player, point);
                Arc::new(next_board)
            }
            Move::Pass | Move::Resign => Arc::clone(&self.node.board),
        };

        let mut previous_states = self.node.previous_states.clone();
        previous_states.insert(self.situation());

        let (over, winner) = if self.is_over() {
            (true, self.winner())
        } else {
            match mv {
                Move::Resign => (true, Some(player.other())),
                Move::Pass => (self.last_move() == Some(Move::Pass), None),
                Move::Play(_) => (false, None),
            }
        };
        trace!(%player, %mv, move_number = self.move_number() + 1, "applied move");

        GameState {
            node: Arc::new(StateNode {
                board,
                next_player: player.other(),
                previous_state: Some(self.clone()),
                last_move: Some(mv),
                previous_states,
                move_number: self.move_number() + 1,
                over,
                winner,
            }),
        }
    }

    /// Apply each move in turn, without validation.
    pub fn apply_sequence(&self, moves: impl IntoIterator<Item = Move>) -> GameState {
        moves
            .into_iter()
            .fold(self.clone(), |state, mv| state.apply_move(mv))
    }

    /// True after a resignation or two consecutive passes, and for every
    /// state built on top of such a state.
    pub fn is_over(&self) -> bool {
        self.node.over
    }

    /// The player who did not resign. A game ended by two passes has no
    /// winner here since scoring is not implemented.
    pub fn winner(&self) -> Option<Player> {
        self.node.winner
    }

    fn board_after(&self, player: Player, point: Point) -> Board {
        let mut next_board = Board::clone(&self.node.board);
        next_board.place_stone(player, point);
        next_board
    }

    /// Whether `mv` leaves `player`'s own string without liberties, after any
    /// captures the move makes.
    ///
    /// Panics if the move targets an occupied or off-board point.
    pub fn is_move_self_capture(&self, player: Player, mv: Move) -> bool {
        let Move::Play(point) = mv else {
            return false;
        };
        let next_board = self.board_after(player, point);
        next_board
            .get_go_string(point)
            .is_some_and(|s| s.num_liberties() == 0)
    }

    /// Whether `mv` recreates a situation (board plus player to move) that
    /// already occurred in this history.
    ///
    /// Panics if the move targets an occupied or off-board point.
    pub fn violates_ko(&self, player: Player, mv: Move) -> bool {
        let Move::Play(point) = mv else {
            return false;
        };
        let next_board = self.board_after(player, point);
        self.node
            .previous_states
            .contains(&(player.other(), next_board.zobrist_hash()))
    }

    /// Check `mv` for the player to move, reporting the first rule it breaks.
    pub fn check_move(&self, mv: Move) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let Move::Play(point) = mv else {
            return Ok(());
        };
        let board = self.board();
        if !board.is_on_grid(point) {
            return Err(MoveError::OffBoard);
        }
        if board.is_point_occupied(point) {
            return Err(MoveError::Occupied);
        }

        let player = self.next_player();
        let next_board = self.board_after(player, point);
        if next_board
            .get_go_string(point)
            .is_some_and(|s| s.num_liberties() == 0)
        {
            return Err(MoveError::SelfCapture);
        }
        if self
            .node
            .previous_states
            .contains(&(player.other(), next_board.zobrist_hash()))
        {
            debug!(%player, %point, "move repeats an earlier situation");
            return Err(MoveError::Ko);
        }
        Ok(())
    }

    pub fn is_valid_move(&self, mv: Move) -> bool {
        self.check_move(mv).is_ok()
    }

    /// All valid moves: plays in row-major order, then pass and resign.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        self.board()
            .points()
            .map(Move::Play)
            .filter(|&mv| self.is_valid_move(mv))
            .chain([Move::Pass, Move::Resign])
            .collect()
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("next_player", &self.next_player())
            .field("last_move", &self.last_move())
            .field("move_number", &self.move_number())
            .field("hash", &self.board().zobrist_hash())
            .field("over", &self.is_over())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(row: i32, col: i32) -> Move {
        Move::play(Point::new(row, col))
    }

    #[test]
    fn test_move_constructors() {
        let m = play(3, 4);
        assert!(m.is_play() && !m.is_pass() && !m.is_resign());
        assert_eq!(m.point(), Some(Point::new(3, 4)));

        assert!(Move::pass_turn().is_pass());
        assert_eq!(Move::pass_turn().point(), None);
        assert!(Move::resign_turn().is_resign());
        assert_eq!(Move::resign_turn().point(), None);
    }

    #[test]
    fn test_new_game() {
        let game = GameState::new_game(4);
        assert_eq!(game.next_player(), Player::Black);
        assert_eq!(game.last_move(), None);
        assert!(game.previous_state().is_none());
        assert_eq!(game.move_number(), 0);
        assert!(!game.is_over());
    }

    #[test]
    fn test_apply_move_flips_player_and_links_history() {
        let game = GameState::new_game(4);
        let next = game.apply_move(play(1, 1));

        assert_eq!(next.next_player(), Player::White);
        assert_eq!(next.last_move(), Some(play(1, 1)));
        assert!(next.board().is_point_occupied(Point::new(1, 1)));
        assert!(!game.board().is_point_occupied(Point::new(1, 1)));
        assert_eq!(next.previous_state().unwrap().situation(), game.situation());
        assert_eq!(next.move_number(), 1);
    }

    #[test]
    fn test_pass_shares_board() {
        let game = GameState::new_game(4).apply_move(play(2, 2));
        let passed = game.apply_move(Move::pass_turn());
        assert!(std::ptr::eq(game.board(), passed.board()));
        assert_eq!(passed.last_move(), Some(Move::Pass));
    }

    #[test]
    fn test_resign_ends_game() {
        let game = GameState::new_game(4).apply_move(Move::resign_turn());
        assert!(game.is_over());
        assert_eq!(game.winner(), Some(Player::White));
        assert_eq!(game.check_move(Move::pass_turn()), Err(MoveError::GameOver));
        assert!(!game.is_valid_move(Move::resign_turn()));
        assert!(!game.is_valid_move(play(1, 2)));
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn test_single_pass_does_not_end_game() {
        let game = GameState::new_game(4).apply_move(Move::pass_turn());
        assert!(!game.is_over());
        assert!(game.is_valid_move(Move::pass_turn()));
    }

    #[test]
    fn test_game_over_is_sticky() {
        let over = GameState::new_game(4)
            .apply_sequence([Move::pass_turn(), Move::pass_turn()]);
        assert!(over.is_over());
        assert_eq!(over.winner(), None);
        let after = over.apply_move(play(1, 1));
        assert!(after.is_over());
    }

    #[test]
    fn test_seen_situations_accumulate_departed_states() {
        let game = GameState::new_game(3);
        let g1 = game.apply_move(play(2, 2));
        let g2 = g1.apply_move(Move::pass_turn());

        assert!(game.node.previous_states.is_empty());
        assert_eq!(g1.node.previous_states.len(), 1);
        assert!(g1.node.previous_states.contains(&game.situation()));
        assert!(!g1.node.previous_states.contains(&g1.situation()));
        assert_eq!(g2.node.previous_states.len(), 2);
        assert!(g2.node.previous_states.contains(&g1.situation()));
    }

    #[test]
    fn test_check_move_reports_reason() {
        let game = GameState::new_game(3).apply_move(play(1, 1));
        assert_eq!(game.check_move(play(1, 1)), Err(MoveError::Occupied));
        assert_eq!(game.check_move(play(0, 1)), Err(MoveError::OffBoard));
        assert_eq!(game.check_move(play(4, 4)), Err(MoveError::OffBoard));
        assert_eq!(game.check_move(play(2, 2)), Ok(()));
        assert_eq!(game.check_move(Move::pass_turn()), Ok(()));
    }

    #[test]
    fn test_non_play_moves_are_never_self_capture_or_ko() {
        let game = GameState::new_game(2);
        for mv in [Move::pass_turn(), Move::resign_turn()] {
            assert!(!game.is_move_self_capture(Player::Black, mv));
            assert!(!game.violates_ko(Player::Black, mv));
        }
    }

    #[test]
    fn test_single_point_board_is_self_capture() {
        let game = GameState::new_game(1);
        assert!(game.is_move_self_capture(Player::Black, play(1, 1)));
        assert_eq!(game.check_move(play(1, 1)), Err(MoveError::SelfCapture));
        assert_eq!(game.legal_moves(), vec![Move::Pass, Move::Resign]);
    }

    #[test]
    fn test_long_history_drops() {
        let mut game = GameState::new_game(2);
        for _ in 0..100_000 {
            game = game.apply_move(Move::pass_turn());
        }
        assert_eq!(game.move_number(), 100_000);
    }
}
