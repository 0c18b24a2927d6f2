//! Constants for board dimensions, hashing and driver defaults.
//!
//! Board size is chosen at runtime (`GameState::new_game`), but every size
//! must fit inside the Zobrist table, which is generated once for the
//! largest supported board.

// =============================================================================
// Board Geometry
// =============================================================================

/// Largest supported board (NxN). The Zobrist table covers exactly this area.
pub const MAX_BOARD_SIZE: usize = 19;

/// Number of points on the largest supported board.
pub const MAX_BOARD_AREA: usize = MAX_BOARD_SIZE * MAX_BOARD_SIZE;

/// Board size used by the drivers when none is given.
pub const DEFAULT_BOARD_SIZE: usize = 9;

// =============================================================================
// Zobrist Hashing
// =============================================================================

/// Upper bound (exclusive) for Zobrist codes: 2^63 - 1.
pub const MAX63: u64 = 0x7fff_ffff_ffff_ffff;

/// Seed for the Zobrist code table. Fixed so fingerprints are comparable
/// across process runs.
pub const ZOBRIST_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

// =============================================================================
// Drivers
// =============================================================================

/// Pause between moves when two bots play each other, in milliseconds.
pub const DEFAULT_MOVE_DELAY_MS: u64 = 300;

/// Safety cap on plies in a bot game (3 times the largest board area).
pub const DEFAULT_MAX_MOVES: usize = MAX_BOARD_AREA * 3;

/// Column letters in Go notation. 'I' is skipped.
pub const COLS: &[u8; MAX_BOARD_SIZE] = b"ABCDEFGHJKLMNOPQRST";
