//! Zobrist position fingerprints.
//!
//! Every (point, color) pair on the largest supported board gets a random
//! 63-bit code. A board's fingerprint is the XOR of the codes of all stones
//! currently on it, so placing or removing a stone is a single XOR and two
//! positions can be compared in constant time.

use std::fmt::{Debug, Formatter};
use std::ops::{BitXor, BitXorAssign};

use lazy_static::lazy_static;

use crate::constants::{MAX63, MAX_BOARD_AREA, MAX_BOARD_SIZE, ZOBRIST_SEED};
use crate::types::{Player, Point};

#[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Zobrist(u64);

/// Fingerprint of the empty board.
pub const EMPTY_BOARD: Zobrist = Zobrist(0);

struct ZobristTable {
    codes: Vec<Zobrist>,
}

lazy_static! {
    static ref ZOBRIST_TABLE: ZobristTable = ZobristTable::new();
}

impl ZobristTable {
    fn new() -> Self {
        let mut rng = fastrand::Rng::with_seed(ZOBRIST_SEED);
        let codes = (0..2 * MAX_BOARD_AREA)
            .map(|_| Zobrist(rng.u64(0..MAX63)))
            .collect();
        ZobristTable { codes }
    }
}

impl Zobrist {
    /// The code for a stone of `color` at `point`.
    ///
    /// Panics if `point` lies outside the largest supported board.
    pub fn for_point(point: Point, color: Player) -> Zobrist {
        let max = MAX_BOARD_SIZE as i32;
        assert!(
            (1..=max).contains(&point.row) && (1..=max).contains(&point.col),
            "Point {} outside the Zobrist table, max size={}",
            point,
            MAX_BOARD_SIZE,
        );
        let flat = (point.row - 1) as usize * MAX_BOARD_SIZE + (point.col - 1) as usize;
        ZOBRIST_TABLE.codes[flat * 2 + color.index()]
    }

    pub fn inner(self) -> u64 {
        self.0
    }
}

impl Debug for Zobrist {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Zobrist({:#018x})", self.0)
    }
}

impl BitXor for Zobrist {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Zobrist(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Zobrist {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn codes_are_unique_and_in_range() {
        let mut set = HashSet::new();
        for row in 1..=MAX_BOARD_SIZE as i32 {
            for col in 1..=MAX_BOARD_SIZE as i32 {
                for color in [Player::Black, Player::White] {
                    let code = Zobrist::for_point(Point::new(row, col), color);
                    assert!(code.inner() < MAX63);
                    assert!(set.insert(code));
                }
            }
        }
        assert_eq!(set.len(), 2 * MAX_BOARD_AREA);
        assert!(!set.contains(&EMPTY_BOARD));
    }

    #[test]
    fn table_is_reproducible() {
        let fresh = ZobristTable::new();
        let p = Point::new(4, 7);
        assert_eq!(fresh.codes[(3 * MAX_BOARD_SIZE + 6) * 2], Zobrist::for_point(p, Player::Black));
    }

    #[test]
    fn xor_is_self_inverse() {
        let code = Zobrist::for_point(Point::new(3, 3), Player::White);
        let mut hash = EMPTY_BOARD;
        hash ^= code;
        assert_ne!(hash, EMPTY_BOARD);
        hash ^= code;
        assert_eq!(hash, EMPTY_BOARD);
    }

    #[test]
    #[should_panic]
    fn off_table_point_panics() {
        Zobrist::for_point(Point::new(0, 1), Player::Black);
    }
}
