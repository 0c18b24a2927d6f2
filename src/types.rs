//! Players and board coordinates.

use std::fmt;

/// One of the two sides. Black always moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// The opponent.
    pub fn other(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Dense index (Black = 0, White = 1) for table lookups.
    pub fn index(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "Black"),
            Player::White => write!(f, "White"),
        }
    }
}

/// A board intersection. Rows and columns are 1-based; row 1 is the bottom
/// edge, column 1 the left edge.
///
/// A `Point` carries no board context, so it can name positions off the
/// board. Use [`Board::is_on_grid`](crate::board::Board::is_on_grid) before
/// treating one as a real intersection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    pub const fn new(row: i32, col: i32) -> Self {
        Point { row, col }
    }

    /// The 4 orthogonally adjacent points, unfiltered.
    pub fn neighbors(self) -> [Point; 4] {
        [
            Point::new(self.row - 1, self.col),
            Point::new(self.row + 1, self.col),
            Point::new(self.row, self.col - 1),
            Point::new(self.row, self.col + 1),
        ]
    }

    /// The 4 diagonally adjacent points, unfiltered.
    pub fn corners(self) -> [Point; 4] {
        [
            Point::new(self.row - 1, self.col - 1),
            Point::new(self.row - 1, self.col + 1),
            Point::new(self.row + 1, self.col - 1),
            Point::new(self.row + 1, self.col + 1),
        ]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_is_an_involution() {
        for p in [Player::Black, Player::White] {
            assert_ne!(p.other(), p);
            assert_eq!(p.other().other(), p);
        }
    }

    #[test]
    fn neighbors_are_orthogonal() {
        let p = Point::new(2, 2);
        let n = p.neighbors();
        assert!(n.contains(&Point::new(1, 2)));
        assert!(n.contains(&Point::new(3, 2)));
        assert!(n.contains(&Point::new(2, 1)));
        assert!(n.contains(&Point::new(2, 3)));
    }

    #[test]
    fn corner_neighbors_are_not_clipped() {
        let p = Point::new(1, 1);
        assert!(p.neighbors().contains(&Point::new(0, 1)));
        assert!(p.corners().contains(&Point::new(0, 0)));
        assert!(p.corners().contains(&Point::new(2, 2)));
    }
}
