//! Board state: stone groups, placement with merge and capture, and the
//! incrementally maintained Zobrist fingerprint.
//!
//! Groups ([`GoString`]) are immutable values shared through [`Arc`]. Every
//! stone of a group points at the same `Arc`, so cloning a [`Board`] copies
//! one pointer per intersection and never touches the groups themselves.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::constants::{COLS, MAX_BOARD_SIZE};
use crate::types::{Player, Point};
use crate::zobrist::{EMPTY_BOARD, Zobrist};

/// A maximal connected chain of same-colored stones together with its
/// liberties (empty points orthogonally adjacent to the chain).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoString {
    color: Player,
    stones: BTreeSet<Point>,
    liberties: BTreeSet<Point>,
}

impl GoString {
    pub fn new(
        color: Player,
        stones: impl IntoIterator<Item = Point>,
        liberties: impl IntoIterator<Item = Point>,
    ) -> Self {
        GoString {
            color,
            stones: stones.into_iter().collect(),
            liberties: liberties.into_iter().collect(),
        }
    }

    pub fn color(&self) -> Player {
        self.color
    }

    pub fn stones(&self) -> &BTreeSet<Point> {
        &self.stones
    }

    pub fn liberties(&self) -> &BTreeSet<Point> {
        &self.liberties
    }

    pub fn num_liberties(&self) -> usize {
        self.liberties.len()
    }

    pub fn with_liberty(&self, point: Point) -> GoString {
        let mut liberties = self.liberties.clone();
        liberties.insert(point);
        GoString {
            color: self.color,
            stones: self.stones.clone(),
            liberties,
        }
    }

    pub fn without_liberty(&self, point: Point) -> GoString {
        let mut liberties = self.liberties.clone();
        liberties.remove(&point);
        GoString {
            color: self.color,
            stones: self.stones.clone(),
            liberties,
        }
    }

    /// Union of two same-colored strings. A point that is a stone of either
    /// string is never a liberty of the result.
    ///
    /// Panics if the colors differ.
    pub fn merged_with(&self, other: &GoString) -> GoString {
        assert_eq!(
            self.color, other.color,
            "Cannot merge a {} string with a {} string",
            self.color, other.color
        );
        let stones: BTreeSet<Point> = self.stones.union(&other.stones).copied().collect();
        let liberties = self
            .liberties
            .union(&other.liberties)
            .filter(|p| !stones.contains(p))
            .copied()
            .collect();
        GoString {
            color: self.color,
            stones,
            liberties,
        }
    }
}

/// A rectangular Go board.
///
/// `hash` always equals the XOR of [`Zobrist::for_point`] over every stone
/// on the board; see [`Board::recompute_fingerprint`].
#[derive(Clone, Debug)]
pub struct Board {
    num_rows: usize,
    num_cols: usize,
    grid: Vec<Option<Arc<GoString>>>,
    hash: Zobrist,
}

impl Board {
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        assert!(
            (1..=MAX_BOARD_SIZE).contains(&num_rows) && (1..=MAX_BOARD_SIZE).contains(&num_cols),
            "Board size {}x{} not supported, max={}",
            num_rows,
            num_cols,
            MAX_BOARD_SIZE,
        );
        Board {
            num_rows,
            num_cols,
            grid: vec![None; num_rows * num_cols],
            hash: EMPTY_BOARD,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// All on-grid points, row by row starting at (1, 1).
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let (rows, cols) = (self.num_rows as i32, self.num_cols as i32);
        (1..=rows).flat_map(move |row| (1..=cols).map(move |col| Point::new(row, col)))
    }

    fn index(&self, point: Point) -> usize {
        (point.row - 1) as usize * self.num_cols + (point.col - 1) as usize
    }

    fn cell(&self, point: Point) -> Option<&Arc<GoString>> {
        if !self.is_on_grid(point) {
            return None;
        }
        self.grid[self.index(point)].as_ref()
    }

    /// Place a stone, merging it with friendly neighbors and removing any
    /// opposing string left without liberties.
    ///
    /// Panics if `point` is off the board or already occupied. Self-capture is
    /// not rejected here; the resulting string simply has no liberties.
    pub fn place_stone(&mut self, player: Player, point: Point) {
        assert!(
            self.is_on_grid(point),
            "Point {} is not on the {}x{} board",
            point,
            self.num_rows,
            self.num_cols,
        );
        assert!(!self.is_point_occupied(point), "Point {} is already occupied", point);

        let mut adjacent_same_color: Vec<Arc<GoString>> = Vec::with_capacity(4);
        let mut adjacent_opposite_color: Vec<Arc<GoString>> = Vec::with_capacity(4);
        let mut liberties = Vec::with_capacity(4);

        for neighbor in point.neighbors() {
            if !self.is_on_grid(neighbor) {
                continue;
            }
            match self.cell(neighbor) {
                None => liberties.push(neighbor),
                Some(string) => {
                    let bucket = if string.color == player {
                        &mut adjacent_same_color
                    } else {
                        &mut adjacent_opposite_color
                    };
                    // several neighbors can belong to one string
                    if !bucket.iter().any(|s| Arc::ptr_eq(s, string)) {
                        bucket.push(Arc::clone(string));
                    }
                }
            }
        }

        let new_string = adjacent_same_color
            .iter()
            .fold(GoString::new(player, [point], liberties), |acc, s| acc.merged_with(s));
        trace!(
            %player, %point,
            stones = new_string.stones.len(),
            liberties = new_string.num_liberties(),
            "placed stone"
        );
        self.replace_string(Arc::new(new_string));

        self.hash ^= Zobrist::for_point(point, player);

        for other_color_string in &adjacent_opposite_color {
            let replacement = other_color_string.without_liberty(point);
            if replacement.num_liberties() == 0 {
                self.remove_string(other_color_string);
            } else {
                self.replace_string(Arc::new(replacement));
            }
        }
    }

    fn replace_string(&mut self, string: Arc<GoString>) {
        for &point in &string.stones {
            let index = self.index(point);
            self.grid[index] = Some(Arc::clone(&string));
        }
    }

    fn remove_string(&mut self, string: &Arc<GoString>) {
        debug!(
            color = %string.color,
            stones = string.stones.len(),
            "capturing string"
        );
        for &point in &string.stones {
            for neighbor in point.neighbors() {
                let neighbor_string = match self.cell(neighbor) {
                    Some(s) if !Arc::ptr_eq(s, string) => Arc::clone(s),
                    _ => continue,
                };
                self.replace_string(Arc::new(neighbor_string.with_liberty(point)));
            }
            let index = self.index(point);
            self.grid[index] = None;
            self.hash ^= Zobrist::for_point(point, string.color);
        }
    }

    pub fn is_on_grid(&self, point: Point) -> bool {
        1 <= point.row
            && point.row <= self.num_rows as i32
            && 1 <= point.col
            && point.col <= self.num_cols as i32
    }

    /// Color of the stone at `point`, `None` when empty or off the board.
    pub fn get_player(&self, point: Point) -> Option<Player> {
        self.cell(point).map(|s| s.color)
    }

    pub fn get_go_string(&self, point: Point) -> Option<&GoString> {
        self.cell(point).map(|s| s.as_ref())
    }

    pub fn is_point_occupied(&self, point: Point) -> bool {
        self.cell(point).is_some()
    }

    /// The incrementally maintained position fingerprint.
    pub fn zobrist_hash(&self) -> Zobrist {
        self.hash
    }

    /// The fingerprint rebuilt from scratch from the stones on the board.
    pub fn recompute_fingerprint(&self) -> Zobrist {
        self.points()
            .filter_map(|p| self.get_player(p).map(|c| Zobrist::for_point(p, c)))
            .fold(EMPTY_BOARD, |acc, code| acc ^ code)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=self.num_rows as i32).rev() {
            write!(f, "{row:>2}")?;
            for col in 1..=self.num_cols as i32 {
                let ch = match self.get_player(Point::new(row, col)) {
                    Some(Player::Black) => 'x',
                    Some(Player::White) => 'o',
                    None => '.',
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for &c in &COLS[..self.num_cols] {
            write!(f, " {}", c as char)?;
        }
        writeln!(f)
    }
}
