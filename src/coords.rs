//! Conversion between Go coordinate strings ("D4", "pass") and points/moves.
//!
//! Columns use letters A-T skipping I (Go convention to avoid confusion with
//! J); rows are 1-based numbers counted from the bottom edge.

use std::fmt;

use crate::constants::COLS;
use crate::game::Move;
use crate::types::{Player, Point};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCoordError {
    /// Input was empty
    Empty,
    /// Column letter is not one of A-T (without I)
    BadColumn(char),
    /// Row is missing, not a number, or zero
    BadRow(String),
}

impl fmt::Display for ParseCoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCoordError::Empty => write!(f, "empty coordinate"),
            ParseCoordError::BadColumn(c) => write!(f, "invalid column '{c}'"),
            ParseCoordError::BadRow(r) => write!(f, "invalid row '{r}'"),
        }
    }
}

impl std::error::Error for ParseCoordError {}

/// Parse a coordinate such as "C3" (case-insensitive).
///
/// Only the notation is checked; the point may still be off a given board.
pub fn point_from_coords(s: &str) -> Result<Point, ParseCoordError> {
    let s = s.trim();
    let mut chars = s.chars();
    let col_char = chars.next().ok_or(ParseCoordError::Empty)?;

    let upper = col_char.to_ascii_uppercase();
    let col = COLS
        .iter()
        .position(|&c| c as char == upper)
        .ok_or(ParseCoordError::BadColumn(col_char))?;

    let rest = chars.as_str();
    let row: i32 = rest
        .parse()
        .ok()
        .filter(|&r| r >= 1)
        .ok_or_else(|| ParseCoordError::BadRow(rest.to_string()))?;

    Ok(Point::new(row, col as i32 + 1))
}

/// Format a point as "C3". Panics if the column is outside A-T.
pub fn coords_from_point(point: Point) -> String {
    assert!(
        point.col >= 1 && point.col as usize <= COLS.len(),
        "Column {} has no letter",
        point.col
    );
    format!("{}{}", COLS[point.col as usize - 1] as char, point.row)
}

/// Parse "pass", "resign" or a coordinate (case-insensitive).
pub fn parse_move(s: &str) -> Result<Move, ParseCoordError> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("pass") {
        Ok(Move::pass_turn())
    } else if s.eq_ignore_ascii_case("resign") {
        Ok(Move::resign_turn())
    } else {
        point_from_coords(s).map(Move::play)
    }
}

/// Vertex text for a move: "C3", "pass" or "resign".
pub fn move_to_string(mv: Move) -> String {
    match mv {
        Move::Play(point) => coords_from_point(point),
        Move::Pass => "pass".into(),
        Move::Resign => "resign".into(),
    }
}

/// Human-readable description of a player's move.
pub fn format_move(player: Player, mv: Move) -> String {
    match mv {
        Move::Play(point) => format!("{player} {}", coords_from_point(point)),
        Move::Pass => format!("{player} passes"),
        Move::Resign => format!("{player} resigns"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_corners() {
        assert_eq!(point_from_coords("A1"), Ok(Point::new(1, 1)));
        assert_eq!(point_from_coords("T19"), Ok(Point::new(19, 19)));
        assert_eq!(point_from_coords("c3"), Ok(Point::new(3, 3)));
    }

    #[test]
    fn test_parse_skips_i() {
        let h = point_from_coords("H5").unwrap();
        let j = point_from_coords("J5").unwrap();
        assert_eq!(j.col - h.col, 1);
        assert_eq!(point_from_coords("I5"), Err(ParseCoordError::BadColumn('I')));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(point_from_coords(""), Err(ParseCoordError::Empty));
        assert_eq!(point_from_coords("Z3"), Err(ParseCoordError::BadColumn('Z')));
        assert_eq!(point_from_coords("D"), Err(ParseCoordError::BadRow(String::new())));
        assert_eq!(point_from_coords("D0"), Err(ParseCoordError::BadRow("0".into())));
        assert_eq!(point_from_coords("Dx"), Err(ParseCoordError::BadRow("x".into())));
    }

    #[test]
    fn test_str_coord_roundtrip() {
        for coord in ["A1", "D4", "G7", "H5", "J5", "T19"] {
            let pt = point_from_coords(coord).unwrap();
            assert_eq!(coords_from_point(pt), coord);
        }
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("pass"), Ok(Move::Pass));
        assert_eq!(parse_move("PASS"), Ok(Move::Pass));
        assert_eq!(parse_move("Resign"), Ok(Move::Resign));
        assert_eq!(parse_move(" d4 "), Ok(Move::Play(Point::new(4, 4))));
    }

    #[test]
    fn test_format_move() {
        assert_eq!(format_move(Player::Black, Move::Play(Point::new(3, 3))), "Black C3");
        assert_eq!(format_move(Player::White, Move::Pass), "White passes");
        assert_eq!(format_move(Player::White, Move::Resign), "White resigns");
        assert_eq!(move_to_string(Move::Pass), "pass");
    }
}
