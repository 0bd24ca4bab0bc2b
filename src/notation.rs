//! Conversion between internal squares and the engine's algebraic notation.
//!
//! Files `a`-`i` map to columns 0-8 unchanged. Ranks count 0-9 from the
//! bottom (Red's back rank), so only the rank is flipped:
//! `row = 9 - rank`, `col = file`.

use crate::constants::{BOARD_COLS, BOARD_ROWS};
use crate::error::GameError;
use crate::r#move::Move;
use crate::square::Square;

/// Formats a square, e.g. row 9 column 4 is `e0`.
pub fn square_to_notation(sq: Square) -> String {
    let file = (b'a' + sq.col()) as char;
    let rank = BOARD_ROWS as u8 - 1 - sq.row();
    format!("{}{}", file, rank)
}

pub fn move_to_notation(mv: Move) -> String {
    format!("{}{}", square_to_notation(mv.from), square_to_notation(mv.to))
}

/// Parses one square from the front of `bytes`, returning it and the number
/// of bytes consumed. The rank takes one or two digits.
fn parse_square_prefix(bytes: &[u8]) -> Option<(Square, usize)> {
    let file = bytes.first()?.to_ascii_lowercase().checked_sub(b'a')?;
    if file as usize >= BOARD_COLS {
        return None;
    }

    let digits = bytes[1..]
        .iter()
        .take(2)
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    let rank = bytes[1..=digits]
        .iter()
        .fold(0u8, |acc, b| acc * 10 + (b - b'0'));
    if rank as usize >= BOARD_ROWS {
        return None;
    }

    let row = BOARD_ROWS as u8 - 1 - rank;
    Some((Square::new(row, file)?, 1 + digits))
}

/// Parses a whole string as one square, e.g. `h2`.
pub fn square_from_notation(text: &str) -> Result<Square, GameError> {
    match parse_square_prefix(text.as_bytes()) {
        Some((sq, used)) if used == text.len() => Ok(sq),
        _ => Err(GameError::MalformedNotation(text.to_string())),
    }
}

/// Parses `<file><rank><file><rank>`, e.g. `h2e2`. Anything after the
/// second square is ignored.
pub fn move_from_notation(text: &str) -> Result<Move, GameError> {
    let malformed = || GameError::MalformedNotation(text.to_string());
    let bytes = text.trim().as_bytes();
    let (from, used) = parse_square_prefix(bytes).ok_or_else(malformed)?;
    let (to, _) = parse_square_prefix(&bytes[used..]).ok_or_else(malformed)?;
    Ok(Move::new(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn every_square_round_trips() {
        for square in Square::all() {
            let text = square_to_notation(square);
            assert_eq!(square_from_notation(&text), Ok(square), "{}", text);
        }
    }

    #[test]
    fn rank_flips_but_file_does_not() {
        assert_eq!(square_from_notation("a0"), Ok(sq(9, 0)));
        assert_eq!(square_from_notation("a9"), Ok(sq(0, 0)));
        assert_eq!(square_from_notation("i0"), Ok(sq(9, 8)));
        assert_eq!(square_from_notation("e9"), Ok(sq(0, 4)));
        assert_eq!(square_to_notation(sq(7, 7)), "h2");
    }

    #[test]
    fn two_digit_ranks_are_accepted_in_range() {
        assert_eq!(square_from_notation("c05"), Ok(sq(4, 2)));
        assert!(square_from_notation("c10").is_err());
    }

    #[test]
    fn malformed_squares_fail_without_panicking() {
        for text in ["", "a", "j1", "1a", "a-1", "aa", "a123", "é5", "`3"] {
            assert_eq!(
                square_from_notation(text),
                Err(GameError::MalformedNotation(text.to_string())),
                "{:?}",
                text
            );
        }
    }

    #[test]
    fn moves_parse_from_engine_replies() {
        let mv = move_from_notation("h2e2").unwrap();
        assert_eq!(mv, Move::new(sq(7, 7), sq(7, 4)));
        assert_eq!(mv.to_notation(), "h2e2");
        assert_eq!(move_from_notation("H2E2"), Ok(mv));
        assert_eq!(move_from_notation("h2e2 ponder h9g7"), Ok(mv));
        assert_eq!(move_from_notation(" b0c2\n").unwrap().to_string(), "b0c2");
    }

    #[test]
    fn malformed_moves_fail() {
        for text in ["", "(none)", "h2", "h2e", "h2z2", "h10e2", "0000"] {
            assert!(move_from_notation(text).is_err(), "{:?}", text);
        }
    }
}
