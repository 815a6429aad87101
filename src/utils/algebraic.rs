//! Conversions between algebraic coordinates (`e4`) and `Square`.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::Square;

/// Convert an algebraic coordinate (for example: "e4") to a square.
pub fn algebraic_to_square(square: &str) -> Result<Square, ChessErrors> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidAlgebraic(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidAlgebraic(square.to_owned()));
    }

    Square::new(file - b'a', rank - b'1')
        .ok_or_else(|| ChessErrors::InvalidAlgebraic(square.to_owned()))
}

/// Convert a square to its algebraic coordinate (for example: "e4").
pub fn square_to_algebraic(square: Square) -> String {
    let file_char = char::from(b'a' + square.file());
    let rank_char = char::from(b'1' + square.rank());
    format!("{file_char}{rank_char}")
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_to_algebraic};
    use crate::game_state::chess_types::Square;

    #[test]
    fn corner_squares_convert() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse"), Square::at(0, 0));
        assert_eq!(algebraic_to_square("h8").expect("h8 should parse"), Square::at(7, 7));
        assert_eq!(square_to_algebraic(Square::at(0, 0)), "a1");
        assert_eq!(square_to_algebraic(Square::at(7, 7)), "h8");
    }

    #[test]
    fn malformed_coordinates_are_rejected() {
        for bad in ["", "e", "e44", "z1", "a0", "A1"] {
            assert!(algebraic_to_square(bad).is_err(), "{bad} should not parse");
        }
    }
}
