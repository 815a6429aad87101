//! Errors used throughout the rules engine.
//!
//! `ChessErrors` is the single error type returned by move application,
//! validation, undo and the FEN / coordinate helpers. Every fallible operation
//! checks its preconditions before touching the board, so an `Err` always
//! means the position is exactly as it was before the call.

use thiserror::Error;

use crate::game_state::chess_types::Square;

/// Why a promotion request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionFault {
    /// The requested piece kind is not one of queen, rook, bishop, knight.
    UnsupportedPiece,
    /// A promotion piece was supplied for a piece that is not a pawn.
    NotAPawn,
    /// The pawn does not land on its side's final rank.
    WrongRank,
    /// The pawn lands on its final rank but no promotion piece was given.
    MissingChoice,
}

impl std::fmt::Display for PromotionFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            PromotionFault::UnsupportedPiece => "unsupported promotion piece",
            PromotionFault::NotAPawn => "only pawns can promote",
            PromotionFault::WrongRank => "cannot promote from this position",
            PromotionFault::MissingChoice => "promotion piece required",
        };
        f.write_str(text)
    }
}

/// Unified error type for the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessErrors {
    /// `from -> to` is not in the legal move set of the side to move.
    #[error("illegal move: {from} -> {to}")]
    IllegalMove { from: Square, to: Square },

    /// The move itself is legal but the promotion request is not.
    #[error("illegal promotion: {0}")]
    IllegalPromotion(PromotionFault),

    /// A move was applied from (or expected a piece on) an empty square.
    #[error("no piece on {0}")]
    NoPieceOnSquare(Square),

    #[error("no move to undo")]
    NothingToUndo,

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid algebraic coordinate: {0}")]
    InvalidAlgebraic(String),
}

#[cfg(test)]
mod tests {
    use super::{ChessErrors, PromotionFault};
    use crate::game_state::chess_types::Square;

    #[test]
    fn illegal_move_message_uses_algebraic_squares() {
        let err = ChessErrors::IllegalMove {
            from: Square::at(4, 1),
            to: Square::at(4, 4),
        };
        assert_eq!(err.to_string(), "illegal move: e2 -> e5");
    }

    #[test]
    fn promotion_fault_is_part_of_the_message() {
        let err = ChessErrors::IllegalPromotion(PromotionFault::WrongRank);
        assert_eq!(
            err.to_string(),
            "illegal promotion: cannot promote from this position"
        );
    }
}
