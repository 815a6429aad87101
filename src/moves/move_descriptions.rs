//! The `Move` record produced by the piece generators and consumed by the
//! applier.

use std::fmt;

use crate::game_state::chess_types::{CastleSide, PieceKind, Square};

/// One candidate ply.
///
/// `is_threat` marks destinations that would be captures if an enemy piece
/// stood there; the threat engine counts only those. Pawn pushes, castles and
/// en-passant landings are never threats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub is_threat: bool,
    pub promotion: Option<PieceKind>,
    /// Kind of the piece taken en passant; it sits beside `from`, not on `to`.
    pub en_passant_capture: Option<PieceKind>,
    pub castle: Option<CastleSide>,
}

impl Move {
    #[inline]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            is_threat: false,
            promotion: None,
            en_passant_capture: None,
            castle: None,
        }
    }

    #[inline]
    pub const fn threat(from: Square, to: Square) -> Self {
        Self {
            is_threat: true,
            ..Self::quiet(from, to)
        }
    }

    #[inline]
    pub const fn with_promotion(self, promotion: PieceKind) -> Self {
        Self {
            promotion: Some(promotion),
            ..self
        }
    }

    #[inline]
    pub const fn castle(from: Square, to: Square, side: CastleSide) -> Self {
        Self {
            castle: Some(side),
            ..Self::quiet(from, to)
        }
    }

    #[inline]
    pub const fn en_passant(from: Square, to: Square, captured: PieceKind) -> Self {
        Self {
            en_passant_capture: Some(captured),
            ..Self::quiet(from, to)
        }
    }

    /// Same origin, destination and promotion choice.
    #[inline]
    pub fn same_play(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to && self.promotion == other.promotion
    }
}

/// Long algebraic form: `e2e4`, `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Move;
    use crate::game_state::chess_types::{PieceKind, Square};

    #[test]
    fn display_is_long_algebraic() {
        let push = Move::quiet(Square::at(4, 1), Square::at(4, 3));
        assert_eq!(push.to_string(), "e2e4");

        let promote = Move::quiet(Square::at(4, 6), Square::at(4, 7)).with_promotion(PieceKind::Knight);
        assert_eq!(promote.to_string(), "e7e8n");
    }

    #[test]
    fn same_play_ignores_generator_tags() {
        let tagged = Move::threat(Square::at(1, 0), Square::at(2, 2));
        let plain = Move::quiet(Square::at(1, 0), Square::at(2, 2));
        assert!(tagged.same_play(&plain));
        assert!(!tagged.same_play(&plain.with_promotion(PieceKind::Queen)));
    }
}
