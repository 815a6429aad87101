//! Canonical chess-rule constants.
//!
//! Starting position, promotion choices, home squares of the castling pieces
//! and the geometry of the four castle moves.

use crate::game_state::chess_types::{CastleSide, Color, PieceKind, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Pieces a pawn may promote to, in the order promotion moves are generated.
pub const PROMOTION_CANDIDATES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Rook corners indexed by castling slot: a1, h1, a8, h8.
pub const ROOK_HOMES: [Square; 4] = [
    Square::at(0, 0),
    Square::at(7, 0),
    Square::at(0, 7),
    Square::at(7, 7),
];

/// King home squares indexed by `Color::index`.
pub const KING_HOMES: [Square; 2] = [Square::at(4, 0), Square::at(4, 7)];

/// Geometry of one castle move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlePath {
    pub color: Color,
    pub side: CastleSide,
    /// Index into `ROOK_HOMES` and the rook moved markers.
    pub rook_index: usize,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Every square strictly between king and rook.
    pub must_be_empty: &'static [Square],
    /// Squares the king crosses or lands on.
    pub must_be_safe: [Square; 2],
}

const LIGHT_QUEENSIDE_GAP: [Square; 3] = [Square::at(1, 0), Square::at(2, 0), Square::at(3, 0)];
const LIGHT_KINGSIDE_GAP: [Square; 2] = [Square::at(5, 0), Square::at(6, 0)];
const DARK_QUEENSIDE_GAP: [Square; 3] = [Square::at(1, 7), Square::at(2, 7), Square::at(3, 7)];
const DARK_KINGSIDE_GAP: [Square; 2] = [Square::at(5, 7), Square::at(6, 7)];

/// All castle moves, ordered to match `ROOK_HOMES`.
pub const CASTLE_PATHS: [CastlePath; 4] = [
    CastlePath {
        color: Color::Light,
        side: CastleSide::QueenSide,
        rook_index: 0,
        king_from: Square::at(4, 0),
        king_to: Square::at(2, 0),
        rook_from: Square::at(0, 0),
        rook_to: Square::at(3, 0),
        must_be_empty: &LIGHT_QUEENSIDE_GAP,
        must_be_safe: [Square::at(3, 0), Square::at(2, 0)],
    },
    CastlePath {
        color: Color::Light,
        side: CastleSide::KingSide,
        rook_index: 1,
        king_from: Square::at(4, 0),
        king_to: Square::at(6, 0),
        rook_from: Square::at(7, 0),
        rook_to: Square::at(5, 0),
        must_be_empty: &LIGHT_KINGSIDE_GAP,
        must_be_safe: [Square::at(5, 0), Square::at(6, 0)],
    },
    CastlePath {
        color: Color::Dark,
        side: CastleSide::QueenSide,
        rook_index: 2,
        king_from: Square::at(4, 7),
        king_to: Square::at(2, 7),
        rook_from: Square::at(0, 7),
        rook_to: Square::at(3, 7),
        must_be_empty: &DARK_QUEENSIDE_GAP,
        must_be_safe: [Square::at(3, 7), Square::at(2, 7)],
    },
    CastlePath {
        color: Color::Dark,
        side: CastleSide::KingSide,
        rook_index: 3,
        king_from: Square::at(4, 7),
        king_to: Square::at(6, 7),
        rook_from: Square::at(7, 7),
        rook_to: Square::at(5, 7),
        must_be_empty: &DARK_KINGSIDE_GAP,
        must_be_safe: [Square::at(5, 7), Square::at(6, 7)],
    },
];

#[inline]
pub fn castle_path(color: Color, side: CastleSide) -> &'static CastlePath {
    let slot = match side {
        CastleSide::QueenSide => 0,
        CastleSide::KingSide => 1,
    };
    &CASTLE_PATHS[color.index() * 2 + slot]
}

/// Castling slot whose rook starts on `square`, if any.
#[inline]
pub fn rook_home_index(square: Square) -> Option<usize> {
    ROOK_HOMES.iter().position(|home| *home == square)
}
