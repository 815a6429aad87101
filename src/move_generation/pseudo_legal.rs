//! Per-square dispatch onto the piece generators.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::bishop_moves::bishop_moves;
use crate::moves::king_moves::{king_moves, king_steps};
use crate::moves::knight_moves::knight_moves;
use crate::moves::move_descriptions::Move;
use crate::moves::pawn_moves::{pawn_moves, pawn_threats};
use crate::moves::queen_moves::queen_moves;
use crate::moves::rook_moves::rook_moves;

/// Pseudo-legal moves of the piece on `square` (self-check not considered).
pub fn pseudo_legal_moves(game_state: &GameState, square: Square) -> Vec<Move> {
    let Some(piece) = game_state.piece_at(square) else {
        return Vec::new();
    };
    match piece.kind {
        PieceKind::Pawn => pawn_moves(game_state, square),
        PieceKind::Knight => knight_moves(game_state, square),
        PieceKind::Bishop => bishop_moves(game_state, square),
        PieceKind::Rook => rook_moves(game_state, square),
        PieceKind::Queen => queen_moves(game_state, square),
        PieceKind::King => king_moves(game_state, square),
    }
}

/// Squares the piece on `square` attacks.
///
/// Pawns report both diagonals (occupied or not) and never their pushes;
/// kings report plain steps only.
pub fn threat_moves(game_state: &GameState, square: Square) -> Vec<Move> {
    let Some(piece) = game_state.piece_at(square) else {
        return Vec::new();
    };
    match piece.kind {
        PieceKind::Pawn => pawn_threats(game_state, square),
        PieceKind::Knight => knight_moves(game_state, square),
        PieceKind::Bishop => bishop_moves(game_state, square),
        PieceKind::Rook => rook_moves(game_state, square),
        PieceKind::Queen => queen_moves(game_state, square),
        PieceKind::King => king_steps(game_state, square),
    }
}

#[cfg(test)]
mod tests {
    use super::{pseudo_legal_moves, threat_moves};
    use crate::game_state::chess_types::*;

    #[test]
    fn empty_square_has_no_moves() {
        let game = GameState::new_game();
        assert!(pseudo_legal_moves(&game, Square::at(4, 4)).is_empty());
        assert!(threat_moves(&game, Square::at(4, 4)).is_empty());
    }

    #[test]
    fn starting_pseudo_legal_count_is_twenty() {
        let game = GameState::new_game();
        let total: usize = game
            .player_pieces(Color::Light)
            .map(|square| pseudo_legal_moves(&game, square).len())
            .sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn threat_moves_are_all_flagged() {
        let game = GameState::new_game();
        for square in game.player_pieces(Color::Dark) {
            assert!(threat_moves(&game, square).iter().all(|mv| mv.is_threat));
        }
    }
}
