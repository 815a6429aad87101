use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::bishop_moves::DIAGONAL_DIRECTIONS;
use crate::moves::move_descriptions::Move;
use crate::moves::rook_moves::{walk_rays, ORTHOGONAL_DIRECTIONS};

/// Union of the bishop and rook rays.
pub fn queen_moves(game_state: &GameState, from: Square) -> Vec<Move> {
    let mut out = Vec::with_capacity(27);
    walk_rays(game_state, from, &DIAGONAL_DIRECTIONS, &mut out);
    walk_rays(game_state, from, &ORTHOGONAL_DIRECTIONS, &mut out);
    out
}
