use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::Move;
use crate::moves::rook_moves::walk_rays;

pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, -1), (1, -1), (-1, 1)];

pub fn bishop_moves(game_state: &GameState, from: Square) -> Vec<Move> {
    let mut out = Vec::with_capacity(13);
    walk_rays(game_state, from, &DIAGONAL_DIRECTIONS, &mut out);
    out
}
