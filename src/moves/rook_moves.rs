//! Rook move generation and the ray walker shared by all sliding pieces.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::Move;

pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

pub fn rook_moves(game_state: &GameState, from: Square) -> Vec<Move> {
    let mut out = Vec::with_capacity(14);
    walk_rays(game_state, from, &ORTHOGONAL_DIRECTIONS, &mut out);
    out
}

/// Walk each `(d_file, d_rank)` ray from `from` until the edge or a blocker.
///
/// An opposing blocker is included as a capture and ends the ray; a friendly
/// blocker ends the ray without being included. Every square emitted is a
/// threat.
pub fn walk_rays(
    game_state: &GameState,
    from: Square,
    directions: &[(i8, i8)],
    out: &mut Vec<Move>,
) {
    let Some(mover) = game_state.color_at(from) else {
        return;
    };

    for &(d_file, d_rank) in directions {
        let mut cursor = from.offset(d_file, d_rank);
        while let Some(to) = cursor {
            match game_state.color_at(to) {
                None => out.push(Move::threat(from, to)),
                Some(color) if color == mover => break,
                Some(_) => {
                    out.push(Move::threat(from, to));
                    break;
                }
            }
            cursor = to.offset(d_file, d_rank);
        }
    }
}
