//! Legality filter.
//!
//! Each pseudo-legal candidate is applied to the board, the mover's king is
//! tested for check, and the candidate is undone. Only candidates that leave
//! the king safe survive.

use std::collections::BTreeMap;

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::pseudo_legal::pseudo_legal_moves;
use crate::move_generation::threat_matrix::is_in_check;
use crate::moves::move_descriptions::Move;

/// Legal moves of the piece on `square`, whichever side owns it.
pub fn valid_piece_moves(game_state: &mut GameState, square: Square) -> Vec<Move> {
    let Some(mover) = game_state.color_at(square) else {
        return Vec::new();
    };
    let candidates = pseudo_legal_moves(game_state, square);
    candidates
        .into_iter()
        .filter(|mv| leaves_king_safe(game_state, *mv, mover))
        .collect()
}

/// Legal moves of every piece of `player`, keyed by origin square. Pieces
/// without a legal move map to an empty list.
pub fn valid_moves_for_player(
    game_state: &mut GameState,
    player: Color,
) -> BTreeMap<Square, Vec<Move>> {
    let pieces: Vec<Square> = game_state.player_pieces(player).collect();
    pieces
        .into_iter()
        .map(|square| (square, valid_piece_moves(game_state, square)))
        .collect()
}

#[inline]
pub fn valid_moves(game_state: &mut GameState) -> BTreeMap<Square, Vec<Move>> {
    let player = game_state.side_to_move();
    valid_moves_for_player(game_state, player)
}

/// All legal moves of the side to move in one list.
pub fn legal_moves(game_state: &mut GameState) -> Vec<Move> {
    valid_moves(game_state).into_values().flatten().collect()
}

/// True if any legal move exists for the side to move; stops at the first.
pub fn has_legal_move(game_state: &mut GameState) -> bool {
    let player = game_state.side_to_move();
    let pieces: Vec<Square> = game_state.player_pieces(player).collect();
    pieces.into_iter().any(|square| {
        pseudo_legal_moves(game_state, square)
            .into_iter()
            .any(|mv| leaves_king_safe(game_state, mv, player))
    })
}

/// Simulate `mv`, test `mover`'s king, roll back. A candidate that cannot be
/// applied is treated as illegal.
fn leaves_king_safe(game_state: &mut GameState, mv: Move, mover: Color) -> bool {
    if apply_move(game_state, mv).is_err() {
        return false;
    }
    let safe = !is_in_check(game_state, mover);
    let undone = undo_move(game_state);
    debug_assert!(undone.is_ok(), "simulated ply must undo");
    safe
}
