//! King move generation: one-square steps from a precomputed table plus the
//! castling extension.

use crate::game_state::chess_rules::{castle_path, KING_HOMES};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::threat_matrix::is_square_threatened;
use crate::moves::move_descriptions::Move;

pub const KING_ATTACKS: [u64; 64] = generate_king_attacks();

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square.index()]
}

/// Steps and castles.
pub fn king_moves(game_state: &GameState, from: Square) -> Vec<Move> {
    let mut out = king_steps(game_state, from);
    castling_moves(game_state, from, &mut out);
    out
}

/// Adjacent squares not held by a friendly piece. Never includes castles, so
/// the threat engine can use it without recursing into itself.
pub fn king_steps(game_state: &GameState, from: Square) -> Vec<Move> {
    let Some(mover) = game_state.color_at(from) else {
        return Vec::new();
    };
    iter_squares(king_attacks(from) & !game_state.occupancy(mover))
        .map(|to| Move::threat(from, to))
        .collect()
}

fn castling_moves(game_state: &GameState, king_from: Square, out: &mut Vec<Move>) {
    let Some(king) = game_state.piece_at(king_from) else {
        return;
    };
    let color = king.color;
    if king.kind != PieceKind::King || king_from != KING_HOMES[color.index()] {
        return;
    }

    let mut candidates = Vec::with_capacity(2);
    for side in [CastleSide::KingSide, CastleSide::QueenSide] {
        let path = castle_path(color, side);
        if !game_state.castle_pieces_in_place(color, path.rook_index) {
            continue;
        }
        if path.must_be_empty.iter().any(|sq| !game_state.is_empty(*sq)) {
            continue;
        }
        if path
            .must_be_safe
            .iter()
            .any(|sq| is_square_threatened(game_state, color, *sq))
        {
            continue;
        }
        candidates.push(Move::castle(king_from, path.king_to, side));
    }

    // Cannot castle out of check.
    if candidates.is_empty() || is_square_threatened(game_state, color, king_from) {
        return;
    }
    out.extend(candidates);
}

const fn generate_king_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;

        attacks |= set_if_valid(file - 1, rank - 1);
        attacks |= set_if_valid(file, rank - 1);
        attacks |= set_if_valid(file + 1, rank - 1);
        attacks |= set_if_valid(file - 1, rank);
        attacks |= set_if_valid(file + 1, rank);
        attacks |= set_if_valid(file - 1, rank + 1);
        attacks |= set_if_valid(file, rank + 1);
        attacks |= set_if_valid(file + 1, rank + 1);

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn set_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }
    1u64 << ((rank as usize) * 8 + (file as usize))
}
