//! Pawn pushes, captures, en passant and promotion expansion.

use crate::game_state::chess_rules::PROMOTION_CANDIDATES;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::Move;

pub fn pawn_moves(game_state: &GameState, from: Square) -> Vec<Move> {
    let Some(color) = game_state.color_at(from) else {
        return Vec::new();
    };
    let direction = color.pawn_direction();
    let mut out = Vec::with_capacity(4);

    if let Some(one_step) = from.offset(0, direction) {
        if game_state.is_empty(one_step) {
            push_with_promotions(Move::quiet(from, one_step), color, &mut out);

            if from.rank() == color.pawn_start_rank() {
                if let Some(two_step) = from.offset(0, 2 * direction) {
                    if game_state.is_empty(two_step) {
                        out.push(Move::quiet(from, two_step));
                    }
                }
            }
        }
    }

    let en_passant_target = game_state.en_passant_target();
    for d_file in [-1i8, 1i8] {
        let Some(to) = from.offset(d_file, direction) else {
            continue;
        };
        match game_state.color_at(to) {
            Some(occupant) if occupant != color => {
                push_with_promotions(Move::threat(from, to), color, &mut out);
            }
            None if en_passant_target == Some(to) => {
                if let Some(victim) = en_passant_victim(game_state, color, from, to) {
                    out.push(Move::en_passant(from, to, victim.kind));
                }
            }
            _ => {}
        }
    }

    out
}

/// Diagonal squares the pawn attacks, whether or not anything stands there.
pub fn pawn_threats(game_state: &GameState, from: Square) -> Vec<Move> {
    let Some(color) = game_state.color_at(from) else {
        return Vec::new();
    };
    [-1i8, 1i8]
        .into_iter()
        .filter_map(|d_file| from.offset(d_file, color.pawn_direction()))
        .filter(|to| !game_state.is_color(*to, color))
        .map(|to| Move::threat(from, to))
        .collect()
}

/// Opposing pawn standing beside `from` on the file of `to`.
fn en_passant_victim(game_state: &GameState, color: Color, from: Square, to: Square) -> Option<Piece> {
    let beside = Square::new(to.file(), from.rank())?;
    game_state
        .piece_at(beside)
        .filter(|piece| piece.kind == PieceKind::Pawn && piece.color != color)
}

fn push_with_promotions(mv: Move, color: Color, out: &mut Vec<Move>) {
    if mv.to.rank() == color.promotion_rank() {
        out.extend(PROMOTION_CANDIDATES.iter().map(|kind| mv.with_promotion(*kind)));
    } else {
        out.push(mv);
    }
}
