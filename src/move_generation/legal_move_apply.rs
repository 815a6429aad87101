//! Move application and its exact inverse.
//!
//! `apply_move` validates everything it needs before the first write, then
//! performs the ply and pushes an `UndoState` describing the diff.
//! `undo_move` consumes that record and restores the previous position field
//! for field, which is what the legality filter relies on.

use crate::chess_errors::{ChessErrors, PromotionFault};
use crate::game_state::chess_rules::{castle_path, rook_home_index, PROMOTION_CANDIDATES, KING_HOMES};
use crate::game_state::undo_state::MovedAt;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::valid_piece_moves;
use crate::moves::move_descriptions::Move;

/// Apply `mv`, optionally checking it against the legal move set first.
pub fn make_move(game_state: &mut GameState, mv: Move, validate: bool) -> Result<(), ChessErrors> {
    if !validate {
        return apply_move(game_state, mv);
    }

    // Apply the generator's fully tagged move so castles and en passant
    // requested as plain coordinates still relocate the rook or take the pawn.
    let legal = if game_state.is_color(mv.from, game_state.side_to_move) {
        valid_piece_moves(game_state, mv.from)
            .into_iter()
            .find(|legal| legal.same_play(&mv))
    } else {
        None
    };
    let legal = legal.ok_or(ChessErrors::IllegalMove {
        from: mv.from,
        to: mv.to,
    })?;
    apply_move(game_state, legal)
}

/// Validated move from coordinates, as a notation interpreter would request
/// it. Returns the fully tagged move that was applied.
pub fn play_move(
    game_state: &mut GameState,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> Result<Move, ChessErrors> {
    let candidates: Vec<Move> = if game_state.is_color(from, game_state.side_to_move) {
        valid_piece_moves(game_state, from)
            .into_iter()
            .filter(|mv| mv.to == to)
            .collect()
    } else {
        Vec::new()
    };
    if candidates.is_empty() {
        return Err(ChessErrors::IllegalMove { from, to });
    }

    let chosen = match promotion {
        None => candidates
            .iter()
            .find(|mv| mv.promotion.is_none())
            .copied()
            .ok_or(ChessErrors::IllegalPromotion(PromotionFault::MissingChoice))?,
        Some(kind) => {
            if !game_state.is_kind(from, PieceKind::Pawn) {
                return Err(ChessErrors::IllegalPromotion(PromotionFault::NotAPawn));
            }
            if to.rank() != game_state.side_to_move.promotion_rank() {
                return Err(ChessErrors::IllegalPromotion(PromotionFault::WrongRank));
            }
            candidates
                .iter()
                .find(|mv| mv.promotion == Some(kind))
                .copied()
                .ok_or(ChessErrors::IllegalPromotion(PromotionFault::UnsupportedPiece))?
        }
    };

    apply_move(game_state, chosen)?;
    Ok(chosen)
}

/// Apply `mv` without consulting the legal move set.
///
/// Structural problems (empty origin, bad promotion, missing castle rook or
/// en-passant victim) are reported before anything is written.
pub fn apply_move(game_state: &mut GameState, mv: Move) -> Result<(), ChessErrors> {
    let moved_piece = game_state
        .piece_at(mv.from)
        .ok_or(ChessErrors::NoPieceOnSquare(mv.from))?;
    let color = moved_piece.color;

    let promoted_to = match mv.promotion {
        Some(kind) => Some(check_promotion(moved_piece, kind, mv.to)?),
        None => None,
    };

    let castle_rook = match mv.castle {
        Some(side) if moved_piece.kind == PieceKind::King => {
            let path = castle_path(color, side);
            if game_state.piece_at(path.rook_from) != Some(Piece::new(PieceKind::Rook, color)) {
                return Err(ChessErrors::NoPieceOnSquare(path.rook_from));
            }
            Some(path)
        }
        _ => None,
    };

    let en_passant_square = match mv.en_passant_capture {
        Some(_) => {
            let beside = Square::new(mv.to.file(), mv.from.rank())
                .ok_or(ChessErrors::NoPieceOnSquare(mv.to))?;
            if game_state.color_at(beside) != Some(color.opposite()) {
                return Err(ChessErrors::NoPieceOnSquare(beside));
            }
            Some(beside)
        }
        None => None,
    };

    // Validation done; mutate from here on.
    let ply = game_state.history.len();
    let prev_markers = game_state.markers;

    match moved_piece.kind {
        PieceKind::Rook => {
            if let Some(index) = rook_home_index(mv.from) {
                mark_moved(&mut game_state.markers.rooks_moved[index], ply);
            }
        }
        PieceKind::King if mv.from == KING_HOMES[color.index()] => {
            mark_moved(&mut game_state.markers.kings_moved[color.index()], ply);
        }
        _ => {}
    }

    if let Some(path) = castle_rook {
        mark_moved(&mut game_state.markers.rooks_moved[path.rook_index], ply);
        game_state.markers.kings_castled[color.index()] = MovedAt::Ply(ply);
        game_state.relocate_piece(path.rook_from, path.rook_to);
    }

    let mut captured = game_state
        .relocate_piece(mv.from, mv.to)
        .map(|piece| (piece, mv.to));

    if let Some(beside) = en_passant_square {
        captured = game_state.clear_square(beside).map(|piece| (piece, beside));
    }
    if let Some(entry) = captured {
        game_state.captured_pieces.insert(ply, entry);
        // A rook taken on its corner loses its castling slot for good.
        if let (PieceKind::Rook, Some(index)) = (entry.0.kind, rook_home_index(entry.1)) {
            if index / 2 == entry.0.color.index() {
                mark_moved(&mut game_state.markers.rooks_moved[index], ply);
            }
        }
    }

    if let Some(piece) = promoted_to {
        game_state.place_piece(mv.to, piece);
        game_state.promoted_pieces.insert(ply, (piece, mv.to));
    }

    game_state.history.push(UndoState {
        mv,
        moved_piece,
        captured,
        castle_rook: castle_rook.map(|path| (path.rook_from, path.rook_to)),
        promoted_to,
        prev_markers,
    });
    game_state.side_to_move = color.opposite();

    Ok(())
}

/// Reverse the most recent ply. Returns the move that was undone.
pub fn undo_move(game_state: &mut GameState) -> Result<Move, ChessErrors> {
    let record = game_state.history.pop().ok_or(ChessErrors::NothingToUndo)?;
    let ply = game_state.history.len();

    game_state.side_to_move = record.moved_piece.color;
    game_state.markers = record.prev_markers;

    if let Some((rook_from, rook_to)) = record.castle_rook {
        game_state.relocate_piece(rook_to, rook_from);
    }

    if record.promoted_to.is_some() {
        game_state.place_piece(record.mv.to, record.moved_piece);
        game_state.promoted_pieces.remove(&ply);
    }

    game_state.relocate_piece(record.mv.to, record.mv.from);

    if let Some((piece, square)) = record.captured {
        game_state.place_piece(square, piece);
        game_state.captured_pieces.remove(&ply);
    }

    Ok(record.mv)
}

fn check_promotion(moved_piece: Piece, kind: PieceKind, to: Square) -> Result<Piece, ChessErrors> {
    if !PROMOTION_CANDIDATES.contains(&kind) {
        return Err(ChessErrors::IllegalPromotion(PromotionFault::UnsupportedPiece));
    }
    if moved_piece.kind != PieceKind::Pawn {
        return Err(ChessErrors::IllegalPromotion(PromotionFault::NotAPawn));
    }
    if to.rank() != moved_piece.color.promotion_rank() {
        return Err(ChessErrors::IllegalPromotion(PromotionFault::WrongRank));
    }
    Ok(Piece::new(kind, moved_piece.color))
}

#[inline]
fn mark_moved(marker: &mut MovedAt, ply: usize) {
    if marker.is_unmoved() {
        *marker = MovedAt::Ply(ply);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    #[test]
    fn illegal_move_leaves_board_untouched() {
        let mut game = GameState::new_game();
        let before = game.clone();
        let err = play_move(&mut game, sq("e2"), sq("e5"), None).expect_err("e2e5 is illegal");
        assert_eq!(
            err,
            ChessErrors::IllegalMove {
                from: sq("e2"),
                to: sq("e5")
            }
        );
        assert_eq!(game, before);
    }

    #[test]
    fn moving_the_opponents_piece_is_illegal() {
        let mut game = GameState::new_game();
        assert!(matches!(
            play_move(&mut game, sq("e7"), sq("e5"), None),
            Err(ChessErrors::IllegalMove { .. })
        ));
    }

    #[test]
    fn validated_make_move_rejects_unlisted_moves() {
        let mut game = GameState::new_game();
        let bogus = Move::threat(sq("d1"), sq("d5"));
        assert!(make_move(&mut game, bogus, true).is_err());
        assert_eq!(game.ply(), 0);

        let push = Move::quiet(sq("d2"), sq("d4"));
        make_move(&mut game, push, true).expect("d2d4 is legal");
        assert_eq!(game.side_to_move(), Color::Dark);
    }

    #[test]
    fn validated_plain_castle_moves_the_rook() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        make_move(&mut game, Move::quiet(sq("e1"), sq("g1")), true).expect("e1g1 is legal");
        assert_eq!(game.get_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");
        assert_eq!(
            game.last_move().map(|record| record.mv.castle),
            Some(Some(CastleSide::KingSide))
        );
    }

    #[test]
    fn validated_plain_en_passant_takes_the_pawn() {
        let mut game = GameState::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1")
            .expect("FEN should parse");
        play_move(&mut game, sq("d7"), sq("d5"), None).expect("d5 is legal");
        make_move(&mut game, Move::threat(sq("e5"), sq("d6")), true).expect("exd6 e.p. is legal");
        assert_eq!(game.get_fen(), "4k3/8/3P4/8/8/8/8/4K3 b - - 0 2");
        assert_eq!(game.captured_pieces(), vec![Piece::new(PieceKind::Pawn, Color::Dark)]);
    }

    #[test]
    fn capture_is_recorded_and_undone() {
        let mut game = GameState::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        let before = game.clone();

        play_move(&mut game, sq("e4"), sq("d5"), None).expect("exd5 is legal");
        assert_eq!(game.captured_pieces(), vec![Piece::new(PieceKind::Pawn, Color::Dark)]);
        assert_eq!(game.captured_ledger().get(&0), Some(&(Piece::new(PieceKind::Pawn, Color::Dark), sq("d5"))));
        assert_eq!(game.occupancy(Color::Dark), sq("e8").bit());

        undo_move(&mut game).expect("one ply to undo");
        assert_eq!(game, before);
    }

    #[test]
    fn castle_relocates_rook_and_sets_markers() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let before = game.clone();

        let applied = play_move(&mut game, sq("e1"), sq("c1"), None).expect("O-O-O is legal");
        assert_eq!(applied.castle, Some(CastleSide::QueenSide));
        assert!(game.is_kind(sq("d1"), PieceKind::Rook));
        assert!(game.is_empty(sq("a1")));
        assert_eq!(game.markers().kings_moved[Color::Light.index()], MovedAt::Ply(0));
        assert_eq!(game.markers().rooks_moved[0], MovedAt::Ply(0));
        assert_eq!(game.markers().kings_castled[Color::Light.index()], MovedAt::Ply(0));
        assert_eq!(game.markers().rooks_moved[1], MovedAt::Unmoved);

        undo_move(&mut game).expect("one ply to undo");
        assert_eq!(game, before);
    }

    #[test]
    fn castle_sequence_matches_known_fens() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        play_move(&mut game, sq("e1"), sq("c1"), None).expect("O-O-O is legal");
        assert_eq!(game.get_fen(), "r3k2r/8/8/8/8/8/8/2KR3R b kq - 1 1");
        play_move(&mut game, sq("e8"), sq("g8"), None).expect("O-O is legal");
        assert_eq!(game.get_fen(), "r4rk1/8/8/8/8/8/8/2KR3R w - - 2 2");
    }

    #[test]
    fn undoing_a_later_move_keeps_earlier_markers() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        play_move(&mut game, sq("h1"), sq("h2"), None).expect("Rh2 is legal");
        play_move(&mut game, sq("a8"), sq("a7"), None).expect("Ra7 is legal");
        play_move(&mut game, sq("h2"), sq("h1"), None).expect("Rh1 is legal");

        undo_move(&mut game).expect("Rh1 undo");
        assert_eq!(game.markers().rooks_moved[1], MovedAt::Ply(0));
        assert_eq!(game.markers().rooks_moved[2], MovedAt::Ply(1));
        assert!(!game.castling_rights().light_kingside);
    }

    #[test]
    fn capturing_a_home_rook_retires_its_slot() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let before = game.clone();

        play_move(&mut game, sq("a1"), sq("a8"), None).expect("Rxa8 is legal");
        assert_eq!(game.markers().rooks_moved[0], MovedAt::Ply(0));
        assert_eq!(game.markers().rooks_moved[2], MovedAt::Ply(0));
        assert_eq!(game.markers().rooks_moved[3], MovedAt::Unmoved);

        undo_move(&mut game).expect("Rxa8 undo");
        assert_eq!(game, before);
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let mut game = GameState::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1")
            .expect("FEN should parse");
        play_move(&mut game, sq("d7"), sq("d5"), None).expect("d5 is legal");
        let before = game.clone();

        let applied = play_move(&mut game, sq("e5"), sq("d6"), None).expect("exd6 e.p. is legal");
        assert_eq!(applied.en_passant_capture, Some(PieceKind::Pawn));
        assert!(game.is_empty(sq("d5")));
        assert!(game.is_kind(sq("d6"), PieceKind::Pawn));
        assert_eq!(game.captured_ledger().get(&1), Some(&(Piece::new(PieceKind::Pawn, Color::Dark), sq("d5"))));

        undo_move(&mut game).expect("e.p. undo");
        assert_eq!(game, before);
    }

    #[test]
    fn promotion_substitutes_piece_and_undoes() {
        let mut game = GameState::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        let before = game.clone();

        play_move(&mut game, sq("a7"), sq("b8"), Some(PieceKind::Knight)).expect("axb8=N is legal");
        assert_eq!(game.piece_at(sq("b8")), Some(Piece::new(PieceKind::Knight, Color::Light)));
        assert_eq!(game.promoted_ledger().get(&0), Some(&(Piece::new(PieceKind::Knight, Color::Light), sq("b8"))));
        assert_eq!(game.captured_pieces(), vec![Piece::new(PieceKind::Knight, Color::Dark)]);

        undo_move(&mut game).expect("promotion undo");
        assert_eq!(game, before);
    }

    #[test]
    fn promotion_errors_are_classified_without_mutation() {
        let mut game = GameState::from_fen("4k3/P7/8/8/8/8/4P3/4K3 w - - 0 1")
            .expect("FEN should parse");
        let before = game.clone();

        assert_eq!(
            play_move(&mut game, sq("a7"), sq("a8"), None),
            Err(ChessErrors::IllegalPromotion(PromotionFault::MissingChoice))
        );
        assert_eq!(
            play_move(&mut game, sq("a7"), sq("a8"), Some(PieceKind::King)),
            Err(ChessErrors::IllegalPromotion(PromotionFault::UnsupportedPiece))
        );
        assert_eq!(
            play_move(&mut game, sq("e2"), sq("e4"), Some(PieceKind::Queen)),
            Err(ChessErrors::IllegalPromotion(PromotionFault::WrongRank))
        );
        assert_eq!(
            play_move(&mut game, sq("e1"), sq("d1"), Some(PieceKind::Queen)),
            Err(ChessErrors::IllegalPromotion(PromotionFault::NotAPawn))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn unvalidated_bad_promotion_is_rejected_before_mutation() {
        let mut game = GameState::new_game();
        let before = game.clone();
        let mv = Move::quiet(sq("e2"), sq("e3")).with_promotion(PieceKind::Queen);
        assert_eq!(
            apply_move(&mut game, mv),
            Err(ChessErrors::IllegalPromotion(PromotionFault::WrongRank))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn apply_from_empty_square_fails() {
        let mut game = GameState::new_game();
        assert_eq!(
            apply_move(&mut game, Move::quiet(sq("e4"), sq("e5"))),
            Err(ChessErrors::NoPieceOnSquare(sq("e4")))
        );
    }

    #[test]
    fn undo_on_fresh_game_reports_nothing_to_undo() {
        let mut game = GameState::new_game();
        assert_eq!(undo_move(&mut game), Err(ChessErrors::NothingToUndo));
    }
}
