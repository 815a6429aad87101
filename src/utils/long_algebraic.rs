use crate::chess_errors::ChessErrors;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::algebraic_to_square;

/// Split `e2e4` / `e7e8q` into origin, destination and promotion kind.
///
/// Only the shape is checked here; whether the promotion kind is allowed is
/// decided when the move is played.
pub fn parse_long_algebraic(text: &str) -> Result<(Square, Square, Option<PieceKind>), ChessErrors> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessErrors::InvalidAlgebraic(text.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(letter) => Some(
            PieceKind::from_letter(letter)
                .ok_or_else(|| ChessErrors::InvalidAlgebraic(text.to_owned()))?,
        ),
    };

    Ok((from, to, promotion))
}

/// Parse `text` and play it as the side to move.
pub fn play_long_algebraic(game_state: &mut GameState, text: &str) -> Result<Move, ChessErrors> {
    let (from, to, promotion) = parse_long_algebraic(text)?;
    game_state.play_move(from, to, promotion)
}

#[cfg(test)]
mod tests {
    use super::{parse_long_algebraic, play_long_algebraic};
    use crate::chess_errors::{ChessErrors, PromotionFault};
    use crate::game_state::chess_types::*;

    #[test]
    fn parses_plain_and_promotion_moves() {
        let (from, to, promotion) = parse_long_algebraic("e2e4").expect("e2e4 should parse");
        assert_eq!((from.to_string(), to.to_string(), promotion), ("e2".to_owned(), "e4".to_owned(), None));

        let (_, to, promotion) = parse_long_algebraic("a7a8Q").expect("a7a8Q should parse");
        assert_eq!(to, Square::at(0, 7));
        assert_eq!(promotion, Some(PieceKind::Queen));
    }

    #[test]
    fn rejects_malformed_text() {
        for text in ["", "e2", "e2e", "e2e9", "i2e4", "e7e8x", "e7e8qq", "é2e4"] {
            assert!(
                matches!(parse_long_algebraic(text), Err(ChessErrors::InvalidAlgebraic(_))),
                "should reject '{text}'"
            );
        }
    }

    #[test]
    fn plays_a_short_opening() {
        let mut game = GameState::new_game();
        for text in ["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1"] {
            play_long_algebraic(&mut game, text).expect("opening move should be legal");
        }
        assert_eq!(
            game.get_fen(),
            "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 b kq - 5 4"
        );
    }

    #[test]
    fn promotion_choice_is_checked_when_played() {
        let mut game = GameState::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse");
        assert_eq!(
            play_long_algebraic(&mut game, "a7a8k"),
            Err(ChessErrors::IllegalPromotion(PromotionFault::UnsupportedPiece))
        );
        let mv = play_long_algebraic(&mut game, "a7a8n").expect("knight promotion is legal");
        assert_eq!(mv.to_string(), "a7a8n");
        assert_eq!(
            game.piece_at(Square::at(0, 7)),
            Some(Piece::new(PieceKind::Knight, Color::Light))
        );
    }

    #[test]
    fn illegal_move_leaves_the_game_untouched() {
        let mut game = GameState::new_game();
        let before = game.clone();
        assert!(matches!(
            play_long_algebraic(&mut game, "e2e5"),
            Err(ChessErrors::IllegalMove { .. })
        ));
        assert_eq!(game, before);
    }
}
