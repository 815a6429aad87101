use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::square_to_algebraic;

/// Serialize the position using only the state's public read accessors.
pub fn generate_fen(game_state: &GameState) -> String {
    let board = generate_board_field(game_state);
    let side_to_move = match game_state.side_to_move() {
        Color::Light => "w",
        Color::Dark => "b",
    };
    let castling = generate_castling_field(game_state);
    let en_passant = game_state
        .en_passant_target()
        .map_or_else(|| "-".to_owned(), square_to_algebraic);

    format!(
        "{} {} {} {} {} {}",
        board,
        side_to_move,
        castling,
        en_passant,
        game_state.halfmove_clock(),
        game_state.fullmove_number()
    )
}

fn generate_board_field(game_state: &GameState) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            match game_state.piece_at(Square::at(file, rank)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(game_state: &GameState) -> String {
    let rights = game_state.castling_rights();
    let mut out = String::new();

    if rights.light_kingside {
        out.push('K');
    }
    if rights.light_queenside {
        out.push('Q');
    }
    if rights.dark_kingside {
        out.push('k');
    }
    if rights.dark_queenside {
        out.push('q');
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    #[test]
    fn starting_position_round_trips() {
        let game = GameState::new_game();
        assert_eq!(generate_fen(&game), STARTING_POSITION_FEN);
    }

    #[test]
    fn custom_position_round_trips() {
        let fen = "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b kq - 4 6";
        let parsed = GameState::from_fen(fen).expect("custom FEN should parse");
        assert_eq!(generate_fen(&parsed), fen);
        assert_eq!(parsed.side_to_move(), Color::Dark);
    }

    #[test]
    fn played_moves_update_every_field() {
        let mut game = GameState::new_game();
        game.play_move(sq("e2"), sq("e4"), None).expect("e4 is legal");
        assert_eq!(
            game.get_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );

        game.play_move(sq("g8"), sq("f6"), None).expect("Nf6 is legal");
        game.play_move(sq("e1"), sq("e2"), None).expect("Ke2 is legal");
        assert_eq!(
            game.get_fen(),
            "rnbqkb1r/pppppppp/5n2/8/4P3/8/PPPPKPPP/RNBQ1BNR b kq - 2 2"
        );
    }

    #[test]
    fn captured_home_rook_drops_the_right() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        game.play_move(sq("a1"), sq("a8"), None).expect("Rxa8 is legal");
        assert_eq!(game.get_fen(), "R3k2r/8/8/8/8/8/8/4K2R b Kk - 0 1");
    }
}
