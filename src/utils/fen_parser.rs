//! FEN-to-GameState parser.
//!
//! Builds a position with its occupancy index, castling markers and loaded
//! clock context from a Forsyth-Edwards Notation string. Castling rights the
//! string withholds are recorded as pieces that moved before history began.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::CASTLE_PATHS;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::game_state::undo_state::MovedAt;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<GameState, ChessErrors> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| invalid("missing halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| invalid("missing fullmove number"))?;

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let mut game_state = GameState::empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    apply_castling_rights(castling_part, &mut game_state)?;
    game_state.initial_en_passant = parse_en_passant_square(en_passant_part)?;
    game_state.initial_halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("bad halfmove clock '{halfmove_part}'")))?;

    let fullmove = fullmove_part
        .parse::<usize>()
        .map_err(|_| invalid(&format!("bad fullmove number '{fullmove_part}'")))?;
    let dark_to_move = usize::from(game_state.side_to_move == Color::Dark);
    game_state.initial_ply = fullmove
        .saturating_sub(1)
        .checked_mul(2)
        .and_then(|plies| plies.checked_add(dark_to_move))
        .ok_or_else(|| invalid(&format!("fullmove number '{fullmove_part}' out of range")))?;

    Ok(game_state)
}

fn invalid(reason: &str) -> ChessErrors {
    ChessErrors::InvalidFen(reason.to_owned())
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> Result<(), ChessErrors> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("bad empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(invalid(&format!("rank {} has too many files", rank + 1)));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| invalid(&format!("bad piece character '{ch}'")))?;
            let square = Square::new(file, rank)
                .ok_or_else(|| invalid(&format!("rank {} has too many files", rank + 1)))?;
            game_state.place_piece(square, piece);
            file += 1;
        }

        if file != 8 {
            return Err(invalid(&format!("rank {} does not sum to 8 files", rank + 1)));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, ChessErrors> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(invalid(&format!("bad side to move '{side_part}'"))),
    }
}

fn apply_castling_rights(castling_part: &str, game_state: &mut GameState) -> Result<(), ChessErrors> {
    // Indexed like `ROOK_HOMES`: light queenside, light kingside, dark queenside, dark kingside.
    let mut granted = [false; 4];

    if castling_part != "-" {
        for ch in castling_part.chars() {
            let rook_index = match ch {
                'Q' => 0,
                'K' => 1,
                'q' => 2,
                'k' => 3,
                _ => return Err(invalid(&format!("bad castling character '{ch}'"))),
            };
            granted[rook_index] = true;
        }
    }

    for path in &CASTLE_PATHS {
        if !granted[path.rook_index] {
            game_state.markers.rooks_moved[path.rook_index] = MovedAt::BeforeHistory;
        }
    }
    for color in [Color::Light, Color::Dark] {
        let base = color.index() * 2;
        if !granted[base] && !granted[base + 1] {
            game_state.markers.kings_moved[color.index()] = MovedAt::BeforeHistory;
        }
    }

    Ok(())
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, ChessErrors> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| invalid(&format!("bad en-passant square '{en_passant_part}'")))?;
    if square.rank() != 2 && square.rank() != 5 {
        return Err(invalid(&format!("en-passant square '{en_passant_part}' off ranks 3 and 6")));
    }
    Ok(Some(square))
}
