//! Derived classification of the side to move.

use std::fmt;

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::has_legal_move;
use crate::move_generation::threat_matrix::is_in_check;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Normal,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    #[inline]
    pub const fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameStatus::Normal => "normal",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        };
        f.write_str(text)
    }
}

/// Classify the position for the side to move. Draws by material or
/// repetition are not detected.
pub fn game_status(game_state: &mut GameState) -> GameStatus {
    let player = game_state.side_to_move();
    let in_check = is_in_check(game_state, player);
    let can_move = has_legal_move(game_state);

    match (in_check, can_move) {
        (false, true) => GameStatus::Normal,
        (true, true) => GameStatus::Check,
        (true, false) => GameStatus::Checkmate,
        (false, false) => GameStatus::Stalemate,
    }
}
