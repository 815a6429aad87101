//! Threat engine.
//!
//! Counts, for every square, how many opponent pieces attack it. The same
//! walk answers check detection and castling safety; the bounded form stops
//! as soon as a single focus square is known to exceed a threshold.

use std::fmt;

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::pseudo_legal::threat_moves;

/// Attack counts per square from one player's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreatMatrix {
    counts: [u8; 64],
}

impl Default for ThreatMatrix {
    fn default() -> Self {
        Self { counts: [0; 64] }
    }
}

impl ThreatMatrix {
    #[inline]
    pub fn count(&self, square: Square) -> u8 {
        self.counts[square.index()]
    }

    #[inline]
    pub fn is_threatened(&self, square: Square) -> bool {
        self.count(square) > 0
    }

    pub fn threatened_squares(&self) -> impl Iterator<Item = Square> + '_ {
        (0..64u8)
            .filter_map(Square::from_index)
            .filter(|square| self.is_threatened(*square))
    }
}

/// Eight rows of counts, rank 8 first.
impl fmt::Display for ThreatMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            let row: Vec<String> = (0..8u8)
                .map(|file| self.count(Square::at(file, rank)).to_string())
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

/// Attacks on every square by the opponent of `player`.
pub fn compute_threat_matrix(game_state: &GameState, player: Color) -> ThreatMatrix {
    accumulate_threats(game_state, player, None)
}

/// Like `compute_threat_matrix`, but returns as soon as `focus` is attacked
/// more than `max_threats` times. Counts on other squares may be partial.
pub fn compute_threat_matrix_bounded(
    game_state: &GameState,
    player: Color,
    focus: Square,
    max_threats: u8,
) -> ThreatMatrix {
    accumulate_threats(game_state, player, Some((focus, max_threats)))
}

#[inline]
pub fn is_square_threatened(game_state: &GameState, player: Color, square: Square) -> bool {
    compute_threat_matrix_bounded(game_state, player, square, 0).is_threatened(square)
}

/// True iff `player`'s king stands on an attacked square. A side without a
/// king is never in check.
pub fn is_in_check(game_state: &GameState, player: Color) -> bool {
    game_state
        .king_square(player)
        .is_some_and(|king| is_square_threatened(game_state, player, king))
}

fn accumulate_threats(
    game_state: &GameState,
    player: Color,
    bound: Option<(Square, u8)>,
) -> ThreatMatrix {
    let mut matrix = ThreatMatrix::default();

    for from in game_state.player_pieces(player.opposite()) {
        for mv in threat_moves(game_state, from) {
            if !mv.is_threat {
                continue;
            }
            let slot = &mut matrix.counts[mv.to.index()];
            *slot = slot.saturating_add(1);

            if let Some((focus, max_threats)) = bound {
                if mv.to == focus && *slot > max_threats {
                    return matrix;
                }
            }
        }
    }

    matrix
}
