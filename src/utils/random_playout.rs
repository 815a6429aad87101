use rand::seq::IndexedRandom;
use rand::Rng;

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::move_descriptions::Move;

/// Play uniformly random legal moves until the side to move has none or
/// `max_plies` moves have been made. Returns the moves in play order.
pub fn random_playout<R: Rng + ?Sized>(
    game_state: &mut GameState,
    max_plies: usize,
    rng: &mut R,
) -> Vec<Move> {
    let mut played = Vec::with_capacity(max_plies);

    while played.len() < max_plies {
        let moves = legal_moves(game_state);
        let Some(mv) = moves.choose(rng).copied() else {
            break;
        };
        if apply_move(game_state, mv).is_err() {
            break;
        }
        played.push(mv);
    }

    played
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::random_playout;
    use crate::game_state::chess_types::*;
    use crate::move_generation::game_status::GameStatus;

    const SEEDS: [u64; 6] = [1, 7, 42, 1234, 99_991, 0xC0FFEE];

    #[test]
    fn every_ply_undoes_to_the_exact_prior_state() {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut game = GameState::new_game();
            let mut snapshots = vec![game.clone()];

            for _ in 0..60 {
                if random_playout(&mut game, 1, &mut rng).is_empty() {
                    break;
                }
                snapshots.push(game.clone());
            }

            snapshots.pop();
            while let Some(expected) = snapshots.pop() {
                game.undo_move().expect("a ply is available to undo");
                assert_eq!(game, expected, "seed {seed} diverged on undo");
            }
            assert_eq!(game, GameState::new_game());
        }
    }

    #[test]
    fn no_played_move_leaves_the_mover_in_check() {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut game = GameState::new_game();
            for _ in 0..80 {
                let mover = game.side_to_move();
                if random_playout(&mut game, 1, &mut rng).is_empty() {
                    break;
                }
                assert!(!game.is_in_check(mover), "seed {seed}: mover left in check");
            }
        }
    }

    #[test]
    fn playout_stops_at_the_limit_or_a_finished_game() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut game = GameState::new_game();
        let played = random_playout(&mut game, 40, &mut rng);
        assert_eq!(game.ply(), played.len());
        if played.len() < 40 {
            assert!(game.game_status().is_over());
        }

        let mut mated = GameState::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .expect("FEN should parse");
        assert_eq!(mated.game_status(), GameStatus::Checkmate);
        assert!(random_playout(&mut mated, 10, &mut rng).is_empty());
    }

    #[test]
    fn loaded_positions_also_round_trip() {
        let fen = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut game = GameState::from_fen(fen).expect("FEN should parse");
            let start = game.clone();
            let played = random_playout(&mut game, 30, &mut rng);
            for _ in &played {
                game.undo_move().expect("a ply is available to undo");
            }
            assert_eq!(game, start);
            assert_eq!(game.get_fen(), fen);
        }
    }
}
