use std::panic;
use std::thread;

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_generator::{has_legal_move, legal_moves};
use crate::move_generation::threat_matrix::is_in_check;
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    pub fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Count leaf positions `depth` plies below `game_state`, with move-kind
/// tallies for the final ply. The state is walked with apply/undo and comes
/// back unchanged.
pub fn perft(game_state: &mut GameState, depth: u8) -> PerftCounts {
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return total;
    }
    perft_recurse(game_state, depth, &mut total);
    total
}

/// Per-root-move node counts, in generation order.
pub fn perft_divide(game_state: &mut GameState, depth: u8) -> Vec<(Move, PerftCounts)> {
    if depth == 0 {
        return Vec::new();
    }
    let root_moves = legal_moves(game_state);
    let mut out = Vec::with_capacity(root_moves.len());
    for mv in root_moves {
        let mut local = PerftCounts::default();
        if apply_move(game_state, mv).is_err() {
            continue;
        }
        if depth == 1 {
            tally_leaf(game_state, &mut local);
        } else {
            perft_recurse(game_state, depth - 1, &mut local);
        }
        let undone = undo_move(game_state);
        debug_assert!(undone.is_ok(), "applied ply must undo");
        out.push((mv, local));
    }
    out
}

/// Same counts as `perft`, with the root moves split across `threads`
/// workers. Each worker owns a private clone of the position.
pub fn perft_multi_threaded(game_state: &GameState, depth: u8, threads: usize) -> PerftCounts {
    if depth <= 1 || threads <= 1 {
        return perft(&mut game_state.clone(), depth);
    }

    let mut root_state = game_state.clone();
    let root_moves = legal_moves(&mut root_state);
    let worker_count = threads.min(root_moves.len()).max(1);
    let mut buckets: Vec<Vec<Move>> = vec![Vec::new(); worker_count];
    for (index, mv) in root_moves.into_iter().enumerate() {
        buckets[index % worker_count].push(mv);
    }

    let mut handles = Vec::with_capacity(worker_count);
    for bucket in buckets {
        let mut worker_state = game_state.clone();
        handles.push(thread::spawn(move || {
            let mut local = PerftCounts::default();
            for mv in bucket {
                if apply_move(&mut worker_state, mv).is_err() {
                    continue;
                }
                perft_recurse(&mut worker_state, depth - 1, &mut local);
                let undone = undo_move(&mut worker_state);
                debug_assert!(undone.is_ok(), "applied ply must undo");
            }
            local
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        match handle.join() {
            Ok(local) => total.merge(local),
            Err(payload) => panic::resume_unwind(payload),
        }
    }
    total
}

fn perft_recurse(game_state: &mut GameState, depth: u8, counts: &mut PerftCounts) {
    for mv in legal_moves(game_state) {
        if apply_move(game_state, mv).is_err() {
            continue;
        }
        if depth == 1 {
            tally_leaf(game_state, counts);
        } else {
            perft_recurse(game_state, depth - 1, counts);
        }
        let undone = undo_move(game_state);
        debug_assert!(undone.is_ok(), "applied ply must undo");
    }
}

/// Classify the ply just applied.
fn tally_leaf(game_state: &mut GameState, counts: &mut PerftCounts) {
    counts.nodes += 1;
    let Some(last) = game_state.last_move() else {
        return;
    };
    if last.is_capture() {
        counts.captures += 1;
    }
    if last.mv.en_passant_capture.is_some() {
        counts.en_passant += 1;
    }
    if last.mv.castle.is_some() {
        counts.castles += 1;
    }
    if last.promoted_to.is_some() {
        counts.promotions += 1;
    }

    let defender = game_state.side_to_move();
    if is_in_check(game_state, defender) {
        counts.checks += 1;
        if !has_legal_move(game_state) {
            counts.checkmates += 1;
        }
    }
}
