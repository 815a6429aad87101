//! Crate root module declarations for the Fianchetto chess rules engine.
//!
//! This file exposes the board state, the per-piece move generators, the
//! threat engine and legality filter, and the FEN / notation helpers so
//! binaries, benches, and callers such as a search component can import
//! stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod game_status;
    pub mod legal_move_apply;
    pub mod legal_move_generator;
    pub mod perft;
    pub mod pseudo_legal;
    pub mod threat_matrix;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod random_playout;
    pub mod render_game_state;
}
