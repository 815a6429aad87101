//! Perft runner.
//!
//! Usage:
//! `cargo run --release --bin perft`
//! `cargo run --release --bin perft -- --depth 4 --threads 8`
//! `cargo run --release --bin perft -- --depth 3 --fen "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"`

use std::time::Instant;

use fianchetto::game_state::chess_rules::STARTING_POSITION_FEN;
use fianchetto::game_state::game_state::GameState;
use fianchetto::move_generation::perft::{perft_divide, perft_multi_threaded, PerftCounts};

fn arg_value(flag: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1).cloned())
}

fn parse_arg_u8(flag: &str, default: u8) -> u8 {
    arg_value(flag)
        .and_then(|v| v.parse::<u8>().ok())
        .map_or(default, |v| v.max(1))
}

fn parse_arg_usize(flag: &str, default: usize) -> usize {
    arg_value(flag)
        .and_then(|v| v.parse::<usize>().ok())
        .map_or(default, |v| v.max(1))
}

fn print_counts(counts: &PerftCounts) {
    println!(
        "nodes={} captures={} en_passant={} castles={} promotions={} checks={} checkmates={}",
        counts.nodes,
        counts.captures,
        counts.en_passant,
        counts.castles,
        counts.promotions,
        counts.checks,
        counts.checkmates
    );
}

fn main() -> Result<(), String> {
    let depth = parse_arg_u8("--depth", 4);
    let threads = parse_arg_usize("--threads", 1);
    let fen = arg_value("--fen").unwrap_or_else(|| STARTING_POSITION_FEN.to_owned());

    let mut game = GameState::from_fen(&fen).map_err(|e| e.to_string())?;
    println!("{game}");
    println!("fen={}", game.get_fen());
    println!("depth={depth} threads={threads}");

    let start = Instant::now();
    let total = if threads > 1 {
        perft_multi_threaded(&game, depth, threads)
    } else {
        let divided = perft_divide(&mut game, depth);
        let mut total = PerftCounts::default();
        for (mv, counts) in &divided {
            println!("{mv}: {}", counts.nodes);
            total.merge(*counts);
        }
        total
    };
    let elapsed = start.elapsed();

    print_counts(&total);
    let nps = total.nodes as f64 / elapsed.as_secs_f64().max(1e-9);
    println!("elapsed_ms={} nps={:.0}", elapsed.as_millis(), nps);
    Ok(())
}
