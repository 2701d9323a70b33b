//! Self-play demo: a random agent against a greedy one, printing the final
//! board and, when verbose, every `info string` line of the match.
//!
//! Usage:
//! `cargo run --release -- [max_plies] [seed]`
//! `PLYBOARD_VERBOSE=1 cargo run --release -- 120 7`

use std::env;

use plyboard::agents::agent_greedy::GreedyAgent;
use plyboard::agents::agent_random::RandomAgent;
use plyboard::chess_errors::ChessErrors;
use plyboard::utils::match_harness::{play_match, MatchConfig};
use plyboard::utils::render_board::render_board;

fn parse_arg<T: std::str::FromStr>(args: &[String], idx: usize, default: T) -> T {
    args.get(idx)
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}

fn main() -> Result<(), ChessErrors> {
    let args: Vec<String> = env::args().collect();
    let max_plies: u16 = parse_arg(&args, 1, 300u16);
    let seed: u64 = parse_arg(&args, 2, 1u64);
    let verbose = env::var("PLYBOARD_VERBOSE").is_ok_and(|v| v != "0" && !v.is_empty());

    let mut light = RandomAgent::seeded(seed);
    let mut dark = GreedyAgent::seeded(seed.wrapping_add(1));
    let config = MatchConfig {
        max_plies,
        ..MatchConfig::default()
    };
    let result = play_match(&mut light, &mut dark, &config)?;

    if verbose {
        for line in &result.log {
            println!("{line}");
        }
    }
    println!("{}", render_board(&result.final_board));
    println!(
        "outcome={:?} plies={} captured light={} dark={} wall_ms={}",
        result.outcome,
        result.plies(),
        result.captured_material[0],
        result.captured_material[1],
        result.wall_time().num_milliseconds()
    );
    println!("moves: {}", result.played_moves.join(" "));
    Ok(())
}
