//! Perft node counts for the reference positions, with per-move divide.
//!
//! Usage:
//! `cargo run --release --bin perft_report -- [depth] [divide]`

use std::env;
use std::time::Instant;

use plyboard::chess_errors::ChessErrors;
use plyboard::game_state::board::Board;
use plyboard::move_generation::perft::{perft, perft_divide};

fn parse_arg<T: std::str::FromStr>(args: &[String], idx: usize, default: T) -> T {
    args.get(idx)
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}

const POSITIONS: &[(&str, &str)] = &[
    (
        "startpos",
        "
        rnbqkbnr
        pppppppp
        ........
        ........
        ........
        ........
        PPPPPPPP
        RNBQKBNR
        ",
    ),
    (
        "kiwipete",
        "
        r...k..r
        p.ppqpb.
        bn..pnp.
        ...PN...
        .p..P...
        ..N..Q.p
        PPPBBPPP
        R...K..R
        ",
    ),
    (
        "rook_endgame",
        "
        ........
        ..p.....
        ...p....
        KP.....r
        .R...p.k
        ........
        ....P.P.
        ........
        ",
    ),
];

fn main() -> Result<(), ChessErrors> {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = parse_arg(&args, 1, 3u8).max(1);
    let divide: bool = parse_arg(&args, 2, false);

    for (name, diagram) in POSITIONS {
        let board = Board::from_diagram(diagram)?;
        let started = Instant::now();
        let counts = perft(&board, depth)?;
        let elapsed = started.elapsed();
        let nps = counts.nodes as f64 / elapsed.as_secs_f64().max(1e-9);
        println!(
            "{name} depth={depth} nodes={} captures={} castles={} promotions={} checks={} mates={} time_ms={} nps={nps:.0}",
            counts.nodes,
            counts.captures,
            counts.castles,
            counts.promotions,
            counts.checks,
            counts.checkmates,
            elapsed.as_millis(),
        );

        if divide {
            for (mv, sub) in perft_divide(&board, depth)? {
                println!("  {}: {}", mv.long_algebraic(), sub.nodes);
            }
        }
    }
    Ok(())
}
