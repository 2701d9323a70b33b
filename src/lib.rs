//! Crate root module declarations for the plyboard chess rules engine.
//!
//! This file exposes the board model, move generation and legality, the
//! turn-based game state machine, the agent surface and utility helpers so
//! binaries, benches and external tooling can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod piece;
    pub mod side;
}

pub mod moves {
    pub mod chess_move;
    pub mod direction;
    pub mod piece_catalog;
}

pub mod move_generation {
    pub mod blockers;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_pawn;
    pub mod move_generator;
    pub mod perft;
}

pub mod game {
    pub mod game;
    pub mod game_config;
    pub mod promotion;
}

pub mod agents {
    pub mod agent_greedy;
    pub mod agent_random;
    pub mod agent_trait;
    pub mod observation;
}

pub mod utils {
    pub mod algebraic;
    pub mod match_harness;
    pub mod render_board;
}
