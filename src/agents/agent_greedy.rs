use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::agents::agent_trait::{Agent, AgentOutput};
use crate::agents::observation::Observation;

/// Takes the most valuable capture on offer, breaking ties at random.
pub struct GreedyAgent {
    rng: StdRng,
}

impl GreedyAgent {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for GreedyAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for GreedyAgent {
    fn name(&self) -> &str {
        "greedy"
    }

    fn choose_move(&mut self, observation: &Observation) -> Result<AgentOutput, String> {
        let mut out = AgentOutput::default();
        out.info_lines.push(format!(
            "info string greedy_agent legal_moves {}",
            observation.legal_moves.len()
        ));
        if observation.legal_moves.is_empty() {
            return Ok(out);
        }

        let mut best_value = 0u32;
        let mut best_moves = Vec::new();
        for mv in &observation.legal_moves {
            let value = mv.captured_value();
            if value > best_value || best_moves.is_empty() {
                best_value = value;
                best_moves.clear();
                best_moves.push(*mv);
            } else if value == best_value {
                best_moves.push(*mv);
            }
        }

        let picked = best_moves
            .as_slice()
            .choose(&mut self.rng)
            .ok_or("failed to choose greedy best move")?;
        out.info_lines.push(format!(
            "info string greedy_agent capture_value {}",
            best_value
        ));
        out.chosen = Some(*picked);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_errors::ChessErrors;
    use crate::game::game::Game;
    use crate::game::game_config::GameConfig;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Color, PieceKind};

    #[test]
    fn takes_the_queen_over_the_pawn() -> Result<(), ChessErrors> {
        let board = Board::from_placements(&[
            (Color::Light, PieceKind::King, "a1"),
            (Color::Light, PieceKind::Knight, "d4"),
            (Color::Dark, PieceKind::King, "h8"),
            (Color::Dark, PieceKind::Pawn, "c6"),
            (Color::Dark, PieceKind::Queen, "e6"),
        ])?;
        let game = Game::from_board(board, GameConfig::default())?;
        let obs = Observation::from_game(&game);
        let mut agent = GreedyAgent::seeded(1);
        let out = agent.choose_move(&obs).map_err(ChessErrors::AgentFailure)?;
        let chosen = out.chosen.ok_or(ChessErrors::FailedTest)?;
        assert_eq!(chosen.long_algebraic(), "d4e6");
        assert_eq!(chosen.captured.map(|v| v.kind), Some(PieceKind::Queen));
        Ok(())
    }

    #[test]
    fn without_captures_any_legal_move_will_do() -> Result<(), ChessErrors> {
        let game = Game::new(GameConfig::default())?;
        let obs = Observation::from_game(&game);
        let out = GreedyAgent::seeded(5).choose_move(&obs).map_err(ChessErrors::AgentFailure)?;
        let chosen = out.chosen.ok_or(ChessErrors::FailedTest)?;
        assert!(obs.legal_moves.contains(&chosen));
        assert!(!chosen.is_capture());
        Ok(())
    }
}
