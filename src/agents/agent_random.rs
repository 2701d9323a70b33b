//! Uniform random agent, seedable for reproducible matches.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::agents::agent_trait::{Agent, AgentOutput};
use crate::agents::observation::Observation;
use crate::game::promotion::PromotionRequest;
use crate::game_state::chess_rules::PROMOTION_CHOICES;
use crate::game_state::chess_types::PieceKind;

pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, observation: &Observation) -> Result<AgentOutput, String> {
        let mut out = AgentOutput::default();
        out.info_lines.push(format!(
            "info string random_agent legal_moves {}",
            observation.legal_moves.len()
        ));
        if observation.legal_moves.is_empty() {
            return Ok(out);
        }

        let picked = observation
            .legal_moves
            .as_slice()
            .choose(&mut self.rng)
            .ok_or("failed to choose a random move")?;
        out.chosen = Some(*picked);
        Ok(out)
    }

    fn choose_promotion(&mut self, _request: &PromotionRequest) -> Option<PieceKind> {
        PROMOTION_CHOICES.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_errors::ChessErrors;
    use crate::game::game::Game;
    use crate::game::game_config::GameConfig;

    #[test]
    fn picks_a_legal_move() -> Result<(), ChessErrors> {
        let game = Game::new(GameConfig::default())?;
        let obs = Observation::from_game(&game);
        let mut agent = RandomAgent::seeded(7);
        let out = agent.choose_move(&obs).map_err(ChessErrors::AgentFailure)?;
        let chosen = out.chosen.ok_or(ChessErrors::FailedTest)?;
        assert!(obs.legal_moves.contains(&chosen));
        assert_eq!(out.info_lines.len(), 1);
        Ok(())
    }

    #[test]
    fn same_seed_same_choices() -> Result<(), ChessErrors> {
        let game = Game::new(GameConfig::default())?;
        let obs = Observation::from_game(&game);
        let (mut a, mut b) = (RandomAgent::seeded(99), RandomAgent::seeded(99));
        for _ in 0..10 {
            let left = a.choose_move(&obs).map_err(ChessErrors::AgentFailure)?.chosen;
            let right = b.choose_move(&obs).map_err(ChessErrors::AgentFailure)?.chosen;
            assert_eq!(left.map(|mv| mv.long_algebraic()), right.map(|mv| mv.long_algebraic()));
        }
        Ok(())
    }

    #[test]
    fn promotion_choice_is_always_valid() {
        let mut agent = RandomAgent::seeded(3);
        let request = PromotionRequest {
            pawn: crate::game_state::chess_types::PieceId(0),
            color: crate::game_state::chess_types::Color::Light,
            square: crate::game_state::chess_types::Square::new(1, 8).expect("a8 is on the board"),
        };
        for _ in 0..20 {
            let kind = agent.choose_promotion(&request);
            assert!(kind.is_some_and(crate::game_state::chess_rules::is_promotion_choice));
        }
    }
}
