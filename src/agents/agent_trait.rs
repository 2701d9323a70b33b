//! Agent abstraction used by the match harness.
//!
//! An agent sees an `Observation` of the position, picks one of the legal
//! moves it was handed, answers promotion requests and is told about the
//! resulting transition so a learning policy can update itself.

use crate::agents::observation::{Observation, Transition};
use crate::game::promotion::PromotionRequest;
use crate::game_state::chess_types::PieceKind;
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Default)]
pub struct AgentOutput {
    /// `None` lets the harness fall back to the first legal move.
    pub chosen: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Agent: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn choose_move(&mut self, observation: &Observation) -> Result<AgentOutput, String>;

    fn choose_promotion(&mut self, _request: &PromotionRequest) -> Option<PieceKind> {
        Some(PieceKind::Queen)
    }

    fn observe_transition(&mut self, _transition: &Transition) {}
}
