use crate::game_state::chess_types::PieceKind;

/// Knobs for a single game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// How many times `Game::resolve_promotion` asks its chooser before
    /// giving up.
    pub promotion_query_limit: u32,
    /// Piece used once the query limit is reached. `None` leaves the
    /// promotion pending so the caller can keep asking.
    pub promotion_fallback: Option<PieceKind>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            promotion_query_limit: 64,
            promotion_fallback: Some(PieceKind::Queen),
        }
    }
}
