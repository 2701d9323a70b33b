//! The promotion collaborator: whoever picks the replacement piece when a
//! pawn reaches its last rank.

use crate::game_state::chess_types::{Color, PieceId, PieceKind, Square};

/// A pawn waiting on its last rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionRequest {
    pub pawn: PieceId,
    pub color: Color,
    pub square: Square,
}

/// Answers promotion requests. `None` means "not decided yet"; the game
/// asks again until its query limit.
pub trait PromotionChooser {
    fn choose(&mut self, request: &PromotionRequest) -> Option<PieceKind>;
}

/// Always answers with the same piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPromotion(pub PieceKind);

impl Default for FixedPromotion {
    fn default() -> Self {
        Self(PieceKind::Queen)
    }
}

impl PromotionChooser for FixedPromotion {
    fn choose(&mut self, _request: &PromotionRequest) -> Option<PieceKind> {
        Some(self.0)
    }
}

impl<F> PromotionChooser for F
where
    F: FnMut(&PromotionRequest) -> Option<PieceKind>,
{
    fn choose(&mut self, request: &PromotionRequest) -> Option<PieceKind> {
        self(request)
    }
}
