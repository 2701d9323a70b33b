use std::fmt;

use crate::game_state::chess_rules::CastleSide;
use crate::game_state::chess_types::{Color, PieceId, PieceKind, Square};
use crate::game_state::piece::PieceView;

/// Special handling the applier must perform beyond relocating the mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveFlavor {
    Quiet,
    DoublePawnPush,
    Castle(CastleSide),
    /// Pawn reaching its last rank. The replacement is chosen afterwards.
    Promotion,
}

/// A (mover, target) pair with enough context to apply and describe it.
///
/// Two moves are equal when they share mover and target. Different pieces
/// aiming at the same square are distinct moves.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub piece: PieceId,
    pub color: Color,
    pub kind: PieceKind,
    pub from: Square,
    pub to: Square,
    pub captured: Option<PieceView>,
    pub flavor: MoveFlavor,
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.piece == other.piece && self.to == other.to
    }
}

impl Eq for Move {}

impl Move {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        matches!(self.flavor, MoveFlavor::Castle(_))
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.flavor == MoveFlavor::Promotion
    }

    /// Value of the captured piece, zero for quiet moves.
    pub fn captured_value(&self) -> u32 {
        self.captured.map(|victim| victim.kind.value()).unwrap_or(0)
    }

    /// Long algebraic text such as `e2e4`.
    pub fn long_algebraic(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{}{}{}", self.kind.letter(), self.from, separator, self.to)
    }
}
