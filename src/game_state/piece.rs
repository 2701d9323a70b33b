use crate::game_state::chess_types::{Color, PieceId, PieceKind, Square};

/// A chess piece owned by one side.
///
/// Identity, color and kind never change. `square` and `has_moved` are
/// updated by the board as moves are applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub color: Color,
    pub kind: PieceKind,
    pub square: Square,
    /// Only meaningful for pawns, rooks and kings. Never reset once set.
    pub has_moved: bool,
}

impl Piece {
    pub fn new(id: PieceId, color: Color, kind: PieceKind, square: Square) -> Self {
        Self {
            id,
            color,
            kind,
            square,
            has_moved: false,
        }
    }

    #[inline]
    pub fn value(&self) -> u32 {
        self.kind.value()
    }

    pub fn view(&self) -> PieceView {
        PieceView {
            id: self.id,
            color: self.color,
            kind: self.kind,
            square: self.square,
        }
    }
}

/// Read-only description of a piece handed to renderers and agents.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PieceView {
    pub id: PieceId,
    pub color: Color,
    pub kind: PieceKind,
    pub square: Square,
}
