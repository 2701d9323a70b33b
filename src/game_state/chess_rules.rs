//! Fixed chess constants: starting layout, castling geometry and the
//! promotion menu.

use crate::game_state::chess_types::PieceKind;

/// Back rank from file a to file h, identical for both colors.
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub const KING_HOME_FILE: i8 = 5;

/// Pieces a pawn may become on its last rank.
pub const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Knight,
    PieceKind::Rook,
    PieceKind::Bishop,
];

#[inline]
pub fn is_promotion_choice(kind: PieceKind) -> bool {
    PROMOTION_CHOICES.contains(&kind)
}

/// Wing on which a king castles, in board terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// Board file direction the king travels.
    #[inline]
    pub const fn sign(self) -> i8 {
        match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        }
    }

    /// File distance from the king to its castling rook.
    #[inline]
    pub const fn rook_offset(self) -> i8 {
        match self {
            CastleSide::Kingside => 3,
            CastleSide::Queenside => -4,
        }
    }

    /// Side matching a king's horizontal displacement of exactly two files.
    pub const fn from_king_delta(d_file: i8) -> Option<Self> {
        match d_file {
            2 => Some(CastleSide::Kingside),
            -2 => Some(CastleSide::Queenside),
            _ => None,
        }
    }
}
