//! Static movement templates and values per piece kind.
//!
//! Templates are written in the piece's own frame (forward is +rank). Step
//! pieces list every offset; sliding pieces list ray directions, expanded at
//! compile time into seven repetitions of each unit vector.

use crate::game_state::chess_types::{Color, PieceKind};
use crate::moves::direction::Direction;

/// Longest possible slide on an 8x8 board.
pub const MAX_RAY_LENGTH: i8 = 7;

/// How a piece kind moves before special rules are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementTemplate {
    Steps(&'static [(i8, i8)]),
    Rays(&'static [Direction]),
}

const PAWN_STEPS: [(i8, i8); 1] = [(0, 1)];

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const BISHOP_ACTIONS: [(i8, i8); 28] = expand_rays(Direction::DIAGONAL);
const ROOK_ACTIONS: [(i8, i8); 28] = expand_rays(Direction::ORTHOGONAL);
const QUEEN_ACTIONS: [(i8, i8); 56] = expand_rays(Direction::ALL);

const PAWN_BLOCKER_DIRECTIONS: [Direction; 3] = [
    Direction::Forward,
    Direction::ForwardLeft,
    Direction::ForwardRight,
];

const fn expand_rays<const D: usize, const N: usize>(directions: [Direction; D]) -> [(i8, i8); N] {
    let mut out = [(0i8, 0i8); N];
    let mut d = 0;
    let mut idx = 0;
    while d < D {
        let (d_file, d_rank) = directions[d].unit();
        let mut step = 1;
        while step <= MAX_RAY_LENGTH {
            out[idx] = (d_file * step, d_rank * step);
            idx += 1;
            step += 1;
        }
        d += 1;
    }
    out
}

impl PieceKind {
    pub const fn template(self) -> MovementTemplate {
        match self {
            PieceKind::Pawn => MovementTemplate::Steps(&PAWN_STEPS),
            PieceKind::Knight => MovementTemplate::Steps(&KNIGHT_STEPS),
            PieceKind::King => MovementTemplate::Steps(&KING_STEPS),
            PieceKind::Bishop => MovementTemplate::Rays(&Direction::DIAGONAL),
            PieceKind::Rook => MovementTemplate::Rays(&Direction::ORTHOGONAL),
            PieceKind::Queen => MovementTemplate::Rays(&Direction::ALL),
        }
    }

    /// Every template action, rays already expanded.
    pub const fn actions(self) -> &'static [(i8, i8)] {
        match self {
            PieceKind::Pawn => &PAWN_STEPS,
            PieceKind::Knight => &KNIGHT_STEPS,
            PieceKind::King => &KING_STEPS,
            PieceKind::Bishop => &BISHOP_ACTIONS,
            PieceKind::Rook => &ROOK_ACTIONS,
            PieceKind::Queen => &QUEEN_ACTIONS,
        }
    }

    /// Directions tracked by the blocker resolver. Knights track none.
    pub const fn blocker_directions(self) -> &'static [Direction] {
        match self {
            PieceKind::Pawn => &PAWN_BLOCKER_DIRECTIONS,
            PieceKind::Knight => &[],
            PieceKind::Bishop => &Direction::DIAGONAL,
            PieceKind::Rook => &Direction::ORTHOGONAL,
            PieceKind::Queen | PieceKind::King => &Direction::ALL,
        }
    }

    #[inline]
    pub const fn is_blockable(self) -> bool {
        !matches!(self, PieceKind::Knight)
    }

    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Material value. The king's 1000 is a sentinel, not a real value.
    pub const fn value(self) -> u32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 10,
            PieceKind::King => 1000,
        }
    }

    /// Upper-case letter used in diagrams and move text.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// Plane index of a (color, kind) pair in the observation tensor.
///
/// Light uses 0..=5 and Dark 6..=11, both in pawn..king order.
#[inline]
pub const fn tensor_index(color: Color, kind: PieceKind) -> usize {
    color.index() * 6 + kind.index()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_templates_expand_to_seven_steps_per_direction() {
        assert_eq!(PieceKind::Rook.actions().len(), 28);
        assert_eq!(PieceKind::Bishop.actions().len(), 28);
        assert_eq!(PieceKind::Queen.actions().len(), 56);
        assert!(PieceKind::Rook.actions().contains(&(0, 7)));
        assert!(PieceKind::Bishop.actions().contains(&(-7, -7)));
        assert!(!PieceKind::Rook.actions().contains(&(1, 1)));
    }

    #[test]
    fn actions_follow_the_template() {
        for kind in PieceKind::ALL {
            match kind.template() {
                MovementTemplate::Steps(steps) => assert_eq!(steps, kind.actions(), "{kind:?}"),
                MovementTemplate::Rays(directions) => {
                    assert_eq!(kind.actions().len(), directions.len() * MAX_RAY_LENGTH as usize);
                    for dir in directions {
                        let (df, dr) = dir.unit();
                        for step in 1..=MAX_RAY_LENGTH {
                            assert!(kind.actions().contains(&(df * step, dr * step)), "{kind:?} {}", dir.name());
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn knight_steps_are_l_shaped() {
        for (df, dr) in PieceKind::Knight.actions() {
            assert_ne!(df.abs(), dr.abs());
            assert_eq!(df.abs() + dr.abs(), 3);
        }
    }

    #[test]
    fn tensor_indices_are_unique_per_color_and_kind() {
        let mut seen = [false; 12];
        for color in Color::BOTH {
            for kind in PieceKind::ALL {
                let idx = tensor_index(color, kind);
                assert!(!seen[idx]);
                seen[idx] = true;
            }
        }
        assert_eq!(tensor_index(Color::Light, PieceKind::Pawn), 0);
        assert_eq!(tensor_index(Color::Dark, PieceKind::King), 11);
    }

    #[test]
    fn only_knights_ignore_blockers() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.is_blockable(), !kind.blocker_directions().is_empty());
        }
    }
}
