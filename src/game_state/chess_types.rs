//! Core value types shared by the board, move generation and game layers.
//!
//! Squares are 1-based on both axes. `Color::Light` (white) starts on ranks
//! 1-2 and its forward axis is +rank; `Color::Dark` (black) starts on ranks
//! 7-8 and is mirrored through the board centre.

use std::fmt;

use crate::chess_errors::ChessErrors;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::Light, Color::Dark];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Sign of this color's forward axis along the ranks.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    /// Maps a vector from this color's own frame onto the board.
    ///
    /// Dark mirrors both axes. The mapping is its own inverse, so it also
    /// converts a board vector back into the piece's frame.
    #[inline]
    pub const fn orient(self, vector: (i8, i8)) -> (i8, i8) {
        match self {
            Color::Light => vector,
            Color::Dark => (-vector.0, -vector.1),
        }
    }

    #[inline]
    pub const fn home_rank(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => 8,
        }
    }

    #[inline]
    pub const fn pawn_rank(self) -> i8 {
        match self {
            Color::Light => 2,
            Color::Dark => 7,
        }
    }

    /// The rank farthest from this color's own back rank.
    #[inline]
    pub const fn promotion_rank(self) -> i8 {
        match self {
            Color::Light => 8,
            Color::Dark => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::Light => "white",
            Color::Dark => "black",
        }
    }
}

/// Piece kind (color is stored separately on the piece).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Pawns, rooks and kings carry a first-move flag.
    #[inline]
    pub const fn tracks_first_move(self) -> bool {
        matches!(self, PieceKind::Pawn | PieceKind::Rook | PieceKind::King)
    }
}

/// Identity of a piece for its whole life on the board.
///
/// A promoted piece receives a new id; the pawn's id disappears with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Board coordinate with both axes in `1..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: i8,
    rank: i8,
}

impl Square {
    pub fn new(file: i8, rank: i8) -> Result<Self, ChessErrors> {
        if Self::in_bounds(file, rank) {
            Ok(Self { file, rank })
        } else {
            Err(ChessErrors::InvalidSquare(file, rank))
        }
    }

    /// Caller guarantees both coordinates are on the board.
    #[inline]
    pub(crate) const fn at(file: i8, rank: i8) -> Self {
        Self { file, rank }
    }

    #[inline]
    pub const fn in_bounds(file: i8, rank: i8) -> bool {
        file >= 1 && file <= 8 && rank >= 1 && rank <= 8
    }

    #[inline]
    pub const fn file(self) -> i8 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> i8 {
        self.rank
    }

    /// Zero-based index, `0 == a1`, `63 == h8`.
    #[inline]
    pub const fn index(self) -> usize {
        ((self.rank - 1) as usize) * 8 + (self.file - 1) as usize
    }

    /// Square reached by a board vector, or `None` when it leaves the board.
    #[inline]
    pub fn offset(self, (d_file, d_rank): (i8, i8)) -> Option<Square> {
        let file = self.file + d_file;
        let rank = self.rank + d_rank;
        Self::in_bounds(file, rank).then_some(Square { file, rank })
    }

    /// Board vector from `self` to `other`.
    #[inline]
    pub const fn delta_to(self, other: Square) -> (i8, i8) {
        (other.file - self.file, other.rank - self.rank)
    }

    /// All 64 squares, a1 first, rank by rank.
    pub fn all() -> impl Iterator<Item = Square> {
        (1..=8).flat_map(|rank| (1..=8).map(move |file| Square { file, rank }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file_char = char::from(b'a' + (self.file - 1) as u8);
        write!(f, "{file_char}{}", self.rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_orientation_mirrors_both_axes_and_is_an_involution() {
        assert_eq!(Color::Dark.orient((1, 2)), (-1, -2));
        assert_eq!(Color::Dark.orient(Color::Dark.orient((1, 2))), (1, 2));
        assert_eq!(Color::Light.orient((1, 2)), (1, 2));
    }

    #[test]
    fn squares_reject_off_board_coordinates() {
        assert!(Square::new(0, 4).is_err());
        assert!(Square::new(4, 9).is_err());
        let e4 = Square::new(5, 4).expect("e4 is on the board");
        assert_eq!(e4.to_string(), "e4");
        assert_eq!(e4.offset((4, 0)), None);
        assert_eq!(e4.offset((3, 4)).map(|s| s.to_string()), Some("h8".to_owned()));
    }

    #[test]
    fn square_indices_cover_the_board_once() {
        let mut seen = [false; 64];
        for square in Square::all() {
            assert!(!seen[square.index()]);
            seen[square.index()] = true;
        }
        assert!(seen.iter().all(|x| *x));
    }

    #[test]
    fn promotion_rank_is_farthest_from_home() {
        for color in Color::BOTH {
            assert_eq!((color.promotion_rank() - color.home_rank()).abs(), 7);
        }
    }
}
