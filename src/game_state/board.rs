//! Board state: both sides' piece sets, an occupancy grid and the counters
//! that drive turn order and cache invalidation.
//!
//! The side piece sets are the source of truth. The 64-entry grid is a mirror
//! kept in lockstep by every mutating call so that `piece_at` is O(1).
//!
//! Two counters live here:
//! - `ply` counts completed plies. It only moves forward and flips the side
//!   to move.
//! - `revision` changes on every mutation, including the temporary
//!   relocations done while testing a move for legality. Revisions are drawn
//!   from a process-wide counter so two cloned boards that diverge never
//!   share a revision. Derived caches stamp themselves with it.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::{BACK_RANK, KING_HOME_FILE};
use crate::game_state::chess_types::{Color, PieceId, PieceKind, Square};
use crate::game_state::piece::Piece;
use crate::game_state::side::Side;

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn fresh_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone)]
pub struct Board {
    sides: [Side; 2],
    grid: [Option<(Color, PieceId)>; 64],
    to_move: Color,
    ply: u32,
    revision: u64,
    next_id: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// A board with no pieces. Mostly useful for building test positions.
    pub fn empty() -> Self {
        Self {
            sides: [Side::new(Color::Light), Side::new(Color::Dark)],
            grid: [None; 64],
            to_move: Color::Light,
            ply: 0,
            revision: fresh_revision(),
            next_id: 0,
        }
    }

    /// The standard starting position.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for color in Color::BOTH {
            for (file_idx, kind) in BACK_RANK.iter().enumerate() {
                let square = Square::at(file_idx as i8 + 1, color.home_rank());
                board.insert_unchecked(color, *kind, square, false);
            }
            for file in 1..=8 {
                board.insert_unchecked(color, PieceKind::Pawn, Square::at(file, color.pawn_rank()), false);
            }
        }
        board
    }

    /// Puts the standard starting position back, ply zero.
    pub fn reset(&mut self) {
        *self = Self::standard();
    }

    /// Builds a position from `(color, kind, "e4")` triples.
    ///
    /// Pawns, rooks and kings away from their starting squares are marked as
    /// having moved.
    pub fn from_placements(placements: &[(Color, PieceKind, &str)]) -> Result<Self, ChessErrors> {
        let mut board = Self::empty();
        for (color, kind, text) in placements {
            let square = crate::utils::algebraic::parse_square(text)?;
            let moved = !starts_unmoved(*color, *kind, square);
            board.place_with_flag(*color, *kind, square, moved)?;
        }
        Ok(board)
    }

    /// Builds a position from eight rows of piece letters, rank 8 first.
    ///
    /// Uppercase letters are white, lowercase black, `.` is empty. Spaces
    /// inside a row are ignored, so both `rnbqkbnr` and `r n b q k b n r`
    /// work.
    pub fn from_diagram(diagram: &str) -> Result<Self, ChessErrors> {
        let rows: Vec<Vec<char>> = diagram
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();
        if rows.len() != 8 {
            return Err(ChessErrors::InvalidDiagram(format!(
                "expected 8 rows, found {}",
                rows.len()
            )));
        }

        let mut board = Self::empty();
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != 8 {
                return Err(ChessErrors::InvalidDiagram(format!(
                    "row {} has {} squares",
                    row_idx + 1,
                    row.len()
                )));
            }
            let rank = 8 - row_idx as i8;
            for (file_idx, ch) in row.iter().enumerate() {
                if *ch == '.' {
                    continue;
                }
                let (color, kind) = piece_from_letter(*ch)
                    .ok_or_else(|| ChessErrors::InvalidDiagram(format!("unknown piece '{ch}'")))?;
                let square = Square::at(file_idx as i8 + 1, rank);
                let moved = !starts_unmoved(color, kind, square);
                board.place_with_flag(color, kind, square, moved)?;
            }
        }
        Ok(board)
    }

    /// Completed plies. A fresh or reset board is at 0; the first move
    /// played is ply 1, so add one when showing the move in progress.
    #[inline]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.to_move
    }

    /// Hands the move to `color`. Only meant for setting up positions.
    pub fn set_side_to_move(&mut self, color: Color) {
        if self.to_move != color {
            self.to_move = color;
            self.revision = fresh_revision();
        }
    }

    /// Rewinds the revision after a temporary change has been fully undone.
    ///
    /// The caller must guarantee the board is identical to the one that
    /// carried `revision`.
    pub(crate) fn restore_revision(&mut self, revision: u64) {
        self.revision = revision;
    }

    #[inline]
    pub fn side(&self, color: Color) -> &Side {
        &self.sides[color.index()]
    }

    /// Pieces of both colors, light first.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.sides.iter().flat_map(|side| side.pieces().iter())
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.sides.iter().find_map(|side| side.get(id))
    }

    /// The piece of either color on `square`.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        let (color, id) = self.grid[square.index()]?;
        self.sides[color.index()].get(id)
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.grid[square.index()].is_some()
    }

    #[inline]
    pub fn is_occupied_by_own(&self, square: Square, color: Color) -> bool {
        matches!(self.grid[square.index()], Some((owner, _)) if owner == color)
    }

    #[inline]
    pub fn is_occupied_by_enemy(&self, square: Square, color: Color) -> bool {
        matches!(self.grid[square.index()], Some((owner, _)) if owner != color)
    }

    pub fn king(&self, color: Color) -> Result<&Piece, ChessErrors> {
        self.side(color).king().ok_or(ChessErrors::MissingKing(color))
    }

    /// Adds a fresh, unmoved piece.
    pub fn place(&mut self, color: Color, kind: PieceKind, square: Square) -> Result<PieceId, ChessErrors> {
        self.place_with_flag(color, kind, square, false)
    }

    pub(crate) fn place_with_flag(
        &mut self,
        color: Color,
        kind: PieceKind,
        square: Square,
        has_moved: bool,
    ) -> Result<PieceId, ChessErrors> {
        if self.is_occupied(square) {
            return Err(ChessErrors::SquareCollision(square));
        }
        Ok(self.insert_unchecked(color, kind, square, has_moved))
    }

    fn insert_unchecked(&mut self, color: Color, kind: PieceKind, square: Square, has_moved: bool) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        let mut piece = Piece::new(id, color, kind, square);
        piece.has_moved = has_moved;
        self.sides[color.index()].insert(piece);
        self.grid[square.index()] = Some((color, id));
        self.revision = fresh_revision();
        id
    }

    /// Puts a previously removed piece back with its original identity.
    pub(crate) fn reinsert(&mut self, piece: Piece) -> Result<(), ChessErrors> {
        if self.is_occupied(piece.square) {
            return Err(ChessErrors::SquareCollision(piece.square));
        }
        self.sides[piece.color.index()].insert(piece);
        self.grid[piece.square.index()] = Some((piece.color, piece.id));
        self.revision = fresh_revision();
        Ok(())
    }

    pub fn remove(&mut self, id: PieceId) -> Result<Piece, ChessErrors> {
        let color = self.piece(id).ok_or(ChessErrors::UnknownPiece(id))?.color;
        let piece = self.sides[color.index()]
            .remove(id)
            .ok_or(ChessErrors::UnknownPiece(id))?;
        self.grid[piece.square.index()] = None;
        self.revision = fresh_revision();
        Ok(piece)
    }

    /// Moves a piece to an empty square and returns where it came from.
    pub fn relocate(&mut self, id: PieceId, to: Square) -> Result<Square, ChessErrors> {
        let color = self.piece(id).ok_or(ChessErrors::UnknownPiece(id))?.color;
        match self.grid[to.index()] {
            Some((_, other)) if other != id => return Err(ChessErrors::SquareCollision(to)),
            _ => {}
        }
        let piece = self.sides[color.index()]
            .get_mut(id)
            .ok_or(ChessErrors::UnknownPiece(id))?;
        let from = piece.square;
        piece.square = to;
        self.grid[from.index()] = None;
        self.grid[to.index()] = Some((color, id));
        self.revision = fresh_revision();
        Ok(from)
    }

    /// Sets the first-move flag. Returns true only the first time.
    pub fn mark_moved(&mut self, id: PieceId) -> Result<bool, ChessErrors> {
        let color = self.piece(id).ok_or(ChessErrors::UnknownPiece(id))?.color;
        let piece = self.sides[color.index()]
            .get_mut(id)
            .ok_or(ChessErrors::UnknownPiece(id))?;
        if !piece.kind.tracks_first_move() || piece.has_moved {
            return Ok(false);
        }
        piece.has_moved = true;
        Ok(true)
    }

    /// Closes a ply played by `mover`.
    pub(crate) fn advance_ply(&mut self, mover: Color) -> Result<(), ChessErrors> {
        let before = self.ply;
        let after = before
            .checked_add(1)
            .ok_or(ChessErrors::MoveCounterRegression { before, after: before })?;
        self.ply = after;
        self.to_move = mover.opposite();
        self.sides[mover.index()].record_move();
        self.revision = fresh_revision();
        Ok(())
    }

    /// Checks every structural invariant.
    pub fn validate(&self) -> Result<(), ChessErrors> {
        let mut occupied = 0usize;
        for side in &self.sides {
            let color = side.color();
            match side.count(PieceKind::King) {
                0 => return Err(ChessErrors::MissingKing(color)),
                1 => {}
                _ => return Err(ChessErrors::DuplicateKing(color)),
            }
            for piece in side.pieces() {
                if self.grid[piece.square.index()] != Some((color, piece.id)) {
                    return Err(ChessErrors::GridOutOfSync(piece.square));
                }
                if piece.kind == PieceKind::Pawn && piece.square.rank() == color.promotion_rank() {
                    return Err(ChessErrors::UnresolvedPromotion(piece.square));
                }
            }
            occupied += side.len();
        }
        if let Some(stray) = Square::all()
            .filter(|sq| self.grid[sq.index()].is_some())
            .nth(occupied)
        {
            return Err(ChessErrors::GridOutOfSync(stray));
        }
        Ok(())
    }
}

/// Whether `square` is where a fresh piece of this kind starts.
fn starts_unmoved(color: Color, kind: PieceKind, square: Square) -> bool {
    match kind {
        PieceKind::Pawn => square.rank() == color.pawn_rank(),
        PieceKind::Rook => square.rank() == color.home_rank() && matches!(square.file(), 1 | 8),
        PieceKind::King => square.rank() == color.home_rank() && square.file() == KING_HOME_FILE,
        _ => true,
    }
}

fn piece_from_letter(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else {
        Color::Dark
    };
    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };
    Some((color, kind))
}
