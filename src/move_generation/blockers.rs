//! Blocker/ray resolution for every piece except knights.
//!
//! For each tracked direction a `BlockerRecord` stores the nearest occupied
//! square (own or enemy) stepping out from the piece, or `None` when the ray
//! leaves the board first. Records are stamped with the board revision they
//! were computed against; `BlockerCache::resolve` recomputes only when the
//! stamp or the piece's square no longer matches. The cache is derived data
//! and can always be thrown away.

use std::collections::HashMap;

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceId, PieceKind, Square};
use crate::game_state::piece::Piece;
use crate::moves::direction::Direction;
use crate::moves::piece_catalog::MAX_RAY_LENGTH;

/// Nearest occupied square per direction for one piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockerRecord {
    origin: Square,
    color: Color,
    kind: PieceKind,
    revision: u64,
    blockers: [Option<Square>; 8],
}

impl BlockerRecord {
    pub fn compute(board: &Board, piece: &Piece) -> Self {
        let mut blockers = [None; 8];
        for dir in piece.kind.blocker_directions() {
            blockers[dir.index()] = nearest_occupied(board, piece.square, piece.color, *dir);
        }
        Self {
            origin: piece.square,
            color: piece.color,
            kind: piece.kind,
            revision: board.revision(),
            blockers,
        }
    }

    #[inline]
    pub fn origin(&self) -> Square {
        self.origin
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn blocker(&self, dir: Direction) -> Option<Square> {
        self.blockers[dir.index()]
    }

    /// Same origin and same blockers, regardless of when it was computed.
    pub fn same_rays(&self, other: &BlockerRecord) -> bool {
        self.origin == other.origin && self.blockers == other.blockers
    }

    /// Whether moving to `target` along `dir` is stopped by a blocker.
    ///
    /// Landing on the blocker itself is allowed (the own-piece filter has
    /// already removed own blockers), except for a pawn's forward line where
    /// any occupant blocks. Squares past the blocker are always blocked.
    pub fn is_blocked(&self, target: Square, dir: Direction) -> bool {
        let Some(blocker) = self.blocker(dir) else {
            return false;
        };
        if target == self.origin {
            return true;
        }
        if self.kind == PieceKind::Pawn && dir == Direction::Forward && target == blocker {
            return true;
        }

        let step = self.color.orient(dir.unit());
        let mut cursor = self.origin;
        for _ in 0..MAX_RAY_LENGTH {
            let Some(next) = cursor.offset(step) else {
                return false;
            };
            if next == target {
                return false;
            }
            if next == blocker {
                return true;
            }
            cursor = next;
        }
        false
    }
}

/// First occupied square from `from` along `dir` (in `color`'s frame).
pub fn nearest_occupied(board: &Board, from: Square, color: Color, dir: Direction) -> Option<Square> {
    let step = color.orient(dir.unit());
    let mut cursor = from;
    while let Some(next) = cursor.offset(step) {
        if board.is_occupied(next) {
            return Some(next);
        }
        cursor = next;
    }
    None
}

/// Per-piece blocker records, invalidated by board revision.
#[derive(Debug, Clone, Default)]
pub struct BlockerCache {
    records: HashMap<PieceId, BlockerRecord>,
    hits: u64,
    misses: u64,
}

impl BlockerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current record for `piece`, recomputing it if stale.
    pub fn resolve(&mut self, board: &Board, piece: &Piece) -> &BlockerRecord {
        let fresh = self.records.get(&piece.id).is_some_and(|record| {
            record.revision == board.revision() && record.origin == piece.square
        });
        if fresh {
            self.hits += 1;
        } else {
            self.misses += 1;
            self.records.insert(piece.id, BlockerRecord::compute(board, piece));
        }
        &self.records[&piece.id]
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// (hits, misses) since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
