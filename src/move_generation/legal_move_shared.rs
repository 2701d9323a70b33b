//! Scoped "play it and see" helper used by the legality filter.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{PieceId, Square};
use crate::game_state::piece::Piece;
use crate::moves::chess_move::Move;

/// A move temporarily played on a board.
///
/// The mover is relocated to its target and any captured piece is lifted
/// off the board. Dropping the guard puts both back and rewinds the board
/// revision, so the restore happens on every exit path.
pub struct SimulatedMove<'a> {
    board: &'a mut Board,
    mover: PieceId,
    from: Square,
    lifted: Option<Piece>,
    revision: u64,
}

impl<'a> SimulatedMove<'a> {
    pub fn new(board: &'a mut Board, mv: &Move) -> Result<Self, ChessErrors> {
        let revision = board.revision();
        let lifted = match board.piece_at(mv.to) {
            Some(victim) if victim.color != mv.color => Some(board.remove(victim.id)?),
            _ => None,
        };
        match board.relocate(mv.piece, mv.to) {
            Ok(from) => Ok(Self {
                board,
                mover: mv.piece,
                from,
                lifted,
                revision,
            }),
            Err(err) => {
                if let Some(piece) = lifted {
                    board.reinsert(piece)?;
                    board.restore_revision(revision);
                }
                Err(err)
            }
        }
    }

    pub fn board(&self) -> &Board {
        self.board
    }
}

impl Drop for SimulatedMove<'_> {
    fn drop(&mut self) {
        // Neither call can fail: the guard only hands out `&Board`.
        let moved_back = self.board.relocate(self.mover, self.from).is_ok();
        let restored = match self.lifted.take() {
            Some(piece) => self.board.reinsert(piece).is_ok(),
            None => true,
        };
        debug_assert!(moved_back && restored, "simulated move failed to unwind");
        if moved_back && restored {
            self.board.restore_revision(self.revision);
        }
    }
}
