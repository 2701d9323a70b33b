//! Applying moves to a board in place.
//!
//! `apply_move_to_board` performs the capture, the relocation, the
//! first-move flag, the castling rook hop and, unless a promotion is now
//! pending, closes the ply. `promote` finishes a pending promotion and closes
//! the ply then. Neither function checks legality; callers pass moves taken
//! from a `LegalMoveSet`.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{is_promotion_choice, CastleSide};
use crate::game_state::chess_types::{PieceId, PieceKind, Square};
use crate::game_state::piece::Piece;
use crate::moves::chess_move::Move;

/// What applying a move changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub mv: Move,
    pub captured: Option<Piece>,
    /// Rook id, origin and destination when the move castled.
    pub rook_hop: Option<(PieceId, Square, Square)>,
    /// True when this was the mover's first move (pawns, rooks, kings).
    pub first_move: bool,
    /// The pawn now sits on its last rank waiting for `promote`.
    pub promotion_pending: bool,
}

impl AppliedMove {
    pub fn captured_value(&self) -> u32 {
        self.captured.map(|piece| piece.value()).unwrap_or(0)
    }
}

pub fn apply_move_to_board(board: &mut Board, mv: &Move) -> Result<AppliedMove, ChessErrors> {
    let mover = *board.piece(mv.piece).ok_or(ChessErrors::UnknownPiece(mv.piece))?;

    let captured = match board.piece_at(mv.to).copied() {
        Some(victim) if victim.color == mover.color => return Err(ChessErrors::SquareCollision(mv.to)),
        Some(victim) if victim.kind == PieceKind::King => return Err(ChessErrors::KingCaptured(victim.color)),
        Some(victim) => Some(board.remove(victim.id)?),
        None => None,
    };

    let from = board.relocate(mover.id, mv.to)?;
    let first_move = board.mark_moved(mover.id)?;

    let (d_file, d_rank) = from.delta_to(mv.to);
    let rook_hop = match CastleSide::from_king_delta(d_file) {
        Some(side) if mover.kind == PieceKind::King && d_rank == 0 => Some(hop_castling_rook(board, from, mv.to, side)?),
        _ => None,
    };

    let promotion_pending = mover.kind == PieceKind::Pawn && mv.to.rank() == mover.color.promotion_rank();
    if !promotion_pending {
        board.advance_ply(mover.color)?;
    }

    Ok(AppliedMove {
        mv: *mv,
        captured,
        rook_hop,
        first_move,
        promotion_pending,
    })
}

/// Moves the castling rook next to the king, on the side the king came from.
fn hop_castling_rook(
    board: &mut Board,
    king_from: Square,
    king_to: Square,
    side: CastleSide,
) -> Result<(PieceId, Square, Square), ChessErrors> {
    let rook_from = king_from
        .offset((side.rook_offset(), 0))
        .ok_or(ChessErrors::InvalidSquare(king_from.file() + side.rook_offset(), king_from.rank()))?;
    let rook = board
        .piece_at(rook_from)
        .filter(|piece| piece.kind == PieceKind::Rook)
        .map(|piece| piece.id)
        .ok_or(ChessErrors::MissingCastlingRook(rook_from))?;
    let rook_to = king_to
        .offset((-side.sign(), 0))
        .ok_or(ChessErrors::InvalidSquare(king_to.file() - side.sign(), king_to.rank()))?;
    board.relocate(rook, rook_to)?;
    board.mark_moved(rook)?;
    Ok((rook, rook_from, rook_to))
}

/// Replaces the pawn on its last rank with `kind` and closes the ply.
///
/// The new piece has a fresh id and counts as moved.
pub fn promote(board: &mut Board, pawn: PieceId, kind: PieceKind) -> Result<PieceId, ChessErrors> {
    if !is_promotion_choice(kind) {
        return Err(ChessErrors::InvalidPromotionChoice(kind));
    }
    let piece = *board.piece(pawn).ok_or(ChessErrors::UnknownPiece(pawn))?;
    if piece.kind != PieceKind::Pawn || piece.square.rank() != piece.color.promotion_rank() {
        return Err(ChessErrors::NoPromotionPending);
    }
    board.remove(pawn)?;
    let id = board.place_with_flag(piece.color, kind, piece.square, true)?;
    board.advance_ply(piece.color)?;
    Ok(id)
}
