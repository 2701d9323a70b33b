//! Pseudo-legal move generation.
//!
//! Every candidate goes through the same pipeline, template actions and
//! special actions alike:
//! 1. orient the relative action into a board vector;
//! 2. drop it if it leaves the board;
//! 3. drop it if an own piece stands on the target;
//! 4. for everything but knights, drop it if the blocker record for the
//!    direction of the *relative* action says the target is blocked.
//!
//! Moves produced here may still leave the mover's king attacked; see
//! `legal_move_generator` for the filter.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::piece::Piece;
use crate::move_generation::blockers::BlockerCache;
use crate::move_generation::legal_moves_king::castling_actions;
use crate::move_generation::legal_moves_pawn::pawn_special_actions;
use crate::moves::chess_move::{Move, MoveFlavor};
use crate::moves::direction::Direction;

/// What the generator is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Moves the piece may make.
    Moves,
    /// Squares the piece attacks. Pawns attack both forward diagonals even
    /// when empty and never attack with a push; kings never attack by
    /// castling.
    Attacks,
}

/// A relative action plus the flavor it carries if it survives filtering.
pub type SpecialAction = ((i8, i8), MoveFlavor);

/// Appends the pseudo-legal moves of `piece` to `out`.
pub fn generate_piece_moves(
    board: &Board,
    cache: &mut BlockerCache,
    piece: &Piece,
    mode: GenerationMode,
    out: &mut Vec<Move>,
) {
    let template: &[(i8, i8)] = match (piece.kind, mode) {
        (PieceKind::Pawn, GenerationMode::Attacks) => &[],
        (kind, _) => kind.actions(),
    };
    for action in template {
        push_if_reachable(board, cache, piece, *action, MoveFlavor::Quiet, out);
    }
    for (action, flavor) in special_actions(board, cache, piece, mode) {
        push_if_reachable(board, cache, piece, action, flavor, out);
    }
}

pub fn pseudo_legal_moves(board: &Board, cache: &mut BlockerCache, piece: &Piece) -> Vec<Move> {
    let mut out = Vec::with_capacity(32);
    generate_piece_moves(board, cache, piece, GenerationMode::Moves, &mut out);
    out
}

/// Pseudo-legal moves of every piece of `color`.
pub fn pseudo_legal_moves_for_side(board: &Board, cache: &mut BlockerCache, color: Color, mode: GenerationMode) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    for piece in board.side(color).pieces() {
        generate_piece_moves(board, cache, piece, mode, &mut out);
    }
    out
}

/// Squares attacked by `piece`.
pub fn attack_targets(board: &Board, cache: &mut BlockerCache, piece: &Piece) -> Vec<Square> {
    let mut out = Vec::with_capacity(32);
    generate_piece_moves(board, cache, piece, GenerationMode::Attacks, &mut out);
    out.into_iter().map(|mv| mv.to).collect()
}

fn special_actions(board: &Board, cache: &mut BlockerCache, piece: &Piece, mode: GenerationMode) -> Vec<SpecialAction> {
    match piece.kind {
        PieceKind::Pawn => pawn_special_actions(board, piece, mode),
        PieceKind::King if mode == GenerationMode::Moves => castling_actions(board, cache, piece),
        _ => Vec::new(),
    }
}

fn push_if_reachable(
    board: &Board,
    cache: &mut BlockerCache,
    piece: &Piece,
    action: (i8, i8),
    flavor: MoveFlavor,
    out: &mut Vec<Move>,
) {
    let Some(target) = piece.square.offset(piece.color.orient(action)) else {
        return;
    };
    if board.is_occupied_by_own(target, piece.color) {
        return;
    }
    if piece.kind.is_blockable() {
        let Some(direction) = Direction::from_action(action) else {
            return;
        };
        if cache.resolve(board, piece).is_blocked(target, direction) {
            return;
        }
    }
    out.push(build_move(board, piece, target, flavor));
}

/// Fills in capture and promotion details for a move of `piece` to `to`.
pub fn build_move(board: &Board, piece: &Piece, to: Square, flavor: MoveFlavor) -> Move {
    let captured = board
        .piece_at(to)
        .filter(|occupant| occupant.color != piece.color)
        .map(Piece::view);
    let flavor = if piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank() {
        MoveFlavor::Promotion
    } else {
        flavor
    };
    Move {
        piece: piece.id,
        color: piece.color,
        kind: piece.kind,
        from: piece.square,
        to,
        captured,
        flavor,
    }
}
