//! Move path enumeration for verifying the generator against known counts.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::PROMOTION_CHOICES;
use crate::move_generation::blockers::BlockerCache;
use crate::move_generation::legal_move_apply::{apply_move_to_board, promote};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::legal_moves_for_side_to_move;
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Counts leaf nodes `depth` plies below `board`, for the side to move.
///
/// Each promotion choice is a separate node.
pub fn perft(board: &Board, depth: u8) -> Result<PerftCounts, ChessErrors> {
    let mut cache = BlockerCache::new();
    let mut root = board.clone();
    perft_recurse(&mut root, &mut cache, depth)
}

/// Per-root-move node counts, in generation order.
pub fn perft_divide(board: &Board, depth: u8) -> Result<Vec<(Move, PerftCounts)>, ChessErrors> {
    let mut cache = BlockerCache::new();
    let mut root = board.clone();
    let set = legal_moves_for_side_to_move(&mut root, &mut cache)?;
    let mut out = Vec::with_capacity(set.len());
    for mv in set.moves {
        let mut counts = PerftCounts::default();
        for mut child in successors(&root, &mv)? {
            counts.merge(count_child(&mut child, &mut cache, &mv, depth)?);
        }
        out.push((mv, counts));
    }
    Ok(out)
}

fn perft_recurse(board: &mut Board, cache: &mut BlockerCache, depth: u8) -> Result<PerftCounts, ChessErrors> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let set = legal_moves_for_side_to_move(board, cache)?;
    let mut total = PerftCounts::default();
    for mv in &set.moves {
        for mut child in successors(board, mv)? {
            total.merge(count_child(&mut child, cache, mv, depth)?);
        }
    }
    Ok(total)
}

/// Counts for one child position reached by `mv` from a node at `depth`.
fn count_child(child: &mut Board, cache: &mut BlockerCache, mv: &Move, depth: u8) -> Result<PerftCounts, ChessErrors> {
    if depth > 1 {
        return perft_recurse(child, cache, depth - 1);
    }

    let mut leaf = PerftCounts {
        nodes: 1,
        ..PerftCounts::default()
    };
    leaf.captures += usize::from(mv.is_capture());
    leaf.castles += usize::from(mv.is_castle());
    leaf.promotions += usize::from(mv.is_promotion());

    let defender = child.side_to_move();
    if is_in_check(child, cache, defender)? {
        leaf.checks += 1;
        let replies = legal_moves_for_side_to_move(child, cache)?;
        leaf.checkmates += usize::from(replies.is_empty());
    }
    Ok(leaf)
}

/// Boards after `mv`, one per promotion choice when the move promotes.
fn successors(board: &Board, mv: &Move) -> Result<Vec<Board>, ChessErrors> {
    let mut next = board.clone();
    let applied = apply_move_to_board(&mut next, mv)?;
    if !applied.promotion_pending {
        return Ok(vec![next]);
    }
    let mut out = Vec::with_capacity(PROMOTION_CHOICES.len());
    for kind in PROMOTION_CHOICES {
        let mut promoted = next.clone();
        promote(&mut promoted, mv.piece, kind)?;
        out.push(promoted);
    }
    Ok(out)
}
