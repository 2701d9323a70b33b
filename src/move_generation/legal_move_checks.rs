//! Attack queries: is a square attacked, who is checking a king, and the
//! line geometry the legality fast paths rely on.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::piece::Piece;
use crate::move_generation::blockers::BlockerCache;
use crate::move_generation::legal_moves_pawn::PAWN_CAPTURE_STEPS;
use crate::moves::direction::Direction;

/// Whether `attacker` attacks `target` on the current board.
///
/// Agrees with the attack-mode generator but checks a single square without
/// building the whole target list.
pub fn piece_attacks_square(board: &Board, cache: &mut BlockerCache, attacker: &Piece, target: Square) -> bool {
    let delta = attacker.square.delta_to(target);
    if delta == (0, 0) {
        return false;
    }
    let action = attacker.color.orient(delta);
    match attacker.kind {
        PieceKind::Pawn => PAWN_CAPTURE_STEPS.contains(&action),
        PieceKind::Knight => PieceKind::Knight.actions().contains(&action),
        PieceKind::King => delta.0.abs() <= 1 && delta.1.abs() <= 1,
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            if !attacker.kind.actions().contains(&action) {
                return false;
            }
            let Some(direction) = Direction::from_action(action) else {
                return false;
            };
            !cache.resolve(board, attacker).is_blocked(target, direction)
        }
    }
}

pub fn is_square_attacked(board: &Board, cache: &mut BlockerCache, square: Square, by: Color) -> bool {
    board
        .side(by)
        .pieces()
        .iter()
        .any(|piece| piece_attacks_square(board, cache, piece, square))
}

/// Every `by` piece attacking `square`.
pub fn attackers_to_square(board: &Board, cache: &mut BlockerCache, square: Square, by: Color) -> Vec<Piece> {
    board
        .side(by)
        .pieces()
        .iter()
        .filter(|piece| piece_attacks_square(board, cache, piece, square))
        .copied()
        .collect()
}

/// Enemy pieces attacking `color`'s king.
pub fn checkers(board: &Board, cache: &mut BlockerCache, color: Color) -> Result<Vec<Piece>, ChessErrors> {
    let king_square = board.king(color)?.square;
    Ok(attackers_to_square(board, cache, king_square, color.opposite()))
}

pub fn is_in_check(board: &Board, cache: &mut BlockerCache, color: Color) -> Result<bool, ChessErrors> {
    let king_square = board.king(color)?.square;
    Ok(is_square_attacked(board, cache, king_square, color.opposite()))
}

/// Same rank, file or diagonal.
#[inline]
pub fn are_aligned(a: Square, b: Square) -> bool {
    let (d_file, d_rank) = a.delta_to(b);
    a != b && (d_file == 0 || d_rank == 0 || d_file.abs() == d_rank.abs())
}

/// Whether `square` lies strictly between `a` and `b` on a shared line.
pub fn is_square_between(a: Square, b: Square, square: Square) -> bool {
    if !are_aligned(a, b) {
        return false;
    }
    let (d_file, d_rank) = a.delta_to(b);
    let step = (d_file.signum(), d_rank.signum());
    let mut cursor = a;
    while let Some(next) = cursor.offset(step) {
        if next == b {
            return false;
        }
        if next == square {
            return true;
        }
        cursor = next;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::move_generator::attack_targets;
    use crate::utils::algebraic::parse_square;

    fn sq(text: &str) -> Square {
        parse_square(text).expect("test square should parse")
    }

    #[test]
    fn single_square_query_agrees_with_attack_generation() -> Result<(), ChessErrors> {
        let board = Board::from_diagram(
            "
            r..qk..r
            pp...ppp
            ..n.b...
            ...p.n..
            .b.P....
            ..N..N..
            PPP.BPPP
            R.BQK..R
            ",
        )?;
        let mut cache = BlockerCache::new();
        for piece in board.pieces() {
            let generated = attack_targets(&board, &mut cache, piece);
            for square in Square::all() {
                if board.is_occupied_by_own(square, piece.color) {
                    continue;
                }
                assert_eq!(
                    generated.contains(&square),
                    piece_attacks_square(&board, &mut cache, piece, square),
                    "{:?} {:?} on {} vs {}",
                    piece.color,
                    piece.kind,
                    piece.square,
                    square
                );
            }
        }
        Ok(())
    }

    #[test]
    fn sliders_are_stopped_by_interposed_pieces() -> Result<(), ChessErrors> {
        let board = Board::from_placements(&[
            (Color::Light, PieceKind::King, "e1"),
            (Color::Dark, PieceKind::King, "e8"),
            (Color::Dark, PieceKind::Bishop, "a5"),
            (Color::Light, PieceKind::Pawn, "c3"),
        ])?;
        let mut cache = BlockerCache::new();
        assert!(!is_square_attacked(&board, &mut cache, sq("e1"), Color::Dark));
        assert!(is_square_attacked(&board, &mut cache, sq("c3"), Color::Dark));
        assert!(!is_in_check(&board, &mut cache, Color::Light)?);
        Ok(())
    }

    #[test]
    fn double_check_lists_both_checkers() -> Result<(), ChessErrors> {
        let board = Board::from_placements(&[
            (Color::Light, PieceKind::King, "e1"),
            (Color::Dark, PieceKind::King, "e8"),
            (Color::Dark, PieceKind::Rook, "e5"),
            (Color::Dark, PieceKind::Knight, "d3"),
        ])?;
        let mut cache = BlockerCache::new();
        let found = checkers(&board, &mut cache, Color::Light)?;
        let mut kinds: Vec<PieceKind> = found.iter().map(|p| p.kind).collect();
        kinds.sort_by_key(|k| k.index());
        assert_eq!(kinds, vec![PieceKind::Knight, PieceKind::Rook]);
        Ok(())
    }

    #[test]
    fn dark_pawns_attack_downward() -> Result<(), ChessErrors> {
        let board = Board::from_placements(&[(Color::Dark, PieceKind::Pawn, "d5")])?;
        let mut cache = BlockerCache::new();
        assert!(is_square_attacked(&board, &mut cache, sq("c4"), Color::Dark));
        assert!(is_square_attacked(&board, &mut cache, sq("e4"), Color::Dark));
        assert!(!is_square_attacked(&board, &mut cache, sq("d4"), Color::Dark));
        assert!(!is_square_attacked(&board, &mut cache, sq("e6"), Color::Dark));
        Ok(())
    }

    #[test]
    fn missing_king_is_reported() -> Result<(), ChessErrors> {
        let board = Board::from_placements(&[(Color::Dark, PieceKind::King, "e8")])?;
        let mut cache = BlockerCache::new();
        assert_eq!(checkers(&board, &mut cache, Color::Light), Err(ChessErrors::MissingKing(Color::Light)));
        Ok(())
    }

    #[test]
    fn line_geometry() {
        assert!(are_aligned(sq("a1"), sq("h8")));
        assert!(are_aligned(sq("e1"), sq("e8")));
        assert!(!are_aligned(sq("e1"), sq("f3")));
        assert!(!are_aligned(sq("e1"), sq("e1")));
        assert!(is_square_between(sq("a1"), sq("d4"), sq("c3")));
        assert!(!is_square_between(sq("a1"), sq("d4"), sq("d4")));
        assert!(!is_square_between(sq("a1"), sq("d4"), sq("e5")));
        assert!(!is_square_between(sq("e1"), sq("f3"), sq("e2")));
    }
}
