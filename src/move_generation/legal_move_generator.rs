//! Full legal move generation.
//!
//! Pseudo-legal moves are filtered by playing each one on the board through
//! a `SimulatedMove` guard and asking whether the mover's king is attacked
//! afterwards. Three shortcuts skip the simulation when the answer is
//! already known:
//! - in double check only king moves can help;
//! - in single check a non-king move must capture the checker or step onto
//!   the line between a sliding checker and the king;
//! - out of check, a non-king piece that shares no line with its king
//!   cannot uncover an attack on it.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceId};
use crate::game_state::piece::Piece;
use crate::move_generation::blockers::BlockerCache;
use crate::move_generation::legal_move_checks::{are_aligned, checkers, is_square_attacked, is_square_between};
use crate::move_generation::legal_move_shared::SimulatedMove;
use crate::move_generation::move_generator::{pseudo_legal_moves_for_side, GenerationMode};
use crate::moves::chess_move::Move;

/// Observable state of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }
}

/// Legal moves of one side together with its check state.
#[derive(Debug, Clone)]
pub struct LegalMoveSet {
    pub color: Color,
    pub moves: Vec<Move>,
    pub checkers: Vec<Piece>,
    pub status: GameStatus,
}

impl LegalMoveSet {
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Moves of the piece with the given id.
    pub fn for_piece(&self, piece: PieceId) -> impl Iterator<Item = &Move> {
        self.moves.iter().filter(move |mv| mv.piece == piece)
    }
}

/// Every legal move for `color` on `board`.
///
/// The board is borrowed mutably for temporary simulations only; it is
/// identical, revision included, when this returns.
pub fn legal_moves(board: &mut Board, cache: &mut BlockerCache, color: Color) -> Result<LegalMoveSet, ChessErrors> {
    let king = *board.king(color)?;
    let checkers = checkers(board, cache, color)?;
    let pseudo = pseudo_legal_moves_for_side(board, cache, color, GenerationMode::Moves);

    let mut moves = Vec::with_capacity(pseudo.len());
    for mv in pseudo {
        if is_legal(board, cache, &king, &checkers, &mv)? {
            moves.push(mv);
        }
    }

    let status = match (moves.is_empty(), checkers.is_empty()) {
        (true, false) => GameStatus::Checkmate {
            winner: color.opposite(),
        },
        (true, true) => GameStatus::Stalemate,
        (false, false) => GameStatus::Check,
        (false, true) => GameStatus::Ongoing,
    };

    Ok(LegalMoveSet {
        color,
        moves,
        checkers,
        status,
    })
}

/// Legal moves for whoever is on move.
pub fn legal_moves_for_side_to_move(board: &mut Board, cache: &mut BlockerCache) -> Result<LegalMoveSet, ChessErrors> {
    let color = board.side_to_move();
    legal_moves(board, cache, color)
}

fn is_legal(
    board: &mut Board,
    cache: &mut BlockerCache,
    king: &Piece,
    checkers: &[Piece],
    mv: &Move,
) -> Result<bool, ChessErrors> {
    let moves_king = mv.piece == king.id;
    if !moves_king {
        match checkers {
            [] => {
                if !are_aligned(king.square, mv.from) {
                    return Ok(true);
                }
            }
            [checker] => {
                let captures = mv.to == checker.square;
                let interposes = checker.kind.is_slider() && is_square_between(checker.square, king.square, mv.to);
                if !captures && !interposes {
                    return Ok(false);
                }
            }
            _ => return Ok(false),
        }
    }

    let king_square = if moves_king { mv.to } else { king.square };
    let simulated = SimulatedMove::new(board, mv)?;
    let attacked = is_square_attacked(simulated.board(), cache, king_square, king.color.opposite());
    Ok(!attacked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{PieceKind, Square};
    use crate::move_generation::legal_move_checks::is_in_check;
    use crate::moves::chess_move::MoveFlavor;
    use crate::utils::algebraic::parse_square;

    fn sq(text: &str) -> Square {
        parse_square(text).expect("test square should parse")
    }

    fn legal(board: &mut Board, color: Color) -> Result<LegalMoveSet, ChessErrors> {
        let mut cache = BlockerCache::new();
        legal_moves(board, &mut cache, color)
    }

    fn targets_of(set: &LegalMoveSet, from: &str) -> Vec<String> {
        let mut out: Vec<String> = set
            .moves
            .iter()
            .filter(|mv| mv.from == sq(from))
            .map(|mv| mv.to.to_string())
            .collect();
        out.sort();
        out
    }

    #[test]
    fn starting_position_has_twenty_legal_moves() -> Result<(), ChessErrors> {
        let mut board = Board::standard();
        let revision = board.revision();
        let set = legal(&mut board, Color::Light)?;
        assert_eq!(set.len(), 20);
        assert_eq!(set.moves.iter().filter(|mv| mv.kind == PieceKind::Pawn).count(), 16);
        assert_eq!(set.moves.iter().filter(|mv| mv.kind == PieceKind::Knight).count(), 4);
        assert_eq!(set.status, GameStatus::Ongoing);
        assert_eq!(board.revision(), revision);
        Ok(())
    }

    #[test]
    fn back_rank_mate_is_checkmate() -> Result<(), ChessErrors> {
        let mut board = Board::from_diagram(
            "
            R.....k.
            .....ppp
            ........
            ........
            ........
            ........
            ........
            ......K.
            ",
        )?;
        let set = legal(&mut board, Color::Dark)?;
        assert!(set.is_empty());
        assert_eq!(set.checkers.len(), 1);
        assert_eq!(set.status, GameStatus::Checkmate { winner: Color::Light });
        assert!(set.status.is_terminal());
        Ok(())
    }

    #[test]
    fn lone_king_mated_by_queen_and_king() -> Result<(), ChessErrors> {
        let mut board = Board::from_placements(&[
            (Color::Light, PieceKind::King, "f6"),
            (Color::Light, PieceKind::Queen, "g7"),
            (Color::Dark, PieceKind::King, "h8"),
        ])?;
        let set = legal(&mut board, Color::Dark)?;
        assert_eq!(set.status, GameStatus::Checkmate { winner: Color::Light });
        Ok(())
    }

    #[test]
    fn lone_king_without_moves_is_stalemate() -> Result<(), ChessErrors> {
        let mut board = Board::from_placements(&[
            (Color::Light, PieceKind::King, "f7"),
            (Color::Light, PieceKind::Queen, "g6"),
            (Color::Dark, PieceKind::King, "h8"),
        ])?;
        let set = legal(&mut board, Color::Dark)?;
        assert!(set.is_empty());
        assert!(set.checkers.is_empty());
        assert_eq!(set.status, GameStatus::Stalemate);
        Ok(())
    }

    #[test]
    fn pinned_piece_may_only_slide_along_the_pin() -> Result<(), ChessErrors> {
        let mut board = Board::from_placements(&[
            (Color::Light, PieceKind::King, "e1"),
            (Color::Light, PieceKind::Rook, "e4"),
            (Color::Light, PieceKind::Knight, "d2"),
            (Color::Dark, PieceKind::Queen, "e8"),
            (Color::Dark, PieceKind::Bishop, "a5"),
            (Color::Dark, PieceKind::King, "a8"),
        ])?;
        let set = legal(&mut board, Color::Light)?;
        assert_eq!(
            targets_of(&set, "e4"),
            vec!["e2", "e3", "e5", "e6", "e7", "e8"]
        );
        assert!(targets_of(&set, "d2").is_empty());
        Ok(())
    }

    #[test]
    fn single_check_must_be_captured_blocked_or_evaded() -> Result<(), ChessErrors> {
        let mut board = Board::from_placements(&[
            (Color::Light, PieceKind::King, "e1"),
            (Color::Light, PieceKind::Bishop, "c1"),
            (Color::Light, PieceKind::Knight, "b3"),
            (Color::Light, PieceKind::Pawn, "h2"),
            (Color::Dark, PieceKind::Rook, "e5"),
            (Color::Dark, PieceKind::King, "a8"),
        ])?;
        let set = legal(&mut board, Color::Light)?;
        assert_eq!(set.status, GameStatus::Check);
        assert_eq!(targets_of(&set, "c1"), vec!["e3"]);
        assert!(targets_of(&set, "b3").is_empty());
        assert!(targets_of(&set, "h2").is_empty());
        assert_eq!(targets_of(&set, "e1"), vec!["d1", "d2", "f1", "f2"]);
        Ok(())
    }

    #[test]
    fn double_check_allows_only_king_moves() -> Result<(), ChessErrors> {
        let mut board = Board::from_placements(&[
            (Color::Light, PieceKind::King, "e1"),
            (Color::Light, PieceKind::Queen, "d1"),
            (Color::Dark, PieceKind::Rook, "e5"),
            (Color::Dark, PieceKind::Knight, "d3"),
            (Color::Dark, PieceKind::King, "a8"),
        ])?;
        let set = legal(&mut board, Color::Light)?;
        assert_eq!(set.checkers.len(), 2);
        assert!(set.moves.iter().all(|mv| mv.kind == PieceKind::King));
        assert!(!set.is_empty());
        Ok(())
    }

    #[test]
    fn king_cannot_step_along_the_checking_ray() -> Result<(), ChessErrors> {
        let mut board = Board::from_placements(&[
            (Color::Light, PieceKind::King, "d4"),
            (Color::Dark, PieceKind::Rook, "a4"),
            (Color::Dark, PieceKind::King, "h8"),
        ])?;
        let set = legal(&mut board, Color::Light)?;
        let found = targets_of(&set, "d4");
        assert!(!found.contains(&"e4".to_owned()));
        assert!(!found.contains(&"c4".to_owned()));
        assert!(found.contains(&"d5".to_owned()));
        Ok(())
    }

    #[test]
    fn king_may_not_capture_a_defended_piece() -> Result<(), ChessErrors> {
        let mut board = Board::from_placements(&[
            (Color::Light, PieceKind::King, "e1"),
            (Color::Dark, PieceKind::Queen, "e2"),
            (Color::Dark, PieceKind::Rook, "e8"),
            (Color::Dark, PieceKind::King, "a8"),
        ])?;
        let set = legal(&mut board, Color::Light)?;
        assert!(!targets_of(&set, "e1").contains(&"e2".to_owned()));
        assert_eq!(set.status, GameStatus::Checkmate { winner: Color::Dark });
        Ok(())
    }

    #[test]
    fn capturing_the_pinning_piece_is_legal() -> Result<(), ChessErrors> {
        let mut board = Board::from_placements(&[
            (Color::Light, PieceKind::King, "e1"),
            (Color::Light, PieceKind::Rook, "e4"),
            (Color::Dark, PieceKind::Rook, "e6"),
            (Color::Dark, PieceKind::King, "a8"),
        ])?;
        let set = legal(&mut board, Color::Light)?;
        assert_eq!(targets_of(&set, "e4"), vec!["e2", "e3", "e5", "e6"]);
        Ok(())
    }

    #[test]
    fn castling_is_offered_and_flagged() -> Result<(), ChessErrors> {
        let mut board = Board::from_diagram(
            "
            r...k..r
            pppppppp
            ........
            ........
            ........
            ........
            PPPPPPPP
            R...K..R
            ",
        )?;
        let set = legal(&mut board, Color::Light)?;
        let castles: Vec<_> = set.moves.iter().filter(|mv| mv.is_castle()).map(|mv| mv.flavor).collect();
        assert_eq!(castles.len(), 2);
        assert!(castles.iter().all(|flavor| matches!(flavor, MoveFlavor::Castle(_))));
        assert_eq!(targets_of(&set, "e1"), vec!["c1", "d1", "f1", "g1"]);
        Ok(())
    }

    #[test]
    fn no_legal_move_leaves_the_king_attacked() -> Result<(), ChessErrors> {
        let mut board = Board::from_diagram(
            "
            r...k..r
            p.ppqpb.
            bn..pnp.
            ...PN...
            .p..P...
            ..N..Q.p
            PPPBBPPP
            R...K..R
            ",
        )?;
        let mut cache = BlockerCache::new();
        for color in Color::BOTH {
            let set = legal_moves(&mut board, &mut cache, color)?;
            for mv in &set.moves {
                let mut after = board.clone();
                if let Some(victim) = mv.captured {
                    after.remove(victim.id)?;
                }
                after.relocate(mv.piece, mv.to)?;
                assert!(!is_in_check(&after, &mut cache, color)?, "{mv}");
            }
        }
        Ok(())
    }
}
