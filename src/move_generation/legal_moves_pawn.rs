use crate::game_state::board::Board;
use crate::game_state::piece::Piece;
use crate::move_generation::move_generator::{GenerationMode, SpecialAction};
use crate::moves::chess_move::MoveFlavor;

/// Diagonal capture steps in the pawn's own frame.
pub const PAWN_CAPTURE_STEPS: [(i8, i8); 2] = [(-1, 1), (1, 1)];

const DOUBLE_PUSH: (i8, i8) = (0, 2);

/// Double push for an unmoved pawn and a diagonal capture wherever an enemy
/// stands. In attack mode both diagonals are returned unconditionally.
///
/// There is no en passant.
pub fn pawn_special_actions(board: &Board, pawn: &Piece, mode: GenerationMode) -> Vec<SpecialAction> {
    let mut out = Vec::with_capacity(3);
    match mode {
        GenerationMode::Attacks => {
            out.extend(PAWN_CAPTURE_STEPS.map(|step| (step, MoveFlavor::Quiet)));
        }
        GenerationMode::Moves => {
            if !pawn.has_moved {
                out.push((DOUBLE_PUSH, MoveFlavor::DoublePawnPush));
            }
            for step in PAWN_CAPTURE_STEPS {
                let enemy_there = pawn
                    .square
                    .offset(pawn.color.orient(step))
                    .is_some_and(|target| board.is_occupied_by_enemy(target, pawn.color));
                if enemy_there {
                    out.push((step, MoveFlavor::Quiet));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::utils::algebraic::parse_square;

    #[test]
    fn moved_pawn_loses_its_double_push() -> Result<(), ChessErrors> {
        let mut board = Board::from_placements(&[(Color::Light, PieceKind::Pawn, "a2")])?;
        let id = board.piece_at(parse_square("a2")?).map(|p| p.id).ok_or(ChessErrors::FailedTest)?;
        let pawn = *board.piece(id).ok_or(ChessErrors::FailedTest)?;
        assert_eq!(pawn_special_actions(&board, &pawn, GenerationMode::Moves).len(), 1);

        board.mark_moved(id)?;
        let pawn = *board.piece(id).ok_or(ChessErrors::FailedTest)?;
        assert!(pawn_special_actions(&board, &pawn, GenerationMode::Moves).is_empty());
        Ok(())
    }

    #[test]
    fn captures_only_toward_enemies() -> Result<(), ChessErrors> {
        let board = Board::from_placements(&[
            (Color::Light, PieceKind::Pawn, "e4"),
            (Color::Dark, PieceKind::Pawn, "d5"),
            (Color::Light, PieceKind::Pawn, "f5"),
        ])?;
        let pawn = *board.piece_at(parse_square("e4")?).ok_or(ChessErrors::FailedTest)?;
        let actions = pawn_special_actions(&board, &pawn, GenerationMode::Moves);
        assert_eq!(actions, vec![((-1, 1), MoveFlavor::Quiet)]);
        assert_eq!(pawn_special_actions(&board, &pawn, GenerationMode::Attacks).len(), 2);
        Ok(())
    }
}
