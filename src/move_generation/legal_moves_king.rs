use crate::game_state::board::Board;
use crate::game_state::chess_rules::CastleSide;
use crate::game_state::chess_types::PieceKind;
use crate::game_state::piece::Piece;
use crate::move_generation::blockers::BlockerCache;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::move_generator::SpecialAction;
use crate::moves::chess_move::MoveFlavor;

/// Castling actions currently available to `king`, in the king's own frame.
///
/// Requires an unmoved king that is not attacked, an unmoved own rook at the
/// standard offset, empty squares in between, and unattacked transit and
/// landing squares. Attacks are evaluated with the king on its current
/// square.
pub fn castling_actions(board: &Board, cache: &mut BlockerCache, king: &Piece) -> Vec<SpecialAction> {
    let mut out = Vec::new();
    if king.kind != PieceKind::King || king.has_moved {
        return out;
    }
    let enemy = king.color.opposite();
    if is_square_attacked(board, cache, king.square, enemy) {
        return out;
    }

    for side in CastleSide::BOTH {
        let rook_ready = king
            .square
            .offset((side.rook_offset(), 0))
            .and_then(|square| board.piece_at(square))
            .is_some_and(|rook| rook.color == king.color && rook.kind == PieceKind::Rook && !rook.has_moved);
        if !rook_ready {
            continue;
        }

        let path_clear = (1..side.rook_offset().abs()).all(|step| {
            king.square
                .offset((step * side.sign(), 0))
                .is_some_and(|square| !board.is_occupied(square))
        });
        if !path_clear {
            continue;
        }

        let path_safe = (1..=2).all(|step| {
            king.square
                .offset((step * side.sign(), 0))
                .is_some_and(|square| !is_square_attacked(board, cache, square, enemy))
        });
        if !path_safe {
            continue;
        }

        out.push((king.color.orient((2 * side.sign(), 0)), MoveFlavor::Castle(side)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_types::Color;
    use crate::utils::algebraic::parse_square;

    fn sides_offered(board: &Board, king_square: &str) -> Result<Vec<CastleSide>, ChessErrors> {
        let king = *board.piece_at(parse_square(king_square)?).ok_or(ChessErrors::FailedTest)?;
        let mut cache = BlockerCache::new();
        Ok(castling_actions(board, &mut cache, &king)
            .into_iter()
            .filter_map(|(_, flavor)| match flavor {
                MoveFlavor::Castle(side) => Some(side),
                _ => None,
            })
            .collect())
    }

    #[test]
    fn both_wings_open() -> Result<(), ChessErrors> {
        let board = Board::from_diagram(
            "
            r...k..r
            ........
            ........
            ........
            ........
            ........
            ........
            R...K..R
            ",
        )?;
        assert_eq!(sides_offered(&board, "e1")?, vec![CastleSide::Kingside, CastleSide::Queenside]);
        assert_eq!(sides_offered(&board, "e8")?, vec![CastleSide::Kingside, CastleSide::Queenside]);
        Ok(())
    }

    #[test]
    fn dark_castling_action_is_mirrored() -> Result<(), ChessErrors> {
        let board = Board::from_diagram(
            "
            ....k..r
            ........
            ........
            ........
            ........
            ........
            ........
            ....K...
            ",
        )?;
        let king = *board.piece_at(parse_square("e8")?).ok_or(ChessErrors::FailedTest)?;
        let mut cache = BlockerCache::new();
        let actions = castling_actions(&board, &mut cache, &king);
        assert_eq!(actions, vec![((-2, 0), MoveFlavor::Castle(CastleSide::Kingside))]);
        Ok(())
    }

    #[test]
    fn attacked_transit_square_forbids_that_wing_only() -> Result<(), ChessErrors> {
        let board = Board::from_diagram(
            "
            ....k...
            ........
            ........
            ........
            ........
            ........
            .....r..
            R...K..R
            ",
        )?;
        assert_eq!(sides_offered(&board, "e1")?, vec![CastleSide::Queenside]);
        Ok(())
    }

    #[test]
    fn attacked_landing_square_forbids_that_wing_only() -> Result<(), ChessErrors> {
        let board = Board::from_diagram(
            "
            r...k..r
            ..R.....
            ........
            ........
            ........
            ........
            ......r.
            R...K..R
            ",
        )?;
        // g1 and c8 are attacked, the squares the kings cross are not.
        assert_eq!(sides_offered(&board, "e1")?, vec![CastleSide::Queenside]);
        assert_eq!(sides_offered(&board, "e8")?, vec![CastleSide::Kingside]);
        Ok(())
    }

    #[test]
    fn king_in_check_cannot_castle() -> Result<(), ChessErrors> {
        let board = Board::from_diagram(
            "
            ....k...
            ....r...
            ........
            ........
            ........
            ........
            ........
            R...K..R
            ",
        )?;
        assert!(sides_offered(&board, "e1")?.is_empty());
        Ok(())
    }

    #[test]
    fn attacked_rook_square_does_not_matter() -> Result<(), ChessErrors> {
        let board = Board::from_diagram(
            "
            .r..k...
            ........
            ........
            ........
            ........
            ........
            ........
            R...K...
            ",
        )?;
        // b1 is attacked but the king only crosses d1 and c1.
        assert_eq!(sides_offered(&board, "e1")?, vec![CastleSide::Queenside]);
        Ok(())
    }

    #[test]
    fn piece_between_king_and_rook_blocks() -> Result<(), ChessErrors> {
        let board = Board::from_diagram(
            "
            ....k...
            ........
            ........
            ........
            ........
            ........
            ........
            RN..K..R
            ",
        )?;
        assert_eq!(sides_offered(&board, "e1")?, vec![CastleSide::Kingside]);
        Ok(())
    }

    #[test]
    fn moved_rook_never_castles_again() -> Result<(), ChessErrors> {
        let mut board = Board::from_diagram(
            "
            ....k...
            ........
            ........
            ........
            ........
            ........
            ........
            ....K..R
            ",
        )?;
        let rook = board.piece_at(parse_square("h1")?).map(|p| p.id).ok_or(ChessErrors::FailedTest)?;
        board.relocate(rook, parse_square("h2")?)?;
        board.mark_moved(rook)?;
        board.relocate(rook, parse_square("h1")?)?;
        assert!(sides_offered(&board, "e1")?.is_empty());
        assert_eq!(board.side(Color::Light).len(), 2);
        Ok(())
    }
}
