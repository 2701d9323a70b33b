use crate::game_state::chess_types::{Color, PieceId, PieceKind};
use crate::game_state::piece::Piece;

/// All pieces of one color plus the number of plies that color has played.
#[derive(Clone, Debug)]
pub struct Side {
    color: Color,
    pieces: Vec<Piece>,
    moves_made: u32,
}

impl Side {
    pub fn new(color: Color) -> Self {
        Side {
            color,
            pieces: Vec::with_capacity(16),
            moves_made: 0,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id == id)
    }

    pub fn king(&self) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.kind == PieceKind::King)
    }

    pub fn count(&self, kind: PieceKind) -> usize {
        self.pieces.iter().filter(|p| p.kind == kind).count()
    }

    /// Sum of piece values, king excluded.
    pub fn material(&self) -> u32 {
        self.pieces
            .iter()
            .filter(|p| p.kind != PieceKind::King)
            .map(|p| p.value())
            .sum()
    }

    pub(crate) fn insert(&mut self, piece: Piece) {
        debug_assert_eq!(piece.color, self.color);
        self.pieces.push(piece);
    }

    pub(crate) fn remove(&mut self, id: PieceId) -> Option<Piece> {
        let idx = self.pieces.iter().position(|p| p.id == id)?;
        Some(self.pieces.swap_remove(idx))
    }

    pub(crate) fn record_move(&mut self) {
        self.moves_made += 1;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game_state::chess_types::Square;

    #[test]
    fn add_remove_pieces() {
        let mut dut = Side::new(Color::Light);
        dut.insert(Piece::new(PieceId(1), Color::Light, PieceKind::Pawn, Square::at(1, 2)));
        dut.insert(Piece::new(PieceId(2), Color::Light, PieceKind::Rook, Square::at(1, 1)));
        assert_eq!(dut.material(), 6);

        assert!(dut.remove(PieceId(1)).is_some());
        assert!(dut.remove(PieceId(1)).is_none());
        assert_eq!(dut.len(), 1);
        assert_eq!(dut.material(), 5);
    }

    #[test]
    fn king_is_not_material() {
        let mut dut = Side::new(Color::Dark);
        dut.insert(Piece::new(PieceId(7), Color::Dark, PieceKind::King, Square::at(5, 8)));
        assert_eq!(dut.material(), 0);
        assert_eq!(dut.king().map(|k| k.id), Some(PieceId(7)));
    }
}
