//! What an agent sees of the game, and what it learns from one ply.

use crate::game::game::{Game, MoveRecord};
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::move_generation::legal_move_generator::{GameStatus, LegalMoveSet};
use crate::moves::chess_move::Move;
use crate::moves::piece_catalog::tensor_index;

/// One plane per (color, kind) pair.
pub const PLANES: usize = 12;

/// Reward bonus for delivering checkmate.
pub const CHECKMATE_REWARD: f32 = 1000.0;

/// Occupancy planes indexed `[tensor_index][rank - 1][file - 1]`.
pub type Planes = [[[u8; 8]; 8]; PLANES];

#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub planes: Planes,
    pub side_to_move: Color,
    pub ply: u32,
    pub status: GameStatus,
    pub legal_moves: Vec<Move>,
}

impl Observation {
    pub fn from_game(game: &Game) -> Self {
        Self::from_board(game.board(), game.legal_move_set())
    }

    pub fn from_board(board: &Board, legal: &LegalMoveSet) -> Self {
        let mut planes = [[[0u8; 8]; 8]; PLANES];
        for piece in board.pieces() {
            let plane = tensor_index(piece.color, piece.kind);
            let (row, col) = cell(piece.square);
            planes[plane][row][col] = 1;
        }
        Self {
            planes,
            side_to_move: board.side_to_move(),
            ply: board.ply(),
            status: legal.status,
            legal_moves: legal.moves.clone(),
        }
    }

    /// The piece encoded on `square`, if any.
    pub fn occupant(&self, square: Square) -> Option<(Color, PieceKind)> {
        let (row, col) = cell(square);
        Color::BOTH.into_iter().find_map(|color| {
            PieceKind::ALL
                .into_iter()
                .find(|&kind| self.planes[tensor_index(color, kind)][row][col] != 0)
                .map(|kind| (color, kind))
        })
    }

    /// Planes flattened to `PLANES * 64` floats, plane-major.
    pub fn flatten(&self) -> Vec<f32> {
        self.planes
            .iter()
            .flat_map(|plane| plane.iter().flat_map(|row| row.iter().map(|&v| f32::from(v))))
            .collect()
    }
}

fn cell(square: Square) -> (usize, usize) {
    ((square.rank() - 1) as usize, (square.file() - 1) as usize)
}

/// One ply from the mover's point of view.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub before: Observation,
    pub chosen: Move,
    pub promoted_to: Option<PieceKind>,
    pub reward: f32,
    pub after: Observation,
    pub terminal: bool,
}

/// Material captured by the move, plus the checkmate bonus.
pub fn reward_for(record: &MoveRecord) -> f32 {
    let captured = record.captured.map(|victim| victim.kind.value()).unwrap_or(0) as f32;
    let mate = match record.status_after {
        GameStatus::Checkmate { .. } => CHECKMATE_REWARD,
        _ => 0.0,
    };
    captured + mate
}
