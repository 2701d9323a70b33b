//! Terminal-oriented Unicode board renderer.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Square};

const FILE_HEADER: &str = "  a b c d e f g h";

/// Render the board to a Unicode string, rank 8 at the top.
pub fn render_board(board: &Board) -> String {
    render_board_with_highlights(board, &[])
}

/// Like `render_board`, but empty squares listed in `highlights` are drawn
/// as `•` so the legal targets of a selected piece stand out.
pub fn render_board_with_highlights(board: &Board, highlights: &[Square]) -> String {
    let mut out = String::new();
    out.push_str(FILE_HEADER);
    out.push('\n');

    for rank in (1..=8).rev() {
        let label = char::from(b'0' + rank as u8);
        out.push(label);
        out.push(' ');
        for file in 1..=8 {
            let square = Square::at(file, rank);
            let glyph = match board.piece_at(square) {
                Some(piece) => piece_to_unicode(piece.color, piece.kind),
                None if highlights.contains(&square) => '•',
                None => '·',
            };
            out.push(glyph);
            if file < 8 {
                out.push(' ');
            }
        }
        out.push(' ');
        out.push(label);
        out.push('\n');
    }

    out.push_str(FILE_HEADER);
    out
}

pub fn piece_to_unicode(color: Color, kind: PieceKind) -> char {
    match (color, kind) {
        (Color::Light, PieceKind::Pawn) => '♙',
        (Color::Light, PieceKind::Knight) => '♘',
        (Color::Light, PieceKind::Bishop) => '♗',
        (Color::Light, PieceKind::Rook) => '♖',
        (Color::Light, PieceKind::Queen) => '♕',
        (Color::Light, PieceKind::King) => '♔',
        (Color::Dark, PieceKind::Pawn) => '♟',
        (Color::Dark, PieceKind::Knight) => '♞',
        (Color::Dark, PieceKind::Bishop) => '♝',
        (Color::Dark, PieceKind::Rook) => '♜',
        (Color::Dark, PieceKind::Queen) => '♛',
        (Color::Dark, PieceKind::King) => '♚',
    }
}
