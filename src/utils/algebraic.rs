use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::{PieceKind, Square};

/// Parses a square such as `e4` (case-insensitive file letter).
pub fn parse_square(text: &str) -> Result<Square, ChessErrors> {
    let bytes = text.trim().as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidAlgebraic(text.to_owned()));
    }
    let file_byte = bytes[0].to_ascii_lowercase();
    let rank_byte = bytes[1];
    if !(b'a'..=b'h').contains(&file_byte) || !(b'1'..=b'8').contains(&rank_byte) {
        return Err(ChessErrors::InvalidAlgebraic(text.to_owned()));
    }
    Square::new((file_byte - b'a' + 1) as i8, (rank_byte - b'0') as i8)
}

/// Parses long algebraic move text: `e2e4`, or `e7e8q` with a promotion
/// suffix.
pub fn parse_move(text: &str) -> Result<(Square, Square, Option<PieceKind>), ChessErrors> {
    let trimmed = text.trim();
    if !trimmed.is_ascii() || !(4..=5).contains(&trimmed.len()) {
        return Err(ChessErrors::InvalidAlgebraic(text.to_owned()));
    }
    let from = parse_square(&trimmed[0..2])?;
    let to = parse_square(&trimmed[2..4])?;
    let promotion = match trimmed[4..].chars().next() {
        None => None,
        Some(ch) => Some(promotion_from_char(ch).ok_or_else(|| ChessErrors::InvalidAlgebraic(text.to_owned()))?),
    };
    Ok((from, to, promotion))
}

fn promotion_from_char(ch: char) -> Option<PieceKind> {
    match ch.to_ascii_lowercase() {
        'q' => Some(PieceKind::Queen),
        'r' => Some(PieceKind::Rook),
        'b' => Some(PieceKind::Bishop),
        'n' => Some(PieceKind::Knight),
        _ => None,
    }
}
