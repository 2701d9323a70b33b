//! Errors used throughout the rules engine.
//!
//! `ChessErrors` is the single error type returned by board mutation, move
//! generation and the game state machine. The variants fall into three groups:
//! - input errors (bad algebraic text, bad diagrams, off-board coordinates),
//!   which callers are expected to recover from;
//! - structural invariant violations (two pieces on one square, a missing
//!   king, a move counter that went backwards), which mean move application
//!   has a bug and every later legality answer is meaningless;
//! - state machine misuse (completing a promotion that is not pending, moving
//!   while a promotion is unresolved) and misbehaving agents.
//!
//! Illegal selections are not errors. Picking an empty square or a target
//! outside the legal-move list yields a no-op/rejected outcome instead.

use std::error::Error;
use std::fmt;

use crate::game_state::chess_types::{Color, PieceId, PieceKind, Square};

/// Unified error type for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// Generic failure used by unit tests.
    FailedTest,

    /// A square or move string could not be parsed.
    ///
    /// Payload: the offending text.
    InvalidAlgebraic(String),

    /// A board diagram had the wrong shape or an unknown piece letter.
    InvalidDiagram(String),

    /// File/rank pair outside 1..=8.
    InvalidSquare(i8, i8),

    /// Two pieces were asked to share a square.
    SquareCollision(Square),

    /// A side has no king. Fatal.
    MissingKing(Color),

    /// A side has more than one king. Fatal.
    DuplicateKing(Color),

    /// A move would have removed a king from the board. Fatal.
    KingCaptured(Color),

    /// The ply counter failed to advance. Fatal.
    MoveCounterRegression { before: u32, after: u32 },

    /// A piece id does not belong to any side.
    UnknownPiece(PieceId),

    /// The occupancy grid disagrees with the side piece sets. Fatal.
    GridOutOfSync(Square),

    /// Castling was applied but the partner rook is not where it must be.
    MissingCastlingRook(Square),

    /// Only Queen, Knight, Rook and Bishop may replace a pawn.
    InvalidPromotionChoice(PieceKind),

    /// `complete_promotion` was called with nothing pending.
    NoPromotionPending,

    /// A pawn sits on its last rank with no replacement applied.
    UnresolvedPromotion(Square),

    /// An agent failed or answered with a move outside the legal list.
    AgentFailure(String),
}

impl ChessErrors {
    /// True for structural invariant violations that must abort the game.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ChessErrors::SquareCollision(_)
                | ChessErrors::MissingKing(_)
                | ChessErrors::DuplicateKing(_)
                | ChessErrors::KingCaptured(_)
                | ChessErrors::MoveCounterRegression { .. }
                | ChessErrors::GridOutOfSync(_)
                | ChessErrors::MissingCastlingRook(_)
                | ChessErrors::UnresolvedPromotion(_)
        )
    }
}

impl fmt::Display for ChessErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessErrors::FailedTest => write!(f, "test failure"),
            ChessErrors::InvalidAlgebraic(text) => write!(f, "invalid algebraic text: {text}"),
            ChessErrors::InvalidDiagram(msg) => write!(f, "invalid board diagram: {msg}"),
            ChessErrors::InvalidSquare(file, rank) => {
                write!(f, "square ({file},{rank}) is off the board")
            }
            ChessErrors::SquareCollision(square) => {
                write!(f, "two pieces would occupy {square}")
            }
            ChessErrors::MissingKing(color) => write!(f, "{} has no king", color.name()),
            ChessErrors::DuplicateKing(color) => {
                write!(f, "{} has more than one king", color.name())
            }
            ChessErrors::KingCaptured(color) => {
                write!(f, "move would capture the {} king", color.name())
            }
            ChessErrors::MoveCounterRegression { before, after } => {
                write!(f, "move counter went from {before} to {after}")
            }
            ChessErrors::UnknownPiece(id) => write!(f, "no piece with id {id}"),
            ChessErrors::GridOutOfSync(square) => {
                write!(f, "occupancy grid out of sync at {square}")
            }
            ChessErrors::MissingCastlingRook(square) => {
                write!(f, "castling rook missing from {square}")
            }
            ChessErrors::InvalidPromotionChoice(kind) => {
                write!(f, "cannot promote to {kind:?}")
            }
            ChessErrors::NoPromotionPending => write!(f, "no promotion is pending"),
            ChessErrors::UnresolvedPromotion(square) => {
                write!(f, "pawn on {square} was never promoted")
            }
            ChessErrors::AgentFailure(msg) => write!(f, "agent failure: {msg}"),
        }
    }
}

impl Error for ChessErrors {}
