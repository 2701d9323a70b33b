//! The move applier as a turn-based state machine.
//!
//! A `Game` owns the board, its blocker cache and the legal moves of the side
//! to move. Each ply cycles `AwaitingSelection -> PieceSelected -> (move
//! applied) -> AwaitingSelection` for the other side, with a detour through
//! `PromotionPending` when a pawn reaches its last rank. When the side to
//! move has no legal moves the game parks in `GameOver` until `new_game`.
//!
//! Bad selections are never errors: they come back as `NoOp`, `Deselected`
//! or `Rejected`. Errors are reserved for broken invariants and for misuse
//! of the promotion step.

use crate::chess_errors::ChessErrors;
use crate::game::game_config::GameConfig;
use crate::game::promotion::{PromotionChooser, PromotionRequest};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::is_promotion_choice;
use crate::game_state::chess_types::{Color, PieceId, PieceKind, Square};
use crate::game_state::piece::PieceView;
use crate::move_generation::blockers::BlockerCache;
use crate::move_generation::legal_move_apply::{apply_move_to_board, promote, AppliedMove};
use crate::move_generation::legal_move_generator::{legal_moves_for_side_to_move, GameStatus, LegalMoveSet};
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingSelection,
    PieceSelected(PieceId),
    PromotionPending { pawn: PieceId, square: Square },
    GameOver(GameStatus),
}

/// Why a requested move was not played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    GameOver,
    PromotionPending,
    UnknownPiece,
    NotSideToMove,
    IllegalTarget,
}

/// One completed ply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// Ply count after this move, starting at 1.
    pub ply: u32,
    pub mv: Move,
    pub captured: Option<PieceView>,
    pub castled_rook: Option<(PieceId, Square, Square)>,
    pub promoted_to: Option<(PieceId, PieceKind)>,
    pub status_after: GameStatus,
}

impl MoveRecord {
    /// `e2e4`, or `e7e8q` for promotions.
    pub fn long_algebraic(&self) -> String {
        let mut text = self.mv.long_algebraic();
        if let Some((_, kind)) = self.promoted_to {
            text.push(kind.letter().to_ascii_lowercase());
        }
        text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied(MoveRecord),
    PromotionPending(PromotionRequest),
    Rejected(RejectReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected { piece: PieceId, targets: Vec<Square> },
    Deselected,
    Moved(ApplyOutcome),
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromotionResolution {
    Completed(MoveRecord),
    StillPending,
}

#[derive(Debug, Clone)]
struct PendingPromotion {
    applied: AppliedMove,
    ply_before: u32,
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    cache: BlockerCache,
    config: GameConfig,
    phase: Phase,
    legal: LegalMoveSet,
    captured: [u32; 2],
    history: Vec<MoveRecord>,
    pending: Option<PendingPromotion>,
}

impl Game {
    /// A game at the standard starting position, white to move.
    pub fn new(config: GameConfig) -> Result<Self, ChessErrors> {
        Self::from_board(Board::standard(), config)
    }

    /// A game continuing from an arbitrary valid position.
    pub fn from_board(mut board: Board, config: GameConfig) -> Result<Self, ChessErrors> {
        board.validate()?;
        let mut cache = BlockerCache::new();
        let legal = legal_moves_for_side_to_move(&mut board, &mut cache)?;
        let phase = phase_for(legal.status);
        Ok(Self {
            board,
            cache,
            config,
            phase,
            legal,
            captured: [0; 2],
            history: Vec::new(),
            pending: None,
        })
    }

    /// Back to move one, white to move.
    pub fn new_game(&mut self) -> Result<(), ChessErrors> {
        let config = self.config.clone();
        *self = Self::new(config)?;
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Completed plies, see `Board::ply`.
    pub fn ply(&self) -> u32 {
        self.board.ply()
    }

    /// Status after the last completed ply.
    pub fn status(&self) -> GameStatus {
        self.legal.status
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver(_))
    }

    pub fn selected(&self) -> Option<PieceId> {
        match self.phase {
            Phase::PieceSelected(id) => Some(id),
            _ => None,
        }
    }

    pub fn legal_moves(&self) -> &[Move] {
        &self.legal.moves
    }

    pub fn legal_move_set(&self) -> &LegalMoveSet {
        &self.legal
    }

    /// Target squares of `piece`, for highlighting.
    pub fn legal_targets(&self, piece: PieceId) -> Vec<Square> {
        if self.pending.is_some() {
            return Vec::new();
        }
        self.legal.for_piece(piece).map(|mv| mv.to).collect()
    }

    /// Every piece on the board, for redraws.
    pub fn snapshot(&self) -> Vec<PieceView> {
        self.board.pieces().map(|piece| piece.view()).collect()
    }

    /// Material still on the board for `color`, king excluded.
    pub fn material(&self, color: Color) -> u32 {
        self.board.side(color).material()
    }

    /// Value of the enemy pieces `color` has captured so far.
    pub fn captured_material(&self, color: Color) -> u32 {
        self.captured[color.index()]
    }

    /// On-board material lead of `color` over its opponent.
    pub fn material_balance(&self, color: Color) -> i32 {
        self.material(color) as i32 - self.material(color.opposite()) as i32
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn pending_promotion(&self) -> Option<PromotionRequest> {
        match self.phase {
            Phase::PromotionPending { pawn, square } => Some(PromotionRequest {
                pawn,
                color: self.board.side_to_move(),
                square,
            }),
            _ => None,
        }
    }

    /// Square-driven selection, as a board UI would call it.
    pub fn click(&mut self, square: Square) -> Result<ClickOutcome, ChessErrors> {
        match self.phase {
            Phase::GameOver(_) | Phase::PromotionPending { .. } => Ok(ClickOutcome::NoOp),
            Phase::AwaitingSelection => Ok(self.select_at(square)),
            Phase::PieceSelected(selected) => {
                if self.legal.for_piece(selected).any(|mv| mv.to == square) {
                    return Ok(ClickOutcome::Moved(self.apply_move(selected, square)?));
                }
                let reselect = self
                    .board
                    .piece_at(square)
                    .is_some_and(|piece| piece.color == self.side_to_move() && piece.id != selected);
                if reselect {
                    Ok(self.select_at(square))
                } else {
                    self.phase = Phase::AwaitingSelection;
                    Ok(ClickOutcome::Deselected)
                }
            }
        }
    }

    fn select_at(&mut self, square: Square) -> ClickOutcome {
        let own = self
            .board
            .piece_at(square)
            .filter(|piece| piece.color == self.board.side_to_move())
            .map(|piece| piece.id);
        match own {
            Some(piece) => {
                self.phase = Phase::PieceSelected(piece);
                ClickOutcome::Selected {
                    piece,
                    targets: self.legal_targets(piece),
                }
            }
            None => ClickOutcome::NoOp,
        }
    }

    /// Plays `piece` to `target` if that is one of the current legal moves.
    pub fn apply_move(&mut self, piece: PieceId, target: Square) -> Result<ApplyOutcome, ChessErrors> {
        match self.phase {
            Phase::GameOver(_) => return Ok(ApplyOutcome::Rejected(RejectReason::GameOver)),
            Phase::PromotionPending { .. } => return Ok(ApplyOutcome::Rejected(RejectReason::PromotionPending)),
            _ => {}
        }
        let Some(mover) = self.board.piece(piece) else {
            return Ok(ApplyOutcome::Rejected(RejectReason::UnknownPiece));
        };
        if mover.color != self.board.side_to_move() {
            return Ok(ApplyOutcome::Rejected(RejectReason::NotSideToMove));
        }
        let Some(mv) = self.legal.for_piece(piece).find(|mv| mv.to == target).copied() else {
            return Ok(ApplyOutcome::Rejected(RejectReason::IllegalTarget));
        };

        let ply_before = self.board.ply();
        let applied = apply_move_to_board(&mut self.board, &mv)?;
        self.captured[mv.color.index()] += applied.captured_value();

        if applied.promotion_pending {
            let request = PromotionRequest {
                pawn: mv.piece,
                color: mv.color,
                square: mv.to,
            };
            self.phase = Phase::PromotionPending {
                pawn: mv.piece,
                square: mv.to,
            };
            self.pending = Some(PendingPromotion { applied, ply_before });
            return Ok(ApplyOutcome::PromotionPending(request));
        }

        Ok(ApplyOutcome::Applied(self.finish_ply(applied, None, ply_before)?))
    }

    /// Replaces the waiting pawn with `kind` and closes the ply.
    pub fn complete_promotion(&mut self, kind: PieceKind) -> Result<MoveRecord, ChessErrors> {
        let Phase::PromotionPending { pawn, .. } = self.phase else {
            return Err(ChessErrors::NoPromotionPending);
        };
        if !is_promotion_choice(kind) {
            return Err(ChessErrors::InvalidPromotionChoice(kind));
        }
        let pending = self.pending.take().ok_or(ChessErrors::NoPromotionPending)?;
        let promoted = match promote(&mut self.board, pawn, kind) {
            Ok(id) => id,
            Err(err) => {
                self.pending = Some(pending);
                return Err(err);
            }
        };
        self.finish_ply(pending.applied, Some((promoted, kind)), pending.ply_before)
    }

    /// Asks `chooser` repeatedly until it names a valid piece or the query
    /// limit runs out, then falls back to the configured piece if any.
    pub fn resolve_promotion<C>(&mut self, chooser: &mut C) -> Result<PromotionResolution, ChessErrors>
    where
        C: PromotionChooser + ?Sized,
    {
        let request = self.pending_promotion().ok_or(ChessErrors::NoPromotionPending)?;
        for _ in 0..self.config.promotion_query_limit {
            match chooser.choose(&request) {
                Some(kind) if is_promotion_choice(kind) => {
                    return self.complete_promotion(kind).map(PromotionResolution::Completed);
                }
                _ => {}
            }
        }
        match self.config.promotion_fallback {
            Some(kind) => self.complete_promotion(kind).map(PromotionResolution::Completed),
            None => Ok(PromotionResolution::StillPending),
        }
    }

    fn finish_ply(
        &mut self,
        applied: AppliedMove,
        promoted_to: Option<(PieceId, PieceKind)>,
        ply_before: u32,
    ) -> Result<MoveRecord, ChessErrors> {
        let after = self.board.ply();
        if ply_before.checked_add(1) != Some(after) {
            return Err(ChessErrors::MoveCounterRegression {
                before: ply_before,
                after,
            });
        }
        self.board.validate()?;

        self.legal = legal_moves_for_side_to_move(&mut self.board, &mut self.cache)?;
        let status = self.legal.status;
        self.phase = phase_for(status);

        let record = MoveRecord {
            ply: after,
            mv: applied.mv,
            captured: applied.captured.map(|piece| piece.view()),
            castled_rook: applied.rook_hop,
            promoted_to,
            status_after: status,
        };
        self.history.push(record.clone());
        Ok(record)
    }
}

fn phase_for(status: GameStatus) -> Phase {
    if status.is_terminal() {
        Phase::GameOver(status)
    } else {
        Phase::AwaitingSelection
    }
}
