// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

//! The turn controller.
//!
//! A `Game` owns one match: the position, the turn phase, and the move
//! history. It is the single writer — every mutation flows through
//! `attempt_move` and `choose_promotion`, and a rejected request
//! changes nothing at all. The cycle per half-move:
//!
//! 1. validate the request against the active team and the piece's
//!    enumerated move set;
//! 2. apply the move and its side effects (capture, en-passant removal,
//!    castling rook relocation, en-passant bookkeeping);
//! 3. unless a pawn reached the far rank (which suspends the turn in
//!    `PromotionPending` until a choice arrives), rescan pins and
//!    checks for the incoming side and evaluate checkmate/stalemate;
//! 4. flip the active team, or end the match.
//!
//! Games are plain values: two matches are fully independent and may
//! run concurrently on separate threads.

use anyhow::Result;
#[cfg(feature = "random")]
use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{
    Color, File, PieceId, PieceKind, Position, Promotion, Rank, Square,
};
use crate::rules::{self, MoveKind, MoveSet};

pub(crate) mod scan;

use Color::*;
use TurnPhase::*;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoveError {
    #[error("no piece on the source square")]
    VacantSquare,
    #[error("piece does not belong to the active team")]
    NotYourTurn,
    #[error("not a legal move")]
    IllegalMove,
    #[error("a promotion choice is pending")]
    AwaitingPromotion,
    #[error("no pawn is awaiting promotion")]
    NoPendingPromotion,
    #[error("the match is over")]
    MatchOver,
}
use MoveError::*;

/// Why a finished match ended.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    Checkmate { winner: Color },
    Stalemate,
}

/// The observable state of the turn cycle. The transient states of a
/// half-move (applying, rescanning, terminal evaluation) live inside
/// `attempt_move`; between calls a match is always in one of these.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingMove(Color),
    PromotionPending(Color),
    GameOver(Terminal),
}

/// Notifications for the presentation layer, in application order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    Captured {
        color: Color,
        kind: PieceKind,
        at: Square,
    },
    Moved {
        color: Color,
        kind: PieceKind,
        from: Square,
        to: Square,
    },
    Promoted {
        color: Color,
        kind: PieceKind,
        at: Square,
    },
}

/// One committed half-move, enough to rebuild or notate the game.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub color: Color,
    pub piece: PieceKind,
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
    pub captured: Option<PieceKind>,
    pub promotion: Option<Promotion>,
}

#[derive(Debug, Clone)]
pub struct MoveOutcome {
    pub events: Vec<BoardEvent>,
    pub phase: TurnPhase,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    position: Position,
    phase: TurnPhase,
    promoting: Option<PieceId>,
    history: Vec<MoveRecord>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A fresh match from the standard layout, White to move.
    pub fn new() -> Self {
        Self::from_position(Position::standard(), White)
    }

    /// Enters a match mid-game. The detector runs immediately so pin
    /// and check state are coherent before the first query, and a
    /// position that is already decided comes up `GameOver`.
    pub fn from_position(mut position: Position, active: Color) -> Self {
        scan::refresh(&mut position, active);
        let mut game = Self {
            position,
            phase: AwaitingMove(active),
            promoting: None,
            history: Vec::new(),
        };
        if let Some(terminal) = game.evaluate_terminal(active) {
            game.phase = GameOver(terminal);
        }
        game
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// The team whose action the match is waiting for, if any.
    pub fn active_team(&self) -> Option<Color> {
        match self.phase {
            AwaitingMove(team) | PromotionPending(team) => Some(team),
            GameOver(_) => None,
        }
    }

    pub fn terminal(&self) -> Option<Terminal> {
        match self.phase {
            GameOver(terminal) => Some(terminal),
            _ => None,
        }
    }

    pub fn in_check(&self, color: Color) -> bool {
        self.position
            .king(color)
            .is_some_and(|king| king.in_check())
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// The square of the pawn awaiting a promotion choice, if any.
    pub fn pending_promotion(&self) -> Option<Square> {
        let piece = self.position.piece(self.promoting?)?;
        Some(piece.square())
    }

    /// The advisory move set for the piece on `from`: what the
    /// presentation layer marks up when the player picks a piece.
    /// Empty unless the match awaits a move from that piece's team.
    pub fn valid_moves(&self, from: Square) -> MoveSet {
        let AwaitingMove(team) = self.phase else {
            return MoveSet::new();
        };
        match self.position.piece_at(from) {
            Some(piece) if piece.color() == team => {
                rules::legal_moves(&self.position, piece.id())
            }
            _ => MoveSet::new(),
        }
    }

    /// The single authoritative mutation entrypoint. Only call on the
    /// authoritative instance; clients forward their requests here and
    /// the resulting state is replicated back out.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome> {
        let team = match self.phase {
            AwaitingMove(team) => team,
            PromotionPending(_) => return Err(AwaitingPromotion.into()),
            GameOver(_) => return Err(MatchOver.into()),
        };
        let id = self.position.occupant(from).ok_or(VacantSquare)?;
        let piece = self.position.piece(id).ok_or(VacantSquare)?;
        if piece.color() != team {
            return Err(NotYourTurn.into());
        }
        let kind = piece.kind();
        let legal = rules::legal_moves(&self.position, id);
        let move_kind = legal.get(to).ok_or(IllegalMove)?;

        // validated; everything below commits
        let mut events = Vec::new();
        let mut captured = None;
        match move_kind {
            MoveKind::Standard => {
                if let Some(victim_id) = self.position.occupant(to) {
                    captured = self.destroy(victim_id, &mut events);
                }
                self.position.relocate(id, to);
                self.position.set_en_passant(None);
            }
            MoveKind::DoubleAdvance => {
                self.position.relocate(id, to);
                self.position.set_en_passant(Some(id));
            }
            MoveKind::EnPassant => {
                let target = Square::new(to.file(), from.rank());
                match self.position.occupant(target) {
                    Some(victim_id) => captured = self.destroy(victim_id, &mut events),
                    None => log::warn!("en passant to {to} found no pawn on {target}"),
                }
                self.position.relocate(id, to);
                self.position.set_en_passant(None);
            }
            MoveKind::ShortCastle | MoveKind::LongCastle => {
                let back = Rank::back_rank(team);
                let (rook_from, rook_to) = if move_kind == MoveKind::ShortCastle {
                    (Square::new(File::FileH, back), Square::new(File::FileF, back))
                } else {
                    (Square::new(File::FileA, back), Square::new(File::FileD, back))
                };
                self.position.relocate(id, to);
                match self.position.occupant(rook_from) {
                    Some(rook_id) => {
                        self.position.relocate(rook_id, rook_to);
                        events.push(BoardEvent::Moved {
                            color: team,
                            kind: PieceKind::Rook,
                            from: rook_from,
                            to: rook_to,
                        });
                    }
                    None => log::warn!("castling without a rook on {rook_from}"),
                }
                self.position.set_en_passant(None);
            }
        }
        events.push(BoardEvent::Moved {
            color: team,
            kind,
            from,
            to,
        });
        self.history.push(MoveRecord {
            color: team,
            piece: kind,
            from,
            to,
            kind: move_kind,
            captured,
            promotion: None,
        });

        if kind.is_pawn() && to.rank() == Rank::promotion_rank(team) {
            // suspend the turn until the owning side picks a piece
            self.promoting = Some(id);
            self.phase = PromotionPending(team);
            log::debug!("{team} pawn on {to} awaiting promotion");
            return Ok(MoveOutcome {
                events,
                phase: self.phase,
            });
        }

        self.finish_turn(team);
        Ok(MoveOutcome {
            events,
            phase: self.phase,
        })
    }

    /// Resolves a pending promotion: the pawn is destroyed, a new piece
    /// of the chosen kind takes its square, and the suspended turn
    /// completes through the usual rescan and terminal evaluation.
    pub fn choose_promotion(&mut self, choice: Promotion) -> Result<MoveOutcome> {
        let PromotionPending(team) = self.phase else {
            log::warn!("promotion choice arrived with no pawn awaiting promotion");
            return Err(NoPendingPromotion.into());
        };
        let Some(pawn_id) = self.promoting else {
            log::warn!("promotion pending but the pawn handle is gone");
            return Err(NoPendingPromotion.into());
        };
        let kind: PieceKind = choice.into();
        let Some(square) = self.position.piece(pawn_id).map(|pawn| pawn.square()) else {
            log::warn!("promotion pending but the pawn is no longer alive");
            return Err(NoPendingPromotion.into());
        };
        self.promoting = None;
        if self.position.promote(pawn_id, kind).is_none() {
            log::warn!("promotion of the pawn on {square} failed");
        }
        if let Some(record) = self.history.last_mut() {
            record.promotion = Some(choice);
        }
        let events = vec![BoardEvent::Promoted {
            color: team,
            kind,
            at: square,
        }];
        log::debug!("{team} pawn on {square} promoted to {kind}");
        self.finish_turn(team);
        Ok(MoveOutcome {
            events,
            phase: self.phase,
        })
    }

    fn destroy(&mut self, id: PieceId, events: &mut Vec<BoardEvent>) -> Option<PieceKind> {
        let victim = self.position.capture(id)?;
        events.push(BoardEvent::Captured {
            color: victim.color(),
            kind: victim.kind(),
            at: victim.square(),
        });
        Some(victim.kind())
    }

    /// RecomputingCheckState and CheckingTerminal, then the flip.
    fn finish_turn(&mut self, mover: Color) {
        let incoming = !mover;
        scan::refresh(&mut self.position, incoming);
        self.phase = match self.evaluate_terminal(incoming) {
            Some(terminal) => {
                log::debug!("match over: {terminal:?}");
                GameOver(terminal)
            }
            None => AwaitingMove(incoming),
        };
    }

    /// Zero legal moves for `side` decides the match: checkmate if its
    /// king stands in check, stalemate otherwise. Uses the early-exit
    /// existence check per piece, never a full enumeration.
    fn evaluate_terminal(&self, side: Color) -> Option<Terminal> {
        let any_move = self
            .position
            .pieces_of(side)
            .iter()
            .any(|&id| rules::has_move(&self.position, id));
        if any_move {
            return None;
        }
        if self.in_check(side) {
            Some(Terminal::Checkmate { winner: !side })
        } else {
            Some(Terminal::Stalemate)
        }
    }
}

/// Session-layer vocabulary for the hosting server: how a match ended
/// from the players' point of view. The rules core reports `Terminal`;
/// resignations, abandonment and agreed draws arrive from outside the
/// board.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MatchId(u64);

impl MatchId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
    #[cfg(feature = "random")]
    pub fn random() -> Self {
        Self(thread_rng().gen())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Win(Color, WinReason),
    Draw(DrawReason),
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    Checkmate,
    TimeExpired,
    Resigned,
    Abandoned,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    Agreed,
    Stalemate,
}

impl From<Terminal> for MatchResult {
    fn from(value: Terminal) -> Self {
        match value {
            Terminal::Checkmate { winner } => MatchResult::Win(winner, WinReason::Checkmate),
            Terminal::Stalemate => MatchResult::Draw(DrawReason::Stalemate),
        }
    }
}
