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

//! Per-piece move rules.
//!
//! One policy module per piece kind, dispatched over the closed
//! `PieceKind` variant set. Every operation reads the position and the
//! piece's ambient flags (in-check, pinned, has-moved) and never writes:
//!
//! * `legal_moves` enumerates the advisory destination set the
//!   presentation layer marks up, captures flagged separately.
//! * `can_attack` answers the geometry-plus-clearance attack question
//!   the check scan asks, independent of turn or check context.
//! * `has_move` is the early-exit existence check the terminal
//!   evaluation runs; it stops at the first legal move.
//!
//! Check evasion and pin restriction are expressed as a target-set
//! `Constraint` computed once per piece: a single check allows only
//! capturing the checker or interposing on its line; a pin allows only
//! the pin line; a pinned piece under check gets the intersection;
//! double check freezes everything but the king.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::ops::{BitOr, BitOrAssign};

use crate::board::{Color, Direction, Pin, Piece, PieceId, PieceKind, Position, Square};

mod bishop;
mod king;
mod knight;
mod pawn;
mod queen;
mod rook;

/// How a destination is reached. The turn controller keys its side
/// effects off this.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Standard,
    DoubleAdvance,
    EnPassant,
    ShortCastle,
    LongCastle,
}

/// The advisory result of move enumeration: destination squares plus
/// the subset the presentation layer highlights as captures. A pure
/// value; "hiding" shown moves is the caller dropping it.
#[derive(Debug, Clone, Default)]
pub struct MoveSet {
    moves: HashMap<Square, MoveKind>,
    captures: HashSet<Square>,
}

impl MoveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, dest: Square, kind: MoveKind) {
        self.moves.insert(dest, kind);
    }

    pub fn insert_capture(&mut self, dest: Square, kind: MoveKind) {
        self.moves.insert(dest, kind);
        self.captures.insert(dest);
    }

    pub fn destinations(&self) -> impl Iterator<Item = Square> + '_ {
        self.moves.keys().copied()
    }

    pub fn captures(&self) -> impl Iterator<Item = Square> + '_ {
        self.captures.iter().copied()
    }

    pub fn get(&self, dest: Square) -> Option<MoveKind> {
        self.moves.get(&dest).copied()
    }

    pub fn contains(&self, dest: Square) -> bool {
        self.moves.contains_key(&dest)
    }

    pub fn is_capture(&self, dest: Square) -> bool {
        self.captures.contains(&dest)
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }
}

impl BitOr for MoveSet {
    type Output = Self;
    fn bitor(mut self, rhs: Self) -> Self::Output {
        self |= rhs;
        self
    }
}

impl BitOrAssign for MoveSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.moves.extend(rhs.moves);
        self.captures.extend(rhs.captures);
    }
}

/// Enumerates the legal destinations for the piece at `id`. Empty for a
/// dead handle.
pub fn legal_moves(position: &Position, id: PieceId) -> MoveSet {
    let Some(piece) = position.piece(id) else {
        return MoveSet::new();
    };
    match piece.kind() {
        PieceKind::Pawn => pawn::moves(position, piece),
        PieceKind::Knight => knight::moves(position, piece),
        PieceKind::Bishop => bishop::moves(position, piece),
        PieceKind::Rook => rook::moves(position, piece),
        PieceKind::Queen => queen::moves(position, piece),
        PieceKind::King => king::moves(position, piece),
    }
}

/// Whether the piece at `id` attacks `target` on the current position:
/// geometry plus path clearance, independent of whose turn it is. False
/// when the piece stands on `target`.
pub fn can_attack(position: &Position, id: PieceId, target: Square) -> bool {
    can_attack_vacating(position, id, target, None)
}

pub(crate) fn can_attack_vacating(
    position: &Position,
    id: PieceId,
    target: Square,
    vacated: Option<Square>,
) -> bool {
    let Some(piece) = position.piece(id) else {
        return false;
    };
    if piece.square() == target {
        return false;
    }
    match piece.kind() {
        PieceKind::Pawn => pawn::attacks(piece, target),
        PieceKind::Knight => knight::attacks(piece, target),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            slider_attacks(position, piece, target, vacated)
        }
        PieceKind::King => king::attacks(piece, target),
    }
}

/// Early-exit existence check: does the piece at `id` have at least one
/// legal move? Used to answer "does this side have any move" — never to
/// count moves.
pub fn has_move(position: &Position, id: PieceId) -> bool {
    let Some(piece) = position.piece(id) else {
        return false;
    };
    match piece.kind() {
        PieceKind::Pawn => pawn::has_move(position, piece),
        PieceKind::Knight => knight::has_move(position, piece),
        PieceKind::Bishop => bishop::has_move(position, piece),
        PieceKind::Rook => rook::has_move(position, piece),
        PieceKind::Queen => queen::has_move(position, piece),
        PieceKind::King => king::has_move(position, piece),
    }
}

/// Whether any piece of `by` attacks `target`.
pub fn is_square_attacked(position: &Position, by: Color, target: Square) -> bool {
    is_square_attacked_vacating(position, by, target, None)
}

pub(crate) fn is_square_attacked_vacating(
    position: &Position,
    by: Color,
    target: Square,
    vacated: Option<Square>,
) -> bool {
    position
        .pieces_of(by)
        .iter()
        .any(|&id| can_attack_vacating(position, id, target, vacated))
}

/// Pin detection, shared by every non-king kind: scan the line from the
/// piece toward its own king; a matching enemy slider on the far side
/// with a clear path establishes the pin. Kings never pin themselves.
pub(crate) fn scan_pin(position: &Position, piece: &Piece) -> Option<Pin> {
    if piece.kind().is_king() {
        return None;
    }
    let king_square = position.king_square(piece.color())?;
    let offset = piece.square() - king_square;
    let axis = offset.axis()?;
    let step = offset.to_unit()?;
    if !position.clear_path_on(axis, king_square, piece.square(), None) {
        return None;
    }
    // walk away from the king; the first occupant decides
    let mut next = piece.square() + step;
    while let Some(square) = next {
        if let Some(other) = position.piece_at(square) {
            if other.color() != piece.color() && other.kind().slides_on(axis) {
                return Some(Pin {
                    axis,
                    attacker: other.id(),
                });
            }
            return None;
        }
        next = square + step;
    }
    None
}

/// Target-set restriction from the ambient check/pin state.
#[derive(Debug, Clone)]
pub(crate) enum Constraint {
    /// No restriction beyond geometry and occupancy.
    Free,
    /// Destinations must fall in this set.
    Within(HashSet<Square>),
    /// No move can help; double check.
    Frozen,
}

impl Constraint {
    pub(crate) fn allows(&self, dest: Square) -> bool {
        match self {
            Constraint::Free => true,
            Constraint::Within(set) => set.contains(&dest),
            Constraint::Frozen => false,
        }
    }

    pub(crate) fn is_frozen(&self) -> bool {
        matches!(self, Constraint::Frozen)
    }
}

pub(crate) fn constraint_for(position: &Position, piece: &Piece) -> Constraint {
    debug_assert!(!piece.kind().is_king());
    let Some(king) = position.king(piece.color()) else {
        // match setup still in flight; apply geometry only
        log::debug!(
            "move rules: {} king not registered, skipping check and pin restrictions",
            piece.color()
        );
        return Constraint::Free;
    };
    let mut allowed: Option<HashSet<Square>> = None;
    if king.in_check() {
        if king.in_double_check() {
            return Constraint::Frozen;
        }
        match king.checkers().first().and_then(|&id| position.piece(id)) {
            Some(checker) => {
                let mut evasions: HashSet<Square> =
                    king.square().between(checker.square()).collect();
                evasions.insert(checker.square());
                allowed = Some(evasions);
            }
            None => {
                log::warn!(
                    "move rules: {} king flagged in check with an empty attacker list",
                    piece.color()
                );
            }
        }
    }
    if let Some(pin) = piece.pin() {
        match position.piece(pin.attacker) {
            Some(attacker) => {
                let mut lane: HashSet<Square> =
                    king.square().between(attacker.square()).collect();
                lane.insert(attacker.square());
                lane.remove(&piece.square());
                allowed = Some(match allowed {
                    Some(evasions) => evasions.intersection(&lane).copied().collect(),
                    None => lane,
                });
            }
            None => {
                log::warn!("move rules: pinning attacker of {} is gone", piece.id());
            }
        }
    }
    match allowed {
        Some(set) => Constraint::Within(set),
        None => Constraint::Free,
    }
}

/// Shared sliding-move walk for bishop, rook and queen: each ray runs
/// until blocked, own pieces block, enemy pieces are captured-and-stop.
pub(crate) fn slider_moves(
    position: &Position,
    piece: &Piece,
    directions: impl Iterator<Item = Direction>,
) -> MoveSet {
    let mut result = MoveSet::new();
    let constraint = constraint_for(position, piece);
    if constraint.is_frozen() {
        return result;
    }
    for direction in directions {
        for square in crate::board::ray(piece.square(), direction) {
            match position.piece_at(square) {
                None => {
                    if constraint.allows(square) {
                        result.insert(square, MoveKind::Standard);
                    }
                }
                Some(other) => {
                    if other.color() != piece.color() && constraint.allows(square) {
                        result.insert_capture(square, MoveKind::Standard);
                    }
                    break;
                }
            }
        }
    }
    result
}

pub(crate) fn slider_has_move(
    position: &Position,
    piece: &Piece,
    directions: impl Iterator<Item = Direction>,
) -> bool {
    let constraint = constraint_for(position, piece);
    if constraint.is_frozen() {
        return false;
    }
    for direction in directions {
        for square in crate::board::ray(piece.square(), direction) {
            match position.piece_at(square) {
                None => {
                    if constraint.allows(square) {
                        return true;
                    }
                }
                Some(other) => {
                    if other.color() != piece.color() && constraint.allows(square) {
                        return true;
                    }
                    break;
                }
            }
        }
    }
    false
}

pub(crate) fn slider_attacks(
    position: &Position,
    piece: &Piece,
    target: Square,
    vacated: Option<Square>,
) -> bool {
    let Some(axis) = piece.square().axis_to(target) else {
        return false;
    };
    piece.kind().slides_on(axis) && position.clear_path_on(axis, piece.square(), target, vacated)
}
