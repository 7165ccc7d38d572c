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

use crate::board::{Offset, Piece, Position, Square};

use super::{constraint_for, MoveKind, MoveSet};

/// Pawn movement: single push onto an empty square, double push from
/// the start rank when both squares are empty, diagonal captures onto
/// enemy pieces, and the en-passant capture of a pawn that just
/// double-stepped to an adjacent file on the same rank. Promotion is
/// not a distinct destination; the turn controller suspends the turn
/// when a push or capture lands on the far rank.
pub(super) fn moves(position: &Position, piece: &Piece) -> MoveSet {
    let mut result = MoveSet::new();
    let constraint = constraint_for(position, piece);
    if constraint.is_frozen() {
        return result;
    }
    let from = piece.square();
    let forward = piece.color().forward();

    if let Some(one) = from + Offset::new(0, forward) {
        if position.is_vacant(one) {
            if constraint.allows(one) {
                result.insert(one, MoveKind::Standard);
            }
            if !piece.has_moved() {
                if let Some(two) = one + Offset::new(0, forward) {
                    if position.is_vacant(two) && constraint.allows(two) {
                        result.insert(two, MoveKind::DoubleAdvance);
                    }
                }
            }
        }
    }

    for dx in [-1, 1] {
        let Some(dest) = from + Offset::new(dx, forward) else {
            continue;
        };
        if let Some(other) = position.piece_at(dest) {
            if other.color() != piece.color() && constraint.allows(dest) {
                result.insert_capture(dest, MoveKind::Standard);
            }
        }
    }

    if let Some(dest) = en_passant_target(position, piece) {
        if constraint.allows(dest) {
            result.insert_capture(dest, MoveKind::EnPassant);
        }
    }

    result
}

pub(super) fn has_move(position: &Position, piece: &Piece) -> bool {
    let constraint = constraint_for(position, piece);
    if constraint.is_frozen() {
        return false;
    }
    let from = piece.square();
    let forward = piece.color().forward();

    if let Some(one) = from + Offset::new(0, forward) {
        if position.is_vacant(one) {
            if constraint.allows(one) {
                return true;
            }
            if !piece.has_moved() {
                if let Some(two) = one + Offset::new(0, forward) {
                    if position.is_vacant(two) && constraint.allows(two) {
                        return true;
                    }
                }
            }
        }
    }
    for dx in [-1, 1] {
        let Some(dest) = from + Offset::new(dx, forward) else {
            continue;
        };
        if let Some(other) = position.piece_at(dest) {
            if other.color() != piece.color() && constraint.allows(dest) {
                return true;
            }
        }
    }
    if let Some(dest) = en_passant_target(position, piece) {
        if constraint.allows(dest) {
            return true;
        }
    }
    false
}

/// A pawn attacks exactly its two forward diagonals, occupied or not.
pub(super) fn attacks(piece: &Piece, target: Square) -> bool {
    let forward = piece.color().forward();
    [-1, 1]
        .into_iter()
        .any(|dx| piece.square() + Offset::new(dx, forward) == Some(target))
}

/// The square this pawn would land on by capturing en passant, when the
/// eligible enemy pawn sits directly beside it.
fn en_passant_target(position: &Position, piece: &Piece) -> Option<Square> {
    let candidate = position.piece(position.en_passant_pawn()?)?;
    if candidate.color() == piece.color() {
        return None;
    }
    let from = piece.square();
    if candidate.square().rank() != from.rank() {
        return None;
    }
    let dx = candidate.square().file() - from.file();
    if dx.abs() != 1 {
        return None;
    }
    let dest = (from + Offset::new(dx, piece.color().forward()))?;
    position.is_vacant(dest).then_some(dest)
}
