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

use once_cell::sync::Lazy;
use strum::IntoEnumIterator;

use crate::board::{Offset, Piece, Position, Square};

use super::{constraint_for, MoveKind, MoveSet};

const OFFSETS: [Offset; 8] = [
    Offset::new(-2, -1),
    Offset::new(-2, 1),
    Offset::new(2, -1),
    Offset::new(2, 1),
    Offset::new(-1, -2),
    Offset::new(-1, 2),
    Offset::new(1, -2),
    Offset::new(1, 2),
];

static KNIGHT_TARGETS: Lazy<[Vec<Square>; 64]> = Lazy::new(|| {
    let mut table: [Vec<Square>; 64] = std::array::from_fn(|_| Vec::new());
    for square in Square::iter() {
        table[square.to_index()] = OFFSETS
            .into_iter()
            .filter_map(|offset| square + offset)
            .collect();
    }
    table
});

/// Knight moves are the fixed L-offsets. No knight move stays on a pin
/// line through its own square, so a pinned knight only ever moves if
/// its target set happens to intersect the line — which the constraint
/// decides, not a special case here.
pub(super) fn moves(position: &Position, piece: &Piece) -> MoveSet {
    let mut result = MoveSet::new();
    let constraint = constraint_for(position, piece);
    if constraint.is_frozen() {
        return result;
    }
    for &dest in &KNIGHT_TARGETS[piece.square().to_index()] {
        if !constraint.allows(dest) {
            continue;
        }
        match position.piece_at(dest) {
            None => result.insert(dest, MoveKind::Standard),
            Some(other) if other.color() != piece.color() => {
                result.insert_capture(dest, MoveKind::Standard)
            }
            Some(_) => {}
        }
    }
    result
}

pub(super) fn has_move(position: &Position, piece: &Piece) -> bool {
    let constraint = constraint_for(position, piece);
    if constraint.is_frozen() {
        return false;
    }
    KNIGHT_TARGETS[piece.square().to_index()]
        .iter()
        .any(|&dest| {
            constraint.allows(dest)
                && position
                    .piece_at(dest)
                    .map_or(true, |other| other.color() != piece.color())
        })
}

pub(super) fn attacks(piece: &Piece, target: Square) -> bool {
    let offset = target - piece.square();
    OFFSETS.contains(&offset)
}
