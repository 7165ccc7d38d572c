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

use crate::board::{Direction, File, Piece, Position, Rank, Square};

use super::{is_square_attacked_vacating, MoveKind, MoveSet};

static KING_TARGETS: Lazy<[Vec<Square>; 64]> = Lazy::new(|| {
    let mut table: [Vec<Square>; 64] = std::array::from_fn(|_| Vec::new());
    for square in Square::iter() {
        table[square.to_index()] = Direction::iter()
            .filter_map(|direction| square + direction)
            .collect();
    }
    table
});

/// One square in any direction onto a square no enemy piece attacks,
/// plus castling. Attack tests treat the king's origin as vacant so a
/// checked king cannot retreat along the checking ray and call the
/// destination safe.
pub(super) fn moves(position: &Position, piece: &Piece) -> MoveSet {
    standard_moves(position, piece) | castle_moves(position, piece)
}

fn standard_moves(position: &Position, piece: &Piece) -> MoveSet {
    let mut result = MoveSet::new();
    let from = piece.square();
    let enemy = !piece.color();
    for &dest in &KING_TARGETS[from.to_index()] {
        let capture = match position.piece_at(dest) {
            Some(other) if other.color() == piece.color() => continue,
            Some(_) => true,
            None => false,
        };
        if is_square_attacked_vacating(position, enemy, dest, Some(from)) {
            continue;
        }
        if capture {
            result.insert_capture(dest, MoveKind::Standard);
        } else {
            result.insert(dest, MoveKind::Standard);
        }
    }
    result
}

/// Castling legality: an unmoved king on its home square, not in check,
/// an unmoved own rook in the corner, every square between them empty,
/// and the two squares the king crosses unattacked. Executing the move
/// relocates the rook as a side effect of the king's move.
fn castle_moves(position: &Position, piece: &Piece) -> MoveSet {
    let mut result = MoveSet::new();
    if piece.has_moved() || piece.in_check() {
        return result;
    }
    let back = Rank::back_rank(piece.color());
    if piece.square() != Square::new(File::FileE, back) {
        return result;
    }
    let lanes = [
        (File::FileH, [File::FileF, File::FileG], MoveKind::ShortCastle),
        (File::FileA, [File::FileD, File::FileC], MoveKind::LongCastle),
    ];
    let enemy = !piece.color();
    for (rook_file, transit, kind) in lanes {
        let rook_square = Square::new(rook_file, back);
        let eligible = position.piece_at(rook_square).is_some_and(|rook| {
            rook.color() == piece.color() && rook.kind().is_rook() && !rook.has_moved()
        });
        if !eligible {
            continue;
        }
        if !position.clear_horizontal_path(piece.square(), rook_square) {
            continue;
        }
        let transit = transit.map(|file| Square::new(file, back));
        if transit
            .iter()
            .any(|&square| is_square_attacked_vacating(position, enemy, square, None))
        {
            continue;
        }
        // the king lands on the far transit square
        result.insert(transit[1], kind);
    }
    result
}

pub(super) fn has_move(position: &Position, piece: &Piece) -> bool {
    let from = piece.square();
    let enemy = !piece.color();
    let escape = KING_TARGETS[from.to_index()].iter().any(|&dest| {
        if position
            .piece_at(dest)
            .is_some_and(|other| other.color() == piece.color())
        {
            return false;
        }
        !is_square_attacked_vacating(position, enemy, dest, Some(from))
    });
    escape || !castle_moves(position, piece).is_empty()
}

/// Kings attack their eight neighbours; path clearance never applies.
pub(super) fn attacks(piece: &Piece, target: Square) -> bool {
    let offset = target - piece.square();
    offset.x.abs() <= 1 && offset.y.abs() <= 1 && (offset.x != 0 || offset.y != 0)
}
