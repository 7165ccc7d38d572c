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

//! The pin/check detector.
//!
//! Runs at every turn boundary, before the incoming side may move. One
//! unit of work per live piece, fanned out on the rayon pool: each
//! recomputes that piece's pin against its own king, and each enemy
//! piece is additionally tested for attack on the incoming king's
//! square. The whole phase reads a frozen `&Position`; results are
//! collected (the join barrier) and only then written back. Checkmate
//! and stalemate evaluation must not start before the write-back, and
//! cannot: `refresh` returns only after it.

use rayon::prelude::*;

use crate::board::{Color, Pin, PieceId, Position};
use crate::rules;

struct Verdict {
    id: PieceId,
    pin: Option<Pin>,
    gives_check: bool,
}

/// Recomputes the derived pin/check state for the position, with
/// `incoming` the side about to move. Both kings' stale check state is
/// dropped; only the incoming king can be in check after a legal move.
pub fn refresh(position: &mut Position, incoming: Color) {
    for color in [incoming, !incoming] {
        if let Some(id) = position.king_id(color) {
            if let Some(king) = position.piece_mut(id) {
                king.clear_check();
            }
        }
    }

    let Some(king_id) = position.king_id(incoming) else {
        log::warn!("check scan skipped: {incoming} king not registered yet");
        return;
    };
    let Some(king_square) = position.king_square(incoming) else {
        return;
    };

    let verdicts: Vec<Verdict> = {
        let frozen: &Position = position;
        let jobs: Vec<PieceId> = frozen
            .pieces_of(Color::White)
            .iter()
            .chain(frozen.pieces_of(Color::Black))
            .copied()
            .collect();
        jobs.into_par_iter()
            .filter_map(|id| {
                let piece = frozen.piece(id)?;
                Some(Verdict {
                    id,
                    pin: rules::scan_pin(frozen, piece),
                    gives_check: piece.color() != incoming
                        && rules::can_attack(frozen, id, king_square),
                })
            })
            .collect()
    };

    for verdict in verdicts {
        if let Some(piece) = position.piece_mut(verdict.id) {
            piece.set_pin(verdict.pin);
        }
        if verdict.gives_check {
            if let Some(king) = position.piece_mut(king_id) {
                king.add_checker(verdict.id);
            }
        }
    }

    if let Some(king) = position.piece(king_id) {
        if king.in_check() {
            log::debug!(
                "{incoming} king on {} in check from {} attacker(s)",
                king.square(),
                king.checkers().len()
            );
        }
    }
}
