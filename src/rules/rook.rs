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

use crate::board::{Direction, Piece, Position};

use super::{slider_has_move, slider_moves, MoveSet};

pub(super) fn moves(position: &Position, piece: &Piece) -> MoveSet {
    slider_moves(position, piece, Direction::straights())
}

pub(super) fn has_move(position: &Position, piece: &Piece) -> bool {
    slider_has_move(position, piece, Direction::straights())
}

#[cfg(test)]
mod tests {
    use super::super::{can_attack, legal_moves};
    use crate::board::{Color::*, PieceKind::*, Position, Square::*};
    use crate::game::scan;

    #[test]
    fn test_rook_sweeps_rank_and_file() {
        let mut position = Position::empty();
        position.spawn(White, King, H8).unwrap();
        let rook = position.spawn(White, Rook, D4).unwrap();
        let moves = legal_moves(&position, rook);
        assert_eq!(moves.len(), 14);
        assert!(moves.contains(D1));
        assert!(moves.contains(D8));
        assert!(moves.contains(A4));
        assert!(moves.contains(H4));
        assert!(!moves.contains(E5));
    }

    #[test]
    fn test_rook_capture_stops_the_ray() {
        let mut position = Position::empty();
        position.spawn(White, King, H8).unwrap();
        let rook = position.spawn(White, Rook, A1).unwrap();
        position.spawn(Black, Knight, A5).unwrap();
        position.spawn(White, Pawn, D1).unwrap();
        let moves = legal_moves(&position, rook);
        assert!(moves.is_capture(A5));
        assert!(!moves.contains(A6));
        assert!(moves.contains(C1));
        assert!(!moves.contains(D1));
        assert!(!moves.contains(E1));
    }

    #[test]
    fn test_rook_blocked_at_start() {
        let position = Position::standard();
        let rook = position.occupant(A1).unwrap();
        assert!(legal_moves(&position, rook).is_empty());
    }

    #[test]
    fn test_pinned_rook_restricted_to_file() {
        // vertical pin: king E1, rook E4, enemy queen E7
        let mut position = Position::empty();
        position.spawn(White, King, E1).unwrap();
        let rook = position.spawn(White, Rook, E4).unwrap();
        position.spawn(Black, Queen, E7).unwrap();
        scan::refresh(&mut position, White);
        assert!(position.piece(rook).unwrap().is_pinned());
        let moves = legal_moves(&position, rook);
        assert!(moves.contains(E2));
        assert!(moves.contains(E3));
        assert!(moves.contains(E5));
        assert!(moves.contains(E6));
        assert!(moves.is_capture(E7));
        assert!(!moves.contains(A4));
        assert!(!moves.contains(H4));
        assert_eq!(moves.len(), 5);
    }

    #[test]
    fn test_rook_must_answer_check() {
        let mut position = Position::empty();
        position.spawn(White, King, E1).unwrap();
        let rook = position.spawn(White, Rook, D4).unwrap();
        position.spawn(Black, Rook, E8).unwrap();
        scan::refresh(&mut position, White);
        let moves = legal_moves(&position, rook);
        // block on the E-file; the rook cannot reach E8 itself
        assert_eq!(moves.len(), 1);
        assert!(moves.contains(E4));
    }

    #[test]
    fn test_rook_attack_needs_clear_line() {
        let mut position = Position::empty();
        let rook = position.spawn(Black, Rook, D8).unwrap();
        assert!(can_attack(&position, rook, D1));
        assert!(can_attack(&position, rook, A8));
        assert!(!can_attack(&position, rook, E7));
        position.spawn(White, Knight, D5).unwrap();
        assert!(can_attack(&position, rook, D5));
        assert!(!can_attack(&position, rook, D3));
    }
}
