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
    slider_moves(position, piece, Direction::diagonals())
}

pub(super) fn has_move(position: &Position, piece: &Piece) -> bool {
    slider_has_move(position, piece, Direction::diagonals())
}

#[cfg(test)]
mod tests {
    use super::super::{can_attack, legal_moves};
    use crate::board::{Color::*, PieceKind::*, Position, Square::*};
    use crate::game::scan;

    #[test]
    fn test_bishop_sweeps_both_diagonals() {
        let mut position = Position::empty();
        position.spawn(White, King, H1).unwrap();
        let bishop = position.spawn(White, Bishop, D4).unwrap();
        let moves = legal_moves(&position, bishop);
        assert_eq!(moves.len(), 13);
        assert!(moves.contains(A1));
        assert!(moves.contains(H8));
        assert!(moves.contains(A7));
        assert!(moves.contains(G1));
        assert!(!moves.contains(D5));
    }

    #[test]
    fn test_bishop_capture_stops_the_ray() {
        let mut position = Position::empty();
        position.spawn(White, King, H1).unwrap();
        let bishop = position.spawn(White, Bishop, C1).unwrap();
        position.spawn(Black, Pawn, F4).unwrap();
        let moves = legal_moves(&position, bishop);
        assert!(moves.contains(D2));
        assert!(moves.contains(E3));
        assert!(moves.is_capture(F4));
        assert!(!moves.contains(G5));
    }

    #[test]
    fn test_bishop_blocked_by_own_piece() {
        let position = Position::standard();
        let bishop = position.occupant(C1).unwrap();
        assert!(legal_moves(&position, bishop).is_empty());
    }

    #[test]
    fn test_pinned_bishop_stays_on_the_pin_line() {
        let mut position = Position::empty();
        position.spawn(White, King, B2).unwrap();
        let bishop = position.spawn(White, Bishop, D4).unwrap();
        position.spawn(Black, Bishop, G7).unwrap();
        scan::refresh(&mut position, White);
        assert!(position.piece(bishop).unwrap().is_pinned());
        let moves = legal_moves(&position, bishop);
        assert!(moves.contains(C3));
        assert!(moves.contains(E5));
        assert!(moves.contains(F6));
        assert!(moves.is_capture(G7));
        assert!(!moves.contains(E3));
        assert!(!moves.contains(C5));
        assert_eq!(moves.len(), 4);
    }

    #[test]
    fn test_bishop_attack_needs_clear_diagonal() {
        let mut position = Position::empty();
        let bishop = position.spawn(Black, Bishop, C8).unwrap();
        assert!(can_attack(&position, bishop, H3));
        position.spawn(Black, Pawn, E6).unwrap();
        assert!(!can_attack(&position, bishop, H3));
        assert!(can_attack(&position, bishop, E6));
        assert!(!can_attack(&position, bishop, C1));
    }
}
