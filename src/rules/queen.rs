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

use strum::IntoEnumIterator;

use crate::board::{Direction, Piece, Position};

use super::{slider_has_move, slider_moves, MoveSet};

pub(super) fn moves(position: &Position, piece: &Piece) -> MoveSet {
    slider_moves(position, piece, Direction::iter())
}

pub(super) fn has_move(position: &Position, piece: &Piece) -> bool {
    slider_has_move(position, piece, Direction::iter())
}

#[cfg(test)]
mod tests {
    use super::super::{can_attack, legal_moves};
    use crate::board::{Color::*, PieceKind::*, Position, Square::*};
    use crate::game::scan;

    #[test]
    fn test_queen_sweeps_all_eight_rays() {
        let mut position = Position::empty();
        position.spawn(White, King, H1).unwrap();
        let queen = position.spawn(White, Queen, D4).unwrap();
        let moves = legal_moves(&position, queen);
        assert_eq!(moves.len(), 27);
        assert!(moves.contains(D8));
        assert!(moves.contains(A4));
        assert!(moves.contains(A1));
        assert!(moves.contains(H8));
        assert!(!moves.contains(E6));
    }

    #[test]
    fn test_queen_boxed_in_at_start() {
        let position = Position::standard();
        let queen = position.occupant(D1).unwrap();
        assert!(legal_moves(&position, queen).is_empty());
    }

    #[test]
    fn test_queen_captures_and_blocks() {
        let mut position = Position::empty();
        position.spawn(White, King, H1).unwrap();
        let queen = position.spawn(White, Queen, D1).unwrap();
        position.spawn(Black, Rook, D6).unwrap();
        position.spawn(White, Pawn, B3).unwrap();
        let moves = legal_moves(&position, queen);
        assert!(moves.is_capture(D6));
        assert!(!moves.contains(D7));
        assert!(moves.contains(C2));
        assert!(!moves.contains(B3));
        assert!(!moves.contains(A4));
    }

    #[test]
    fn test_pinned_queen_may_slide_along_the_pin() {
        let mut position = Position::empty();
        position.spawn(Black, King, E8).unwrap();
        let queen = position.spawn(Black, Queen, E5).unwrap();
        position.spawn(White, Rook, E2).unwrap();
        scan::refresh(&mut position, Black);
        assert!(position.piece(queen).unwrap().is_pinned());
        let moves = legal_moves(&position, queen);
        assert!(moves.contains(E7));
        assert!(moves.contains(E6));
        assert!(moves.contains(E4));
        assert!(moves.contains(E3));
        assert!(moves.is_capture(E2));
        assert!(!moves.contains(D5));
        assert!(!moves.contains(F6));
        assert_eq!(moves.len(), 5);
    }

    #[test]
    fn test_queen_attacks_both_geometries() {
        let mut position = Position::empty();
        let queen = position.spawn(White, Queen, D1).unwrap();
        assert!(can_attack(&position, queen, D8));
        assert!(can_attack(&position, queen, H5));
        assert!(can_attack(&position, queen, A1));
        assert!(!can_attack(&position, queen, E3));
        position.spawn(Black, Pawn, F3).unwrap();
        assert!(!can_attack(&position, queen, H5));
    }
}
