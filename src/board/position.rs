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

use anyhow::Result;
use strum::IntoEnumIterator;
use thiserror::Error;

use super::piece::{Color, Pair, Piece, PieceId, PieceKind};
use super::square::{Axis, File, Rank, Square};

use Color::*;
use PieceKind::*;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("square {0} is already occupied")]
    Occupied(Square),
    #[error("{0} already has a king")]
    DuplicateKing(Color),
}
use SetupError::*;

/// The single source of truth for occupancy. Squares index into a slab
/// of pieces through stable `PieceId` handles; every live piece reports
/// the square that holds it (bidirectional consistency).
///
/// All queries are plain reads. Mutation goes through `pub(crate)`
/// methods reserved for the turn controller; move generation never
/// writes here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    grid: [Option<PieceId>; 64],
    slots: Vec<Option<Piece>>,
    rosters: Pair<Vec<PieceId>>,
    kings: Pair<Option<PieceId>>,
    en_passant: Option<PieceId>,
}

impl Default for Position {
    fn default() -> Self {
        Self::standard()
    }
}

impl Position {
    pub fn empty() -> Self {
        Self {
            grid: [None; 64],
            slots: Vec::new(),
            rosters: Pair::default(),
            kings: Pair::default(),
            en_passant: None,
        }
    }

    /// The standard chess starting layout, both kings registered.
    pub fn standard() -> Self {
        const BACK_RANK: [PieceKind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut position = Self::empty();
        for color in Color::iter() {
            for file in File::iter() {
                let square = Square::new(file, Rank::pawn_rank(color));
                let _ = position.spawn(color, Pawn, square);
                let square = Square::new(file, Rank::back_rank(color));
                let _ = position.spawn(color, BACK_RANK[file.to_index()], square);
            }
        }
        position
    }

    /// Registers a piece with the match. Used by match setup and by
    /// tests to build arbitrary positions.
    pub fn spawn(&mut self, color: Color, kind: PieceKind, square: Square) -> Result<PieceId> {
        if self.occupant(square).is_some() {
            return Err(Occupied(square).into());
        }
        if kind.is_king() && self.kings[color].is_some() {
            return Err(DuplicateKing(color).into());
        }
        let id = PieceId::new(self.slots.len());
        self.slots.push(Some(Piece::new(id, color, kind, square)));
        self.grid[square.to_index()] = Some(id);
        self.rosters[color].push(id);
        if kind.is_king() {
            self.kings[color] = Some(id);
        }
        Ok(id)
    }

    #[inline]
    pub fn occupant(&self, square: Square) -> Option<PieceId> {
        self.grid[square.to_index()]
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.slots.get(id.to_index())?.as_ref()
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.piece(self.occupant(square)?)
    }

    #[inline]
    pub fn is_vacant(&self, square: Square) -> bool {
        self.occupant(square).is_none()
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.occupant(square).is_some()
    }

    #[inline]
    pub fn king_id(&self, color: Color) -> Option<PieceId> {
        self.kings[color]
    }

    #[inline]
    pub fn king(&self, color: Color) -> Option<&Piece> {
        self.piece(self.king_id(color)?)
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        Some(self.king(color)?.square())
    }

    /// The ordered roster of one side's live pieces.
    #[inline]
    pub fn pieces_of(&self, color: Color) -> &[PieceId] {
        &self.rosters[color]
    }

    pub fn live_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }

    /// The pawn that double-stepped last half-move, if any. Only this
    /// pawn may be captured en passant, and only this turn.
    #[inline]
    pub fn en_passant_pawn(&self) -> Option<PieceId> {
        self.en_passant
    }

    #[inline]
    pub(crate) fn set_en_passant(&mut self, pawn: Option<PieceId>) {
        self.en_passant = pawn;
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.slots.get_mut(id.to_index())?.as_mut()
    }
}

/// Line-of-sight queries. Each returns false when the squares are equal
/// or not aligned on the named axis, and otherwise walks the strictly-
/// between squares, failing on the first occupant. Endpoints are not
/// inspected.
impl Position {
    #[inline]
    pub fn clear_horizontal_path(&self, from: Square, to: Square) -> bool {
        self.clear_path_on(Axis::Horizontal, from, to, None)
    }

    #[inline]
    pub fn clear_vertical_path(&self, from: Square, to: Square) -> bool {
        self.clear_path_on(Axis::Vertical, from, to, None)
    }

    #[inline]
    pub fn clear_diagonal_path(&self, from: Square, to: Square) -> bool {
        self.clear_path_on(Axis::Diagonal, from, to, None)
    }

    /// Shared walk. `vacated` is treated as empty so king-safety checks
    /// can look through the square the king is stepping off of.
    pub(crate) fn clear_path_on(
        &self,
        axis: Axis,
        from: Square,
        to: Square,
        vacated: Option<Square>,
    ) -> bool {
        if from.axis_to(to) != Some(axis) {
            return false;
        }
        from.between(to)
            .all(|square| self.is_vacant(square) || Some(square) == vacated)
    }
}

/// Mutations, reserved for the turn controller.
impl Position {
    /// Moves a live piece to a vacant square and marks it as having
    /// moved. The caller resolves any capture first.
    pub(crate) fn relocate(&mut self, id: PieceId, to: Square) {
        let Some(piece) = self.piece_mut(id) else {
            log::warn!("relocate: no live piece for {id}");
            return;
        };
        let from = piece.square();
        piece.set_square(to);
        piece.set_has_moved();
        debug_assert_eq!(self.grid[from.to_index()], Some(id));
        debug_assert!(self.grid[to.to_index()].is_none());
        self.grid[from.to_index()] = None;
        self.grid[to.to_index()] = Some(id);
    }

    /// Destroys a piece: clears its square, drops it from its roster,
    /// and frees the slot. Returns the final record of the piece.
    pub(crate) fn capture(&mut self, id: PieceId) -> Option<Piece> {
        let piece = self.slots.get_mut(id.to_index())?.take()?;
        self.grid[piece.square().to_index()] = None;
        self.rosters[piece.color()].retain(|other| *other != id);
        if self.kings[piece.color()] == Some(id) {
            log::warn!("capture: {} king destroyed", piece.color());
            self.kings[piece.color()] = None;
        }
        if self.en_passant == Some(id) {
            self.en_passant = None;
        }
        Some(piece)
    }

    /// Promotion replacement: destroys the pawn and creates a new piece
    /// of `kind` with a fresh identity on the same square and team.
    pub(crate) fn promote(&mut self, id: PieceId, kind: PieceKind) -> Option<PieceId> {
        let pawn = self.capture(id)?;
        let replacement = PieceId::new(self.slots.len());
        let mut piece = Piece::new(replacement, pawn.color(), kind, pawn.square());
        piece.set_has_moved();
        self.slots.push(Some(piece));
        self.grid[pawn.square().to_index()] = Some(replacement);
        self.rosters[pawn.color()].push(replacement);
        Some(replacement)
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        for piece in self.live_pieces() {
            assert_eq!(self.grid[piece.square().to_index()], Some(piece.id()));
        }
        for square in Square::iter() {
            if let Some(id) = self.occupant(square) {
                assert_eq!(self.piece(id).map(|piece| piece.square()), Some(square));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Square::*;

    #[test]
    fn test_standard_layout() {
        let position = Position::standard();
        position.assert_consistent();
        assert_eq!(position.pieces_of(White).len(), 16);
        assert_eq!(position.pieces_of(Black).len(), 16);
        assert_eq!(position.king_square(White), Some(E1));
        assert_eq!(position.king_square(Black), Some(E8));
        assert_eq!(position.piece_at(D1).map(|p| p.kind()), Some(Queen));
        assert_eq!(position.piece_at(A8).map(|p| p.kind()), Some(Rook));
        assert_eq!(position.piece_at(E2).map(|p| p.kind()), Some(Pawn));
        assert!(position.is_vacant(E4));
        assert!(position.en_passant_pawn().is_none());
    }

    #[test]
    fn test_spawn_rejects_occupied_square() {
        let mut position = Position::empty();
        position.spawn(White, Rook, C3).unwrap();
        assert!(position.spawn(Black, Knight, C3).is_err());
    }

    #[test]
    fn test_spawn_rejects_second_king() {
        let mut position = Position::empty();
        position.spawn(White, King, E1).unwrap();
        assert!(position.spawn(White, King, D4).is_err());
    }

    #[test]
    fn test_clear_paths_on_empty_board() {
        let position = Position::empty();
        assert!(position.clear_horizontal_path(A3, E3));
        assert!(position.clear_vertical_path(C2, C8));
        assert!(position.clear_diagonal_path(A1, H8));
    }

    #[test]
    fn test_clear_path_rejects_same_square() {
        let position = Position::empty();
        assert!(!position.clear_horizontal_path(D4, D4));
        assert!(!position.clear_vertical_path(D4, D4));
        assert!(!position.clear_diagonal_path(D4, D4));
    }

    #[test]
    fn test_clear_path_rejects_wrong_axis() {
        let position = Position::empty();
        assert!(!position.clear_horizontal_path(A1, A8));
        assert!(!position.clear_vertical_path(A1, H1));
        assert!(!position.clear_diagonal_path(A1, A8));
        assert!(!position.clear_diagonal_path(B1, C3));
    }

    #[test]
    fn test_clear_path_blocked_by_occupant() {
        let mut position = Position::empty();
        position.spawn(White, Pawn, C3).unwrap();
        assert!(!position.clear_horizontal_path(A3, E3));
        assert!(!position.clear_diagonal_path(A1, H8));
        // occupant on an endpoint does not block
        assert!(position.clear_horizontal_path(A3, C3));
        assert!(position.clear_vertical_path(C1, C3));
    }

    #[test]
    fn test_clear_path_vacated_square_is_transparent() {
        let mut position = Position::empty();
        position.spawn(Black, Bishop, D4).unwrap();
        assert!(!position.clear_diagonal_path(A1, G7));
        assert!(position.clear_path_on(Axis::Diagonal, A1, G7, Some(D4)));
    }

    #[test]
    fn test_relocate_updates_both_sides() {
        let mut position = Position::empty();
        let rook = position.spawn(White, Rook, A1).unwrap();
        position.relocate(rook, A5);
        position.assert_consistent();
        assert!(position.is_vacant(A1));
        assert_eq!(position.occupant(A5), Some(rook));
        let piece = position.piece(rook).unwrap();
        assert_eq!(piece.square(), A5);
        assert!(piece.has_moved());
    }

    #[test]
    fn test_capture_frees_slot_and_roster() {
        let mut position = Position::empty();
        let knight = position.spawn(Black, Knight, G8).unwrap();
        let captured = position.capture(knight).unwrap();
        assert_eq!(captured.kind(), Knight);
        assert!(position.piece(knight).is_none());
        assert!(position.is_vacant(G8));
        assert!(position.pieces_of(Black).is_empty());
        // capturing again is a no-op
        assert!(position.capture(knight).is_none());
    }

    #[test]
    fn test_promote_creates_fresh_identity() {
        let mut position = Position::empty();
        let pawn = position.spawn(White, Pawn, A8).unwrap();
        let queen = position.promote(pawn, Queen).unwrap();
        position.assert_consistent();
        assert_ne!(pawn, queen);
        assert!(position.piece(pawn).is_none());
        let piece = position.piece(queen).unwrap();
        assert_eq!(piece.kind(), Queen);
        assert_eq!(piece.color(), White);
        assert_eq!(piece.square(), A8);
        assert!(piece.has_moved());
        assert_eq!(position.pieces_of(White), &[queen]);
    }
}
