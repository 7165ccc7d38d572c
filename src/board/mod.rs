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

//! Board representation for the rules engine.
//!
//! Some of the key abstractions:
//!
//! * A `Square` is a coordinate on the 8-by-8 board, identified by a
//!   `File` (`FileA` .. `FileH`) and a `Rank` (`Rank1` .. `Rank8`) and
//!   named letter-then-number (`A1` .. `H8`). Square arithmetic is
//!   bounds-checked: `Square + Offset` and `Square + Direction` return
//!   `Option<Square>`, so walking off the board reads as "no square"
//!   rather than a panic.
//!
//! * A `Piece` is a live chessman: a `Color`, a `PieceKind`, the square
//!   that currently holds it, a has-moved flag (pawn double steps and
//!   castling eligibility), and the derived pin/check state the
//!   detector refreshes each turn. Pieces live in a slab owned by the
//!   `Position` and are addressed by stable `PieceId` handles; capture
//!   frees the slot and the id is never reused.
//!
//! * A `Position` owns the occupancy grid, the piece slab, one roster
//!   of piece handles per side, the king handles, and the pawn that is
//!   currently capturable en passant. It is the single source of truth
//!   for occupancy: every square knows its occupant and every piece
//!   knows its square, and the two views never disagree. The only
//!   writers are the `pub(crate)` mutators the turn controller uses;
//!   everything else — move generation, attack tests, the parallel
//!   check scan — reads through `&Position`.
//!
//! * Line-of-sight queries (`clear_horizontal_path`, and the vertical
//!   and diagonal variants) answer whether the strictly-between squares
//!   of an aligned pair are all empty. They are pure reads and safe to
//!   call from the detector's worker threads.

mod piece;
mod position;
mod square;

pub use piece::*;
pub use position::*;
pub use square::*;
