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

//! Authoritative chess rules engine and turn coordinator for two-player
//! networked play.
//!
//! The crate answers, for any position: which moves are legal for a
//! piece (check, pin, castling, en passant and promotion included),
//! whether a square is attacked, and whether the match has ended — and
//! applies committed moves while keeping every invariant of legal
//! chess. It is the server-side core of a networked game: clients send
//! move requests, `Game::attempt_move` validates and applies them on
//! the one authoritative instance, and the resulting state and events
//! are replicated back out.
//!
//! There is no search and no evaluation here; the engine only
//! arbitrates an interactive game.

pub mod board;
pub mod game;
pub mod rules;

pub use board::*;
pub use game::*;
pub use rules::{can_attack, has_move, is_square_attacked, legal_moves, MoveKind, MoveSet};
