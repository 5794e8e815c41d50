// Copyright 2023 Tobin Edwards
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

//! Board for a two-player chess variant with fairy pieces
//!
//! Play follows the familiar rules for moving kings, queens, rooks,
//! bishops, knights and pawns, with a few simplifications: there is no
//! check or checkmate, a game ends as soon as a king is captured, and
//! there is no castling, en passant or promotion. On top of that each
//! side may bring in two fairy pieces over the course of a game:
//!
//! * The _hunter_ moves like a rook going forward and like a bishop
//!   going backward.
//! * The _falcon_ moves like a bishop going forward and like a rook
//!   going backward.
//!
//! Neither fairy piece may move sideways. A fairy piece is entered in
//! place of a move, onto an empty square of the player's home rank,
//! and only once the player has lost enough major pieces (rooks,
//! knights, bishops and queens). Each kind may be entered once per
//! game.
//!
//! The key abstractions are:
//!
//! * A `Square` names one of the 64 squares (`A8` .. `H1`). Squares are
//!   laid out in rows from the black side, so `A8` is row 0, column 0.
//!   A `Mask` is a 64-bit set of squares.
//!
//! * `Material` is a `Piece` of a specific `Color`. Pawns also carry
//!   their first-move flag.
//!
//! * A `Position` holds the contents of each square and how many pieces
//!   of each kind both sides have left. The `Pos` trait provides the
//!   read-only queries that move rules are built from.
//!
//! * A `Game` owns a position and whose turn it is. It validates and
//!   applies moves and fairy entries, refusing anything illegal with a
//!   `Rejection` and leaving its state untouched.

mod material;
mod moves;
mod play;
mod position;
mod square;

pub use material::*;
pub use moves::*;
pub use play::*;
pub use position::*;
pub use square::*;

pub trait Turn {
    fn turn(&self) -> Color;
}
