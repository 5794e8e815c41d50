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

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;

use super::material::{Color, Material, Piece};
use super::position::{Pos, Position};
use super::square::{Direction, Mask, Offset, Square};

use Color::*;

/// A movement rule answers whether `material` may travel from one square
/// to another on the given position. Rules never look at whose turn it is
/// and never inspect the color of the piece on the destination.
pub type MoveRule = fn(Material, Square, Square, &Position) -> bool;

/// Indexed by `Piece::to_index`.
static MOVE_RULES: [MoveRule; Piece::COUNT] = [
    pawn_move_valid,
    knight_move_valid,
    bishop_move_valid,
    rook_move_valid,
    queen_move_valid,
    king_move_valid,
    hunter_move_valid,
    falcon_move_valid,
];

#[inline]
pub fn move_rule(piece: Piece) -> MoveRule {
    MOVE_RULES[piece.to_index()]
}

/// Checks the movement pattern of `material` from `from` to `to`.
pub fn is_valid_move(material: Material, from: Square, to: Square, pos: &Position) -> bool {
    move_rule(material.piece())(material, from, to, pos)
}

#[inline]
fn forward(color: Color) -> isize {
    match color {
        White => -1,
        Black => 1,
    }
}

/// Captures are one step diagonally forward. Otherwise one step straight
/// ahead, or two on the pawn's first move.
pub fn pawn_move_valid(material: Material, from: Square, to: Square, pos: &Position) -> bool {
    let offset = pos.offset(from, to);
    let forward = forward(material.color());
    if pos.is_occupied(to) {
        return offset.row == forward && offset.col.abs() == 1;
    }
    if offset.col != 0 {
        return false;
    }
    offset.row == forward || (offset.row == 2 * forward && material.is_first_move())
}

pub fn rook_move_valid(_: Material, from: Square, to: Square, pos: &Position) -> bool {
    pos.orthogonal_move_valid(from, to)
}

pub fn bishop_move_valid(_: Material, from: Square, to: Square, pos: &Position) -> bool {
    pos.diagonal_move_valid(from, to)
}

pub fn queen_move_valid(_: Material, from: Square, to: Square, pos: &Position) -> bool {
    pos.orthogonal_move_valid(from, to) || pos.diagonal_move_valid(from, to)
}

pub fn knight_move_valid(_: Material, from: Square, to: Square, _: &Position) -> bool {
    KNIGHT_MOVES[from].contains(to)
}

pub fn king_move_valid(_: Material, from: Square, to: Square, _: &Position) -> bool {
    KING_MOVES[from].contains(to)
}

/// Rook going forward, bishop going backward. Sideways moves are
/// neither and always fail.
pub fn hunter_move_valid(material: Material, from: Square, to: Square, pos: &Position) -> bool {
    let offset = pos.offset(from, to);
    if offset.is_forward(material.color()) {
        pos.orthogonal_move_valid(from, to)
    } else if offset.is_backward(material.color()) {
        pos.diagonal_move_valid(from, to)
    } else {
        false
    }
}

/// Bishop going forward, rook going backward.
pub fn falcon_move_valid(material: Material, from: Square, to: Square, pos: &Position) -> bool {
    let offset = pos.offset(from, to);
    if offset.is_forward(material.color()) {
        pos.diagonal_move_valid(from, to)
    } else if offset.is_backward(material.color()) {
        pos.orthogonal_move_valid(from, to)
    } else {
        false
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Anything a player can do on their turn.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move(Move),
    /// Enter a fairy piece on an empty home-rank square.
    Enter(Material, Square),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move(mv) => write!(f, "{}", mv),
            Action::Enter(material, square) => write!(f, "{}@{}", material, square),
        }
    }
}

impl From<Move> for Action {
    fn from(value: Move) -> Self {
        Action::Move(value)
    }
}

static KING_MOVES: Lazy<[Mask; 64]> = Lazy::new(|| {
    let mut array = [Mask::default(); 64];
    for square in Square::iter() {
        array[square] = Mask::from_squares(Direction::iter().filter_map(|dir| square + dir));
    }
    array
});

static KNIGHT_MOVES: Lazy<[Mask; 64]> = Lazy::new(|| {
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
    let mut array = [Mask::default(); 64];
    for square in Square::iter() {
        array[square] =
            Mask::from_squares(OFFSETS.into_iter().filter_map(|offset| square + offset));
    }
    array
});
