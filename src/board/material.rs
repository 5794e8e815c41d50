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

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut, Not};
use strum::IntoEnumIterator;
use strum_macros::Display;
use strum_macros::EnumIter;

/// A piece of a specific color. Pawns also remember whether they have
/// moved yet; the flag is meaningless for every other piece.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Material {
    color: Color,
    piece: Piece,
    first_move: bool,
}

impl Material {
    pub const WK: Self = Self::white(King);
    pub const WQ: Self = Self::white(Queen);
    pub const WR: Self = Self::white(Rook);
    pub const WB: Self = Self::white(Bishop);
    pub const WN: Self = Self::white(Knight);
    pub const WP: Self = Self::white(Pawn);
    pub const WH: Self = Self::white(Hunter);
    pub const WF: Self = Self::white(Falcon);

    pub const BK: Self = Self::black(King);
    pub const BQ: Self = Self::black(Queen);
    pub const BR: Self = Self::black(Rook);
    pub const BB: Self = Self::black(Bishop);
    pub const BN: Self = Self::black(Knight);
    pub const BP: Self = Self::black(Pawn);
    pub const BH: Self = Self::black(Hunter);
    pub const BF: Self = Self::black(Falcon);

    #[inline]
    pub const fn new(color: Color, piece: Piece) -> Self {
        Self {
            color,
            piece,
            first_move: matches!(piece, Pawn),
        }
    }

    #[inline]
    pub const fn white(piece: Piece) -> Self {
        Self::new(White, piece)
    }

    #[inline]
    pub const fn black(piece: Piece) -> Self {
        Self::new(Black, piece)
    }

    /// Decodes a fairy piece letter: `H`/`F` are white, `h`/`f` black.
    pub const fn try_from_fairy_char(c: char) -> Option<Self> {
        match c {
            'H' => Some(Self::WH),
            'F' => Some(Self::WF),
            'h' => Some(Self::BH),
            'f' => Some(Self::BF),
            _ => None,
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    #[inline]
    pub fn is_first_move(&self) -> bool {
        self.first_move
    }

    #[inline]
    pub(crate) fn clear_first_move(&mut self) {
        self.first_move = false;
    }

    pub fn to_char(&self) -> char {
        let c = self.piece.to_char();
        match self.color {
            White => c.to_ascii_uppercase(),
            Black => c,
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

use Color::{Black, White};

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
}

impl Not for Color {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            White => Black,
            Black => White,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pair<T>((T, T));

impl<T> Pair<T> {
    pub const fn new(white: T, black: T) -> Self {
        Self((white, black))
    }
    pub fn white(&self) -> &T {
        &self.0 .0
    }
    pub fn white_mut(&mut self) -> &mut T {
        &mut self.0 .0
    }
    pub fn black(&self) -> &T {
        &self.0 .1
    }
    pub fn black_mut(&mut self) -> &mut T {
        &mut self.0 .1
    }
}

impl<T> Index<Color> for Pair<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        match index {
            White => self.white(),
            Black => self.black(),
        }
    }
}

impl<T> IndexMut<Color> for Pair<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        match index {
            White => self.white_mut(),
            Black => self.black_mut(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    Hunter,
    Falcon,
}
use Piece::{Bishop, Falcon, Hunter, King, Knight, Pawn, Queen, Rook};

impl Piece {
    pub const COUNT: usize = 8;

    pub const fn from_index(index: usize) -> Self {
        debug_assert!(index < Self::COUNT);
        const PIECE_MAP: [Piece; Piece::COUNT] =
            [Pawn, Knight, Bishop, Rook, Queen, King, Hunter, Falcon];
        PIECE_MAP[index]
    }

    pub const fn to_index(&self) -> usize {
        *self as usize
    }

    pub const fn to_char(&self) -> char {
        match self {
            Pawn => 'p',
            Knight => 'n',
            Bishop => 'b',
            Rook => 'r',
            Queen => 'q',
            King => 'k',
            Hunter => 'h',
            Falcon => 'f',
        }
    }

    /// Rooks, knights, bishops and queens.
    pub fn is_major(&self) -> bool {
        matches!(*self, Rook | Knight | Bishop | Queen)
    }
    pub fn is_fairy(&self) -> bool {
        matches!(*self, Hunter | Falcon)
    }
    pub fn is_pawn(&self) -> bool {
        matches!(*self, Pawn)
    }
}

/// How many pieces of each kind one side still has on the board.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Counts([u8; Piece::COUNT]);

impl Counts {
    pub const fn empty() -> Self {
        Self([0; Piece::COUNT])
    }

    /// The complement each side starts a game with.
    pub const fn standard() -> Self {
        // pawn, knight, bishop, rook, queen, king, hunter, falcon
        Self([8, 2, 2, 2, 1, 1, 0, 0])
    }

    pub fn majors(&self) -> usize {
        Piece::iter()
            .filter(Piece::is_major)
            .map(|piece| self[piece] as usize)
            .sum()
    }

    pub fn fairies(&self) -> usize {
        Piece::iter()
            .filter(Piece::is_fairy)
            .map(|piece| self[piece] as usize)
            .sum()
    }

    #[inline]
    pub(crate) fn increment(&mut self, piece: Piece) {
        self[piece] += 1;
    }

    /// Decrements the count for `piece`, saturating at zero.
    #[inline]
    pub(crate) fn decrement(&mut self, piece: Piece) {
        self[piece] = self[piece].saturating_sub(1);
    }
}

impl Default for Counts {
    fn default() -> Self {
        Self::standard()
    }
}

impl Index<Piece> for Counts {
    type Output = u8;
    fn index(&self, index: Piece) -> &Self::Output {
        &self.0[index.to_index()]
    }
}

impl IndexMut<Piece> for Counts {
    fn index_mut(&mut self, index: Piece) -> &mut Self::Output {
        &mut self.0[index.to_index()]
    }
}
