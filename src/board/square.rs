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
use std::ops::{Add, BitOr, Index, IndexMut, Sub};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

use super::material::Color;

use Color::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    #[error("Not a square id (expecting a file a..h followed by a rank 1..8): {0:?}")]
    Invalid(String),
}

/// Squares are laid out row by row starting at a8, so the index of a
/// square is `row * 8 + col` with row 0 on rank 8 and row 7 on rank 1.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Square {
    A8, B8, C8, D8, E8, F8, G8, H8,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A1, B1, C1, D1, E1, F1, G1, H1,
}

use Square::{
    A8, B8, C8, D8, E8, F8, G8, H8,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A1, B1, C1, D1, E1, F1, G1, H1,
};

impl Square {
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self::from_index(rank.to_index() * 8 + file.to_index())
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [Square; 64] = [
            A8, B8, C8, D8, E8, F8, G8, H8,
            A7, B7, C7, D7, E7, F7, G7, H7,
            A6, B6, C6, D6, E6, F6, G6, H6,
            A5, B5, C5, D5, E5, F5, G5, H5,
            A4, B4, C4, D4, E4, F4, G4, H4,
            A3, B3, C3, D3, E3, F3, G3, H3,
            A2, B2, C2, D2, E2, F2, G2, H2,
            A1, B1, C1, D1, E1, F1, G1, H1,
        ];
        debug_assert!(index < 64);
        VALUES[index]
    }

    /// Parses a square id such as `"e4"`. Anything that is not exactly a
    /// lowercase file followed by a rank digit is rejected.
    #[inline]
    pub fn try_from_string(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let f = chars.next()?;
        let r = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::try_from_chars(f, r)
    }
    #[inline]
    pub fn try_from_chars(f: char, r: char) -> Option<Self> {
        let file = File::try_from_char(f)?;
        let rank = Rank::try_from_char(r)?;
        Some(Self::new(file, rank))
    }

    #[inline]
    pub fn from_coords(row: usize, col: usize) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Self::from_index(row * 8 + col))
        } else {
            None
        }
    }

    /// Zero-based `(row, col)` grid coordinates.
    #[inline]
    pub const fn coords(&self) -> (usize, usize) {
        (self.row(), self.col())
    }

    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    #[inline]
    pub const fn to_mask(&self) -> Mask {
        Mask::new(0x1 << (63 - self.to_index()))
    }
    #[inline]
    pub const fn col(&self) -> usize {
        self.to_index() % 8
    }
    #[inline]
    pub const fn row(&self) -> usize {
        self.to_index() / 8
    }
    #[inline]
    pub const fn file(&self) -> File {
        File::from_index(self.col())
    }
    #[inline]
    pub const fn rank(&self) -> Rank {
        Rank::from_index(self.row())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_string(s).ok_or_else(|| SquareError::Invalid(s.to_string()))
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        value.to_index()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum File {
    FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH,
}

use File::{
    FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH,
};

impl File {
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [File; 8] = [
            FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH,
        ];
        debug_assert!(index < 8);
        VALUES[index]
    }
    #[inline]
    pub const fn try_from_char(c: char) -> Option<Self> {
        match c {
            'a' => Some(FileA),
            'b' => Some(FileB),
            'c' => Some(FileC),
            'd' => Some(FileD),
            'e' => Some(FileE),
            'f' => Some(FileF),
            'g' => Some(FileG),
            'h' => Some(FileH),
            _ => None,
        }
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const VALUES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
        write!(f, "{}", VALUES[self.to_index()])
    }
}

impl Add<isize> for File {
    type Output = Option<Self>;
    fn add(self, rhs: isize) -> Self::Output {
        match self.to_index().checked_add_signed(rhs) {
            Some(i) if i < 8 => Some(Self::from_index(i)),
            _ => None,
        }
    }
}

impl Sub for File {
    type Output = isize;

    fn sub(self, rhs: Self) -> Self::Output {
        self.to_index() as isize - rhs.to_index() as isize
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Rank {
    Rank8, Rank7, Rank6, Rank5, Rank4, Rank3, Rank2, Rank1,
}

use Rank::{
    Rank8, Rank7, Rank6, Rank5, Rank4, Rank3, Rank2, Rank1,
};

impl Rank {
    #[inline]
    pub fn is_back_rank(&self, color: Color) -> bool {
        Self::back_rank(color) == *self
    }

    /// The home rank of `color`: rank 1 for white, rank 8 for black.
    #[inline]
    pub const fn back_rank(color: Color) -> Self {
        match color {
            White => Rank1,
            Black => Rank8,
        }
    }
    #[inline]
    pub const fn pawn_rank(color: Color) -> Self {
        match color {
            White => Rank2,
            Black => Rank7,
        }
    }
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [Rank; 8] = [
            Rank8, Rank7, Rank6, Rank5, Rank4, Rank3, Rank2, Rank1,
        ];
        debug_assert!(index < 8);
        VALUES[index]
    }
    #[inline]
    pub const fn try_from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Rank1),
            '2' => Some(Rank2),
            '3' => Some(Rank3),
            '4' => Some(Rank4),
            '5' => Some(Rank5),
            '6' => Some(Rank6),
            '7' => Some(Rank7),
            '8' => Some(Rank8),
            _ => None,
        }
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", 8 - self.to_index())
    }
}

impl Add<isize> for Rank {
    type Output = Option<Self>;
    fn add(self, rhs: isize) -> Self::Output {
        match self.to_index().checked_add_signed(rhs) {
            Some(i) if i < 8 => Some(Self::from_index(i)),
            _ => None,
        }
    }
}

impl Sub for Rank {
    type Output = isize;

    fn sub(self, rhs: Self) -> Self::Output {
        self.to_index() as isize - rhs.to_index() as isize
    }
}

/// Displacement between two squares in grid terms. A positive `row`
/// heads toward rank 1 ("down"), a positive `col` toward file h ("right").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub row: isize,
    pub col: isize,
}

impl Offset {
    pub const fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn is_up(&self) -> bool {
        self.row < 0
    }
    #[inline]
    pub const fn is_down(&self) -> bool {
        self.row > 0
    }

    /// Is this offset a step toward the opponent for `color`?
    #[inline]
    pub const fn is_forward(&self, color: Color) -> bool {
        match color {
            White => self.is_up(),
            Black => self.is_down(),
        }
    }
    #[inline]
    pub const fn is_backward(&self, color: Color) -> bool {
        match color {
            White => self.is_down(),
            Black => self.is_up(),
        }
    }
}

impl Add<Offset> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: Offset) -> Self::Output {
        let file = (self.file() + rhs.col)?;
        let rank = (self.rank() + rhs.row)?;
        Some(Square::new(file, rank))
    }
}

impl Sub for Square {
    type Output = Offset;
    fn sub(self, rhs: Self) -> Self::Output {
        Offset::new(self.rank() - rhs.rank(), self.file() - rhs.file())
    }
}

impl Index<Square> for [Mask; 64] {
    type Output = Mask;
    fn index(&self, square: Square) -> &Self::Output {
        &self[square.to_index()]
    }
}

impl IndexMut<Square> for [Mask; 64] {
    fn index_mut(&mut self, square: Square) -> &mut Self::Output {
        &mut self[square.to_index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    UpLeft,
    Up,
    UpRight,
    Left,
    Right,
    DownLeft,
    Down,
    DownRight,
}

use Direction::{
    UpLeft,
    Up,
    UpRight,
    Left,
    Right,
    DownLeft,
    Down,
    DownRight,
};

impl Direction {
    /// Classifies an offset as one of the eight rays, or `None` when the
    /// offset is zero or does not lie on a straight or diagonal line.
    pub fn between(offset: Offset) -> Option<Self> {
        let Offset { row, col } = offset;
        let dir = match (row.signum(), col.signum()) {
            (0, 0) => return None,
            (0, 1) => Right,
            (0, -1) => Left,
            (1, 0) => Down,
            (-1, 0) => Up,
            _ if row.abs() != col.abs() => return None,
            (-1, -1) => UpLeft,
            (-1, 1) => UpRight,
            (1, -1) => DownLeft,
            _ => DownRight,
        };
        Some(dir)
    }

    #[inline]
    pub fn is_orthogonal(&self) -> bool {
        matches!(*self, Up | Left | Right | Down)
    }
    #[inline]
    pub fn is_diagonal(&self) -> bool {
        matches!(*self, UpLeft | UpRight | DownLeft | DownRight)
    }
}

impl From<Direction> for Offset {
    fn from(value: Direction) -> Self {
        match value {
            UpLeft => Self::new(-1, -1),
            Up => Self::new(-1, 0),
            UpRight => Self::new(-1, 1),
            Left => Self::new(0, -1),
            Right => Self::new(0, 1),
            DownLeft => Self::new(1, -1),
            Down => Self::new(1, 0),
            DownRight => Self::new(1, 1),
        }
    }
}

impl Add<Direction> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: Direction) -> Self::Output {
        let offset: Offset = rhs.into();
        self + offset
    }
}

/// One bit per square, a8 in the most significant bit.
#[derive(Debug, Clone, Serialize, Deserialize, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mask(u64);

impl Mask {
    #[inline]
    pub const fn new(val: u64) -> Self {
        Self(val)
    }

    pub fn from_squares<I>(squares: I) -> Self
    where
        I: IntoIterator<Item = Square>,
    {
        squares
            .into_iter()
            .map(|square| square.to_mask())
            .reduce(|m1, m2| m1 | m2)
            .unwrap_or_default()
    }

    #[inline]
    pub const fn contains(&self, square: Square) -> bool {
        (self.0 & square.to_mask().0) != 0
    }

}

impl BitOr for Mask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coords_follow_rank_and_file() {
        assert_eq!(A8.coords(), (0, 0));
        assert_eq!(H8.coords(), (0, 7));
        assert_eq!(A1.coords(), (7, 0));
        assert_eq!(H1.coords(), (7, 7));
        assert_eq!(E2.coords(), (6, 4));
    }
    #[test]
    fn test_square_id_round_trip() {
        for square in Square::iter() {
            let name = square.to_string();
            assert_eq!(Square::try_from_string(&name), Some(square));
            let (row, col) = square.coords();
            assert_eq!(Square::from_coords(row, col), Some(square));
        }
    }
    #[test]
    fn test_invalid_square_ids() {
        for name in ["", "e", "i5", "a0", "a9", "E2", "e22", " e2", "5e", "e-"] {
            assert_eq!(Square::try_from_string(name), None, "{name:?}");
        }
        assert_eq!(Square::from_coords(8, 0), None);
        assert_eq!(Square::from_coords(0, 8), None);
    }
    #[test]
    fn test_from_str() {
        assert_eq!("c3".parse::<Square>(), Ok(C3));
        assert_eq!(
            "z3".parse::<Square>(),
            Err(SquareError::Invalid("z3".to_string()))
        );
    }
    #[test]
    fn test_offset_between_squares() {
        let offset = E4 - E2;
        assert_eq!(offset, Offset::new(-2, 0));
        assert!(offset.is_up());
        assert!(offset.is_forward(White));
        assert!(offset.is_backward(Black));
        assert_eq!(C6 - A8, Offset::new(2, 2));
    }
    #[test]
    fn test_add_offset_stays_on_board() {
        assert_eq!(E4 + Offset::new(-1, 1), Some(F5));
        assert_eq!(A1 + Direction::Down, None);
        assert_eq!(H8 + Direction::UpRight, None);
        assert_eq!(A8 + Direction::DownRight, Some(B7));
    }
    #[test]
    fn test_direction_between() {
        assert_eq!(Direction::between(A1 - A8), Some(Direction::Down));
        assert_eq!(Direction::between(A8 - A1), Some(Direction::Up));
        assert_eq!(Direction::between(H4 - A4), Some(Direction::Right));
        assert_eq!(Direction::between(A4 - H4), Some(Direction::Left));
        assert_eq!(Direction::between(D4 - A1), Some(Direction::UpRight));
        assert_eq!(Direction::between(A7 - D4), Some(Direction::UpLeft));
        assert_eq!(Direction::between(G1 - D4), Some(Direction::DownRight));
        assert_eq!(Direction::between(A1 - D4), Some(Direction::DownLeft));
        assert_eq!(Direction::between(C3 - A1), Some(Direction::UpRight));
        assert_eq!(Direction::between(B3 - A1), None);
        assert_eq!(Direction::between(H5 - A1), None);
        assert_eq!(Direction::between(D4 - D4), None);
    }
    #[test]
    fn test_home_ranks() {
        assert_eq!(Rank::back_rank(White), Rank::Rank1);
        assert_eq!(Rank::back_rank(Black), Rank::Rank8);
        assert!(E1.rank().is_back_rank(White));
        assert!(!E1.rank().is_back_rank(Black));
    }
    #[test]
    fn test_mask_contains() {
        let mask = Mask::from_squares([H1, A8, D4]);
        assert!(mask.contains(A8));
        assert!(mask.contains(D4));
        assert!(mask.contains(H1));
        assert!(!mask.contains(D5));
    }
}
