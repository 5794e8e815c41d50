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

use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use strum::IntoEnumIterator;

use super::material::{Color, Counts, Material, Pair, Piece};
use super::square::{Direction, File, Offset, Rank, Square};

use Piece::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Squares([Option<Material>; 64]);

impl Squares {
    fn empty() -> Self {
        Self([None; 64])
    }
}

impl Index<Square> for Squares {
    type Output = Option<Material>;
    fn index(&self, index: Square) -> &Self::Output {
        &self.0[index.to_index()]
    }
}

impl IndexMut<Square> for Squares {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.0[index.to_index()]
    }
}

impl Serialize for Squares {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut tuple = serializer.serialize_tuple(64)?;
        for contents in self.0.iter() {
            tuple.serialize_element(contents)?;
        }
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Squares {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SquaresVisitor;
        impl<'de> serde::de::Visitor<'de> for SquaresVisitor {
            type Value = Squares;
            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("the contents of 64 squares, a8 first")
            }
            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut squares = Squares::empty();
                for (index, contents) in squares.0.iter_mut().enumerate() {
                    *contents = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(index, &self))?;
                }
                Ok(squares)
            }
        }
        deserializer.deserialize_tuple(64, SquaresVisitor)
    }
}

/// Which fairy pieces one side has entered so far. An entry is never
/// forgotten, even after the piece is captured.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FairyEntries {
    hunter: bool,
    falcon: bool,
}

impl FairyEntries {
    pub fn contains(&self, piece: Piece) -> bool {
        match piece {
            Hunter => self.hunter,
            Falcon => self.falcon,
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.hunter as usize + self.falcon as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&mut self, piece: Piece) -> bool {
        let slot = match piece {
            Hunter => &mut self.hunter,
            Falcon => &mut self.falcon,
            _ => return false,
        };
        if *slot {
            return false;
        }
        *slot = true;
        true
    }
}

/// The grid plus per-side piece counters.
///
/// Counters change only through `apply_move` (capture) and
/// `register_fairy_entry`, which keeps them in step with the grid as
/// long as every fairy registration is followed by `place_fairy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    squares: Squares,
    counts: Pair<Counts>,
    entered: Pair<FairyEntries>,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    pub fn new() -> Self {
        let position = Self {
            squares: Squares::empty(),
            counts: Pair::new(Counts::standard(), Counts::standard()),
            entered: Pair::default(),
        };
        position.init()
    }

    fn init(mut self) -> Self {
        const BACK_RANK: [Piece; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        for (file, piece) in File::iter().zip(BACK_RANK) {
            for color in Color::iter() {
                let square = Square::new(file, Rank::back_rank(color));
                self.squares[square] = Some(Material::new(color, piece));
                let square = Square::new(file, Rank::pawn_rank(color));
                self.squares[square] = Some(Material::new(color, Pawn));
            }
        }
        self
    }

    pub fn squares(&self) -> &Squares {
        &self.squares
    }

    /// Every occupied square with its occupant, a8 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Material)> + '_ {
        Square::iter().filter_map(move |square| self.squares[square].map(|material| (square, material)))
    }

    pub fn counts(&self, color: Color) -> &Counts {
        &self.counts[color]
    }

    pub fn count(&self, color: Color, piece: Piece) -> usize {
        self.counts[color][piece] as usize
    }

    /// Rooks, knights, bishops and queens still on the board for `color`.
    pub fn major_pieces(&self, color: Color) -> usize {
        self.counts[color].majors()
    }

    pub fn has_no_king(&self, color: Color) -> bool {
        self.counts[color][King] == 0
    }

    pub fn has_no_fairy_pieces(&self, color: Color) -> bool {
        self.counts[color].fairies() == 0
    }

    pub fn fairy_entries(&self, color: Color) -> &FairyEntries {
        &self.entered[color]
    }

    /// Moves the occupant of `from` to `to`, capturing whatever stood on
    /// `to`. Legality must already be established by the caller.
    pub(crate) fn apply_move(&mut self, from: Square, to: Square) -> Option<Material> {
        let mut material = self.squares[from].take()?;
        let captured = self.squares[to].take();
        if let Some(captured) = captured {
            self.counts[captured.color()].decrement(captured.piece());
        }
        if material.piece().is_pawn() {
            material.clear_first_move();
        }
        self.squares[to] = Some(material);
        captured
    }

    /// Records that `color` entered a fairy `piece` and bumps its counter.
    /// Returns false, changing nothing, if that piece was entered before.
    pub(crate) fn register_fairy_entry(&mut self, color: Color, piece: Piece) -> bool {
        if !self.entered[color].insert(piece) {
            return false;
        }
        self.counts[color].increment(piece);
        true
    }

    pub(crate) fn place_fairy(&mut self, square: Square, material: Material) {
        debug_assert!(material.piece().is_fairy());
        debug_assert!(self.squares[square].is_none());
        self.squares[square] = Some(material);
    }
}

impl Index<Square> for Position {
    type Output = Option<Material>;
    #[inline]
    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index]
    }
}

impl AsRef<Self> for Position {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl Pos for Position {}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter() {
            for file in File::iter() {
                if file != File::FileA {
                    write!(f, " ")?;
                }
                match self.squares[Square::new(file, rank)] {
                    Some(material) => write!(f, "{}", material)?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Read-only board geometry shared by the movement rules.
pub trait Pos: AsRef<Position> {
    #[inline]
    fn contents(&self, square: Square) -> &Option<Material> {
        let pos: &Position = self.as_ref();
        &pos.squares[square]
    }
    #[inline]
    fn is_occupied(&self, square: Square) -> bool {
        self.contents(square).is_some()
    }
    /// Where `to` lies relative to `from`.
    #[inline]
    fn offset(&self, from: Square, to: Square) -> Offset {
        to - from
    }

    /// Walks from `from` toward `to` one step at a time along `dir`.
    /// Fails on the first occupied square strictly between the two;
    /// succeeds on reaching `to`, whatever stands there.
    fn path_clear(&self, from: Square, to: Square, dir: Direction) -> bool {
        let mut square = from;
        for _ in 0..7 {
            let Some(next) = square + dir else {
                return false;
            };
            if next == to {
                return true;
            }
            if self.is_occupied(next) {
                return false;
            }
            square = next;
        }
        false
    }

    /// Same row or column with nothing in between.
    fn orthogonal_move_valid(&self, from: Square, to: Square) -> bool {
        match Direction::between(self.offset(from, to)) {
            Some(dir) if dir.is_orthogonal() => self.path_clear(from, to, dir),
            _ => false,
        }
    }

    /// Same diagonal with nothing in between.
    fn diagonal_move_valid(&self, from: Square, to: Square) -> bool {
        match Direction::between(self.offset(from, to)) {
            Some(dir) if dir.is_diagonal() => self.path_clear(from, to, dir),
            _ => false,
        }
    }
}

#[cfg(test)]
impl Position {
    pub fn empty() -> Self {
        Self {
            squares: Squares::empty(),
            counts: Pair::new(Counts::empty(), Counts::empty()),
            entered: Pair::default(),
        }
    }
    pub fn set_contents(mut self, square: Square, value: Option<Material>) -> Self {
        self.squares[square] = value;
        self.recount();
        self
    }
    fn recount(&mut self) {
        let mut counts = Pair::new(Counts::empty(), Counts::empty());
        for (_, material) in self.pieces() {
            counts[material.color()].increment(material.piece());
        }
        self.counts = counts;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Color::*;
    use Square::*;

    fn assert_counts_match_grid(pos: &Position) {
        for color in Color::iter() {
            for piece in Piece::iter() {
                let on_grid = pos
                    .pieces()
                    .filter(|(_, m)| m.color() == color && m.piece() == piece)
                    .count();
                assert_eq!(pos.count(color, piece), on_grid, "{color} {piece}");
            }
        }
    }

    #[test]
    fn test_standard_layout() {
        let pos = Position::new();
        assert_eq!(pos[A1], Some(Material::WR));
        assert_eq!(pos[B1], Some(Material::WN));
        assert_eq!(pos[C1], Some(Material::WB));
        assert_eq!(pos[D1], Some(Material::WQ));
        assert_eq!(pos[E1], Some(Material::WK));
        assert_eq!(pos[H1], Some(Material::WR));
        assert_eq!(pos[E2], Some(Material::WP));
        assert_eq!(pos[D8], Some(Material::BQ));
        assert_eq!(pos[E8], Some(Material::BK));
        assert_eq!(pos[G8], Some(Material::BN));
        assert_eq!(pos[A7], Some(Material::BP));
        assert_eq!(pos[E4], None);
        assert_eq!(pos.pieces().count(), 32);
        assert_eq!(pos.pieces().filter(|(_, m)| m.color() == White).count(), 16);
        assert_counts_match_grid(&pos);
    }
    #[test]
    fn test_offset_signs() {
        let pos = Position::new();
        assert_eq!(pos.offset(E2, E4), Offset::new(-2, 0));
        assert_eq!(pos.offset(E7, E5), Offset::new(2, 0));
        assert_eq!(pos.offset(B1, C3), Offset::new(-2, 1));
        assert_eq!(pos.offset(H8, A8), Offset::new(0, -7));
    }
    #[test]
    fn test_orthogonal_blocked_by_pawn() {
        let pos = Position::new();
        assert!(!pos.orthogonal_move_valid(A1, A3));
        assert!(pos.orthogonal_move_valid(A1, A2));
        assert!(!pos.orthogonal_move_valid(A1, B2));
    }
    #[test]
    fn test_orthogonal_all_directions() {
        let pos = Position::empty().set_contents(D4, Some(Material::WR));
        assert!(pos.orthogonal_move_valid(D4, D8));
        assert!(pos.orthogonal_move_valid(D4, D1));
        assert!(pos.orthogonal_move_valid(D4, A4));
        assert!(pos.orthogonal_move_valid(D4, H4));
        assert!(!pos.orthogonal_move_valid(D4, D4));
        assert!(!pos.orthogonal_move_valid(D4, E6));
    }
    #[test]
    fn test_end_square_occupant_does_not_block() {
        let pos = Position::empty()
            .set_contents(D4, Some(Material::WR))
            .set_contents(D7, Some(Material::BP))
            .set_contents(G7, Some(Material::WP));
        assert!(pos.orthogonal_move_valid(D4, D7));
        assert!(!pos.orthogonal_move_valid(D4, D8));
        assert!(pos.diagonal_move_valid(D4, G7));
        assert!(!pos.diagonal_move_valid(D4, H8));
    }
    #[test]
    fn test_any_color_blocks_a_ray() {
        for blocker in [Material::WP, Material::BP, Material::BF] {
            let pos = Position::empty()
                .set_contents(A1, Some(Material::WB))
                .set_contents(C3, Some(blocker));
            assert!(!pos.diagonal_move_valid(A1, H8));
            assert!(pos.diagonal_move_valid(A1, B2));
        }
    }
    #[test]
    fn test_diagonal_all_directions() {
        let pos = Position::empty().set_contents(D4, Some(Material::WB));
        assert!(pos.diagonal_move_valid(D4, A7));
        assert!(pos.diagonal_move_valid(D4, H8));
        assert!(pos.diagonal_move_valid(D4, A1));
        assert!(pos.diagonal_move_valid(D4, G1));
        assert!(!pos.diagonal_move_valid(D4, E6));
        assert!(!pos.diagonal_move_valid(D4, D6));
    }
    #[test]
    fn test_path_clear_stops_at_the_edge() {
        let pos = Position::empty();
        // G7 is not on the ray a1-h1, so the walk falls off the board
        assert!(!pos.path_clear(A1, G7, Direction::Right));
    }
    #[test]
    fn test_apply_move_relocates() {
        let mut pos = Position::new();
        let captured = pos.apply_move(G1, F3);
        assert_eq!(captured, None);
        assert_eq!(pos[G1], None);
        assert_eq!(pos[F3], Some(Material::WN));
        assert_counts_match_grid(&pos);
    }
    #[test]
    fn test_apply_move_captures_and_decrements() {
        let mut pos = Position::new();
        let captured = pos.apply_move(D1, D8);
        assert_eq!(captured, Some(Material::BQ));
        assert_eq!(pos[D8], Some(Material::WQ));
        assert_eq!(pos.count(Black, Queen), 0);
        assert_eq!(pos.count(White, Queen), 1);
        assert_eq!(pos.major_pieces(Black), 6);
        assert_counts_match_grid(&pos);
    }
    #[test]
    fn test_apply_move_clears_pawn_first_move() {
        let mut pos = Position::new();
        pos.apply_move(E2, E4);
        let pawn = pos[E4].unwrap();
        assert_eq!(pawn.piece(), Pawn);
        assert!(!pawn.is_first_move());
        assert!(pos[D2].unwrap().is_first_move());
    }
    #[test]
    fn test_king_capture_empties_counter() {
        let mut pos = Position::new();
        assert!(!pos.has_no_king(Black));
        pos.apply_move(E1, E8);
        assert!(pos.has_no_king(Black));
        assert!(!pos.has_no_king(White));
    }
    #[test]
    fn test_register_fairy_entry_once_per_kind() {
        let mut pos = Position::new();
        assert!(pos.has_no_fairy_pieces(White));
        assert!(pos.register_fairy_entry(White, Hunter));
        pos.place_fairy(E3, Material::WH);
        assert!(!pos.has_no_fairy_pieces(White));
        assert!(pos.has_no_fairy_pieces(Black));
        assert_eq!(pos.count(White, Hunter), 1);
        assert!(!pos.register_fairy_entry(White, Hunter));
        assert_eq!(pos.count(White, Hunter), 1);
        assert!(pos.register_fairy_entry(Black, Hunter));
        pos.place_fairy(E6, Material::BH);
        assert_eq!(pos.fairy_entries(White).len(), 1);
        assert_counts_match_grid(&pos);
    }
    #[test]
    fn test_captured_fairy_cannot_reenter() {
        let mut pos = Position::new();
        assert!(pos.register_fairy_entry(White, Falcon));
        pos.place_fairy(E3, Material::WF);
        pos.apply_move(E7, E3);
        assert_eq!(pos.count(White, Falcon), 0);
        assert!(pos.has_no_fairy_pieces(White));
        assert!(!pos.register_fairy_entry(White, Falcon));
        assert!(pos.fairy_entries(White).contains(Falcon));
    }
    #[test]
    fn test_register_rejects_non_fairy() {
        let mut pos = Position::new();
        assert!(!pos.register_fairy_entry(White, Queen));
        assert_eq!(pos.count(White, Queen), 1);
    }
    #[test]
    fn test_display() {
        let pos = Position::new();
        let text = pos.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "r n b q k b n r");
        assert_eq!(lines[1], "p p p p p p p p");
        assert_eq!(lines[4], ". . . . . . . .");
        assert_eq!(lines[7], "R N B Q K B N R");
    }
    #[test]
    fn test_serde_round_trip() {
        let mut pos = Position::new();
        pos.apply_move(E2, E4);
        let json = serde_json::to_string(&pos).unwrap();
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pos);
    }
}
