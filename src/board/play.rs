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

use anyhow::Result;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::material::{Color, Material};
use super::moves::{is_valid_move, Action, Move};
use super::position::{Pos, Position};
use super::square::Square;
use super::Turn;
use crate::game::GameState;

/// Why an action was refused. Every rejection leaves the game untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    #[error("Not a square on the board")]
    OutOfBounds,
    #[error("No piece on the start square")]
    EmptySquare,
    #[error("The piece belongs to the other player")]
    NotOwner,
    #[error("Cannot capture your own piece")]
    SelfCapture,
    #[error("The piece cannot move that way")]
    IllegalGeometry,
    #[error("The game is already over")]
    GameOver,
    #[error("Not a fairy piece (expecting H, F, h or f)")]
    NotFairyPiece,
    #[error("Fairy piece letter does not match the player's color")]
    ColorMismatch,
    #[error("Fairy pieces enter on the player's home rank")]
    NotHomeRank,
    #[error("The entry square is occupied")]
    SquareOccupied,
    #[error("That fairy piece has already been entered")]
    AlreadyEntered,
    #[error("Too many major pieces left to enter a fairy piece")]
    FairyGateFailed,
}
use Rejection::*;

/// Tunable parts of the variant.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rules {
    /// Most major pieces a side may still hold when entering a fairy
    /// piece while it has none on the board.
    pub first_fairy_max_majors: usize,
    /// Same, while the side already holds a fairy piece.
    pub second_fairy_max_majors: usize,
}

impl Rules {
    pub const STANDARD: Self = Self {
        first_fairy_max_majors: 6,
        second_fairy_max_majors: 5,
    };

    /// The major piece limit for a side, depending on whether it still
    /// has a fairy piece on the board.
    pub fn max_majors(&self, holds_fairy: bool) -> usize {
        if holds_fairy {
            self.second_fairy_max_majors
        } else {
            self.first_fairy_max_majors
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A game between two players sharing one board. White moves first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    position: Position,
    turn: Color,
    rules: Rules,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_rules(Rules::default())
    }

    pub fn with_rules(rules: Rules) -> Self {
        Self {
            position: Position::new(),
            turn: Color::White,
            rules,
        }
    }

    /// Reconstruct a game by replaying a sequence of actions. Fails on
    /// the first action that is rejected.
    pub fn replay(actions: &[Action]) -> Result<Self> {
        let mut game = Self::new();
        for action in actions {
            game.submit(*action)?;
        }
        Ok(game)
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Derived from the king counters every time it is asked for.
    pub fn game_state(&self) -> GameState {
        GameState::of(&self.position)
    }

    /// Moves the piece on `from` to `to`. Returns false, leaving the game
    /// unchanged, if the move is not allowed.
    pub fn make_move(&mut self, from: &str, to: &str) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// Enters a fairy piece: `H`/`F` for white, `h`/`f` for black.
    /// Returns false, leaving the game unchanged, if the entry is not
    /// allowed.
    pub fn enter_fairy_piece(&mut self, letter: char, square: &str) -> bool {
        self.try_enter_fairy_piece(letter, square).is_ok()
    }

    pub fn try_move(&mut self, from: &str, to: &str) -> Result<()> {
        let from = parse_square(from)?;
        let to = parse_square(to)?;
        self.submit_move(Move::new(from, to))
    }

    pub fn try_enter_fairy_piece(&mut self, letter: char, square: &str) -> Result<()> {
        let square = parse_square(square)?;
        if self.game_state().is_over() {
            debug!("rejected {}@{}: {}", letter, square, GameOver);
            return Err(GameOver.into());
        }
        let Some(material) = Material::try_from_fairy_char(letter) else {
            debug!("rejected {:?}@{}: {}", letter, square, NotFairyPiece);
            return Err(NotFairyPiece.into());
        };
        self.submit_entry(material, square)
    }

    pub fn submit(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Move(mv) => self.submit_move(mv),
            Action::Enter(material, square) => self.submit_entry(material, square),
        }
    }

    pub fn submit_move(&mut self, mv: Move) -> Result<()> {
        if let Err(reason) = self.validate_move(mv) {
            debug!("rejected {} move {mv}: {reason}", self.turn);
            return Err(reason.into());
        }
        let captured = self.position.apply_move(mv.from, mv.to);
        match captured {
            Some(material) => trace!("{} {mv} captures {material}", self.turn),
            None => trace!("{} {mv}", self.turn),
        }
        self.end_turn();
        Ok(())
    }

    pub fn submit_entry(&mut self, material: Material, square: Square) -> Result<()> {
        if let Err(reason) = self.validate_entry(material, square) {
            debug!("rejected {} entry {material}@{square}: {reason}", self.turn);
            return Err(reason.into());
        }
        let registered = self
            .position
            .register_fairy_entry(material.color(), material.piece());
        debug_assert!(registered, "entry validated as new");
        self.position.place_fairy(square, material);
        trace!("{} enters {material}@{square}", self.turn);
        self.end_turn();
        Ok(())
    }

    fn validate_move(&self, mv: Move) -> Result<(), Rejection> {
        if self.game_state().is_over() {
            return Err(GameOver);
        }
        let material = self.contents(mv.from).ok_or(EmptySquare)?;
        if material.color() != self.turn {
            return Err(NotOwner);
        }
        if let Some(target) = self.contents(mv.to) {
            if target.color() == self.turn {
                return Err(SelfCapture);
            }
        }
        if !is_valid_move(material, mv.from, mv.to, &self.position) {
            return Err(IllegalGeometry);
        }
        Ok(())
    }

    fn validate_entry(&self, material: Material, square: Square) -> Result<(), Rejection> {
        if self.game_state().is_over() {
            return Err(GameOver);
        }
        if !material.piece().is_fairy() {
            return Err(NotFairyPiece);
        }
        if material.color() != self.turn {
            return Err(ColorMismatch);
        }
        if !square.rank().is_back_rank(self.turn) {
            return Err(NotHomeRank);
        }
        if self.is_occupied(square) {
            return Err(SquareOccupied);
        }
        if self.position.fairy_entries(self.turn).contains(material.piece()) {
            return Err(AlreadyEntered);
        }
        let holds_fairy = !self.position.has_no_fairy_pieces(self.turn);
        if self.position.major_pieces(self.turn) > self.rules.max_majors(holds_fairy) {
            return Err(FairyGateFailed);
        }
        Ok(())
    }

    fn end_turn(&mut self) {
        if let Some(winner) = self.game_state().winner() {
            info!("game over: {winner} won");
        }
        self.turn = !self.turn;
    }
}

fn parse_square(name: &str) -> Result<Square, Rejection> {
    Square::try_from_string(name).ok_or_else(|| {
        debug!("rejected square id {:?}: {}", name, OutOfBounds);
        OutOfBounds
    })
}

impl Turn for Game {
    #[inline]
    fn turn(&self) -> Color {
        self.turn
    }
}

impl AsRef<Position> for Game {
    fn as_ref(&self) -> &Position {
        &self.position
    }
}

impl Pos for Game {}

#[cfg(test)]
impl Game {
    pub fn from_position(position: Position, turn: Color) -> Self {
        Self {
            position,
            turn,
            rules: Rules::default(),
        }
    }
}
