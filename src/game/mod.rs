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
use strum_macros::Display;

use crate::{Color, Position};

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    #[strum(serialize = "UNFINISHED")]
    Unfinished,
    #[strum(serialize = "WHITE_WON")]
    WhiteWon,
    #[strum(serialize = "BLACK_WON")]
    BlackWon,
}

impl GameState {
    /// A game is won by capturing the opposing king.
    pub fn of(position: &Position) -> Self {
        if position.has_no_king(Color::White) {
            GameState::BlackWon
        } else if position.has_no_king(Color::Black) {
            GameState::WhiteWon
        } else {
            GameState::Unfinished
        }
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            GameState::Unfinished => None,
            GameState::WhiteWon => Some(Color::White),
            GameState::BlackWon => Some(Color::Black),
        }
    }

    pub fn is_over(&self) -> bool {
        !matches!(self, GameState::Unfinished)
    }
}
