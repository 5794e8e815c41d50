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

//! A two-player chess variant with hunter and falcon fairy pieces.
//!
//! ```
//! use fairy_chess::{Game, GameState};
//!
//! let mut game = Game::new();
//! assert!(game.make_move("e2", "e4"));
//! assert!(!game.make_move("e4", "e5"));
//! assert_eq!(game.game_state(), GameState::Unfinished);
//! ```

mod board;
mod game;

pub use board::*;
pub use game::*;
