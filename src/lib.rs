// This file is part of the chess-rules library.
// Copyright (C) 2024 The chess-rules developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! A chess rules engine: legal move generation, check, checkmate and
//! stalemate detection, and immutable board snapshots.
//!
//! Every move produces a brand new [`Board`]. Boards are never mutated and
//! can be shared freely, also across threads.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use chess_rules::Board;
//!
//! let board = Board::standard();
//! let legals = board.legal_moves();
//! assert_eq!(legals.len(), 20);
//! ```
//!
//! Play moves:
//!
//! ```
//! use chess_rules::{Board, Coordinate, Move, MoveStatus};
//!
//! let board = Board::standard();
//!
//! // 1. e4
//! let m = Move::resolve(&board, Coordinate::E2, Coordinate::E4).expect("legal");
//! let transition = board.current_player().attempt(&m);
//! assert_eq!(transition.status(), MoveStatus::Done);
//!
//! let board = transition.into_board().expect("done");
//! assert!(board.piece_at(Coordinate::E4).is_some());
//! ```
//!
//! Detect game end conditions:
//!
//! ```
//! # use chess_rules::Board;
//! # let board = Board::standard();
//! assert!(!board.is_checkmate());
//! assert!(!board.is_stalemate());
//! assert_eq!(board.outcome(), None); // no winner yet
//! ```
//!
//! Moves are requested as a source and a destination in
//! [algebraic notation](Coordinate), see [`MoveRequest`].
//!
//! # Logging
//!
//! Move attempts and board derivations are reported through
//! [`tracing`](https://docs.rs/tracing/0.1) at `debug` and `trace` level.
//! Install a subscriber to see them.
//!
//! # Feature flags
//!
//! * `arbitrary`: Implements [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for vocabulary types.
//! * `serde`: Implements [`serde`](https://docs.rs/serde/1)
//!   serialization/deserialization for [`Coordinate`], using algebraic
//!   notation.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.

#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

#[macro_use]
mod util;
mod castling_side;
mod coordinate;
mod coordinate_set;
mod m;
mod movement;
mod perft;
mod piece;
mod player;
mod side;
mod transition;

pub mod board;

pub use board::{Board, BoardError, BoardErrorKinds, Builder, Tile};
pub use castling_side::CastlingSide;
pub use coordinate::{Column, Coordinate, InvalidCoordinateError, Rank, TileColor};
pub use coordinate_set::CoordinateSet;
pub use m::{Move, MoveKind, MoveList, MoveRequest, ParseMoveRequestError};
pub use movement::{Destinations, Movement};
pub use perft::perft;
pub use piece::{Piece, PieceKind};
pub use player::{Outcome, Player};
pub use side::{BySide, Side};
pub use transition::{MoveStatus, MoveTransition};

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Column {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Rank {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Coordinate {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for PieceKind {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Side {}
