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

//! Count playable move paths.
//!
//! # Examples
//!
//! ```
//! use chess_rules::{perft, Board};
//!
//! let board = Board::standard();
//! assert_eq!(perft(&board, 1), 20);
//! assert_eq!(perft(&board, 2), 400);
//! assert_eq!(perft(&board, 3), 8902);
//! ```

use crate::board::Board;

/// Counts move paths of a given length, where every move of a path is
/// attempted by the side to move and ends with
/// [`MoveStatus::Done`](crate::MoveStatus::Done).
///
/// Paths ending in mate or stalemate early are not counted. Useful for
/// comparing, testing and debugging move generation correctness and
/// performance.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth < 1 {
        return 1;
    }

    let player = board.current_player();
    if depth == 1 {
        // Escape moves are exactly the moves whose attempt is done.
        return player.escape_moves().len() as u64;
    }

    player
        .legal_moves()
        .iter()
        .filter_map(|m| player.attempt(m).into_board())
        .map(|child| perft(&child, depth - 1))
        .sum()
}
