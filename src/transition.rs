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

use core::fmt;

use crate::{board::Board, m::Move};

/// How a move attempt ended.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MoveStatus {
    /// The move was played and a new board was produced.
    Done,
    /// The move is not among the legal moves of the player, or it is not
    /// the player's turn.
    Illegal,
    /// The move would leave the mover's king attacked.
    LeavesOwnKingInCheck,
    /// The attempted move was [`Move::Null`].
    Null,
}

impl MoveStatus {
    #[inline]
    pub const fn is_done(self) -> bool {
        matches!(self, MoveStatus::Done)
    }
}

impl fmt::Display for MoveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            MoveStatus::Done => "done",
            MoveStatus::Illegal => "illegal move",
            MoveStatus::LeavesOwnKingInCheck => "leaves own king in check",
            MoveStatus::Null => "null move",
        })
    }
}

/// Outcome of one move attempt: the attempted move, its status and, only
/// when the status is [`MoveStatus::Done`], the resulting board.
#[derive(Clone, Debug)]
pub struct MoveTransition {
    board: Option<Board>,
    mv: Move,
    status: MoveStatus,
}

impl MoveTransition {
    pub(crate) fn done(board: Board, mv: Move) -> MoveTransition {
        MoveTransition {
            board: Some(board),
            mv,
            status: MoveStatus::Done,
        }
    }

    pub(crate) fn rejected(mv: Move, status: MoveStatus) -> MoveTransition {
        MoveTransition {
            board: None,
            mv,
            status,
        }
    }

    pub(crate) fn illegal(mv: Move) -> MoveTransition {
        MoveTransition::rejected(mv, MoveStatus::Illegal)
    }

    /// The resulting board, present only for [`MoveStatus::Done`].
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn into_board(self) -> Option<Board> {
        self.board
    }

    pub fn mv(&self) -> Move {
        self.mv
    }

    pub fn status(&self) -> MoveStatus {
        self.status
    }
}
