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

//! Per-side legality and check detection.

use core::fmt;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::{
    board::Layout,
    castling_side::CastlingSide,
    coordinate::{Column, Coordinate},
    coordinate_set::CoordinateSet,
    m::{Move, MoveList},
    piece::{Piece, PieceKind},
    side::Side,
    transition::{MoveStatus, MoveTransition},
};

/// One side of a [`Board`](crate::Board), computed for exactly that
/// snapshot.
///
/// The legal moves of a player are the moves of all its pieces plus the
/// castles it is eligible for. They are not yet filtered for leaving the
/// own king attacked; [`Player::attempt()`] reports those as
/// [`MoveStatus::LeavesOwnKingInCheck`].
pub struct Player {
    layout: Arc<Layout>,
    side: Side,
    king: Option<Piece>,
    legal_moves: MoveList,
    opponent_reach: CoordinateSet,
    in_check: bool,
    escape_moves: OnceLock<MoveList>,
}

impl Player {
    pub(crate) fn new(layout: Arc<Layout>, side: Side) -> Player {
        let king = layout.king(side);
        let opponent_reach = layout.reach(!side);
        let in_check = king.is_some_and(|king| opponent_reach.contains(king.position()));

        let mut legal_moves = layout.candidate_moves(side);
        if let Some(king) = king.filter(|_| !in_check) {
            legal_moves.extend(
                CastlingSide::ALL
                    .into_iter()
                    .filter_map(|castling_side| castle(&layout, king, castling_side, opponent_reach)),
            );
        }

        Player {
            layout,
            side,
            king,
            legal_moves,
            opponent_reach,
            in_check,
            escape_moves: OnceLock::new(),
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// The king of this side. Every board built by a
    /// [`Builder`](crate::Builder) or by legal moves has one.
    #[inline]
    pub fn king(&self) -> Option<Piece> {
        self.king
    }

    pub fn active_pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.layout.active_pieces(self.side)
    }

    #[inline]
    pub fn legal_moves(&self) -> &MoveList {
        &self.legal_moves
    }

    pub fn is_legal(&self, m: &Move) -> bool {
        self.legal_moves.contains(m)
    }

    /// Tiles attacked by the opponent.
    #[inline]
    pub fn opponent_reach(&self) -> CoordinateSet {
        self.opponent_reach
    }

    /// Whether the opponent attacks `coordinate`.
    #[inline]
    pub fn is_threatened(&self, coordinate: Coordinate) -> bool {
        self.opponent_reach.contains(coordinate)
    }

    #[inline]
    pub fn is_in_check(&self) -> bool {
        self.in_check
    }

    /// Legal moves after which the own king is not attacked.
    ///
    /// Computed on first use by executing every legal move, then kept for
    /// the lifetime of the player.
    pub fn escape_moves(&self) -> &MoveList {
        self.escape_moves.get_or_init(|| {
            self.legal_moves
                .iter()
                .copied()
                .filter(|m| !m.successor(&self.layout).player(self.side).is_in_check())
                .collect()
        })
    }

    pub fn has_escape_moves(&self) -> bool {
        !self.escape_moves().is_empty()
    }

    pub fn is_in_checkmate(&self) -> bool {
        self.in_check && !self.has_escape_moves()
    }

    pub fn is_in_stalemate(&self) -> bool {
        !self.in_check && !self.has_escape_moves()
    }

    /// Attempts `m` on behalf of this player.
    ///
    /// # Examples
    ///
    /// ```
    /// use chess_rules::{Board, Coordinate, Move, MoveStatus};
    ///
    /// let board = Board::standard();
    /// let m = Move::resolve(&board, Coordinate::B1, Coordinate::C3).expect("legal");
    ///
    /// let transition = board.current_player().attempt(&m);
    /// assert_eq!(transition.status(), MoveStatus::Done);
    ///
    /// // Not Black's turn.
    /// let transition = board.opponent().attempt(&m);
    /// assert_eq!(transition.status(), MoveStatus::Illegal);
    ///
    /// let transition = board.current_player().attempt(&Move::Null);
    /// assert_eq!(transition.status(), MoveStatus::Null);
    /// assert!(transition.board().is_none());
    /// ```
    pub fn attempt(&self, m: &Move) -> MoveTransition {
        let transition = if m.is_null() {
            MoveTransition::rejected(*m, MoveStatus::Null)
        } else if self.layout.turn() != self.side || !self.is_legal(m) {
            MoveTransition::illegal(*m)
        } else {
            let next = m.successor(&self.layout);
            if next.player(self.side).is_in_check() {
                MoveTransition::rejected(*m, MoveStatus::LeavesOwnKingInCheck)
            } else {
                MoveTransition::done(next, *m)
            }
        };
        debug!(side = %self.side, mv = %m, status = %transition.status(), "move attempt");
        transition
    }
}

fn castle(
    layout: &Layout,
    king: Piece,
    castling_side: CastlingSide,
    opponent_reach: CoordinateSet,
) -> Option<Move> {
    let side = king.side();
    let backrank = side.backrank();
    if !king.is_first_move() || king.position() != Coordinate::from_coords(Column::E, backrank) {
        return None;
    }

    let rook = layout.piece_at(castling_side.rook_from(side))?;
    if !rook.is(PieceKind::Rook) || rook.side() != side || !rook.is_first_move() {
        return None;
    }

    let tile = |column| Coordinate::from_coords(column, backrank);
    let blocked = castling_side
        .empty_columns()
        .iter()
        .any(|&column| !layout.is_empty(tile(column)));
    let attacked = castling_side
        .safe_columns()
        .iter()
        .any(|&column| opponent_reach.contains(tile(column)));
    if blocked || attacked {
        return None;
    }

    Some(Move::Castle {
        side: castling_side,
        king,
        rook,
    })
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("side", &self.side)
            .field("king", &self.king.map(Piece::position))
            .field("in_check", &self.in_check)
            .field("legal_moves", &self.legal_moves.len())
            .finish_non_exhaustive()
    }
}

/// Outcome of a finished game.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Outcome {
    /// The side to move is checkmated.
    Decisive { winner: Side },
    /// The side to move is stalemated.
    Draw,
}

impl Outcome {
    pub const fn winner(self) -> Option<Side> {
        match self {
            Outcome::Decisive { winner } => Some(winner),
            Outcome::Draw => None,
        }
    }

    pub const fn is_draw(self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Outcome::Decisive {
                winner: Side::White,
            } => "1-0",
            Outcome::Decisive {
                winner: Side::Black,
            } => "0-1",
            Outcome::Draw => "1/2-1/2",
        })
    }
}
