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

//! Geometric movement strategies.
//!
//! A piece either jumps by a fixed set of offsets or slides along a set of
//! direction vectors until it is blocked. Occupancy beyond the first
//! blocker is never inspected.

use arrayvec::ArrayVec;

use crate::{
    board::{Board, Layout},
    coordinate::Coordinate,
    coordinate_set::CoordinateSet,
    side::Side,
};

/// Candidate destinations of a single piece. A queen in the center of an
/// empty board has the most, 27.
pub type Destinations = ArrayVec<Coordinate, 28>;

pub(crate) const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const KING_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub(crate) const ROOK_VECTORS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

pub(crate) const BISHOP_VECTORS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

pub(crate) const QUEEN_VECTORS: [(i32, i32); 8] = KING_OFFSETS;

pub(crate) const WHITE_PAWN_OFFSETS: [(i32, i32); 3] = [(0, 1), (-1, 1), (1, 1)];
pub(crate) const WHITE_PAWN_FIRST_OFFSETS: [(i32, i32); 4] = [(0, 1), (0, 2), (-1, 1), (1, 1)];
pub(crate) const BLACK_PAWN_OFFSETS: [(i32, i32); 3] = [(0, -1), (-1, -1), (1, -1)];
pub(crate) const BLACK_PAWN_FIRST_OFFSETS: [(i32, i32); 4] =
    [(0, -1), (0, -2), (-1, -1), (1, -1)];

/// How a piece moves across the board.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Movement {
    /// Fixed `(dx, dy)` offsets, unaffected by intervening tiles.
    Jumping(&'static [(i32, i32)]),
    /// Unit direction vectors, extended until the edge or a blocker.
    Sliding(&'static [(i32, i32)]),
}

impl Movement {
    #[inline]
    pub fn is_sliding(self) -> bool {
        matches!(self, Movement::Sliding(_))
    }

    /// Candidate destinations from `from` for a piece of `side` on
    /// `board`. Does not check whether the move would be legal.
    ///
    /// ```
    /// use chess_rules::{Board, Coordinate};
    ///
    /// let board = Board::standard();
    /// let knight = board.piece_at(Coordinate::G1).expect("knight");
    /// let destinations = knight
    ///     .movement()
    ///     .destinations_on(&board, knight.position(), knight.side());
    /// // Includes e2, which is occupied by a friendly pawn.
    /// assert_eq!(destinations.len(), 3);
    /// ```
    pub fn destinations_on(self, board: &Board, from: Coordinate, side: Side) -> Destinations {
        self.destinations(from, side, board.layout())
    }

    /// Tiles attacked from `from` on `board`.
    pub fn reach_on(self, board: &Board, from: Coordinate) -> CoordinateSet {
        self.reach(from, board.layout())
    }

    /// Candidate destinations from `from` for a piece of `side`.
    ///
    /// Jumping destinations are only filtered for leaving the board. A
    /// sliding ray stops at the first occupied tile, which is included only
    /// if it holds an enemy piece.
    pub(crate) fn destinations(self, from: Coordinate, side: Side, layout: &Layout) -> Destinations {
        let mut destinations = Destinations::new();
        match self {
            Movement::Jumping(offsets) => {
                destinations.extend(
                    offsets
                        .iter()
                        .filter_map(|&(dx, dy)| from.relative(dx, dy)),
                );
            }
            Movement::Sliding(vectors) => {
                for &(dx, dy) in vectors {
                    let mut current = from;
                    while let Some(next) = current.relative(dx, dy) {
                        match layout.piece_at(next) {
                            None => destinations.push(next),
                            Some(blocker) => {
                                if blocker.side() != side {
                                    destinations.push(next);
                                }
                                break;
                            }
                        }
                        current = next;
                    }
                }
            }
        }
        destinations
    }

    /// Tiles attacked from `from`. Like [`Movement::destinations()`], but a
    /// sliding ray includes its first blocker regardless of its side.
    pub(crate) fn reach(self, from: Coordinate, layout: &Layout) -> CoordinateSet {
        let mut reach = CoordinateSet::EMPTY;
        match self {
            Movement::Jumping(offsets) => {
                reach.extend(offsets.iter().filter_map(|&(dx, dy)| from.relative(dx, dy)));
            }
            Movement::Sliding(vectors) => {
                for &(dx, dy) in vectors {
                    let mut current = from;
                    while let Some(next) = current.relative(dx, dy) {
                        reach.add(next);
                        if !layout.is_empty(next) {
                            break;
                        }
                        current = next;
                    }
                }
            }
        }
        reach
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{Piece, PieceKind};

    fn layout_with(pieces: &[Piece]) -> Layout {
        let mut layout = Layout::empty(Side::White);
        for &piece in pieces {
            layout.set(piece);
        }
        layout
    }

    #[test]
    fn test_rook_on_empty_board() {
        let layout = Layout::empty(Side::White);
        let rook = Movement::Sliding(&ROOK_VECTORS);
        assert_eq!(rook.destinations(Coordinate::A8, Side::White, &layout).len(), 14);
    }

    #[test]
    fn test_rook_blocked_by_own_piece() {
        let layout = layout_with(&[Piece::new(PieceKind::Knight, Side::White, Coordinate::A4)]);
        let rook = Movement::Sliding(&ROOK_VECTORS);
        let destinations = rook.destinations(Coordinate::A8, Side::White, &layout);
        let down: Vec<_> = destinations
            .iter()
            .copied()
            .filter(|c| c.same_column_as(Coordinate::A8))
            .collect();
        assert_eq!(down, [Coordinate::A7, Coordinate::A6, Coordinate::A5]);
    }

    #[test]
    fn test_rook_blocked_by_enemy_piece() {
        let layout = layout_with(&[Piece::new(PieceKind::Knight, Side::Black, Coordinate::A4)]);
        let rook = Movement::Sliding(&ROOK_VECTORS);
        let destinations = rook.destinations(Coordinate::A8, Side::White, &layout);
        let down: Vec<_> = destinations
            .iter()
            .copied()
            .filter(|c| c.same_column_as(Coordinate::A8))
            .collect();
        assert_eq!(
            down,
            [Coordinate::A7, Coordinate::A6, Coordinate::A5, Coordinate::A4]
        );
        assert_eq!(destinations.len(), 11);
    }

    #[test]
    fn test_knight() {
        let layout = Layout::empty(Side::White);
        let knight = Movement::Jumping(&KNIGHT_OFFSETS);
        assert_eq!(knight.destinations(Coordinate::D4, Side::White, &layout).len(), 8);
        assert_eq!(knight.destinations(Coordinate::A1, Side::White, &layout).len(), 2);
        assert_eq!(knight.destinations(Coordinate::H8, Side::Black, &layout).len(), 2);
    }

    #[test]
    fn test_queen_center() {
        let layout = Layout::empty(Side::White);
        let queen = Movement::Sliding(&QUEEN_VECTORS);
        assert_eq!(queen.destinations(Coordinate::D4, Side::White, &layout).len(), 27);
    }

    #[test]
    fn test_reach_includes_own_blocker() {
        let layout = layout_with(&[Piece::new(PieceKind::Pawn, Side::White, Coordinate::C3)]);
        let bishop = Movement::Sliding(&BISHOP_VECTORS);
        let reach = bishop.reach(Coordinate::A1, &layout);
        assert!(reach.contains(Coordinate::B2));
        assert!(reach.contains(Coordinate::C3));
        assert!(!reach.contains(Coordinate::D4));
        assert!(!bishop
            .destinations(Coordinate::A1, Side::White, &layout)
            .contains(&Coordinate::C3));
    }

    #[test]
    fn test_on_board() {
        let board = Board::standard();
        let rook = Movement::Sliding(&ROOK_VECTORS);
        assert!(rook
            .destinations_on(&board, Coordinate::A1, Side::White)
            .is_empty());
        let reach = rook.reach_on(&board, Coordinate::A1);
        assert_eq!(reach.count(), 2);
        assert!(reach.contains(Coordinate::A2));
        assert!(reach.contains(Coordinate::B1));
    }
}
