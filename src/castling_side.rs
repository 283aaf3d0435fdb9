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

use core::{fmt, ops};

use crate::{
    coordinate::{Column, Coordinate},
    side::Side,
};

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    #[inline]
    pub const fn is_queen_side(self) -> bool {
        matches!(self, CastlingSide::QueenSide)
    }

    #[inline]
    pub const fn is_king_side(self) -> bool {
        matches!(self, CastlingSide::KingSide)
    }

    pub const fn king_to_column(self) -> Column {
        match self {
            CastlingSide::KingSide => Column::G,
            CastlingSide::QueenSide => Column::C,
        }
    }

    pub const fn rook_to_column(self) -> Column {
        match self {
            CastlingSide::KingSide => Column::F,
            CastlingSide::QueenSide => Column::D,
        }
    }

    /// Column of the rook that takes part in this castle.
    pub const fn rook_from_column(self) -> Column {
        match self {
            CastlingSide::KingSide => Column::H,
            CastlingSide::QueenSide => Column::A,
        }
    }

    /// Columns on the back rank between king and rook. All of them must be
    /// empty to castle.
    pub const fn empty_columns(self) -> &'static [Column] {
        match self {
            CastlingSide::KingSide => &[Column::F, Column::G],
            CastlingSide::QueenSide => &[Column::D, Column::C, Column::B],
        }
    }

    /// Columns the king passes over or lands on. None of them may be
    /// reached by the opponent.
    pub const fn safe_columns(self) -> &'static [Column] {
        match self {
            CastlingSide::KingSide => &[Column::F, Column::G],
            CastlingSide::QueenSide => &[Column::D, Column::C],
        }
    }

    pub const fn king_to(self, side: Side) -> Coordinate {
        Coordinate::from_coords(self.king_to_column(), side.backrank())
    }

    pub const fn rook_to(self, side: Side) -> Coordinate {
        Coordinate::from_coords(self.rook_to_column(), side.backrank())
    }

    pub const fn rook_from(self, side: Side) -> Coordinate {
        Coordinate::from_coords(self.rook_from_column(), side.backrank())
    }

    /// The standard notation, `O-O` or `O-O-O`.
    pub const fn notation(self) -> &'static str {
        match self {
            CastlingSide::KingSide => "O-O",
            CastlingSide::QueenSide => "O-O-O",
        }
    }

    #[must_use]
    #[inline]
    pub const fn other(self) -> CastlingSide {
        match self {
            CastlingSide::KingSide => CastlingSide::QueenSide,
            CastlingSide::QueenSide => CastlingSide::KingSide,
        }
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}

impl ops::Not for CastlingSide {
    type Output = CastlingSide;

    #[inline]
    fn not(self) -> CastlingSide {
        self.other()
    }
}

impl fmt::Display for CastlingSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notation())
    }
}
