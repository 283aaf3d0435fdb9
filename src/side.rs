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

use crate::coordinate::Rank;

/// `White` or `Black`, the two opposing sides.
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    #[inline]
    pub const fn from_white(white: bool) -> Side {
        if white {
            Side::White
        } else {
            Side::Black
        }
    }

    #[inline]
    pub fn fold<T>(self, white: T, black: T) -> T {
        match self {
            Side::White => white,
            Side::Black => black,
        }
    }

    #[inline]
    pub const fn is_white(self) -> bool {
        matches!(self, Side::White)
    }

    #[inline]
    pub const fn is_black(self) -> bool {
        matches!(self, Side::Black)
    }

    #[must_use]
    #[inline]
    pub const fn other(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Rank delta of a single pawn step for this side: `1` for White,
    /// `-1` for Black.
    #[inline]
    pub const fn forward(self) -> i32 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// The rank where this side's king and rooks start.
    #[inline]
    pub const fn backrank(self) -> Rank {
        match self {
            Side::White => Rank::First,
            Side::Black => Rank::Eighth,
        }
    }

    /// The rank where this side's pawns start.
    #[inline]
    pub const fn pawn_rank(self) -> Rank {
        match self {
            Side::White => Rank::Second,
            Side::Black => Rank::Seventh,
        }
    }

    /// The rank where this side's pawns promote.
    #[inline]
    pub const fn promotion_rank(self) -> Rank {
        self.other().backrank()
    }

    /// `White` and `Black`, in this order.
    pub const ALL: [Side; 2] = [Side::White, Side::Black];
}

impl ops::Not for Side {
    type Output = Side;

    #[inline]
    fn not(self) -> Side {
        self.other()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fold("white", "black"))
    }
}

/// Container with values for each [`Side`].
#[derive(Clone, Default, Eq, PartialEq, Debug, Hash)]
pub struct BySide<T> {
    pub white: T,
    pub black: T,
}

impl<T> BySide<T> {
    #[inline]
    pub fn new_with<F>(mut init: F) -> BySide<T>
    where
        F: FnMut(Side) -> T,
    {
        BySide {
            white: init(Side::White),
            black: init(Side::Black),
        }
    }

    #[inline]
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::White => &self.white,
            Side::Black => &self.black,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::White => &mut self.white,
            Side::Black => &mut self.black,
        }
    }

    #[inline]
    pub fn map<U, F>(self, mut f: F) -> BySide<U>
    where
        F: FnMut(T) -> U,
    {
        BySide {
            white: f(self.white),
            black: f(self.black),
        }
    }

    #[inline]
    pub fn find<F>(&self, mut predicate: F) -> Option<Side>
    where
        F: FnMut(&T) -> bool,
    {
        if predicate(&self.white) {
            Some(Side::White)
        } else if predicate(&self.black) {
            Some(Side::Black)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other() {
        for side in Side::ALL {
            assert_eq!(!!side, side);
            assert_ne!(!side, side);
        }
    }

    #[test]
    fn test_ranks() {
        assert_eq!(Side::White.backrank(), Rank::First);
        assert_eq!(Side::Black.pawn_rank(), Rank::Seventh);
        assert_eq!(Side::White.promotion_rank(), Rank::Eighth);
        assert_eq!(Side::Black.promotion_rank(), Rank::First);
    }

    #[test]
    fn test_by_side() {
        let mut counts = BySide::new_with(|side| side.forward());
        assert_eq!(*counts.get(Side::Black), -1);
        *counts.get_mut(Side::White) += 1;
        assert_eq!(counts.find(|&c| c == 2), Some(Side::White));
        assert_eq!(counts.map(|c| c * 2), BySide { white: 4, black: -2 });
    }
}
