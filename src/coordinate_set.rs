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

use core::{fmt, fmt::Write as _, ops};

use crate::coordinate::{Column, Coordinate, Rank};

/// A set of coordinates, one bit per tile.
///
/// Used for the tiles a side can reach.
///
/// ```
/// use chess_rules::{Coordinate, CoordinateSet};
///
/// let set: CoordinateSet = [Coordinate::E4, Coordinate::D5].into_iter().collect();
/// assert!(set.contains(Coordinate::E4));
/// assert!(!set.contains(Coordinate::E5));
/// assert_eq!(set.count(), 2);
/// ```
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct CoordinateSet(pub u64);

impl CoordinateSet {
    pub const EMPTY: CoordinateSet = CoordinateSet(0);

    #[inline]
    pub const fn from_coordinate(coordinate: Coordinate) -> CoordinateSet {
        CoordinateSet(1 << coordinate.index())
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, coordinate: Coordinate) -> bool {
        self.0 & (1 << coordinate.index()) != 0
    }

    #[inline]
    pub fn add(&mut self, coordinate: Coordinate) {
        self.0 |= 1 << coordinate.index();
    }

    #[inline]
    pub fn remove(&mut self, coordinate: Coordinate) {
        self.0 &= !(1 << coordinate.index());
    }

    #[must_use]
    #[inline]
    pub const fn with(self, coordinate: Coordinate) -> CoordinateSet {
        CoordinateSet(self.0 | 1 << coordinate.index())
    }

    #[inline]
    pub const fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn intersects(self, other: CoordinateSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Iterates the coordinates in ascending index order.
    #[inline]
    pub fn iter(self) -> IntoIter {
        IntoIter(self.0)
    }
}

impl fmt::Debug for CoordinateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            for column in Column::ALL {
                let coordinate = Coordinate::from_coords(column, rank);
                f.write_char(if self.contains(coordinate) { '1' } else { '.' })?;
                f.write_char(if column < Column::H { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

impl ops::BitOr for CoordinateSet {
    type Output = CoordinateSet;

    #[inline]
    fn bitor(self, rhs: CoordinateSet) -> CoordinateSet {
        CoordinateSet(self.0 | rhs.0)
    }
}

impl ops::BitOrAssign for CoordinateSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: CoordinateSet) {
        self.0 |= rhs.0;
    }
}

impl ops::BitAnd for CoordinateSet {
    type Output = CoordinateSet;

    #[inline]
    fn bitand(self, rhs: CoordinateSet) -> CoordinateSet {
        CoordinateSet(self.0 & rhs.0)
    }
}

impl From<Coordinate> for CoordinateSet {
    #[inline]
    fn from(coordinate: Coordinate) -> CoordinateSet {
        CoordinateSet::from_coordinate(coordinate)
    }
}

impl FromIterator<Coordinate> for CoordinateSet {
    fn from_iter<T>(iter: T) -> CoordinateSet
    where
        T: IntoIterator<Item = Coordinate>,
    {
        let mut result = CoordinateSet::EMPTY;
        result.extend(iter);
        result
    }
}

impl Extend<Coordinate> for CoordinateSet {
    fn extend<T>(&mut self, iter: T)
    where
        T: IntoIterator<Item = Coordinate>,
    {
        for coordinate in iter {
            self.add(coordinate);
        }
    }
}

impl IntoIterator for CoordinateSet {
    type Item = Coordinate;
    type IntoIter = IntoIter;

    #[inline]
    fn into_iter(self) -> IntoIter {
        self.iter()
    }
}

/// Iterator over the coordinates of a [`CoordinateSet`].
#[derive(Debug, Clone)]
pub struct IntoIter(u64);

impl Iterator for IntoIter {
    type Item = Coordinate;

    #[inline]
    fn next(&mut self) -> Option<Coordinate> {
        if self.0 == 0 {
            None
        } else {
            let coordinate = Coordinate::new(self.0.trailing_zeros());
            self.0 &= self.0.wrapping_sub(1);
            Some(coordinate)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for IntoIter {}
