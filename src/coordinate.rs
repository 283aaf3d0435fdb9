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

use core::{fmt, str::FromStr};
use std::error::Error;

/// A column of the board, `a` to `h`.
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[repr(u8)]
pub enum Column {
    A = 0,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl Column {
    /// Gets the column with the given index, where `0` is the a-column.
    ///
    /// # Panics
    ///
    /// Panics if the index is not in the range `0..=7`.
    #[track_caller]
    #[inline]
    pub const fn new(index: u32) -> Column {
        assert!(index < 8, "column index out of range");
        Column::ALL[index as usize]
    }

    #[inline]
    pub const fn from_char(ch: char) -> Option<Column> {
        match ch {
            'a'..='h' => Some(Column::new(ch as u32 - 'a' as u32)),
            _ => None,
        }
    }

    #[inline]
    pub const fn char(self) -> char {
        (b'a' + self as u8) as char
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// Gets the column `delta` columns to the right (or to the left, for a
    /// negative `delta`), if it is still on the board.
    #[inline]
    pub fn offset(self, delta: i32) -> Option<Column> {
        (self as i32)
            .checked_add(delta)
            .and_then(|index| Column::try_from(index).ok())
    }

    /// `A`, ..., `H`.
    pub const ALL: [Column; 8] = [
        Column::A,
        Column::B,
        Column::C,
        Column::D,
        Column::E,
        Column::F,
        Column::G,
        Column::H,
    ];
}

try_from_int_impl! { Column, 0, 8, u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Write::write_char(f, self.char())
    }
}

/// A rank of the board, `1` to `8`.
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[repr(u8)]
pub enum Rank {
    First = 0,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
}

impl Rank {
    /// Gets the rank with the given index, where `0` is the first rank.
    ///
    /// # Panics
    ///
    /// Panics if the index is not in the range `0..=7`.
    #[track_caller]
    #[inline]
    pub const fn new(index: u32) -> Rank {
        assert!(index < 8, "rank index out of range");
        Rank::ALL[index as usize]
    }

    #[inline]
    pub const fn from_char(ch: char) -> Option<Rank> {
        match ch {
            '1'..='8' => Some(Rank::new(ch as u32 - '1' as u32)),
            _ => None,
        }
    }

    #[inline]
    pub const fn char(self) -> char {
        (b'1' + self as u8) as char
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// The rank number as written in algebraic notation, `1` to `8`.
    #[inline]
    pub const fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Gets the rank `delta` ranks up (or down, for a negative `delta`), if
    /// it is still on the board.
    #[inline]
    pub fn offset(self, delta: i32) -> Option<Rank> {
        (self as i32)
            .checked_add(delta)
            .and_then(|index| Rank::try_from(index).ok())
    }

    /// `First`, ..., `Eighth`.
    pub const ALL: [Rank; 8] = [
        Rank::First,
        Rank::Second,
        Rank::Third,
        Rank::Fourth,
        Rank::Fifth,
        Rank::Sixth,
        Rank::Seventh,
        Rank::Eighth,
    ];
}

try_from_int_impl! { Rank, 0, 8, u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Write::write_char(f, self.char())
    }
}

/// Shade of a tile. The a1 tile is dark.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum TileColor {
    Light,
    Dark,
}

impl TileColor {
    #[inline]
    pub const fn is_light(self) -> bool {
        matches!(self, TileColor::Light)
    }

    #[inline]
    pub const fn is_dark(self) -> bool {
        matches!(self, TileColor::Dark)
    }
}

/// Error when parsing an invalid algebraic coordinate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidCoordinateError;

impl fmt::Display for InvalidCoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid coordinate")
    }
}

impl Error for InvalidCoordinateError {}

/// One of the 64 tiles of the board.
///
/// Coordinates are indexed from `0` (a1) to `63` (h8), rank by rank. All
/// 64 values exist once in a static table that is never modified, see
/// [`Coordinate::all()`].
///
/// # Examples
///
/// ```
/// use chess_rules::{Column, Coordinate, Rank};
///
/// let e4: Coordinate = "e4".parse()?;
/// assert_eq!(e4, Coordinate::E4);
/// assert_eq!(e4.column(), Column::E);
/// assert_eq!(e4.rank(), Rank::Fourth);
/// assert_eq!(e4.to_string(), "e4");
///
/// assert_eq!(e4.relative(1, 2), Some(Coordinate::F6));
/// assert_eq!(Coordinate::H4.relative(1, 0), None);
/// # Ok::<_, chess_rules::InvalidCoordinateError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Coordinate(u8);

static COORDINATES: [Coordinate; 64] = {
    let mut all = [Coordinate(0); 64];
    let mut index = 0;
    while index < 64 {
        all[index] = Coordinate(index as u8);
        index += 1;
    }
    all
};

impl Coordinate {
    /// Gets the coordinate with the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is not in the range `0..=63`.
    #[track_caller]
    #[inline]
    pub const fn new(index: u32) -> Coordinate {
        assert!(index < 64, "coordinate index out of range");
        Coordinate(index as u8)
    }

    /// Gets the shared coordinate with the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is not in the range `0..=63`.
    #[track_caller]
    #[inline]
    pub fn from_index(index: usize) -> Coordinate {
        COORDINATES[index]
    }

    #[inline]
    pub const fn from_coords(column: Column, rank: Rank) -> Coordinate {
        Coordinate(column as u8 | (rank as u8) << 3)
    }

    /// Parses a coordinate in algebraic notation, like `b"e4"`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinateError`] if the input is not a lowercase
    /// column letter `a` to `h` followed by a rank digit `1` to `8`.
    pub fn from_ascii(s: &[u8]) -> Result<Coordinate, InvalidCoordinateError> {
        match *s {
            [column, rank] => Column::from_char(char::from(column))
                .zip(Rank::from_char(char::from(rank)))
                .map(|(column, rank)| Coordinate::from_coords(column, rank))
                .ok_or(InvalidCoordinateError),
            _ => Err(InvalidCoordinateError),
        }
    }

    /// Parses a coordinate in algebraic notation, like `"e4"`.
    ///
    /// # Errors
    ///
    /// See [`Coordinate::from_ascii()`].
    pub fn from_algebraic(s: &str) -> Result<Coordinate, InvalidCoordinateError> {
        Coordinate::from_ascii(s.as_bytes())
    }

    /// All 64 coordinates, ordered by index.
    #[inline]
    pub fn all() -> &'static [Coordinate; 64] {
        &COORDINATES
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn column(self) -> Column {
        Column::new((self.0 & 7) as u32)
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::new((self.0 >> 3) as u32)
    }

    /// Gets the coordinate `dx` columns to the right and `dy` ranks up,
    /// or `None` if that leaves the board.
    ///
    /// Moving past the h-column never wraps around to the a-column of
    /// another rank, and vice versa.
    #[inline]
    pub fn relative(self, dx: i32, dy: i32) -> Option<Coordinate> {
        Some(Coordinate::from_coords(
            self.column().offset(dx)?,
            self.rank().offset(dy)?,
        ))
    }

    #[inline]
    pub const fn color(self) -> TileColor {
        if (self.column() as u8 + self.rank() as u8) % 2 == 0 {
            TileColor::Dark
        } else {
            TileColor::Light
        }
    }

    #[inline]
    pub const fn same_column_as(self, other: Coordinate) -> bool {
        self.0 & 7 == other.0 & 7
    }

    #[inline]
    pub const fn same_rank_as(self, other: Coordinate) -> bool {
        self.0 >> 3 == other.0 >> 3
    }

    #[inline]
    pub const fn same_color_as(self, other: Coordinate) -> bool {
        matches!(
            (self.color(), other.color()),
            (TileColor::Light, TileColor::Light) | (TileColor::Dark, TileColor::Dark)
        )
    }

    pub const A1: Coordinate = Coordinate(0);
    pub const B1: Coordinate = Coordinate(1);
    pub const C1: Coordinate = Coordinate(2);
    pub const D1: Coordinate = Coordinate(3);
    pub const E1: Coordinate = Coordinate(4);
    pub const F1: Coordinate = Coordinate(5);
    pub const G1: Coordinate = Coordinate(6);
    pub const H1: Coordinate = Coordinate(7);
    pub const A2: Coordinate = Coordinate(8);
    pub const B2: Coordinate = Coordinate(9);
    pub const C2: Coordinate = Coordinate(10);
    pub const D2: Coordinate = Coordinate(11);
    pub const E2: Coordinate = Coordinate(12);
    pub const F2: Coordinate = Coordinate(13);
    pub const G2: Coordinate = Coordinate(14);
    pub const H2: Coordinate = Coordinate(15);
    pub const A3: Coordinate = Coordinate(16);
    pub const B3: Coordinate = Coordinate(17);
    pub const C3: Coordinate = Coordinate(18);
    pub const D3: Coordinate = Coordinate(19);
    pub const E3: Coordinate = Coordinate(20);
    pub const F3: Coordinate = Coordinate(21);
    pub const G3: Coordinate = Coordinate(22);
    pub const H3: Coordinate = Coordinate(23);
    pub const A4: Coordinate = Coordinate(24);
    pub const B4: Coordinate = Coordinate(25);
    pub const C4: Coordinate = Coordinate(26);
    pub const D4: Coordinate = Coordinate(27);
    pub const E4: Coordinate = Coordinate(28);
    pub const F4: Coordinate = Coordinate(29);
    pub const G4: Coordinate = Coordinate(30);
    pub const H4: Coordinate = Coordinate(31);
    pub const A5: Coordinate = Coordinate(32);
    pub const B5: Coordinate = Coordinate(33);
    pub const C5: Coordinate = Coordinate(34);
    pub const D5: Coordinate = Coordinate(35);
    pub const E5: Coordinate = Coordinate(36);
    pub const F5: Coordinate = Coordinate(37);
    pub const G5: Coordinate = Coordinate(38);
    pub const H5: Coordinate = Coordinate(39);
    pub const A6: Coordinate = Coordinate(40);
    pub const B6: Coordinate = Coordinate(41);
    pub const C6: Coordinate = Coordinate(42);
    pub const D6: Coordinate = Coordinate(43);
    pub const E6: Coordinate = Coordinate(44);
    pub const F6: Coordinate = Coordinate(45);
    pub const G6: Coordinate = Coordinate(46);
    pub const H6: Coordinate = Coordinate(47);
    pub const A7: Coordinate = Coordinate(48);
    pub const B7: Coordinate = Coordinate(49);
    pub const C7: Coordinate = Coordinate(50);
    pub const D7: Coordinate = Coordinate(51);
    pub const E7: Coordinate = Coordinate(52);
    pub const F7: Coordinate = Coordinate(53);
    pub const G7: Coordinate = Coordinate(54);
    pub const H7: Coordinate = Coordinate(55);
    pub const A8: Coordinate = Coordinate(56);
    pub const B8: Coordinate = Coordinate(57);
    pub const C8: Coordinate = Coordinate(58);
    pub const D8: Coordinate = Coordinate(59);
    pub const E8: Coordinate = Coordinate(60);
    pub const F8: Coordinate = Coordinate(61);
    pub const G8: Coordinate = Coordinate(62);
    pub const H8: Coordinate = Coordinate(63);
}

try_from_int_impl! { Coordinate, 0, 64, u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

impl From<(Column, Rank)> for Coordinate {
    #[inline]
    fn from((column, rank): (Column, Rank)) -> Coordinate {
        Coordinate::from_coords(column, rank)
    }
}

impl FromStr for Coordinate {
    type Err = InvalidCoordinateError;

    fn from_str(s: &str) -> Result<Coordinate, InvalidCoordinateError> {
        Coordinate::from_algebraic(s)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column().char(), self.rank().char())
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.column().char().to_ascii_uppercase(),
            self.rank().char()
        )
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Coordinate {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Coordinate> {
        Ok(Coordinate::new(u.int_in_range(0..=63)?))
    }

    fn size_hint(_depth: usize) -> (usize, Option<usize>) {
        (1, Some(1))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Coordinate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = arrayvec::ArrayString::<2>::new();
        s.push(self.column().char());
        s.push(self.rank().char());
        serializer.serialize_str(&s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Coordinate {
    fn deserialize<D>(deserializer: D) -> Result<Coordinate, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct CoordinateVisitor;

        impl serde::de::Visitor<'_> for CoordinateVisitor {
            type Value = Coordinate;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("algebraic coordinate")
            }

            fn visit_str<E>(self, value: &str) -> Result<Coordinate, E>
            where
                E: serde::de::Error,
            {
                Coordinate::from_algebraic(value).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(CoordinateVisitor)
    }
}
