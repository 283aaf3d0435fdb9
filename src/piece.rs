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

use tracing::debug;

use crate::{
    board::Layout,
    coordinate::Coordinate,
    coordinate_set::CoordinateSet,
    m::{Move, MoveList},
    movement::{
        Movement, BISHOP_VECTORS, BLACK_PAWN_FIRST_OFFSETS, BLACK_PAWN_OFFSETS, KING_OFFSETS,
        KNIGHT_OFFSETS, QUEEN_VECTORS, ROOK_VECTORS, WHITE_PAWN_FIRST_OFFSETS, WHITE_PAWN_OFFSETS,
    },
    side::Side,
};

/// Piece types: `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`.
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Gets the piece type from its English letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use chess_rules::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('K'), Some(PieceKind::King));
    /// assert_eq!(PieceKind::from_char('n'), Some(PieceKind::Knight));
    ///
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    pub const fn from_char(ch: char) -> Option<PieceKind> {
        match ch {
            'P' | 'p' => Some(PieceKind::Pawn),
            'N' | 'n' => Some(PieceKind::Knight),
            'B' | 'b' => Some(PieceKind::Bishop),
            'R' | 'r' => Some(PieceKind::Rook),
            'Q' | 'q' => Some(PieceKind::Queen),
            'K' | 'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub const fn char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub const fn upper_char(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Letter used in move notation. Pawns have none.
    ///
    /// ```
    /// use chess_rules::PieceKind;
    ///
    /// assert_eq!(PieceKind::Knight.notation(), "N");
    /// assert_eq!(PieceKind::Pawn.notation(), "");
    /// ```
    pub const fn notation(self) -> &'static str {
        match self {
            PieceKind::Pawn => "",
            PieceKind::Knight => "N",
            PieceKind::Bishop => "B",
            PieceKind::Rook => "R",
            PieceKind::Queen => "Q",
            PieceKind::King => "K",
        }
    }

    /// Creates a piece of this kind that has not moved yet.
    #[inline]
    pub const fn of(self, side: Side, position: Coordinate) -> Piece {
        Piece::new(self, side, position)
    }

    #[inline]
    pub const fn is_sliding(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Kinds a pawn may promote to, in the order promotion moves are
    /// generated.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, and `King`, in this order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];
}

/// A piece on a tile.
///
/// Pieces are values. Moving one produces a new piece at the destination,
/// see [`Piece::moved_to()`].
///
/// ```
/// use chess_rules::{Coordinate, PieceKind, Side};
///
/// let knight = PieceKind::Knight.of(Side::White, Coordinate::G1);
/// assert!(knight.is_first_move());
///
/// let moved = knight.moved_to(Coordinate::F3);
/// assert_eq!(moved.position(), Coordinate::F3);
/// assert!(!moved.is_first_move());
/// assert_eq!(knight.position(), Coordinate::G1);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    kind: PieceKind,
    side: Side,
    position: Coordinate,
    first_move: bool,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, side: Side, position: Coordinate) -> Piece {
        Piece {
            kind,
            side,
            position,
            first_move: true,
        }
    }

    /// Same piece with an explicit first-move flag, for setting up
    /// positions where a piece has already moved.
    #[must_use]
    #[inline]
    pub const fn with_first_move(self, first_move: bool) -> Piece {
        Piece { first_move, ..self }
    }

    #[inline]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn side(self) -> Side {
        self.side
    }

    #[inline]
    pub const fn position(self) -> Coordinate {
        self.position
    }

    /// Whether this piece has never moved.
    #[inline]
    pub const fn is_first_move(self) -> bool {
        self.first_move
    }

    #[inline]
    pub fn is_enemy_of(self, other: Piece) -> bool {
        self.side != other.side
    }

    #[inline]
    pub fn is(self, kind: PieceKind) -> bool {
        self.kind == kind
    }

    /// The piece after moving to `to`.
    #[must_use]
    #[inline]
    pub const fn moved_to(self, to: Coordinate) -> Piece {
        Piece {
            position: to,
            first_move: false,
            ..self
        }
    }

    #[must_use]
    #[inline]
    pub const fn promoted(self, kind: PieceKind) -> Piece {
        Piece { kind, ..self }
    }

    /// Uppercase letter for White, lowercase for Black.
    pub fn char(self) -> char {
        self.side
            .fold(self.kind.upper_char(), self.kind.char())
    }

    pub fn movement(self) -> Movement {
        match self.kind {
            PieceKind::Pawn => {
                let offsets: &'static [(i32, i32)] = match (self.side, self.first_move) {
                    (Side::White, true) => &WHITE_PAWN_FIRST_OFFSETS,
                    (Side::White, false) => &WHITE_PAWN_OFFSETS,
                    (Side::Black, true) => &BLACK_PAWN_FIRST_OFFSETS,
                    (Side::Black, false) => &BLACK_PAWN_OFFSETS,
                };
                Movement::Jumping(offsets)
            }
            PieceKind::Knight => Movement::Jumping(&KNIGHT_OFFSETS),
            PieceKind::Bishop => Movement::Sliding(&BISHOP_VECTORS),
            PieceKind::Rook => Movement::Sliding(&ROOK_VECTORS),
            PieceKind::Queen => Movement::Sliding(&QUEEN_VECTORS),
            PieceKind::King => Movement::Jumping(&KING_OFFSETS),
        }
    }

    /// Appends the moves of this piece to `moves`, without castles and
    /// without checking whether the own king is left attacked.
    pub(crate) fn push_moves(self, layout: &Layout, moves: &mut MoveList) {
        if self.kind == PieceKind::Pawn {
            self.push_pawn_moves(layout, moves);
            return;
        }

        for to in self.movement().destinations(self.position, self.side, layout) {
            match layout.piece_at(to) {
                None => moves.push(Move::Simple {
                    piece: self,
                    to,
                    promotion: None,
                }),
                Some(target) if target.is_enemy_of(self) && !target.is(PieceKind::King) => {
                    moves.push(Move::Capture {
                        piece: self,
                        to,
                        captured: target,
                        promotion: None,
                    })
                }
                Some(_) => (),
            }
        }
    }

    fn push_pawn_moves(self, layout: &Layout, moves: &mut MoveList) {
        let forward = self.side.forward();
        let promotes = |to: Coordinate| to.rank() == self.side.promotion_rank();

        for to in self.movement().destinations(self.position, self.side, layout) {
            let dx = to.column() as i32 - self.position.column() as i32;
            let dy = to.rank() as i32 - self.position.rank() as i32;

            if dx == 0 && dy == forward {
                if layout.is_empty(to) {
                    push_promotable(moves, promotes(to), |promotion| Move::Simple {
                        piece: self,
                        to,
                        promotion,
                    });
                }
            } else if dx == 0 {
                let passed_empty = self
                    .position
                    .relative(0, forward)
                    .is_some_and(|passed| layout.is_empty(passed));
                if self.first_move && passed_empty && layout.is_empty(to) {
                    moves.push(Move::DoubleStep { pawn: self, to });
                }
            } else {
                match layout.piece_at(to) {
                    Some(target) if target.is_enemy_of(self) && !target.is(PieceKind::King) => {
                        push_promotable(moves, promotes(to), |promotion| Move::Capture {
                            piece: self,
                            to,
                            captured: target,
                            promotion,
                        });
                    }
                    Some(_) => (),
                    None => {
                        // The vulnerable pawn stands beside this one, not on
                        // the destination.
                        let beside = self.position.relative(dx, 0);
                        if let Some(vulnerable) = layout.en_passant() {
                            if Some(vulnerable.position()) == beside && vulnerable.is_enemy_of(self) {
                                debug!(pawn = %self.position, %to, captured = %vulnerable.position(), "en passant available");
                                moves.push(Move::EnPassant {
                                    pawn: self,
                                    to,
                                    captured: vulnerable,
                                });
                            }
                        }
                    }
                }
            }
        }
    }

    /// Tiles this piece attacks: its reach for pieces, the two forward
    /// diagonals for pawns.
    pub(crate) fn attacks(self, layout: &Layout) -> CoordinateSet {
        match self.kind {
            PieceKind::Pawn => {
                let forward = self.side.forward();
                [-1, 1]
                    .into_iter()
                    .filter_map(|dx| self.position.relative(dx, forward))
                    .collect()
            }
            _ => self.movement().reach(self.position, layout),
        }
    }
}

fn push_promotable<F>(moves: &mut MoveList, promotes: bool, make: F)
where
    F: Fn(Option<PieceKind>) -> Move,
{
    if promotes {
        moves.extend(PieceKind::PROMOTIONS.into_iter().map(|kind| make(Some(kind))));
    } else {
        moves.push(make(None));
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.notation(), self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves_of(layout: &Layout, piece: Piece) -> MoveList {
        let mut moves = MoveList::new();
        piece.push_moves(layout, &mut moves);
        moves
    }

    #[test]
    fn test_char() {
        assert_eq!(PieceKind::Queen.of(Side::White, Coordinate::D1).char(), 'Q');
        assert_eq!(PieceKind::Pawn.of(Side::Black, Coordinate::D7).char(), 'p');
    }

    #[test]
    fn test_pawn_first_move() {
        let layout = Layout::standard();
        let pawn = PieceKind::Pawn.of(Side::White, Coordinate::E2);
        let moves = moves_of(&layout, pawn);
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&Move::Simple {
            piece: pawn,
            to: Coordinate::E3,
            promotion: None
        }));
        assert!(moves.contains(&Move::DoubleStep {
            pawn,
            to: Coordinate::E4
        }));
    }

    #[test]
    fn test_pawn_double_step_blocked() {
        let mut layout = Layout::empty(Side::White);
        let pawn = PieceKind::Pawn.of(Side::White, Coordinate::E2);
        layout.set(pawn);
        layout.set(PieceKind::Knight.of(Side::Black, Coordinate::E3));
        assert!(moves_of(&layout, pawn).is_empty());

        let mut layout = Layout::empty(Side::White);
        layout.set(pawn);
        layout.set(PieceKind::Knight.of(Side::Black, Coordinate::E4));
        assert_eq!(moves_of(&layout, pawn).len(), 1);
    }

    #[test]
    fn test_pawn_after_first_move() {
        let layout = Layout::empty(Side::Black);
        let pawn = PieceKind::Pawn
            .of(Side::Black, Coordinate::D6)
            .with_first_move(false);
        let moves = moves_of(&layout, pawn);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to(), Some(Coordinate::D5));
    }

    #[test]
    fn test_pawn_captures() {
        let mut layout = Layout::empty(Side::White);
        let pawn = PieceKind::Pawn.of(Side::White, Coordinate::D4).with_first_move(false);
        layout.set(pawn);
        layout.set(PieceKind::Knight.of(Side::Black, Coordinate::E5));
        layout.set(PieceKind::King.of(Side::Black, Coordinate::C5));
        let moves = moves_of(&layout, pawn);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().any(|m| m.is_capture() && m.to() == Some(Coordinate::E5)));
        assert!(!moves.iter().any(|m| m.to() == Some(Coordinate::C5)));
    }

    #[test]
    fn test_promotions() {
        let mut layout = Layout::empty(Side::White);
        let pawn = PieceKind::Pawn.of(Side::White, Coordinate::B7).with_first_move(false);
        layout.set(pawn);
        layout.set(PieceKind::Rook.of(Side::Black, Coordinate::A8));
        let moves = moves_of(&layout, pawn);
        assert_eq!(moves.len(), 8);
        let promotions: Vec<_> = moves
            .iter()
            .filter(|m| m.to() == Some(Coordinate::B8))
            .filter_map(|m| m.promotion())
            .collect();
        assert_eq!(promotions, PieceKind::PROMOTIONS);
    }

    #[test]
    fn test_own_piece_excluded() {
        let layout = Layout::standard();
        let knight = PieceKind::Knight.of(Side::White, Coordinate::G1);
        let moves = moves_of(&layout, knight);
        let mut targets: Vec<_> = moves.iter().filter_map(|m| m.to()).collect();
        targets.sort();
        assert_eq!(targets, [Coordinate::F3, Coordinate::H3]);
    }

    #[test]
    fn test_pawn_attacks() {
        let layout = Layout::empty(Side::White);
        let pawn = PieceKind::Pawn.of(Side::White, Coordinate::A2);
        let attacks = pawn.attacks(&layout);
        assert_eq!(attacks.count(), 1);
        assert!(attacks.contains(Coordinate::B3));
        assert!(!attacks.contains(Coordinate::A3));
    }
}
