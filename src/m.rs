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

use core::{
    fmt::{self, Display, Write as _},
    str::FromStr,
};
use std::error::Error;

use arrayvec::ArrayVec;

use crate::{
    board::{build_next, Board, Layout},
    castling_side::CastlingSide,
    coordinate::Coordinate,
    piece::{Piece, PieceKind},
};

/// Information about a move.
///
/// Every variant carries the pieces it involves, as they stand before the
/// move. Equality is structural.
///
/// # Display
///
/// `Move` implements [`Display`] using long algebraic notation.
///
/// ```
/// use chess_rules::{Board, Coordinate, Move};
///
/// let board = Board::standard();
/// let m = Move::resolve(&board, Coordinate::G1, Coordinate::F3).expect("legal");
/// assert_eq!(m.to_string(), "Ng1-f3");
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Move {
    /// A move to an empty tile, e.g., `Ng1-f3`.
    Simple {
        piece: Piece,
        to: Coordinate,
        promotion: Option<PieceKind>,
    },
    /// A capture on the destination tile, e.g., `Bd3xh7`.
    Capture {
        piece: Piece,
        to: Coordinate,
        captured: Piece,
        promotion: Option<PieceKind>,
    },
    /// A pawn advancing two ranks from its starting tile, e.g., `e2-e4`.
    DoubleStep { pawn: Piece, to: Coordinate },
    /// An en passant capture, e.g., `e5xd6`. The captured pawn stands
    /// beside the moving pawn, not on `to`.
    EnPassant {
        pawn: Piece,
        to: Coordinate,
        captured: Piece,
    },
    /// A castling move, `O-O` or `O-O-O`.
    Castle {
        side: CastlingSide,
        king: Piece,
        rook: Piece,
    },
    /// The sentinel "no move".
    Null,
}

/// Tag of a [`Move`] variant.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MoveKind {
    Simple,
    Capture,
    DoubleStep,
    EnPassant,
    KingSideCastle,
    QueenSideCastle,
    Null,
}

impl Move {
    /// Gets the moving piece, the king for castles, or `None` for the null
    /// move.
    pub const fn piece(self) -> Option<Piece> {
        match self {
            Move::Simple { piece, .. } | Move::Capture { piece, .. } => Some(piece),
            Move::DoubleStep { pawn, .. } | Move::EnPassant { pawn, .. } => Some(pawn),
            Move::Castle { king, .. } => Some(king),
            Move::Null => None,
        }
    }

    pub const fn from(self) -> Option<Coordinate> {
        match self.piece() {
            Some(piece) => Some(piece.position()),
            None => None,
        }
    }

    /// Gets the destination. For castles this is the destination of the
    /// king.
    pub const fn to(self) -> Option<Coordinate> {
        match self {
            Move::Simple { to, .. }
            | Move::Capture { to, .. }
            | Move::DoubleStep { to, .. }
            | Move::EnPassant { to, .. } => Some(to),
            Move::Castle { side, king, .. } => Some(side.king_to(king.side())),
            Move::Null => None,
        }
    }

    pub const fn captured(self) -> Option<Piece> {
        match self {
            Move::Capture { captured, .. } | Move::EnPassant { captured, .. } => Some(captured),
            _ => None,
        }
    }

    pub const fn promotion(self) -> Option<PieceKind> {
        match self {
            Move::Simple { promotion, .. } | Move::Capture { promotion, .. } => promotion,
            _ => None,
        }
    }

    pub const fn castling_side(self) -> Option<CastlingSide> {
        match self {
            Move::Castle { side, .. } => Some(side),
            _ => None,
        }
    }

    /// The rook of a castling move and its destination.
    pub const fn castling_rook(self) -> Option<(Piece, Coordinate)> {
        match self {
            Move::Castle { side, rook, .. } => Some((rook, side.rook_to(rook.side()))),
            _ => None,
        }
    }

    pub const fn kind(self) -> MoveKind {
        match self {
            Move::Simple { .. } => MoveKind::Simple,
            Move::Capture { .. } => MoveKind::Capture,
            Move::DoubleStep { .. } => MoveKind::DoubleStep,
            Move::EnPassant { .. } => MoveKind::EnPassant,
            Move::Castle {
                side: CastlingSide::KingSide,
                ..
            } => MoveKind::KingSideCastle,
            Move::Castle {
                side: CastlingSide::QueenSide,
                ..
            } => MoveKind::QueenSideCastle,
            Move::Null => MoveKind::Null,
        }
    }

    pub const fn is_capture(self) -> bool {
        matches!(self, Move::Capture { .. } | Move::EnPassant { .. })
    }

    pub const fn is_en_passant(self) -> bool {
        matches!(self, Move::EnPassant { .. })
    }

    pub const fn is_castle(self) -> bool {
        matches!(self, Move::Castle { .. })
    }

    pub const fn is_promotion(self) -> bool {
        matches!(
            self,
            Move::Simple {
                promotion: Some(_),
                ..
            } | Move::Capture {
                promotion: Some(_),
                ..
            }
        )
    }

    pub const fn is_null(self) -> bool {
        matches!(self, Move::Null)
    }

    /// Looks up the legal move of the side to move that goes from `from` to
    /// `to`.
    ///
    /// For a promotion the queen promotion is returned. Use
    /// [`MoveRequest`] to select another piece kind.
    pub fn resolve(board: &Board, from: Coordinate, to: Coordinate) -> Option<Move> {
        board
            .legal_moves()
            .iter()
            .copied()
            .find(|m| m.from() == Some(from) && m.to() == Some(to))
    }

    /// Builds the board after this move.
    ///
    /// Execution never fails. It does not check that the move is legal on
    /// `board`; use [`Player::attempt()`](crate::Player::attempt) for that.
    pub fn execute(&self, board: &Board) -> Board {
        self.successor(board.layout())
    }

    pub(crate) fn successor(&self, layout: &Layout) -> Board {
        let next_turn = !self.piece().map_or(layout.turn(), Piece::side);

        match *self {
            Move::Simple {
                piece,
                to,
                promotion,
            } => build_next(
                layout,
                &[piece],
                &[landed(piece, to, promotion)],
                next_turn,
                None,
            ),
            Move::Capture {
                piece,
                to,
                captured,
                promotion,
            } => build_next(
                layout,
                &[piece, captured],
                &[landed(piece, to, promotion)],
                next_turn,
                None,
            ),
            Move::DoubleStep { pawn, to } => {
                let moved = pawn.moved_to(to);
                build_next(layout, &[pawn], &[moved], next_turn, Some(moved))
            }
            Move::EnPassant { pawn, to, captured } => build_next(
                layout,
                &[pawn, captured],
                &[pawn.moved_to(to)],
                next_turn,
                None,
            ),
            Move::Castle { side, king, rook } => build_next(
                layout,
                &[king, rook],
                &[
                    king.moved_to(side.king_to(king.side())),
                    rook.moved_to(side.rook_to(rook.side())),
                ],
                next_turn,
                None,
            ),
            Move::Null => build_next(layout, &[], &[], next_turn, None),
        }
    }
}

fn landed(piece: Piece, to: Coordinate, promotion: Option<PieceKind>) -> Piece {
    let moved = piece.moved_to(to);
    match promotion {
        Some(kind) => moved.promoted(kind),
        None => moved,
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Simple {
                piece,
                to,
                promotion,
            } => {
                write!(f, "{}-{}", piece, to)?;
                if let Some(p) = promotion {
                    write!(f, "={}", p.upper_char())?;
                }
                Ok(())
            }
            Move::Capture {
                piece,
                to,
                promotion,
                ..
            } => {
                write!(f, "{}x{}", piece, to)?;
                if let Some(p) = promotion {
                    write!(f, "={}", p.upper_char())?;
                }
                Ok(())
            }
            Move::DoubleStep { pawn, to } => write!(f, "{}-{}", pawn.position(), to),
            Move::EnPassant { pawn, to, .. } => write!(f, "{}x{}", pawn.position(), to),
            Move::Castle { side, .. } => f.write_str(side.notation()),
            Move::Null => f.write_str("--"),
        }
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// There is enough space to hold the moves of both sides, before filtering
/// for legality, in any position with at most 16 pieces per side.
///
/// # Example
///
/// ```
/// use chess_rules::{Board, PieceKind};
///
/// let board = Board::standard();
/// let mut moves = board.legal_moves().clone();
/// moves.retain(|m| m.piece().is_some_and(|p| p.is(PieceKind::Pawn)));
/// assert_eq!(moves.len(), 16);
/// ```
pub type MoveList = ArrayVec<Move, 512>;

/// Error when parsing an invalid [`MoveRequest`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseMoveRequestError;

impl Display for ParseMoveRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid move request")
    }
}

impl Error for ParseMoveRequestError {}

/// A requested move given by source and destination, like `e2e4`, with an
/// optional promotion, like `e7e8q`.
///
/// A request is not tied to a board. It is resolved against the legal moves
/// of the side to move.
///
/// # Examples
///
/// ```
/// use chess_rules::{Board, Coordinate, MoveRequest};
///
/// let request: MoveRequest = "e2e4".parse()?;
/// assert_eq!(request.from, Coordinate::E2);
/// assert_eq!(request.to, Coordinate::E4);
/// assert_eq!(request.promotion, None);
///
/// let board = Board::standard();
/// let m = request.resolve(&board).expect("legal");
/// assert!(m.piece().is_some_and(|p| p.position() == Coordinate::E2));
/// # Ok::<_, chess_rules::ParseMoveRequestError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct MoveRequest {
    pub from: Coordinate,
    pub to: Coordinate,
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    pub const fn new(from: Coordinate, to: Coordinate) -> MoveRequest {
        MoveRequest {
            from,
            to,
            promotion: None,
        }
    }

    /// Parses a request like `e2e4` or `e7e8q`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseMoveRequestError`] if either coordinate is invalid or
    /// the promotion is not one of `q`, `r`, `b`, `n`.
    pub fn from_ascii(s: &[u8]) -> Result<MoveRequest, ParseMoveRequestError> {
        let (from, to, promotion) = match s {
            [a, b, c, d] => ([*a, *b], [*c, *d], None),
            [a, b, c, d, p] => ([*a, *b], [*c, *d], Some(*p)),
            _ => return Err(ParseMoveRequestError),
        };

        let promotion = match promotion {
            Some(ch) => Some(
                PieceKind::PROMOTIONS
                    .into_iter()
                    .find(|kind| kind.char() == char::from(ch))
                    .ok_or(ParseMoveRequestError)?,
            ),
            None => None,
        };

        Ok(MoveRequest {
            from: Coordinate::from_ascii(&from).map_err(|_| ParseMoveRequestError)?,
            to: Coordinate::from_ascii(&to).map_err(|_| ParseMoveRequestError)?,
            promotion,
        })
    }

    /// The request that plays `m`, or `None` for the null move.
    pub fn from_move(m: Move) -> Option<MoveRequest> {
        Some(MoveRequest {
            from: m.from()?,
            to: m.to()?,
            promotion: m.promotion(),
        })
    }

    /// Finds the matching legal move of the side to move on `board`.
    ///
    /// Without an explicit promotion, a promoting request selects the queen.
    pub fn resolve(&self, board: &Board) -> Option<Move> {
        board.legal_moves().iter().copied().find(|m| {
            m.from() == Some(self.from)
                && m.to() == Some(self.to)
                && (self.promotion.is_none() || m.promotion() == self.promotion)
        })
    }
}

impl FromStr for MoveRequest {
    type Err = ParseMoveRequestError;

    fn from_str(s: &str) -> Result<MoveRequest, ParseMoveRequestError> {
        MoveRequest::from_ascii(s.as_bytes())
    }
}

impl Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            f.write_char(promotion.char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use core::mem;

    use super::*;
    use crate::side::Side;

    #[test]
    fn test_move_size() {
        assert!(mem::size_of::<Move>() <= 12);
    }

    #[test]
    fn test_parse_request() {
        assert_eq!(
            "e7e8q".parse::<MoveRequest>(),
            Ok(MoveRequest {
                from: Coordinate::E7,
                to: Coordinate::E8,
                promotion: Some(PieceKind::Queen),
            })
        );
        assert_eq!("g1f3".parse::<MoveRequest>().map(|r| r.to_string()).as_deref(), Ok("g1f3"));
        for invalid in ["", "e2", "e2e", "e2e4e5", "e7e8k", "e7e8p", "e7e8Q", "i2e4", "e2e9"] {
            assert_eq!(invalid.parse::<MoveRequest>(), Err(ParseMoveRequestError), "{invalid}");
        }
    }

    #[test]
    fn test_display() {
        let pawn = PieceKind::Pawn.of(Side::White, Coordinate::E7).with_first_move(false);
        let rook = PieceKind::Rook.of(Side::Black, Coordinate::D8);
        assert_eq!(
            Move::Capture {
                piece: pawn,
                to: Coordinate::D8,
                captured: rook,
                promotion: Some(PieceKind::Knight),
            }
            .to_string(),
            "e7xd8=N"
        );
        let king = PieceKind::King.of(Side::Black, Coordinate::E8);
        let rook = PieceKind::Rook.of(Side::Black, Coordinate::A8);
        let castle = Move::Castle {
            side: CastlingSide::QueenSide,
            king,
            rook,
        };
        assert_eq!(castle.to_string(), "O-O-O");
        assert_eq!(castle.to(), Some(Coordinate::C8));
        assert_eq!(castle.castling_rook(), Some((rook, Coordinate::D8)));
        assert_eq!(castle.kind(), MoveKind::QueenSideCastle);
        assert_eq!(Move::Null.to_string(), "--");
    }

    #[test]
    fn test_execute_double_step() {
        let board = Board::standard();
        let m = Move::resolve(&board, Coordinate::E2, Coordinate::E4).expect("legal");
        assert_eq!(m.kind(), MoveKind::DoubleStep);
        let after = m.execute(&board);
        assert_eq!(after.turn(), Side::Black);
        assert!(after.is_empty(Coordinate::E2));
        let pawn = after.piece_at(Coordinate::E4).expect("moved pawn");
        assert!(!pawn.is_first_move());
        assert_eq!(after.en_passant_pawn(), Some(pawn));
        // The original board is untouched.
        assert!(board.piece_at(Coordinate::E2).is_some());
        assert_eq!(board.en_passant_pawn(), None);
    }

    #[test]
    fn test_execute_null() {
        let board = Board::standard();
        let after = Move::Null.execute(&board);
        assert_eq!(after.turn(), Side::Black);
        assert_eq!(after.active_pieces(Side::White).count(), 16);
    }
}
