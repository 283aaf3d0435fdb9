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
    fmt::{self, Write as _},
    hash::{Hash, Hasher},
};
use std::{error::Error, sync::Arc};

use bitflags::bitflags;
use tracing::trace;

use crate::{
    coordinate::{Column, Coordinate, Rank},
    coordinate_set::CoordinateSet,
    m::{Move, MoveList, MoveRequest},
    piece::{Piece, PieceKind},
    player::{Outcome, Player},
    side::{BySide, Side},
    transition::MoveTransition,
};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece placement, side to move and the pawn vulnerable to en passant.
///
/// This is the raw data of a [`Board`], without the derived players.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct Layout {
    tiles: [Option<Piece>; 64],
    turn: Side,
    en_passant: Option<Piece>,
}

impl Layout {
    pub(crate) const fn empty(turn: Side) -> Layout {
        Layout {
            tiles: [None; 64],
            turn,
            en_passant: None,
        }
    }

    pub(crate) fn standard() -> Layout {
        let mut layout = Layout::empty(Side::White);
        for side in Side::ALL {
            for (column, kind) in Column::ALL.into_iter().zip(BACK_RANK) {
                layout.set(kind.of(side, Coordinate::from_coords(column, side.backrank())));
                layout.set(PieceKind::Pawn.of(side, Coordinate::from_coords(column, side.pawn_rank())));
            }
        }
        layout
    }

    #[inline]
    pub(crate) fn turn(&self) -> Side {
        self.turn
    }

    #[inline]
    pub(crate) fn en_passant(&self) -> Option<Piece> {
        self.en_passant
    }

    #[inline]
    pub(crate) fn piece_at(&self, coordinate: Coordinate) -> Option<Piece> {
        self.tiles[coordinate.index()]
    }

    #[inline]
    pub(crate) fn is_empty(&self, coordinate: Coordinate) -> bool {
        self.tiles[coordinate.index()].is_none()
    }

    /// Places `piece` on its position, replacing whatever was there.
    pub(crate) fn set(&mut self, piece: Piece) {
        self.tiles[piece.position().index()] = Some(piece);
    }

    /// Removes `piece` if it is exactly what stands on its position.
    pub(crate) fn remove(&mut self, piece: Piece) -> bool {
        let tile = &mut self.tiles[piece.position().index()];
        if *tile == Some(piece) {
            *tile = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.tiles.iter().flatten().copied()
    }

    pub(crate) fn active_pieces(&self, side: Side) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |piece| piece.side() == side)
    }

    pub(crate) fn king(&self, side: Side) -> Option<Piece> {
        self.active_pieces(side).find(|piece| piece.is(PieceKind::King))
    }

    /// Moves of every piece of `side`, without castles and without checking
    /// whether they leave the own king attacked.
    pub(crate) fn candidate_moves(&self, side: Side) -> MoveList {
        let mut moves = MoveList::new();
        for piece in self.active_pieces(side) {
            piece.push_moves(self, &mut moves);
        }
        moves
    }

    /// Tiles attacked by any piece of `side`.
    pub(crate) fn reach(&self, side: Side) -> CoordinateSet {
        self.active_pieces(side)
            .fold(CoordinateSet::EMPTY, |reach, piece| reach | piece.attacks(self))
    }
}

/// Derives the board that follows `previous`: every piece in `removals` is
/// taken off, every piece in `additions` is placed, and the side to move and
/// en passant pawn are replaced.
pub(crate) fn build_next(
    previous: &Layout,
    removals: &[Piece],
    additions: &[Piece],
    turn: Side,
    en_passant: Option<Piece>,
) -> Board {
    let mut layout = Layout {
        tiles: previous.tiles,
        turn,
        en_passant,
    };
    for &piece in removals {
        layout.remove(piece);
    }
    for &piece in additions {
        layout.set(piece);
    }
    trace!(
        %turn,
        en_passant = ?en_passant.map(Piece::position),
        "derived board"
    );
    Board::from_layout(layout)
}

/// A tile and its occupant.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Tile {
    coordinate: Coordinate,
    piece: Option<Piece>,
}

impl Tile {
    #[inline]
    pub fn coordinate(self) -> Coordinate {
        self.coordinate
    }

    #[inline]
    pub fn piece(self) -> Option<Piece> {
        self.piece
    }

    #[inline]
    pub fn is_occupied(self) -> bool {
        self.piece.is_some()
    }
}

/// An immutable snapshot of a game: piece placement, side to move, the
/// pawn that may be captured en passant, and both players computed for
/// exactly this placement.
///
/// A new board is only ever produced by executing a move or by a
/// [`Builder`]. Clones are cheap and share the snapshot.
///
/// # Examples
///
/// ```
/// use chess_rules::{Board, Coordinate, MoveStatus};
///
/// let board = Board::standard();
/// assert_eq!(board.legal_moves().len(), 20);
///
/// let transition = board.play("e2e4".parse()?);
/// assert_eq!(transition.status(), MoveStatus::Done);
///
/// let after = transition.board().expect("done");
/// assert!(after.piece_at(Coordinate::E4).is_some());
/// assert!(board.piece_at(Coordinate::E4).is_none());
/// # Ok::<_, chess_rules::ParseMoveRequestError>(())
/// ```
#[derive(Clone)]
pub struct Board {
    layout: Arc<Layout>,
    players: Arc<BySide<Player>>,
}

impl Board {
    pub(crate) fn from_layout(layout: Layout) -> Board {
        let layout = Arc::new(layout);
        let players = BySide::new_with(|side| Player::new(Arc::clone(&layout), side));
        Board {
            layout,
            players: Arc::new(players),
        }
    }

    /// The standard starting position.
    pub fn standard() -> Board {
        Board::from_layout(Layout::standard())
    }

    /// Starts building a board from an empty one.
    pub fn builder() -> Builder {
        Builder::new()
    }

    #[inline]
    pub(crate) fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    pub fn turn(&self) -> Side {
        self.layout.turn
    }

    /// The pawn that just made a double step, if any.
    #[inline]
    pub fn en_passant_pawn(&self) -> Option<Piece> {
        self.layout.en_passant
    }

    pub fn tile_at(&self, coordinate: Coordinate) -> Tile {
        Tile {
            coordinate,
            piece: self.layout.piece_at(coordinate),
        }
    }

    #[inline]
    pub fn piece_at(&self, coordinate: Coordinate) -> Option<Piece> {
        self.layout.piece_at(coordinate)
    }

    #[inline]
    pub fn is_empty(&self, coordinate: Coordinate) -> bool {
        self.layout.is_empty(coordinate)
    }

    /// Iterates the pieces of `side` in coordinate order.
    pub fn active_pieces(&self, side: Side) -> impl Iterator<Item = Piece> + '_ {
        self.layout.active_pieces(side)
    }

    pub fn player(&self, side: Side) -> &Player {
        self.players.get(side)
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> &Player {
        self.player(self.turn())
    }

    pub fn opponent(&self) -> &Player {
        self.player(!self.turn())
    }

    /// Legal moves of the side to move. See [`Player::legal_moves()`].
    pub fn legal_moves(&self) -> &MoveList {
        self.current_player().legal_moves()
    }

    /// Legal moves of the side to move starting at `from`.
    pub fn legal_moves_from(&self, from: Coordinate) -> impl Iterator<Item = Move> + '_ {
        self.legal_moves()
            .iter()
            .copied()
            .filter(move |m| m.from() == Some(from))
    }

    /// Resolves `request` and attempts it for the side to move.
    ///
    /// Requests that match no legal move yield an illegal transition
    /// carrying [`Move::Null`].
    pub fn play(&self, request: MoveRequest) -> MoveTransition {
        let player = self.current_player();
        match request.resolve(self) {
            Some(m) => player.attempt(&m),
            None => MoveTransition::illegal(Move::Null),
        }
    }

    pub fn is_check(&self) -> bool {
        self.current_player().is_in_check()
    }

    pub fn is_checkmate(&self) -> bool {
        self.current_player().is_in_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.current_player().is_in_stalemate()
    }

    /// The result of the game, if the side to move is checkmated or
    /// stalemated.
    pub fn outcome(&self) -> Option<Outcome> {
        let player = self.current_player();
        if player.is_in_checkmate() {
            Some(Outcome::Decisive {
                winner: !player.side(),
            })
        } else if player.is_in_stalemate() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::standard()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Board) -> bool {
        self.layout == other.layout
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.layout.hash(state);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            for column in Column::ALL {
                let coordinate = Coordinate::from_coords(column, rank);
                f.write_char(self.piece_at(coordinate).map_or('.', Piece::char))?;
                f.write_char(if column < Column::H { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("turn", &self.turn())
            .field("en_passant", &self.en_passant_pawn().map(Piece::position))
            .field("pieces", &self.layout.pieces().collect::<Vec<_>>())
            .finish()
    }
}

bitflags! {
    /// Reasons for a [`Builder`] to reject a board.
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    pub struct BoardErrorKinds: u32 {
        /// A side has no king.
        const MISSING_KING = 1 << 0;
        /// A side has more than one king.
        const TOO_MANY_KINGS = 1 << 1;
        /// A side has more than 16 pieces.
        const TOO_MANY_PIECES = 1 << 2;
        /// A side has more than 8 pawns.
        const TOO_MANY_PAWNS = 1 << 3;
        /// There are pawns on the first or eighth rank.
        const PAWNS_ON_BACKRANK = 1 << 4;
        /// The en passant tile does not hold an enemy pawn that could have
        /// just made a double step.
        const INVALID_EN_PASSANT = 1 << 5;
        /// The side not to move is in check.
        const OPPOSITE_CHECK = 1 << 6;
    }
}

const REASONS: [(BoardErrorKinds, &str); 7] = [
    (BoardErrorKinds::MISSING_KING, "missing king"),
    (BoardErrorKinds::TOO_MANY_KINGS, "too many kings"),
    (BoardErrorKinds::TOO_MANY_PIECES, "too many pieces"),
    (BoardErrorKinds::TOO_MANY_PAWNS, "too many pawns"),
    (BoardErrorKinds::PAWNS_ON_BACKRANK, "pawns on backrank"),
    (BoardErrorKinds::INVALID_EN_PASSANT, "invalid en passant tile"),
    (BoardErrorKinds::OPPOSITE_CHECK, "opponent is in check"),
];

/// Error when building an illegal board.
///
/// All violated conditions are reported together.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoardError {
    kinds: BoardErrorKinds,
}

impl BoardError {
    pub fn kinds(&self) -> BoardErrorKinds {
        self.kinds
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal board: ")?;
        let mut first = true;
        for (kind, reason) in REASONS {
            if self.kinds.contains(kind) {
                if !first {
                    f.write_str(", ")?;
                }
                f.write_str(reason)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl Error for BoardError {}

/// Assembles a [`Board`] from individual pieces.
///
/// Pieces are placed as not having moved, unless they were created with
/// [`Piece::with_first_move()`]. Pawns off their starting rank always count
/// as moved.
///
/// # Examples
///
/// ```
/// use chess_rules::{Board, Coordinate, PieceKind, Side};
///
/// let board = Board::builder()
///     .piece(PieceKind::King.of(Side::White, Coordinate::E1))
///     .piece(PieceKind::Rook.of(Side::White, Coordinate::H1))
///     .piece(PieceKind::King.of(Side::Black, Coordinate::E8))
///     .build()?;
///
/// assert_eq!(board.active_pieces(Side::White).count(), 2);
/// # Ok::<_, chess_rules::BoardError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Builder {
    layout: Layout,
    en_passant: Option<Coordinate>,
}

impl Builder {
    /// An empty board with White to move.
    pub fn new() -> Builder {
        Builder {
            layout: Layout::empty(Side::White),
            en_passant: None,
        }
    }

    /// The standard starting position.
    pub fn standard() -> Builder {
        Builder {
            layout: Layout::standard(),
            en_passant: None,
        }
    }

    /// Places `piece`, replacing any piece on the same tile.
    ///
    /// A pawn away from its starting rank has already moved, so it loses
    /// its first-move flag.
    #[must_use]
    pub fn piece(mut self, piece: Piece) -> Builder {
        let piece = if piece.is(PieceKind::Pawn)
            && piece.position().rank() != piece.side().pawn_rank()
        {
            piece.with_first_move(false)
        } else {
            piece
        };
        self.layout.set(piece);
        self
    }

    #[must_use]
    pub fn without_piece(mut self, coordinate: Coordinate) -> Builder {
        self.layout.tiles[coordinate.index()] = None;
        self
    }

    #[must_use]
    pub fn turn(mut self, turn: Side) -> Builder {
        self.layout.turn = turn;
        self
    }

    /// Marks the pawn on `coordinate` as having just made a double step.
    #[must_use]
    pub fn en_passant(mut self, coordinate: Coordinate) -> Builder {
        self.en_passant = Some(coordinate);
        self
    }

    /// Validates the setup and computes both players.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] listing every violated condition.
    pub fn build(self) -> Result<Board, BoardError> {
        let Builder {
            mut layout,
            en_passant,
        } = self;
        let mut kinds = BoardErrorKinds::empty();

        for side in Side::ALL {
            let kings = layout
                .active_pieces(side)
                .filter(|piece| piece.is(PieceKind::King))
                .count();
            if kings == 0 {
                kinds |= BoardErrorKinds::MISSING_KING;
            } else if kings > 1 {
                kinds |= BoardErrorKinds::TOO_MANY_KINGS;
            }
            if layout.active_pieces(side).count() > 16 {
                kinds |= BoardErrorKinds::TOO_MANY_PIECES;
            }
            if layout
                .active_pieces(side)
                .filter(|piece| piece.is(PieceKind::Pawn))
                .count()
                > 8
            {
                kinds |= BoardErrorKinds::TOO_MANY_PAWNS;
            }
        }

        if layout.pieces().any(|piece| {
            piece.is(PieceKind::Pawn)
                && matches!(piece.position().rank(), Rank::First | Rank::Eighth)
        }) {
            kinds |= BoardErrorKinds::PAWNS_ON_BACKRANK;
        }

        if let Some(coordinate) = en_passant {
            match valid_en_passant(&layout, coordinate) {
                Some(pawn) => layout.en_passant = Some(pawn),
                None => kinds |= BoardErrorKinds::INVALID_EN_PASSANT,
            }
        }

        let king_kinds = BoardErrorKinds::MISSING_KING | BoardErrorKinds::TOO_MANY_KINGS;
        if !kinds.intersects(king_kinds) {
            let waiting = !layout.turn;
            let checked = layout
                .king(waiting)
                .is_some_and(|king| layout.reach(layout.turn).contains(king.position()));
            if checked {
                kinds |= BoardErrorKinds::OPPOSITE_CHECK;
            }
        }

        if kinds.is_empty() {
            Ok(Board::from_layout(layout))
        } else {
            Err(BoardError { kinds })
        }
    }
}

impl Default for Builder {
    fn default() -> Builder {
        Builder::new()
    }
}

fn valid_en_passant(layout: &Layout, coordinate: Coordinate) -> Option<Piece> {
    let pawn = layout.piece_at(coordinate)?;
    let side = pawn.side();
    let double_step_rank = side.pawn_rank().offset(2 * side.forward())?;
    let passed = coordinate.relative(0, -side.forward())?;
    let valid = pawn.is(PieceKind::Pawn)
        && side != layout.turn
        && coordinate.rank() == double_step_rank
        && layout.is_empty(passed);
    valid.then_some(pawn)
}
