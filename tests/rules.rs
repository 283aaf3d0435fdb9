use chess_rules::{
    Board, CastlingSide, Coordinate, Move, MoveKind, MoveRequest, MoveStatus, Outcome, Piece,
    PieceKind, Side,
};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn play(board: &Board, request: &str) -> Board {
    let request: MoveRequest = request.parse().expect("valid request");
    let transition = board.play(request);
    assert_eq!(transition.status(), MoveStatus::Done, "{request}");
    transition.into_board().expect("board after done move")
}

fn play_all(moves: &str) -> Board {
    init_logging();
    moves
        .split_whitespace()
        .fold(Board::standard(), |board, request| play(&board, request))
}

fn king_and_rooks(extra: &[Piece]) -> Board {
    let mut builder = Board::builder()
        .piece(PieceKind::King.of(Side::White, Coordinate::E1))
        .piece(PieceKind::Rook.of(Side::White, Coordinate::A1))
        .piece(PieceKind::Rook.of(Side::White, Coordinate::H1))
        .piece(PieceKind::King.of(Side::Black, Coordinate::E8));
    for &piece in extra {
        builder = builder.piece(piece);
    }
    builder.build().expect("valid board")
}

fn castles(board: &Board) -> Vec<CastlingSide> {
    board
        .legal_moves()
        .iter()
        .filter_map(|m| m.castling_side())
        .collect()
}

#[test]
fn test_standard_opening_moves() {
    init_logging();
    let board = Board::standard();
    let legals = board.legal_moves();
    assert_eq!(legals.len(), 20);

    let pawn_moves = legals
        .iter()
        .filter(|m| m.piece().is_some_and(|p| p.is(PieceKind::Pawn)))
        .count();
    let knight_moves = legals
        .iter()
        .filter(|m| m.piece().is_some_and(|p| p.is(PieceKind::Knight)))
        .count();
    assert_eq!(pawn_moves, 16);
    assert_eq!(knight_moves, 4);

    assert_eq!(board.opponent().legal_moves().len(), 20);
    assert!(!board.is_check());
    assert_eq!(board.outcome(), None);
}

#[test]
fn test_fools_mate() {
    let board = play_all("f2f3 e7e5 g2g4 d8h4");
    assert_eq!(board.turn(), Side::White);

    let white = board.current_player();
    assert!(white.is_in_check());
    assert!(white.is_in_checkmate());
    assert!(!white.is_in_stalemate());
    assert!(!board.opponent().is_in_checkmate());

    let outcome = board.outcome().expect("game over");
    assert_eq!(
        outcome,
        Outcome::Decisive {
            winner: Side::Black
        }
    );
    assert_eq!(outcome.to_string(), "0-1");
}

#[test]
fn test_scholars_mate() {
    let board = play_all("e2e4 e7e5 f1c4 b8c6 d1h5 g8f6 h5f7");
    assert!(board.is_checkmate());
    assert_eq!(board.outcome().and_then(Outcome::winner), Some(Side::White));
}

#[test]
fn test_castling_allowed() {
    let board = play_all("e2e4 e7e5 g1f3 b8c6 f1c4 g8f6");
    assert_eq!(castles(&board), [CastlingSide::KingSide]);

    let m = Move::resolve(&board, Coordinate::E1, Coordinate::G1).expect("castle");
    assert_eq!(m.kind(), MoveKind::KingSideCastle);

    let after = play(&board, "e1g1");
    assert_eq!(
        after.piece_at(Coordinate::G1).map(Piece::kind),
        Some(PieceKind::King)
    );
    assert_eq!(
        after.piece_at(Coordinate::F1).map(Piece::kind),
        Some(PieceKind::Rook)
    );
    assert!(after.is_empty(Coordinate::E1));
    assert!(after.is_empty(Coordinate::H1));
}

#[test]
fn test_castling_blocked_by_occupied_tiles() {
    let board = king_and_rooks(&[PieceKind::Bishop.of(Side::White, Coordinate::F1)]);
    assert_eq!(castles(&board), [CastlingSide::QueenSide]);

    let board = king_and_rooks(&[PieceKind::Knight.of(Side::Black, Coordinate::G1)]);
    assert_eq!(castles(&board), [CastlingSide::QueenSide]);

    let board = king_and_rooks(&[PieceKind::Knight.of(Side::White, Coordinate::B1)]);
    assert_eq!(castles(&board), [CastlingSide::KingSide]);
}

#[test]
fn test_castling_blocked_by_attacked_tiles() {
    let board = king_and_rooks(&[PieceKind::Rook.of(Side::Black, Coordinate::F8)]);
    assert!(board.current_player().is_threatened(Coordinate::F1));
    assert_eq!(castles(&board), [CastlingSide::QueenSide]);

    let board = king_and_rooks(&[PieceKind::Bishop.of(Side::Black, Coordinate::C5)]);
    assert!(board.current_player().is_threatened(Coordinate::G1));
    assert_eq!(castles(&board), [CastlingSide::QueenSide]);

    // Only the tiles the king crosses must be safe.
    let board = king_and_rooks(&[PieceKind::Rook.of(Side::Black, Coordinate::B8)]);
    assert!(board.current_player().is_threatened(Coordinate::B1));
    assert_eq!(castles(&board), CastlingSide::ALL);
}

#[test]
fn test_castling_after_king_or_rook_moved() {
    let board = king_and_rooks(&[PieceKind::King
        .of(Side::White, Coordinate::E1)
        .with_first_move(false)]);
    assert!(castles(&board).is_empty());

    let board = play_all("e2e4 e7e5 g1f3 b8c6 f1c4 g8f6 h1g1 f8c5 g1h1 d7d6");
    assert_eq!(board.turn(), Side::White);
    assert!(castles(&board).is_empty());

    let board = play_all("e2e4 e7e5 g1f3 b8c6 f1c4 g8f6 e1e2 f8c5 e2e1 d7d6");
    assert!(castles(&board).is_empty());
}

#[test]
fn test_en_passant_window() {
    let board = play_all("e2e4 a7a6 e4e5 d7d5");
    let vulnerable = board.en_passant_pawn().expect("double step");
    assert_eq!(vulnerable.position(), Coordinate::D5);

    let en_passant: Vec<_> = board
        .legal_moves()
        .iter()
        .filter(|m| m.is_en_passant())
        .collect();
    assert_eq!(en_passant.len(), 1);
    assert_eq!(en_passant[0].from(), Some(Coordinate::E5));
    assert_eq!(en_passant[0].to(), Some(Coordinate::D6));
    assert_eq!(en_passant[0].captured(), Some(vulnerable));
    assert_eq!(en_passant[0].to_string(), "e5xd6");

    let after = play(&board, "e5d6");
    assert!(after.is_empty(Coordinate::D5));
    assert!(after.is_empty(Coordinate::E5));
    assert_eq!(
        after.piece_at(Coordinate::D6).map(Piece::side),
        Some(Side::White)
    );
    assert_eq!(after.active_pieces(Side::Black).count(), 15);

    // Any other move closes the window.
    let later = play(&play(&board, "a2a3"), "a6a5");
    assert_eq!(later.en_passant_pawn(), None);
    assert!(!later.legal_moves().iter().any(|m| m.is_en_passant()));
    assert_eq!(
        later.play("e5d6".parse().expect("valid request")).status(),
        MoveStatus::Illegal
    );
}

#[test]
fn test_en_passant_requires_adjacent_pawn() {
    let board = play_all("e2e4 a7a6 e4e5 c7c5");
    assert!(board.en_passant_pawn().is_some());
    assert!(!board.legal_moves().iter().any(|m| m.is_en_passant()));
}

#[test]
fn test_pinned_piece() {
    init_logging();
    let board = Board::builder()
        .piece(PieceKind::King.of(Side::White, Coordinate::E1))
        .piece(PieceKind::Bishop.of(Side::White, Coordinate::E2))
        .piece(PieceKind::Rook.of(Side::Black, Coordinate::E8))
        .piece(PieceKind::King.of(Side::Black, Coordinate::A8))
        .build()
        .expect("valid board");

    let m = Move::resolve(&board, Coordinate::E2, Coordinate::D3).expect("geometrically valid");
    let transition = board.current_player().attempt(&m);
    assert_eq!(transition.status(), MoveStatus::LeavesOwnKingInCheck);
    assert!(transition.board().is_none());
    assert_eq!(transition.mv(), m);

    let escapes = board.current_player().escape_moves();
    assert!(escapes
        .iter()
        .all(|m| m.piece().is_some_and(|p| p.is(PieceKind::King))));
    assert!(!escapes.is_empty());
}

#[test]
fn test_king_cannot_step_along_checking_ray() {
    let board = Board::builder()
        .piece(PieceKind::King.of(Side::White, Coordinate::E2))
        .piece(PieceKind::Rook.of(Side::Black, Coordinate::E8))
        .piece(PieceKind::King.of(Side::Black, Coordinate::A8))
        .build()
        .expect("valid board");
    assert!(board.is_check());

    let m = Move::resolve(&board, Coordinate::E2, Coordinate::E1).expect("candidate");
    assert_eq!(
        board.current_player().attempt(&m).status(),
        MoveStatus::LeavesOwnKingInCheck
    );
    assert_eq!(
        board.play("e2d2".parse().expect("valid request")).status(),
        MoveStatus::Done
    );
}

#[test]
fn test_stalemate() {
    let board = Board::builder()
        .piece(PieceKind::King.of(Side::Black, Coordinate::H8))
        .piece(PieceKind::Queen.of(Side::White, Coordinate::G6))
        .piece(PieceKind::King.of(Side::White, Coordinate::F7))
        .turn(Side::Black)
        .build()
        .expect("valid board");

    let black = board.current_player();
    assert!(!black.is_in_check());
    assert!(!black.has_escape_moves());
    assert!(black.is_in_stalemate());
    assert!(!black.is_in_checkmate());
    assert_eq!(board.outcome(), Some(Outcome::Draw));
}

#[test]
fn test_rejected_attempts() {
    let board = Board::standard();

    let transition = board.current_player().attempt(&Move::Null);
    assert_eq!(transition.status(), MoveStatus::Null);
    assert!(transition.board().is_none());

    assert_eq!(Move::resolve(&board, Coordinate::E2, Coordinate::E5), None);
    assert_eq!(
        board.play("e2e5".parse().expect("valid request")).status(),
        MoveStatus::Illegal
    );

    // Black may not move on White's turn.
    let m = Move::resolve(&play(&board, "e2e4"), Coordinate::E7, Coordinate::E5).expect("legal");
    assert_eq!(board.player(Side::Black).attempt(&m).status(), MoveStatus::Illegal);
}

#[test]
fn test_promotion() {
    let board = Board::builder()
        .piece(PieceKind::King.of(Side::White, Coordinate::E1))
        .piece(PieceKind::Pawn.of(Side::White, Coordinate::B7).with_first_move(false))
        .piece(PieceKind::King.of(Side::Black, Coordinate::H7))
        .build()
        .expect("valid board");

    let m = Move::resolve(&board, Coordinate::B7, Coordinate::B8).expect("promotion");
    assert_eq!(m.promotion(), Some(PieceKind::Queen));
    assert_eq!(m.to_string(), "b7-b8=Q");

    let after = play(&board, "b7b8n");
    let knight = after.piece_at(Coordinate::B8).expect("promoted piece");
    assert_eq!(knight.kind(), PieceKind::Knight);
    assert_eq!(knight.side(), Side::White);
    assert!(!knight.is_first_move());
    assert!(after.is_empty(Coordinate::B7));
}

#[test]
fn test_boards_are_immutable() {
    let board = Board::standard();
    let after = play(&board, "g1f3");
    assert_eq!(board, Board::standard());
    assert_ne!(board, after);
    assert!(board.tile_at(Coordinate::F3).piece().is_none());
    assert_eq!(
        after.tile_at(Coordinate::F3).piece(),
        Some(
            PieceKind::Knight
                .of(Side::White, Coordinate::F3)
                .with_first_move(false)
        )
    );
}

#[test]
fn test_boards_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Board>();

    let board = play_all("d2d4 d7d5");
    let handle = {
        let board = board.clone();
        std::thread::spawn(move || board.current_player().escape_moves().len())
    };
    assert_eq!(handle.join().expect("thread"), board.legal_moves().len());
}
