use chess_rules::{perft, Board, Coordinate, Move, MoveRequest};
use iai::black_box;

fn bench_shallow_perft() {
    let board = Board::standard();
    assert_eq!(black_box(perft(black_box(&board), 3)), 8_902);
}

fn bench_deep_perft() {
    let board = Board::standard();
    assert_eq!(perft(black_box(&board), 4), 197_281);
}

fn bench_generate_moves() -> Board {
    // Fresh boards compute both players, including castles.
    let board = black_box(Board::standard());
    let m = Move::resolve(&board, Coordinate::G1, Coordinate::F3).expect("legal move");
    m.execute(&board)
}

fn bench_escape_moves() {
    let board = black_box(Board::standard());
    assert_eq!(board.current_player().escape_moves().len(), 20);
}

fn bench_play_requests() -> Board {
    let game = [
        "e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "f3g5", "d7d5", "e4d5", "c6a5", "c4b5",
        "c7c6", "d5c6", "b7c6", "b5a4", "c8a6", "d2d3", "f8c5", "e1g1", "e8g8", "b1c3", "d8c7",
    ];

    let mut board = black_box(Board::standard());
    for request in black_box(game) {
        let request: MoveRequest = request.parse().expect("valid request");
        board = board
            .play(request)
            .into_board()
            .expect("legal move");
    }
    board
}

iai::main!(
    bench_shallow_perft,
    bench_deep_perft,
    bench_generate_moves,
    bench_escape_moves,
    bench_play_requests,
);
