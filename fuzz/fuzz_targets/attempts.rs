#![no_main]

use arbitrary::Arbitrary;
use chess_rules::{Board, Coordinate, Move, PieceKind, Side};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Data {
    requests: Vec<(Coordinate, Coordinate)>,
}

fuzz_target!(|data: Data| {
    let mut board = Board::standard();

    for (from, to) in data.requests {
        let Some(m) = Move::resolve(&board, from, to) else {
            continue;
        };

        let transition = board.current_player().attempt(&m);
        assert_eq!(transition.status().is_done(), transition.board().is_some());
        assert_eq!(
            transition.status().is_done(),
            board.current_player().escape_moves().contains(&m)
        );

        if let Some(next) = transition.into_board() {
            for side in Side::ALL {
                let kings = next
                    .active_pieces(side)
                    .filter(|p| p.is(PieceKind::King))
                    .count();
                assert_eq!(kings, 1);
            }
            assert!(!next.opponent().is_in_check());
            board = next;
        }
    }
});
