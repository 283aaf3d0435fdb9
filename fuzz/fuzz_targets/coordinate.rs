#![no_main]

use chess_rules::Coordinate;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(coordinate) = Coordinate::from_ascii(data) {
        let roundtripped =
            Coordinate::from_ascii(coordinate.to_string().as_bytes()).expect("roundtrip");
        assert_eq!(coordinate, roundtripped);
        assert_eq!(Coordinate::from_index(coordinate.index()), coordinate);
    }
});
