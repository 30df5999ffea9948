#![no_main]

//! Fuzz target for snapshot import.
//!
//! Arbitrary bytes must either be rejected with an error or load into a board
//! whose own export loads again.

use libfuzzer_sys::fuzz_target;

use kanban::{Board, BoardConfig, BoardSnapshot, SystemClock};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(snapshot) = BoardSnapshot::from_json(json) else {
        return;
    };
    let board = match Board::from_snapshot(snapshot, Box::new(SystemClock), BoardConfig::default()) {
        Ok(b) => b,
        Err(e) => panic!("validated snapshot failed to load: {}", e),
    };

    let Ok(exported) = board.snapshot().to_json_pretty() else {
        return;
    };
    assert!(BoardSnapshot::from_json(&exported).is_ok());
});
