#![no_main]

//! Fuzz target for the filter engine.
//!
//! Search text can contain any Unicode, so lowercasing and substring checks
//! must never panic. Also checks that filtering is idempotent and that the
//! column views partition the filtered list.

use arbitrary::Arbitrary;
use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;

use kanban::filter::{column, filter};
use kanban::{Board, BoardConfig, FilterState, ManualClock, NewTask, Priority, Status};

#[derive(Arbitrary, Debug)]
struct FilterInput {
    /// Extra task titles added to the sample board
    titles: Vec<String>,
    /// Tags for the extra tasks
    tags: Vec<String>,
    search: String,
    priorities: Vec<u8>,
    statuses: Vec<u8>,
}

fuzz_target!(|input: FilterInput| {
    let Some(start) = Utc.with_ymd_and_hms(2024, 1, 12, 9, 0, 0).single() else {
        return;
    };
    let clock = ManualClock::new(start);
    let Ok(mut board) = Board::with_sample_data(Box::new(clock), BoardConfig::default()) else {
        return;
    };

    for title in input.titles.iter().take(20) {
        let _ = board.create_task(NewTask {
            title: title.clone(),
            tags: input.tags.iter().take(5).cloned().collect(),
            ..NewTask::default()
        });
    }

    let mut state = FilterState::new().with_search(input.search.clone());
    for p in input.priorities.iter().take(3) {
        state = state.with_priority(Priority::ALL[*p as usize % Priority::ALL.len()]);
    }
    for s in input.statuses.iter().take(4) {
        state = state.with_status(Status::ALL[*s as usize % Status::ALL.len()]);
    }

    let once = filter(board.tasks(), &state);
    let owned: Vec<_> = once.iter().map(|t| (*t).clone()).collect();
    let twice = filter(&owned, &state);
    assert_eq!(once.len(), twice.len());

    let per_column: usize = Status::ALL
        .iter()
        .map(|s| column(board.tasks(), &state, *s).len())
        .sum();
    assert_eq!(per_column, once.len());

    let counts = board.column_counts(&state);
    assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), once.len());
});
