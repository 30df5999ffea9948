use anyhow::{Context, Result};
use signal_hook::consts::{SIGINT, SIGTERM};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

use kanban::{Board, RandomEventSource};

use crate::commands::notify::describe_events;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Runs the simulated team against the real clock until `seconds` elapse or
/// the process is interrupted.
pub fn run(board: &mut Board, seconds: Option<u64>, rng_seed: Option<u64>) -> Result<()> {
    let stop = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&stop))
            .context("Failed to install signal handler")?;
    }

    let source = match rng_seed {
        Some(seed) => RandomEventSource::seeded(seed, board.config()),
        None => RandomEventSource::new(board.config()),
    };
    board.start_simulation(Box::new(source));
    board.drain_events();

    let deadline = seconds.map(|s| Instant::now() + Duration::from_secs(s));
    println!(
        "Watching the board [{}]. Press Ctrl-C to stop.",
        board.connection().label()
    );

    while !stop.load(Ordering::Relaxed) {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            break;
        }
        for line in pump(board) {
            println!("{}", line);
        }
        thread::sleep(POLL_INTERVAL);
    }

    board.stop_simulation();
    info!(updates = board.simulated_updates(), "live session ended");
    println!(
        "Stopped after {} simulated updates. Connection: {}",
        board.simulated_updates(),
        board.connection().label()
    );
    Ok(())
}

/// Fires due timers and returns the lines describing what happened.
pub fn pump(board: &mut Board) -> Vec<String> {
    board.run_due_timers();
    let events = board.drain_events();
    describe_events(board, &events)
}
