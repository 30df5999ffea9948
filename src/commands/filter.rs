use anyhow::Result;

use kanban::{Board, FilterState, Priority, Status};

use crate::commands::board::describe_filters;

/// Replaces the board's filters. Nothing changes if any value fails to parse.
pub fn apply(
    board: &mut Board,
    search: Option<&str>,
    priorities: &[String],
    statuses: &[String],
) -> Result<()> {
    let mut state = FilterState::new().with_search(search.unwrap_or_default());
    for p in priorities {
        state = state.with_priority(p.parse::<Priority>()?);
    }
    for s in statuses {
        state = state.with_status(s.parse::<Status>()?);
    }
    board.set_filters(state);
    Ok(())
}

pub fn search(board: &mut Board, text: &str) -> Result<()> {
    board.set_search(text);
    report(board);
    Ok(())
}

pub fn toggle_priority(board: &mut Board, priority: &str) -> Result<()> {
    board.toggle_priority_filter(priority.parse()?);
    report(board);
    Ok(())
}

pub fn toggle_status(board: &mut Board, status: &str) -> Result<()> {
    board.toggle_status_filter(status.parse()?);
    report(board);
    Ok(())
}

pub fn clear(board: &mut Board) -> Result<()> {
    board.clear_filters();
    report(board);
    Ok(())
}

fn report(board: &Board) {
    println!(
        "Filters: {} ({} of {} tasks shown)",
        describe_filters(board),
        board.visible_tasks().len(),
        board.tasks().len()
    );
}
