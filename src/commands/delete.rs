use anyhow::{bail, Result};
use std::io::{self, BufRead, Write};

use kanban::Board;

pub fn run(board: &mut Board, id: i64, force: bool) -> Result<()> {
    run_with_input(board, id, force, &mut io::stdin().lock())
}

fn run_with_input(board: &mut Board, id: i64, force: bool, input: &mut impl BufRead) -> Result<()> {
    // Check if task exists first
    let task = match board.task(id) {
        Some(t) => t,
        None => bail!("Task #{} not found", id),
    };

    if !force {
        print!("Delete task #{} \"{}\"? [y/N] ", id, task.title);
        io::stdout().flush()?;

        let mut answer = String::new();
        input.read_line(&mut answer)?;

        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if board.delete_task(id) {
        println!("Deleted task #{}", id);
    } else {
        bail!("Failed to delete task #{}", id);
    }

    Ok(())
}

/// Internal function for testing without stdin interaction
#[cfg(test)]
pub fn run_force(board: &mut Board, id: i64) -> Result<()> {
    run(board, id, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::setup_test_board;
    use kanban::{FilterState, Status};
    use proptest::prelude::*;

    // ==================== Unit Tests ====================

    #[test]
    fn test_delete_existing_task_force() {
        let (mut board, _clock) = setup_test_board();
        let result = run_force(&mut board, 2);
        assert!(result.is_ok());
        assert!(board.task(2).is_none());
    }

    #[test]
    fn test_delete_nonexistent_task() {
        let (mut board, _clock) = setup_test_board();
        let result = run_force(&mut board, 99999);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
        assert_eq!(board.tasks().len(), 5);
    }

    #[test]
    fn test_delete_confirmed() {
        let (mut board, _clock) = setup_test_board();
        let mut input = "y\n".as_bytes();
        run_with_input(&mut board, 3, false, &mut input).unwrap();
        assert!(board.task(3).is_none());
    }

    #[test]
    fn test_delete_cancelled() {
        let (mut board, _clock) = setup_test_board();
        let mut input = "n\n".as_bytes();
        run_with_input(&mut board, 3, false, &mut input).unwrap();
        assert!(board.task(3).is_some());
    }

    #[test]
    fn test_delete_cancelled_on_empty_answer() {
        let (mut board, _clock) = setup_test_board();
        let mut input = "".as_bytes();
        run_with_input(&mut board, 3, false, &mut input).unwrap();
        assert!(board.task(3).is_some());
    }

    #[test]
    fn test_delete_updates_counts() {
        let (mut board, _clock) = setup_test_board();
        run_force(&mut board, 4).unwrap();
        let counts = board.column_counts(&FilterState::new());
        assert_eq!(counts[2], (Status::Review, 0));
    }

    #[test]
    fn test_delete_twice() {
        let (mut board, _clock) = setup_test_board();
        run_force(&mut board, 1).unwrap();
        assert!(run_force(&mut board, 1).is_err());
    }

    proptest! {
        #[test]
        fn prop_delete_removes_only_target(id in 1i64..=5) {
            let (mut board, _clock) = setup_test_board();
            run_force(&mut board, id).unwrap();
            prop_assert!(board.task(id).is_none());
            prop_assert_eq!(board.tasks().len(), 4);
        }
    }
}
