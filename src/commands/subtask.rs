use anyhow::Result;

use kanban::Board;

pub fn add(board: &mut Board, task_id: i64, title: &str) -> Result<()> {
    let id = board.add_subtask(task_id, title)?;
    println!("Added subtask {} to task #{}", id, task_id);
    Ok(())
}

pub fn toggle(board: &mut Board, task_id: i64, subtask_id: i64) -> Result<()> {
    let completed = board.toggle_subtask(task_id, subtask_id)?;
    let (done, total) = board
        .task(task_id)
        .map(|t| t.subtask_counts())
        .unwrap_or_default();
    let state = if completed { "done" } else { "open" };
    println!(
        "Subtask {} of task #{} is {} ({}/{} complete)",
        subtask_id, task_id, state, done, total
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::setup_test_board;
    use proptest::prelude::*;

    #[test]
    fn test_add_subtask() {
        let (mut board, _clock) = setup_test_board();
        add(&mut board, 2, "Choose runner").unwrap();
        let task = board.task(2).unwrap();
        assert_eq!(task.subtasks.len(), 1);
        assert_eq!(task.subtasks[0].title, "Choose runner");
        assert!(!task.subtasks[0].completed);
    }

    #[test]
    fn test_add_subtask_empty_title() {
        let (mut board, _clock) = setup_test_board();
        assert!(add(&mut board, 2, " ").is_err());
    }

    #[test]
    fn test_toggle_subtask() {
        let (mut board, _clock) = setup_test_board();
        toggle(&mut board, 1, 2).unwrap();
        assert!(board.task(1).unwrap().subtask(2).unwrap().completed);
    }

    #[test]
    fn test_toggle_unknown_subtask() {
        let (mut board, _clock) = setup_test_board();
        let err = toggle(&mut board, 1, 7).unwrap_err();
        assert!(err.to_string().contains("Subtask #7 not found in task #1"));
    }

    proptest! {
        #[test]
        fn prop_even_toggles_restore(times in 0usize..8, subtask in 1i64..=3) {
            let (mut board, _clock) = setup_test_board();
            let before = board.task(3).unwrap().subtask(subtask).unwrap().completed;
            for _ in 0..times * 2 {
                toggle(&mut board, 3, subtask).unwrap();
            }
            prop_assert_eq!(board.task(3).unwrap().subtask(subtask).unwrap().completed, before);
        }
    }
}
