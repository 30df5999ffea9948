use anyhow::Result;

use kanban::{Board, Status};

pub fn run(board: &mut Board, id: i64, status: &str) -> Result<()> {
    let status: Status = status.parse()?;
    if board.move_task(id, status)? {
        println!("Moved task #{} to {}", id, status.column_title());
    } else {
        println!("Task #{} is already in {}", id, status.column_title());
    }
    Ok(())
}

pub fn drag(board: &mut Board, id: i64) -> Result<()> {
    board.begin_drag(id)?;
    println!("Dragging task #{}", id);
    Ok(())
}

/// Drops the dragged task on a column and ends the gesture either way.
pub fn drop_on(board: &mut Board, status: &str) -> Result<()> {
    let status: Status = status.parse()?;
    let dragged = board.dragged_task();
    let result = board.drop_on(status);
    board.end_drag();
    match (result?, dragged) {
        (true, Some(id)) => println!("Dropped task #{} on {}", id, status.column_title()),
        _ => println!("Nothing changed"),
    }
    Ok(())
}

pub fn release(board: &mut Board) -> Result<()> {
    board.end_drag();
    println!("Drag cancelled");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::setup_test_board;
    use kanban::BoardEvent;

    #[test]
    fn test_move_task() {
        let (mut board, _clock) = setup_test_board();
        run(&mut board, 2, "in-progress").unwrap();
        assert_eq!(board.task(2).unwrap().status, Status::InProgress);
    }

    #[test]
    fn test_move_accepts_underscore_spelling() {
        let (mut board, _clock) = setup_test_board();
        run(&mut board, 2, "in_progress").unwrap();
        assert_eq!(board.task(2).unwrap().status, Status::InProgress);
    }

    #[test]
    fn test_move_invalid_status() {
        let (mut board, _clock) = setup_test_board();
        let result = run(&mut board, 2, "blocked");
        assert!(result.unwrap_err().to_string().contains("Invalid status"));
    }

    #[test]
    fn test_move_nonexistent() {
        let (mut board, _clock) = setup_test_board();
        assert!(run(&mut board, 42, "done").is_err());
    }

    #[test]
    fn test_drag_drop_ends_gesture() {
        let (mut board, _clock) = setup_test_board();
        drag(&mut board, 1).unwrap();
        drop_on(&mut board, "review").unwrap();
        assert_eq!(board.task(1).unwrap().status, Status::Review);
        assert_eq!(board.dragged_task(), None);
    }

    #[test]
    fn test_drop_same_column_emits_nothing() {
        let (mut board, _clock) = setup_test_board();
        drag(&mut board, 1).unwrap();
        board.drain_events();
        drop_on(&mut board, "todo").unwrap();
        assert!(!board
            .drain_events()
            .iter()
            .any(|e| matches!(e, BoardEvent::TaskMoved { .. })));
    }

    #[test]
    fn test_drop_without_drag() {
        let (mut board, _clock) = setup_test_board();
        let result = drop_on(&mut board, "done");
        assert!(result.unwrap_err().to_string().contains("No task is being dragged"));
    }

    #[test]
    fn test_release_clears_drag() {
        let (mut board, _clock) = setup_test_board();
        drag(&mut board, 3).unwrap();
        release(&mut board).unwrap();
        assert!(drop_on(&mut board, "done").is_err());
        assert_eq!(board.task(3).unwrap().status, Status::InProgress);
    }
}
