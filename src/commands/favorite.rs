use anyhow::Result;

use kanban::Board;

pub fn run(board: &mut Board, id: i64) -> Result<()> {
    if board.toggle_favorite(id)? {
        println!("Starred task #{}", id);
    } else {
        println!("Unstarred task #{}", id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::setup_test_board;

    #[test]
    fn test_favorite_toggles() {
        let (mut board, _clock) = setup_test_board();
        run(&mut board, 2).unwrap();
        assert!(board.task(2).unwrap().is_favorite);
        run(&mut board, 2).unwrap();
        assert!(!board.task(2).unwrap().is_favorite);
    }

    #[test]
    fn test_favorite_keeps_updated_at() {
        let (mut board, clock) = setup_test_board();
        let before = board.task(2).unwrap().updated_at;
        clock.advance(chrono::Duration::minutes(1));
        run(&mut board, 2).unwrap();
        assert_eq!(board.task(2).unwrap().updated_at, before);
    }

    #[test]
    fn test_favorite_nonexistent() {
        let (mut board, _clock) = setup_test_board();
        assert!(run(&mut board, 0).unwrap_err().to_string().contains("not found"));
    }
}
