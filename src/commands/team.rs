use anyhow::Result;

use kanban::models::Presence;
use kanban::{Board, Status};

pub fn run(board: &Board) -> Result<()> {
    for line in render(board) {
        println!("{}", line);
    }
    Ok(())
}

pub fn render(board: &Board) -> Vec<String> {
    board
        .members()
        .iter()
        .map(|m| {
            let open = board
                .tasks()
                .iter()
                .filter(|t| t.assignee == m.id && t.status != Status::Done)
                .count();
            format!(
                "#{:<3} {:<3} {:<20} {:<8} {:<7} {:>3}% productive, {} completed, {} open",
                m.id,
                m.initials,
                m.name,
                m.role.to_string(),
                m.status.to_string(),
                m.productivity,
                m.tasks_completed,
                open
            )
        })
        .collect()
}

pub fn set_presence(board: &mut Board, member_id: i64, status: &str) -> Result<()> {
    let status: Presence = status.parse()?;
    if board.set_member_status(member_id, status)? {
        println!("Member #{} is now {}", member_id, status);
    } else {
        println!("Member #{} was already {}", member_id, status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::setup_test_board;

    #[test]
    fn test_team_lists_members() {
        let (board, _clock) = setup_test_board();
        let lines = render(&board);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Alex Chen"));
        assert!(lines[0].contains("online"));
        assert!(lines[3].contains("offline"));
    }

    #[test]
    fn test_set_presence() {
        let (mut board, _clock) = setup_test_board();
        set_presence(&mut board, 3, "online").unwrap();
        assert_eq!(board.member(3).unwrap().status, Presence::Online);
        assert_eq!(board.stats().online_members, 3);
    }

    #[test]
    fn test_set_presence_invalid() {
        let (mut board, _clock) = setup_test_board();
        assert!(set_presence(&mut board, 3, "busy").is_err());
        assert!(set_presence(&mut board, 9, "away").is_err());
    }
}
