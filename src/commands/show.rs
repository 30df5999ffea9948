use anyhow::{bail, Result};
use std::fmt::Write;

use kanban::format::{format_due_date, format_time_ago};
use kanban::Board;

pub fn run(board: &Board, id: i64) -> Result<()> {
    print!("{}", render(board, id)?);
    Ok(())
}

pub fn render(board: &Board, id: i64) -> Result<String> {
    let task = match board.task(id) {
        Some(t) => t,
        None => bail!("Task #{} not found", id),
    };
    let now = board.now();
    let today = now.date_naive();
    let name_of = |member_id: i64| {
        board
            .member(member_id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| format!("#{}", member_id))
    };

    let mut out = String::new();
    let star = if task.is_favorite { " *" } else { "" };
    let _ = writeln!(out, "Task #{}: {}{}", task.id, task.title, star);
    let _ = writeln!(out, "Status: {}", task.status.column_title());
    let _ = writeln!(out, "Priority: {}", task.priority);
    let _ = writeln!(out, "Assignee: {}", name_of(task.assignee));
    if let Some(due) = task.due_date {
        let overdue = if task.is_overdue(today) { " (overdue)" } else { "" };
        let _ = writeln!(out, "Due: {}{}", format_due_date(due, today), overdue);
    }
    let _ = writeln!(
        out,
        "Hours: {} estimated, {} logged",
        task.estimated_hours, task.actual_hours
    );
    let _ = writeln!(out, "Created: {} by {}", task.created_at.format("%Y-%m-%d %H:%M:%S"), name_of(task.created_by));
    let _ = write!(out, "Updated: {}", task.updated_at.format("%Y-%m-%d %H:%M:%S"));
    if let Some(editor) = task.last_edited_by {
        let _ = write!(out, " by {}", name_of(editor));
    }
    out.push('\n');

    if !task.tags.is_empty() {
        let _ = writeln!(out, "Tags: {}", task.tags.join(", "));
    }
    if !task.watchers.is_empty() {
        let watchers: Vec<String> = task.watchers.iter().map(|w| name_of(*w)).collect();
        let _ = writeln!(out, "Watchers: {}", watchers.join(", "));
    }

    if !task.description.is_empty() {
        let _ = writeln!(out, "\nDescription:");
        for line in task.description.lines() {
            let _ = writeln!(out, "  {}", line);
        }
    }

    if let Some(progress) = task.progress() {
        let (completed, total) = task.subtask_counts();
        let _ = writeln!(
            out,
            "\nSubtasks ({}/{}, {:.0}%):",
            completed,
            total,
            progress * 100.0
        );
        for subtask in &task.subtasks {
            let mark = if subtask.completed { "x" } else { " " };
            let _ = writeln!(out, "  [{}] {}. {}", mark, subtask.id, subtask.title);
        }
    }

    if task.comments.is_empty() {
        let _ = writeln!(out, "\nNo comments yet");
    } else {
        let _ = writeln!(out, "\nComments:");
        for comment in &task.comments {
            let _ = writeln!(
                out,
                "  {} ({}): {}",
                name_of(comment.author),
                format_time_ago(comment.timestamp, now),
                comment.content
            );
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::setup_test_board;

    #[test]
    fn test_show_task_details() {
        let (board, _clock) = setup_test_board();
        let out = render(&board, 3).unwrap();
        assert!(out.starts_with("Task #3: Implement user authentication\n"));
        assert!(out.contains("Status: In Progress"));
        assert!(out.contains("Assignee: Alex Chen"));
        assert!(out.contains("by Sarah Johnson"));
        assert!(out.contains("Subtasks ("));
        assert!(out.contains("Sarah Johnson ("));
    }

    #[test]
    fn test_show_favorite_marker() {
        let (board, _clock) = setup_test_board();
        let out = render(&board, 1).unwrap();
        assert!(out.starts_with("Task #1: Design new landing page *"));
        assert!(out.contains("Subtasks (1/3, 33%):"));
        assert!(out.contains("  [x] 1. Create wireframes"));
    }

    #[test]
    fn test_show_task_without_comments() {
        let (board, _clock) = setup_test_board();
        let out = render(&board, 2).unwrap();
        assert!(out.contains("No comments yet"));
        assert!(!out.contains("Subtasks"));
    }

    #[test]
    fn test_show_nonexistent() {
        let (board, _clock) = setup_test_board();
        let result = render(&board, 99999);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }
}
