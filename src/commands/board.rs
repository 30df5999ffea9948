use anyhow::Result;
use std::fmt::Write;

use kanban::format::{format_due_date, truncate};
use kanban::models::Task;
use kanban::{Board, Status};

pub fn run(board: &Board) -> Result<()> {
    print!("{}", render(board));
    Ok(())
}

pub fn render(board: &Board) -> String {
    let mut out = String::new();
    let stats = board.stats();
    let today = board.now().date_naive();

    let _ = writeln!(
        out,
        "Kanban Board [{}]  {} tasks, {} starred, {} online, {} unread",
        board.connection().label(),
        stats.total,
        stats.favorites,
        stats.online_members,
        board.unread_count()
    );
    let totals: Vec<String> = stats
        .per_status
        .iter()
        .map(|(status, count)| format!("{}: {}", status.column_title(), count))
        .collect();
    let _ = writeln!(out, "{}", totals.join("  "));

    let filters = board.filters();
    if !filters.is_empty() {
        let _ = writeln!(out, "Filters: {}", describe_filters(board));
    }

    for status in Status::ALL {
        let tasks = board.column(status);
        let _ = writeln!(out, "\n== {} ({}) ==", status.column_title(), tasks.len());
        if tasks.is_empty() {
            let _ = writeln!(out, "  (empty)");
        }
        for task in tasks {
            let _ = writeln!(out, "{}", task_line(board, task, today));
        }
    }
    out
}

fn task_line(board: &Board, task: &Task, today: chrono::NaiveDate) -> String {
    let star = if task.is_favorite { "*" } else { " " };
    let initials = board
        .member(task.assignee)
        .map(|m| m.initials.as_str())
        .unwrap_or("??");
    let mut line = format!(
        "  #{:<4}{} {:<8} {:<36} {:<3}",
        task.id,
        star,
        format!("[{}]", task.priority),
        truncate(&task.title, 36),
        initials
    );
    if let Some(due) = task.due_date {
        let _ = write!(line, " due {}", format_due_date(due, today));
        if task.is_overdue(today) {
            line.push_str(" (overdue)");
        }
    }
    let (completed, total) = task.subtask_counts();
    if total > 0 {
        let _ = write!(line, " {}/{}", completed, total);
    }
    if !task.comments.is_empty() {
        let _ = write!(line, " [{} comments]", task.comments.len());
    }
    line.trim_end().to_string()
}

pub fn describe_filters(board: &Board) -> String {
    let filters = board.filters();
    let mut parts = Vec::new();
    if !filters.search.is_empty() {
        parts.push(format!("search \"{}\"", filters.search));
    }
    if !filters.priority.is_empty() {
        let names: Vec<&str> = filters.priority.iter().map(|p| p.as_str()).collect();
        parts.push(format!("priority {}", names.join(",")));
    }
    if !filters.status.is_empty() {
        let names: Vec<&str> = filters.status.iter().map(|s| s.as_str()).collect();
        parts.push(format!("status {}", names.join(",")));
    }
    if parts.is_empty() {
        "(none)".to_string()
    } else {
        parts.join("; ")
    }
}
