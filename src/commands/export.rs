use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};

use kanban::format::format_due_date;
use kanban::models::Task;
use kanban::{Board, Status};

pub fn run_json(board: &Board, output_path: Option<&str>) -> Result<()> {
    let snapshot = board.snapshot();
    let json = snapshot.to_json_pretty()?;

    match output_path {
        Some(path) => {
            fs::write(path, json).context("Failed to write export file")?;
            eprintln!("Exported {} tasks to {}", snapshot.tasks.len(), path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }
    Ok(())
}

pub fn run_markdown(board: &Board, output_path: Option<&str>) -> Result<()> {
    let md = render_markdown(board);

    match output_path {
        Some(path) => {
            fs::write(path, md).context("Failed to write export file")?;
            eprintln!("Exported {} tasks to {}", board.tasks().len(), path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", md)?;
        }
    }
    Ok(())
}

fn render_markdown(board: &Board) -> String {
    let mut md = String::new();

    md.push_str("# Kanban Board Export\n\n");
    md.push_str(&format!(
        "Exported: {}\n\n",
        board.now().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    for status in Status::ALL {
        let tasks: Vec<&Task> = board.tasks().iter().filter(|t| t.status == status).collect();
        if tasks.is_empty() {
            continue;
        }
        md.push_str(&format!("## {}\n\n", status.column_title()));
        for task in tasks {
            write_task_md(&mut md, board, task);
        }
    }
    md
}

fn write_task_md(md: &mut String, board: &Board, task: &Task) {
    let checkbox = if task.status == Status::Done {
        "[x]"
    } else {
        "[ ]"
    };
    let star = if task.is_favorite { " (starred)" } else { "" };

    md.push_str(&format!(
        "### {} #{}: {}{}\n\n",
        checkbox, task.id, task.title, star
    ));
    md.push_str(&format!("- **Priority:** {}\n", task.priority));
    md.push_str(&format!("- **Status:** {}\n", task.status));

    if let Some(assignee) = board.member(task.assignee) {
        md.push_str(&format!("- **Assignee:** {}\n", assignee.name));
    }
    if let Some(due) = task.due_date {
        let today = board.now().date_naive();
        md.push_str(&format!("- **Due:** {}\n", format_due_date(due, today)));
    }
    if !task.tags.is_empty() {
        md.push_str(&format!("- **Tags:** {}\n", task.tags.join(", ")));
    }
    if task.estimated_hours > 0.0 || task.actual_hours > 0.0 {
        md.push_str(&format!(
            "- **Hours:** {} / {}\n",
            task.actual_hours, task.estimated_hours
        ));
    }

    md.push_str(&format!(
        "- **Created:** {}\n",
        task.created_at.format("%Y-%m-%d")
    ));

    if !task.description.is_empty() {
        md.push_str(&format!("\n{}\n", task.description));
    }

    if !task.subtasks.is_empty() {
        md.push_str("\n**Subtasks:**\n");
        for subtask in &task.subtasks {
            let mark = if subtask.completed { "x" } else { " " };
            md.push_str(&format!("- [{}] {}\n", mark, subtask.title));
        }
    }

    if !task.comments.is_empty() {
        md.push_str("\n**Comments:**\n");
        for comment in &task.comments {
            let author = board
                .member(comment.author)
                .map(|m| m.name.as_str())
                .unwrap_or("Unknown");
            md.push_str(&format!(
                "- [{}] {}: {}\n",
                comment.timestamp.format("%Y-%m-%d %H:%M"),
                author,
                comment.content
            ));
        }
    }

    md.push_str("\n---\n\n");
}
