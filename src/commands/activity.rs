use anyhow::Result;

use kanban::format::format_time_ago;
use kanban::Board;

pub fn run(board: &Board, limit: usize) -> Result<()> {
    let lines = render(board, limit);
    if lines.is_empty() {
        println!("No activity yet.");
    }
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

pub fn render(board: &Board, limit: usize) -> Vec<String> {
    let now = board.now();
    board
        .activities()
        .take(limit)
        .map(|a| {
            let author = board
                .member(a.author)
                .map(|m| m.name.as_str())
                .unwrap_or("Someone");
            format!(
                "{} {} \"{}\" ({})",
                author,
                a.description,
                a.task_title,
                format_time_ago(a.timestamp, now)
            )
        })
        .collect()
}
