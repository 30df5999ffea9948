use anyhow::Result;

use kanban::Board;

/// Comments as `author`, or as the current user when unset.
pub fn run(board: &mut Board, task_id: i64, text: &str, author: Option<i64>) -> Result<()> {
    let author = author.unwrap_or_else(|| board.current_user_id());
    let id = board.add_comment(task_id, text, author)?;

    let mentioned: Vec<String> = board
        .task(task_id)
        .and_then(|t| t.comments.iter().find(|c| c.id == id))
        .map(|c| {
            c.mentions
                .iter()
                .filter_map(|m| board.member(*m))
                .map(|m| m.name.clone())
                .collect()
        })
        .unwrap_or_default();

    if mentioned.is_empty() {
        println!("Added comment to task #{}", task_id);
    } else {
        println!(
            "Added comment to task #{} (mentions {})",
            task_id,
            mentioned.join(", ")
        );
    }
    Ok(())
}
