use anyhow::{bail, Result};
use clap::Args;

use kanban::models::{parse_due_date, parse_tags};
use kanban::{Board, Priority, TaskUpdate};

#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// Task ID
    pub id: i64,
    /// New title
    #[arg(short, long)]
    pub title: Option<String>,
    /// New description
    #[arg(short, long)]
    pub description: Option<String>,
    /// New priority
    #[arg(short, long)]
    pub priority: Option<String>,
    /// New assignee member ID
    #[arg(short, long)]
    pub assignee: Option<i64>,
    /// New due date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "clear_due")]
    pub due: Option<String>,
    /// Remove the due date
    #[arg(long)]
    pub clear_due: bool,
    /// Estimated hours
    #[arg(short, long)]
    pub estimate: Option<f64>,
    /// Hours actually spent
    #[arg(long)]
    pub actual: Option<f64>,
    /// Comma separated tags, replacing the current ones
    #[arg(long)]
    pub tags: Option<String>,
}

impl EditArgs {
    fn to_update(&self) -> Result<TaskUpdate> {
        let due_date = if self.clear_due {
            Some(None)
        } else {
            self.due.as_deref().map(parse_due_date).transpose()?.map(Some)
        };
        Ok(TaskUpdate {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority.as_deref().map(str::parse::<Priority>).transpose()?,
            assignee: self.assignee,
            due_date,
            estimated_hours: self.estimate,
            actual_hours: self.actual,
            tags: self.tags.as_deref().map(parse_tags),
        })
    }
}

pub fn run(board: &mut Board, args: &EditArgs) -> Result<()> {
    let update = args.to_update()?;
    if update.is_empty() {
        bail!("Nothing to update. Use --title, --description, --priority, --assignee, --due, --estimate, --actual or --tags");
    }
    board.update_task(args.id, update)?;
    println!("Updated task #{}", args.id);
    Ok(())
}
