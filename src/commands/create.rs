use anyhow::Result;
use clap::Args;

use kanban::models::{parse_due_date, parse_tags};
use kanban::{Board, NewTask, Priority};

#[derive(Args, Debug, Default)]
pub struct CreateArgs {
    /// Task title
    pub title: String,
    /// Task description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Priority (low, medium, high)
    #[arg(short, long, default_value = "medium")]
    pub priority: String,
    /// Assignee member ID (defaults to you)
    #[arg(short, long)]
    pub assignee: Option<i64>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
    /// Estimated hours
    #[arg(short, long)]
    pub estimate: Option<f64>,
    /// Comma separated tags
    #[arg(short, long)]
    pub tags: Option<String>,
}

pub fn run(board: &mut Board, args: &CreateArgs) -> Result<i64> {
    let priority: Priority = args.priority.parse()?;
    let due_date = args.due.as_deref().map(parse_due_date).transpose()?;

    let id = board.create_task(NewTask {
        title: args.title.clone(),
        description: args.description.clone().unwrap_or_default(),
        priority,
        assignee: args.assignee,
        due_date,
        estimated_hours: args.estimate.unwrap_or(0.0),
        tags: args.tags.as_deref().map(parse_tags).unwrap_or_default(),
    })?;
    println!("Created task #{}", id);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::setup_test_board;
    use chrono::NaiveDate;
    use kanban::Status;
    use proptest::prelude::*;

    fn args(title: &str) -> CreateArgs {
        CreateArgs {
            title: title.to_string(),
            priority: "medium".to_string(),
            ..CreateArgs::default()
        }
    }

    // ==================== Unit Tests ====================

    #[test]
    fn test_create_with_all_fields() {
        let (mut board, _clock) = setup_test_board();
        let id = run(
            &mut board,
            &CreateArgs {
                description: Some("Write the onboarding guide".to_string()),
                priority: "high".to_string(),
                assignee: Some(2),
                due: Some("2024-02-01".to_string()),
                estimate: Some(6.0),
                tags: Some("docs, onboarding".to_string()),
                ..args("Onboarding docs")
            },
        )
        .unwrap();

        let task = board.task(id).unwrap();
        assert_eq!(task.status, Status::Todo);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.assignee, 2);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(task.estimated_hours, 6.0);
        assert_eq!(task.tags, vec!["docs", "onboarding"]);
    }

    #[test]
    fn test_create_invalid_priority() {
        let (mut board, _clock) = setup_test_board();
        let result = run(
            &mut board,
            &CreateArgs {
                priority: "critical".to_string(),
                ..args("Test")
            },
        );
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Must be one of"));
        assert_eq!(board.tasks().len(), 5);
    }

    #[test]
    fn test_create_malformed_due_date() {
        let (mut board, _clock) = setup_test_board();
        let result = run(
            &mut board,
            &CreateArgs {
                due: Some("next week".to_string()),
                ..args("Test")
            },
        );
        assert!(result.unwrap_err().to_string().contains("malformed due date"));
    }

    #[test]
    fn test_create_empty_title() {
        let (mut board, _clock) = setup_test_board();
        assert!(run(&mut board, &args("  ")).is_err());
    }

    proptest! {
        #[test]
        fn prop_create_keeps_trimmed_title(title in "[a-zA-Z0-9]{1,20}( [a-zA-Z0-9]{1,20}){0,3}") {
            let (mut board, _clock) = setup_test_board();
            let id = run(&mut board, &args(&format!("  {}  ", title))).unwrap();
            prop_assert_eq!(&board.task(id).unwrap().title, &title);
        }
    }
}
