//! Serializable image of a whole board, used for seeding and export.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{BoardError, Result};
use crate::models::{Activity, MemberId, Task, TeamMember};

pub const SNAPSHOT_VERSION: i32 = 1;

const SAMPLE_BOARD: &str = include_str!("../resources/sample_board.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub version: i32,
    pub exported_at: DateTime<Utc>,
    pub current_user: MemberId,
    pub members: Vec<TeamMember>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Newest first.
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl BoardSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: BoardSnapshot = serde_json::from_str(json).map_err(|e| {
            warn!(error = %e, "rejected board snapshot");
            BoardError::InvariantViolation(format!("unreadable snapshot: {}", e))
        })?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BoardError::InvariantViolation(format!("cannot serialize board: {}", e)))
    }

    /// The demo board: four team members and five tasks spread over every column.
    pub fn sample() -> Result<Self> {
        Self::from_json(SAMPLE_BOARD)
    }

    /// Checks every cross-reference and ordering rule a live board relies on.
    pub fn validate(&self) -> Result<()> {
        let result = self.check();
        if let Err(e) = &result {
            warn!(error = %e, "board snapshot failed validation");
        }
        result
    }

    fn check(&self) -> Result<()> {
        if self.version > SNAPSHOT_VERSION {
            return Err(violation(format!(
                "snapshot version {} is newer than supported version {}",
                self.version, SNAPSHOT_VERSION
            )));
        }

        let mut member_ids = HashSet::new();
        for member in &self.members {
            if !member_ids.insert(member.id) {
                return Err(violation(format!("duplicate member id {}", member.id)));
            }
            if member.productivity > 100 {
                return Err(violation(format!(
                    "member {} has productivity {} above 100",
                    member.id, member.productivity
                )));
            }
        }
        let known = |id: MemberId, what: &str, task: i64| -> Result<()> {
            if member_ids.contains(&id) {
                Ok(())
            } else {
                Err(violation(format!("task {} references unknown {} {}", task, what, id)))
            }
        };

        if !member_ids.contains(&self.current_user) {
            return Err(violation(format!("current user {} is not on the team", self.current_user)));
        }

        let mut task_ids = HashSet::new();
        let mut comment_ids = HashSet::new();
        for task in &self.tasks {
            if !task_ids.insert(task.id) {
                return Err(violation(format!("duplicate task id {}", task.id)));
            }
            if task.title.trim().is_empty() {
                return Err(violation(format!("task {} has an empty title", task.id)));
            }
            if task.updated_at < task.created_at {
                return Err(violation(format!("task {} was updated before it was created", task.id)));
            }
            for hours in [task.estimated_hours, task.actual_hours] {
                if !hours.is_finite() || hours < 0.0 {
                    return Err(violation(format!("task {} has invalid hours {}", task.id, hours)));
                }
            }
            known(task.assignee, "assignee", task.id)?;
            known(task.created_by, "creator", task.id)?;
            if let Some(editor) = task.last_edited_by {
                known(editor, "editor", task.id)?;
            }
            for watcher in &task.watchers {
                known(*watcher, "watcher", task.id)?;
            }

            let mut subtask_ids = HashSet::new();
            for subtask in &task.subtasks {
                if !subtask_ids.insert(subtask.id) {
                    return Err(violation(format!(
                        "task {} has duplicate subtask id {}",
                        task.id, subtask.id
                    )));
                }
            }

            for comment in &task.comments {
                if !comment_ids.insert(comment.id) {
                    return Err(violation(format!("duplicate comment id {}", comment.id)));
                }
                if comment.task_id != task.id {
                    return Err(violation(format!(
                        "comment {} points at task {} but lives on task {}",
                        comment.id, comment.task_id, task.id
                    )));
                }
                known(comment.author, "comment author", task.id)?;
            }
        }

        let mut activity_ids = HashSet::new();
        for activity in &self.activities {
            if !activity_ids.insert(activity.id) {
                return Err(violation(format!("duplicate activity id {}", activity.id)));
            }
        }

        Ok(())
    }
}

fn violation(message: String) -> BoardError {
    BoardError::InvariantViolation(message)
}
