//! Error types for the board core.

use thiserror::Error;

use crate::models::{MemberId, NotificationId, SubtaskId, TaskId};

/// Every failure a board command can report.
///
/// Not-found errors never leave the board half-mutated, so callers may treat
/// them as a no-op and simply surface the message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    #[error("Task #{0} not found")]
    TaskNotFound(TaskId),

    #[error("Subtask #{subtask_id} not found in task #{task_id}")]
    SubtaskNotFound { task_id: TaskId, subtask_id: SubtaskId },

    #[error("Team member #{0} not found")]
    MemberNotFound(MemberId),

    #[error("Notification #{0} not found")]
    NotificationNotFound(NotificationId),

    #[error("No task is being dragged")]
    NothingDragged,

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl BoardError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TaskNotFound(_)
                | Self::SubtaskNotFound { .. }
                | Self::MemberNotFound(_)
                | Self::NotificationNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;
