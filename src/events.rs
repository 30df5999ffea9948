use crate::models::{NotificationId, Status, TaskId};
use crate::simulation::ConnectionStatus;

/// Change notifications queued for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    TaskCreated(TaskId),
    TaskUpdated(TaskId),
    TaskMoved { id: TaskId, from: Status, to: Status },
    TaskDeleted(TaskId),
    NotificationAdded(NotificationId),
    NotificationRead(NotificationId),
    NotificationRemoved(NotificationId),
    ConnectionChanged(ConnectionStatus),
}
