//! The board store: the single owner of tasks, team, feed and timers.
//!
//! Every mutation goes through a method here and runs to completion before
//! the next one. Unknown ids never mutate anything.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::events::BoardEvent;
use crate::feed::{ActivityLog, NotificationFeed};
use crate::filter::{self, FilterState};
use crate::models::{
    Activity, ActivityKind, Comment, CommentId, MemberId, NewTask, Notification, NotificationId,
    NotificationKind, Presence, Status, SubtaskId, Subtask, Task, TaskId, TaskUpdate, TeamMember,
};
use crate::scheduler::{Scheduler, Timer};
use crate::simulation::{ConnectionStatus, EventSource, SimulatedEvent, SimulationContext, Trigger};
use crate::snapshot::{BoardSnapshot, SNAPSHOT_VERSION};

/// Monotonic id source for one collection.
#[derive(Debug, Default, Clone, Copy)]
struct Sequence {
    last: i64,
}

impl Sequence {
    fn starting_after(last: i64) -> Self {
        Self { last: last.max(0) }
    }

    fn next(&mut self, collection: &str) -> Result<i64> {
        let next = self.last.checked_add(1).ok_or_else(|| {
            warn!(collection, last = self.last, "id sequence exhausted");
            BoardError::InvariantViolation(format!("no {} ids left after {}", collection, self.last))
        })?;
        self.last = next;
        Ok(next)
    }
}

#[derive(Debug, Default)]
struct IdSequences {
    task: Sequence,
    comment: Sequence,
    notification: Sequence,
    activity: Sequence,
}

/// Unfiltered totals for the board header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardStats {
    pub total: usize,
    pub per_status: [(Status, usize); 4],
    pub favorites: usize,
    pub online_members: usize,
}

pub struct Board {
    tasks: Vec<Task>,
    members: Vec<TeamMember>,
    current_user: MemberId,
    filters: FilterState,
    notifications: NotificationFeed,
    activities: ActivityLog,
    scheduler: Scheduler,
    events: Vec<BoardEvent>,
    ids: IdSequences,
    clock: Box<dyn Clock>,
    config: BoardConfig,
    connection: ConnectionStatus,
    dragged: Option<TaskId>,
    simulation: Option<Box<dyn EventSource>>,
    simulated_updates: u32,
}

impl Board {
    /// An empty board for the given team.
    pub fn new(
        members: Vec<TeamMember>,
        current_user: MemberId,
        clock: Box<dyn Clock>,
        config: BoardConfig,
    ) -> Result<Self> {
        let snapshot = BoardSnapshot {
            version: SNAPSHOT_VERSION,
            exported_at: clock.now(),
            current_user,
            members,
            tasks: Vec::new(),
            activities: Vec::new(),
        };
        Self::from_snapshot(snapshot, clock, config)
    }

    pub fn with_sample_data(clock: Box<dyn Clock>, config: BoardConfig) -> Result<Self> {
        Self::from_snapshot(BoardSnapshot::sample()?, clock, config)
    }

    pub fn from_snapshot(
        snapshot: BoardSnapshot,
        clock: Box<dyn Clock>,
        config: BoardConfig,
    ) -> Result<Self> {
        config.validate()?;
        snapshot.validate()?;

        let max_task = snapshot.tasks.iter().map(|t| t.id).max().unwrap_or(0);
        let max_comment = snapshot
            .tasks
            .iter()
            .flat_map(|t| t.comments.iter().map(|c| c.id))
            .max()
            .unwrap_or(0);
        let max_activity = snapshot.activities.iter().map(|a| a.id).max().unwrap_or(0);

        info!(
            tasks = snapshot.tasks.len(),
            members = snapshot.members.len(),
            "board loaded"
        );

        Ok(Self {
            tasks: snapshot.tasks,
            members: snapshot.members,
            current_user: snapshot.current_user,
            filters: FilterState::default(),
            notifications: NotificationFeed::new(),
            activities: ActivityLog::from_entries(snapshot.activities),
            scheduler: Scheduler::new(),
            events: Vec::new(),
            ids: IdSequences {
                task: Sequence::starting_after(max_task),
                comment: Sequence::starting_after(max_comment),
                notification: Sequence::default(),
                activity: Sequence::starting_after(max_activity),
            },
            clock,
            config,
            connection: ConnectionStatus::default(),
            dragged: None,
            simulation: None,
            simulated_updates: 0,
        })
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            version: SNAPSHOT_VERSION,
            exported_at: self.now(),
            current_user: self.current_user,
            members: self.members.clone(),
            tasks: self.tasks.clone(),
            activities: self.activities.iter().cloned().collect(),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    // Queries

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    pub fn member(&self, id: MemberId) -> Option<&TeamMember> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn current_user_id(&self) -> MemberId {
        self.current_user
    }

    pub fn get_filtered_tasks(&self, state: &FilterState) -> Vec<&Task> {
        filter::filter(&self.tasks, state)
    }

    /// Tasks that pass the board's own filters.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.get_filtered_tasks(&self.filters)
    }

    pub fn column(&self, status: Status) -> Vec<&Task> {
        filter::column(&self.tasks, &self.filters, status)
    }

    pub fn column_counts(&self, state: &FilterState) -> [(Status, usize); 4] {
        Status::ALL.map(|status| (status, filter::column(&self.tasks, state, status).len()))
    }

    pub fn stats(&self) -> BoardStats {
        BoardStats {
            total: self.tasks.len(),
            per_status: self.column_counts(&FilterState::default()),
            favorites: self.tasks.iter().filter(|t| t.is_favorite).count(),
            online_members: self
                .members
                .iter()
                .filter(|m| m.status == Presence::Online)
                .count(),
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn notifications(&self) -> Vec<&Notification> {
        self.notifications.live(self.now()).collect()
    }

    /// The few most recent notifications a view should render.
    pub fn visible_notifications(&self) -> Vec<&Notification> {
        self.notifications
            .visible(self.now(), self.config.visible_notifications)
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.unread_count(self.now())
    }

    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter()
    }

    pub fn connection(&self) -> ConnectionStatus {
        self.connection
    }

    pub fn simulated_updates(&self) -> u32 {
        self.simulated_updates
    }

    pub fn dragged_task(&self) -> Option<TaskId> {
        self.dragged
    }

    /// Hands every queued event to the caller, oldest first.
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    // Task commands

    pub fn create_task(&mut self, fields: NewTask) -> Result<TaskId> {
        let title = validate_title(&fields.title)?;
        validate_hours("estimated hours", fields.estimated_hours)?;
        let assignee = fields.assignee.unwrap_or(self.current_user);
        self.require_member(assignee)?;

        let now = self.now();
        let id = self.ids.task.next("task")?;
        let task = Task {
            id,
            title,
            description: fields.description.trim().to_string(),
            status: Status::Todo,
            priority: fields.priority,
            assignee,
            due_date: fields.due_date,
            tags: clean_tags(fields.tags),
            comments: Vec::new(),
            watchers: BTreeSet::from([self.current_user]),
            created_by: self.current_user,
            created_at: now,
            updated_at: now,
            last_edited_by: None,
            estimated_hours: fields.estimated_hours,
            actual_hours: 0.0,
            is_favorite: false,
            subtasks: Vec::new(),
        };
        info!(task_id = id, title = %task.title, "task created");

        self.emit(BoardEvent::TaskCreated(id));
        self.notify(
            NotificationKind::Success,
            "Task created",
            format!("\"{}\" has been created successfully", task.title),
        );
        self.record(ActivityKind::TaskCreated, self.current_user, &task, "created a new task");
        self.tasks.push(task);
        Ok(id)
    }

    pub fn update_task(&mut self, id: TaskId, update: TaskUpdate) -> Result<()> {
        let index = self.task_index(id)?;
        if update.is_empty() {
            return Err(BoardError::invalid("update", "nothing to update"));
        }
        let title = update.title.as_deref().map(validate_title).transpose()?;
        if let Some(hours) = update.estimated_hours {
            validate_hours("estimated hours", hours)?;
        }
        if let Some(hours) = update.actual_hours {
            validate_hours("actual hours", hours)?;
        }
        if let Some(assignee) = update.assignee {
            self.require_member(assignee)?;
        }

        let now = self.now();
        let editor = self.current_user;
        let task = &mut self.tasks[index];
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = update.description {
            task.description = description.trim().to_string();
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        if let Some(assignee) = update.assignee {
            task.assignee = assignee;
        }
        if let Some(due_date) = update.due_date {
            task.due_date = due_date;
        }
        if let Some(hours) = update.estimated_hours {
            task.estimated_hours = hours;
        }
        if let Some(hours) = update.actual_hours {
            task.actual_hours = hours;
        }
        if let Some(tags) = update.tags {
            task.tags = clean_tags(tags);
        }
        task.last_edited_by = Some(editor);
        touch(task, now);
        let task = task.clone();
        info!(task_id = id, "task updated");

        self.emit(BoardEvent::TaskUpdated(id));
        self.notify(
            NotificationKind::Info,
            "Task updated",
            format!("\"{}\" has been updated", task.title),
        );
        self.record(ActivityKind::TaskUpdated, editor, &task, "updated the task");
        Ok(())
    }

    /// Removes a task. Unknown ids are ignored and report `false`.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            debug!(task_id = id, "delete ignored, no such task");
            return false;
        };
        let task = self.tasks.remove(index);
        if self.dragged == Some(id) {
            self.dragged = None;
        }
        info!(task_id = id, "task deleted");

        self.emit(BoardEvent::TaskDeleted(id));
        self.notify(
            NotificationKind::Info,
            "Task deleted",
            format!("\"{}\" has been deleted", task.title),
        );
        self.record(ActivityKind::TaskDeleted, self.current_user, &task, "deleted a task");
        true
    }

    /// Moves a task to another column. Returns `false` when it already sits
    /// there, in which case nothing changes and no event is emitted.
    pub fn move_task(&mut self, id: TaskId, status: Status) -> Result<bool> {
        let index = self.task_index(id)?;
        let now = self.now();
        let task = &mut self.tasks[index];
        let from = task.status;
        if from == status {
            debug!(task_id = id, %status, "move ignored, already in column");
            return Ok(false);
        }
        task.status = status;
        touch(task, now);
        let task = task.clone();
        info!(task_id = id, %from, to = %status, "task moved");

        self.emit(BoardEvent::TaskMoved { id, from, to: status });
        self.notify(
            NotificationKind::Success,
            "Task moved successfully",
            format!("\"{}\" moved to {}", task.title, status),
        );
        self.record(
            ActivityKind::TaskMoved,
            self.current_user,
            &task,
            &format!("moved task to {}", status),
        );
        Ok(true)
    }

    /// Flips the favorite flag and returns the new value.
    pub fn toggle_favorite(&mut self, id: TaskId) -> Result<bool> {
        let index = self.task_index(id)?;
        let task = &mut self.tasks[index];
        task.is_favorite = !task.is_favorite;
        let (favorite, title) = (task.is_favorite, task.title.clone());
        debug!(task_id = id, favorite, "favorite toggled");

        self.emit(BoardEvent::TaskUpdated(id));
        let action = if favorite { "added to" } else { "removed from" };
        self.notify(
            NotificationKind::Info,
            "Favorites updated",
            format!("\"{}\" {} favorites", title, action),
        );
        Ok(favorite)
    }

    pub fn add_subtask(&mut self, task_id: TaskId, title: &str) -> Result<SubtaskId> {
        let title = validate_title(title)?;
        let index = self.task_index(task_id)?;
        let now = self.now();
        let task = &mut self.tasks[index];
        let id = task.next_subtask_id()?;
        task.subtasks.push(Subtask {
            id,
            title,
            completed: false,
        });
        touch(task, now);
        debug!(task_id, subtask_id = id, "subtask added");

        self.emit(BoardEvent::TaskUpdated(task_id));
        Ok(id)
    }

    /// Flips a subtask and returns its new completed value.
    pub fn toggle_subtask(&mut self, task_id: TaskId, subtask_id: SubtaskId) -> Result<bool> {
        let index = self.task_index(task_id)?;
        let now = self.now();
        let task = &mut self.tasks[index];
        let subtask = task
            .subtasks
            .iter_mut()
            .find(|s| s.id == subtask_id)
            .ok_or(BoardError::SubtaskNotFound {
                task_id,
                subtask_id,
            })?;
        subtask.completed = !subtask.completed;
        let (completed, subtask_title) = (subtask.completed, subtask.title.clone());
        touch(task, now);
        let task = task.clone();
        debug!(task_id, subtask_id, completed, "subtask toggled");

        self.emit(BoardEvent::TaskUpdated(task_id));
        let verb = if completed { "completed" } else { "reopened" };
        self.record(
            ActivityKind::SubtaskToggled,
            self.current_user,
            &task,
            &format!("{} subtask \"{}\"", verb, subtask_title),
        );
        Ok(completed)
    }

    pub fn add_comment(&mut self, task_id: TaskId, content: &str, author: MemberId) -> Result<CommentId> {
        let content = content.trim();
        if content.is_empty() {
            return Err(BoardError::invalid("comment", "must not be empty"));
        }
        let author_name = self
            .member(author)
            .map(|m| m.name.clone())
            .ok_or(BoardError::MemberNotFound(author))?;
        let index = self.task_index(task_id)?;

        let mentions = self.resolve_mentions(content);
        let now = self.now();
        let id = self.ids.comment.next("comment")?;
        let task = &mut self.tasks[index];
        task.comments.push(Comment {
            id,
            task_id,
            author,
            content: content.to_string(),
            timestamp: now,
            mentions,
        });
        touch(task, now);
        let task = task.clone();
        info!(task_id, comment_id = id, "comment added");

        self.emit(BoardEvent::TaskUpdated(task_id));
        self.notify(
            NotificationKind::Info,
            "New comment",
            format!("{} commented on \"{}\"", author_name, task.title),
        );
        self.record(ActivityKind::CommentAdded, author, &task, "commented on the task");
        Ok(id)
    }

    /// Updates a member's presence. Returns whether it changed.
    pub fn set_member_status(&mut self, id: MemberId, status: Presence) -> Result<bool> {
        let member = self
            .members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(BoardError::MemberNotFound(id))?;
        if member.status == status {
            return Ok(false);
        }
        member.status = status;
        debug!(member_id = id, %status, "presence changed");
        Ok(true)
    }

    // Drag and drop

    pub fn begin_drag(&mut self, id: TaskId) -> Result<()> {
        self.task_index(id)?;
        self.dragged = Some(id);
        Ok(())
    }

    /// Drops the dragged task onto a column. The gesture stays active until
    /// [`Board::end_drag`].
    pub fn drop_on(&mut self, status: Status) -> Result<bool> {
        let id = self.dragged.ok_or(BoardError::NothingDragged)?;
        self.move_task(id, status)
    }

    pub fn end_drag(&mut self) {
        self.dragged = None;
    }

    // Filters

    pub fn set_filters(&mut self, state: FilterState) {
        self.filters = state;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.search = search.into();
    }

    pub fn toggle_priority_filter(&mut self, priority: crate::models::Priority) -> bool {
        self.filters.toggle_priority(priority)
    }

    pub fn toggle_status_filter(&mut self, status: Status) -> bool {
        self.filters.toggle_status(status)
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    // Notifications

    /// Prepends an unread notification and schedules its expiry.
    pub fn push_notification(
        &mut self,
        kind: NotificationKind,
        title: &str,
        message: String,
    ) -> Result<NotificationId> {
        let now = self.now();
        let expires_at = now.checked_add_signed(self.config.notification_ttl).ok_or_else(|| {
            warn!(%now, "notification expiry out of range");
            BoardError::InvariantViolation(format!("notification expiry after {} is out of range", now))
        })?;
        let id = self.ids.notification.next("notification")?;
        self.notifications.push(Notification {
            id,
            kind,
            title: title.to_string(),
            message,
            timestamp: now,
            read: false,
            is_real_time: true,
            expires_at,
        });
        self.scheduler.schedule(expires_at, Timer::ExpireNotification(id));
        self.emit(BoardEvent::NotificationAdded(id));
        Ok(id)
    }

    /// Feedback for a command that already succeeded. Failures are logged and dropped.
    fn notify(&mut self, kind: NotificationKind, title: &str, message: String) {
        self.push_notification(kind, title, message).ok();
    }

    /// Marks a live notification read. `Ok(false)` if it already was.
    pub fn mark_notification_read(&mut self, id: NotificationId) -> Result<bool> {
        let now = self.now();
        match self.notifications.get(id) {
            Some(n) if !n.is_expired(now) => {}
            _ => return Err(BoardError::NotificationNotFound(id)),
        }
        let changed = self.notifications.mark_read(id);
        if changed {
            self.emit(BoardEvent::NotificationRead(id));
        }
        Ok(changed)
    }

    /// Removes a notification right away. Absent ids are a no-op.
    pub fn remove_notification(&mut self, id: NotificationId) -> bool {
        if self.notifications.remove(id).is_some() {
            self.emit(BoardEvent::NotificationRemoved(id));
            true
        } else {
            false
        }
    }

    // Timers and simulation

    /// Starts polling `source` on the configured intervals. Replaces any
    /// source already running.
    pub fn start_simulation(&mut self, source: Box<dyn EventSource>) {
        self.stop_simulation();
        let now = self.now();
        self.simulation = Some(source);
        self.scheduler.schedule(
            now + positive(self.config.activity_interval),
            Timer::Simulation(Trigger::Activity),
        );
        self.scheduler.schedule(
            now + positive(self.config.connection_interval),
            Timer::Simulation(Trigger::Connection),
        );
        info!("simulation started");
    }

    pub fn stop_simulation(&mut self) {
        if self.simulation.take().is_some() {
            info!("simulation stopped");
        }
        self.scheduler
            .cancel_where(|timer| matches!(timer, Timer::Simulation(_)));
    }

    pub fn next_timer_due(&self) -> Option<DateTime<Utc>> {
        self.scheduler.next_due()
    }

    /// Fires every timer that has come due, in due order. Returns how many fired.
    pub fn run_due_timers(&mut self) -> usize {
        let now = self.now();
        let mut fired = 0;
        while let Some((at, timer)) = self.scheduler.pop_due(now) {
            self.fire(at, timer);
            fired += 1;
        }
        fired
    }

    fn fire(&mut self, at: DateTime<Utc>, timer: Timer) {
        match timer {
            Timer::ExpireNotification(id) => {
                if self.remove_notification(id) {
                    debug!(notification_id = id, "notification expired");
                }
            }
            Timer::Reconnect(status) => {
                self.set_connection(status);
                if status == ConnectionStatus::Connecting {
                    self.scheduler.schedule(
                        at + self.config.connecting_delay,
                        Timer::Reconnect(ConnectionStatus::Connected),
                    );
                }
            }
            Timer::Simulation(trigger) => {
                let Some(mut source) = self.simulation.take() else {
                    return;
                };
                let ctx = SimulationContext {
                    task_count: self.tasks.len(),
                    member_count: self.members.len(),
                    connection: self.connection,
                };
                let event = source.next_event(trigger, &ctx);
                self.simulation = Some(source);

                let interval = match trigger {
                    Trigger::Activity => self.config.activity_interval,
                    Trigger::Connection => self.config.connection_interval,
                };
                self.scheduler
                    .schedule(at + positive(interval), Timer::Simulation(trigger));

                if let Some(event) = event {
                    self.apply_simulated(at, event);
                }
            }
        }
    }

    fn apply_simulated(&mut self, at: DateTime<Utc>, event: SimulatedEvent) {
        match event {
            SimulatedEvent::TaskUpdated { member, task } => {
                let Some((name, title)) = self.simulation_subjects(member, task) else {
                    return;
                };
                self.notify(
                    NotificationKind::Info,
                    "Task Updated",
                    format!("{} updated \"{}\"", name, title),
                );
                self.simulated_updates += 1;
            }
            SimulatedEvent::CommentAdded { member, task } => {
                let Some((name, title)) = self.simulation_subjects(member, task) else {
                    return;
                };
                self.notify(
                    NotificationKind::Info,
                    "New Comment",
                    format!("{} commented on \"{}\"", name, title),
                );
                self.simulated_updates += 1;
            }
            SimulatedEvent::MemberOnline { member } => {
                let Some(member) = self.members.get_mut(member) else {
                    debug!(member, "simulated member out of range");
                    return;
                };
                member.status = Presence::Online;
                let name = member.name.clone();
                self.notify(
                    NotificationKind::Success,
                    "User Online",
                    format!("{} is now online", name),
                );
                self.simulated_updates += 1;
            }
            SimulatedEvent::ConnectionChanged(status) => {
                self.set_connection(status);
                if status == ConnectionStatus::Disconnected {
                    self.scheduler.schedule(
                        at + self.config.reconnect_delay,
                        Timer::Reconnect(ConnectionStatus::Connecting),
                    );
                }
            }
        }
    }

    fn simulation_subjects(&self, member: usize, task: usize) -> Option<(String, String)> {
        match (self.members.get(member), self.tasks.get(task)) {
            (Some(m), Some(t)) => Some((m.name.clone(), t.title.clone())),
            _ => {
                debug!(member, task, "simulated event refers to nothing");
                None
            }
        }
    }

    fn set_connection(&mut self, status: ConnectionStatus) {
        if self.connection == status {
            return;
        }
        info!(from = %self.connection, to = %status, "connection status changed");
        self.connection = status;
        self.emit(BoardEvent::ConnectionChanged(status));
    }

    // Helpers

    fn task_index(&self, id: TaskId) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(BoardError::TaskNotFound(id))
    }

    fn require_member(&self, id: MemberId) -> Result<()> {
        match self.member(id) {
            Some(_) => Ok(()),
            None => Err(BoardError::MemberNotFound(id)),
        }
    }

    fn emit(&mut self, event: BoardEvent) {
        self.events.push(event);
    }

    fn record(&mut self, kind: ActivityKind, author: MemberId, task: &Task, description: &str) {
        let Ok(id) = self.ids.activity.next("activity") else {
            return;
        };
        self.activities.record(Activity {
            id,
            kind,
            author,
            task_id: task.id,
            task_title: task.title.clone(),
            timestamp: self.now(),
            description: description.to_string(),
        });
    }

    /// Member ids named by `@initials` or `@firstname` tokens.
    fn resolve_mentions(&self, content: &str) -> BTreeSet<MemberId> {
        content
            .split_whitespace()
            .filter_map(|word| word.strip_prefix('@'))
            .map(|token| token.trim_end_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
            .filter(|token| !token.is_empty())
            .filter_map(|token| {
                self.members
                    .iter()
                    .find(|m| {
                        m.initials.to_lowercase() == token || m.first_name().to_lowercase() == token
                    })
                    .map(|m| m.id)
            })
            .collect()
    }
}

fn validate_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        warn!("rejected empty title");
        return Err(BoardError::invalid("title", "must not be empty"));
    }
    Ok(title.to_string())
}

fn validate_hours(field: &'static str, hours: f64) -> Result<()> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(BoardError::invalid(field, format!("{} is not a non-negative number", hours)));
    }
    Ok(())
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Keeps `updated_at >= created_at` even if the clock runs backwards.
fn touch(task: &mut Task, now: DateTime<Utc>) {
    task.updated_at = now.max(task.created_at);
}

fn positive(interval: Duration) -> Duration {
    interval.max(Duration::milliseconds(1))
}
