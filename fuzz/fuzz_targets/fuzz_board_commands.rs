#![no_main]

//! Fuzz target for arbitrary command sequences against one board.
//!
//! No command may panic, and the board must keep its invariants after every
//! step: unique task ids, updatedAt never before createdAt, and a snapshot
//! that passes validation.

use arbitrary::Arbitrary;
use chrono::{Duration, TimeZone, Utc};
use libfuzzer_sys::fuzz_target;

use kanban::models::{NotificationKind, Presence};
use kanban::simulation::{SimulatedEvent, Trigger};
use kanban::{
    Board, BoardConfig, ConnectionStatus, ManualClock, NewTask, Priority, ScriptedEventSource,
    Status, TaskUpdate,
};

#[derive(Arbitrary, Debug)]
enum Command {
    Create { title: String, priority: u8, hours: f64 },
    Update { id: i64, title: Option<String>, hours: Option<f64> },
    Delete { id: i64 },
    Move { id: i64, status: u8 },
    Favorite { id: i64 },
    AddSubtask { id: i64, title: String },
    ToggleSubtask { id: i64, subtask: i64 },
    Comment { id: i64, text: String, author: i64 },
    Presence { member: i64, status: u8 },
    Drag { id: i64 },
    Drop { status: u8 },
    EndDrag,
    Notify { title: String },
    Read { id: i64 },
    Dismiss { id: i64 },
    Advance { millis: u16 },
    RewindClock { millis: u16 },
}

fuzz_target!(|commands: Vec<Command>| {
    let Some(start) = Utc.with_ymd_and_hms(2024, 1, 12, 9, 0, 0).single() else {
        return;
    };
    let clock = ManualClock::new(start);
    let Ok(mut board) = Board::with_sample_data(Box::new(clock.clone()), BoardConfig::default())
    else {
        return;
    };
    board.start_simulation(Box::new(
        ScriptedEventSource::new()
            .then(Trigger::Activity, Some(SimulatedEvent::CommentAdded { member: 9, task: 0 }))
            .then(
                Trigger::Connection,
                Some(SimulatedEvent::ConnectionChanged(ConnectionStatus::Disconnected)),
            ),
    ));

    for command in commands.into_iter().take(200) {
        match command {
            Command::Create { title, priority, hours } => {
                let _ = board.create_task(NewTask {
                    title,
                    priority: Priority::ALL[priority as usize % 3],
                    estimated_hours: hours,
                    ..NewTask::default()
                });
            }
            Command::Update { id, title, hours } => {
                let _ = board.update_task(
                    id,
                    TaskUpdate {
                        title,
                        actual_hours: hours,
                        ..TaskUpdate::default()
                    },
                );
            }
            Command::Delete { id } => {
                board.delete_task(id);
            }
            Command::Move { id, status } => {
                let _ = board.move_task(id, Status::ALL[status as usize % 4]);
            }
            Command::Favorite { id } => {
                let _ = board.toggle_favorite(id);
            }
            Command::AddSubtask { id, title } => {
                let _ = board.add_subtask(id, &title);
            }
            Command::ToggleSubtask { id, subtask } => {
                let _ = board.toggle_subtask(id, subtask);
            }
            Command::Comment { id, text, author } => {
                let _ = board.add_comment(id, &text, author);
            }
            Command::Presence { member, status } => {
                let presence = [Presence::Online, Presence::Away, Presence::Offline];
                let _ = board.set_member_status(member, presence[status as usize % 3]);
            }
            Command::Drag { id } => {
                let _ = board.begin_drag(id);
            }
            Command::Drop { status } => {
                let _ = board.drop_on(Status::ALL[status as usize % 4]);
            }
            Command::EndDrag => board.end_drag(),
            Command::Notify { title } => {
                board.push_notification(NotificationKind::Warning, &title, String::new()).ok();
            }
            Command::Read { id } => {
                let _ = board.mark_notification_read(id);
            }
            Command::Dismiss { id } => {
                board.remove_notification(id);
            }
            Command::Advance { millis } => clock.advance(Duration::milliseconds(millis as i64)),
            Command::RewindClock { millis } => {
                clock.advance(Duration::milliseconds(-(millis as i64)))
            }
        }
        board.run_due_timers();
        board.drain_events();

        let mut ids: Vec<_> = board.tasks().iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), board.tasks().len());
        for task in board.tasks() {
            assert!(task.updated_at >= task.created_at);
        }
        if let Some(id) = board.dragged_task() {
            assert!(board.task(id).is_some());
        }
        assert!(board.visible_notifications().len() <= board.config().visible_notifications);
    }

    assert!(board.snapshot().validate().is_ok());
});
