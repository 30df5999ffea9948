use anyhow::{bail, Result};

use kanban::format::format_time_ago;
use kanban::models::Notification;
use kanban::{Board, BoardEvent};

pub fn list(board: &Board, all: bool) -> Result<()> {
    let notifications = if all {
        board.notifications()
    } else {
        board.visible_notifications()
    };
    println!("{} unread", board.unread_count());
    if notifications.is_empty() {
        println!("No notifications.");
        return Ok(());
    }
    let now = board.now();
    for n in notifications {
        let marker = if n.read { " " } else { "*" };
        println!(
            "{} #{:<4} {} ({})",
            marker,
            n.id,
            headline(n),
            format_time_ago(n.timestamp, now)
        );
    }
    Ok(())
}

pub fn read(board: &mut Board, id: i64) -> Result<()> {
    if board.mark_notification_read(id)? {
        println!("Marked notification #{} as read", id);
    } else {
        println!("Notification #{} was already read", id);
    }
    Ok(())
}

pub fn dismiss(board: &mut Board, id: i64) -> Result<()> {
    if !board.remove_notification(id) {
        bail!("Notification #{} not found", id);
    }
    println!("Dismissed notification #{}", id);
    Ok(())
}

fn headline(n: &Notification) -> String {
    format!("[{}] {}: {}", n.kind, n.title, n.message)
}

/// One line per event worth telling the user about.
pub fn describe_events(board: &Board, events: &[BoardEvent]) -> Vec<String> {
    let notifications = board.notifications();
    events
        .iter()
        .filter_map(|event| match event {
            BoardEvent::NotificationAdded(id) => notifications
                .iter()
                .find(|n| n.id == *id)
                .map(|n| format!("  > {}", headline(n))),
            BoardEvent::ConnectionChanged(status) => {
                Some(format!("  > Connection: {}", status.label()))
            }
            _ => None,
        })
        .collect()
}

/// Drains pending board events and prints them.
pub fn announce(board: &mut Board) {
    let events = board.drain_events();
    for line in describe_events(board, &events) {
        println!("{}", line);
    }
}
