//! Notification feed and activity log.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::models::{Activity, Notification, NotificationId};

/// Most-recent-first list of transient notifications.
///
/// Entries past their `expires_at` are invisible to every query even before
/// the expiry timer physically removes them.
#[derive(Debug, Default)]
pub struct NotificationFeed {
    entries: VecDeque<Notification>,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.entries.push_front(notification);
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.entries.iter().find(|n| n.id == id)
    }

    /// Marks an entry read. Returns false if it was absent or already read.
    pub fn mark_read(&mut self, id: NotificationId) -> bool {
        match self.entries.iter_mut().find(|n| n.id == id) {
            Some(n) if !n.read => {
                n.read = true;
                true
            }
            _ => false,
        }
    }

    /// Removes an entry. Absent ids are a no-op.
    pub fn remove(&mut self, id: NotificationId) -> Option<Notification> {
        let index = self.entries.iter().position(|n| n.id == id)?;
        self.entries.remove(index)
    }

    pub fn live(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Notification> {
        self.entries.iter().filter(move |n| !n.is_expired(now))
    }

    pub fn visible(&self, now: DateTime<Utc>, limit: usize) -> Vec<&Notification> {
        self.live(now).take(limit).collect()
    }

    pub fn unread_count(&self, now: DateTime<Utc>) -> usize {
        self.live(now).filter(|n| !n.read).count()
    }
}

/// Append-only audit trail, newest first.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: VecDeque<Activity>,
}

impl ActivityLog {
    pub fn from_entries(entries: Vec<Activity>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    pub fn record(&mut self, activity: Activity) {
        self.entries.push_front(activity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.entries.iter()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityKind, NotificationKind};
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap()
    }

    fn notification(id: i64, at: DateTime<Utc>) -> Notification {
        Notification {
            id,
            kind: NotificationKind::Info,
            title: format!("Title {}", id),
            message: "message".to_string(),
            timestamp: at,
            read: false,
            is_real_time: true,
            expires_at: at + Duration::seconds(5),
        }
    }

    #[test]
    fn test_push_is_most_recent_first() {
        let mut feed = NotificationFeed::new();
        feed.push(notification(1, t0()));
        feed.push(notification(2, t0()));
        let ids: Vec<_> = feed.live(t0()).map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_mark_read_keeps_entry() {
        let mut feed = NotificationFeed::new();
        feed.push(notification(1, t0()));
        assert!(feed.mark_read(1));
        assert!(!feed.mark_read(1));
        assert!(feed.get(1).is_some_and(|n| n.read));
        assert_eq!(feed.unread_count(t0()), 0);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut feed = NotificationFeed::new();
        feed.push(notification(1, t0()));
        assert!(feed.remove(42).is_none());
        assert!(feed.remove(1).is_some());
        assert!(feed.remove(1).is_none());
        assert!(feed.get(1).is_none());
    }

    #[test]
    fn test_expired_entries_hidden() {
        let mut feed = NotificationFeed::new();
        feed.push(notification(1, t0()));
        feed.push(notification(2, t0() + Duration::seconds(3)));
        let later = t0() + Duration::seconds(5);
        assert_eq!(feed.unread_count(later), 1);
        assert_eq!(feed.visible(later, 3).len(), 1);
        assert!(feed.get(1).is_some());
    }

    #[test]
    fn test_visible_limit() {
        let mut feed = NotificationFeed::new();
        for id in 1..=5 {
            feed.push(notification(id, t0()));
        }
        let ids: Vec<_> = feed.visible(t0(), 3).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![5, 4, 3]);
        assert_eq!(feed.unread_count(t0()), 5);
    }

    #[test]
    fn test_activity_log_newest_first() {
        let mut log = ActivityLog::default();
        for id in 1..=3 {
            log.record(Activity {
                id,
                kind: ActivityKind::TaskCreated,
                author: 1,
                task_id: id,
                task_title: format!("Task {}", id),
                timestamp: t0(),
                description: "created a new task".to_string(),
            });
        }
        let ids: Vec<_> = log.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
