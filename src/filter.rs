//! Search, priority and status predicates over the task list.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{Priority, Status, Task};

/// The constraints currently applied to the board view.
///
/// Empty sets mean "no constraint", which is different from a non-empty set
/// that happens to exclude every task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub priority: BTreeSet<Priority>,
    #[serde(default)]
    pub status: BTreeSet<Status>,
    #[serde(default)]
    pub search: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority.insert(priority);
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status.insert(status);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.priority.is_empty() && self.status.is_empty() && self.search.is_empty()
    }

    /// Flips a priority in or out of the set. Returns whether it is now active.
    pub fn toggle_priority(&mut self, priority: Priority) -> bool {
        if self.priority.remove(&priority) {
            false
        } else {
            self.priority.insert(priority);
            true
        }
    }

    /// Flips a status in or out of the set. Returns whether it is now active.
    pub fn toggle_status(&mut self, status: Status) -> bool {
        if self.status.remove(&status) {
            false
        } else {
            self.status.insert(status);
            true
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.matches_search(task)
            && (self.priority.is_empty() || self.priority.contains(&task.priority))
            && (self.status.is_empty() || self.status.contains(&task.status))
    }

    fn matches_search(&self, task: &Task) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        task.title.to_lowercase().contains(&needle)
            || task.description.to_lowercase().contains(&needle)
            || task.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
    }
}

/// Stable filter: matching tasks in their original relative order.
pub fn filter<'a>(tasks: &'a [Task], state: &FilterState) -> Vec<&'a Task> {
    tasks.iter().filter(|task| state.matches(task)).collect()
}

/// Filtered tasks that sit in one column.
pub fn column<'a>(tasks: &'a [Task], state: &FilterState, status: Status) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| task.status == status && state.matches(task))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;

    fn task(id: i64, title: &str, status: Status, priority: Priority, tags: &[&str]) -> Task {
        let now = Utc::now();
        Task {
            id,
            title: title.to_string(),
            description: format!("Description for {}", title),
            status,
            priority,
            assignee: 1,
            due_date: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            comments: vec![],
            watchers: BTreeSet::from([1]),
            created_by: 1,
            created_at: now,
            updated_at: now,
            last_edited_by: None,
            estimated_hours: 0.0,
            actual_hours: 0.0,
            is_favorite: false,
            subtasks: vec![],
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task(1, "Design landing page", Status::Todo, Priority::High, &["design", "Frontend"]),
            task(2, "Set up CI", Status::Todo, Priority::Medium, &["devops"]),
            task(3, "Implement auth", Status::InProgress, Priority::High, &["backend"]),
            task(4, "Database tuning", Status::Review, Priority::Medium, &["database"]),
            task(5, "Project setup", Status::Done, Priority::Low, &["setup"]),
        ]
    }

    fn ids(tasks: &[&Task]) -> Vec<i64> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_empty_filter_returns_everything_in_order() {
        let tasks = sample();
        let result = filter(&tasks, &FilterState::new());
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let tasks = sample();
        let result = filter(&tasks, &FilterState::new().with_search("DESIGN"));
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn test_search_matches_tags() {
        let tasks = sample();
        let result = filter(&tasks, &FilterState::new().with_search("frontend"));
        assert_eq!(ids(&result), vec![1]);
        let result = filter(&tasks, &FilterState::new().with_search("devops"));
        assert_eq!(ids(&result), vec![2]);
    }

    #[test]
    fn test_search_matches_description() {
        let tasks = sample();
        let result = filter(&tasks, &FilterState::new().with_search("description for set"));
        assert_eq!(ids(&result), vec![2]);
    }

    #[test]
    fn test_nonexistent_token_matches_nothing() {
        let tasks = sample();
        let result = filter(&tasks, &FilterState::new().with_search("nonexistent-token"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_priority_and_status_are_conjunctive() {
        let tasks = sample();
        let state = FilterState::new()
            .with_priority(Priority::High)
            .with_status(Status::InProgress);
        assert_eq!(ids(&filter(&tasks, &state)), vec![3]);
    }

    #[test]
    fn test_multiple_values_in_one_set_are_disjunctive() {
        let tasks = sample();
        let state = FilterState::new()
            .with_status(Status::Review)
            .with_status(Status::Done);
        assert_eq!(ids(&filter(&tasks, &state)), vec![4, 5]);
    }

    #[test]
    fn test_set_excluding_everything_is_not_empty_filter() {
        let tasks: Vec<Task> = sample().into_iter().filter(|t| t.status != Status::Review).collect();
        let state = FilterState::new().with_status(Status::Review);
        assert!(!state.is_empty());
        assert!(filter(&tasks, &state).is_empty());
    }

    #[test]
    fn test_toggle_priority() {
        let mut state = FilterState::new();
        assert!(state.toggle_priority(Priority::High));
        assert!(state.priority.contains(&Priority::High));
        assert!(!state.toggle_priority(Priority::High));
        assert!(state.is_empty());
    }

    #[test]
    fn test_toggle_status_and_clear() {
        let mut state = FilterState::new().with_search("x");
        assert!(state.toggle_status(Status::Done));
        state.clear();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn test_column_respects_filter() {
        let tasks = sample();
        let state = FilterState::new().with_priority(Priority::High);
        assert_eq!(ids(&column(&tasks, &state, Status::Todo)), vec![1]);
        assert!(column(&tasks, &state, Status::Review).is_empty());
    }

    #[test]
    fn test_unicode_search_does_not_panic() {
        let mut tasks = sample();
        tasks[0].title = "Größe prüfen 🎉".to_string();
        let result = filter(&tasks, &FilterState::new().with_search("GRÖSSE"));
        assert!(result.is_empty());
        let result = filter(&tasks, &FilterState::new().with_search("größe"));
        assert_eq!(ids(&result), vec![1]);
    }

    fn arb_state() -> impl Strategy<Value = FilterState> {
        (
            proptest::collection::btree_set(0usize..3, 0..3),
            proptest::collection::btree_set(0usize..4, 0..4),
            "[a-zA-Z ]{0,6}",
        )
            .prop_map(|(p, s, search)| FilterState {
                priority: p.into_iter().map(|i| Priority::ALL[i]).collect(),
                status: s.into_iter().map(|i| Status::ALL[i]).collect(),
                search,
            })
    }

    proptest! {
        #[test]
        fn prop_filter_is_idempotent(state in arb_state()) {
            let tasks = sample();
            let once: Vec<Task> = filter(&tasks, &state).into_iter().cloned().collect();
            let twice = filter(&once, &state);
            prop_assert_eq!(ids(&twice), once.iter().map(|t| t.id).collect::<Vec<_>>());
        }

        #[test]
        fn prop_filter_preserves_relative_order(state in arb_state()) {
            let tasks = sample();
            let result = ids(&filter(&tasks, &state));
            let mut sorted = result.clone();
            sorted.sort();
            prop_assert_eq!(result, sorted);
        }

        #[test]
        fn prop_columns_partition_filter(state in arb_state()) {
            let tasks = sample();
            let total: usize = Status::ALL
                .iter()
                .map(|s| column(&tasks, &state, *s).len())
                .sum();
            prop_assert_eq!(total, filter(&tasks, &state).len());
        }
    }
}
