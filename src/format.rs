//! Human-friendly renderings of timestamps and due dates.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// "just now", "5m ago", "3h ago" or "2d ago". Future timestamps read as "just now".
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86_400 {
        format!("{}h ago", seconds / 3600)
    } else {
        format!("{}d ago", seconds / 86_400)
    }
}

/// "Jan 15", with the year appended when it differs from `today`'s.
pub fn format_due_date(due: NaiveDate, today: NaiveDate) -> String {
    if due.year() == today.year() {
        due.format("%b %-d").to_string()
    } else {
        due.format("%b %-d, %Y").to_string()
    }
}

pub fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 12, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_time_ago_buckets() {
        assert_eq!(format_time_ago(now() - Duration::seconds(59), now()), "just now");
        assert_eq!(format_time_ago(now() - Duration::seconds(60), now()), "1m ago");
        assert_eq!(format_time_ago(now() - Duration::minutes(59), now()), "59m ago");
        assert_eq!(format_time_ago(now() - Duration::hours(3), now()), "3h ago");
        assert_eq!(format_time_ago(now() - Duration::days(2), now()), "2d ago");
    }

    #[test]
    fn test_time_ago_future_is_just_now() {
        assert_eq!(format_time_ago(now() + Duration::hours(1), now()), "just now");
    }

    #[test]
    fn test_due_date_same_year() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 12).unwrap();
        let due = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_due_date(due, today), "Jan 5");
    }

    #[test]
    fn test_due_date_other_year() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 12).unwrap();
        let due = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        assert_eq!(format_due_date(due, today), "Mar 20, 2025");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a rather long title", 10), "a rathe...");
        assert_eq!(truncate("日本語のタイトルです", 5), "日本...");
    }

    proptest! {
        #[test]
        fn prop_truncate_respects_limit(s in "\\PC{0,60}", max in 3usize..40) {
            prop_assert!(truncate(&s, max).chars().count() <= max);
        }
    }
}
