//! Tunables for notification lifetime and the simulated live feed.

use chrono::Duration;
use tracing::warn;

use crate::error::{BoardError, Result};

/// Longest delay or lifetime a board accepts.
pub const MAX_DELAY_MS: i64 = 365 * 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// How long a notification lives before it is removed, read or not.
    pub notification_ttl: Duration,
    /// How many of the most recent notifications a view shows.
    pub visible_notifications: usize,
    pub activity_interval: Duration,
    pub activity_probability: f64,
    pub connection_interval: Duration,
    pub connection_probability: f64,
    /// Delay between going offline and starting to reconnect.
    pub reconnect_delay: Duration,
    /// Delay between starting to reconnect and being connected again.
    pub connecting_delay: Duration,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            notification_ttl: Duration::milliseconds(5000),
            visible_notifications: 3,
            activity_interval: Duration::seconds(5),
            activity_probability: 0.1,
            connection_interval: Duration::seconds(10),
            connection_probability: 0.05,
            reconnect_delay: Duration::seconds(3),
            connecting_delay: Duration::seconds(2),
        }
    }
}

impl BoardConfig {
    /// Rejects probabilities outside `0.0..=1.0` and delays that are negative
    /// or longer than [`MAX_DELAY_MS`].
    pub fn validate(&self) -> Result<()> {
        let result = self.check();
        if let Err(e) = &result {
            warn!(error = %e, "rejected board config");
        }
        result
    }

    fn check(&self) -> Result<()> {
        for (field, p) in [
            ("activity probability", self.activity_probability),
            ("connection probability", self.connection_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(BoardError::invalid(field, format!("{} is not between 0 and 1", p)));
            }
        }
        for (field, delay) in [
            ("notification ttl", self.notification_ttl),
            ("activity interval", self.activity_interval),
            ("connection interval", self.connection_interval),
            ("reconnect delay", self.reconnect_delay),
            ("connecting delay", self.connecting_delay),
        ] {
            let ms = delay.num_milliseconds();
            if !(0..=MAX_DELAY_MS).contains(&ms) {
                return Err(BoardError::invalid(
                    field,
                    format!("{}ms is outside 0..={}ms", ms, MAX_DELAY_MS),
                ));
            }
        }
        Ok(())
    }
}
