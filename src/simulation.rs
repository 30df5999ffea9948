//! Simulated team activity and connectivity.
//!
//! Nothing here talks to a network. An [`EventSource`] is polled whenever a
//! simulation timer fires and decides whether something "happened".

use std::collections::VecDeque;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::BoardConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Connected,
    Connecting,
    Disconnected,
}

impl ConnectionStatus {
    pub const ALL: [ConnectionStatus; 3] = [
        ConnectionStatus::Connected,
        ConnectionStatus::Connecting,
        ConnectionStatus::Disconnected,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Connected => "Live",
            Self::Connecting => "Connecting...",
            Self::Disconnected => "Offline",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected => write!(f, "connected"),
            Self::Connecting => write!(f, "connecting"),
            Self::Disconnected => write!(f, "disconnected"),
        }
    }
}

/// Which periodic simulation timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Trigger {
    Activity,
    Connection,
}

/// What the board looks like to an event source. Indices in the returned
/// events refer to positions in the task list and roster at this moment.
#[derive(Debug, Clone, Copy)]
pub struct SimulationContext {
    pub task_count: usize,
    pub member_count: usize,
    pub connection: ConnectionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulatedEvent {
    TaskUpdated { member: usize, task: usize },
    CommentAdded { member: usize, task: usize },
    MemberOnline { member: usize },
    ConnectionChanged(ConnectionStatus),
}

pub trait EventSource {
    fn next_event(&mut self, trigger: Trigger, ctx: &SimulationContext) -> Option<SimulatedEvent>;
}

/// Coin-flip driven source with the original board's odds.
pub struct RandomEventSource {
    rng: StdRng,
    activity_probability: f64,
    connection_probability: f64,
}

/// A probability `gen_bool` accepts. NaN never fires.
fn chance(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

impl RandomEventSource {
    pub fn new(config: &BoardConfig) -> Self {
        Self::with_rng(StdRng::from_entropy(), config)
    }

    pub fn seeded(seed: u64, config: &BoardConfig) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), config)
    }

    fn with_rng(rng: StdRng, config: &BoardConfig) -> Self {
        Self {
            rng,
            activity_probability: chance(config.activity_probability),
            connection_probability: chance(config.connection_probability),
        }
    }

    fn activity(&mut self, ctx: &SimulationContext) -> Option<SimulatedEvent> {
        if ctx.member_count == 0 || !self.rng.gen_bool(self.activity_probability) {
            return None;
        }
        let member = self.rng.gen_range(0..ctx.member_count);
        let action = self.rng.gen_range(0..3);
        if action == 2 || ctx.task_count == 0 {
            return Some(SimulatedEvent::MemberOnline { member });
        }
        let task = self.rng.gen_range(0..ctx.task_count);
        Some(if action == 0 {
            SimulatedEvent::TaskUpdated { member, task }
        } else {
            SimulatedEvent::CommentAdded { member, task }
        })
    }

    fn connection(&mut self, ctx: &SimulationContext) -> Option<SimulatedEvent> {
        if !self.rng.gen_bool(self.connection_probability) {
            return None;
        }
        let next = ConnectionStatus::ALL[self.rng.gen_range(0..ConnectionStatus::ALL.len())];
        (next != ctx.connection).then_some(SimulatedEvent::ConnectionChanged(next))
    }
}

impl EventSource for RandomEventSource {
    fn next_event(&mut self, trigger: Trigger, ctx: &SimulationContext) -> Option<SimulatedEvent> {
        match trigger {
            Trigger::Activity => self.activity(ctx),
            Trigger::Connection => self.connection(ctx),
        }
    }
}

/// Replays a fixed list of answers, one per poll, then stays quiet.
#[derive(Debug, Default)]
pub struct ScriptedEventSource {
    script: VecDeque<(Trigger, Option<SimulatedEvent>)>,
}

impl ScriptedEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, trigger: Trigger, event: Option<SimulatedEvent>) -> Self {
        self.script.push_back((trigger, event));
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl EventSource for ScriptedEventSource {
    fn next_event(&mut self, trigger: Trigger, _ctx: &SimulationContext) -> Option<SimulatedEvent> {
        // answers scripted for the other trigger stay queued
        let pos = self.script.iter().position(|(t, _)| *t == trigger)?;
        self.script.remove(pos).and_then(|(_, event)| event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(connection: ConnectionStatus) -> SimulationContext {
        SimulationContext {
            task_count: 5,
            member_count: 4,
            connection,
        }
    }

    #[test]
    fn test_random_source_never_fires_at_zero_probability() {
        let config = BoardConfig {
            activity_probability: 0.0,
            connection_probability: 0.0,
            ..BoardConfig::default()
        };
        let mut source = RandomEventSource::seeded(7, &config);
        for _ in 0..200 {
            assert!(source.next_event(Trigger::Activity, &ctx(ConnectionStatus::Connected)).is_none());
            assert!(source.next_event(Trigger::Connection, &ctx(ConnectionStatus::Connected)).is_none());
        }
    }

    #[test]
    fn test_random_source_nan_probability_never_fires() {
        let config = BoardConfig {
            activity_probability: f64::NAN,
            connection_probability: f64::NAN,
            ..BoardConfig::default()
        };
        let mut source = RandomEventSource::seeded(1, &config);
        for _ in 0..50 {
            assert!(source.next_event(Trigger::Activity, &ctx(ConnectionStatus::Connected)).is_none());
            assert!(source.next_event(Trigger::Connection, &ctx(ConnectionStatus::Connected)).is_none());
        }
    }

    #[test]
    fn test_random_source_indices_in_range() {
        let config = BoardConfig {
            activity_probability: 1.0,
            ..BoardConfig::default()
        };
        let mut source = RandomEventSource::seeded(42, &config);
        for _ in 0..200 {
            match source.next_event(Trigger::Activity, &ctx(ConnectionStatus::Connected)) {
                Some(SimulatedEvent::TaskUpdated { member, task })
                | Some(SimulatedEvent::CommentAdded { member, task }) => {
                    assert!(member < 4);
                    assert!(task < 5);
                }
                Some(SimulatedEvent::MemberOnline { member }) => assert!(member < 4),
                other => panic!("unexpected event {:?}", other),
            }
        }
    }

    #[test]
    fn test_random_source_without_tasks_only_reports_presence() {
        let config = BoardConfig {
            activity_probability: 1.0,
            ..BoardConfig::default()
        };
        let mut source = RandomEventSource::seeded(3, &config);
        let empty = SimulationContext {
            task_count: 0,
            member_count: 2,
            connection: ConnectionStatus::Connected,
        };
        for _ in 0..50 {
            assert!(matches!(
                source.next_event(Trigger::Activity, &empty),
                Some(SimulatedEvent::MemberOnline { .. })
            ));
        }
    }

    #[test]
    fn test_random_source_never_reports_current_connection() {
        let config = BoardConfig {
            connection_probability: 1.0,
            ..BoardConfig::default()
        };
        let mut source = RandomEventSource::seeded(11, &config);
        for _ in 0..200 {
            if let Some(event) = source.next_event(Trigger::Connection, &ctx(ConnectionStatus::Connecting)) {
                assert_ne!(event, SimulatedEvent::ConnectionChanged(ConnectionStatus::Connecting));
            }
        }
    }

    #[test]
    fn test_seeded_sources_agree() {
        let config = BoardConfig {
            activity_probability: 0.5,
            ..BoardConfig::default()
        };
        let mut a = RandomEventSource::seeded(99, &config);
        let mut b = RandomEventSource::seeded(99, &config);
        for _ in 0..50 {
            let c = ctx(ConnectionStatus::Connected);
            assert_eq!(a.next_event(Trigger::Activity, &c), b.next_event(Trigger::Activity, &c));
        }
    }

    #[test]
    fn test_scripted_source_replays_per_trigger() {
        let mut source = ScriptedEventSource::new()
            .then(Trigger::Connection, Some(SimulatedEvent::ConnectionChanged(ConnectionStatus::Disconnected)))
            .then(Trigger::Activity, Some(SimulatedEvent::MemberOnline { member: 1 }));
        let c = ctx(ConnectionStatus::Connected);
        assert_eq!(
            source.next_event(Trigger::Activity, &c),
            Some(SimulatedEvent::MemberOnline { member: 1 })
        );
        assert_eq!(source.remaining(), 1);
        assert_eq!(
            source.next_event(Trigger::Connection, &c),
            Some(SimulatedEvent::ConnectionChanged(ConnectionStatus::Disconnected))
        );
        assert_eq!(source.next_event(Trigger::Connection, &c), None);
    }
}
