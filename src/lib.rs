//! In-memory kanban board: tasks across four columns, filtering, a transient
//! notification feed, an activity log and a simulated live team.
//!
//! [`Board`] owns all state. Time comes from a [`Clock`] and simulated team
//! activity from an [`EventSource`], so both can be driven by hand in tests.

pub mod board;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod feed;
pub mod filter;
pub mod format;
pub mod models;
pub mod scheduler;
pub mod simulation;
pub mod snapshot;

pub use board::{Board, BoardStats};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::BoardConfig;
pub use error::{BoardError, Result};
pub use events::BoardEvent;
pub use filter::FilterState;
pub use models::{NewTask, Priority, Status, TaskUpdate};
pub use simulation::{ConnectionStatus, EventSource, RandomEventSource, ScriptedEventSource};
pub use snapshot::BoardSnapshot;
