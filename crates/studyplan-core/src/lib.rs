//! Deterministic exam study planner.
//!
//! The heart of the crate is [`schedule::build_schedule`], a pure function
//! from a [`PlanRequest`] and the current date to a day-by-day
//! [`PlanResult`]. The remaining modules are the plumbing a caller needs
//! around it: plan files, topic list edits and completion tracking.

pub mod models;
pub mod plan;
pub mod progress;
pub mod schedule;
pub mod topics;

pub use models::{
    Difficulty, PlanResult, PlanWarning, ScheduledTask, TaskDifficulty, TaskKind, Topic,
};
pub use progress::{CompletionState, ProgressSummary};
pub use schedule::{PlanRequest, ValidationError, build_schedule};
