//! Shared test utilities for studyplan integration tests.
//!
//! Provides a fixed reference calendar, topic/request builders and a helper
//! that writes plan files into a temporary directory.

use std::path::PathBuf;

use chrono::{Days, NaiveDate};
use tempfile::TempDir;

use studyplan_core::models::{Difficulty, Topic};
use studyplan_core::schedule::PlanRequest;

/// Day zero of the reference calendar used by tests.
pub fn day0() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid reference date")
}

/// `day0() + offset` days.
pub fn day(offset: u64) -> NaiveDate {
    day0() + Days::new(offset)
}

pub fn hard(name: &str, hours: u32) -> Topic {
    Topic::new(name, Difficulty::Hard, hours)
}

pub fn medium(name: &str, hours: u32) -> Topic {
    Topic::new(name, Difficulty::Medium, hours)
}

pub fn easy(name: &str, hours: u32) -> Topic {
    Topic::new(name, Difficulty::Easy, hours)
}

/// A request for an exam `exam_in_days` after [`day0`].
pub fn request(topics: Vec<Topic>, exam_in_days: u64, daily_capacity_hours: u32) -> PlanRequest {
    PlanRequest {
        exam_name: "Biology Final".to_owned(),
        exam_date: day(exam_in_days),
        daily_capacity_hours,
        topics,
    }
}

/// A temporary directory holding a single plan file.
///
/// The directory is removed when the value is dropped.
pub struct PlanDir {
    pub dir: TempDir,
    pub plan_path: PathBuf,
}

/// Write `contents` to `plan.toml` inside a fresh temporary directory.
pub fn write_plan(contents: &str) -> PlanDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    let plan_path = dir.path().join("plan.toml");
    std::fs::write(&plan_path, contents)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", plan_path.display()));
    PlanDir { dir, plan_path }
}
