//! Plan TOML parser with validation.
//!
//! Parses a `plan.toml` string into a [`PlanToml`] and validates:
//! - The exam name is non-empty and the exam date is `YYYY-MM-DD`.
//! - `daily_hours`, when present, is positive.
//! - There is at least one topic, every topic has a name, a known
//!   difficulty and a non-negative hour estimate.
//!
//! Duplicate topic names are accepted (the scheduler does not need unique
//! names) but logged, since they make task ids collide. So is a topic named
//! `final`, whose review id is the final review's id.

use std::collections::HashSet;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::warn;

use crate::models::{Difficulty, FINAL_REVIEW_ID, Topic, review_id};

use super::toml_format::{PlanToml, TopicToml};

/// Errors that can occur during plan parsing and validation.
#[derive(Debug, Error)]
pub enum PlanParseError {
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("exam name must not be empty")]
    EmptyExamName,

    #[error("invalid exam date {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error("invalid daily_hours {0} (expected a positive number of hours)")]
    InvalidDailyHours(i64),

    #[error("no daily_hours in plan file and no default configured")]
    MissingDailyHours,

    #[error("plan must contain at least one topic")]
    NoTopics,

    #[error("topic #{index} has an empty name")]
    EmptyTopicName { index: usize },

    #[error("invalid difficulty {value:?} on topic {topic:?} (expected easy, medium, or hard)")]
    InvalidDifficulty { topic: String, value: String },

    #[error("invalid hours {value} on topic {topic:?} (expected zero or more)")]
    InvalidHours { topic: String, value: i64 },
}

/// Parse and validate a `plan.toml` string.
///
/// Returns a validated [`PlanToml`] or a descriptive error.
pub fn parse_plan_toml(content: &str) -> Result<PlanToml, PlanParseError> {
    let plan: PlanToml = toml::from_str(content)?;
    validate(&plan)?;
    Ok(plan)
}

/// Parse an exam date in `YYYY-MM-DD` form.
pub fn parse_exam_date(value: &str) -> Result<NaiveDate, PlanParseError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| PlanParseError::InvalidDate {
        value: value.to_owned(),
    })
}

/// Parse a positive daily capacity.
pub fn parse_daily_hours(value: i64) -> Result<u32, PlanParseError> {
    u32::try_from(value)
        .ok()
        .filter(|h| *h > 0)
        .ok_or(PlanParseError::InvalidDailyHours(value))
}

/// Convert the `index`-th `[[topics]]` entry into a typed [`Topic`].
pub fn parse_topic(index: usize, entry: &TopicToml) -> Result<Topic, PlanParseError> {
    if entry.name.trim().is_empty() {
        return Err(PlanParseError::EmptyTopicName { index });
    }
    let difficulty =
        entry
            .difficulty
            .parse::<Difficulty>()
            .map_err(|_| PlanParseError::InvalidDifficulty {
                topic: entry.name.clone(),
                value: entry.difficulty.clone(),
            })?;
    let hours = u32::try_from(entry.hours).map_err(|_| PlanParseError::InvalidHours {
        topic: entry.name.clone(),
        value: entry.hours,
    })?;
    Ok(Topic::new(entry.name.clone(), difficulty, hours))
}

/// Convert every topic entry, stopping at the first invalid one.
pub fn parse_topics(entries: &[TopicToml]) -> Result<Vec<Topic>, PlanParseError> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| parse_topic(i, entry))
        .collect()
}

/// Validate the parsed plan structure.
fn validate(plan: &PlanToml) -> Result<(), PlanParseError> {
    if plan.plan.exam.trim().is_empty() {
        return Err(PlanParseError::EmptyExamName);
    }
    parse_exam_date(&plan.plan.exam_date)?;
    if let Some(hours) = plan.plan.daily_hours {
        parse_daily_hours(hours)?;
    }

    if plan.topics.is_empty() {
        return Err(PlanParseError::NoTopics);
    }
    parse_topics(&plan.topics)?;

    for name in colliding_topic_names(&plan.topics) {
        warn!(topic = %name, "topic review id collides with another task id");
    }

    Ok(())
}

/// Names of topics whose review id is already taken, either by an earlier
/// topic of the same name or by the final review.
pub fn colliding_topic_names(entries: &[TopicToml]) -> Vec<&str> {
    let mut seen = HashSet::from([FINAL_REVIEW_ID.to_owned()]);
    entries
        .iter()
        .filter(|entry| !seen.insert(review_id(&entry.name)))
        .map(|entry| entry.name.as_str())
        .collect()
}
