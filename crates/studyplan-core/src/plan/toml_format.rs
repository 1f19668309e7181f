//! TOML format types for plan files.
//!
//! These types map directly to the `plan.toml` on-disk format and are
//! deserialized via `serde` + the `toml` crate. Values are kept loosely typed
//! here (strings and signed integers) so that the parser can report precise
//! validation errors instead of a generic deserialization failure.

use serde::{Deserialize, Serialize};

use crate::models::Topic;
use crate::schedule::PlanRequest;

/// Top-level structure of a `plan.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanToml {
    /// Exam metadata.
    pub plan: PlanMeta,
    /// Topics to study.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<TopicToml>,
}

/// Plan-level metadata in `[plan]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanMeta {
    /// Name of the exam.
    pub exam: String,
    /// Exam date as `YYYY-MM-DD`.
    pub exam_date: String,
    /// Study hours available per day. Falls back to the configured default
    /// when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_hours: Option<i64>,
}

/// A single `[[topics]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopicToml {
    /// Topic name, used in task ids.
    pub name: String,
    /// "easy", "medium", or "hard".
    pub difficulty: String,
    /// Estimated study hours for the topic.
    pub hours: i64,
}

impl From<&Topic> for TopicToml {
    fn from(topic: &Topic) -> Self {
        Self {
            name: topic.name.clone(),
            difficulty: topic.difficulty.to_string(),
            hours: i64::from(topic.estimated_hours),
        }
    }
}

impl PlanToml {
    /// Convert a typed request back into its file representation.
    ///
    /// `daily_hours` is always written, since the request has it resolved.
    pub fn from_request(request: &PlanRequest) -> Self {
        Self {
            plan: PlanMeta {
                exam: request.exam_name.clone(),
                exam_date: request.exam_date.format("%Y-%m-%d").to_string(),
                daily_hours: Some(i64::from(request.daily_capacity_hours)),
            },
            topics: request.topics.iter().map(TopicToml::from).collect(),
        }
    }
}
