use chrono::NaiveDate;
use thiserror::Error;

/// Reasons a plan request is rejected before any allocation happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("plan must contain at least one topic")]
    NoTopics,

    #[error("exam name must not be empty")]
    EmptyExamName,

    #[error("topic #{index} has an empty name")]
    EmptyTopicName { index: usize },

    #[error("exam date {exam_date} must be after today ({today})")]
    ExamNotInFuture {
        exam_date: NaiveDate,
        today: NaiveDate,
    },

    #[error("daily capacity must be at least one hour")]
    NonPositiveCapacity,

    #[error(
        "{estimated_hours}h of study at {daily_capacity_hours}h per day runs past the last \
         representable date"
    )]
    StudyLoadOutOfRange {
        estimated_hours: u64,
        daily_capacity_hours: u32,
    },
}
