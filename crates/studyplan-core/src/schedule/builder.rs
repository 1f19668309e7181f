//! Greedy study schedule builder.
//!
//! Turns a [`PlanRequest`] and the current date into a [`PlanResult`]:
//! 1. Order topics by descending difficulty (stable, so equal difficulties
//!    keep their input order).
//! 2. Allocate study hours day by day from `today`, carrying whatever does
//!    not fit into the following days. The day cursor is shared across
//!    topics.
//! 3. Place one review per topic at a fixed offset before the exam.
//! 4. Place a single final review the day before the exam.
//! 5. Stable-sort everything by date.
//!
//! The builder never checks feasibility: if the topics need more hours than
//! the calendar holds, allocation simply runs past the exam date. Use
//! [`PlanResult::warnings`] to detect that.

use std::cmp::Reverse;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{PlanResult, ScheduledTask, Topic};

use super::error::ValidationError;

/// Hours granted to the final review, capped by the daily capacity.
const FINAL_REVIEW_MAX_HOURS: u32 = 4;

/// Reviews never sit more than this many days before the exam.
const MAX_REVIEW_OFFSET_DAYS: i64 = 3;

/// Everything the builder needs besides the current date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub exam_name: String,
    pub exam_date: NaiveDate,
    pub daily_capacity_hours: u32,
    pub topics: Vec<Topic>,
}

/// Build the full schedule for `request` as seen from `today`.
///
/// Fails with [`ValidationError`] before any allocation when the request is
/// malformed. Given a valid request the result always contains one review per
/// topic and exactly one final review.
pub fn build_schedule(
    request: &PlanRequest,
    today: NaiveDate,
) -> Result<PlanResult, ValidationError> {
    let days_until_exam = validate(request, today)?;
    let capacity = request.daily_capacity_hours;

    let ordered = order_topics(&request.topics);

    let mut tasks = allocate_study(&ordered, today, capacity);
    let study_count = tasks.len();

    let review_on = review_date(request.exam_date, days_until_exam);
    tasks.extend(ordered.iter().map(|topic| {
        ScheduledTask::review(topic, review_on, review_hours(topic.estimated_hours))
    }));

    tasks.push(ScheduledTask::final_review(
        request.exam_date - Days::new(1),
        capacity.min(FINAL_REVIEW_MAX_HOURS),
    ));

    // `sort_by_key` is stable: same-day tasks stay in emission order.
    tasks.sort_by_key(|t| t.date);

    let total_estimated_hours: u64 = request
        .topics
        .iter()
        .map(|t| u64::from(t.estimated_hours))
        .sum();
    // days_until_exam >= 1 after validation.
    let total_available_hours = days_until_exam.unsigned_abs() * u64::from(capacity);

    debug!(
        exam = %request.exam_name,
        days_until_exam,
        study_tasks = study_count,
        total_tasks = tasks.len(),
        total_estimated_hours,
        total_available_hours,
        "schedule built"
    );

    Ok(PlanResult {
        exam_name: request.exam_name.clone(),
        exam_date: request.exam_date,
        days_until_exam,
        total_estimated_hours,
        total_available_hours,
        tasks,
    })
}

/// Check the request and return the number of days until the exam.
fn validate(request: &PlanRequest, today: NaiveDate) -> Result<i64, ValidationError> {
    if request.topics.is_empty() {
        return Err(ValidationError::NoTopics);
    }
    if let Some(index) = request
        .topics
        .iter()
        .position(|t| t.name.trim().is_empty())
    {
        return Err(ValidationError::EmptyTopicName { index });
    }
    if request.exam_name.trim().is_empty() {
        return Err(ValidationError::EmptyExamName);
    }
    if request.daily_capacity_hours == 0 {
        return Err(ValidationError::NonPositiveCapacity);
    }

    let days_until_exam = (request.exam_date - today).num_days();
    if days_until_exam < 1 {
        return Err(ValidationError::ExamNotInFuture {
            exam_date: request.exam_date,
            today,
        });
    }

    // The cursor only moves past fully used days, so the last study day is at
    // most `total / capacity` days after today.
    let estimated_hours: u64 = request
        .topics
        .iter()
        .map(|t| u64::from(t.estimated_hours))
        .sum();
    let study_days = estimated_hours / u64::from(request.daily_capacity_hours);
    if today.checked_add_days(Days::new(study_days)).is_none() {
        return Err(ValidationError::StudyLoadOutOfRange {
            estimated_hours,
            daily_capacity_hours: request.daily_capacity_hours,
        });
    }

    Ok(days_until_exam)
}

/// Hardest first; ties keep input order.
fn order_topics(topics: &[Topic]) -> Vec<&Topic> {
    let mut ordered: Vec<&Topic> = topics.iter().collect();
    ordered.sort_by_key(|t| Reverse(t.difficulty.rank()));
    ordered
}

/// Greedy allocation with carry-over across days and topics.
fn allocate_study(ordered: &[&Topic], today: NaiveDate, capacity: u32) -> Vec<ScheduledTask> {
    let mut tasks = Vec::new();
    let mut cursor = today;
    let mut remaining_today = capacity;

    for topic in ordered {
        let mut remaining = topic.estimated_hours;
        while remaining > 0 {
            let chunk = remaining_today.min(remaining);
            if chunk > 0 {
                tasks.push(ScheduledTask::study(topic, cursor, chunk));
                remaining -= chunk;
                remaining_today -= chunk;
            }
            if remaining_today == 0 || remaining > 0 {
                cursor = cursor + Days::new(1);
                remaining_today = capacity;
            }
        }
        debug!(
            topic = %topic.name,
            hours = topic.estimated_hours,
            next_day = %cursor,
            "topic allocated"
        );
    }

    tasks
}

/// Review length for a topic: 20% of its estimate, rounded up.
pub fn review_hours(estimated_hours: u32) -> u32 {
    estimated_hours.div_ceil(5)
}

/// Date shared by every topic review: up to three days before the exam,
/// pulled closer for short plans.
pub fn review_date(exam_date: NaiveDate, days_until_exam: i64) -> NaiveDate {
    let offset = MAX_REVIEW_OFFSET_DAYS.min(days_until_exam / 3);
    exam_date - Days::new(offset.unsigned_abs())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
