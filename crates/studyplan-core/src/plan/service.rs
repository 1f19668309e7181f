//! Turn plan files into typed schedule requests.

use crate::schedule::PlanRequest;

use super::parser::{
    PlanParseError, parse_daily_hours, parse_exam_date, parse_plan_toml, parse_topics,
};
use super::toml_format::PlanToml;

/// Build a [`PlanRequest`] from a validated plan file.
///
/// Daily capacity resolution: `override_hours` > `[plan].daily_hours` >
/// `default_hours`. Returns [`PlanParseError::MissingDailyHours`] when none of
/// the three is set.
pub fn request_from_toml(
    plan: &PlanToml,
    override_hours: Option<u32>,
    default_hours: Option<u32>,
) -> Result<PlanRequest, PlanParseError> {
    let exam_date = parse_exam_date(&plan.plan.exam_date)?;
    let file_hours = plan.plan.daily_hours.map(parse_daily_hours).transpose()?;
    let daily_capacity_hours = override_hours
        .or(file_hours)
        .or(default_hours)
        .ok_or(PlanParseError::MissingDailyHours)?;
    if daily_capacity_hours == 0 {
        return Err(PlanParseError::InvalidDailyHours(0));
    }

    Ok(PlanRequest {
        exam_name: plan.plan.exam.clone(),
        exam_date,
        daily_capacity_hours,
        topics: parse_topics(&plan.topics)?,
    })
}

/// Parse, validate and convert a plan file's contents in one step.
pub fn load_request(
    content: &str,
    override_hours: Option<u32>,
    default_hours: Option<u32>,
) -> Result<PlanRequest, PlanParseError> {
    let plan = parse_plan_toml(content)?;
    request_from_toml(&plan, override_hours, default_hours)
}
