//! Schedule builder: topic ordering, greedy day-by-day allocation, review
//! placement and final assembly.

pub mod builder;
pub mod error;

pub use builder::{PlanRequest, build_schedule, review_date, review_hours};
pub use error::ValidationError;
