//! Plan files: TOML format, parsing with validation, conversion to requests.

pub mod parser;
pub mod service;
pub mod toml_format;

pub use parser::{PlanParseError, parse_plan_toml};
pub use service::{load_request, request_from_toml};
pub use toml_format::{PlanMeta, PlanToml, TopicToml};
