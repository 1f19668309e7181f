//! Plan file I/O: loading, progress side-files and TOML write-back.
//!
//! - [`load_plan`] reads and validates a plan file.
//! - [`read_plan_unvalidated`] reads a plan that may still be incomplete
//!   (for example, no topics yet), used by the topic editing commands.
//! - [`write_topics_to_file`] uses `toml_edit` to replace the `[[topics]]`
//!   array while leaving the `[plan]` table, its comments and formatting
//!   untouched.
//! - Completion state lives next to the plan as `<stem>.progress.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use toml_edit::{ArrayOfTables, DocumentMut, Item, Table, value};

use studyplan_core::models::Topic;
use studyplan_core::plan::{PlanToml, parse_plan_toml};
use studyplan_core::progress::CompletionState;

/// Read and validate a plan file.
pub fn load_plan(path: &Path) -> Result<PlanToml> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read plan file: {}", path.display()))?;
    parse_plan_toml(&content)
        .with_context(|| format!("failed to parse plan file: {}", path.display()))
}

/// Read a plan file without semantic validation.
pub fn read_plan_unvalidated(path: &Path) -> Result<PlanToml> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read plan file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("failed to parse TOML from {}", path.display()))
}

/// Write a brand-new plan file.
pub fn write_new_plan(path: &Path, plan: &PlanToml) -> Result<()> {
    let contents = toml::to_string_pretty(plan).context("failed to serialize plan")?;
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

/// Replace the `[[topics]]` array of an existing plan file with `topics`,
/// preserving everything else in the document.
pub fn write_topics_to_file(path: &Path, topics: &[Topic]) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let mut doc: DocumentMut = content
        .parse::<DocumentMut>()
        .with_context(|| format!("failed to parse {} as TOML document", path.display()))?;

    let mut array = ArrayOfTables::new();
    for topic in topics {
        let mut table = Table::new();
        table["name"] = value(topic.name.as_str());
        table["difficulty"] = value(topic.difficulty.to_string());
        table["hours"] = value(i64::from(topic.estimated_hours));
        array.push(table);
    }

    if array.is_empty() {
        doc.remove("topics");
    } else {
        doc["topics"] = Item::ArrayOfTables(array);
    }

    std::fs::write(path, doc.to_string())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Path of the completion side-file for `plan_path`.
pub fn progress_path(plan_path: &Path) -> PathBuf {
    plan_path.with_extension("progress.toml")
}

/// Load completion state; a missing side-file means nothing is done yet.
pub fn load_progress(plan_path: &Path) -> Result<CompletionState> {
    let path = progress_path(plan_path);
    if !path.exists() {
        return Ok(CompletionState::default());
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read progress file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("failed to parse progress file {}", path.display()))
}

pub fn save_progress(plan_path: &Path, state: &CompletionState) -> Result<()> {
    let path = progress_path(plan_path);
    let contents = toml::to_string_pretty(state).context("failed to serialize progress")?;
    std::fs::write(&path, contents)
        .with_context(|| format!("failed to write progress file {}", path.display()))
}
