//! `studyplan build` command: run the scheduler and render the result.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use studyplan_core::models::PlanResult;
use studyplan_core::plan::request_from_toml;
use studyplan_core::schedule::build_schedule;

use crate::config::StudyplanConfig;
use crate::plan_file;
use crate::render::{self, OutputFormat};

/// Load the plan at `path` and build its schedule for `config.today`.
pub fn build_plan(path: &Path, config: &StudyplanConfig) -> Result<PlanResult> {
    let plan_toml = plan_file::load_plan(path)?;
    let request = request_from_toml(
        &plan_toml,
        config.daily_hours_override,
        Some(config.default_daily_hours),
    )
    .with_context(|| format!("invalid plan file: {}", path.display()))?;

    let result = build_schedule(&request, config.today)
        .with_context(|| format!("cannot schedule {}", path.display()))?;

    tracing::info!(
        plan = %path.display(),
        today = %config.today,
        daily_hours = request.daily_capacity_hours,
        tasks = result.tasks.len(),
        "plan built"
    );
    Ok(result)
}

/// Print feasibility warnings to stderr.
pub fn report_warnings(plan: &PlanResult) {
    for warning in plan.warnings() {
        tracing::warn!(%warning, "plan warning");
        eprintln!("warning: {warning}");
    }
}

/// Run the build command.
pub fn run_build(
    path: &Path,
    format: OutputFormat,
    output: Option<&Path>,
    config: &StudyplanConfig,
) -> Result<()> {
    let plan = build_plan(path, config)?;
    report_warnings(&plan);

    let mut writer: Box<dyn Write> = if let Some(out_path) = output {
        Box::new(
            std::fs::File::create(out_path)
                .with_context(|| format!("cannot create output file: {}", out_path.display()))?,
        )
    } else {
        Box::new(std::io::stdout().lock())
    };

    render::render(format, &plan, None, &mut *writer)?;
    writer.flush()?;

    if let Some(out_path) = output {
        println!("Wrote {} tasks to {}", plan.tasks.len(), out_path.display());
    }

    Ok(())
}
