//! Output formats for a built schedule: text, JSON and CSV.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use studyplan_core::models::{PlanResult, PlanWarning};
use studyplan_core::progress::CompletionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Serialize)]
struct JsonExport<'a> {
    #[serde(flatten)]
    plan: &'a PlanResult,
    warnings: Vec<PlanWarning>,
}

pub fn render(
    format: OutputFormat,
    plan: &PlanResult,
    progress: Option<&CompletionState>,
    out: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Text => render_text(plan, progress, out),
        OutputFormat::Json => render_json(plan, out),
        OutputFormat::Csv => render_csv(plan, out),
    }
}

/// Header plus tasks grouped by day. With `progress`, each task gets a
/// `[x]`/`[ ]` marker.
pub fn render_text(
    plan: &PlanResult,
    progress: Option<&CompletionState>,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(
        out,
        "Exam: {} on {} ({} day{} away)",
        plan.exam_name,
        plan.exam_date,
        plan.days_until_exam,
        if plan.days_until_exam == 1 { "" } else { "s" }
    )?;
    writeln!(
        out,
        "Study load: {}h estimated / {}h available",
        plan.total_estimated_hours, plan.total_available_hours
    )?;

    let id_w = plan.tasks.iter().map(|t| t.id.len()).max().unwrap_or(2).max(2);
    let topic_w = plan
        .tasks
        .iter()
        .map(|t| t.topic.len())
        .max()
        .unwrap_or(5)
        .max(5);

    for (date, tasks) in plan.tasks_by_date() {
        writeln!(out)?;
        writeln!(out, "{}", date.format("%Y-%m-%d (%a)"))?;
        for task in tasks {
            let marker = match progress {
                Some(state) if state.is_complete(&task.id) => "[x] ",
                Some(_) => "[ ] ",
                None => "",
            };
            writeln!(
                out,
                "  {marker}{:<id_w$}  {:<12}  {:<topic_w$}  {:>3}h  {}",
                task.id,
                task.kind.to_string(),
                task.topic,
                task.hours,
                task.difficulty,
            )?;
        }
    }
    Ok(())
}

pub fn render_json(plan: &PlanResult, out: &mut dyn Write) -> Result<()> {
    let export = JsonExport {
        plan,
        warnings: plan.warnings(),
    };
    serde_json::to_writer_pretty(&mut *out, &export)?;
    writeln!(out)?;
    Ok(())
}

pub fn render_csv(plan: &PlanResult, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "id,date,topic,type,hours,difficulty")?;
    for task in &plan.tasks {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            csv_field(&task.id),
            task.date,
            csv_field(&task.topic),
            task.kind,
            task.hours,
            task.difficulty,
        )?;
    }
    Ok(())
}

/// Quote a field when it contains a delimiter, quote or newline.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_owned()
    }
}
