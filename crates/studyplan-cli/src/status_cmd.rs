//! `studyplan status` and `studyplan toggle`: completion tracking on top of a
//! freshly built schedule.

use std::path::Path;

use anyhow::{Result, bail};

use crate::build_cmd::{build_plan, report_warnings};
use crate::config::StudyplanConfig;
use crate::plan_file;
use crate::render;

/// Show progress and the schedule with completion markers.
pub fn run_status(path: &Path, config: &StudyplanConfig) -> Result<()> {
    let plan = build_plan(path, config)?;
    let mut progress = plan_file::load_progress(path)?;

    // Ids can disappear when topics or the date change; forget them.
    let pruned = progress.prune(&plan);
    if pruned > 0 {
        tracing::info!(pruned, "dropped completion flags for tasks no longer in the plan");
        plan_file::save_progress(path, &progress)?;
    }

    report_warnings(&plan);

    let summary = progress.summary(&plan);
    println!(
        "Progress: {}/{} tasks, {}/{}h ({}%)",
        summary.completed_tasks,
        summary.total_tasks,
        summary.completed_hours,
        summary.total_hours,
        summary.percent()
    );

    let due_today: Vec<&str> = plan
        .tasks
        .iter()
        .filter(|t| t.date <= config.today && !progress.is_complete(&t.id))
        .map(|t| t.id.as_str())
        .collect();
    if !due_today.is_empty() {
        println!("Due by today: {}", due_today.join(", "));
    }
    println!();

    let mut stdout = std::io::stdout().lock();
    render::render_text(&plan, Some(&progress), &mut stdout)
}

/// Flip the completion flag of `task_id`.
pub fn run_toggle(path: &Path, task_id: &str, config: &StudyplanConfig) -> Result<()> {
    let plan = build_plan(path, config)?;
    let Some(task) = plan.find_task(task_id) else {
        bail!(
            "no task with id {task_id:?} in {}\nRun `studyplan build {}` to list task ids.",
            path.display(),
            path.display()
        );
    };

    let mut progress = plan_file::load_progress(path)?;
    let done = progress.toggle(&task.id);
    plan_file::save_progress(path, &progress)?;

    if done {
        println!("Marked {} as done.", task.id);
    } else {
        println!("Marked {} as not done.", task.id);
    }
    Ok(())
}
