//! `studyplan topic` subcommands: edit the topic list of a plan file.
//!
//! Implements:
//! - `studyplan topic list <file>`
//! - `studyplan topic add <file> <name> --difficulty D --hours H`
//! - `studyplan topic set <file> <n> [--name] [--difficulty] [--hours]`
//! - `studyplan topic remove <file> <n>`
//!
//! Topic numbers are 1-based, as printed by `topic list`.

use std::path::Path;

use anyhow::{Context, Result, bail};

use studyplan_core::models::{Difficulty, FINAL_REVIEW_ID, Topic, review_id};
use studyplan_core::plan::parser::parse_topics;
use studyplan_core::topics;

use crate::TopicCommands;
use crate::plan_file;

/// Dispatch a `TopicCommands` variant to the appropriate handler.
pub fn run_topic_command(command: TopicCommands) -> Result<()> {
    match command {
        TopicCommands::List { file } => cmd_list(&file),
        TopicCommands::Add {
            file,
            name,
            difficulty,
            hours,
        } => cmd_add(&file, name, difficulty, hours),
        TopicCommands::Set {
            file,
            number,
            name,
            difficulty,
            hours,
        } => cmd_set(&file, number, name, difficulty, hours),
        TopicCommands::Remove { file, number } => cmd_remove(&file, number),
    }
}

fn read_topics(file: &Path) -> Result<Vec<Topic>> {
    let plan = plan_file::read_plan_unvalidated(file)?;
    parse_topics(&plan.topics).with_context(|| format!("invalid topic in {}", file.display()))
}

/// Map a 1-based topic number onto an index into `topics`.
fn to_index(number: usize, topics: &[Topic]) -> Result<usize> {
    if number == 0 || number > topics.len() {
        bail!(
            "topic #{number} is out of range (plan has {} topics)",
            topics.len()
        );
    }
    Ok(number - 1)
}

fn check_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("topic name must not be empty");
    }
    Ok(())
}

fn cmd_list(file: &Path) -> Result<()> {
    let topics = read_topics(file)?;
    if topics.is_empty() {
        println!("No topics yet. Use `studyplan topic add` to add one.");
        return Ok(());
    }

    let name_w = topics.iter().map(|t| t.name.len()).max().unwrap_or(4).max(4);
    println!("{:>3}  {:<name_w$}  {:<10}  {:>5}", "#", "NAME", "DIFFICULTY", "HOURS");
    for (i, topic) in topics.iter().enumerate() {
        println!(
            "{:>3}  {:<name_w$}  {:<10}  {:>5}",
            i + 1,
            topic.name,
            topic.difficulty.to_string(),
            topic.estimated_hours
        );
    }
    let total: u64 = topics.iter().map(|t| u64::from(t.estimated_hours)).sum();
    println!("Total: {total}h");
    Ok(())
}

fn cmd_add(file: &Path, name: String, difficulty: Difficulty, hours: u32) -> Result<()> {
    check_name(&name)?;
    let current = read_topics(file)?;
    if review_id(&name) == FINAL_REVIEW_ID || current.iter().any(|t| t.name == name) {
        tracing::warn!(topic = %name, "topic review id collides with another task id");
    }
    let updated = topics::insert(&current, Topic::new(name, difficulty, hours));
    plan_file::write_topics_to_file(file, &updated)?;
    println!("Added topic #{} to {}.", updated.len(), file.display());
    Ok(())
}

fn cmd_set(
    file: &Path,
    number: usize,
    name: Option<String>,
    difficulty: Option<Difficulty>,
    hours: Option<u32>,
) -> Result<()> {
    if name.is_none() && difficulty.is_none() && hours.is_none() {
        bail!("nothing to change; pass --name, --difficulty or --hours");
    }
    if let Some(ref n) = name {
        check_name(n)?;
    }

    let current = read_topics(file)?;
    let index = to_index(number, &current)?;
    let updated = topics::update_at(&current, index, |old| Topic {
        name: name.unwrap_or_else(|| old.name.clone()),
        difficulty: difficulty.unwrap_or(old.difficulty),
        estimated_hours: hours.unwrap_or(old.estimated_hours),
    })?;
    plan_file::write_topics_to_file(file, &updated)?;
    println!("Updated topic #{number} in {}.", file.display());
    Ok(())
}

fn cmd_remove(file: &Path, number: usize) -> Result<()> {
    let current = read_topics(file)?;
    let index = to_index(number, &current)?;
    let removed_name = current[index].name.clone();
    let updated = topics::remove_at(&current, index)?;
    plan_file::write_topics_to_file(file, &updated)?;
    println!("Removed topic #{number} ({removed_name}) from {}.", file.display());
    Ok(())
}
