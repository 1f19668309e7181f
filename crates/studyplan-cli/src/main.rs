mod build_cmd;
mod config;
mod plan_file;
mod render;
mod status_cmd;
mod topic_cmds;

#[cfg(test)]
mod test_util;

use std::path::{Path, PathBuf};

use anyhow::bail;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};

use studyplan_core::models::Difficulty;
use studyplan_core::plan::{PlanMeta, PlanToml};

use config::StudyplanConfig;
use render::OutputFormat;

#[derive(Parser)]
#[command(
    name = "studyplan",
    about = "Turn exam topics and a deadline into a daily study schedule"
)]
struct Cli {
    /// Study hours per day (overrides the plan file and config)
    #[arg(long, global = true)]
    daily_hours: Option<u32>,

    /// Build the schedule as if today were this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a studyplan config file
    Init {
        /// Default study hours per day for plans that do not set one
        #[arg(long, default_value_t = config::DEFAULT_DAILY_HOURS)]
        default_hours: u32,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Create a new, empty plan file
    New {
        /// Path of the plan file to create
        file: PathBuf,
        /// Exam name
        #[arg(long)]
        exam: String,
        /// Exam date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Build and print the schedule for a plan file
    Build {
        /// Path to the plan TOML file
        file: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Output file path (defaults to stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show progress and the schedule with completion markers
    Status {
        /// Path to the plan TOML file
        file: PathBuf,
    },
    /// Mark a task as done, or as not done if it already is
    Toggle {
        /// Path to the plan TOML file
        file: PathBuf,
        /// Task id as printed by `studyplan build`
        task_id: String,
    },
    /// Edit the topic list of a plan file
    Topic {
        #[command(subcommand)]
        command: TopicCommands,
    },
    /// Print a shell completion script
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum TopicCommands {
    /// List topics with their numbers
    List {
        /// Path to the plan TOML file
        file: PathBuf,
    },
    /// Append a topic
    Add {
        /// Path to the plan TOML file
        file: PathBuf,
        /// Topic name
        name: String,
        /// easy, medium, or hard
        #[arg(long)]
        difficulty: Difficulty,
        /// Estimated study hours
        #[arg(long)]
        hours: u32,
    },
    /// Change fields of an existing topic
    Set {
        /// Path to the plan TOML file
        file: PathBuf,
        /// Topic number as shown by `topic list`
        number: usize,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New difficulty
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// New estimated hours
        #[arg(long)]
        hours: Option<u32>,
    },
    /// Remove a topic
    Remove {
        /// Path to the plan TOML file
        file: PathBuf,
        /// Topic number as shown by `topic list`
        number: usize,
    },
}

/// Execute the `studyplan init` command: write config file.
fn cmd_init(default_hours: u32, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }
    if default_hours == 0 {
        bail!("--default-hours must be at least 1");
    }

    let cfg = config::ConfigFile {
        defaults: config::DefaultsSection {
            daily_hours: default_hours,
        },
    };
    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  defaults.daily_hours = {default_hours}");
    Ok(())
}

/// Execute the `studyplan new` command: write a plan file with no topics.
fn cmd_new(
    file: &Path,
    exam: &str,
    date: NaiveDate,
    daily_hours: Option<u32>,
    force: bool,
) -> anyhow::Result<()> {
    if file.exists() && !force {
        bail!(
            "{} already exists\nUse --force to overwrite.",
            file.display()
        );
    }
    if exam.trim().is_empty() {
        bail!("--exam must not be empty");
    }
    if daily_hours == Some(0) {
        bail!("--daily-hours must be at least 1");
    }

    let plan = PlanToml {
        plan: PlanMeta {
            exam: exam.to_owned(),
            exam_date: date.format("%Y-%m-%d").to_string(),
            daily_hours: daily_hours.map(i64::from),
        },
        topics: Vec::new(),
    };
    plan_file::write_new_plan(file, &plan)?;

    println!("Plan written to {}", file.display());
    println!(
        "Next: add topics with `studyplan topic add {} <name> --difficulty <d> --hours <h>`.",
        file.display()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            default_hours,
            force,
        } => {
            cmd_init(default_hours, force)?;
        }
        Commands::New {
            file,
            exam,
            date,
            force,
        } => {
            cmd_new(&file, &exam, date, cli.daily_hours, force)?;
        }
        Commands::Build {
            file,
            format,
            output,
        } => {
            let resolved = StudyplanConfig::resolve(cli.today, cli.daily_hours)?;
            build_cmd::run_build(&file, format, output.as_deref(), &resolved)?;
        }
        Commands::Status { file } => {
            let resolved = StudyplanConfig::resolve(cli.today, cli.daily_hours)?;
            status_cmd::run_status(&file, &resolved)?;
        }
        Commands::Toggle { file, task_id } => {
            let resolved = StudyplanConfig::resolve(cli.today, cli.daily_hours)?;
            status_cmd::run_toggle(&file, &task_id, &resolved)?;
        }
        Commands::Topic { command } => {
            topic_cmds::run_topic_command(command)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "studyplan", &mut std::io::stdout());
        }
    }

    Ok(())
}
