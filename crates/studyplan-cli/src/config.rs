//! Configuration file management for studyplan.
//!
//! Provides a TOML-based config file at `~/.config/studyplan/config.toml` and
//! the resolution chains used by every command:
//! - daily hours: CLI flag > plan file > `STUDYPLAN_DAILY_HOURS` env >
//!   config file > default
//! - today: CLI flag > `STUDYPLAN_TODAY` env > local clock

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily hours used when nothing else is configured.
pub const DEFAULT_DAILY_HOURS: u32 = 4;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub defaults: DefaultsSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DefaultsSection {
    /// Study hours per day for plans that do not set `daily_hours`.
    pub daily_hours: u32,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the studyplan config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/studyplan` or
/// `~/.config/studyplan`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("studyplan");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("studyplan")
}

/// Return the path to the studyplan config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved settings, ready for use by a command.
#[derive(Debug, Clone)]
pub struct StudyplanConfig {
    /// The date schedules are built from.
    pub today: NaiveDate,
    /// `--daily-hours` from the command line, beats the plan file.
    pub daily_hours_override: Option<u32>,
    /// Used when neither the flag nor the plan file sets daily hours.
    pub default_daily_hours: u32,
}

impl StudyplanConfig {
    /// Resolve settings from CLI flags, environment and config file.
    pub fn resolve(cli_today: Option<NaiveDate>, cli_daily_hours: Option<u32>) -> Result<Self> {
        if cli_daily_hours == Some(0) {
            bail!("--daily-hours must be at least 1");
        }

        let today = match cli_today {
            Some(date) => date,
            None => match std::env::var("STUDYPLAN_TODAY") {
                Ok(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                    .with_context(|| {
                        format!("STUDYPLAN_TODAY is not a YYYY-MM-DD date: {value:?}")
                    })?,
                Err(_) => chrono::Local::now().date_naive(),
            },
        };

        let default_daily_hours = if let Ok(value) = std::env::var("STUDYPLAN_DAILY_HOURS") {
            let hours: u32 = value
                .trim()
                .parse()
                .with_context(|| format!("STUDYPLAN_DAILY_HOURS is not a number: {value:?}"))?;
            if hours == 0 {
                bail!("STUDYPLAN_DAILY_HOURS must be at least 1");
            }
            hours
        } else if config_path().exists() {
            let cfg = load_config()?;
            if cfg.defaults.daily_hours == 0 {
                bail!(
                    "defaults.daily_hours in {} must be at least 1",
                    config_path().display()
                );
            }
            cfg.defaults.daily_hours
        } else {
            DEFAULT_DAILY_HOURS
        };

        Ok(Self {
            today,
            daily_hours_override: cli_daily_hours,
            default_daily_hours,
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
