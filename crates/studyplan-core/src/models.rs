use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Topic label used by the single final review task.
pub const ALL_TOPICS: &str = "All Topics";

/// Fixed id of the final review task.
pub const FINAL_REVIEW_ID: &str = "final-review";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How hard a topic is. Harder topics are scheduled first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Ordering rank: hard=3, medium=2, easy=1.
    pub fn rank(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        };
        f.write_str(s)
    }
}

impl FromStr for Difficulty {
    type Err = DifficultyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(DifficultyParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Difficulty`] string.
#[derive(Debug, Clone)]
pub struct DifficultyParseError(pub String);

impl fmt::Display for DifficultyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid difficulty: {:?}", self.0)
    }
}

impl std::error::Error for DifficultyParseError {}

// ---------------------------------------------------------------------------

/// Difficulty carried by a scheduled task.
///
/// Study and review tasks copy their topic's difficulty. The final review
/// covers every topic and carries [`TaskDifficulty::All`], which only exists
/// for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskDifficulty {
    Easy,
    Medium,
    Hard,
    All,
}

impl From<Difficulty> for TaskDifficulty {
    fn from(d: Difficulty) -> Self {
        match d {
            Difficulty::Easy => Self::Easy,
            Difficulty::Medium => Self::Medium,
            Difficulty::Hard => Self::Hard,
        }
    }
}

impl fmt::Display for TaskDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::All => "all",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------

/// Kind of a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Study,
    Review,
    FinalReview,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Study => "study",
            Self::Review => "review",
            Self::FinalReview => "final_review",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A unit of study material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub difficulty: Difficulty,
    pub estimated_hours: u32,
}

impl Topic {
    pub fn new(name: impl Into<String>, difficulty: Difficulty, estimated_hours: u32) -> Self {
        Self {
            name: name.into(),
            difficulty,
            estimated_hours,
        }
    }
}

/// One entry of the generated schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub id: String,
    pub date: NaiveDate,
    pub topic: String,
    pub kind: TaskKind,
    pub hours: u32,
    pub difficulty: TaskDifficulty,
}

impl ScheduledTask {
    /// Build a study task. The id combines topic, date and kind, which is
    /// unique because a topic gets at most one study chunk per day.
    pub fn study(topic: &Topic, date: NaiveDate, hours: u32) -> Self {
        Self {
            id: format!("{}-{}-{}", topic.name, date.format("%Y-%m-%d"), TaskKind::Study),
            date,
            topic: topic.name.clone(),
            kind: TaskKind::Study,
            hours,
            difficulty: topic.difficulty.into(),
        }
    }

    pub fn review(topic: &Topic, date: NaiveDate, hours: u32) -> Self {
        Self {
            id: review_id(&topic.name),
            date,
            topic: topic.name.clone(),
            kind: TaskKind::Review,
            hours,
            difficulty: topic.difficulty.into(),
        }
    }

    pub fn final_review(date: NaiveDate, hours: u32) -> Self {
        Self {
            id: FINAL_REVIEW_ID.to_owned(),
            date,
            topic: ALL_TOPICS.to_owned(),
            kind: TaskKind::FinalReview,
            hours,
            difficulty: TaskDifficulty::All,
        }
    }
}

/// Id of the review task for the topic called `topic`.
pub fn review_id(topic: &str) -> String {
    format!("{topic}-review")
}

/// Something a caller should surface to the user about a finished plan.
///
/// Never produced during scheduling; derived from a [`PlanResult`] on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanWarning {
    /// More study hours were requested than the days before the exam hold.
    Overcommitted {
        estimated_hours: u64,
        available_hours: u64,
    },
    /// Study work spills onto or past the exam date.
    StudyPastDeadline { last_study_date: NaiveDate },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overcommitted {
                estimated_hours,
                available_hours,
            } => write!(
                f,
                "plan is overcommitted: {estimated_hours}h of study estimated but only \
                 {available_hours}h available before the exam"
            ),
            Self::StudyPastDeadline { last_study_date } => write!(
                f,
                "study sessions run until {last_study_date}, on or after the exam date"
            ),
        }
    }
}

/// Output of the schedule builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResult {
    pub exam_name: String,
    pub exam_date: NaiveDate,
    pub days_until_exam: i64,
    pub total_estimated_hours: u64,
    pub total_available_hours: u64,
    pub tasks: Vec<ScheduledTask>,
}

impl PlanResult {
    /// True when the topics need more hours than the calendar provides.
    pub fn is_overcommitted(&self) -> bool {
        self.total_estimated_hours > self.total_available_hours
    }

    /// Caller-side feasibility checks.
    pub fn warnings(&self) -> Vec<PlanWarning> {
        let mut warnings = Vec::new();
        if self.is_overcommitted() {
            warnings.push(PlanWarning::Overcommitted {
                estimated_hours: self.total_estimated_hours,
                available_hours: self.total_available_hours,
            });
        }
        let last_study = self
            .tasks
            .iter()
            .filter(|t| t.kind == TaskKind::Study)
            .map(|t| t.date)
            .max();
        if let Some(last_study_date) = last_study.filter(|d| *d >= self.exam_date) {
            warnings.push(PlanWarning::StudyPastDeadline { last_study_date });
        }
        warnings
    }

    /// Tasks grouped by date, in chronological order. Within a day, tasks
    /// keep their schedule order.
    pub fn tasks_by_date(&self) -> Vec<(NaiveDate, Vec<&ScheduledTask>)> {
        let mut groups: Vec<(NaiveDate, Vec<&ScheduledTask>)> = Vec::new();
        for task in &self.tasks {
            match groups.last_mut() {
                Some((date, group)) if *date == task.date => group.push(task),
                _ => groups.push((task.date, vec![task])),
            }
        }
        groups
    }

    /// Sum of study hours scheduled for the named topic.
    pub fn study_hours_for(&self, topic: &str) -> u64 {
        self.tasks
            .iter()
            .filter(|t| t.kind == TaskKind::Study && t.topic == topic)
            .map(|t| u64::from(t.hours))
            .sum()
    }

    pub fn find_task(&self, id: &str) -> Option<&ScheduledTask> {
        self.tasks.iter().find(|t| t.id == id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
