//! Completion tracking for scheduled tasks.
//!
//! Completion is caller-owned state keyed by task id. The schedule builder
//! never reads or writes it; rebuilding a plan keeps whatever ids still
//! exist and [`CompletionState::prune`] drops the rest.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::PlanResult;

/// Task id -> done flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionState {
    #[serde(default)]
    pub completed: BTreeMap<String, bool>,
}

/// Progress of a plan against a [`CompletionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub completed_tasks: usize,
    pub total_tasks: usize,
    pub completed_hours: u64,
    pub total_hours: u64,
}

impl ProgressSummary {
    /// Share of scheduled hours completed, 0-100. An empty plan counts as done.
    pub fn percent(&self) -> u8 {
        if self.total_hours == 0 {
            return 100;
        }
        let pct = self.completed_hours * 100 / self.total_hours;
        u8::try_from(pct.min(100)).unwrap_or(100)
    }
}

impl CompletionState {
    pub fn is_complete(&self, id: &str) -> bool {
        self.completed.get(id).copied().unwrap_or(false)
    }

    pub fn set(&mut self, id: &str, done: bool) {
        if done {
            self.completed.insert(id.to_owned(), true);
        } else {
            self.completed.remove(id);
        }
    }

    /// Flip the flag for `id` and return the new value.
    pub fn toggle(&mut self, id: &str) -> bool {
        let done = !self.is_complete(id);
        self.set(id, done);
        done
    }

    /// Drop ids that no longer appear in `plan`. Returns how many were removed.
    pub fn prune(&mut self, plan: &PlanResult) -> usize {
        let before = self.completed.len();
        self.completed
            .retain(|id, _| plan.tasks.iter().any(|t| &t.id == id));
        before - self.completed.len()
    }

    pub fn summary(&self, plan: &PlanResult) -> ProgressSummary {
        let mut summary = ProgressSummary {
            completed_tasks: 0,
            total_tasks: plan.tasks.len(),
            completed_hours: 0,
            total_hours: 0,
        };
        for task in &plan.tasks {
            let hours = u64::from(task.hours);
            summary.total_hours += hours;
            if self.is_complete(&task.id) {
                summary.completed_tasks += 1;
                summary.completed_hours += hours;
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, ScheduledTask, Topic};
    use chrono::NaiveDate;

    fn plan() -> PlanResult {
        let d = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let topic = Topic::new("Cells", Difficulty::Hard, 3);
        PlanResult {
            exam_name: "Bio".into(),
            exam_date: NaiveDate::from_ymd_opt(2026, 3, 11).unwrap(),
            days_until_exam: 10,
            total_estimated_hours: 3,
            total_available_hours: 20,
            tasks: vec![
                ScheduledTask::study(&topic, d, 3),
                ScheduledTask::review(&topic, d, 1),
            ],
        }
    }

    #[test]
    fn toggle_flips_and_reports_new_value() {
        let mut state = CompletionState::default();
        assert!(state.toggle("Cells-review"));
        assert!(state.is_complete("Cells-review"));
        assert!(!state.toggle("Cells-review"));
        assert!(!state.is_complete("Cells-review"));
        assert!(state.completed.is_empty());
    }

    #[test]
    fn summary_counts_hours_of_completed_tasks() {
        let mut state = CompletionState::default();
        state.set("Cells-2026-03-01-study", true);
        let summary = state.summary(&plan());
        assert_eq!(summary.completed_tasks, 1);
        assert_eq!(summary.total_tasks, 2);
        assert_eq!(summary.completed_hours, 3);
        assert_eq!(summary.total_hours, 4);
        assert_eq!(summary.percent(), 75);
    }

    #[test]
    fn prune_drops_unknown_ids() {
        let mut state = CompletionState::default();
        state.set("Cells-review", true);
        state.set("Old-topic-review", true);
        assert_eq!(state.prune(&plan()), 1);
        assert!(state.is_complete("Cells-review"));
        assert!(!state.is_complete("Old-topic-review"));
    }

    #[test]
    fn serializes_as_toml_table() {
        let mut state = CompletionState::default();
        state.set("final-review", true);
        let text = toml::to_string(&state).unwrap();
        let back: CompletionState = toml::from_str(&text).unwrap();
        assert_eq!(back, state);
        let empty: CompletionState = toml::from_str("").unwrap();
        assert!(empty.completed.is_empty());
    }
}
