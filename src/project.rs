use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{Priority, Task, TaskStatus};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Active,
    Completed,
    OnHold,
}

impl ProjectStatus {
    #[cfg(test)]
    pub const ALL: [ProjectStatus; 3] = [Self::Active, Self::Completed, Self::OnHold];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub priority: Priority,
    pub due_date: NaiveDate,
    pub team: Vec<String>,
    /// Authored percentage, unrelated to how many tasks are done.
    pub progress: u8,
    pub tasks: Vec<Task>,
}

/// Task counts shown on the detail view.
///
/// Tasks in review only contribute to `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub todo: usize,
}

impl Project {
    pub fn task_stats(&self) -> TaskStats {
        let count = |status: TaskStatus| self.tasks.iter().filter(|t| t.status == status).count();
        TaskStats {
            total: self.tasks.len(),
            completed: count(TaskStatus::Done),
            in_progress: count(TaskStatus::InProgress),
            todo: count(TaskStatus::Todo),
        }
    }

    /// Whole days until the due date (UTC midnight), rounded up. Negative once overdue.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        let due = self.due_date.and_time(NaiveTime::MIN).and_utc();
        let millis = (due - now).num_milliseconds();
        -(-millis).div_euclid(MILLIS_PER_DAY)
    }

    /// Case-insensitive substring match over name, description and team members.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .team
                .iter()
                .any(|member| member.to_lowercase().contains(needle))
    }
}

pub fn initials(name: &str) -> String {
    name.split(' ').filter_map(|part| part.chars().next()).collect()
}
