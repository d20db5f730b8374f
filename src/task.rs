use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    #[cfg(test)]
    pub const ALL: [TaskStatus; 4] = [Self::Todo, Self::InProgress, Self::Review, Self::Done];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    #[cfg(test)]
    pub const ALL: [Priority; 3] = [Self::Low, Self::Medium, Self::High];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee: String,
    pub due_date: NaiveDate,
    pub tags: Vec<String>, // first tag is the primary one
}

impl Task {
    pub fn primary_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }

    /// Number of tags beyond the primary one.
    pub fn extra_tag_count(&self) -> usize {
        self.tags.len().saturating_sub(1)
    }

    pub fn assignee_first_name(&self) -> &str {
        self.assignee.split(' ').next().unwrap_or_default()
    }
}
