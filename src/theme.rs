//! Labels and colours keyed by status and priority.

use ratatui::style::{Color, Modifier, Style};

use crate::project::ProjectStatus;
use crate::task::{Priority, TaskStatus};

pub fn project_status_label(status: ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::Active => "Active",
        ProjectStatus::Completed => "Completed",
        ProjectStatus::OnHold => "On Hold",
    }
}

pub fn project_status_color(status: ProjectStatus) -> Color {
    match status {
        ProjectStatus::Active => Color::Blue,
        ProjectStatus::Completed => Color::Green,
        ProjectStatus::OnHold => Color::Gray,
    }
}

pub fn task_status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "To Do",
        TaskStatus::InProgress => "In Progress",
        TaskStatus::Review => "Review",
        TaskStatus::Done => "Done",
    }
}

pub fn task_status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Todo => Color::DarkGray,
        TaskStatus::InProgress => Color::Cyan,
        TaskStatus::Review => Color::Yellow,
        TaskStatus::Done => Color::Green,
    }
}

pub fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
    }
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::Gray,
        Priority::Medium => Color::Yellow,
        Priority::High => Color::Red,
    }
}

/// Reverse-video badge in the given colour.
pub fn badge(color: Color) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(color)
        .add_modifier(Modifier::BOLD)
}

pub fn focused_border() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}
