//! Kanban board view over a task list.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::cmp::Ordering;

use crate::scoring::{time_urgency, Quadrant, UrgencyLabel};
use crate::task::{Priority, Task, TaskStatus};

/// Board ordering: higher quadrant rank first, then newest first. Equal
/// timestamps fall back to the higher id.
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    b.quadrant()
        .rank()
        .cmp(&a.quadrant().rank())
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.id.cmp(&a.id))
}

/// Sort in place by [`compare_tasks`].
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(compare_tasks);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Board {
    pub todo: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub done: Vec<Task>,
}

impl Board {
    /// Partition by status and sort every column.
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut board = Board::default();
        for task in tasks {
            board.column_mut(task.status()).push(task);
        }
        for status in TaskStatus::ALL {
            sort_tasks(board.column_mut(status));
        }
        board
    }

    pub fn column(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    fn column_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        }
    }

    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Columns in display order with their status.
    pub fn columns(&self) -> impl Iterator<Item = (TaskStatus, &[Task])> + '_ {
        TaskStatus::ALL
            .into_iter()
            .map(move |status| (status, self.column(status)))
    }
}

/// Render-ready summary of one task.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCard {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    pub start_deadline: Option<NaiveDate>,
    pub estimated_duration: Option<f64>,
    pub quadrant: Quadrant,
    pub badge_text: &'static str,
    pub badge_class: String,
    /// Time urgency of the start deadline; absent without one.
    pub time_urgency: Option<f64>,
    pub urgency_label: Option<UrgencyLabel>,
}

impl TaskCard {
    pub fn new(task: &Task, now: DateTime<Utc>) -> Self {
        let quadrant = task.quadrant();
        let time_urgency = task
            .start_deadline
            .map(|start_by| time_urgency(Some(start_by), now));

        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            status: task.status(),
            completed: task.completed,
            due_date: task.due_date,
            start_deadline: task.start_deadline,
            estimated_duration: task.estimated_duration,
            quadrant,
            badge_text: quadrant.badge_text(),
            badge_class: quadrant.badge_class(),
            time_urgency,
            urgency_label: time_urgency.map(UrgencyLabel::from_score),
        }
    }
}
