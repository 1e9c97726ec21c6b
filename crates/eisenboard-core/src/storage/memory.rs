//! In-memory task store, seeded with demo tasks when nothing else works.

use chrono::{DateTime, NaiveDate, Utc};

use super::store::{StoreKind, TaskStore};
use crate::error::{CoreError, Result};
use crate::task::{NewTask, Priority, StoredEvaluation, Task, TaskPatch, TaskStatus};

/// Sample tasks covering three quadrants. Ids are negative so they never
/// collide with ids handed out by a real backend.
pub fn demo_tasks(now: DateTime<Utc>) -> Vec<Task> {
    let demo = |id: i64,
                title: &str,
                description: &str,
                due: (i32, u32, u32),
                status: TaskStatus,
                flags: (bool, bool),
                scores: (f64, f64)| Task {
        id,
        title: title.to_string(),
        description: description.to_string(),
        priority: Priority::Medium,
        due_date: NaiveDate::from_ymd_opt(due.0, due.1, due.2),
        completed: status == TaskStatus::Done,
        status: Some(status),
        created_at: now,
        evaluation: Some(StoredEvaluation {
            is_important: flags.0,
            is_urgent: flags.1,
            importance_score: scores.0,
            urgency_score: scores.1,
            time_urgency_score: None,
            question_urgency_score: None,
        }),
        estimated_duration: None,
        start_deadline: None,
    };

    vec![
        demo(
            -1,
            "Key client presentation",
            "Prepare the deck for the major client",
            (2025, 8, 5),
            TaskStatus::Todo,
            (true, true),
            (0.8, 0.9),
        ),
        demo(
            -2,
            "Team training",
            "Organize the onboarding session for the team",
            (2025, 9, 15),
            TaskStatus::InProgress,
            (true, false),
            (0.7, 0.3),
        ),
        demo(
            -3,
            "Answer emails",
            "Work through the inbox",
            (2025, 8, 1),
            TaskStatus::Todo,
            (false, true),
            (0.2, 0.8),
        ),
    ]
}

/// Task list held in memory. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct DemoStore {
    tasks: Vec<Task>,
}

impl DemoStore {
    /// Store seeded with [`demo_tasks`].
    pub fn new() -> Self {
        Self::with_tasks(demo_tasks(Utc::now()))
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    fn find_mut(&mut self, id: i64) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(CoreError::NotFound(id))
    }

    fn next_id(&self) -> i64 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0).max(0) + 1
    }
}

impl TaskStore for DemoStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Demo
    }

    /// Same order as the SQLite backend: priority, then newest first.
    fn list(&self) -> Result<Vec<Task>> {
        let mut tasks = self.tasks.clone();
        tasks.sort_by(|a, b| {
            b.priority
                .rank()
                .cmp(&a.priority.rank())
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(tasks)
    }

    fn get(&self, id: i64) -> Result<Task> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(CoreError::NotFound(id))
    }

    fn create(&mut self, task: NewTask) -> Result<Task> {
        task.validate()?;
        let task = Task::from_new(self.next_id(), task, Utc::now());
        self.tasks.push(task.clone());
        Ok(task)
    }

    fn update(&mut self, id: i64, patch: &TaskPatch) -> Result<Task> {
        let task = self.find_mut(id)?;
        patch.apply(task)?;
        Ok(task.clone())
    }

    fn toggle(&mut self, id: i64) -> Result<Task> {
        let task = self.find_mut(id)?;
        task.toggle();
        Ok(task.clone())
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Err(CoreError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Quadrant;

    #[test]
    fn demo_tasks_cover_three_quadrants() {
        let tasks = demo_tasks(Utc::now());
        let quadrants: Vec<_> = tasks.iter().map(Task::quadrant).collect();
        assert_eq!(
            quadrants,
            vec![
                Quadrant::UrgentImportant,
                Quadrant::ImportantNotUrgent,
                Quadrant::UrgentNotImportant
            ]
        );
        assert!(tasks.iter().all(|t| t.id < 0));
        assert_eq!(tasks[1].status(), TaskStatus::InProgress);
    }

    #[test]
    fn new_tasks_get_positive_ids() {
        let mut store = DemoStore::new();
        let first = store.create(NewTask::new("Local task")).unwrap();
        let second = store.create(NewTask::new("Another")).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.status(), TaskStatus::Todo);
        assert_eq!(store.list().unwrap().len(), 5);
    }

    #[test]
    fn list_orders_by_priority_then_newest() {
        let mut store = DemoStore::default();
        let low = store
            .create(NewTask::new("Low").priority(Priority::Low))
            .unwrap();
        let high = store
            .create(NewTask::new("High").priority(Priority::High))
            .unwrap();
        let medium = store.create(NewTask::new("Medium")).unwrap();
        let ids: Vec<i64> = store.list().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![high.id, medium.id, low.id]);
    }

    #[test]
    fn missing_ids_are_not_found() {
        let mut store = DemoStore::default();
        assert!(matches!(store.get(9), Err(CoreError::NotFound(9))));
        assert!(matches!(store.toggle(9), Err(CoreError::NotFound(9))));
        assert!(matches!(store.delete(9), Err(CoreError::NotFound(9))));
    }

    #[test]
    fn update_and_delete_demo_task() {
        let mut store = DemoStore::new();
        let done = store.update(-3, &TaskPatch::status(TaskStatus::Done)).unwrap();
        assert!(done.completed);
        store.delete(-3).unwrap();
        assert_eq!(store.list().unwrap().len(), 2);
    }
}
