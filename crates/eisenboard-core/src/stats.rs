//! Board statistics.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::scoring::Quadrant;
use crate::task::{Priority, Task, TaskStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStats {
    pub total: usize,
    pub completed: usize,
    /// Percent, one decimal.
    pub completion_rate: f64,
    pub by_priority: BTreeMap<String, usize>,
    pub by_status: BTreeMap<String, usize>,
    pub evaluated: usize,
    pub by_quadrant: BTreeMap<String, usize>,
}

impl BoardStats {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut by_priority: BTreeMap<String, usize> = Priority::ALL
            .iter()
            .map(|p| (p.to_string(), 0))
            .collect();
        let mut by_status: BTreeMap<String, usize> = TaskStatus::ALL
            .iter()
            .map(|s| (s.to_string(), 0))
            .collect();
        let mut by_quadrant: BTreeMap<String, usize> = Quadrant::ALL
            .iter()
            .map(|q| (q.as_tag().to_string(), 0))
            .collect();

        let mut total = 0;
        let mut completed = 0;
        let mut evaluated = 0;
        for task in tasks {
            total += 1;
            if task.completed {
                completed += 1;
            }
            *by_priority.entry(task.priority.to_string()).or_default() += 1;
            *by_status.entry(task.status().to_string()).or_default() += 1;
            if let Some(evaluation) = &task.evaluation {
                evaluated += 1;
                *by_quadrant
                    .entry(evaluation.quadrant().as_tag().to_string())
                    .or_default() += 1;
            }
        }

        Self {
            total,
            completed,
            completion_rate: completion_rate(completed, total),
            by_priority,
            by_status,
            evaluated,
            by_quadrant,
        }
    }
}

fn completion_rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = completed as f64 / total as f64 * 100.0;
    (percent * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{NewTask, StoredEvaluation};
    use chrono::{TimeZone, Utc};

    fn task(id: i64, priority: Priority) -> Task {
        Task::from_new(
            id,
            NewTask::new("t").priority(priority),
            Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn empty_board_has_zero_rate() {
        let stats = BoardStats::from_tasks(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completion_rate, 0.0);
        assert_eq!(stats.by_priority["high"], 0);
        assert_eq!(stats.by_quadrant["urgent-important"], 0);
    }

    #[test]
    fn counts_and_rounds() {
        let mut done = task(1, Priority::High);
        done.toggle();
        let mut evaluated = task(2, Priority::Low);
        evaluated.evaluation = Some(StoredEvaluation {
            is_important: true,
            is_urgent: false,
            importance_score: 0.67,
            urgency_score: 0.3,
            time_urgency_score: None,
            question_urgency_score: None,
        });
        let mut doing = task(3, Priority::Medium);
        doing.set_status(TaskStatus::InProgress);
        let tasks = vec![done, evaluated, doing];

        let stats = BoardStats::from_tasks(&tasks);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.completion_rate, 33.3);
        assert_eq!(stats.by_priority["low"], 1);
        assert_eq!(stats.by_status["done"], 1);
        assert_eq!(stats.by_status["inprogress"], 1);
        assert_eq!(stats.evaluated, 1);
        assert_eq!(stats.by_quadrant["important-not-urgent"], 1);
    }
}
