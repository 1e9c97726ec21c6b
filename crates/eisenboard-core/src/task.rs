//! Task records as stored by every backend.
//!
//! Field names follow the task API's camelCase JSON so the same types
//! serialize for the remote store, the CLI output and the SQLite
//! `evaluation` column.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::deadline::start_by_date;
use crate::error::ValidationError;
use crate::scoring::{classify, Evaluation, Quadrant};

/// Kanban column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "inprogress",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "status".into(),
                message: format!("expected todo, inprogress or done, got '{s}'"),
            })
    }
}

/// Manual priority. Unknown values fall back to medium.
///
/// The task API and older databases spell priorities `basse`, `moyenne` and
/// `haute`; both vocabularies are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[serde(alias = "basse")]
    Low,
    #[default]
    #[serde(alias = "moyenne")]
    Medium,
    #[serde(alias = "haute")]
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Name used by the task API.
    pub fn api_name(&self) -> &'static str {
        match self {
            Priority::Low => "basse",
            Priority::Medium => "moyenne",
            Priority::High => "haute",
        }
    }

    /// Sort weight, high first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "basse" => Priority::Low,
            "high" | "haute" => Priority::High,
            _ => Priority::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The part of an [`Evaluation`] that is persisted with a task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEvaluation {
    pub is_important: bool,
    pub is_urgent: bool,
    #[serde(default)]
    pub importance_score: f64,
    #[serde(default)]
    pub urgency_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_urgency_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_urgency_score: Option<f64>,
}

impl StoredEvaluation {
    pub fn quadrant(&self) -> Quadrant {
        classify(self.is_important, self.is_urgent)
    }
}

impl From<&Evaluation> for StoredEvaluation {
    fn from(evaluation: &Evaluation) -> Self {
        Self {
            is_important: evaluation.is_important,
            is_urgent: evaluation.is_urgent,
            importance_score: evaluation.importance_score,
            urgency_score: evaluation.urgency_score,
            time_urgency_score: Some(evaluation.time_urgency_score),
            question_urgency_score: Some(evaluation.question_urgency_score),
        }
    }
}

impl From<Evaluation> for StoredEvaluation {
    fn from(evaluation: Evaluation) -> Self {
        Self::from(&evaluation)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::priority")]
    pub priority: Priority,
    #[serde(default, deserialize_with = "lenient::date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    /// Missing on legacy records; see [`Task::status`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(deserialize_with = "lenient::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        rename = "eisenhowerEvaluation",
        skip_serializing_if = "Option::is_none"
    )]
    pub evaluation: Option<StoredEvaluation>,
    /// Estimated effort in hours.
    #[serde(default, deserialize_with = "lenient::hours")]
    pub estimated_duration: Option<f64>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub start_deadline: Option<NaiveDate>,
}

impl Task {
    /// Materialize a new task under the id a backend assigned.
    pub fn from_new(id: i64, new: NewTask, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            priority: new.priority,
            due_date: new.due_date,
            completed: false,
            status: Some(TaskStatus::Todo),
            created_at,
            evaluation: new.evaluation,
            estimated_duration: new.estimated_duration,
            start_deadline: new.start_deadline,
        }
    }

    /// Column the task sits in; legacy records derive it from `completed`.
    pub fn status(&self) -> TaskStatus {
        self.status.unwrap_or(if self.completed {
            TaskStatus::Done
        } else {
            TaskStatus::Todo
        })
    }

    /// Quadrant of the stored evaluation; unevaluated tasks rank lowest.
    pub fn quadrant(&self) -> Quadrant {
        self.evaluation
            .as_ref()
            .map(StoredEvaluation::quadrant)
            .unwrap_or_default()
    }

    /// Flip completion. The task moves to `done` or back to `todo`.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
        self.status = Some(if self.completed {
            TaskStatus::Done
        } else {
            TaskStatus::Todo
        });
    }

    /// Move to another column, keeping `completed` in sync.
    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = Some(status);
        self.completed = status == TaskStatus::Done;
    }
}

/// Input for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub estimated_duration: Option<f64>,
    #[serde(default)]
    pub start_deadline: Option<NaiveDate>,
    #[serde(
        default,
        rename = "eisenhowerEvaluation",
        skip_serializing_if = "Option::is_none"
    )]
    pub evaluation: Option<StoredEvaluation>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set due date and effort; the start-by date is derived from both.
    pub fn schedule(mut self, due_date: Option<NaiveDate>, estimated_hours: Option<f64>) -> Self {
        self.due_date = due_date;
        self.estimated_duration = estimated_hours;
        self.start_deadline = start_by_date(due_date, estimated_hours);
        self
    }

    pub fn evaluation(mut self, evaluation: impl Into<StoredEvaluation>) -> Self {
        self.evaluation = Some(evaluation.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Blank("title".into()));
        }
        Ok(())
    }
}

/// Partial update. `None` leaves a field alone; for nullable fields
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_deadline: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(
        rename = "eisenhowerEvaluation",
        skip_serializing_if = "Option::is_none"
    )]
    pub evaluation: Option<Option<StoredEvaluation>>,
}

impl TaskPatch {
    /// Status change only.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Update due date and effort together with the derived start-by date.
    pub fn reschedule(mut self, due_date: Option<NaiveDate>, estimated_hours: Option<f64>) -> Self {
        self.due_date = Some(due_date);
        self.estimated_duration = Some(estimated_hours);
        self.start_deadline = Some(start_by_date(due_date, estimated_hours));
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyPatch);
        }
        if matches!(&self.title, Some(title) if title.trim().is_empty()) {
            return Err(ValidationError::Blank("title".into()));
        }
        Ok(())
    }

    /// Apply to `task`. A status change also sets `completed`, and wins over
    /// an explicit `completed` in the same patch.
    pub fn apply(&self, task: &mut Task) -> Result<(), ValidationError> {
        self.validate()?;

        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(hours) = self.estimated_duration {
            task.estimated_duration = hours;
        }
        if let Some(start_deadline) = self.start_deadline {
            task.start_deadline = start_deadline;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(status) = self.status {
            task.set_status(status);
        }
        if let Some(evaluation) = self.evaluation {
            task.evaluation = evaluation;
        }
        Ok(())
    }
}

/// Deserializers tolerant of what browser forms send: empty strings for
/// absent dates, numbers as strings, naive timestamps.
mod lenient {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    use super::Priority;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
    }

    pub fn priority<'de, D: Deserializer<'de>>(d: D) -> Result<Priority, D::Error> {
        Ok(Option::<String>::deserialize(d)?
            .map(|p| Priority::parse_lenient(&p))
            .unwrap_or_default())
    }

    pub fn date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(s) if !s.trim().is_empty() => {
                // Accept full timestamps by keeping the date part.
                let day = s.get(..10).unwrap_or(&s);
                NaiveDate::parse_from_str(day, "%Y-%m-%d")
                    .map(Some)
                    .map_err(D::Error::custom)
            }
            _ => Ok(None),
        }
    }

    pub fn hours<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        match Option::<NumberOrText>::deserialize(d)? {
            Some(NumberOrText::Number(n)) => Ok(Some(n)),
            Some(NumberOrText::Text(s)) if !s.trim().is_empty() => {
                s.trim().parse().map(Some).map_err(D::Error::custom)
            }
            _ => Ok(None),
        }
    }

    pub fn datetime<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(d)?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Task {
        Task::from_new(
            7,
            NewTask::new("Quarterly report").priority(Priority::High),
            Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn new_task_requires_title() {
        assert_eq!(
            NewTask::new("  ").validate(),
            Err(ValidationError::Blank("title".into()))
        );
        assert!(NewTask::new("Plan sprint").validate().is_ok());
    }

    #[test]
    fn schedule_derives_start_deadline() {
        let due = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
        let new = NewTask::new("Ship").schedule(Some(due), Some(12.0));
        assert_eq!(new.start_deadline, NaiveDate::from_ymd_opt(2026, 1, 18));
    }

    #[test]
    fn toggle_moves_between_todo_and_done() {
        let mut task = sample();
        task.toggle();
        assert!(task.completed);
        assert_eq!(task.status(), TaskStatus::Done);
        task.toggle();
        assert!(!task.completed);
        assert_eq!(task.status(), TaskStatus::Todo);
    }

    #[test]
    fn legacy_status_derives_from_completed() {
        let mut task = sample();
        task.status = None;
        task.completed = true;
        assert_eq!(task.status(), TaskStatus::Done);
    }

    #[test]
    fn status_patch_syncs_completed() {
        let mut task = sample();
        TaskPatch::status(TaskStatus::Done).apply(&mut task).unwrap();
        assert!(task.completed);

        let patch = TaskPatch {
            completed: Some(true),
            status: Some(TaskStatus::InProgress),
            ..TaskPatch::default()
        };
        patch.apply(&mut task).unwrap();
        assert_eq!(task.status(), TaskStatus::InProgress);
        assert!(!task.completed);
    }

    #[test]
    fn empty_patch_is_rejected() {
        let mut task = sample();
        assert_eq!(
            TaskPatch::default().apply(&mut task),
            Err(ValidationError::EmptyPatch)
        );
    }

    #[test]
    fn patch_can_clear_evaluation() {
        let mut task = sample();
        task.evaluation = Some(StoredEvaluation {
            is_important: true,
            is_urgent: true,
            importance_score: 1.0,
            urgency_score: 0.94,
            time_urgency_score: None,
            question_urgency_score: None,
        });
        assert_eq!(task.quadrant(), Quadrant::UrgentImportant);

        let patch = TaskPatch {
            evaluation: Some(None),
            ..TaskPatch::default()
        };
        patch.apply(&mut task).unwrap();
        assert_eq!(task.evaluation, None);
        assert_eq!(task.quadrant(), Quadrant::NotUrgentNotImportant);
    }

    #[test]
    fn patch_serializes_only_set_fields() {
        let patch = TaskPatch {
            title: Some("Renamed".into()),
            due_date: Some(None),
            ..TaskPatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"title": "Renamed", "dueDate": null}));
    }

    #[test]
    fn deserializes_api_payload_with_form_quirks() {
        let json = r#"{
            "id": 3,
            "title": "Email triage",
            "description": null,
            "priority": "urgent",
            "dueDate": "",
            "completed": false,
            "createdAt": "2025-07-30T10:15:00.123456",
            "estimatedDuration": "6",
            "startDeadline": "2025-08-01",
            "eisenhowerEvaluation": {"isImportant": false, "isUrgent": true,
                                     "importanceScore": 0.2, "urgencyScore": 0.8}
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.description, "");
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.due_date, None);
        assert_eq!(task.estimated_duration, Some(6.0));
        assert_eq!(task.status(), TaskStatus::Todo);
        assert_eq!(task.quadrant(), Quadrant::UrgentNotImportant);
        assert_eq!(
            task.created_at,
            Utc.with_ymd_and_hms(2025, 7, 30, 10, 15, 0).unwrap()
                + chrono::Duration::microseconds(123_456)
        );
    }

    #[test]
    fn api_priority_names_are_read() {
        let task: Task = serde_json::from_str(
            r#"{"id": 1, "title": "t", "priority": "haute", "createdAt": "2025-07-30T10:15:00"}"#,
        )
        .unwrap();
        assert_eq!(task.priority, Priority::High);

        let new: NewTask = serde_json::from_str(r#"{"title": "t", "priority": "basse"}"#).unwrap();
        assert_eq!(new.priority, Priority::Low);

        assert_eq!(Priority::parse_lenient("moyenne"), Priority::Medium);
        assert_eq!(Priority::parse_lenient("HIGH"), Priority::High);
        assert_eq!(Priority::parse_lenient("urgent"), Priority::Medium);
        for priority in Priority::ALL {
            assert_eq!(Priority::parse_lenient(priority.api_name()), priority);
        }
    }

    #[test]
    fn stored_evaluation_keeps_component_scores() {
        let evaluation = Evaluation {
            importance_score: 1.0,
            question_urgency_score: 1.0,
            time_urgency_score: 0.9,
            urgency_score: 0.94,
            is_important: true,
            is_urgent: true,
            quadrant: Quadrant::UrgentImportant,
        };
        let stored = StoredEvaluation::from(&evaluation);
        let json = serde_json::to_value(stored).unwrap();
        assert_eq!(json["timeUrgencyScore"], 0.9);
        assert_eq!(json["isUrgent"], true);
        assert!(json.get("quadrant").is_none());
    }

    #[test]
    fn status_parses_column_names() {
        assert_eq!("inprogress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert!("doing".parse::<TaskStatus>().is_err());
    }
}
