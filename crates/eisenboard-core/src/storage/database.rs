//! SQLite task storage.
//!
//! Tasks live in a single `tasks` table. The stored evaluation is kept as a
//! JSON text column; rows whose JSON no longer parses are read back without
//! an evaluation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::data_dir;
use super::migrations;
use super::store::{StoreKind, TaskStore};
use crate::error::{CoreError, DatabaseError, Result};
use crate::task::{NewTask, Priority, StoredEvaluation, Task, TaskPatch, TaskStatus};

const SELECT_TASK: &str = "SELECT id, title, description, priority, due_date, completed, status,
        created_at, eisenhower_evaluation, estimated_duration, start_deadline
     FROM tasks";

/// SQLite database for tasks.
pub struct TaskDb {
    conn: Connection,
}

impl TaskDb {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data dir>/eisenboard.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("eisenboard.db");
        let conn = Connection::open(&path)
            .map_err(|source| DatabaseError::OpenFailed { path, source })?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    fn write(&self, task: &Task) -> Result<()> {
        let evaluation = task
            .evaluation
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let changed = self.conn.execute(
            "UPDATE tasks SET title = ?1, description = ?2, priority = ?3, due_date = ?4,
                completed = ?5, status = ?6, eisenhower_evaluation = ?7,
                estimated_duration = ?8, start_deadline = ?9
             WHERE id = ?10",
            params![
                task.title,
                task.description,
                task.priority.as_str(),
                task.due_date.map(|d| d.to_string()),
                task.completed,
                task.status().as_str(),
                evaluation,
                task.estimated_duration,
                task.start_deadline.map(|d| d.to_string()),
                task.id,
            ],
        )?;
        if changed == 0 {
            return Err(CoreError::NotFound(task.id));
        }
        Ok(())
    }
}

impl TaskStore for TaskDb {
    fn kind(&self) -> StoreKind {
        StoreKind::Sqlite
    }

    /// Ordered by manual priority, then newest first.
    fn list(&self) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_TASK}
             ORDER BY CASE priority
                 WHEN 'high' THEN 3
                 WHEN 'haute' THEN 3
                 WHEN 'low' THEN 1
                 WHEN 'basse' THEN 1
                 ELSE 2
             END DESC, created_at DESC, id DESC"
        ))?;
        let tasks = stmt
            .query_map([], row_to_task)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    fn get(&self, id: i64) -> Result<Task> {
        self.conn
            .query_row(&format!("{SELECT_TASK} WHERE id = ?1"), [id], row_to_task)
            .optional()?
            .ok_or(CoreError::NotFound(id))
    }

    fn create(&mut self, task: NewTask) -> Result<Task> {
        task.validate()?;
        let created_at = Utc::now();
        let evaluation = task
            .evaluation
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        self.conn.execute(
            "INSERT INTO tasks (title, description, priority, due_date, completed, status,
                created_at, eisenhower_evaluation, estimated_duration, start_deadline)
             VALUES (?1, ?2, ?3, ?4, 0, 'todo', ?5, ?6, ?7, ?8)",
            params![
                task.title,
                task.description,
                task.priority.as_str(),
                task.due_date.map(|d| d.to_string()),
                created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
                evaluation,
                task.estimated_duration,
                task.start_deadline.map(|d| d.to_string()),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, "task created");
        Ok(Task::from_new(id, task, created_at))
    }

    fn update(&mut self, id: i64, patch: &TaskPatch) -> Result<Task> {
        let mut task = self.get(id)?;
        patch.apply(&mut task)?;
        self.write(&task)?;
        Ok(task)
    }

    fn toggle(&mut self, id: i64) -> Result<Task> {
        let mut task = self.get(id)?;
        task.toggle();
        self.write(&task)?;
        Ok(task)
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        let changed = self.conn.execute("DELETE FROM tasks WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(CoreError::NotFound(id));
        }
        Ok(())
    }
}

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    let id: i64 = row.get(0)?;
    let priority: Option<String> = row.get(3)?;
    let due_date: Option<String> = row.get(4)?;
    let completed: Option<bool> = row.get(5)?;
    let status: Option<String> = row.get(6)?;
    let created_at: String = row.get(7)?;
    let evaluation: Option<String> = row.get(8)?;
    let start_deadline: Option<String> = row.get(10)?;

    Ok(Task {
        id,
        title: row.get(1)?,
        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        priority: priority
            .as_deref()
            .map(Priority::parse_lenient)
            .unwrap_or_default(),
        due_date: due_date.as_deref().and_then(parse_date),
        completed: completed.unwrap_or(false),
        status: status.as_deref().and_then(|s| s.parse::<TaskStatus>().ok()),
        created_at: parse_timestamp(&created_at).unwrap_or_else(|| {
            tracing::warn!(id, created_at = %created_at, "unreadable created_at");
            DateTime::<Utc>::MIN_UTC
        }),
        evaluation: evaluation
            .as_deref()
            .filter(|json| !json.is_empty())
            .and_then(|json| match serde_json::from_str::<StoredEvaluation>(json) {
                Ok(evaluation) => Some(evaluation),
                Err(e) => {
                    tracing::warn!(id, error = %e, "ignoring malformed evaluation");
                    None
                }
            }),
        estimated_duration: row.get(9)?,
        start_deadline: start_deadline.as_deref().and_then(parse_date),
    })
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let day = s.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// RFC 3339, or the naive forms SQLite and older writers produce.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}
