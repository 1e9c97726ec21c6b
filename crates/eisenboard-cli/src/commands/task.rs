//! Task management commands for CLI.

use chrono::{NaiveDate, Utc};
use clap::{Subcommand, ValueEnum};
use eisenboard_core::{
    open_store, Board, Config, NewTask, Priority, Questionnaire, Scorer, StoredEvaluation,
    TaskCard, TaskPatch, TaskStatus,
};
use serde_json::json;

use super::evaluate::{fill_form, require_evaluation};

#[derive(Clone, Copy, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Todo,
    #[value(name = "inprogress", alias = "in-progress")]
    InProgress,
    Done,
}

impl From<StatusArg> for TaskStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Todo => TaskStatus::Todo,
            StatusArg::InProgress => TaskStatus::InProgress,
            StatusArg::Done => TaskStatus::Done,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Create {
        /// Task title
        title: String,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Manual priority
        #[arg(long, value_enum, default_value = "medium")]
        priority: PriorityArg,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Estimated effort in hours
        #[arg(long)]
        hours: Option<f64>,
        /// Importance answers in question order, e.g. "y,y,n"
        #[arg(long)]
        importance: Option<String>,
        /// Urgency answers in question order, e.g. "n,n,y"
        #[arg(long)]
        urgency: Option<String>,
    },
    /// Show the board: three columns of task cards
    List {
        /// Print raw tasks in storage order instead of the board
        #[arg(long)]
        flat: bool,
    },
    /// Get task details
    Get {
        /// Task ID
        id: i64,
    },
    /// Update a task
    Update {
        /// Task ID
        id: i64,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New priority
        #[arg(long, value_enum)]
        priority: Option<PriorityArg>,
        /// New due date (YYYY-MM-DD); the start-by date is recomputed
        #[arg(long)]
        due: Option<NaiveDate>,
        /// New effort in hours; the start-by date is recomputed
        #[arg(long)]
        hours: Option<f64>,
        /// New status
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        /// Re-answer importance questions (requires --urgency)
        #[arg(long, requires = "urgency")]
        importance: Option<String>,
        /// Re-answer urgency questions (requires --importance)
        #[arg(long, requires = "importance")]
        urgency: Option<String>,
        /// Rescore from the stored flags against the current deadline
        #[arg(long, conflicts_with_all = ["importance", "urgency", "clear_evaluation"])]
        rescore: bool,
        /// Remove the stored evaluation
        #[arg(long, conflicts_with_all = ["importance", "urgency"])]
        clear_evaluation: bool,
    },
    /// Move a task to another column
    Move {
        /// Task ID
        id: i64,
        /// Target column
        #[arg(value_enum)]
        status: StatusArg,
    },
    /// Toggle completion
    Toggle {
        /// Task ID
        id: i64,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: i64,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut store = open_store(&config);
    tracing::debug!(backend = %store.kind(), "task store opened");

    match action {
        TaskAction::Create {
            title,
            description,
            priority,
            due,
            hours,
            importance,
            urgency,
        } => {
            let mut new = NewTask::new(title.clone())
                .description(description.unwrap_or_default())
                .priority(priority.into())
                .schedule(due, hours);
            if importance.is_some() || urgency.is_some() {
                let form = fill_form(
                    &config.questions,
                    importance.as_deref().unwrap_or(""),
                    urgency.as_deref().unwrap_or(""),
                )?;
                let evaluation = require_evaluation(&form, &title, &config, new.start_deadline)?;
                new = new.evaluation(evaluation);
            }
            let task = store.create(new)?;
            eprintln!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List { flat } => {
            let tasks = store.list()?;
            if flat {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                let now = Utc::now();
                let board = Board::from_tasks(tasks);
                let mut columns = serde_json::Map::new();
                for (status, tasks) in board.columns() {
                    let cards: Vec<TaskCard> =
                        tasks.iter().map(|t| TaskCard::new(t, now)).collect();
                    columns.insert(status.as_str().to_string(), serde_json::to_value(cards)?);
                }
                println!("{}", serde_json::to_string_pretty(&columns)?);
            }
        }
        TaskAction::Get { id } => {
            let task = store.get(id)?;
            let card = TaskCard::new(&task, Utc::now());
            let output = json!({ "task": task, "card": card });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        TaskAction::Update {
            id,
            title,
            description,
            priority,
            due,
            hours,
            status,
            importance,
            urgency,
            rescore,
            clear_evaluation,
        } => {
            let current = store.get(id)?;
            let mut patch = TaskPatch {
                title,
                description,
                priority: priority.map(Priority::from),
                status: status.map(TaskStatus::from),
                ..TaskPatch::default()
            };
            if due.is_some() || hours.is_some() {
                patch = patch.reschedule(
                    due.or(current.due_date),
                    hours.or(current.estimated_duration),
                );
            }
            let start_by = match patch.start_deadline {
                Some(start_by) => start_by,
                None => current.start_deadline,
            };

            if let (Some(importance), Some(urgency)) = (&importance, &urgency) {
                let form = fill_form(&config.questions, importance, urgency)?;
                let title = patch.title.as_deref().unwrap_or(&current.title);
                let evaluation = require_evaluation(&form, title, &config, start_by)?;
                patch.evaluation = Some(Some(StoredEvaluation::from(evaluation)));
            } else if rescore {
                let stored = current
                    .evaluation
                    .ok_or_else(|| format!("task {id} has no evaluation to rescore"))?;
                let evaluation = rescore_from_flags(&config, stored, start_by)?;
                patch.evaluation = Some(Some(evaluation));
            } else if clear_evaluation {
                patch.evaluation = Some(None);
            }

            let task = store.update(id, &patch)?;
            eprintln!("Task updated: {id}");
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Move { id, status } => {
            let task = store.update(id, &TaskPatch::status(status.into()))?;
            println!("Task {id} moved to {}", task.status());
        }
        TaskAction::Toggle { id } => {
            let task = store.toggle(id)?;
            println!("Task {id} is now {}", task.status());
        }
        TaskAction::Delete { id } => {
            store.delete(id)?;
            println!("Task deleted: {id}");
        }
    }
    Ok(())
}

/// Rebuild answers from stored flags and score them again.
fn rescore_from_flags(
    config: &Config,
    stored: StoredEvaluation,
    start_by: Option<NaiveDate>,
) -> Result<StoredEvaluation, Box<dyn std::error::Error>> {
    let scorer = Scorer::with_policy(config.scoring);
    let mut form = Questionnaire::new();
    let verdict = form.prefill_from_flags(
        &scorer,
        &config.questions,
        stored.is_important,
        stored.is_urgent,
        start_by,
        Utc::now(),
    );
    verdict
        .into_evaluation()
        .map(StoredEvaluation::from)
        .ok_or_else(|| "not enough questions to rescore".into())
}
