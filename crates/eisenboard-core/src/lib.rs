//! # Eisenboard Core Library
//!
//! Core logic for Eisenboard, a kanban task board that ranks work with the
//! Eisenhower matrix. The `eisenboard` CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Scoring**: Pure functions turning yes/no questionnaire answers and a
//!   start-by date into importance and urgency scores and a quadrant
//! - **Questionnaire**: Configurable question sets and per-form answer state
//! - **Board**: Column partitioning, quadrant ordering, card view and stats
//! - **Storage**: Remote task API, local SQLite or in-memory demo data behind
//!   one trait, plus TOML configuration
//!
//! ## Key Components
//!
//! - [`Scorer`]: Evaluates answers into a [`Verdict`]
//! - [`Questionnaire`]: Answer state of one task form
//! - [`Board`]: Tasks grouped into kanban columns
//! - [`TaskStore`]: Backend-neutral task CRUD
//! - [`Config`]: Application configuration management

pub mod board;
pub mod deadline;
pub mod error;
pub mod questionnaire;
pub mod questions;
pub mod scoring;
pub mod stats;
pub mod storage;
pub mod task;

pub use board::{sort_tasks, Board, TaskCard};
pub use deadline::start_by_date;
pub use error::{ConfigError, CoreError, DatabaseError, RemoteError, ValidationError};
pub use questionnaire::Questionnaire;
pub use questions::{QuestionCategory, QuestionSet};
pub use scoring::{AnswerMap, Evaluation, PrefillMode, Quadrant, Scorer, ScoringPolicy, Verdict};
pub use stats::BoardStats;
pub use storage::{open_store, Config, DemoStore, RemoteStore, TaskDb, TaskStore};
pub use task::{NewTask, Priority, StoredEvaluation, Task, TaskPatch, TaskStatus};
