use std::time::Duration;

use crate::error::Result;
use crate::task::{NewTask, Task, TaskPatch};

use super::{Config, DemoStore, RemoteStore, TaskDb};

/// CRUD over the task list. Every backend implements this trait.
///
/// Operations on an unknown id fail with [`crate::CoreError::NotFound`].
pub trait TaskStore {
    /// Short backend name for logs and status output.
    fn kind(&self) -> StoreKind;

    fn list(&self) -> Result<Vec<Task>>;

    fn get(&self, id: i64) -> Result<Task>;

    fn create(&mut self, task: NewTask) -> Result<Task>;

    fn update(&mut self, id: i64, patch: &TaskPatch) -> Result<Task>;

    /// Flip completion and return the updated task.
    fn toggle(&mut self, id: i64) -> Result<Task>;

    fn delete(&mut self, id: i64) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Remote,
    Sqlite,
    Demo,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Remote => "remote",
            StoreKind::Sqlite => "sqlite",
            StoreKind::Demo => "demo",
        }
    }
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick a backend: the remote API when configured and reachable, otherwise
/// the local SQLite database, otherwise demo data in memory.
pub fn open_store(config: &Config) -> Box<dyn TaskStore> {
    if let Some(url) = config.storage.api_url() {
        match connect_remote(config, url) {
            Ok(store) => return Box::new(store),
            Err(e) => {
                tracing::warn!(url, error = %e, "task API unreachable, using local database")
            }
        }
    }

    match TaskDb::open() {
        Ok(db) => Box::new(db),
        Err(e) => {
            tracing::warn!(error = %e, "local database unavailable, using demo tasks");
            Box::new(DemoStore::new())
        }
    }
}

fn connect_remote(config: &Config, url: &str) -> Result<RemoteStore> {
    let store = RemoteStore::new(
        url,
        Duration::from_secs(config.storage.request_timeout_secs),
    )?;
    store.probe(Duration::from_secs(config.storage.probe_timeout_secs))?;
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names() {
        assert_eq!(StoreKind::Sqlite.to_string(), "sqlite");
        assert_eq!(StoreKind::Demo.as_str(), "demo");
    }
}
