//! HTTP client for a remote task API.
//!
//! Endpoints, relative to the configured base URL:
//!
//! | method | path                     | payload            |
//! |--------|--------------------------|--------------------|
//! | GET    | `/api/tasks`             | `{success, tasks}` |
//! | POST   | `/api/tasks`             | `{success, task}`  |
//! | PUT    | `/api/tasks/{id}`        | `{success, task}`  |
//! | DELETE | `/api/tasks/{id}`        | `{success}`        |
//! | POST   | `/api/tasks/{id}/toggle` | `{success, task}`  |
//!
//! Failures carry `{success: false, error}`. Requests are not retried.
//! Priorities go over the wire as `basse`, `moyenne` or `haute`; the server
//! coerces or drops anything else.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use url::Url;

use super::store::{StoreKind, TaskStore};
use crate::error::{CoreError, RemoteError, Result};
use crate::task::{NewTask, Priority, Task, TaskPatch};

const TASKS_PATH: &str = "/api/tasks";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    task: Option<Task>,
    #[serde(default)]
    tasks: Option<Vec<Task>>,
    #[serde(default)]
    error: Option<String>,
}

/// Blocking facade over the async reqwest client. Owns a single-threaded
/// runtime, so it must not be used from inside another tokio runtime.
pub struct RemoteStore {
    tasks_url: String,
    client: Client,
    runtime: tokio::runtime::Runtime,
}

impl RemoteStore {
    /// `base_url` is the server root (`http://host:5000`). A URL that already
    /// ends in `/api/tasks` is accepted too.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let invalid = |message: String| RemoteError::InvalidUrl {
            url: base_url.to_string(),
            message,
        };
        let parsed = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())).into());
        }

        let root = parsed.as_str().trim_end_matches('/');
        let root = root.strip_suffix(TASKS_PATH).unwrap_or(root);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RemoteError::Http)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            tasks_url: format!("{root}{TASKS_PATH}"),
            client,
            runtime,
        })
    }

    pub fn tasks_url(&self) -> &str {
        &self.tasks_url
    }

    /// Check the API answers a task listing within `timeout`.
    pub fn probe(&self, timeout: Duration) -> Result<()> {
        let request = self.request(Method::GET, None).timeout(timeout);
        let envelope = self.send(request)?;
        envelope
            .tasks
            .map(|_| ())
            .ok_or_else(|| RemoteError::Malformed("probe response has no task list".into()).into())
    }

    fn request(&self, method: Method, suffix: Option<String>) -> RequestBuilder {
        let url = match suffix {
            Some(suffix) => format!("{}/{suffix}", self.tasks_url),
            None => self.tasks_url.clone(),
        };
        tracing::debug!(%method, url = %url, "task API request");
        self.client.request(method, url)
    }

    fn send(&self, request: RequestBuilder) -> std::result::Result<Envelope, RemoteError> {
        let (status, body) = self.runtime.block_on(async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        })?;

        let envelope = serde_json::from_str::<Envelope>(&body);
        if !status.is_success() {
            let message = envelope
                .ok()
                .and_then(|e| e.error)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());
            return Err(RemoteError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope = envelope.map_err(|e| RemoteError::Malformed(e.to_string()))?;
        if !envelope.success {
            return Err(RemoteError::Rejected(
                envelope.error.unwrap_or_else(|| "unknown error".into()),
            ));
        }
        Ok(envelope)
    }

    /// Send a request about one task; a 404 becomes `NotFound(id)`.
    fn send_for(&self, id: i64, request: RequestBuilder) -> Result<Envelope> {
        self.send(request).map_err(|e| match e {
            RemoteError::Status { status: 404, .. } => CoreError::NotFound(id),
            other => other.into(),
        })
    }
}

/// Request body with the priority renamed to the API's vocabulary.
fn api_body<T: Serialize>(body: &T) -> Result<serde_json::Value> {
    let mut value = serde_json::to_value(body)?;
    let priority = value
        .get("priority")
        .and_then(serde_json::Value::as_str)
        .map(|name| Priority::parse_lenient(name).api_name());
    if let Some(priority) = priority {
        value["priority"] = priority.into();
    }
    Ok(value)
}

fn expect_task(envelope: Envelope) -> Result<Task> {
    envelope
        .task
        .ok_or_else(|| RemoteError::Malformed("response has no task".into()).into())
}

impl TaskStore for RemoteStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Remote
    }

    fn list(&self) -> Result<Vec<Task>> {
        let envelope = self.send(self.request(Method::GET, None))?;
        envelope
            .tasks
            .ok_or_else(|| RemoteError::Malformed("response has no task list".into()).into())
    }

    /// The API has no single-task endpoint; this filters the listing.
    fn get(&self, id: i64) -> Result<Task> {
        self.list()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or(CoreError::NotFound(id))
    }

    fn create(&mut self, task: NewTask) -> Result<Task> {
        task.validate()?;
        let body = api_body(&task)?;
        let envelope = self.send(self.request(Method::POST, None).json(&body))?;
        expect_task(envelope)
    }

    fn update(&mut self, id: i64, patch: &TaskPatch) -> Result<Task> {
        patch.validate()?;
        let body = api_body(patch)?;
        let request = self.request(Method::PUT, Some(id.to_string())).json(&body);
        expect_task(self.send_for(id, request)?)
    }

    fn toggle(&mut self, id: i64) -> Result<Task> {
        let request = self.request(Method::POST, Some(format!("{id}/toggle")));
        expect_task(self.send_for(id, request)?)
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        let request = self.request(Method::DELETE, Some(id.to_string()));
        self.send_for(id, request).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(url: &str) -> Result<RemoteStore> {
        RemoteStore::new(url, Duration::from_secs(1))
    }

    #[test]
    fn normalizes_base_url() {
        assert_eq!(
            store("http://localhost:5000").unwrap().tasks_url(),
            "http://localhost:5000/api/tasks"
        );
        assert_eq!(
            store("http://localhost:5000/api/tasks/").unwrap().tasks_url(),
            "http://localhost:5000/api/tasks"
        );
    }

    #[test]
    fn bodies_use_api_priority_names() {
        let body = api_body(&NewTask::new("x").priority(Priority::High)).unwrap();
        assert_eq!(body["priority"], "haute");

        let patch = TaskPatch {
            priority: Some(Priority::Low),
            ..TaskPatch::default()
        };
        assert_eq!(api_body(&patch).unwrap()["priority"], "basse");

        let untouched = api_body(&TaskPatch::status(crate::task::TaskStatus::Done)).unwrap();
        assert!(untouched.get("priority").is_none());
    }

    #[test]
    fn rejects_unusable_urls() {
        assert!(matches!(
            store("not a url"),
            Err(CoreError::Remote(RemoteError::InvalidUrl { .. }))
        ));
        assert!(matches!(
            store("ftp://example.com"),
            Err(CoreError::Remote(RemoteError::InvalidUrl { .. }))
        ));
    }
}
