//! Lightweight HTTP client for the task endpoints.
//!
//! The terminal UI (`taskd ui`) uses this to reach a running server at a
//! configurable base URL. Calls are best-effort: one short timeout, no
//! retries. Replies keep the three outcomes the view cares about apart —
//! accepted, rejected by the server, or never completed.

use anyhow::{Context as _, Result};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::store::Task;

/// How a mutating call ended.
#[derive(Debug)]
pub enum ApiReply<T> {
    /// 2xx — parsed response body.
    Ok(T),
    /// The server answered with an error status (e.g. 404).
    Err { status: u16, message: String },
    /// The call never completed: connection refused, timeout, bad body.
    Unavailable(String),
}

/// Body of a successful `POST /tasks`.
#[derive(Debug, Deserialize)]
pub struct CreateResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Body of a successful `PUT /tasks/show` or `DELETE /tasks/delete`.
#[derive(Debug, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub todos: Vec<Task>,
}

#[derive(Debug, Deserialize)]
struct ShowResponse {
    #[serde(default)]
    todos: Vec<Task>,
}

#[derive(Debug, Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `GET /tasks/show` — the server's current list.
    pub async fn fetch_tasks(&self) -> Result<Vec<Task>> {
        let resp = self
            .http
            .get(format!("{}/tasks/show", self.base_url))
            .send()
            .await
            .context("GET /tasks/show failed")?
            .error_for_status()
            .context("GET /tasks/show rejected")?;
        let body: ShowResponse = resp.json().await.context("invalid /tasks/show body")?;
        Ok(body.todos)
    }

    /// `POST /tasks` — submit a batch of new tasks.
    pub async fn create_tasks(&self, tasks: &[Task]) -> ApiReply<CreateResponse> {
        let req = self
            .http
            .post(format!("{}/tasks", self.base_url))
            .json(&json!({ "tasks": tasks }));
        Self::finish(req.send().await).await
    }

    /// `PUT /tasks/show` — replace one task's title.
    pub async fn update_task(&self, id: i64, title: &str) -> ApiReply<MutationResponse> {
        let req = self
            .http
            .put(format!("{}/tasks/show", self.base_url))
            .json(&json!({ "editTaskID": id, "textEdit": title }));
        Self::finish(req.send().await).await
    }

    /// `DELETE /tasks/delete` — remove one task by id.
    pub async fn delete_task(&self, id: i64) -> ApiReply<MutationResponse> {
        let req = self
            .http
            .delete(format!("{}/tasks/delete", self.base_url))
            .json(&json!({ "delId": id }));
        Self::finish(req.send().await).await
    }

    /// Fold a reqwest result into the three-way reply.
    async fn finish<T: serde::de::DeserializeOwned>(
        sent: std::result::Result<reqwest::Response, reqwest::Error>,
    ) -> ApiReply<T> {
        let resp = match sent {
            Ok(r) => r,
            Err(e) => return ApiReply::Unavailable(e.to_string()),
        };
        let status = resp.status();
        if status.is_success() {
            match resp.json::<T>().await {
                Ok(body) => ApiReply::Ok(body),
                Err(e) => ApiReply::Unavailable(format!("invalid response body: {e}")),
            }
        } else {
            let message = resp
                .json::<ErrorBody>()
                .await
                .unwrap_or_default()
                .message;
            ApiReply::Err {
                status: status.as_u16(),
                message,
            }
        }
    }
}
