//! The client side of the Task Store Service.

use async_trait::async_trait;
use log::debug;
use shared::{
    AddTaskRequest, DeleteTaskRequest, ErrorResponse, MutationResponse, Task, TaskId,
    TaskListResponse,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Request, RequestInit, Response};

use crate::error::ClientError;

/// The three calls the board makes against the backend.
///
/// Futures are not `Send`: the browser implementation holds JS handles
/// across awaits.
#[async_trait(?Send)]
pub trait TaskStore {
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError>;
    async fn add_task(&self, user_input: &str) -> Result<MutationResponse, ClientError>;
    async fn delete_task(&self, task_id: TaskId) -> Result<MutationResponse, ClientError>;
}

/// Where the API lives. Empty base means same origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn same_origin() -> Self {
        Self::default()
    }

    pub fn with_base(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn tasks(&self) -> String {
        format!("{}/api/tasks", self.base)
    }

    pub fn add_task(&self) -> String {
        format!("{}/api/add-task", self.base)
    }

    pub fn delete_task(&self) -> String {
        format!("{}/api/delete-task", self.base)
    }
}

pub(crate) fn add_task_body(user_input: &str) -> Result<String, ClientError> {
    Ok(serde_json::to_string(&AddTaskRequest {
        user_input: user_input.to_string(),
    })?)
}

pub(crate) fn delete_task_body(task_id: TaskId) -> Result<String, ClientError> {
    Ok(serde_json::to_string(&DeleteTaskRequest { task_id })?)
}

/// Interprets a mutation reply: 2xx bodies must be a full-collection
/// response, anything else must at least be a JSON object.
pub(crate) fn parse_mutation(status: u16, ok: bool, body: &str) -> Result<MutationResponse, ClientError> {
    if ok {
        return Ok(serde_json::from_str(body)?);
    }
    let rejected: ErrorResponse = serde_json::from_str(body)?;
    Err(ClientError::Rejected {
        status,
        error: rejected.error,
    })
}

/// The list reply only matters on success; error bodies are not read.
pub(crate) fn parse_list(status: u16, ok: bool, body: &str) -> Result<Vec<Task>, ClientError> {
    if !ok {
        return Err(ClientError::Rejected { status, error: None });
    }
    let response: TaskListResponse = serde_json::from_str(body)?;
    Ok(response.tasks)
}

fn transport(context: &'static str) -> impl Fn(JsValue) -> ClientError {
    move |value| ClientError::Transport(format!("{}: {:?}", context, value))
}

/// `TaskStore` backed by the browser's `fetch`.
#[derive(Debug, Clone, Default)]
pub struct HttpTaskStore {
    endpoints: Endpoints,
}

impl HttpTaskStore {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }

    /// Sends one request and returns `(status, ok, body text)`.
    async fn send(&self, method: &str, url: &str, body: Option<String>) -> Result<(u16, bool, String), ClientError> {
        let window = window().ok_or_else(|| ClientError::Transport("no window available".into()))?;

        let opts = RequestInit::new();
        opts.set_method(method);
        if let Some(body) = &body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(url, &opts)
            .map_err(transport("failed to create request"))?;
        if body.is_some() {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(transport("failed to set header"))?;
        }

        debug!("{} {}", method, url);
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(transport("failed to send request"))?
            .into();

        let text_promise = response.text().map_err(transport("failed to read response"))?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(transport("failed to get text"))?
            .as_string()
            .ok_or_else(|| ClientError::Transport("response body is not text".into()))?;

        debug!("{} {} -> {}", method, url, response.status());
        Ok((response.status(), response.ok(), text))
    }
}

#[async_trait(?Send)]
impl TaskStore for HttpTaskStore {
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let (status, ok, text) = self.send("GET", &self.endpoints.tasks(), None).await?;
        parse_list(status, ok, &text)
    }

    async fn add_task(&self, user_input: &str) -> Result<MutationResponse, ClientError> {
        let body = add_task_body(user_input)?;
        let (status, ok, text) = self.send("POST", &self.endpoints.add_task(), Some(body)).await?;
        parse_mutation(status, ok, &text)
    }

    async fn delete_task(&self, task_id: TaskId) -> Result<MutationResponse, ClientError> {
        let body = delete_task_body(task_id)?;
        let (status, ok, text) = self
            .send("POST", &self.endpoints.delete_task(), Some(body))
            .await?;
        parse_mutation(status, ok, &text)
    }
}
