//! The task board controller.
//!
//! `TaskController::update` applies a `Msg` to the view state and returns at
//! most one `Request` to send. The request is executed against a
//! `TaskStore` by whoever drives the controller (the sauron `Cmd` runtime in
//! the browser, `block_on` in tests) and its completion comes back as
//! another `Msg`.
//!
//! While a mutation is in flight, further submits and deletes are rejected.
//! A list reply that was issued before the last applied mutation is stale
//! and dropped.

use std::fmt;
use std::rc::Rc;

use log::{debug, error, warn};
use shared::{MutationResponse, Task, TaskId};

use crate::dialog::Dialog;
use crate::error::ClientError;
use crate::i18n::Messages;
use crate::render::TaskListView;
use crate::store::TaskStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Add,
    Delete,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Add => write!(f, "add task"),
            Mutation::Delete => write!(f, "delete task"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    LoadTasks,
    TasksLoaded {
        revision: u64,
        result: Result<Vec<Task>, ClientError>,
    },
    SetInput(String),
    KeyDown {
        key: String,
        ctrl: bool,
    },
    Submit,
    RequestDelete(TaskId),
    MutationDone {
        mutation: Mutation,
        result: Result<MutationResponse, ClientError>,
    },
    DismissStatus,
}

/// A single call to the task store, produced by `TaskController::update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ListTasks { revision: u64 },
    AddTask(String),
    DeleteTask(TaskId),
}

impl Request {
    pub async fn dispatch(self, store: Rc<dyn TaskStore>) -> Msg {
        match self {
            Request::ListTasks { revision } => Msg::TasksLoaded {
                revision,
                result: store.list_tasks().await,
            },
            Request::AddTask(user_input) => Msg::MutationDone {
                mutation: Mutation::Add,
                result: store.add_task(&user_input).await,
            },
            Request::DeleteTask(task_id) => Msg::MutationDone {
                mutation: Mutation::Delete,
                result: store.delete_task(task_id).await,
            },
        }
    }
}

pub struct TaskController {
    tasks: Vec<Task>,
    input: String,
    loading: bool,
    status: Option<StatusMessage>,
    // Bumped every time a mutation reply replaces `tasks`.
    revision: u64,
    messages: &'static Messages,
    dialog: Box<dyn Dialog>,
}

impl TaskController {
    pub fn new(messages: &'static Messages, dialog: Box<dyn Dialog>) -> Self {
        Self {
            tasks: Vec::new(),
            input: String::new(),
            loading: false,
            status: None,
            revision: 0,
            messages,
            dialog,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn messages(&self) -> &'static Messages {
        self.messages
    }

    pub fn list_view(&self) -> TaskListView {
        TaskListView::from_tasks(&self.tasks)
    }

    pub fn update(&mut self, msg: Msg) -> Option<Request> {
        match msg {
            Msg::LoadTasks => Some(Request::ListTasks {
                revision: self.revision,
            }),
            Msg::TasksLoaded { revision, result } => {
                self.apply_list(revision, result);
                None
            }
            Msg::SetInput(input) => {
                self.input = input;
                None
            }
            Msg::KeyDown { key, ctrl } => {
                if ctrl && key == "Enter" {
                    self.submit()
                } else {
                    None
                }
            }
            Msg::Submit => self.submit(),
            Msg::RequestDelete(task_id) => self.request_delete(task_id),
            Msg::MutationDone { mutation, result } => {
                self.finish(mutation, result);
                None
            }
            Msg::DismissStatus => {
                self.status = None;
                None
            }
        }
    }

    fn apply_list(&mut self, revision: u64, result: Result<Vec<Task>, ClientError>) {
        match result {
            Ok(tasks) if revision == self.revision => {
                debug!("loaded {} tasks", tasks.len());
                self.tasks = tasks;
            }
            Ok(_) => debug!(
                "dropping task list from revision {}, now at {}",
                revision, self.revision
            ),
            // Initial load failures are never shown to the user.
            Err(err) => warn!("initial task load failed: {}", err),
        }
    }

    fn submit(&mut self) -> Option<Request> {
        let text = self.input.trim();
        if text.is_empty() {
            self.status = Some(StatusMessage::error(self.messages.empty_input));
            return None;
        }
        if self.loading {
            debug!("submit ignored: a request is already in flight");
            return None;
        }
        let text = text.to_string();
        self.begin();
        Some(Request::AddTask(text))
    }

    fn request_delete(&mut self, task_id: TaskId) -> Option<Request> {
        if self.loading {
            debug!("delete of task {} ignored: a request is already in flight", task_id);
            return None;
        }
        if !self.dialog.confirm(self.messages.confirm_delete) {
            debug!("delete of task {} cancelled", task_id);
            return None;
        }
        self.begin();
        Some(Request::DeleteTask(task_id))
    }

    fn begin(&mut self) {
        self.loading = true;
        self.status = None;
    }

    fn finish(&mut self, mutation: Mutation, result: Result<MutationResponse, ClientError>) {
        self.loading = false;
        match result {
            Ok(response) => {
                self.status = Some(StatusMessage::success(response.message));
                if mutation == Mutation::Add {
                    self.input.clear();
                }
                self.tasks = response.all_tasks;
                self.revision += 1;
            }
            Err(err) => {
                if err.is_rejection() {
                    warn!("{} rejected: {}", mutation, err);
                } else {
                    error!("{} failed: {}", mutation, err);
                }
                let fallback = match mutation {
                    Mutation::Add => self.messages.add_failed,
                    Mutation::Delete => self.messages.delete_failed,
                };
                self.status = Some(StatusMessage::error(err.user_message(fallback, self.messages)));
            }
        }
    }
}
