//! Task persistence.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use redis::{AsyncCommands, Client};
use shared::{Task, TaskId};
use std::collections::BTreeMap;
use std::sync::Mutex;
use thiserror::Error;
use tracing::warn;

const NEXT_ID_KEY: &str = "tasks:next_id";
const TASK_PATTERN: &str = "task:*";

fn task_key(id: TaskId) -> String {
    format!("task:{}", id)
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("redis: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("encoding task: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A task before the store has given it an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub time: String,
    pub location: String,
    pub task_content: String,
    pub weather_info: Option<String>,
}

impl NewTask {
    /// The whole input becomes the content, scheduled at `now`.
    pub fn from_input(task_content: &str, now: NaiveDateTime) -> Self {
        Self {
            time: now.format("%Y-%m-%d %H:%M").to_string(),
            location: String::new(),
            task_content: task_content.to_string(),
            weather_info: None,
        }
    }

    fn with_id(self, id: TaskId) -> Task {
        Task {
            id,
            time: self.time,
            location: self.location,
            task_content: self.task_content,
            weather_info: self.weather_info,
        }
    }
}

/// Newest first: latest time, then highest id.
fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| b.time.cmp(&a.time).then(b.id.cmp(&a.id)));
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Task>, RepositoryError>;
    async fn insert(&self, task: NewTask) -> Result<Task, RepositoryError>;
    /// Returns `false` when no task had that id.
    async fn remove(&self, id: TaskId) -> Result<bool, RepositoryError>;
}

pub struct RedisRepository {
    client: Client,
}

impl RedisRepository {
    pub fn open(url: &str) -> Result<Self, RepositoryError> {
        Ok(Self {
            client: Client::open(url)?,
        })
    }
}

#[async_trait]
impl TaskRepository for RedisRepository {
    async fn list(&self) -> Result<Vec<Task>, RepositoryError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let keys: Vec<String> = conn.keys(TASK_PATTERN).await?;
        let mut tasks = Vec::with_capacity(keys.len());

        for key in keys {
            let task_json: Option<String> = conn.get(&key).await?;
            let Some(task_json) = task_json else {
                continue;
            };
            match serde_json::from_str::<Task>(&task_json) {
                Ok(task) => tasks.push(task),
                Err(err) => warn!(%key, error = %err, "skipping unreadable task record"),
            }
        }

        sort_tasks(&mut tasks);
        Ok(tasks)
    }

    async fn insert(&self, task: NewTask) -> Result<Task, RepositoryError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let id: i64 = conn.incr(NEXT_ID_KEY, 1).await?;
        let task = task.with_id(TaskId(id));
        let task_json = serde_json::to_string(&task)?;
        conn.set::<_, _, ()>(task_key(task.id), task_json).await?;

        Ok(task)
    }

    async fn remove(&self, id: TaskId) -> Result<bool, RepositoryError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let deleted: usize = conn.del(task_key(id)).await?;
        Ok(deleted > 0)
    }
}

#[derive(Default)]
struct MemoryState {
    last_id: i64,
    tasks: BTreeMap<TaskId, Task>,
}

/// Process-local store for development and tests.
#[derive(Default)]
pub struct MemoryRepository {
    state: Mutex<MemoryState>,
}

impl MemoryRepository {
    fn state(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TaskRepository for MemoryRepository {
    async fn list(&self) -> Result<Vec<Task>, RepositoryError> {
        let mut tasks: Vec<Task> = self.state().tasks.values().cloned().collect();
        sort_tasks(&mut tasks);
        Ok(tasks)
    }

    async fn insert(&self, task: NewTask) -> Result<Task, RepositoryError> {
        let mut state = self.state();
        state.last_id += 1;
        let task = task.with_id(TaskId(state.last_id));
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn remove(&self, id: TaskId) -> Result<bool, RepositoryError> {
        Ok(self.state().tasks.remove(&id).is_some())
    }
}
