//! Task pool providers.
//!
//! The orchestrator consumes whatever pool the host hands it; providers are
//! how hosts obtain one. [`BackendTaskProvider`] pulls the pool from the
//! remote service and degrades to the built-in placeholder set when the
//! service misbehaves. [`StaticTaskProvider`] serves a fixed pool for hosts
//! running without a backend.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::error::ProviderError;
use crate::task::{CognitiveLoad, Priority, Task};

/// Source of the task pool.
#[async_trait]
pub trait TaskProvider: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Task>, ProviderError>;
}

/// The built-in pool served when no real source is reachable.
pub fn placeholder_tasks() -> Vec<Task> {
    vec![
        Task::new("plan-day", "Plan the day", Priority::Medium)
            .with_estimate(15)
            .with_cognitive_load(CognitiveLoad::Low),
        Task::new("deep-work", "Deep work block", Priority::Urgent)
            .with_cognitive_load(CognitiveLoad::High),
        Task::new("inbox-sweep", "Inbox sweep", Priority::Low)
            .with_estimate(20)
            .with_cognitive_load(CognitiveLoad::Low),
    ]
}

/// Fixed-pool provider.
#[derive(Debug, Clone, Default)]
pub struct StaticTaskProvider {
    tasks: Vec<Task>,
}

impl StaticTaskProvider {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Provider over the built-in placeholder pool.
    pub fn placeholder() -> Self {
        Self::new(placeholder_tasks())
    }
}

#[async_trait]
impl TaskProvider for StaticTaskProvider {
    async fn fetch(&self) -> Result<Vec<Task>, ProviderError> {
        Ok(self.tasks.clone())
    }
}

/// Provider over the remote task endpoint.
#[derive(Debug, Clone)]
pub struct BackendTaskProvider {
    base: Url,
    client: reqwest::Client,
    timeout: Duration,
}

impl BackendTaskProvider {
    pub fn new(base: Url, timeout: Duration) -> Self {
        Self {
            base,
            client: reqwest::Client::new(),
            timeout,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/tasks", self.base.as_str().trim_end_matches('/'))
    }

    async fn request(&self) -> Result<Vec<Task>, ProviderError> {
        let tasks = tokio::time::timeout(self.timeout, async {
            self.client
                .get(self.endpoint())
                .send()
                .await?
                .error_for_status()?
                .json::<Vec<Task>>()
                .await
        })
        .await??;
        Ok(tasks)
    }
}

#[async_trait]
impl TaskProvider for BackendTaskProvider {
    async fn fetch(&self) -> Result<Vec<Task>, ProviderError> {
        match self.request().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "task pool fetched from backend");
                Ok(tasks)
            }
            Err(err) => {
                warn!(error = %err, "task pool fetch failed, serving placeholder tasks");
                Ok(placeholder_tasks())
            }
        }
    }
}
