//! Recommendation engine.
//!
//! Given the task pool, the outcome ledger, the current time, and an optional
//! "prefer low cognitive load" bias, a strategy produces exactly one
//! [`TimeBoxRecommendation`]: which task to box next and for how long.
//!
//! Two strategies ship with the crate and satisfy the same one-method
//! contract:
//! - [`LocalStrategy`] -- deterministic selection, no I/O, total.
//! - [`BackendStrategy`] -- delegates to a remote service and silently falls
//!   back to [`LocalStrategy`] on any transport or decoding failure.
//!
//! Strategies are injected into the orchestrator at construction time; there
//! is no ambient default instance.

mod backend;
mod local;

pub use backend::BackendStrategy;
pub use local::{LocalStrategy, RecommendReason, EMPTY_POOL_TASK_ID};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RecommendError;
use crate::orchestrator::TimeBoxOutcome;
use crate::task::Task;

/// Everything a strategy may consider. Serialized as-is to the remote
/// recommendation endpoint, so field casing follows the wire contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendContext {
    pub tasks: Vec<Task>,
    /// Newest-first outcome ledger.
    pub outcomes: Vec<TimeBoxOutcome>,
    pub current_time: DateTime<Utc>,
    #[serde(default)]
    pub prefer_low_cognitive_load: bool,
}

impl RecommendContext {
    pub fn new(tasks: Vec<Task>, outcomes: Vec<TimeBoxOutcome>, prefer_low_cognitive_load: bool) -> Self {
        Self {
            tasks,
            outcomes,
            current_time: Utc::now(),
            prefer_low_cognitive_load,
        }
    }
}

/// The engine's suggested next task and duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBoxRecommendation {
    pub task_id: String,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefer_low_cognitive_load: Option<bool>,
}

/// A recommendation source, swappable at orchestrator construction time.
///
/// The built-in implementations never return `Err`: [`LocalStrategy`] is
/// total and [`BackendStrategy`] recovers by falling back. The signature is
/// fallible so external strategies can fail and the orchestrator's recovery
/// protocol stays meaningful.
#[async_trait]
pub trait RecommendStrategy: Send + Sync {
    async fn recommend(&self, context: &RecommendContext) -> Result<TimeBoxRecommendation, RecommendError>;
}
