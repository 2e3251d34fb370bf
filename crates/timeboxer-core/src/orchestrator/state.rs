//! Orchestrator state aggregate.
//!
//! One owned value tracks everything the host renders: the active box, the
//! current recommendation, the outcome ledger, and the task pool. The
//! orchestrator hands it out as immutable snapshots; nothing mutates a
//! snapshot in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recommend::TimeBoxRecommendation;
use crate::task::Task;

/// A fixed-duration, single-task work interval. At most one is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBox {
    pub id: String,
    pub task_id: String,
    pub duration_minutes: u32,
    pub started_at: DateTime<Utc>,
}

impl TimeBox {
    pub fn new(task_id: impl Into<String>, duration_minutes: u32) -> Self {
        Self {
            id: generate_id("box"),
            task_id: task_id.into(),
            duration_minutes,
            started_at: Utc::now(),
        }
    }
}

/// How a recorded time box ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    Completed,
    Interrupted,
    Abandoned,
}

/// One entry of the outcome ledger. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBoxOutcome {
    pub time_box_id: String,
    pub task_id: String,
    /// The box length that was planned.
    pub duration_minutes: u32,
    /// Whole minutes actually spent.
    pub actual_minutes: u32,
    pub outcome: OutcomeKind,
    pub ended_at: DateTime<Utc>,
}

impl TimeBoxOutcome {
    pub fn new(
        time_box_id: impl Into<String>,
        task_id: impl Into<String>,
        duration_minutes: u32,
        actual_minutes: u32,
        outcome: OutcomeKind,
    ) -> Self {
        Self {
            time_box_id: time_box_id.into(),
            task_id: task_id.into(),
            duration_minutes,
            actual_minutes,
            outcome,
            ended_at: Utc::now(),
        }
    }
}

/// The orchestrator's owned aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestratorState {
    pub active_time_box: Option<TimeBox>,
    pub recommendation: Option<TimeBoxRecommendation>,
    /// Newest-first: index 0 is always the latest outcome.
    pub outcomes: Vec<TimeBoxOutcome>,
    pub tasks: Vec<Task>,
    /// True only while a recommendation call is pending; always settles false.
    pub is_loading_recommendation: bool,
}

impl OrchestratorState {
    pub fn new() -> Self {
        Self {
            active_time_box: None,
            recommendation: None,
            outcomes: Vec::new(),
            tasks: Vec::new(),
            is_loading_recommendation: false,
        }
    }
}

impl Default for OrchestratorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Collision-resistant id: wall clock plus a random tail.
pub(crate) fn generate_id(prefix: &str) -> String {
    format!("{}-{}-{}", prefix, Utc::now().timestamp_millis(), Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_box_ids_are_unique() {
        let a = TimeBox::new("task-1", 25);
        let b = TimeBox::new("task-1", 25);
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("box-"));
    }

    #[test]
    fn outcome_serializes_camel_case() {
        let outcome = TimeBoxOutcome::new("box-1", "task-1", 25, 10, OutcomeKind::Interrupted);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["timeBoxId"], "box-1");
        assert_eq!(json["actualMinutes"], 10);
        assert_eq!(json["outcome"], "interrupted");
    }

    #[test]
    fn fresh_state_is_empty_and_settled() {
        let state = OrchestratorState::new();
        assert!(state.active_time_box.is_none());
        assert!(state.recommendation.is_none());
        assert!(state.outcomes.is_empty());
        assert!(!state.is_loading_recommendation);
    }
}
