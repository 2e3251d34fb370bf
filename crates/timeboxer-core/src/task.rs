//! Task pool records.
//!
//! Tasks are supplied by an external pool (see [`crate::provider`]) and are
//! read-only inside the core: the engine picks among them but never edits them.
//! Field casing on the wire is camelCase to match the backend contract.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How urgently a task needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank, urgent first. Lower is sooner.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Urgent => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "urgent" => Ok(Priority::Urgent),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// Coarse classification of the mental effort a task demands.
///
/// Used to bias post-interruption recommendations toward easier re-entry work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CognitiveLoad {
    Low,
    Medium,
    High,
}

impl CognitiveLoad {
    pub fn as_str(&self) -> &'static str {
        match self {
            CognitiveLoad::Low => "low",
            CognitiveLoad::Medium => "medium",
            CognitiveLoad::High => "high",
        }
    }
}

impl FromStr for CognitiveLoad {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(CognitiveLoad::Low),
            "medium" => Ok(CognitiveLoad::Medium),
            "high" => Ok(CognitiveLoad::High),
            other => Err(format!("unknown cognitive load: {other}")),
        }
    }
}

/// A unit of work eligible for a time box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: String,

    /// Short human-readable title
    pub title: String,

    pub priority: Priority,

    /// Caller-supplied duration estimate in minutes, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cognitive_load: Option<CognitiveLoad>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            priority,
            estimated_minutes: None,
            cognitive_load: None,
        }
    }

    pub fn with_estimate(mut self, minutes: u32) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }

    pub fn with_cognitive_load(mut self, load: CognitiveLoad) -> Self {
        self.cognitive_load = Some(load);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_rank_orders_urgent_first() {
        assert!(Priority::Urgent.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn priority_round_trips_through_str() {
        for p in [Priority::Urgent, Priority::Medium, Priority::Low] {
            assert_eq!(p.as_str().parse::<Priority>(), Ok(p));
        }
    }

    #[test]
    fn task_serializes_camel_case() {
        let task = Task::new("t-1", "Write report", Priority::Urgent)
            .with_estimate(30)
            .with_cognitive_load(CognitiveLoad::High);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["priority"], "urgent");
        assert_eq!(json["estimatedMinutes"], 30);
        assert_eq!(json["cognitiveLoad"], "high");
    }

    #[test]
    fn task_tolerates_unknown_fields() {
        // Backend task payloads carry extra fields like "status".
        let json = r#"{"id":"t-1","title":"Inbox zero","priority":"low","status":"pending"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "t-1");
        assert_eq!(task.priority, Priority::Low);
        assert!(task.estimated_minutes.is_none());
    }
}
