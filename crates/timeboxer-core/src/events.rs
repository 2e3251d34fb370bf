use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::FocusStatus;

/// Every successful focus-session transition produces a SessionEvent.
/// The host glue consumes these to drive orchestrator events and rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum SessionEvent {
    SessionStarted {
        task_id: String,
        duration_minutes: u32,
        at: DateTime<Utc>,
    },
    SessionPaused {
        remaining_seconds: u32,
        at: DateTime<Utc>,
    },
    SessionResumed {
        remaining_seconds: u32,
        at: DateTime<Utc>,
    },
    /// Emitted by the tick that drains the box; the session is now completed
    /// and stays there until `reset()`.
    SessionCompleted {
        task_id: String,
        duration_minutes: u32,
        at: DateTime<Utc>,
    },
    SessionAbandoned {
        task_id: String,
        duration_minutes: u32,
        /// Whole minutes actually spent before abandoning.
        elapsed_minutes: u32,
        at: DateTime<Utc>,
    },
    SessionReset {
        at: DateTime<Utc>,
    },
    /// Full-state query result, not a transition.
    StateSnapshot {
        status: FocusStatus,
        active_task_id: Option<String>,
        duration_minutes: u32,
        remaining_seconds: u32,
        at: DateTime<Utc>,
    },
}
