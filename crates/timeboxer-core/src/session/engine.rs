//! Focus session state machine.
//!
//! One session is one countdown over a single task. The machine holds no
//! internal thread -- the caller drives it with `tick()` on a one-second
//! cadence while the session runs.
//!
//! ## State Transitions
//!
//! ```text
//! idle/abandoned -> running -> paused -> running
//!                   running -> completed -> idle (reset)
//!                   running/paused -> abandoned
//! ```
//!
//! Actions attempted outside their valid state are silent no-ops: commands
//! return `None` and leave the state untouched. There is no error channel
//! here because there is no I/O -- a spurious `pause()` while idle is simply
//! not a transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::SessionEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusStatus {
    Idle,
    Running,
    Paused,
    Completed,
    Abandoned,
}

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionOutcome {
    Completed,
    Abandoned,
}

/// One ledger entry appended when a session leaves the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub task_id: String,
    pub duration_minutes: u32,
    pub outcome: SessionOutcome,
    pub ended_at: DateTime<Utc>,
}

/// Focus session state machine.
///
/// Counts down `remaining_seconds` one tick at a time; the caller owns the
/// cadence. Serializable so a host can stash it between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSession {
    status: FocusStatus,
    active_task_id: Option<String>,
    duration_minutes: u32,
    remaining_seconds: u32,
    #[serde(default)]
    history: Vec<SessionRecord>,
}

impl FocusSession {
    /// Create a fresh machine in the `Idle` state.
    pub fn new() -> Self {
        Self {
            status: FocusStatus::Idle,
            active_task_id: None,
            duration_minutes: 0,
            remaining_seconds: 0,
            history: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> FocusStatus {
        self.status
    }

    pub fn active_task_id(&self) -> Option<&str> {
        self.active_task_id.as_deref()
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn history(&self) -> &[SessionRecord] {
        &self.history
    }

    /// Whole minutes spent in the current box so far.
    pub fn elapsed_minutes(&self) -> u32 {
        self.duration_minutes
            .saturating_mul(60)
            .saturating_sub(self.remaining_seconds)
            / 60
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> SessionEvent {
        SessionEvent::StateSnapshot {
            status: self.status,
            active_task_id: self.active_task_id.clone(),
            duration_minutes: self.duration_minutes,
            remaining_seconds: self.remaining_seconds,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a box over `task_id`. Legal from `Idle` and `Abandoned`;
    /// a completed session must be `reset()` first. A duration whose second
    /// count would not fit the counter saturates at its ceiling.
    pub fn start(&mut self, task_id: impl Into<String>, duration_minutes: u32) -> Option<SessionEvent> {
        if duration_minutes == 0 {
            return None;
        }
        match self.status {
            FocusStatus::Idle | FocusStatus::Abandoned => {
                let task_id = task_id.into();
                self.status = FocusStatus::Running;
                self.active_task_id = Some(task_id.clone());
                self.duration_minutes = duration_minutes;
                self.remaining_seconds = duration_minutes.saturating_mul(60);
                Some(SessionEvent::SessionStarted {
                    task_id,
                    duration_minutes,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn pause(&mut self) -> Option<SessionEvent> {
        match self.status {
            FocusStatus::Running if self.remaining_seconds > 0 => {
                self.status = FocusStatus::Paused;
                Some(SessionEvent::SessionPaused {
                    remaining_seconds: self.remaining_seconds,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn resume(&mut self) -> Option<SessionEvent> {
        match self.status {
            FocusStatus::Paused => {
                self.status = FocusStatus::Running;
                Some(SessionEvent::SessionResumed {
                    remaining_seconds: self.remaining_seconds,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Give up on the current box. Legal from `Running` and `Paused`.
    pub fn abandon(&mut self) -> Option<SessionEvent> {
        match self.status {
            FocusStatus::Running | FocusStatus::Paused => {
                let task_id = self.active_task_id.take().unwrap_or_default();
                let elapsed_minutes = self.elapsed_minutes();
                self.history.push(SessionRecord {
                    task_id: task_id.clone(),
                    duration_minutes: self.duration_minutes,
                    outcome: SessionOutcome::Abandoned,
                    ended_at: Utc::now(),
                });
                self.status = FocusStatus::Abandoned;
                Some(SessionEvent::SessionAbandoned {
                    task_id,
                    duration_minutes: self.duration_minutes,
                    elapsed_minutes,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Acknowledge a completed box and return to `Idle`.
    pub fn reset(&mut self) -> Option<SessionEvent> {
        match self.status {
            FocusStatus::Completed => {
                let task_id = self.active_task_id.take().unwrap_or_default();
                self.history.push(SessionRecord {
                    task_id,
                    duration_minutes: self.duration_minutes,
                    outcome: SessionOutcome::Completed,
                    ended_at: Utc::now(),
                });
                self.status = FocusStatus::Idle;
                self.duration_minutes = 0;
                self.remaining_seconds = 0;
                Some(SessionEvent::SessionReset { at: Utc::now() })
            }
            _ => None,
        }
    }

    /// Advance the countdown by one second. Fires on a fixed one-second
    /// cadence while running; a no-op in every other state, so spurious or
    /// coalesced ticks cannot corrupt the countdown.
    pub fn tick(&mut self) -> Option<SessionEvent> {
        match self.status {
            FocusStatus::Running => {
                if self.remaining_seconds <= 1 {
                    self.remaining_seconds = 0;
                    self.status = FocusStatus::Completed;
                    let task_id = self.active_task_id.clone().unwrap_or_default();
                    Some(SessionEvent::SessionCompleted {
                        task_id,
                        duration_minutes: self.duration_minutes,
                        at: Utc::now(),
                    })
                } else {
                    self.remaining_seconds -= 1;
                    None
                }
            }
            _ => None,
        }
    }
}

impl Default for FocusSession {
    fn default() -> Self {
        Self::new()
    }
}
