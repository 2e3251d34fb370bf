//! Thought parking for mid-focus distractions.
//!
//! A session-scoped stash: a distracting thought gets parked with one call
//! and dealt with after the box, so the current task never loses the floor.
//! The lot is entirely in-memory; persisting it between runs is the host's
//! concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::orchestrator::generate_id;

/// Unique identifier for a parked thought.
pub type ThoughtId = String;

/// What kind of follow-up a parked thought wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThoughtKind {
    /// Just write it down.
    Memo,
    /// Becomes a task later.
    Todo,
    /// Something to look up.
    Search,
}

/// Lifecycle of a parked thought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThoughtStatus {
    Pending,
    Done,
}

/// A single parked thought.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkedThought {
    /// Unique thought identifier
    pub id: ThoughtId,

    /// The thought as captured
    pub content: String,

    /// Follow-up kind
    pub kind: ThoughtKind,

    /// Pending until completed
    pub status: ThoughtStatus,

    /// When the thought was parked
    pub parked_at: DateTime<Utc>,

    /// Focus session active at parking time, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// What was done about it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,

    /// When it was completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Counts and entries reported when a session ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSummary {
    /// The session the summary covers, if one was active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Entries covered by the summary
    pub thoughts: Vec<ParkedThought>,

    /// Entries still pending
    pub pending: usize,

    /// Entries completed
    pub done: usize,

    /// Counts by kind: memo, todo, search
    pub memos: usize,
    pub todos: usize,
    pub searches: usize,
}

/// Errors for parking operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParkingError {
    #[error("no parked thought with that id")]
    ThoughtNotFound,
    #[error("thought is already done")]
    AlreadyDone,
}

/// The in-memory lot of parked thoughts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingLot {
    thoughts: Vec<ParkedThought>,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_id: Option<String>,
}

impl ParkingLot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park a thought. Returns the new entry's id.
    pub fn park(&mut self, content: impl Into<String>, kind: ThoughtKind) -> ThoughtId {
        let id = generate_id("thought");
        self.thoughts.push(ParkedThought {
            id: id.clone(),
            content: content.into(),
            kind,
            status: ThoughtStatus::Pending,
            parked_at: Utc::now(),
            session_id: self.session_id.clone(),
            resolution: None,
            resolved_at: None,
        });
        id
    }

    /// Mark a thought done, with an optional note of how it was handled.
    pub fn complete(
        &mut self,
        id: &str,
        resolution: Option<String>,
    ) -> Result<(), ParkingError> {
        let thought = self
            .thoughts
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ParkingError::ThoughtNotFound)?;
        if thought.status == ThoughtStatus::Done {
            return Err(ParkingError::AlreadyDone);
        }
        thought.status = ThoughtStatus::Done;
        thought.resolution = resolution;
        thought.resolved_at = Some(Utc::now());
        Ok(())
    }

    /// Thoughts still waiting to be handled.
    pub fn pending(&self) -> Vec<&ParkedThought> {
        self.thoughts
            .iter()
            .filter(|t| t.status == ThoughtStatus::Pending)
            .collect()
    }

    /// All thoughts, oldest first.
    pub fn all(&self) -> &[ParkedThought] {
        &self.thoughts
    }

    /// Scope subsequent parks to a new session. Returns the session id.
    pub fn begin_session(&mut self) -> String {
        let id = generate_id("parking");
        self.session_id = Some(id.clone());
        id
    }

    /// End the active session and summarize it.
    ///
    /// The summary covers the thoughts parked during the session; with no
    /// session active it covers the whole lot.
    pub fn end_session(&mut self) -> ParkingSummary {
        let session_id = self.session_id.take();
        let thoughts: Vec<ParkedThought> = self
            .thoughts
            .iter()
            .filter(|t| session_id.is_none() || t.session_id == session_id)
            .cloned()
            .collect();
        ParkingSummary {
            session_id,
            pending: thoughts
                .iter()
                .filter(|t| t.status == ThoughtStatus::Pending)
                .count(),
            done: thoughts
                .iter()
                .filter(|t| t.status == ThoughtStatus::Done)
                .count(),
            memos: thoughts.iter().filter(|t| t.kind == ThoughtKind::Memo).count(),
            todos: thoughts.iter().filter(|t| t.kind == ThoughtKind::Todo).count(),
            searches: thoughts
                .iter()
                .filter(|t| t.kind == ThoughtKind::Search)
                .count(),
            thoughts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn park_creates_pending_entry() {
        let mut lot = ParkingLot::new();
        let id = lot.park("check that email", ThoughtKind::Memo);

        assert!(id.starts_with("thought-"));
        let pending = lot.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].content, "check that email");
        assert_eq!(pending[0].status, ThoughtStatus::Pending);
        assert!(pending[0].session_id.is_none());
    }

    #[test]
    fn complete_records_resolution() {
        let mut lot = ParkingLot::new();
        let id = lot.park("what was that crate called", ThoughtKind::Search);

        lot.complete(&id, Some("found it, noted in the plan".into()))
            .unwrap();

        assert!(lot.pending().is_empty());
        let thought = &lot.all()[0];
        assert_eq!(thought.status, ThoughtStatus::Done);
        assert!(thought.resolution.is_some());
        assert!(thought.resolved_at.is_some());
    }

    #[test]
    fn complete_unknown_id_fails() {
        let mut lot = ParkingLot::new();
        assert_eq!(
            lot.complete("thought-0-nope", None),
            Err(ParkingError::ThoughtNotFound)
        );
    }

    #[test]
    fn complete_twice_fails() {
        let mut lot = ParkingLot::new();
        let id = lot.park("done once", ThoughtKind::Memo);
        lot.complete(&id, None).unwrap();
        assert_eq!(lot.complete(&id, None), Err(ParkingError::AlreadyDone));
    }

    #[test]
    fn session_scopes_the_summary() {
        let mut lot = ParkingLot::new();
        lot.park("before any session", ThoughtKind::Memo);

        let session = lot.begin_session();
        lot.park("call the dentist", ThoughtKind::Todo);
        let id = lot.park("look up that paper", ThoughtKind::Search);
        lot.complete(&id, Some("queued for tonight".into())).unwrap();

        let summary = lot.end_session();
        assert_eq!(summary.session_id, Some(session));
        assert_eq!(summary.thoughts.len(), 2);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.done, 1);
        assert_eq!(summary.todos, 1);
        assert_eq!(summary.searches, 1);
        assert_eq!(summary.memos, 0);
    }

    #[test]
    fn end_without_session_covers_everything() {
        let mut lot = ParkingLot::new();
        lot.park("one", ThoughtKind::Memo);
        lot.park("two", ThoughtKind::Todo);

        let summary = lot.end_session();
        assert!(summary.session_id.is_none());
        assert_eq!(summary.thoughts.len(), 2);
        assert_eq!(summary.pending, 2);
    }

    #[test]
    fn parks_after_session_end_are_unscoped() {
        let mut lot = ParkingLot::new();
        lot.begin_session();
        lot.end_session();
        lot.park("later thought", ThoughtKind::Memo);
        assert!(lot.all()[0].session_id.is_none());
    }
}
