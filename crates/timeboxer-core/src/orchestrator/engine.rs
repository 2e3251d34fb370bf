//! Session orchestrator.
//!
//! The event-driven controller: consumes domain events, folds them into
//! [`OrchestratorState`] snapshots, and asks the injected recommendation
//! strategy for the next suggestion at the defined trigger points.
//!
//! Event application is split in two so hosts can observe the loading span:
//! [`SessionOrchestrator::apply`] performs the synchronous effects and
//! returns a [`PendingRecommendation`] descriptor when the event wants a
//! recommendation; [`SessionOrchestrator::resolve`] awaits the strategy and
//! folds the answer in, discarding results that a later event superseded.
//! [`SessionOrchestrator::handle`] is the one-call form.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

use super::state::{generate_id, OrchestratorState, OutcomeKind, TimeBox, TimeBoxOutcome};
use crate::recommend::{RecommendContext, RecommendStrategy};
use crate::task::Task;

/// Domain events consumed by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum OrchestratorEvent {
    /// Host came up and supplied the initial task pool.
    AppStart { tasks: Vec<Task> },
    /// A time box began over `task_id`.
    TimeBoxStarted { task_id: String, duration_minutes: u32 },
    /// The active box ran its full course.
    TimeBoxEnded {
        task_id: String,
        duration_minutes: u32,
        actual_minutes: u32,
    },
    /// The active box was cut short.
    TimeBoxInterrupted {
        task_id: String,
        duration_minutes: u32,
        elapsed_minutes: u32,
        reason: Option<String>,
    },
    /// Explicit ask for a fresh recommendation.
    RequestNew { prefer_low_cognitive_load: bool },
}

/// Descriptor for a recommendation request allocated by `apply`.
///
/// Opaque to hosts: hold it across the await and hand it to `resolve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRecommendation {
    token: u64,
    prefer_low_cognitive_load: bool,
}

/// The event-driven controller over [`OrchestratorState`].
///
/// Constructed with an injected strategy; holds no other state besides the
/// request sequence used to discard superseded recommendation results.
pub struct SessionOrchestrator {
    strategy: Box<dyn RecommendStrategy>,
    request_seq: AtomicU64,
}

impl SessionOrchestrator {
    pub fn new(strategy: Box<dyn RecommendStrategy>) -> Self {
        Self {
            strategy,
            request_seq: AtomicU64::new(0),
        }
    }

    /// Apply the synchronous effects of `event` to a snapshot.
    ///
    /// Never mutates the input. The returned snapshot has
    /// `is_loading_recommendation == true` exactly when a descriptor is
    /// returned alongside it.
    pub fn apply(
        &self,
        state: &OrchestratorState,
        event: OrchestratorEvent,
    ) -> (OrchestratorState, Option<PendingRecommendation>) {
        let mut next = state.clone();
        match event {
            OrchestratorEvent::AppStart { tasks } => {
                next.tasks = tasks;
                // With a box mid-flight the pool refresh stands, but no
                // recommendation is requested now or queued for later.
                if next.active_time_box.is_some() || next.tasks.is_empty() {
                    return (next, None);
                }
                let pending = self.begin_request(&mut next, false);
                (next, Some(pending))
            }
            OrchestratorEvent::TimeBoxStarted {
                task_id,
                duration_minutes,
            } => {
                next.active_time_box = Some(TimeBox::new(task_id, duration_minutes));
                // A recommendation is advice for an idle state: clear it, and
                // invalidate any in-flight request so a stale result cannot
                // resurrect it.
                next.recommendation = None;
                self.request_seq.fetch_add(1, Ordering::SeqCst);
                (next, None)
            }
            OrchestratorEvent::TimeBoxEnded {
                task_id,
                duration_minutes,
                actual_minutes,
            } => {
                Self::record_outcome(
                    &mut next,
                    task_id,
                    duration_minutes,
                    actual_minutes,
                    OutcomeKind::Completed,
                );
                next.active_time_box = None;
                if next.tasks.is_empty() {
                    return (next, None);
                }
                let pending = self.begin_request(&mut next, false);
                (next, Some(pending))
            }
            OrchestratorEvent::TimeBoxInterrupted {
                task_id,
                duration_minutes,
                elapsed_minutes,
                reason,
            } => {
                if let Some(reason) = reason {
                    debug!(%reason, %task_id, "time box interrupted");
                }
                Self::record_outcome(
                    &mut next,
                    task_id,
                    duration_minutes,
                    elapsed_minutes,
                    OutcomeKind::Interrupted,
                );
                next.active_time_box = None;
                if next.tasks.is_empty() {
                    return (next, None);
                }
                let pending = self.begin_request(&mut next, true);
                (next, Some(pending))
            }
            OrchestratorEvent::RequestNew {
                prefer_low_cognitive_load,
            } => {
                let pending = self.begin_request(&mut next, prefer_low_cognitive_load);
                (next, Some(pending))
            }
        }
    }

    /// Settle a pending request against a snapshot.
    ///
    /// The strategy's answer is folded in only while `pending` is still the
    /// newest allocated request; superseded results are discarded with a log
    /// line. Strategy failure keeps the previous recommendation. Either way
    /// the returned snapshot has `is_loading_recommendation == false`.
    pub async fn resolve(
        &self,
        state: &OrchestratorState,
        pending: PendingRecommendation,
    ) -> OrchestratorState {
        let mut next = state.clone();
        let context = RecommendContext::new(
            next.tasks.clone(),
            next.outcomes.clone(),
            pending.prefer_low_cognitive_load,
        );
        match self.strategy.recommend(&context).await {
            Ok(recommendation) => {
                if self.is_latest(pending.token) {
                    next.recommendation = Some(recommendation);
                } else {
                    debug!(token = pending.token, "discarding superseded recommendation result");
                }
            }
            Err(err) => {
                warn!(error = %err, "recommendation request failed; keeping previous recommendation");
            }
        }
        next.is_loading_recommendation = false;
        next
    }

    /// `apply` then `resolve` when the event requested a recommendation.
    pub async fn handle(&self, state: &OrchestratorState, event: OrchestratorEvent) -> OrchestratorState {
        let (next, pending) = self.apply(state, event);
        match pending {
            Some(pending) => self.resolve(&next, pending).await,
            None => next,
        }
    }

    /// Replace the task pool without requesting a recommendation: the quiet
    /// counterpart of `AppStart`.
    pub fn update_tasks(&self, state: &OrchestratorState, tasks: Vec<Task>) -> OrchestratorState {
        let mut next = state.clone();
        next.tasks = tasks;
        next
    }

    fn begin_request(&self, state: &mut OrchestratorState, prefer_low_cognitive_load: bool) -> PendingRecommendation {
        state.is_loading_recommendation = true;
        let token = self.request_seq.fetch_add(1, Ordering::SeqCst) + 1;
        PendingRecommendation {
            token,
            prefer_low_cognitive_load,
        }
    }

    fn is_latest(&self, token: u64) -> bool {
        self.request_seq.load(Ordering::SeqCst) == token
    }

    fn record_outcome(
        state: &mut OrchestratorState,
        task_id: String,
        duration_minutes: u32,
        actual_minutes: u32,
        outcome: OutcomeKind,
    ) {
        let time_box_id = match state.active_time_box.as_ref() {
            Some(active) => active.id.clone(),
            // The box is unexpectedly absent; synthesize an id so the ledger
            // entry still stands on its own.
            None => generate_id("box"),
        };
        state.outcomes.insert(
            0,
            TimeBoxOutcome::new(time_box_id, task_id, duration_minutes, actual_minutes, outcome),
        );
    }
}
