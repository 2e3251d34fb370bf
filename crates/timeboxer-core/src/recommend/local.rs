//! Deterministic local recommendation strategy.
//!
//! Pure selection over the context: no I/O, no clock reads, no randomness.
//! Identical inputs always yield the identical recommendation, which is what
//! makes the fallback path testable and the remote strategy safe to degrade.

use async_trait::async_trait;
use std::collections::HashSet;

use super::{RecommendContext, RecommendStrategy, TimeBoxRecommendation};
use crate::error::RecommendError;
use crate::orchestrator::OutcomeKind;
use crate::task::{CognitiveLoad, Priority, Task};

/// Task id returned when the pool is empty.
pub const EMPTY_POOL_TASK_ID: &str = "dummy";

/// Longest duration a box may take, even when the estimate asks for more.
const MAX_BOX_MINUTES: u32 = 45;

/// Why a task was recommended. Fixed strings, one per selection path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendReason {
    EmptyPool,
    LowLoadReentry,
    UrgentFirst,
    MediumNext,
    LowMomentum,
}

impl RecommendReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyPool => "No tasks available locally",
            Self::LowLoadReentry => "recommended low cognitive load task after interruption.",
            Self::UrgentFirst => "urgent priority task needs attention first",
            Self::MediumNext => "medium priority task is next in line",
            Self::LowMomentum => "low priority task to keep momentum",
        }
    }

    fn for_priority(priority: Priority) -> Self {
        match priority {
            Priority::Urgent => Self::UrgentFirst,
            Priority::Medium => Self::MediumNext,
            Priority::Low => Self::LowMomentum,
        }
    }
}

/// Deterministic strategy: urgent-first selection with completed tasks
/// filtered out, plus a low-cognitive-load mode for post-interruption
/// re-entry.
#[derive(Debug, Clone, Default)]
pub struct LocalStrategy;

impl LocalStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Pure selection logic; callable without an executor.
    pub fn evaluate(&self, context: &RecommendContext) -> TimeBoxRecommendation {
        if context.tasks.is_empty() {
            return TimeBoxRecommendation {
                task_id: EMPTY_POOL_TASK_ID.to_string(),
                duration_minutes: 15,
                reason: Some(RecommendReason::EmptyPool.as_str().to_string()),
                prefer_low_cognitive_load: Some(context.prefer_low_cognitive_load),
            };
        }

        let completed_ids: HashSet<&str> = context
            .outcomes
            .iter()
            .filter(|o| o.outcome == OutcomeKind::Completed)
            .map(|o| o.task_id.as_str())
            .collect();

        let available: Vec<&Task> = context
            .tasks
            .iter()
            .filter(|t| !completed_ids.contains(t.id.as_str()))
            .collect();

        // Everything done: offer a replay rather than nothing.
        let candidates: Vec<&Task> = if available.is_empty() {
            context.tasks.iter().collect()
        } else {
            available
        };

        let (chosen, reason) = if context.prefer_low_cognitive_load {
            let easy = candidates.iter().copied().find(|t| {
                t.cognitive_load == Some(CognitiveLoad::Low) || t.priority == Priority::Low
            });
            (easy.unwrap_or(candidates[0]), RecommendReason::LowLoadReentry)
        } else {
            let mut ranked = candidates.clone();
            // sort_by_key is stable, so ties keep their pool order.
            ranked.sort_by_key(|t| t.priority.rank());
            let first = ranked[0];
            (first, RecommendReason::for_priority(first.priority))
        };

        TimeBoxRecommendation {
            task_id: chosen.id.clone(),
            duration_minutes: Self::duration_for(chosen),
            reason: Some(reason.as_str().to_string()),
            prefer_low_cognitive_load: Some(context.prefer_low_cognitive_load),
        }
    }

    /// Box length for a chosen task: declared estimates are honored up to 45
    /// minutes; otherwise demanding work gets 25 and light work gets 15.
    fn duration_for(task: &Task) -> u32 {
        if let Some(estimate) = task.estimated_minutes {
            return estimate.min(MAX_BOX_MINUTES);
        }
        if task.cognitive_load == Some(CognitiveLoad::High) || task.priority == Priority::Urgent {
            25
        } else if task.cognitive_load == Some(CognitiveLoad::Low) || task.priority == Priority::Low {
            15
        } else {
            25
        }
    }
}

#[async_trait]
impl RecommendStrategy for LocalStrategy {
    async fn recommend(&self, context: &RecommendContext) -> Result<TimeBoxRecommendation, RecommendError> {
        Ok(self.evaluate(context))
    }
}
