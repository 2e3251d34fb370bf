//! Outcome ledger statistics.
//!
//! Pure aggregations over the orchestrator's outcome ledger for host display.
//! Nothing here reads or writes storage.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::orchestrator::{OutcomeKind, TimeBoxOutcome};

/// Tallies for a single task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTally {
    pub completed: u32,
    pub interrupted: u32,
    pub abandoned: u32,
    /// Minutes actually spent in boxes over this task
    pub focused_minutes: u32,
}

/// Aggregations over the outcome ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeStats {
    /// Ledger entries covered
    pub total: usize,
    pub completed: u32,
    pub interrupted: u32,
    pub abandoned: u32,
    /// Completed over total; 0.0 on an empty ledger
    pub completion_rate: f64,
    /// Sum of actual minutes across all outcomes
    pub focused_minutes: u32,
    /// Tallies keyed by task id, sorted for stable display
    pub per_task: BTreeMap<String, TaskTally>,
}

impl OutcomeStats {
    /// Aggregate a ledger.
    pub fn collect(outcomes: &[TimeBoxOutcome]) -> Self {
        let mut stats = Self {
            total: outcomes.len(),
            completed: 0,
            interrupted: 0,
            abandoned: 0,
            completion_rate: 0.0,
            focused_minutes: 0,
            per_task: BTreeMap::new(),
        };

        for outcome in outcomes {
            let tally = stats.per_task.entry(outcome.task_id.clone()).or_default();
            match outcome.outcome {
                OutcomeKind::Completed => {
                    stats.completed += 1;
                    tally.completed += 1;
                }
                OutcomeKind::Interrupted => {
                    stats.interrupted += 1;
                    tally.interrupted += 1;
                }
                OutcomeKind::Abandoned => {
                    stats.abandoned += 1;
                    tally.abandoned += 1;
                }
            }
            stats.focused_minutes += outcome.actual_minutes;
            tally.focused_minutes += outcome.actual_minutes;
        }

        if stats.total > 0 {
            stats.completion_rate = f64::from(stats.completed) / stats.total as f64;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(task_id: &str, actual: u32, kind: OutcomeKind) -> TimeBoxOutcome {
        TimeBoxOutcome::new("box-1", task_id, 25, actual, kind)
    }

    #[test]
    fn empty_ledger_yields_zeroes() {
        let stats = OutcomeStats::collect(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completion_rate, 0.0);
        assert_eq!(stats.focused_minutes, 0);
        assert!(stats.per_task.is_empty());
    }

    #[test]
    fn counts_by_outcome_kind() {
        let ledger = vec![
            outcome("a", 25, OutcomeKind::Completed),
            outcome("a", 10, OutcomeKind::Interrupted),
            outcome("b", 25, OutcomeKind::Completed),
            outcome("b", 5, OutcomeKind::Abandoned),
        ];

        let stats = OutcomeStats::collect(&ledger);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.interrupted, 1);
        assert_eq!(stats.abandoned, 1);
        assert_eq!(stats.completion_rate, 0.5);
        assert_eq!(stats.focused_minutes, 65);
    }

    #[test]
    fn per_task_tallies_split_the_ledger() {
        let ledger = vec![
            outcome("a", 25, OutcomeKind::Completed),
            outcome("a", 10, OutcomeKind::Interrupted),
            outcome("b", 15, OutcomeKind::Completed),
        ];

        let stats = OutcomeStats::collect(&ledger);
        let a = &stats.per_task["a"];
        assert_eq!(a.completed, 1);
        assert_eq!(a.interrupted, 1);
        assert_eq!(a.focused_minutes, 35);
        let b = &stats.per_task["b"];
        assert_eq!(b.completed, 1);
        assert_eq!(b.focused_minutes, 15);
    }
}
