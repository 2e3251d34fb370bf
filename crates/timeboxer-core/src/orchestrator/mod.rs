//! Event-driven session orchestration.
//!
//! Folds domain events into immutable [`OrchestratorState`] snapshots and
//! drives the injected recommendation strategy at the trigger points: app
//! start, box completion, interruption, and explicit requests.

mod engine;
mod state;

pub use engine::{OrchestratorEvent, PendingRecommendation, SessionOrchestrator};
pub use state::{OrchestratorState, OutcomeKind, TimeBox, TimeBoxOutcome};

pub(crate) use state::generate_id;
