//! # Timeboxer Core Library
//!
//! This library provides the core business logic for the Timeboxer focus
//! assistant. It implements a CLI-first philosophy where every operation is
//! available through a standalone CLI binary, with graphical front ends
//! acting as thin layers over the same core library.
//!
//! ## Architecture
//!
//! - **Focus Session**: a caller-ticked state machine over one time-boxed
//!   work session
//! - **Recommendation**: a deterministic local strategy plus a delegating
//!   remote strategy behind a single trait
//! - **Orchestrator**: event-driven controller folding domain events into
//!   immutable state snapshots
//! - **Parking / Idle / Stats**: focus-support utilities around the core loop
//!
//! ## Key Components
//!
//! - [`FocusSession`]: the per-box state machine
//! - [`SessionOrchestrator`]: the event-driven session controller
//! - [`LocalStrategy`] / [`BackendStrategy`]: recommendation strategies
//! - [`Config`]: application configuration management

pub mod session;
pub mod recommend;
pub mod orchestrator;
pub mod provider;
pub mod task;
pub mod events;
pub mod parking;
pub mod idle;
pub mod stats;
pub mod config;
pub mod error;

pub use session::{FocusSession, FocusStatus, SessionOutcome, SessionRecord};
pub use recommend::{
    BackendStrategy, LocalStrategy, RecommendContext, RecommendStrategy, TimeBoxRecommendation,
    EMPTY_POOL_TASK_ID,
};
pub use orchestrator::{
    OrchestratorEvent, OrchestratorState, OutcomeKind, PendingRecommendation,
    SessionOrchestrator, TimeBox, TimeBoxOutcome,
};
pub use provider::{placeholder_tasks, BackendTaskProvider, StaticTaskProvider, TaskProvider};
pub use task::{CognitiveLoad, Priority, Task};
pub use events::SessionEvent;
pub use parking::{
    ParkedThought, ParkingError, ParkingLot, ParkingSummary, ThoughtKind, ThoughtStatus,
};
pub use idle::{IdleAlert, IdleWatcher, IdleWatcherConfig};
pub use stats::{OutcomeStats, TaskTally};
pub use config::{config_dir, BackendConfig, Config};
pub use error::{ConfigError, CoreError, ProviderError, RecommendError, Result};
