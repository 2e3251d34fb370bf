//! Shared plumbing for the command handlers.
//!
//! Holds the persisted application state (session, orchestrator snapshot,
//! parking lot, idle watcher) and the constructors that turn configuration
//! into concrete strategies and providers.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use timeboxer_core::{
    config_dir, BackendStrategy, BackendTaskProvider, Config, FocusSession, FocusStatus,
    IdleAlert, IdleWatcher, LocalStrategy, OrchestratorState, ParkingLot, RecommendStrategy,
    SessionOrchestrator, StaticTaskProvider, TaskProvider,
};

const STATE_FILE: &str = "state.json";

/// Everything the CLI carries between invocations.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub session: FocusSession,
    pub orchestrator: OrchestratorState,
    pub parking: ParkingLot,
    pub watcher: IdleWatcher,
}

/// Load the persisted state. Missing or corrupt state starts fresh.
pub fn load_state() -> AppState {
    let path = match config_dir() {
        Ok(dir) => dir.join(STATE_FILE),
        Err(_) => return AppState::default(),
    };
    match std::fs::read_to_string(&path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
            warn!(error = %err, path = %path.display(), "state file unreadable, starting fresh");
            AppState::default()
        }),
        Err(_) => AppState::default(),
    }
}

pub fn save_state(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let path = config_dir()?.join(STATE_FILE);
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Strategy per configuration: delegating when a backend URL is set,
/// deterministic local otherwise.
pub fn build_strategy(
    config: &Config,
) -> Result<Box<dyn RecommendStrategy>, Box<dyn std::error::Error>> {
    match config.backend_url()? {
        Some(url) => Ok(Box::new(BackendStrategy::new(url, config.backend_timeout()))),
        None => Ok(Box::new(LocalStrategy::new())),
    }
}

pub fn build_orchestrator(config: &Config) -> Result<SessionOrchestrator, Box<dyn std::error::Error>> {
    Ok(SessionOrchestrator::new(build_strategy(config)?))
}

/// Task provider per configuration: the remote endpoint when a backend URL
/// is set, the built-in pool otherwise.
pub fn build_provider(config: &Config) -> Result<Box<dyn TaskProvider>, Box<dyn std::error::Error>> {
    match config.backend_url()? {
        Some(url) => Ok(Box::new(BackendTaskProvider::new(url, config.backend_timeout()))),
        None => Ok(Box::new(StaticTaskProvider::placeholder())),
    }
}

pub fn runtime() -> Result<tokio::runtime::Runtime, Box<dyn std::error::Error>> {
    Ok(tokio::runtime::Runtime::new()?)
}

/// Print an idle nudge on stderr so stdout stays parseable.
pub fn announce_idle(alert: &IdleAlert) {
    eprintln!(
        "note: idle for {}s with a box on the clock",
        alert.idle_seconds
    );
}

/// Check for drift since the previous invocation, then mark this one as
/// activity.
pub fn poll_idle(state: &mut AppState) {
    let config = Config::load_or_default();
    state.watcher.set_config(config.watcher);

    let now = Utc::now();
    let in_focus = state.session.status() == FocusStatus::Running;
    if let Some(alert) = state.watcher.check(now, in_focus) {
        announce_idle(&alert);
    }
    state.watcher.note_activity(now);
}
