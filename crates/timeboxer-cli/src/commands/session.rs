use chrono::Utc;
use clap::Subcommand;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

use timeboxer_core::{Config, FocusSession, FocusStatus, OrchestratorEvent, SessionEvent};

use crate::common::{self, AppState};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Start a focus box on a task
    Start {
        /// Task ID to focus on
        task_id: String,
        /// Box length in minutes
        #[arg(long, default_value = "25")]
        minutes: u32,
    },
    /// Pause the running box
    Pause,
    /// Resume a paused box
    Resume,
    /// Give up on the current box
    Abandon {
        /// Why the box was cut short
        #[arg(long)]
        reason: Option<String>,
    },
    /// Advance the countdown by one second
    Tick,
    /// Acknowledge a completed box and return to idle
    Reset,
    /// Print the current session state as JSON
    Status,
    /// Drive the countdown in the foreground until the box ends
    Watch,
}

/// Print the transition event, or the snapshot when the command was a no-op.
fn emit(event: Option<SessionEvent>, session: &FocusSession) -> Result<(), Box<dyn std::error::Error>> {
    match event {
        Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
        None => println!("{}", serde_json::to_string_pretty(&session.snapshot())?),
    }
    Ok(())
}

/// Fold a box outcome into the orchestrator ledger and surface the next
/// recommendation, if one arrived.
async fn settle(
    state: &mut AppState,
    event: OrchestratorEvent,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let orchestrator = common::build_orchestrator(&config)?;
    state.orchestrator = orchestrator.handle(&state.orchestrator, event).await;
    if let Some(rec) = &state.orchestrator.recommendation {
        println!("{}", serde_json::to_string_pretty(rec)?);
    }
    Ok(())
}

/// Close the parking session and report what piled up during the box.
fn close_parking(state: &mut AppState) {
    let summary = state.parking.end_session();
    if !summary.thoughts.is_empty() {
        eprintln!(
            "parked during this box: {} ({} memo, {} todo, {} search; {} still pending)",
            summary.thoughts.len(),
            summary.memos,
            summary.todos,
            summary.searches,
            summary.pending
        );
    }
}

/// Drive the countdown on a one-second cadence until the box ends.
async fn watch(state: &mut AppState) -> Result<(), Box<dyn std::error::Error>> {
    let mut ticks = interval_at(Instant::now() + Duration::from_secs(1), Duration::from_secs(1));
    // A missed deadline (suspend, heavy load) must not burst-fire and drain
    // the countdown faster than wall time.
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticks.tick().await;
        let now = Utc::now();
        let in_focus = state.session.status() == FocusStatus::Running;
        if let Some(alert) = state.watcher.check(now, in_focus) {
            common::announce_idle(&alert);
        }
        if let Some(event) = state.session.tick() {
            println!("{}", serde_json::to_string_pretty(&event)?);
            if let SessionEvent::SessionCompleted {
                task_id,
                duration_minutes,
                ..
            } = event
            {
                settle(
                    state,
                    OrchestratorEvent::TimeBoxEnded {
                        task_id,
                        duration_minutes,
                        actual_minutes: duration_minutes,
                    },
                )
                .await?;
            }
            return Ok(());
        }
    }
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = common::load_state();
    common::poll_idle(&mut state);

    match action {
        SessionAction::Start { task_id, minutes } => {
            match state.session.start(task_id.clone(), minutes) {
                Some(event) => {
                    println!("{}", serde_json::to_string_pretty(&event)?);
                    state.parking.begin_session();
                    let config = Config::load_or_default();
                    let orchestrator = common::build_orchestrator(&config)?;
                    let (next, pending) = orchestrator.apply(
                        &state.orchestrator,
                        OrchestratorEvent::TimeBoxStarted {
                            task_id,
                            duration_minutes: minutes,
                        },
                    );
                    // Starting a box only clears advice; it never requests
                    // any. A pending slot here would be dropped unresolved.
                    debug_assert!(pending.is_none());
                    state.orchestrator = next;
                }
                None => emit(None, &state.session)?,
            }
        }
        SessionAction::Pause => {
            let event = state.session.pause();
            emit(event, &state.session)?;
        }
        SessionAction::Resume => {
            let event = state.session.resume();
            emit(event, &state.session)?;
        }
        SessionAction::Abandon { reason } => match state.session.abandon() {
            Some(event) => {
                println!("{}", serde_json::to_string_pretty(&event)?);
                if let SessionEvent::SessionAbandoned {
                    task_id,
                    duration_minutes,
                    elapsed_minutes,
                    ..
                } = event
                {
                    let rt = common::runtime()?;
                    rt.block_on(settle(
                        &mut state,
                        OrchestratorEvent::TimeBoxInterrupted {
                            task_id,
                            duration_minutes,
                            elapsed_minutes,
                            reason,
                        },
                    ))?;
                    close_parking(&mut state);
                }
            }
            None => emit(None, &state.session)?,
        },
        SessionAction::Tick => match state.session.tick() {
            Some(event) => {
                println!("{}", serde_json::to_string_pretty(&event)?);
                if let SessionEvent::SessionCompleted {
                    task_id,
                    duration_minutes,
                    ..
                } = event
                {
                    let rt = common::runtime()?;
                    rt.block_on(settle(
                        &mut state,
                        OrchestratorEvent::TimeBoxEnded {
                            task_id,
                            duration_minutes,
                            actual_minutes: duration_minutes,
                        },
                    ))?;
                    close_parking(&mut state);
                }
            }
            None => emit(None, &state.session)?,
        },
        SessionAction::Reset => {
            let event = state.session.reset();
            emit(event, &state.session)?;
        }
        SessionAction::Status => {
            emit(None, &state.session)?;
        }
        SessionAction::Watch => {
            if state.session.status() != FocusStatus::Running {
                emit(None, &state.session)?;
            } else {
                eprintln!(
                    "watching {}s left on {}",
                    state.session.remaining_seconds(),
                    state.session.active_task_id().unwrap_or("?")
                );
                let rt = common::runtime()?;
                rt.block_on(watch(&mut state))?;
                close_parking(&mut state);
            }
        }
    }

    common::save_state(&state)?;
    Ok(())
}
