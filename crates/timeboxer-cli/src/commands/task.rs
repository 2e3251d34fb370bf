//! Task pool commands.

use clap::Subcommand;

use timeboxer_core::{Config, OrchestratorEvent};

use crate::common;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Print the current task pool as JSON
    List,
    /// Refresh the task pool from the configured provider
    Sync,
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = common::load_state();
    common::poll_idle(&mut state);

    match action {
        TaskAction::List => {
            println!("{}", serde_json::to_string_pretty(&state.orchestrator.tasks)?);
        }
        TaskAction::Sync => {
            let config = Config::load_or_default();
            let provider = common::build_provider(&config)?;
            let orchestrator = common::build_orchestrator(&config)?;
            let rt = common::runtime()?;

            let tasks = rt.block_on(provider.fetch())?;
            println!("Synced {} tasks into the pool", tasks.len());

            let (next, pending) =
                orchestrator.apply(&state.orchestrator, OrchestratorEvent::AppStart { tasks });
            state.orchestrator = match pending {
                Some(pending) => {
                    let settled = rt.block_on(orchestrator.resolve(&next, pending));
                    if let Some(rec) = &settled.recommendation {
                        println!("{}", serde_json::to_string_pretty(rec)?);
                    }
                    settled
                }
                None => next,
            };
        }
    }

    common::save_state(&state)?;
    Ok(())
}
