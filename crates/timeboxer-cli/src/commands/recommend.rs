use clap::Subcommand;

use timeboxer_core::{Config, OrchestratorEvent};

use crate::common::{self, AppState};

#[derive(Subcommand)]
pub enum RecommendAction {
    /// Ask the strategy for a fresh recommendation
    Next {
        /// Bias toward low cognitive load tasks
        #[arg(long)]
        low_load: bool,
    },
    /// Print the stored recommendation without asking again
    Show,
}

fn print_current(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    match &state.orchestrator.recommendation {
        Some(rec) => println!("{}", serde_json::to_string_pretty(rec)?),
        None => println!("no recommendation available"),
    }
    Ok(())
}

pub fn run(action: RecommendAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = common::load_state();
    common::poll_idle(&mut state);

    match action {
        RecommendAction::Next { low_load } => {
            let config = Config::load_or_default();
            let orchestrator = common::build_orchestrator(&config)?;
            let rt = common::runtime()?;
            state.orchestrator = rt.block_on(orchestrator.handle(
                &state.orchestrator,
                OrchestratorEvent::RequestNew {
                    prefer_low_cognitive_load: low_load,
                },
            ));
            print_current(&state)?;
        }
        RecommendAction::Show => print_current(&state)?,
    }

    common::save_state(&state)?;
    Ok(())
}
