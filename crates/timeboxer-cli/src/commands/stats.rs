//! Outcome statistics over the ledger.

use clap::Subcommand;

use timeboxer_core::OutcomeStats;

use crate::common;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Print aggregate outcome statistics as JSON
    Show,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = common::load_state();
    common::poll_idle(&mut state);

    match action {
        StatsAction::Show => {
            let stats = OutcomeStats::collect(&state.orchestrator.outcomes);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    common::save_state(&state)?;
    Ok(())
}
