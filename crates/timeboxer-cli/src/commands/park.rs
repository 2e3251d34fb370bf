//! Thought parking commands.

use clap::Subcommand;

use timeboxer_core::ThoughtKind;

use crate::common;

#[derive(Subcommand)]
pub enum ParkAction {
    /// Park a thought without leaving the current box
    Add {
        /// The thought itself
        content: String,
        /// Kind of thought: memo, todo or search (default: memo)
        #[arg(long, default_value = "memo")]
        kind: String,
    },
    /// List pending thoughts as JSON
    List {
        /// Include resolved thoughts
        #[arg(long)]
        all: bool,
    },
    /// Mark a parked thought as handled
    Done {
        /// Thought ID
        id: String,
        /// What became of it
        #[arg(long)]
        resolution: Option<String>,
    },
}

pub fn run(action: ParkAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = common::load_state();
    common::poll_idle(&mut state);

    match action {
        ParkAction::Add { content, kind } => {
            let kind = match kind.as_str() {
                "todo" => ThoughtKind::Todo,
                "search" => ThoughtKind::Search,
                _ => ThoughtKind::Memo,
            };
            let id = state.parking.park(content, kind);
            println!("Parked: {id}");
        }
        ParkAction::List { all } => {
            if all {
                println!("{}", serde_json::to_string_pretty(state.parking.all())?);
            } else {
                println!("{}", serde_json::to_string_pretty(&state.parking.pending())?);
            }
        }
        ParkAction::Done { id, resolution } => {
            state.parking.complete(&id, resolution)?;
            if let Some(thought) = state.parking.all().iter().find(|t| t.id == id) {
                println!("{}", serde_json::to_string_pretty(thought)?);
            }
        }
    }

    common::save_state(&state)?;
    Ok(())
}
