use std::path::PathBuf;

use clap::Subcommand;
use steptimer_core::{export_steps, import_steps, Config};

#[derive(Subcommand)]
pub enum StepsAction {
    /// Print the step list as JSON
    Show {
        /// Step list JSON to read instead of the configured one
        #[arg(long)]
        steps: Option<PathBuf>,
    },
    /// Check a step list JSON file without running it
    Validate {
        /// File to validate
        file: PathBuf,
    },
}

pub fn run(action: StepsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StepsAction::Show { steps } => {
            let config = Config::load_or_default();
            let steps = super::load_steps(steps.as_deref(), &config)?;
            println!("{}", export_steps(&steps)?);
        }
        StepsAction::Validate { file } => {
            let raw = std::fs::read_to_string(&file)?;
            let steps = import_steps(&raw)?;
            println!("ok: {} steps", steps.len());
        }
    }
    Ok(())
}
