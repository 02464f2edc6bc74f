pub mod config;
pub mod plan;
pub mod run;
pub mod steps;

use std::path::Path;

use steptimer_core::{import_steps, Config, Step};

/// Steps from an explicit file, else whatever the config points at.
pub fn load_steps(
    file: Option<&Path>,
    config: &Config,
) -> Result<Vec<Step>, Box<dyn std::error::Error>> {
    match file {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            Ok(import_steps(&raw)?)
        }
        None => Ok(config.steps()?),
    }
}
