use std::path::PathBuf;

use chrono::Local;
use clap::Args;
use steptimer_core::{Config, StepTimer};

#[derive(Args)]
pub struct PlanArgs {
    /// Remaining time, as seconds or M:SS
    #[arg(long, value_parser = parse_remaining)]
    remaining: u64,
    /// Step list JSON to read instead of the configured one
    #[arg(long)]
    steps: Option<PathBuf>,
    /// List every upcoming step
    #[arg(long)]
    expand: bool,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let steps = super::load_steps(args.steps.as_deref(), &config)?;
    let engine = StepTimer::new(steps, Local::now()).with_lookahead(config.timer.lookahead);
    let view = engine.view_at(args.remaining, args.expand);
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn parse_remaining(input: &str) -> Result<u64, String> {
    let input = input.trim();
    let invalid = || format!("invalid remaining time '{input}': expected seconds or M:SS");
    match input.split_once(':') {
        Some((m, s)) => {
            let minutes: u64 = m.parse().map_err(|_| invalid())?;
            let seconds: u64 = s.parse().map_err(|_| invalid())?;
            if seconds >= 60 {
                return Err(invalid());
            }
            minutes
                .checked_mul(60)
                .and_then(|secs| secs.checked_add(seconds))
                .ok_or_else(invalid)
        }
        None => input.parse().map_err(|_| invalid()),
    }
}
