use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use clap::Args;
use steptimer_core::{
    dispatch, Config, Event, NotificationSink, SilentSink, StepTimer, Ticker,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;

use crate::render::render;
use crate::sink::TerminalSink;

const HELP: &str = "commands: p pause/resume | r reset | R restart | t HH:MM target | \
c N toggle step N | e expand | i FILE import | x export | q quit";

#[derive(Args)]
pub struct RunArgs {
    /// Step list JSON to read instead of the configured one
    #[arg(long)]
    steps: Option<PathBuf>,
    /// Target completion time of day (HH:MM)
    #[arg(long)]
    target: Option<String>,
    /// Start the countdown immediately
    #[arg(long)]
    start: bool,
    /// List every upcoming step
    #[arg(long)]
    expand: bool,
    /// Print events as JSON lines instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Session {
    engine: StepTimer,
    ticker: Option<Ticker>,
    sink: Box<dyn NotificationSink>,
    period: Duration,
    expanded: bool,
    json: bool,
    last_current: Option<usize>,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let steps = super::load_steps(args.steps.as_deref(), &config)?;
    let mut engine = StepTimer::new(steps, Local::now()).with_lookahead(config.timer.lookahead);
    if let Some(ref target) = args.target {
        engine.set_target_time(target, Local::now())?;
    }

    let sink: Box<dyn NotificationSink> = if config.notifications.enabled {
        let sink = TerminalSink::new(config.notifications.sound);
        Box::new(if args.json { sink.on_stderr() } else { sink })
    } else {
        Box::new(SilentSink)
    };

    let mut session = Session {
        engine,
        ticker: None,
        sink,
        period: Duration::from_millis(config.timer.tick_interval_ms),
        expanded: args.expand || config.timer.expanded,
        json: args.json,
        last_current: None,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(session.run(args.start))
}

impl Session {
    async fn run(&mut self, start: bool) -> Result<(), Box<dyn std::error::Error>> {
        if !self.json {
            println!("{HELP}");
        }
        self.show();
        if start {
            self.start();
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdin_open = true;
        loop {
            tokio::select! {
                Some(_) = next_tick(&mut self.ticker) => {
                    self.on_tick();
                    // Without stdin nobody can quit, so stop at the end.
                    if !stdin_open && self.engine.remaining_secs() == 0 {
                        break;
                    }
                }
                line = lines.next_line(), if stdin_open => match line? {
                    Some(line) => {
                        if self.handle(line.trim()) == Flow::Quit {
                            break;
                        }
                    }
                    None => {
                        stdin_open = false;
                        if self.ticker.is_none() {
                            break;
                        }
                    }
                },
                _ = tokio::signal::ctrl_c() => break,
            }
        }

        self.stop_ticking();
        Ok(())
    }

    fn on_tick(&mut self) {
        let now = Local::now();
        let due = self.engine.tick(now);
        for event in dispatch(self.sink.as_mut(), &due, now.into()) {
            if let Event::NotificationFailed { ref message, .. } = event {
                eprintln!("warning: {message}");
            }
            self.emit(&event);
        }

        let current = self.engine.locate(false).current;
        if !due.is_empty() || current != self.last_current {
            self.show();
        } else if !self.json {
            print!("\r{}   ", steptimer_core::timer::format_countdown(self.engine.remaining_secs()));
            if let Err(e) = std::io::stdout().flush() {
                tracing::debug!("cannot flush countdown: {e}");
            }
        }
    }

    fn handle(&mut self, line: &str) -> Flow {
        let now = Local::now();
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };

        match cmd {
            "" => {}
            "q" => return Flow::Quit,
            "p" => {
                if self.engine.is_running() {
                    self.stop_ticking();
                    if let Some(event) = self.engine.pause(now) {
                        self.emit(&event);
                    }
                } else {
                    self.start();
                }
            }
            "r" => {
                self.stop_ticking();
                let event = self.engine.reset(now);
                self.emit(&event);
            }
            "R" => {
                self.stop_ticking();
                let event = self.engine.restart(now);
                self.emit(&event);
            }
            "t" => match self.engine.set_target_time(arg, now) {
                Ok(event) => self.emit(&event),
                Err(e) => eprintln!("warning: {e}"),
            },
            "c" => match arg.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
                Some(index) => {
                    let id = self.engine.steps().get(index).map(|s| s.id);
                    match id.and_then(|id| self.engine.toggle_completion(id, now)) {
                        Some(event) => self.emit(&event),
                        None => eprintln!("warning: no step {arg}"),
                    }
                }
                None => eprintln!("warning: expected a step number"),
            },
            "e" => self.expanded = !self.expanded,
            "i" => self.import(arg),
            "x" => match self.engine.export() {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("warning: {e}"),
            },
            _ => eprintln!("{HELP}"),
        }

        self.show();
        Flow::Continue
    }

    fn import(&mut self, path: &str) {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                eprintln!("warning: cannot read {path}: {e}");
                return;
            }
        };
        // A rejected list leaves the running timer alone.
        match steptimer_core::import_steps(&raw) {
            Ok(steps) => {
                self.stop_ticking();
                let event = self.engine.replace_steps(steps, Local::now());
                self.emit(&event);
            }
            Err(e) => eprintln!("warning: {e}"),
        }
    }

    fn start(&mut self) {
        if let Some(event) = self.engine.start(Local::now()) {
            self.emit(&event);
        }
        if self.ticker.is_none() {
            self.ticker = Some(Ticker::spawn(self.period));
        }
    }

    fn stop_ticking(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    fn emit(&self, event: &Event) {
        if !self.json {
            return;
        }
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!("cannot serialize event: {e}"),
        }
    }

    fn show(&mut self) {
        self.last_current = self.engine.locate(false).current;
        if self.json {
            self.emit(&self.engine.snapshot(Local::now()));
        } else {
            println!("\n{}", render(&self.engine.view(self.expanded)));
        }
    }
}

async fn next_tick(ticker: &mut Option<Ticker>) -> Option<Instant> {
    match ticker {
        Some(ticker) => ticker.next().await,
        None => std::future::pending().await,
    }
}
