//! Step timer engine.
//!
//! The engine is a wall-clock-based state machine over a step list and a
//! single target completion time. It does not use internal threads; the
//! caller samples the clock and calls `tick(now)` about once a second.
//!
//! ## State Transitions
//!
//! ```text
//! Paused -> Running -> Paused
//!    ^         |
//!    +- reset -+
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = StepTimer::new(default_steps(), Local::now());
//! engine.start(Local::now());
//! // In a loop:
//! let due = engine.tick(Local::now()); // steps whose offset was just crossed
//! ```

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use super::crossing::CrossingNotifier;
use super::format::format_countdown;
use super::locator::{locate_with_lookahead, StepWindow, DEFAULT_LOOKAHEAD};
use super::step::{Step, StepId, StepStore};
use super::target::{parse_time_of_day, TargetSynchronizer};
use super::view::TimerView;
use crate::error::{ImportError, TargetError};
use crate::events::Event;
use crate::import::{export_steps, import_steps};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Running,
    Paused,
}

/// Core step timer.
///
/// The synchronizer's last remaining-time value doubles as the previous
/// sample the crossing notifier compares each new tick against.
#[derive(Debug, Clone)]
pub struct StepTimer {
    store: StepStore,
    clock: TargetSynchronizer,
    crossings: CrossingNotifier,
    state: RunState,
    lookahead: usize,
}

impl StepTimer {
    /// Create a paused engine whose target is `now` plus the largest offset.
    pub fn new(steps: Vec<Step>, now: DateTime<Local>) -> Self {
        let store = StepStore::new(steps);
        let clock = TargetSynchronizer::new(now, store.total_minutes());
        Self {
            store,
            clock,
            crossings: CrossingNotifier::new(),
            state: RunState::Paused,
            lookahead: DEFAULT_LOOKAHEAD,
        }
    }

    /// Number of upcoming steps shown when the list is collapsed.
    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn remaining_secs(&self) -> u64 {
        self.clock.remaining_secs()
    }

    pub fn target(&self) -> Option<DateTime<Local>> {
        self.clock.target()
    }

    pub fn steps(&self) -> &[Step] {
        self.store.steps()
    }

    pub fn store(&self) -> &StepStore {
        &self.store
    }

    pub fn lookahead(&self) -> usize {
        self.lookahead
    }

    pub fn is_completed(&self, id: StepId) -> bool {
        self.store.is_completed(id)
    }

    pub fn locate(&self, expanded: bool) -> StepWindow {
        locate_with_lookahead(self.store.steps(), self.remaining_secs(), expanded, self.lookahead)
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.locate(false).current_step(self.store.steps())
    }

    pub fn view(&self, expanded: bool) -> TimerView {
        self.view_at(self.remaining_secs(), expanded)
    }

    /// View for a hypothetical remaining time. Does not touch engine state.
    pub fn view_at(&self, remaining_secs: u64, expanded: bool) -> TimerView {
        let window =
            locate_with_lookahead(self.store.steps(), remaining_secs, expanded, self.lookahead);
        TimerView::build(
            &self.store,
            &window,
            remaining_secs,
            self.is_running(),
            self.target(),
            expanded,
        )
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, now: DateTime<Local>) -> Event {
        Event::StateSnapshot {
            running: self.is_running(),
            remaining_secs: self.remaining_secs(),
            countdown: format_countdown(self.remaining_secs()),
            target: self.target(),
            current_step: self.current_step().map(|s| s.id),
            step_count: self.store.len(),
            completed_count: self.store.completed_count(),
            at: now.with_timezone(&Utc),
        }
    }

    /// Current steps as JSON, ids stripped.
    pub fn export(&self) -> Result<String, serde_json::Error> {
        export_steps(self.store.steps())
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self, now: DateTime<Local>) -> Option<Event> {
        if self.is_running() {
            return None;
        }
        self.state = RunState::Running;
        // Re-baseline: nothing crossed while paused is announced.
        self.clock.resume_at(now);
        let remaining_secs = self.clock.tick(now);
        Some(Event::TimerStarted {
            remaining_secs,
            at: now.with_timezone(&Utc),
        })
    }

    pub fn pause(&mut self, now: DateTime<Local>) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        self.state = RunState::Paused;
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs(),
            at: now.with_timezone(&Utc),
        })
    }

    pub fn toggle(&mut self, now: DateTime<Local>) -> Option<Event> {
        if self.is_running() {
            self.pause(now)
        } else {
            self.start(now)
        }
    }

    /// Advance to `now`. Returns the steps that just became due, each at
    /// most once per pass. Paused engines ignore ticks.
    pub fn tick(&mut self, now: DateTime<Local>) -> Vec<Step> {
        if !self.is_running() {
            return Vec::new();
        }
        let previous = self.clock.remaining_secs();
        let remaining = self.clock.tick(now);
        self.crossings.observe(self.store.steps(), previous, remaining)
    }

    /// Redo the clock: target is now plus the largest offset, paused.
    /// Completion marks are kept.
    pub fn reset(&mut self, now: DateTime<Local>) -> Event {
        let remaining_secs = self.reset_clock(now);
        tracing::debug!(remaining_secs, "timer reset");
        Event::TimerReset {
            remaining_secs,
            target: self.target(),
            at: now.with_timezone(&Utc),
        }
    }

    /// Redo the clock and the checklist.
    pub fn restart(&mut self, now: DateTime<Local>) -> Event {
        let remaining_secs = self.reset_clock(now);
        self.store.clear_completed();
        tracing::debug!(remaining_secs, "timer restarted");
        Event::TimerRestarted {
            remaining_secs,
            target: self.target(),
            at: now.with_timezone(&Utc),
        }
    }

    pub fn set_target(&mut self, target: DateTime<Local>, now: DateTime<Local>) -> Event {
        self.clock.set_target(target, now);
        self.target_changed(now)
    }

    /// Target the next occurrence of an `HH:MM` local time.
    pub fn set_target_time(
        &mut self,
        input: &str,
        now: DateTime<Local>,
    ) -> Result<Event, TargetError> {
        let time = parse_time_of_day(input)?;
        self.clock.set_time_of_day(time, now)?;
        Ok(self.target_changed(now))
    }

    /// Drop the target and count down by elapsed time instead.
    pub fn clear_target(&mut self, now: DateTime<Local>) -> Event {
        self.clock.clear_target();
        self.clock.resume_at(now);
        self.target_changed(now)
    }

    /// Validate `raw` and, only if it is valid, replace the step list,
    /// clear completion marks and reset the clock.
    pub fn import(&mut self, raw: &str, now: DateTime<Local>) -> Result<Event, ImportError> {
        let steps = import_steps(raw)?;
        Ok(self.replace_steps(steps, now))
    }

    pub fn replace_steps(&mut self, steps: Vec<Step>, now: DateTime<Local>) -> Event {
        self.store.replace(steps);
        self.crossings.clear();
        let remaining_secs = self.reset_clock(now);
        tracing::debug!(count = self.store.len(), remaining_secs, "steps replaced");
        Event::StepsImported {
            count: self.store.len(),
            remaining_secs,
            at: now.with_timezone(&Utc),
        }
    }

    /// Flip a step's completion mark. Unknown ids are ignored.
    pub fn toggle_completion(&mut self, id: StepId, now: DateTime<Local>) -> Option<Event> {
        let completed = self.store.toggle_completion(id)?;
        Some(Event::StepCompletionToggled {
            step_id: id,
            completed,
            at: now.with_timezone(&Utc),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn reset_clock(&mut self, now: DateTime<Local>) -> u64 {
        self.state = RunState::Paused;
        let remaining = self.clock.reset(now, self.store.total_minutes());
        self.crossings.rearm(self.store.steps(), remaining);
        remaining
    }

    fn target_changed(&mut self, now: DateTime<Local>) -> Event {
        let remaining_secs = self.clock.remaining_secs();
        self.crossings.rearm(self.store.steps(), remaining_secs);
        tracing::debug!(deadline = ?self.target(), remaining_secs, "target changed");
        Event::TargetChanged {
            target: self.target(),
            remaining_secs,
            at: now.with_timezone(&Utc),
        }
    }
}
