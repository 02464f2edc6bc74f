use chrono::{DateTime, Local};
use serde::Serialize;

use super::format::{format_countdown, time_until_step};
use super::locator::StepWindow;
use super::step::{Step, StepId, StepStore};

/// Display-ready state of one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepView {
    pub id: StepId,
    pub offset_min: f64,
    pub category: String,
    pub description: String,
    pub time_until_secs: u64,
    /// `M:SS` until due, or `Now!`.
    pub time_until: String,
    /// False once the step is due.
    pub upcoming: bool,
    pub completed: bool,
}

impl StepView {
    fn new(step: &Step, store: &StepStore, remaining_secs: u64) -> Self {
        let time_until_secs = time_until_step(step, remaining_secs);
        Self {
            id: step.id,
            offset_min: step.offset_min,
            category: step.category.clone(),
            description: step.description.clone(),
            time_until_secs,
            time_until: format_countdown(time_until_secs),
            upcoming: time_until_secs > 0,
            completed: store.is_completed(step.id),
        }
    }
}

/// Everything a front end needs to draw the timer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerView {
    pub running: bool,
    pub remaining_secs: u64,
    pub countdown: String,
    pub target: Option<DateTime<Local>>,
    /// `None` means "not started": remaining time exceeds every offset.
    pub current: Option<StepView>,
    pub previous: Vec<StepView>,
    pub next: Vec<StepView>,
    pub overflow_count: usize,
    pub expanded: bool,
}

impl TimerView {
    pub(crate) fn build(
        store: &StepStore,
        window: &StepWindow,
        remaining_secs: u64,
        running: bool,
        target: Option<DateTime<Local>>,
        expanded: bool,
    ) -> Self {
        let steps = store.steps();
        let views = |indices: &[usize]| {
            indices
                .iter()
                .filter_map(|&i| steps.get(i))
                .map(|s| StepView::new(s, store, remaining_secs))
                .collect::<Vec<_>>()
        };
        Self {
            running,
            remaining_secs,
            countdown: format_countdown(remaining_secs),
            target,
            current: window
                .current_step(steps)
                .map(|s| StepView::new(s, store, remaining_secs)),
            previous: views(&window.previous),
            next: views(&window.next),
            overflow_count: window.overflow_count,
            expanded,
        }
    }
}
