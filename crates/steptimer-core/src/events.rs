use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::StepId;

/// Every state change in the engine produces an Event.
/// Front ends render them; the notification sink consumes `StepDue`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Clock restarted from now; completion marks kept.
    TimerReset {
        remaining_secs: u64,
        target: Option<DateTime<Local>>,
        at: DateTime<Utc>,
    },
    /// Clock restarted and completion marks cleared.
    TimerRestarted {
        remaining_secs: u64,
        target: Option<DateTime<Local>>,
        at: DateTime<Utc>,
    },
    TargetChanged {
        target: Option<DateTime<Local>>,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Remaining time crossed this step's offset while running.
    StepDue {
        step_id: StepId,
        offset_min: f64,
        category: String,
        description: String,
        at: DateTime<Utc>,
    },
    StepsImported {
        count: usize,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    StepCompletionToggled {
        step_id: StepId,
        completed: bool,
        at: DateTime<Utc>,
    },
    /// The sink could not announce a due step. Timer state is unaffected.
    NotificationFailed {
        step_id: StepId,
        message: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        running: bool,
        remaining_secs: u64,
        countdown: String,
        target: Option<DateTime<Local>>,
        current_step: Option<StepId>,
        step_count: usize,
        completed_count: usize,
        at: DateTime<Utc>,
    },
}
