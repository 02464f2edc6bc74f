//! Notification sink seam.
//!
//! The engine only decides *which* steps are due. Sinks decide how to
//! announce them (sound, message) and may fail without affecting the timer.

use chrono::{DateTime, Utc};

use crate::error::NotifyError;
use crate::events::Event;
use crate::timer::Step;

pub trait NotificationSink {
    /// Surface `step` to the user. An `Err` means the message was shown but
    /// the sound could not be played.
    fn announce(&mut self, step: &Step) -> Result<(), NotifyError>;
}

/// Sink that announces nothing. Used when notifications are disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl NotificationSink for SilentSink {
    fn announce(&mut self, _step: &Step) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Announce every due step in order and describe the outcome as events.
///
/// Each step yields a `StepDue`; a sink failure adds a `NotificationFailed`
/// right after it and is otherwise swallowed.
pub fn dispatch(sink: &mut dyn NotificationSink, due: &[Step], at: DateTime<Utc>) -> Vec<Event> {
    let mut events = Vec::with_capacity(due.len());
    for step in due {
        tracing::info!(step = %step.id, category = %step.category, "step due: {}", step.description);
        events.push(Event::StepDue {
            step_id: step.id,
            offset_min: step.offset_min,
            category: step.category.clone(),
            description: step.description.clone(),
            at,
        });
        if let Err(e) = sink.announce(step) {
            tracing::warn!(step = %step.id, "notification failed: {e}");
            events.push(Event::NotificationFailed {
                step_id: step.id,
                message: e.to_string(),
                at,
            });
        }
    }
    events
}
