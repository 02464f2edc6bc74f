//! Boundary-crossing detection between consecutive remaining-time samples.

use std::collections::HashSet;

use super::step::{Step, StepId};

/// Steps whose offset was crossed going from `previous_secs` to `new_secs`.
///
/// A step is crossed when `previous / 60 > offset` and `new / 60 <= offset`.
/// Every matching step is returned, so ties cross together.
pub fn detect_crossings(steps: &[Step], previous_secs: u64, new_secs: u64) -> Vec<&Step> {
    let previous_min = previous_secs as f64 / 60.0;
    let new_min = new_secs as f64 / 60.0;
    steps
        .iter()
        .filter(|s| previous_min > s.offset_min && new_min <= s.offset_min)
        .collect()
}

/// Stateful wrapper around [`detect_crossings`] that reports each step at
/// most once per downward pass.
///
/// A step is re-armed only when remaining time moves back above its offset
/// (reset, or a target moved later).
#[derive(Debug, Clone, Default)]
pub struct CrossingNotifier {
    fired: HashSet<StepId>,
}

impl CrossingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate one tick. Returns the steps that became due and have not
    /// already been reported.
    pub fn observe(&mut self, steps: &[Step], previous_secs: u64, new_secs: u64) -> Vec<Step> {
        if new_secs > previous_secs {
            self.rearm(steps, new_secs);
        }
        detect_crossings(steps, previous_secs, new_secs)
            .into_iter()
            .filter(|s| self.fired.insert(s.id))
            .cloned()
            .collect()
    }

    /// Re-arm every step still ahead of `remaining_secs`.
    pub fn rearm(&mut self, steps: &[Step], remaining_secs: u64) {
        let remaining_min = remaining_secs as f64 / 60.0;
        let ahead: HashSet<StepId> = steps
            .iter()
            .filter(|s| remaining_min > s.offset_min)
            .map(|s| s.id)
            .collect();
        self.fired.retain(|id| !ahead.contains(id));
    }

    pub fn has_fired(&self, id: StepId) -> bool {
        self.fired.contains(&id)
    }

    pub fn clear(&mut self) {
        self.fired.clear();
    }
}
