//! Maps remaining time onto the step list.
//!
//! Remaining time is rounded *up* to whole minutes before comparing, so the
//! current step changes on minute granularity rather than at the exact
//! second a step's offset is reached.
//!
//! The current step is the first step `s` (in descending-offset order) with
//!
//! ```text
//! s.offset >= minutes  &&  (s is last  ||  next.offset < minutes)
//! ```
//!
//! Among steps sharing an offset, only the last of the group can satisfy the
//! second clause, and the whole group is passed over in a single jump once
//! remaining time drops below it.

use serde::Serialize;

use super::step::Step;

/// Steps shown after the current one when the list is collapsed.
pub const DEFAULT_LOOKAHEAD: usize = 3;

/// Partition of the step list around the current step.
///
/// All fields are indices into the slice passed to [`locate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepWindow {
    /// `None` while remaining time exceeds every offset ("not started").
    pub current: Option<usize>,
    pub previous: Vec<usize>,
    pub next: Vec<usize>,
    /// Steps beyond the collapsed lookahead window.
    pub overflow_count: usize,
}

impl StepWindow {
    pub fn current_step<'a>(&self, steps: &'a [Step]) -> Option<&'a Step> {
        self.current.and_then(|i| steps.get(i))
    }
}

/// Locate the current step with the default lookahead of three.
///
/// `steps` must be ordered by offset descending, which
/// [`StepStore`](super::StepStore) guarantees.
pub fn locate(steps: &[Step], remaining_secs: u64, expanded: bool) -> StepWindow {
    locate_with_lookahead(steps, remaining_secs, expanded, DEFAULT_LOOKAHEAD)
}

pub fn locate_with_lookahead(
    steps: &[Step],
    remaining_secs: u64,
    expanded: bool,
    lookahead: usize,
) -> StepWindow {
    let current = current_index(steps, remaining_secs);

    let first_next = current.map(|i| i + 1).unwrap_or(0);
    let previous = (0..current.unwrap_or(0)).collect();
    let next_end = if expanded {
        steps.len()
    } else {
        first_next.saturating_add(lookahead).min(steps.len())
    };
    let next = (first_next.min(steps.len())..next_end).collect();
    let overflow_count = steps.len().saturating_sub(first_next.saturating_add(lookahead));

    StepWindow {
        current,
        previous,
        next,
        overflow_count,
    }
}

/// Index of the current step, if any.
pub fn current_index(steps: &[Step], remaining_secs: u64) -> Option<usize> {
    let minutes = remaining_secs.div_ceil(60) as f64;
    steps.iter().enumerate().position(|(i, step)| {
        step.offset_min >= minutes
            && steps
                .get(i + 1)
                .map_or(true, |next| next.offset_min < minutes)
    })
}
