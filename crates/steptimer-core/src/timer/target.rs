//! Target completion timestamp and remaining-time derivation.
//!
//! Remaining time is recomputed from the absolute target on every tick, so
//! a late or skipped tick corrects itself on the next one. Decrementing the
//! previous value is only a fallback for when no target exists.

use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone};

use crate::error::TargetError;

#[derive(Debug, Clone)]
pub struct TargetSynchronizer {
    target: Option<DateTime<Local>>,
    remaining_secs: u64,
    /// Last time `tick` consumed elapsed time in fallback mode.
    last_tick: Option<DateTime<Local>>,
}

impl TargetSynchronizer {
    /// Target `total_minutes` from `now`.
    pub fn new(now: DateTime<Local>, total_minutes: f64) -> Self {
        let mut sync = Self::without_target(0);
        sync.reset(now, total_minutes);
        sync
    }

    /// Decrement-only synchronizer starting at `remaining_secs`.
    pub fn without_target(remaining_secs: u64) -> Self {
        Self {
            target: None,
            remaining_secs,
            last_tick: None,
        }
    }

    pub fn target(&self) -> Option<DateTime<Local>> {
        self.target
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// Sample the clock and return the new remaining time in seconds.
    pub fn tick(&mut self, now: DateTime<Local>) -> u64 {
        match self.target {
            Some(target) => {
                self.remaining_secs = secs_until(target, now);
                self.last_tick = Some(now);
            }
            None => match self.last_tick {
                Some(last) => {
                    let elapsed = (now - last).num_seconds().max(0);
                    self.remaining_secs = self.remaining_secs.saturating_sub(elapsed as u64);
                    // Only whole seconds are consumed; the fraction carries over.
                    self.last_tick = Some(last + Duration::seconds(elapsed));
                }
                None => self.last_tick = Some(now),
            },
        }
        self.remaining_secs
    }

    /// Restart fallback accounting at `now` so time spent paused is not
    /// subtracted. Has no effect on the remaining time while a target is set.
    pub fn resume_at(&mut self, now: DateTime<Local>) {
        self.last_tick = Some(now);
    }

    pub fn set_target(&mut self, target: DateTime<Local>, now: DateTime<Local>) -> u64 {
        self.target = Some(target);
        self.last_tick = Some(now);
        self.remaining_secs = secs_until(target, now);
        self.remaining_secs
    }

    /// Target the next occurrence of `time` in local wall-clock time.
    pub fn set_time_of_day(
        &mut self,
        time: NaiveTime,
        now: DateTime<Local>,
    ) -> Result<DateTime<Local>, TargetError> {
        let target = next_occurrence(time, &now)?;
        self.set_target(target, now);
        Ok(target)
    }

    /// Forget the target; subsequent ticks decrement the last value.
    pub fn clear_target(&mut self) {
        self.target = None;
    }

    /// Target `total_minutes` from `now`. A target past the end of the
    /// calendar range is dropped and the fallback countdown takes over.
    pub fn reset(&mut self, now: DateTime<Local>, total_minutes: f64) -> u64 {
        self.target = minutes_to_duration(total_minutes).and_then(|d| now.checked_add_signed(d));
        if self.target.is_none() {
            tracing::warn!(total_minutes, "target out of range, counting down without one");
        }
        self.last_tick = Some(now);
        self.remaining_secs = minutes_to_secs(total_minutes);
        self.remaining_secs
    }
}

/// Parse an `HH:MM` time of day.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, TargetError> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|_| TargetError::InvalidTimeOfDay(input.trim().to_string()))
}

/// The next instant at or after `now` whose wall-clock time is `time`.
///
/// A time that has already passed today resolves to tomorrow.
pub fn next_occurrence<Tz: TimeZone>(
    time: NaiveTime,
    now: &DateTime<Tz>,
) -> Result<DateTime<Tz>, TargetError> {
    let tz = now.timezone();
    let today = now.date_naive();
    let resolve = |naive: chrono::NaiveDateTime| {
        tz.from_local_datetime(&naive)
            .earliest()
            .ok_or(TargetError::NonexistentLocalTime(naive))
    };

    let candidate = resolve(today.and_time(time))?;
    if candidate >= *now {
        return Ok(candidate);
    }
    let tomorrow = today
        .succ_opt()
        .ok_or(TargetError::NonexistentLocalTime(today.and_time(time)))?;
    resolve(tomorrow.and_time(time))
}

fn secs_until<Tz: TimeZone>(target: DateTime<Tz>, now: DateTime<Tz>) -> u64 {
    (target - now).num_seconds().max(0) as u64
}

pub(crate) fn minutes_to_secs(minutes: f64) -> u64 {
    (minutes.max(0.0) * 60.0).round() as u64
}

fn minutes_to_duration(minutes: f64) -> Option<Duration> {
    Duration::try_milliseconds((minutes.max(0.0) * 60_000.0).round() as i64)
}
