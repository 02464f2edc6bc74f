//! Property tests for the locator, crossings and target synchronizer.

use chrono::{DateTime, Duration, Local, TimeZone};
use proptest::prelude::*;
use steptimer_core::timer::{current_index, detect_crossings, locate, TargetSynchronizer};
use steptimer_core::{Step, StepStore};

fn base() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap()
}

fn step_list() -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(0u32..120, 0..12).prop_map(|offsets| {
        let steps = offsets
            .into_iter()
            .enumerate()
            .map(|(i, o)| Step::new(o as f64, "C", format!("step {i}")))
            .collect();
        StepStore::new(steps).steps().to_vec()
    })
}

proptest! {
    #[test]
    fn locate_is_pure(steps in step_list(), remaining in 0u64..8000, expanded in any::<bool>()) {
        prop_assert_eq!(
            locate(&steps, remaining, expanded),
            locate(&steps, remaining, expanded)
        );
    }

    #[test]
    fn current_step_satisfies_bracket_rule(steps in step_list(), remaining in 0u64..8000) {
        let minutes = remaining.div_ceil(60) as f64;
        match current_index(&steps, remaining) {
            Some(i) => {
                prop_assert!(steps[i].offset_min >= minutes);
                if let Some(next) = steps.get(i + 1) {
                    prop_assert!(next.offset_min < minutes);
                }
                // No earlier step qualifies.
                for j in 0..i {
                    let next_ok = steps.get(j + 1).map_or(true, |n| n.offset_min < minutes);
                    prop_assert!(!(steps[j].offset_min >= minutes && next_ok));
                }
            }
            None => {
                prop_assert!(steps.iter().all(|s| s.offset_min < minutes));
            }
        }
    }

    #[test]
    fn window_partitions_the_list(steps in step_list(), remaining in 0u64..8000) {
        let window = locate(&steps, remaining, true);
        let total = window.previous.len() + window.current.map_or(0, |_| 1) + window.next.len();
        prop_assert_eq!(total, steps.len());
    }

    #[test]
    fn tick_is_non_increasing_and_never_negative(
        total in 0u32..240,
        gaps in prop::collection::vec(0i64..90, 1..50),
    ) {
        let mut sync = TargetSynchronizer::new(base(), total as f64);
        let mut previous = sync.remaining_secs();
        let mut elapsed = 0;
        for gap in gaps {
            elapsed += gap;
            let remaining = sync.tick(base() + Duration::seconds(elapsed));
            prop_assert!(remaining <= previous);
            previous = remaining;
        }
    }

    #[test]
    fn downward_run_crosses_each_step_once(steps in step_list(), start in 0u64..8000) {
        let mut hits = vec![0usize; steps.len()];
        let mut previous = start;
        for now in (0..start).rev() {
            for crossed in detect_crossings(&steps, previous, now) {
                let idx = steps.iter().position(|s| s.id == crossed.id).unwrap();
                hits[idx] += 1;
            }
            previous = now;
        }
        for (step, count) in steps.iter().zip(hits) {
            let expected = usize::from((start as f64 / 60.0) > step.offset_min);
            prop_assert_eq!(count, expected);
        }
    }
}
