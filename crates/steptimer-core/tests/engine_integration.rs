//! Integration tests for a full timer run.

use chrono::{DateTime, Duration, Local, TimeZone};
use steptimer_core::timer::detect_crossings;
use steptimer_core::{
    dispatch, import_steps, Event, ImportError, NotificationSink, NotifyError, RunState, Step,
    StepTimer,
};

fn start_time() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 1, 15, 18, 0, 0).unwrap()
}

/// Drive the engine once per second from `from` to `to` seconds after start.
fn run_seconds(engine: &mut StepTimer, from: i64, to: i64) -> Vec<Step> {
    let mut due = Vec::new();
    for s in from..=to {
        due.extend(engine.tick(start_time() + Duration::seconds(s)));
    }
    due
}

#[test]
fn final_step_fires_exactly_once() {
    let steps = import_steps(
        r#"[{"time":90,"category":"Roast","description":"Oven on"},
            {"time":0,"category":"Roast","description":"Serve"}]"#,
    )
    .unwrap();
    let mut engine = StepTimer::new(steps, start_time());
    assert_eq!(engine.remaining_secs(), 5400);
    engine.start(start_time());

    let due = run_seconds(&mut engine, 1, 5400 + 120);
    let serve: Vec<_> = due.iter().filter(|s| s.description == "Serve").collect();
    assert_eq!(serve.len(), 1);
    assert_eq!(engine.remaining_secs(), 0);
}

#[test]
fn tied_steps_cross_in_one_tick() {
    let steps = import_steps(
        r#"[{"time":20,"category":"A","description":"start"},
            {"time":10,"category":"A","description":"flip"},
            {"time":10,"category":"B","description":"stir"}]"#,
    )
    .unwrap();
    let mut engine = StepTimer::new(steps, start_time());
    engine.start(start_time());
    assert!(run_seconds(&mut engine, 1, 599).is_empty());
    let due = engine.tick(start_time() + Duration::seconds(600));
    let names: Vec<_> = due.iter().map(|s| s.description.as_str()).collect();
    assert_eq!(names, ["flip", "stir"]);
}

#[test]
fn delayed_tick_self_corrects() {
    let mut engine = StepTimer::new(sample_steps(), start_time());
    engine.start(start_time());
    engine.tick(start_time() + Duration::seconds(1));
    // Ten seconds of missed ticks.
    engine.tick(start_time() + Duration::seconds(11));
    assert_eq!(engine.remaining_secs(), 45 * 60 - 11);
}

#[test]
fn reset_after_run_keeps_checklist() {
    let steps = import_steps(r#"[{"time":45,"category":"A","description":"x"}]"#).unwrap();
    let mut engine = StepTimer::new(steps, start_time());
    let id = engine.steps()[0].id;
    engine.toggle_completion(id, start_time());
    engine.start(start_time());
    run_seconds(&mut engine, 1, 30);
    let later = start_time() + Duration::seconds(30);
    engine.reset(later);
    assert_eq!(engine.remaining_secs(), 2700);
    assert_eq!(engine.state(), RunState::Paused);
    assert!(engine.is_completed(id));
}

#[test]
fn import_success_and_failure() {
    let mut engine = StepTimer::new(sample_steps(), start_time());
    let original_ids: Vec<_> = engine.steps().iter().map(|s| s.id).collect();

    let err = engine
        .import(r#"[{"time":"x","category":"A","description":"x"}]"#, start_time())
        .unwrap_err();
    assert!(matches!(err, ImportError::Schema { index: 0, .. }));
    assert_eq!(
        engine.steps().iter().map(|s| s.id).collect::<Vec<_>>(),
        original_ids
    );

    engine
        .import(r#"[{"time":5,"category":"A","description":"x"}]"#, start_time())
        .unwrap();
    assert_eq!(engine.steps().len(), 1);
    assert!(!original_ids.contains(&engine.steps()[0].id));
    assert_eq!(engine.store().completed_count(), 0);
}

#[test]
fn target_earlier_than_now_is_tomorrow() {
    let mut engine = StepTimer::new(sample_steps(), start_time());
    engine.set_target_time("07:00", start_time()).unwrap();
    let target = engine.target().unwrap();
    assert!(target > start_time());
    assert_eq!(target - start_time(), Duration::hours(13));
}

#[test]
fn notifications_flow_through_the_sink() {
    struct Collect(Vec<String>);
    impl NotificationSink for Collect {
        fn announce(&mut self, step: &Step) -> Result<(), NotifyError> {
            self.0.push(step.description.clone());
            Ok(())
        }
    }

    let mut engine = StepTimer::new(sample_steps(), start_time());
    engine.start(start_time());
    let mut sink = Collect(Vec::new());
    let mut events = Vec::new();
    for s in 1..=45 * 60 {
        let now = start_time() + Duration::seconds(s);
        let due = engine.tick(now);
        events.extend(dispatch(&mut sink, &due, now.into()));
    }
    // Every step except the one at the full duration.
    assert_eq!(sink.0.len(), sample_steps().len() - 1);
    assert!(events.iter().all(|e| matches!(e, Event::StepDue { .. })));
}

#[test]
fn pure_crossing_detection_matches_engine() {
    let steps = sample_steps();
    assert_eq!(detect_crossings(&steps, 601, 600).len(), 1);
    assert!(detect_crossings(&steps, 600, 600).is_empty());
}

fn sample_steps() -> Vec<Step> {
    steptimer_core::default_steps()
}
