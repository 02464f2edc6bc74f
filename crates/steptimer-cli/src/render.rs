//! Plain-text rendering of the timer view.

use steptimer_core::{StepView, TimerView};

pub fn render(view: &TimerView) -> String {
    let mut out = String::new();
    let state = if view.running { "running" } else { "paused" };
    let target = view
        .target
        .map(|t| format!("  target {}", t.format("%H:%M")))
        .unwrap_or_default();
    out.push_str(&format!("[{state}] {}{target}\n", view.countdown));

    for step in &view.previous {
        out.push_str(&line(' ', step));
    }
    match &view.current {
        Some(step) => out.push_str(&line('>', step)),
        None => out.push_str("> not started\n"),
    }
    for step in &view.next {
        out.push_str(&line(' ', step));
    }
    if !view.expanded && view.overflow_count > 0 {
        out.push_str(&format!("  +{} more\n", view.overflow_count));
    }
    out
}

fn line(marker: char, step: &StepView) -> String {
    let check = if step.completed { 'x' } else { ' ' };
    format!(
        "{marker} [{check}] {:>7}  {:>5}  {}: {}\n",
        step.time_until,
        format_offset(step.offset_min),
        step.category,
        step.description
    )
}

fn format_offset(offset_min: f64) -> String {
    if offset_min.fract() == 0.0 {
        format!("{offset_min:.0}m")
    } else {
        format!("{offset_min:.1}m")
    }
}
