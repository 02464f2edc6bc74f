use super::step::Step;

/// `M:SS`, or `Now!` once nothing is left. Minutes are not wrapped into hours.
pub fn format_countdown(secs: u64) -> String {
    if secs == 0 {
        return "Now!".to_string();
    }
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Seconds until `step` is due, given the overall remaining time.
pub fn time_until_step(step: &Step, remaining_secs: u64) -> u64 {
    (remaining_secs as f64 - step.offset_secs()).max(0.0).round() as u64
}
