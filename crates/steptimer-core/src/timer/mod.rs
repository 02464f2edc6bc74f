mod crossing;
mod engine;
mod format;
mod locator;
mod step;
mod target;
mod ticker;
mod view;

pub use crossing::{detect_crossings, CrossingNotifier};
pub use engine::{RunState, StepTimer};
pub use format::{format_countdown, time_until_step};
pub use locator::{current_index, locate, locate_with_lookahead, StepWindow, DEFAULT_LOOKAHEAD};
pub use step::{default_steps, order_steps, Step, StepId, StepStore};
pub use target::{next_occurrence, parse_time_of_day, TargetSynchronizer};
pub use ticker::Ticker;
pub use view::{StepView, TimerView};
