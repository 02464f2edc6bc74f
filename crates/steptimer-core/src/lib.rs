//! # Steptimer Core Library
//!
//! Coordinates a list of steps, each due a fixed number of minutes before a
//! shared completion time, against one wall-clock deadline.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A wall-clock-based state machine that requires the caller
//!   to periodically invoke `tick()`. Remaining time is always derived from the
//!   absolute target, never accumulated.
//! - **Locator**: Pure mapping from remaining time to the current step and the
//!   steps around it
//! - **Crossings**: At-most-once detection of steps becoming due
//! - **Import**: Validation of externally supplied step lists
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`StepTimer`]: Core timer state machine
//! - [`NotificationSink`]: Trait for announcing due steps
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod import;
pub mod notify;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, ImportError, NotifyError, TargetError};
pub use events::Event;
pub use import::{export_steps, import_steps, StepRecord, MAX_OFFSET_MIN};
pub use notify::{dispatch, NotificationSink, SilentSink};
pub use storage::Config;
pub use timer::{
    default_steps, locate, RunState, Step, StepId, StepStore, StepTimer, StepView, StepWindow,
    Ticker, TimerView,
};
