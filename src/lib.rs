//! Pomodoro Timer Library
//!
//! This library provides the core functionality for the Pomodoro Timer CLI.
//! It includes:
//! - A countdown state machine for pomodoros and breaks
//! - Long-break cadence and target policies
//! - A session controller that classifies completions and defers settings
//! - An async engine that drives a session from a tick source
//! - CLI command parsing and display utilities

pub mod cli;
pub mod driver;
pub mod session;
pub mod settings;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use driver::{
    ChannelTickHandle, ChannelTicker, EngineCommand, EngineError, IntervalTicker, TickSource,
    TimerEngine, TimerEvent,
};
pub use session::{
    Completion, CompletionOutcome, CompletionPolicy, NextAction, Session, SettingsUpdate, Toggle,
};
pub use settings::{SettingsError, SettingsProvider, StaticSettings, TimerSettings};
pub use timer::{is_long_break, target_reached, IntervalCompleted, PomodoroTimer};
pub use types::{Durations, IntervalKind, TimerSnapshot};
