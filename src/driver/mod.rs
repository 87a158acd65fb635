//! Async driver for the Pomodoro Timer.
//!
//! This module feeds a session from the outside world:
//! - `ticker`: tick source abstraction with wall-clock and channel tickers
//! - `engine`: command/tick loop publishing timer events
//! - `error`: engine error types

pub mod engine;
pub mod error;
pub mod ticker;

pub use engine::{EngineCommand, TimerEngine, TimerEvent};
pub use error::EngineError;
pub use ticker::{ChannelTickHandle, ChannelTicker, IntervalTicker, TickSource};
