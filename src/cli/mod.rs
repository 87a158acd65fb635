//! CLI module for the Pomodoro Timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and display logic
//! - `input`: Interactive key handling

pub mod commands;
pub mod display;
pub mod input;

pub use commands::{Cli, Commands, PlanArgs, RunArgs};
pub use display::Display;
pub use input::{parse_input, spawn_stdin_reader};
