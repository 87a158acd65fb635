//! Command definitions for the Pomodoro Timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Args, Parser, Subcommand};

use crate::session::tasks::validate_task_text;
use crate::session::CompletionPolicy;
use crate::settings::TimerSettings;

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro Timer - focused work intervals with short and long breaks
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro-timer",
    version,
    about = "Pomodoro timer for the terminal",
    long_about = "Runs pomodoros and breaks in the terminal.\n\
                  A long break follows every N pomodoros; the cycle starts over \
                  once the target count is reached.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the timer in this terminal, starting with a pomodoro
    Run(RunArgs),

    /// Show which break follows each pomodoro
    Plan(PlanArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Pomodoro duration in minutes (1-500)
    #[arg(
        short,
        long,
        default_value = "25",
        value_parser = clap::value_parser!(u32).range(1..=500)
    )]
    pub pomodoro: u32,

    /// Short break duration in minutes (1-500)
    #[arg(
        short,
        long,
        default_value = "5",
        value_parser = clap::value_parser!(u32).range(1..=500)
    )]
    pub short_break: u32,

    /// Long break duration in minutes (1-500)
    #[arg(
        short,
        long,
        default_value = "15",
        value_parser = clap::value_parser!(u32).range(1..=500)
    )]
    pub long_break: u32,

    /// Pomodoros to complete before the cycle starts over (1-99)
    #[arg(
        short,
        long,
        default_value = "8",
        value_parser = clap::value_parser!(u32).range(1..=99)
    )]
    pub target: u32,

    /// Take a long break after every N pomodoros (1-99)
    #[arg(
        short,
        long,
        default_value = "4",
        value_parser = clap::value_parser!(u32).range(1..=99)
    )]
    pub cadence: u32,

    /// Start breaks automatically when a pomodoro finishes
    #[arg(long)]
    pub auto_breaks: bool,

    /// Start the next pomodoro automatically when a break finishes
    #[arg(long)]
    pub auto_pomodoros: bool,

    /// Start over automatically when the target is reached
    #[arg(long)]
    pub restart_after_target: bool,

    /// What you are working on
    #[arg(long, value_parser = validate_task_name)]
    pub task: Option<String>,

    /// Print events as JSON lines instead of text
    #[arg(long)]
    pub json: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            pomodoro: 25,
            short_break: 5,
            long_break: 15,
            target: 8,
            cadence: 4,
            auto_breaks: false,
            auto_pomodoros: false,
            restart_after_target: false,
            task: None,
            json: false,
        }
    }
}

impl RunArgs {
    /// Builds timer settings from the arguments.
    pub fn settings(&self) -> TimerSettings {
        TimerSettings {
            pomodoro_minutes: self.pomodoro,
            short_break_minutes: self.short_break,
            long_break_minutes: self.long_break,
            target_pomodoros: self.target,
            long_break_cadence: self.cadence,
        }
    }

    /// Builds the completion policy from the arguments.
    pub fn policy(&self) -> CompletionPolicy {
        CompletionPolicy {
            auto_start_breaks: self.auto_breaks,
            auto_start_pomodoros: self.auto_pomodoros,
            restart_after_target: self.restart_after_target,
        }
    }
}

// ============================================================================
// Plan Command Arguments
// ============================================================================

/// Arguments for the plan command
#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Take a long break after every N pomodoros (1-99)
    #[arg(
        short,
        long,
        default_value = "4",
        value_parser = clap::value_parser!(u32).range(1..=99)
    )]
    pub cadence: u32,

    /// Number of pomodoros to list (1-99)
    #[arg(
        short = 'n',
        long,
        default_value = "8",
        value_parser = clap::value_parser!(u32).range(1..=99)
    )]
    pub count: u32,
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates the task name.
fn validate_task_name(s: &str) -> Result<String, String> {
    validate_task_text(s).map_err(|e| e.to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::parse_from(["pomodoro-timer", "run"]);
        match cli.command {
            Some(Commands::Run(args)) => {
                assert_eq!(args.settings(), TimerSettings::default());
                assert_eq!(args.policy(), CompletionPolicy::default());
                assert!(!args.json);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_run_with_options() {
        let cli = Cli::parse_from([
            "pomodoro-timer",
            "run",
            "-p",
            "50",
            "--short-break",
            "10",
            "-l",
            "30",
            "--target",
            "4",
            "-c",
            "2",
            "--auto-breaks",
            "--task",
            "Write docs",
        ]);
        match cli.command {
            Some(Commands::Run(args)) => {
                assert_eq!(
                    args.settings(),
                    TimerSettings {
                        pomodoro_minutes: 50,
                        short_break_minutes: 10,
                        long_break_minutes: 30,
                        target_pomodoros: 4,
                        long_break_cadence: 2,
                    }
                );
                assert!(args.policy().auto_start_breaks);
                assert!(!args.policy().auto_start_pomodoros);
                assert_eq!(args.task, Some("Write docs".to_string()));
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_run_rejects_out_of_range() {
        assert!(Cli::try_parse_from(["pomodoro-timer", "run", "-p", "0"]).is_err());
        assert!(Cli::try_parse_from(["pomodoro-timer", "run", "-p", "501"]).is_err());
        assert!(Cli::try_parse_from(["pomodoro-timer", "run", "--target", "100"]).is_err());
        assert!(Cli::try_parse_from(["pomodoro-timer", "run", "--cadence", "0"]).is_err());
    }

    #[test]
    fn test_run_rejects_blank_task() {
        assert!(Cli::try_parse_from(["pomodoro-timer", "run", "--task", "  "]).is_err());
    }

    #[test]
    fn test_plan_args() {
        let cli = Cli::parse_from(["pomodoro-timer", "plan", "-c", "3", "-n", "6"]);
        match cli.command {
            Some(Commands::Plan(args)) => {
                assert_eq!(args.cadence, 3);
                assert_eq!(args.count, 6);
            }
            _ => panic!("Expected Plan command"),
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::parse_from(["pomodoro-timer", "plan", "--verbose"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_default_run_args_match_parsed() {
        let defaults = RunArgs::default();
        let cli = Cli::parse_from(["pomodoro-timer", "run"]);
        match cli.command {
            Some(Commands::Run(args)) => assert_eq!(args.settings(), defaults.settings()),
            _ => panic!("Expected Run command"),
        }
    }
}
