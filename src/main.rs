//! Pomodoro Timer CLI
//!
//! This tool helps you stay focused using the Pomodoro Technique:
//! - 25 minutes of focused work
//! - 5 minutes of short break
//! - 15 minutes of long break after every 4 pomodoros

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::sync::mpsc;

use pomodoro_timer::cli::{spawn_stdin_reader, Cli, Commands, Display, RunArgs};
use pomodoro_timer::{EngineCommand, IntervalKind, IntervalTicker, Session, TimerEngine};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => run_timer(args).await?,
        Some(Commands::Plan(args)) => Display::show_plan(args.cadence, args.count),
        Some(Commands::Completions { shell }) => generate_completions(shell),
        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Runs the interactive timer until the user quits.
async fn run_timer(args: RunArgs) -> Result<()> {
    let mut session = Session::new(args.settings()).context("invalid timer settings")?;
    session
        .set_current_task(args.task.as_deref())
        .context("invalid task")?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let mut engine = TimerEngine::new(session, args.policy(), event_tx);

    if !args.json {
        if let Some(task) = &args.task {
            println!("Working on: {}", task);
        }
        Display::show_help_keys();
    }

    cmd_tx
        .send(EngineCommand::Start(IntervalKind::Pomodoro))
        .context("failed to queue the first pomodoro")?;
    spawn_stdin_reader(cmd_tx.clone()).context("failed to read keyboard input")?;

    let signal_tx = cmd_tx;
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("interrupt received");
            let _ = signal_tx.send(EngineCommand::Shutdown);
        }
    });

    let json = args.json;
    let display = tokio::spawn(async move {
        let mut display = Display::new(json);
        while let Some(event) = event_rx.recv().await {
            display.show(&event);
        }
    });

    engine
        .run(IntervalTicker::new(), cmd_rx)
        .await
        .context("timer stopped unexpectedly")?;

    // Closing the event channel lets the display drain and finish.
    drop(engine);
    display.await.context("display task failed")?;

    if !json {
        println!();
    }
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["pomodoro-timer"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["pomodoro-timer", "run"]);
        assert!(matches!(cli.command, Some(Commands::Run(_))));
    }

    #[test]
    fn test_cli_parse_run_with_options() {
        let cli = Cli::parse_from([
            "pomodoro-timer",
            "run",
            "--pomodoro",
            "30",
            "--task",
            "Test",
            "--json",
        ]);
        match cli.command {
            Some(Commands::Run(args)) => {
                assert_eq!(args.pomodoro, 30);
                assert_eq!(args.task, Some("Test".to_string()));
                assert!(args.json);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_completions() {
        let cli = Cli::parse_from(["pomodoro-timer", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Completions {
                shell: clap_complete::Shell::Bash
            })
        ));
    }

    #[test]
    fn test_cli_parse_verbose() {
        let cli = Cli::parse_from(["pomodoro-timer", "--verbose", "plan"]);
        assert!(cli.verbose);
    }
}
