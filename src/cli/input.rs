//! Keyboard input for interactive mode.
//!
//! Each line typed while the timer runs maps to one engine command.

use std::io::BufRead;

use tokio::sync::mpsc;

use crate::driver::EngineCommand;
use crate::types::IntervalKind;

use super::display::Display;

/// Parses one input line into an engine command.
///
/// # Errors
///
/// Returns a message for unknown input.
pub fn parse_input(line: &str) -> Result<EngineCommand, String> {
    let line = line.trim();
    let (key, rest) = match line.split_once(char::is_whitespace) {
        Some((key, rest)) => (key, rest.trim()),
        None => (line, ""),
    };

    let command = match key.to_ascii_lowercase().as_str() {
        "" | "p" => EngineCommand::Toggle,
        "s" => EngineCommand::Start(IntervalKind::Pomodoro),
        "b" => EngineCommand::Start(IntervalKind::ShortBreak),
        "l" => EngineCommand::Start(IntervalKind::LongBreak),
        "r" => EngineCommand::Reset,
        "y" | "yes" => EngineCommand::Respond { accept: true },
        "n" | "no" => EngineCommand::Respond { accept: false },
        "t" if rest.is_empty() => EngineCommand::SetTask(None),
        "t" => EngineCommand::SetTask(Some(rest.to_string())),
        "q" | "quit" => EngineCommand::Shutdown,
        other => return Err(format!("unknown input '{}'", other)),
    };
    Ok(command)
}

/// Reads stdin line by line on a dedicated thread and forwards commands.
///
/// A plain thread is used so a blocked read never holds up runtime
/// shutdown. The thread ends on EOF, on `q`, or once the engine is gone.
pub fn spawn_stdin_reader(tx: mpsc::UnboundedSender<EngineCommand>) -> std::io::Result<()> {
    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                match parse_input(&line) {
                    Ok(command) => {
                        let quit = command == EngineCommand::Shutdown;
                        if tx.send(command).is_err() || quit {
                            break;
                        }
                    }
                    Err(message) => {
                        Display::show_error(&message);
                        Display::show_help_keys();
                    }
                }
            }
            tracing::debug!("stdin reader finished");
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_keys() {
        assert_eq!(parse_input(""), Ok(EngineCommand::Toggle));
        assert_eq!(parse_input("  p "), Ok(EngineCommand::Toggle));
        assert_eq!(parse_input("P"), Ok(EngineCommand::Toggle));
    }

    #[test]
    fn test_start_keys() {
        assert_eq!(
            parse_input("s"),
            Ok(EngineCommand::Start(IntervalKind::Pomodoro))
        );
        assert_eq!(
            parse_input("b"),
            Ok(EngineCommand::Start(IntervalKind::ShortBreak))
        );
        assert_eq!(
            parse_input("l"),
            Ok(EngineCommand::Start(IntervalKind::LongBreak))
        );
    }

    #[test]
    fn test_answer_keys() {
        assert_eq!(parse_input("y"), Ok(EngineCommand::Respond { accept: true }));
        assert_eq!(parse_input("no"), Ok(EngineCommand::Respond { accept: false }));
    }

    #[test]
    fn test_task_key() {
        assert_eq!(
            parse_input("t  Fix the build "),
            Ok(EngineCommand::SetTask(Some("Fix the build".to_string())))
        );
        assert_eq!(parse_input("t"), Ok(EngineCommand::SetTask(None)));
    }

    #[test]
    fn test_other_keys() {
        assert_eq!(parse_input("r"), Ok(EngineCommand::Reset));
        assert_eq!(parse_input("q"), Ok(EngineCommand::Shutdown));
        assert!(parse_input("x").is_err());
    }
}
