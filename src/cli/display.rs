//! Display utilities for the Pomodoro Timer CLI.
//!
//! This module provides formatted output for:
//! - Timer events (text or JSON lines)
//! - The break plan
//! - Error messages

use std::io::{self, Write};

use crate::driver::TimerEvent;
use crate::timer::is_long_break;
use crate::types::IntervalKind;

// ============================================================================
// Display
// ============================================================================

/// Renders timer events to the terminal.
///
/// Tick events rewrite the current line; every other event gets a line of
/// its own.
#[derive(Debug, Default)]
pub struct Display {
    json: bool,
    kind: IntervalKind,
    on_tick_line: bool,
}

impl Display {
    /// Creates a display, printing JSON lines when `json` is set.
    pub fn new(json: bool) -> Self {
        Self {
            json,
            ..Self::default()
        }
    }

    /// Prints one event.
    pub fn show(&mut self, event: &TimerEvent) {
        if self.json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::warn!(error = %e, "failed to serialize event"),
            }
            return;
        }

        match event {
            TimerEvent::Started { kind, .. } | TimerEvent::Reset { kind, .. } => self.kind = *kind,
            _ => {}
        }

        if let TimerEvent::Tick { remaining_seconds } = event {
            print!(
                "\r  {} {}  ",
                Self::kind_label(self.kind),
                Self::format_clock(*remaining_seconds)
            );
            if let Err(e) = io::stdout().flush() {
                tracing::warn!(error = %e, "failed to flush stdout");
            }
            self.on_tick_line = true;
            return;
        }

        if let Some(line) = Self::format_event(event) {
            if self.on_tick_line {
                println!();
                self.on_tick_line = false;
            }
            println!("{}", line);
        }
    }

    /// Formats a non-tick event as one line of text.
    pub fn format_event(event: &TimerEvent) -> Option<String> {
        let line = match event {
            TimerEvent::Started {
                kind,
                total_seconds,
            } => format!(
                "* {} started ({})",
                Self::kind_label(*kind),
                Self::format_clock(*total_seconds)
            ),
            TimerEvent::Paused { remaining_seconds } => {
                format!("|| Paused at {}", Self::format_clock(*remaining_seconds))
            }
            TimerEvent::Resumed { remaining_seconds } => {
                format!("> Resumed at {}", Self::format_clock(*remaining_seconds))
            }
            TimerEvent::Reset {
                kind,
                remaining_seconds,
            } => format!(
                "[] Ready: {} {}",
                Self::kind_label(*kind),
                Self::format_clock(*remaining_seconds)
            ),
            TimerEvent::Tick { .. } => return None,
            TimerEvent::IntervalCompleted(completion) => format!(
                "{} ({} completed)",
                completion.outcome.title(),
                completion.interval.completed_pomodoros
            ),
            TimerEvent::AwaitingDecision(completion) => {
                format!("? {} [y/n]", completion.outcome.question())
            }
            TimerEvent::SettingsApplied(settings) => format!(
                "Settings applied: {}/{}/{} min, target {}, long break every {}",
                settings.pomodoro_minutes,
                settings.short_break_minutes,
                settings.long_break_minutes,
                settings.target_pomodoros,
                settings.long_break_cadence
            ),
            TimerEvent::SettingsDeferred(_) => {
                "Settings will apply when the current interval ends".to_string()
            }
            TimerEvent::TaskChanged { task: Some(task) } => format!("Working on: {}", task),
            TimerEvent::TaskChanged { task: None } => "Task cleared".to_string(),
        };
        Some(line)
    }

    /// Returns the break plan for the first `count` pomodoros.
    pub fn format_plan(cadence: u32, count: u32) -> Vec<String> {
        (1..=count)
            .map(|n| {
                let kind = IntervalKind::break_for(is_long_break(n, cadence));
                format!("#{:<2} -> {}", n, Self::kind_label(kind))
            })
            .collect()
    }

    /// Prints the break plan.
    pub fn show_plan(cadence: u32, count: u32) {
        println!("Pomodoro plan (long break every {})", cadence);
        println!("─────────────────────────────");
        for line in Self::format_plan(cadence, count) {
            println!("{}", line);
        }
    }

    /// Prints the key bindings for interactive mode.
    pub fn show_help_keys() {
        println!("Keys: [enter]/p play-pause  s pomodoro  b short break  l long break");
        println!("      r reset  y/n answer  t <text> task  q quit");
    }

    /// Prints an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    /// Formats seconds as `m:ss`.
    pub fn format_clock(total_seconds: u32) -> String {
        format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
    }

    fn kind_label(kind: IntervalKind) -> &'static str {
        match kind {
            IntervalKind::Pomodoro => "Pomodoro",
            IntervalKind::ShortBreak => "Short break",
            IntervalKind::LongBreak => "Long break",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Completion, CompletionOutcome};
    use crate::timer::IntervalCompleted;

    fn pomodoro_completion() -> Completion {
        Completion {
            interval: IntervalCompleted {
                kind: IntervalKind::Pomodoro,
                completed_pomodoros: 3,
            },
            outcome: CompletionOutcome::PomodoroCompleted {
                next_break: IntervalKind::ShortBreak,
            },
        }
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(Display::format_clock(1500), "25:00");
        assert_eq!(Display::format_clock(61), "1:01");
        assert_eq!(Display::format_clock(0), "0:00");
        assert_eq!(Display::format_clock(30000), "500:00");
    }

    #[test]
    fn test_format_started() {
        let line = Display::format_event(&TimerEvent::Started {
            kind: IntervalKind::LongBreak,
            total_seconds: 900,
        });
        assert_eq!(line.as_deref(), Some("* Long break started (15:00)"));
    }

    #[test]
    fn test_format_tick_is_not_a_line() {
        assert_eq!(
            Display::format_event(&TimerEvent::Tick {
                remaining_seconds: 10
            }),
            None
        );
    }

    #[test]
    fn test_format_completion_and_question() {
        let completion = pomodoro_completion();

        assert_eq!(
            Display::format_event(&TimerEvent::IntervalCompleted(completion)).as_deref(),
            Some("Pomodoro completed! (3 completed)")
        );
        assert_eq!(
            Display::format_event(&TimerEvent::AwaitingDecision(completion)).as_deref(),
            Some("? Do you want to start the break? [y/n]")
        );
    }

    #[test]
    fn test_show_tracks_tick_line() {
        let mut display = Display::new(false);

        display.show(&TimerEvent::Started {
            kind: IntervalKind::ShortBreak,
            total_seconds: 300,
        });
        assert_eq!(display.kind, IntervalKind::ShortBreak);
        assert!(!display.on_tick_line);

        display.show(&TimerEvent::Tick {
            remaining_seconds: 299,
        });
        assert!(display.on_tick_line);

        display.show(&TimerEvent::Paused {
            remaining_seconds: 299,
        });
        assert!(!display.on_tick_line);
    }

    #[test]
    fn test_format_plan() {
        let plan = Display::format_plan(2, 4);
        assert_eq!(
            plan,
            vec![
                "#1  -> Short break",
                "#2  -> Long break",
                "#3  -> Short break",
                "#4  -> Long break",
            ]
        );
    }

    #[test]
    fn test_event_json() {
        let json = serde_json::to_string(&TimerEvent::Paused {
            remaining_seconds: 42,
        })
        .unwrap();
        assert_eq!(json, r#"{"event":"paused","remainingSeconds":42}"#);

        let json = serde_json::to_string(&TimerEvent::AwaitingDecision(pomodoro_completion()))
            .unwrap();
        assert!(json.contains("\"event\":\"awaiting_decision\""));
        assert!(json.contains("\"outcome\":\"pomodoro_completed\""));
    }
}
