//! Settings validation error types.

use thiserror::Error;

/// Errors raised when timer settings fall outside their accepted ranges.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// Pomodoro length outside 1-500 minutes.
    #[error("pomodoro duration must be between 1 and 500 minutes, got {0}")]
    PomodoroDuration(u32),

    /// Short break length outside 1-500 minutes.
    #[error("short break duration must be between 1 and 500 minutes, got {0}")]
    ShortBreakDuration(u32),

    /// Long break length outside 1-500 minutes.
    #[error("long break duration must be between 1 and 500 minutes, got {0}")]
    LongBreakDuration(u32),

    /// Target pomodoro count outside 1-99.
    #[error("target pomodoros must be between 1 and 99, got {0}")]
    TargetPomodoros(u32),

    /// Long break cadence outside 1-99.
    #[error("long break cadence must be between 1 and 99, got {0}")]
    LongBreakCadence(u32),
}

impl SettingsError {
    /// Returns the name of the offending setting.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::PomodoroDuration(_) => "pomodoroMinutes",
            Self::ShortBreakDuration(_) => "shortBreakMinutes",
            Self::LongBreakDuration(_) => "longBreakMinutes",
            Self::TargetPomodoros(_) => "targetPomodoros",
            Self::LongBreakCadence(_) => "longBreakCadence",
        }
    }
}
