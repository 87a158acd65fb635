//! Core data types for the Pomodoro Timer.
//!
//! This module defines the data structures shared by the timer, the session
//! controller and the engine:
//! - Interval kinds (pomodoro, short break, long break)
//! - Interval durations in seconds
//! - Read-only snapshots of the timer state

use serde::{Deserialize, Serialize};

// ============================================================================
// IntervalKind
// ============================================================================

/// The kind of interval the timer is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalKind {
    /// Focused work interval
    #[default]
    Pomodoro,
    /// Rest interval between pomodoros
    ShortBreak,
    /// Longer rest interval, every N pomodoros
    LongBreak,
}

impl IntervalKind {
    /// Picks an interval kind from the pair of flags presentation layers
    /// usually track: a pomodoro flag and a break-length flag.
    ///
    /// `is_long_break` is ignored when `is_pomodoro` is set.
    pub fn select(is_pomodoro: bool, is_long_break: bool) -> Self {
        if is_pomodoro {
            IntervalKind::Pomodoro
        } else if is_long_break {
            IntervalKind::LongBreak
        } else {
            IntervalKind::ShortBreak
        }
    }

    /// Returns the break kind matching a long-break decision.
    pub fn break_for(is_long_break: bool) -> Self {
        Self::select(false, is_long_break)
    }

    /// Returns the string representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalKind::Pomodoro => "pomodoro",
            IntervalKind::ShortBreak => "short_break",
            IntervalKind::LongBreak => "long_break",
        }
    }

    /// Returns true for both break kinds.
    pub fn is_break(&self) -> bool {
        !self.is_pomodoro()
    }

    /// Returns true for the work interval.
    pub fn is_pomodoro(&self) -> bool {
        matches!(self, IntervalKind::Pomodoro)
    }
}

impl std::fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Durations
// ============================================================================

/// Configured length of each interval kind, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Durations {
    /// Pomodoro length in seconds
    pub pomodoro_seconds: u32,
    /// Short break length in seconds
    pub short_break_seconds: u32,
    /// Long break length in seconds
    pub long_break_seconds: u32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            pomodoro_seconds: 25 * 60,
            short_break_seconds: 5 * 60,
            long_break_seconds: 15 * 60,
        }
    }
}

impl Durations {
    /// Creates a duration triple from seconds.
    pub fn new(pomodoro_seconds: u32, short_break_seconds: u32, long_break_seconds: u32) -> Self {
        Self {
            pomodoro_seconds,
            short_break_seconds,
            long_break_seconds,
        }
    }

    /// Returns the configured length of the given interval kind.
    pub fn seconds_for(&self, kind: IntervalKind) -> u32 {
        match kind {
            IntervalKind::Pomodoro => self.pomodoro_seconds,
            IntervalKind::ShortBreak => self.short_break_seconds,
            IntervalKind::LongBreak => self.long_break_seconds,
        }
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Read-only view of the timer, taken once per tick by presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    /// Interval kind currently configured or running
    pub kind: IntervalKind,
    /// Seconds left in the current interval
    pub remaining_seconds: u32,
    /// Full length of the current interval
    pub total_seconds: u32,
    /// Whether the countdown is decrementing
    pub running: bool,
    /// Pomodoros completed since the last reset of the count
    pub completed_pomodoros: u32,
}

impl TimerSnapshot {
    /// Returns the elapsed fraction of the current interval (0.0 to 1.0).
    ///
    /// Durations can be changed mid-interval without rescaling, so the
    /// remaining time may exceed the total; the result is clamped.
    pub fn progress(&self) -> f32 {
        if self.total_seconds == 0 {
            return 1.0;
        }
        let elapsed = self.total_seconds.saturating_sub(self.remaining_seconds);
        (elapsed as f32 / self.total_seconds as f32).clamp(0.0, 1.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
