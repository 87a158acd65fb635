//! Pomodoro/break countdown state machine.
//!
//! `PomodoroTimer` is a pure state machine: it never schedules anything
//! itself. The embedding application calls [`PomodoroTimer::tick`] once per
//! second while the timer is running and redraws from the observers.
//!
//! The long-break and target policies are free functions so that callers can
//! decide the next interval without the timer knowing about them.

use serde::{Deserialize, Serialize};

use crate::types::{Durations, IntervalKind, TimerSnapshot};

// ============================================================================
// IntervalCompleted
// ============================================================================

/// Raised by [`PomodoroTimer::tick`] on the tick that brings the countdown
/// to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalCompleted {
    /// Kind of the interval that just finished
    pub kind: IntervalKind,
    /// Completed pomodoro count, already incremented for a pomodoro
    pub completed_pomodoros: u32,
}

// ============================================================================
// Policies
// ============================================================================

/// Returns true when the break following `completed_pomodoros` should be long.
///
/// A long break falls on every multiple of `cadence`. No pomodoros completed
/// (or a zero cadence) always means a short break.
pub fn is_long_break(completed_pomodoros: u32, cadence: u32) -> bool {
    cadence > 0 && completed_pomodoros > 0 && completed_pomodoros % cadence == 0
}

/// Returns true when the completed count has reached the configured target.
pub fn target_reached(completed_pomodoros: u32, target_pomodoros: u32) -> bool {
    completed_pomodoros >= target_pomodoros
}

// ============================================================================
// PomodoroTimer
// ============================================================================

/// Countdown state for one pomodoro or break at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomodoroTimer {
    kind: IntervalKind,
    remaining_seconds: u32,
    running: bool,
    completed_pomodoros: u32,
    durations: Durations,
}

impl PomodoroTimer {
    /// Creates an idle timer loaded with a full pomodoro.
    pub fn new(durations: Durations) -> Self {
        Self {
            kind: IntervalKind::Pomodoro,
            remaining_seconds: durations.pomodoro_seconds,
            running: false,
            completed_pomodoros: 0,
            durations,
        }
    }

    /// Starts a pomodoro from its full duration.
    pub fn start_pomodoro(&mut self) {
        self.start(IntervalKind::Pomodoro);
    }

    /// Starts a short break from its full duration.
    pub fn start_short_break(&mut self) {
        self.start(IntervalKind::ShortBreak);
    }

    /// Starts a long break from its full duration.
    pub fn start_long_break(&mut self) {
        self.start(IntervalKind::LongBreak);
    }

    /// Starts an interval of the given kind from its full duration.
    pub fn start(&mut self, kind: IntervalKind) {
        self.kind = kind;
        self.remaining_seconds = self.durations.seconds_for(kind);
        self.running = true;
        tracing::debug!(kind = %kind, seconds = self.remaining_seconds, "interval started");
    }

    /// Stops the countdown, keeping the remaining time.
    pub fn pause(&mut self) {
        if self.running {
            self.running = false;
            tracing::debug!(remaining = self.remaining_seconds, "interval paused");
        }
    }

    /// Continues the countdown.
    ///
    /// With time left the interval resumes in place and `true` is returned.
    /// With nothing left the previous interval has already completed, so
    /// `kind` is started from its full duration and `false` is returned to
    /// tell the caller its progress display starts over.
    pub fn resume(&mut self, kind: IntervalKind) -> bool {
        if self.remaining_seconds == 0 {
            self.start(kind);
            false
        } else {
            self.running = true;
            tracing::debug!(remaining = self.remaining_seconds, "interval resumed");
            true
        }
    }

    /// Advances the countdown by one second.
    ///
    /// Does nothing while stopped. Returns the completion on the tick that
    /// reaches zero; the countdown stops in the same call, so a later tick
    /// cannot count the interval twice.
    pub fn tick(&mut self) -> Option<IntervalCompleted> {
        if !self.running {
            return None;
        }

        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
        }
        if self.remaining_seconds > 0 {
            return None;
        }

        self.running = false;
        if self.kind.is_pomodoro() {
            self.completed_pomodoros += 1;
        }
        tracing::debug!(
            kind = %self.kind,
            completed = self.completed_pomodoros,
            "interval completed"
        );

        Some(IntervalCompleted {
            kind: self.kind,
            completed_pomodoros: self.completed_pomodoros,
        })
    }

    /// Stops the countdown and loads the full duration of `kind`.
    ///
    /// The completed count is left to the caller.
    pub fn reset(&mut self, kind: IntervalKind) {
        self.running = false;
        self.kind = kind;
        self.remaining_seconds = self.durations.seconds_for(kind);
    }

    /// Replaces the configured durations.
    ///
    /// The interval in progress keeps its remaining time; the new values
    /// take effect on the next start or reset.
    pub fn update_durations(&mut self, durations: Durations) {
        self.durations = durations;
    }

    /// Zeroes the completed pomodoro count.
    pub fn clear_completed_pomodoros(&mut self) {
        self.completed_pomodoros = 0;
    }

    /// Returns the current interval kind.
    pub fn kind(&self) -> IntervalKind {
        self.kind
    }

    /// Returns the seconds left in the current interval.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Returns true while the countdown is decrementing.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the number of completed pomodoros.
    pub fn completed_pomodoros(&self) -> u32 {
        self.completed_pomodoros
    }

    /// Returns the configured durations.
    pub fn durations(&self) -> Durations {
        self.durations
    }

    /// Returns the configured length of the current interval kind.
    pub fn total_seconds(&self) -> u32 {
        self.durations.seconds_for(self.kind)
    }

    /// Returns a copy of the observable state.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            kind: self.kind,
            remaining_seconds: self.remaining_seconds,
            total_seconds: self.total_seconds(),
            running: self.running,
            completed_pomodoros: self.completed_pomodoros,
        }
    }
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new(Durations::default())
    }
}

// ============================================================================
// Tests
// ============================================================================
