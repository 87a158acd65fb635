//! Session controller around the timer.
//!
//! `Session` holds what a presentation layer would otherwise keep next to
//! the timer:
//! - the active settings, and settings waiting for the next interval boundary
//! - the long-break and target policies applied to each completion
//! - the answer to the question asked after each completion
//! - the current task label and the task list

pub mod policy;
pub mod tasks;

pub use policy::{Completion, CompletionOutcome, CompletionPolicy, NextAction};
pub use tasks::{Task, TaskError, TaskList};

use serde::{Deserialize, Serialize};

use crate::settings::{SettingsError, SettingsProvider, TimerSettings};
use crate::timer::{is_long_break, target_reached, PomodoroTimer};
use crate::types::{IntervalKind, TimerSnapshot};

// ============================================================================
// Toggle / SettingsUpdate
// ============================================================================

/// Result of the play/pause control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Toggle {
    /// The running interval was paused.
    Paused,
    /// The paused interval continues where it stopped.
    Resumed,
    /// Nothing was left, so an interval of this kind started from full.
    Restarted(IntervalKind),
}

/// How a settings change was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsUpdate {
    /// The new settings are active.
    Applied,
    /// An interval is running; the settings apply when it completes.
    Deferred,
}

// ============================================================================
// Session
// ============================================================================

/// A timer together with its settings, policies and tasks.
#[derive(Debug, Clone)]
pub struct Session {
    timer: PomodoroTimer,
    settings: TimerSettings,
    pending_settings: Option<TimerSettings>,
    current_task: Option<String>,
    tasks: TaskList,
}

impl Session {
    /// Creates an idle session loaded with a full pomodoro.
    ///
    /// # Errors
    ///
    /// Rejects out-of-range settings.
    pub fn new(settings: TimerSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            timer: PomodoroTimer::new(settings.durations()),
            settings,
            pending_settings: None,
            current_task: None,
            tasks: TaskList::new(),
        })
    }

    /// Creates a session from the settings a provider supplies.
    ///
    /// # Errors
    ///
    /// Propagates the provider's error.
    pub fn from_provider<P: SettingsProvider + ?Sized>(provider: &P) -> Result<Self, SettingsError> {
        Self::new(provider.load()?)
    }

    /// Play/pause: pauses a running interval, otherwise resumes the current
    /// one (or restarts it if it has already completed).
    pub fn toggle(&mut self) -> Toggle {
        if self.timer.is_running() {
            self.timer.pause();
            return Toggle::Paused;
        }

        let kind = self.timer.kind();
        if self.timer.resume(kind) {
            Toggle::Resumed
        } else {
            Toggle::Restarted(kind)
        }
    }

    /// Starts an interval of the given kind from its full duration.
    pub fn start(&mut self, kind: IntervalKind) {
        self.timer.start(kind);
    }

    /// Stops the timer and loads an idle pomodoro.
    pub fn reset(&mut self) {
        self.timer.reset(IntervalKind::Pomodoro);
        tracing::debug!("session reset");
    }

    /// Advances the countdown by one second and classifies a completion.
    ///
    /// Deferred settings are applied before the completion is classified, so
    /// a new target or cadence already counts for this boundary.
    pub fn tick(&mut self) -> Option<Completion> {
        let interval = self.timer.tick()?;

        if let Some(settings) = self.pending_settings.take() {
            self.apply_settings(settings);
            tracing::debug!("deferred settings applied at interval boundary");
        }

        let outcome = if target_reached(interval.completed_pomodoros, self.settings.target_pomodoros)
        {
            self.timer.clear_completed_pomodoros();
            CompletionOutcome::TargetAchieved
        } else if interval.kind.is_pomodoro() {
            CompletionOutcome::PomodoroCompleted {
                next_break: self.break_after(interval.completed_pomodoros),
            }
        } else {
            CompletionOutcome::BreakFinished
        };

        tracing::info!(
            kind = %interval.kind,
            completed = interval.completed_pomodoros,
            outcome = outcome.title(),
            "interval finished"
        );

        Some(Completion { interval, outcome })
    }

    /// Applies the answer to a completion question and returns what changed.
    ///
    /// | outcome           | yes                 | no                 |
    /// |-------------------|---------------------|--------------------|
    /// | target achieved   | start pomodoro      | wait               |
    /// | pomodoro complete | start selected break| start pomodoro     |
    /// | break finished    | start pomodoro      | wait               |
    pub fn respond(&mut self, completion: &Completion, accept: bool) -> NextAction {
        let action = match (completion.outcome, accept) {
            (CompletionOutcome::PomodoroCompleted { next_break }, true) => {
                NextAction::Start(next_break)
            }
            (CompletionOutcome::PomodoroCompleted { .. }, false) => {
                NextAction::Start(IntervalKind::Pomodoro)
            }
            (CompletionOutcome::TargetAchieved | CompletionOutcome::BreakFinished, true) => {
                NextAction::Start(IntervalKind::Pomodoro)
            }
            (CompletionOutcome::TargetAchieved | CompletionOutcome::BreakFinished, false) => {
                NextAction::Wait
            }
        };

        match action {
            NextAction::Start(kind) => self.timer.start(kind),
            NextAction::Wait => self.timer.reset(IntervalKind::Pomodoro),
        }
        action
    }

    /// Returns the break the policy selects after the current count.
    pub fn next_break(&self) -> IntervalKind {
        self.break_after(self.timer.completed_pomodoros())
    }

    fn break_after(&self, completed_pomodoros: u32) -> IntervalKind {
        IntervalKind::break_for(is_long_break(
            completed_pomodoros,
            self.settings.long_break_cadence,
        ))
    }

    /// Takes new settings.
    ///
    /// While an interval is counting down the settings are held until it
    /// completes; a later update replaces a held one.
    ///
    /// # Errors
    ///
    /// Rejects out-of-range settings; nothing changes in that case.
    pub fn update_settings(&mut self, settings: TimerSettings) -> Result<SettingsUpdate, SettingsError> {
        settings.validate()?;

        if self.timer.is_running() {
            self.pending_settings = Some(settings);
            tracing::debug!("settings deferred until the running interval completes");
            return Ok(SettingsUpdate::Deferred);
        }

        self.pending_settings = None;
        self.apply_settings(settings);
        Ok(SettingsUpdate::Applied)
    }

    /// Reloads settings from a provider, as after a preferences window
    /// is saved.
    ///
    /// # Errors
    ///
    /// Propagates the provider's error.
    pub fn reload_from<P: SettingsProvider + ?Sized>(
        &mut self,
        provider: &P,
    ) -> Result<SettingsUpdate, SettingsError> {
        self.update_settings(provider.load()?)
    }

    fn apply_settings(&mut self, settings: TimerSettings) {
        let previous_total = self.timer.total_seconds();
        let untouched = !self.timer.is_running() && self.timer.remaining_seconds() == previous_total;

        self.settings = settings;
        self.timer.update_durations(settings.durations());

        // An idle interval nobody has started yet shows the new length.
        if untouched {
            self.timer.reset(self.timer.kind());
        }
    }

    /// Sets or clears the "what are you working on" label.
    ///
    /// # Errors
    ///
    /// Rejects blank or over-long text.
    pub fn set_current_task(&mut self, task: Option<&str>) -> Result<(), TaskError> {
        self.current_task = task.map(tasks::validate_task_text).transpose()?;
        Ok(())
    }

    /// Returns the current task label.
    pub fn current_task(&self) -> Option<&str> {
        self.current_task.as_deref()
    }

    /// Returns the task list.
    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Returns the task list for editing.
    pub fn tasks_mut(&mut self) -> &mut TaskList {
        &mut self.tasks
    }

    /// Returns the underlying timer.
    pub fn timer(&self) -> &PomodoroTimer {
        &self.timer
    }

    /// Returns the active settings.
    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    /// Returns settings waiting for the next interval boundary.
    pub fn pending_settings(&self) -> Option<&TimerSettings> {
        self.pending_settings.as_ref()
    }

    /// Returns true while the countdown is decrementing.
    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Returns the observable timer state.
    pub fn snapshot(&self) -> TimerSnapshot {
        self.timer.snapshot()
    }

    /// Returns `(completed, target)` for a "3/8" style indicator.
    pub fn target_progress(&self) -> (u32, u32) {
        (self.timer.completed_pomodoros(), self.settings.target_pomodoros)
    }
}

// ============================================================================
// Tests
// ============================================================================
