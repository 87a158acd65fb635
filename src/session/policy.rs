//! What happens after an interval completes.
//!
//! A [`Completion`] classifies the finished interval and carries the question
//! the user would be asked next. Answering it (by hand or through a
//! [`CompletionPolicy`]) is a caller-level decision; the timer itself never
//! starts the next interval.

use serde::{Deserialize, Serialize};

use crate::timer::IntervalCompleted;
use crate::types::IntervalKind;

/// Classification of a finished interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CompletionOutcome {
    /// The completed count reached the target; the count has been zeroed.
    /// Question: start over?
    TargetAchieved,
    /// A pomodoro finished. Question: take the break (or start another
    /// pomodoro)?
    PomodoroCompleted {
        /// Break the policy selected for this point in the cycle
        next_break: IntervalKind,
    },
    /// A break finished. Question: start a new pomodoro?
    BreakFinished,
}

impl CompletionOutcome {
    /// Short headline for notifications or dialogs.
    pub fn title(&self) -> &'static str {
        match self {
            Self::TargetAchieved => "Target achieved!",
            Self::PomodoroCompleted { .. } => "Pomodoro completed!",
            Self::BreakFinished => "Break finished!",
        }
    }

    /// The yes/no question answered by [`crate::session::Session::respond`].
    pub fn question(&self) -> &'static str {
        match self {
            Self::TargetAchieved => "Do you want to start over?",
            Self::PomodoroCompleted {
                next_break: IntervalKind::LongBreak,
            } => "Do you want to start the long break?",
            Self::PomodoroCompleted { .. } => "Do you want to start the break?",
            Self::BreakFinished => "Do you want to start a new pomodoro?",
        }
    }
}

/// A finished interval together with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    /// Raw completion reported by the timer
    pub interval: IntervalCompleted,
    /// Classification and pending question
    #[serde(flatten)]
    pub outcome: CompletionOutcome,
}

/// The interval change applied when a completion is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "kind", rename_all = "snake_case")]
pub enum NextAction {
    /// An interval of this kind was started.
    Start(IntervalKind),
    /// The timer was reset to an idle pomodoro and waits for the user.
    Wait,
}

/// Automatic answers to completion questions.
///
/// Every flag defaults to off, meaning the user is asked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompletionPolicy {
    /// Start the selected break as soon as a pomodoro finishes
    pub auto_start_breaks: bool,
    /// Start the next pomodoro as soon as a break finishes
    pub auto_start_pomodoros: bool,
    /// Start over right away when the target is reached
    pub restart_after_target: bool,
}

impl CompletionPolicy {
    /// Policy that answers every question with yes.
    pub fn continuous() -> Self {
        Self {
            auto_start_breaks: true,
            auto_start_pomodoros: true,
            restart_after_target: true,
        }
    }

    /// Returns `Some(true)` when the policy accepts automatically, `None`
    /// when the user has to answer.
    ///
    /// Reaching the target without `restart_after_target` always asks, even
    /// if pomodoros auto-start.
    pub fn decide(&self, completion: &Completion) -> Option<bool> {
        let automatic = match completion.outcome {
            CompletionOutcome::TargetAchieved => self.restart_after_target,
            CompletionOutcome::PomodoroCompleted { .. } => self.auto_start_breaks,
            CompletionOutcome::BreakFinished => self.auto_start_pomodoros,
        };
        automatic.then_some(true)
    }
}
