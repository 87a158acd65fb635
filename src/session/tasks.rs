//! The short list of tasks shown next to the timer.
//!
//! Only the three most important tasks of the day are kept.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of task slots.
pub const MAX_TASKS: usize = 3;

/// Longest accepted task text, in characters.
pub const MAX_TASK_CHARS: usize = 100;

/// Errors from editing the task list or the current task label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// Slot index past the end of the list.
    #[error("task slot {0} does not exist (only 3 slots)")]
    IndexOutOfRange(usize),

    /// Blank task text.
    #[error("task text cannot be empty")]
    Empty,

    /// Task text over the character limit.
    #[error("task text must be at most 100 characters, got {0}")]
    TooLong(usize),
}

/// Checks task text and returns it trimmed.
///
/// # Errors
///
/// Rejects blank text and text longer than [`MAX_TASK_CHARS`].
pub fn validate_task_text(text: &str) -> Result<String, TaskError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TaskError::Empty);
    }
    let chars = trimmed.chars().count();
    if chars > MAX_TASK_CHARS {
        return Err(TaskError::TooLong(chars));
    }
    Ok(trimmed.to_string())
}

/// One task slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task text
    pub text: String,
    /// Whether the task is ticked off
    pub done: bool,
}

/// Fixed set of task slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    slots: [Option<Task>; MAX_TASKS],
}

impl TaskList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes task text into a slot. Rewriting a slot keeps its done flag.
    ///
    /// # Errors
    ///
    /// Fails on a bad index or invalid text.
    pub fn set(&mut self, index: usize, text: &str) -> Result<(), TaskError> {
        let text = validate_task_text(text)?;
        let slot = self.slot_mut(index)?;
        let done = slot.as_ref().is_some_and(|task| task.done);
        *slot = Some(Task { text, done });
        Ok(())
    }

    /// Flips the done flag of a slot and returns the new value.
    ///
    /// Empty slots can be toggled too; the flag sticks once text is set.
    ///
    /// # Errors
    ///
    /// Fails on a bad index.
    pub fn toggle(&mut self, index: usize) -> Result<bool, TaskError> {
        let task = self.slot_mut(index)?.get_or_insert_with(Task::default);
        task.done = !task.done;
        Ok(task.done)
    }

    /// Empties a slot.
    ///
    /// # Errors
    ///
    /// Fails on a bad index.
    pub fn clear(&mut self, index: usize) -> Result<(), TaskError> {
        *self.slot_mut(index)? = None;
        Ok(())
    }

    /// Returns a slot, `None` when empty.
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Iterates over every slot, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = Option<&Task>> {
        self.slots.iter().map(Option::as_ref)
    }

    /// Counts tasks marked done.
    pub fn done_count(&self) -> usize {
        self.slots.iter().flatten().filter(|task| task.done).count()
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Option<Task>, TaskError> {
        self.slots
            .get_mut(index)
            .ok_or(TaskError::IndexOutOfRange(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_task_text() {
        assert_eq!(validate_task_text("  Write report "), Ok("Write report".to_string()));
        assert_eq!(validate_task_text("   "), Err(TaskError::Empty));
        assert_eq!(
            validate_task_text(&"a".repeat(101)),
            Err(TaskError::TooLong(101))
        );
        assert!(validate_task_text(&"あ".repeat(100)).is_ok());
    }

    #[test]
    fn test_set_and_get() {
        let mut tasks = TaskList::new();
        tasks.set(0, "Review PR").unwrap();

        assert_eq!(tasks.get(0).map(|t| t.text.as_str()), Some("Review PR"));
        assert!(tasks.get(1).is_none());
    }

    #[test]
    fn test_set_out_of_range() {
        let mut tasks = TaskList::new();
        assert_eq!(tasks.set(3, "x"), Err(TaskError::IndexOutOfRange(3)));
    }

    #[test]
    fn test_toggle_and_rewrite_keeps_done() {
        let mut tasks = TaskList::new();
        tasks.set(1, "Inbox zero").unwrap();

        assert_eq!(tasks.toggle(1), Ok(true));
        tasks.set(1, "Inbox zero, really").unwrap();

        let task = tasks.get(1).unwrap();
        assert!(task.done);
        assert_eq!(task.text, "Inbox zero, really");
        assert_eq!(tasks.done_count(), 1);

        assert_eq!(tasks.toggle(1), Ok(false));
        assert_eq!(tasks.done_count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut tasks = TaskList::new();
        tasks.set(2, "Plan sprint").unwrap();
        tasks.clear(2).unwrap();

        assert!(tasks.get(2).is_none());
        assert_eq!(tasks.iter().filter(Option::is_some).count(), 0);
    }
}
