//! Task record, id allocation and first-run content.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Integer task identity; allocated from epoch milliseconds.
pub type TaskId = i64;

/// Longest task text accepted, in characters.
pub const TASK_TEXT_MAX_CHARS: usize = 500;

/// A to-do item in the global task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    /// Absent in blobs written before toggle-done existed.
    #[serde(default)]
    pub done: bool,
}

impl Task {
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            done: false,
        }
    }
}

/// Time source used for task id allocation.
pub trait Clock {
    fn now_epoch_ms(&self) -> i64;
}

/// Wall clock; falls back to `0` if the system time precedes the epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Picks the id for a new task.
///
/// Uses the clock reading unless it does not exceed the largest existing id,
/// in which case the id is `max + 1`. Ids therefore never repeat and never
/// decrease, even when two tasks land in the same millisecond.
///
/// Returns `None` when the largest existing id is already `TaskId::MAX`.
pub fn next_task_id(existing: &[Task], now_epoch_ms: i64) -> Option<TaskId> {
    match existing.iter().map(|task| task.id).max() {
        Some(max) if now_epoch_ms <= max => max.checked_add(1),
        _ => Some(now_epoch_ms),
    }
}

/// Sample tasks shown before the list has ever been saved.
pub fn seed_tasks() -> Vec<Task> {
    vec![
        Task::new(1, "Welcome to VenMeku Todo! Tap a task to edit it."),
        Task::new(2, "Tap the circle to mark a task as done."),
        Task::new(3, "Add your first task using the field above."),
    ]
}

#[cfg(test)]
mod tests {
    use super::{next_task_id, seed_tasks, Task};

    #[test]
    fn next_id_follows_clock_when_ahead() {
        let tasks = vec![Task::new(10, "a")];
        assert_eq!(
            next_task_id(&tasks, 1_700_000_000_000),
            Some(1_700_000_000_000)
        );
        assert_eq!(next_task_id(&[], 42), Some(42));
    }

    #[test]
    fn next_id_bumps_past_max_when_clock_lags() {
        let tasks = vec![Task::new(500, "a"), Task::new(900, "b")];
        assert_eq!(next_task_id(&tasks, 900), Some(901));
        assert_eq!(next_task_id(&tasks, 3), Some(901));
    }

    #[test]
    fn next_id_is_exhausted_at_max() {
        let tasks = vec![Task::new(i64::MAX, "last")];
        assert_eq!(next_task_id(&tasks, 1_700_000_000_000), None);
    }

    #[test]
    fn seeds_have_distinct_ids() {
        let seeds = seed_tasks();
        assert_eq!(seeds.len(), 3);
        assert!(seeds.iter().all(|task| !task.done));
        assert_ne!(seeds[0].id, seeds[1].id);
        assert_ne!(seeds[1].id, seeds[2].id);
    }

    #[test]
    fn missing_done_flag_defaults_to_false() {
        let task: Task = serde_json::from_str(r#"{"id":7,"text":"Buy milk"}"#).unwrap();
        assert_eq!(task, Task::new(7, "Buy milk"));
    }
}
