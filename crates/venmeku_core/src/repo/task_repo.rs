//! Task repository over the `@tasks` key.
//!
//! # Responsibility
//! - Serve the task list, seeding sample content on first run.
//! - Apply add/update/remove/toggle and persist the whole list after each.
//!
//! # Invariants
//! - Order is insertion order; update and remove keep relative order.
//! - Ids are unique and never reused within one list.
//! - A mutation that changes nothing performs no write.
//! - The list is global, shared by every local account.

use super::codec::{load_json, store_json};
use super::{RepoError, RepoResult};
use crate::kv::KvStore;
use crate::model::task::{
    next_task_id, seed_tasks, Clock, SystemClock, Task, TaskId, TASK_TEXT_MAX_CHARS,
};
use log::{debug, info};

/// Storage key of the task collection.
pub const TASKS_KEY: &str = "@tasks";

pub struct TaskRepository<S: KvStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
}

impl<S: KvStore> TaskRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KvStore, C: Clock> TaskRepository<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Persisted tasks, or the seed tasks when the list was never saved.
    ///
    /// Seeds are not written until the first mutation.
    pub fn load_all(&self) -> RepoResult<Vec<Task>> {
        Ok(load_json(&self.store, TASKS_KEY)?.unwrap_or_else(seed_tasks))
    }

    /// Appends a task; `Ok(None)` when `text` is blank.
    ///
    /// Text is stored verbatim, not trimmed.
    ///
    /// # Errors
    /// - `Validation` when `text` exceeds `TASK_TEXT_MAX_CHARS`, or when the
    ///   id space is exhausted.
    pub fn add(&self, text: &str) -> RepoResult<Option<Task>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        check_length(text)?;

        let mut tasks = self.load_all()?;
        let id = next_task_id(&tasks, self.clock.now_epoch_ms()).ok_or_else(|| {
            RepoError::Validation("No more task ids are available.".to_string())
        })?;
        let task = Task::new(id, text);
        tasks.push(task.clone());
        self.persist(&tasks)?;
        info!(
            "event=task_add module=tasks status=ok count={}",
            tasks.len()
        );
        Ok(Some(task))
    }

    /// Replaces the text of task `id`; returns whether anything was written.
    ///
    /// Unknown ids are a no-op whatever the text; the length limit applies
    /// only to an existing task.
    pub fn update(&self, id: TaskId, text: &str) -> RepoResult<bool> {
        if text.trim().is_empty() {
            return Ok(false);
        }

        let mut tasks = self.load_all()?;
        let Some(task) = tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_update module=tasks status=skipped reason=missing");
            return Ok(false);
        };
        check_length(text)?;
        task.text = text.to_string();
        self.persist(&tasks)?;
        Ok(true)
    }

    /// Removes task `id`; idempotent.
    pub fn remove(&self, id: TaskId) -> RepoResult<bool> {
        let mut tasks = self.load_all()?;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Ok(false);
        }
        self.persist(&tasks)?;
        info!(
            "event=task_remove module=tasks status=ok count={}",
            tasks.len()
        );
        Ok(true)
    }

    /// Flips the done flag of task `id` and returns the updated task.
    pub fn toggle_done(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut tasks = self.load_all()?;
        let Some(task) = tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(None);
        };
        task.done = !task.done;
        let toggled = task.clone();
        self.persist(&tasks)?;
        Ok(Some(toggled))
    }

    /// Drops every done task; returns how many were removed.
    pub fn clear_completed(&self) -> RepoResult<usize> {
        let mut tasks = self.load_all()?;
        let before = tasks.len();
        tasks.retain(|task| !task.done);
        let removed = before - tasks.len();
        if removed > 0 {
            self.persist(&tasks)?;
        }
        Ok(removed)
    }

    fn persist(&self, tasks: &[Task]) -> RepoResult<()> {
        store_json(&self.store, TASKS_KEY, tasks)
    }
}

fn check_length(text: &str) -> RepoResult<()> {
    if text.chars().count() > TASK_TEXT_MAX_CHARS {
        return Err(RepoError::Validation(format!(
            "Task text cannot be longer than {TASK_TEXT_MAX_CHARS} characters."
        )));
    }
    Ok(())
}
