use chrono::{DateTime, Duration, Utc};

use crate::errors::{BankError, Result};

/// cancellation handle for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

/// a task whose due time has been reached
#[derive(Debug, Clone, PartialEq)]
pub struct FiredTask<T> {
    pub handle: TaskHandle,
    pub due_at: DateTime<Utc>,
    pub payload: T,
}

#[derive(Debug, Clone)]
struct ScheduledTask<T> {
    handle: TaskHandle,
    due_at: DateTime<Utc>,
    period: Option<Duration>,
    payload: T,
}

/// one-shot and periodic tasks, driven by whoever owns the clock
///
/// nothing runs on its own: the owner calls `pop_due` with the current
/// time and executes each fired task before asking for the next one, so a
/// task may cancel or schedule others and the change is seen immediately
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    next_id: u64,
    tasks: Vec<ScheduledTask<T>>,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    fn next_handle(&mut self) -> TaskHandle {
        self.next_id += 1;
        TaskHandle(self.next_id)
    }

    /// run `payload` once at `due_at`
    pub fn schedule_once(&mut self, due_at: DateTime<Utc>, payload: T) -> TaskHandle {
        let handle = self.next_handle();
        self.tasks.push(ScheduledTask {
            handle,
            due_at,
            period: None,
            payload,
        });
        handle
    }

    /// run `payload` at `first_at` and then every `period` until cancelled
    pub fn schedule_every(
        &mut self,
        first_at: DateTime<Utc>,
        period: Duration,
        payload: T,
    ) -> Result<TaskHandle> {
        if period <= Duration::zero() {
            return Err(BankError::InvalidConfiguration {
                message: format!("task period must be positive, got {}", period),
            });
        }

        let handle = self.next_handle();
        self.tasks.push(ScheduledTask {
            handle,
            due_at: first_at,
            period: Some(period),
            payload,
        });
        Ok(handle)
    }

    /// returns false if the task already fired (one-shot) or was cancelled
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.handle != handle);
        self.tasks.len() != before
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.handle == handle)
    }

    /// earliest pending due time
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.tasks.iter().map(|t| t.due_at).min()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// take the earliest task due at or before `now`
    ///
    /// ties go to the task scheduled first; periodic tasks are re-armed one
    /// period later
    pub fn pop_due(&mut self, now: DateTime<Utc>) -> Option<FiredTask<T>> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_at <= now)
            .min_by_key(|(_, t)| (t.due_at, t.handle))
            .map(|(i, _)| i)?;

        let task = &self.tasks[index];
        let fired = FiredTask {
            handle: task.handle,
            due_at: task.due_at,
            payload: task.payload.clone(),
        };
        let period = task.period;

        match period {
            Some(period) => self.tasks[index].due_at = fired.due_at + period,
            None => {
                self.tasks.remove(index);
            }
        }

        Some(fired)
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
