pub mod scheduler;
pub mod timer;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{AccountId, SortOrder};

pub use scheduler::{FiredTask, Scheduler, TaskHandle};
pub use timer::{LogoutTimer, TickOutcome, DEFAULT_TIMEOUT_SECS};

/// deferred work owned by the bank's scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankTask {
    /// one second of the logout countdown
    SessionTick,
    /// credit an approved loan
    LoanGrant {
        account_id: AccountId,
        amount: Money,
        requested_at: DateTime<Utc>,
    },
}

/// the logged in user
///
/// holds the account by id; the directory keeps ownership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub account_id: AccountId,
    pub username: String,
    pub started_at: DateTime<Utc>,
    pub timer: LogoutTimer,
    pub sort: SortOrder,
    #[serde(skip)]
    tick_task: Option<TaskHandle>,
}

impl Session {
    pub fn new(
        account_id: AccountId,
        username: String,
        started_at: DateTime<Utc>,
        timeout_secs: u32,
    ) -> Self {
        Self {
            account_id,
            username,
            started_at,
            timer: LogoutTimer::new(timeout_secs),
            sort: SortOrder::Original,
            tick_task: None,
        }
    }

    pub fn tick_task(&self) -> Option<TaskHandle> {
        self.tick_task
    }

    /// record the countdown task, returning the one it replaces
    pub(crate) fn replace_tick_task(&mut self, handle: Option<TaskHandle>) -> Option<TaskHandle> {
        std::mem::replace(&mut self.tick_task, handle)
    }
}
