use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{AccountId, SortOrder};

/// why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogoutReason {
    /// the user logged out
    Requested,
    /// the inactivity timer ran out
    Expired,
    /// the logged in account was closed
    AccountClosed,
    /// another login took over
    Replaced,
}

/// all events that can be emitted by the bank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // session events
    LoggedIn {
        account_id: AccountId,
        username: String,
        timestamp: DateTime<Utc>,
    },
    LoginRejected {
        username: String,
        timestamp: DateTime<Utc>,
    },
    LoggedOut {
        account_id: AccountId,
        reason: LogoutReason,
        timestamp: DateTime<Utc>,
    },
    TimerReset {
        account_id: AccountId,
        timestamp: DateTime<Utc>,
    },
    SortToggled {
        account_id: AccountId,
        order: SortOrder,
    },

    // money movement events
    TransferCompleted {
        from: AccountId,
        to: AccountId,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    TransferRejected {
        from: AccountId,
        to_username: String,
        amount: Money,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    // loan events
    LoanRequested {
        account_id: AccountId,
        amount: Money,
        grant_at: DateTime<Utc>,
    },
    LoanRejected {
        account_id: AccountId,
        amount: Money,
        reason: String,
        timestamp: DateTime<Utc>,
    },
    LoanGranted {
        account_id: AccountId,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    LoanDropped {
        account_id: AccountId,
        amount: Money,
        timestamp: DateTime<Utc>,
    },

    // account lifecycle events
    AccountClosed {
        account_id: AccountId,
        username: String,
        timestamp: DateTime<Utc>,
    },
    CloseRejected {
        account_id: AccountId,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}
