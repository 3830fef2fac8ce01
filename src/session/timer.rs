use serde::{Deserialize, Serialize};

use crate::errors::{BankError, Result};
use crate::types::TimerStatus;

/// default inactivity timeout, five minutes
pub const DEFAULT_TIMEOUT_SECS: u32 = 300;

/// result of a single countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// still counting, with the seconds left
    Running(u32),
    /// this tick reached zero; the session must be logged out
    Expired,
    /// the timer was not running
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum TimerState {
    Idle,
    Running { remaining: u32 },
    Expired,
}

/// inactivity countdown that logs the session out when it reaches zero
///
/// `Idle -> Running -> Expired`, with `reset` restarting a running
/// countdown and `cancel` returning to idle from any state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutTimer {
    timeout_secs: u32,
    state: TimerState,
}

impl LogoutTimer {
    pub fn new(timeout_secs: u32) -> Self {
        Self {
            timeout_secs,
            state: TimerState::Idle,
        }
    }

    pub fn timeout_secs(&self) -> u32 {
        self.timeout_secs
    }

    /// begin counting down from the full timeout
    ///
    /// a running timer must be cancelled or reset first
    pub fn start(&mut self) -> Result<()> {
        if let TimerState::Running { .. } = self.state {
            return Err(BankError::TimerAlreadyRunning);
        }
        self.state = TimerState::Running {
            remaining: self.timeout_secs,
        };
        Ok(())
    }

    /// one second elapsed
    pub fn tick(&mut self) -> TickOutcome {
        match self.state {
            TimerState::Running { remaining } => {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    self.state = TimerState::Expired;
                    TickOutcome::Expired
                } else {
                    self.state = TimerState::Running { remaining };
                    TickOutcome::Running(remaining)
                }
            }
            TimerState::Idle | TimerState::Expired => TickOutcome::Ignored,
        }
    }

    pub fn reset(&mut self) {
        self.cancel();
        self.state = TimerState::Running {
            remaining: self.timeout_secs,
        };
    }

    pub fn cancel(&mut self) {
        self.state = TimerState::Idle;
    }

    pub fn status(&self) -> TimerStatus {
        match self.state {
            TimerState::Idle => TimerStatus::Idle,
            TimerState::Running { .. } => TimerStatus::Running,
            TimerState::Expired => TimerStatus::Expired,
        }
    }

    /// seconds left; zero once expired or idle
    pub fn remaining(&self) -> u32 {
        match self.state {
            TimerState::Running { remaining } => remaining,
            TimerState::Idle | TimerState::Expired => 0,
        }
    }

    /// "MM:SS" of the time left
    pub fn label(&self) -> String {
        crate::format::format_countdown(self.remaining())
    }
}

impl Default for LogoutTimer {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_SECS)
    }
}
