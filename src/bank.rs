use chrono::{DateTime, Duration, Utc};
use hourglass_rs::SafeTimeProvider;

use crate::account::Account;
use crate::config::BankConfig;
use crate::decimal::Money;
use crate::demo;
use crate::directory::{Directory, LoanApproval, TransferReceipt};
use crate::errors::{BankError, Result};
use crate::events::{Event, EventStore, LogoutReason};
use crate::ledger;
use crate::session::{BankTask, FiredTask, Scheduler, Session, TaskHandle, TickOutcome};
use crate::types::{AccountId, SortOrder};
use crate::views::DashboardView;

/// the session controller: owns every piece of application state
///
/// all user actions and clock advances go through here, one at a time.
/// each action first runs whatever scheduled work fell due before it, so an
/// expired session is gone and overdue loans are booked before the action
pub struct Bank {
    pub config: BankConfig,
    directory: Directory,
    session: Option<Session>,
    scheduler: Scheduler<BankTask>,
    pub events: EventStore,
}

impl Bank {
    pub fn new(config: BankConfig, directory: Directory) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            directory,
            session: None,
            scheduler: Scheduler::new(),
            events: EventStore::new(),
        })
    }

    /// bank preloaded with the demo accounts matching the username strategy
    pub fn with_demo_accounts(config: BankConfig) -> Result<Self> {
        let accounts = demo::accounts_for(config.username_strategy)?;
        let directory = Directory::new(accounts)?;
        Self::new(config, directory)
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn current_account(&self) -> Option<&Account> {
        self.session
            .as_ref()
            .and_then(|s| self.directory.get(s.account_id))
    }

    fn current_id(&self) -> Result<AccountId> {
        self.session
            .as_ref()
            .map(|s| s.account_id)
            .ok_or(BankError::NoActiveSession)
    }

    /// authenticate and open a fresh session
    ///
    /// a failed login leaves any existing session running
    pub fn login(&mut self, username: &str, pin: u32, time: &SafeTimeProvider) -> Result<&Account> {
        let now = time.now();
        self.catch_up(now)?;

        let (account_id, username) = match self.directory.authenticate(username, pin) {
            Ok(account) => (account.id, account.username.clone()),
            Err(err) => {
                tracing::warn!(username, "login rejected");
                self.events.emit(Event::LoginRejected {
                    username: username.to_string(),
                    timestamp: now,
                });
                return Err(err);
            }
        };

        self.end_session(LogoutReason::Replaced, now);

        self.session = Some(Session::new(
            account_id,
            username.clone(),
            now,
            self.config.session.timeout_secs,
        ));
        self.start_timer(now)?;

        let account = self
            .directory
            .get_mut(account_id)
            .ok_or(BankError::NoActiveSession)?;
        ledger::refresh(account);

        tracing::info!(%account_id, username = %username, "logged in");
        self.events.emit(Event::LoggedIn {
            account_id,
            username,
            timestamp: now,
        });

        self.directory.get(account_id).ok_or(BankError::NoActiveSession)
    }

    pub fn logout(&mut self, time: &SafeTimeProvider) -> Result<()> {
        let now = time.now();
        self.catch_up(now)?;
        if self.session.is_none() {
            return Err(BankError::NoActiveSession);
        }
        self.end_session(LogoutReason::Requested, now);
        Ok(())
    }

    /// send money from the logged in account
    pub fn transfer(
        &mut self,
        to_username: &str,
        amount: Money,
        time: &SafeTimeProvider,
    ) -> Result<TransferReceipt> {
        let now = time.now();
        self.catch_up(now)?;
        let from = self.current_id()?;

        let receipt = match self.directory.transfer(from, to_username, amount, now) {
            Ok(receipt) => receipt,
            Err(err) => {
                tracing::warn!(%from, to = to_username, %amount, error = %err, "transfer rejected");
                self.events.emit(Event::TransferRejected {
                    from,
                    to_username: to_username.to_string(),
                    amount,
                    reason: err.to_string(),
                    timestamp: now,
                });
                return Err(err);
            }
        };

        for id in [receipt.from, receipt.to] {
            if let Some(account) = self.directory.get_mut(id) {
                ledger::refresh(account);
            }
        }

        tracing::info!(%from, to = %receipt.to, %amount, "transfer completed");
        self.events.emit(Event::TransferCompleted {
            from: receipt.from,
            to: receipt.to,
            amount,
            timestamp: now,
        });

        self.reset_timer(now)?;
        Ok(receipt)
    }

    /// ask for a loan on the logged in account
    ///
    /// an accepted loan is credited after the configured delay, or right
    /// away when the delay is zero
    pub fn request_loan(&mut self, amount: Money, time: &SafeTimeProvider) -> Result<LoanApproval> {
        let now = time.now();
        self.catch_up(now)?;
        let account_id = self.current_id()?;

        let approval = match self.directory.request_loan(account_id, amount, &self.config.loan) {
            Ok(approval) => approval,
            Err(err) => {
                tracing::warn!(%account_id, %amount, error = %err, "loan rejected");
                self.events.emit(Event::LoanRejected {
                    account_id,
                    amount,
                    reason: err.to_string(),
                    timestamp: now,
                });
                return Err(err);
            }
        };

        let grant_at = now + Duration::seconds(i64::from(self.config.loan.grant_delay_secs));
        self.events.emit(Event::LoanRequested {
            account_id,
            amount: approval.amount,
            grant_at,
        });

        if self.config.loan.grant_delay_secs == 0 {
            self.grant_loan(approval, now)?;
        } else {
            tracing::debug!(%account_id, amount = %approval.amount, %grant_at, "loan scheduled");
            self.scheduler.schedule_once(
                grant_at,
                BankTask::LoanGrant {
                    account_id,
                    amount: approval.amount,
                    requested_at: now,
                },
            );
        }

        Ok(approval)
    }

    /// close the logged in account; username and pin must both match it
    pub fn close_account(
        &mut self,
        username: &str,
        pin: u32,
        time: &SafeTimeProvider,
    ) -> Result<Account> {
        let now = time.now();
        self.catch_up(now)?;
        let account_id = self.current_id()?;

        let matches = self
            .directory
            .get(account_id)
            .is_some_and(|a| a.username == username && a.pin == pin);
        if !matches {
            tracing::warn!(%account_id, "close rejected");
            self.events.emit(Event::CloseRejected {
                account_id,
                timestamp: now,
            });
            return Err(BankError::CloseCredentialsMismatch);
        }

        let closed = self.directory.close_account(username)?;
        self.end_session(LogoutReason::AccountClosed, now);

        tracing::info!(%account_id, username, "account closed");
        self.events.emit(Event::AccountClosed {
            account_id,
            username: username.to_string(),
            timestamp: now,
        });

        Ok(closed)
    }

    /// flip between insertion and ascending order
    pub fn toggle_sort(&mut self, time: &SafeTimeProvider) -> Result<SortOrder> {
        self.catch_up(time.now())?;
        let session = self.session.as_mut().ok_or(BankError::NoActiveSession)?;
        session.sort = session.sort.toggled();

        let (account_id, order) = (session.account_id, session.sort);
        self.events.emit(Event::SortToggled { account_id, order });
        Ok(order)
    }

    /// run every scheduled task due by now, in due order
    ///
    /// returns how many tasks ran
    pub fn advance(&mut self, time: &SafeTimeProvider) -> Result<usize> {
        self.catch_up(time.now())
    }

    fn catch_up(&mut self, now: DateTime<Utc>) -> Result<usize> {
        let mut ran = 0;
        while let Some(task) = self.scheduler.pop_due(now) {
            self.run_task(task)?;
            ran += 1;
        }
        Ok(ran)
    }

    /// dashboard for the logged in account, rendered after due work has run
    pub fn dashboard(&mut self, time: &SafeTimeProvider) -> Result<DashboardView> {
        let now = time.now();
        self.catch_up(now)?;
        let session = self.session.as_ref().ok_or(BankError::NoActiveSession)?;
        let account = self
            .directory
            .get(session.account_id)
            .ok_or(BankError::NoActiveSession)?;
        Ok(DashboardView::render(account, session, &self.config, now))
    }

    /// "MM:SS" left before the automatic logout
    pub fn countdown(&self) -> Option<String> {
        self.session.as_ref().map(|s| s.timer.label())
    }

    /// number of pending scheduled tasks
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    fn run_task(&mut self, task: FiredTask<BankTask>) -> Result<()> {
        match task.payload {
            BankTask::SessionTick => self.on_tick(task.handle, task.due_at),
            BankTask::LoanGrant {
                account_id,
                amount,
                requested_at,
            } => {
                tracing::debug!(%account_id, %amount, %requested_at, "loan grant due");
                self.grant_loan(LoanApproval { account_id, amount }, task.due_at)
            }
        }
    }

    fn on_tick(&mut self, handle: TaskHandle, at: DateTime<Utc>) -> Result<()> {
        let tick_secs = self.config.session.tick_secs;

        let Some(session) = self.session.as_mut().filter(|s| s.tick_task() == Some(handle)) else {
            // a countdown left over from an ended session
            self.scheduler.cancel(handle);
            return Ok(());
        };

        let mut expired = false;
        for _ in 0..tick_secs {
            match session.timer.tick() {
                TickOutcome::Expired => {
                    expired = true;
                    break;
                }
                TickOutcome::Running(_) | TickOutcome::Ignored => {}
            }
        }

        if expired {
            tracing::info!(account_id = %session.account_id, "session expired");
            self.end_session(LogoutReason::Expired, at);
        }
        Ok(())
    }

    fn grant_loan(&mut self, approval: LoanApproval, at: DateTime<Utc>) -> Result<()> {
        let granted = self.directory.grant_loan(approval, at).map(|_| ());
        match granted {
            Ok(()) => {
                tracing::info!(account_id = %approval.account_id, amount = %approval.amount, "loan granted");
                self.events.emit(Event::LoanGranted {
                    account_id: approval.account_id,
                    amount: approval.amount,
                    timestamp: at,
                });

                let logged_in = self
                    .session
                    .as_ref()
                    .is_some_and(|s| s.account_id == approval.account_id);
                if logged_in {
                    self.reset_timer(at)?;
                }
            }
            Err(err) => {
                tracing::warn!(account_id = %approval.account_id, error = %err, "loan dropped");
                self.events.emit(Event::LoanDropped {
                    account_id: approval.account_id,
                    amount: approval.amount,
                    timestamp: at,
                });
            }
        }
        Ok(())
    }

    /// cancel the running countdown task, then start a new one
    fn start_timer(&mut self, now: DateTime<Utc>) -> Result<()> {
        let tick = Duration::seconds(i64::from(self.config.session.tick_secs));
        let session = self.session.as_mut().ok_or(BankError::NoActiveSession)?;

        if let Some(previous) = session.replace_tick_task(None) {
            self.scheduler.cancel(previous);
        }

        session.timer.cancel();
        session.timer.start()?;

        let handle = self
            .scheduler
            .schedule_every(now + tick, tick, BankTask::SessionTick)?;
        session.replace_tick_task(Some(handle));
        Ok(())
    }

    fn reset_timer(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.start_timer(now)?;
        if let Some(session) = &self.session {
            tracing::debug!(account_id = %session.account_id, "logout timer reset");
            self.events.emit(Event::TimerReset {
                account_id: session.account_id,
                timestamp: now,
            });
        }
        Ok(())
    }

    fn end_session(&mut self, reason: LogoutReason, at: DateTime<Utc>) {
        let Some(mut session) = self.session.take() else {
            return;
        };

        if let Some(handle) = session.replace_tick_task(None) {
            self.scheduler.cancel(handle);
        }
        session.timer.cancel();

        tracing::info!(account_id = %session.account_id, ?reason, "logged out");
        self.events.emit(Event::LoggedOut {
            account_id: session.account_id,
            reason,
            timestamp: at,
        });
    }
}
