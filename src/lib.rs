pub mod account;
pub mod bank;
pub mod config;
pub mod decimal;
pub mod demo;
pub mod directory;
pub mod errors;
pub mod events;
pub mod format;
pub mod ledger;
pub mod session;
pub mod types;
pub mod views;

// re-export key types
pub use account::{Account, AccountBuilder, Movement};
pub use bank::Bank;
pub use config::{BankConfig, LoanPolicy, SessionConfig};
pub use decimal::{Money, Rate};
pub use directory::{Directory, LoanApproval, TransferReceipt};
pub use errors::{BankError, Result};
pub use events::{Event, EventStore, LogoutReason};
pub use format::{format_countdown, format_currency, format_date, format_relative_date};
pub use ledger::{AccountSummary, InterestEngine, InterestPolicy};
pub use session::{LogoutTimer, Scheduler, Session, TickOutcome};
pub use types::{AccountId, MovementKind, SortOrder, TimerStatus, UsernameStrategy};
pub use views::{DashboardView, MovementRow};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
