use thiserror::Error;

use crate::decimal::Money;

/// every way a bank operation can be rejected
///
/// a rejection never leaves partial state behind: the directory, ledgers
/// and session are unchanged when one of these is returned
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("invalid credentials for user {username}")]
    InvalidCredentials {
        username: String,
    },

    #[error("no active session")]
    NoActiveSession,

    #[error("account not found: {username}")]
    AccountNotFound {
        username: String,
    },

    #[error("amount must be positive: {amount}")]
    NonPositiveAmount {
        amount: Money,
    },

    #[error("unknown recipient: {username}")]
    UnknownRecipient {
        username: String,
    },

    #[error("cannot transfer to own account")]
    SelfTransfer,

    #[error("insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds {
        available: Money,
        requested: Money,
    },

    #[error("loan of {requested} needs a movement of at least {required}")]
    NoQualifyingDeposit {
        requested: Money,
        required: Money,
    },

    #[error("booking {amount} would overflow the account totals")]
    AmountOverflow {
        amount: Money,
    },

    #[error("close rejected: credentials do not match the logged in account")]
    CloseCredentialsMismatch,

    #[error("logout timer already running")]
    TimerAlreadyRunning,

    #[error("duplicate username: {username}")]
    DuplicateUsername {
        username: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, BankError>;
