use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{BankError, Result};
use crate::types::{AccountId, MovementKind, UsernameStrategy};

/// a single signed amount and the moment it was booked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub amount: Money,
    pub date: DateTime<Utc>,
}

impl Movement {
    pub fn new(amount: Money, date: DateTime<Utc>) -> Self {
        Self { amount, date }
    }

    /// zero counts as a withdrawal, matching the dashboard's two columns
    pub fn kind(&self) -> MovementKind {
        if self.amount.is_positive() {
            MovementKind::Deposit
        } else {
            MovementKind::Withdrawal
        }
    }
}

/// a demo bank account
///
/// amounts and their timestamps live together in `movements`, so the
/// transaction and timestamp views always have the same length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub owner: String,
    pub username: String,
    pub pin: u32,
    pub interest_rate: Rate,
    pub currency: String,
    pub locale: String,
    movements: Vec<Movement>,
    cached_balance: Money,
}

impl Account {
    pub fn builder() -> AccountBuilder {
        AccountBuilder::new()
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    /// signed amounts in insertion order
    pub fn transactions(&self) -> impl Iterator<Item = Money> + '_ {
        self.movements.iter().map(|m| m.amount)
    }

    /// booking timestamps, parallel to `transactions`
    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.movements.iter().map(|m| m.date)
    }

    /// balance as of the last refresh
    pub fn cached_balance(&self) -> Money {
        self.cached_balance
    }

    /// first word of the owner name, used for the welcome line
    pub fn first_name(&self) -> &str {
        self.owner.split_whitespace().next().unwrap_or("")
    }

    /// append a movement; the cached balance is left stale until `refresh`
    pub(crate) fn push_movement(&mut self, movement: Movement) {
        self.movements.push(movement);
    }

    pub(crate) fn set_cached_balance(&mut self, balance: Money) {
        self.cached_balance = balance;
    }
}

/// builder for accounts
#[derive(Debug, Default)]
pub struct AccountBuilder {
    owner: Option<String>,
    pin: Option<u32>,
    interest_rate: Option<Rate>,
    currency: Option<String>,
    locale: Option<String>,
    movements: Vec<Movement>,
}

impl AccountBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn pin(mut self, pin: u32) -> Self {
        self.pin = Some(pin);
        self
    }

    pub fn interest_rate(mut self, rate: Rate) -> Self {
        self.interest_rate = Some(rate);
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn movement(mut self, amount: Money, date: DateTime<Utc>) -> Self {
        self.movements.push(Movement::new(amount, date));
        self
    }

    pub fn movements(mut self, movements: impl IntoIterator<Item = Movement>) -> Self {
        self.movements.extend(movements);
        self
    }

    /// build the account, deriving its username with `strategy`
    pub fn build(self, strategy: UsernameStrategy) -> Result<Account> {
        let owner = self.owner
            .filter(|o| !o.trim().is_empty())
            .ok_or(BankError::InvalidConfiguration {
                message: "account owner is required".to_string(),
            })?;
        let pin = self.pin.ok_or(BankError::InvalidConfiguration {
            message: format!("pin is required for {}", owner),
        })?;

        if crate::ledger::checked_totals(self.movements.iter().map(|m| m.amount)).is_none() {
            return Err(BankError::InvalidConfiguration {
                message: format!("movements of {} exceed the decimal range", owner),
            });
        }

        let interest_rate = self.interest_rate.unwrap_or(Rate::ZERO);
        if interest_rate < Rate::ZERO || interest_rate > Rate::from_percentage(Decimal::ONE_HUNDRED) {
            return Err(BankError::InvalidConfiguration {
                message: format!("interest rate {} of {} must be between 0% and 100%", interest_rate, owner),
            });
        }

        let username = strategy.derive(&owner);
        let cached_balance = self.movements.iter().map(|m| m.amount).sum();

        Ok(Account {
            id: Uuid::new_v4(),
            username,
            owner,
            pin,
            interest_rate,
            currency: self.currency.unwrap_or_else(|| "USD".to_string()),
            locale: self.locale.unwrap_or_else(|| "en-US".to_string()),
            movements: self.movements,
            cached_balance,
        })
    }
}
