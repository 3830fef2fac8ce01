pub mod interest;

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::{Account, Movement};
use crate::decimal::Money;
use crate::errors::{BankError, Result};
use crate::types::SortOrder;

pub use interest::{InterestEngine, InterestPolicy};

/// sum of all movements
pub fn balance(account: &Account) -> Money {
    account.transactions().sum()
}

/// sum of deposits
pub fn total_income(account: &Account) -> Money {
    account.transactions().filter(Money::is_positive).sum()
}

/// magnitude of the sum of withdrawals
pub fn total_expense(account: &Account) -> Money {
    account
        .transactions()
        .filter(Money::is_negative)
        .sum::<Money>()
        .abs()
}

/// deposit interest at the account's rate, counting only per-deposit
/// amounts that reach the policy minimum
pub fn total_qualifying_interest(account: &Account, policy: InterestPolicy) -> Money {
    InterestEngine::new(policy).account_interest(account)
}

/// income and expense totals; `None` when either leaves the decimal range
pub(crate) fn checked_totals(mut amounts: impl Iterator<Item = Money>) -> Option<(Money, Money)> {
    amounts.try_fold((Money::ZERO, Money::ZERO), |(income, expense), amount| {
        if amount.is_negative() {
            Some((income, expense.checked_add(amount.abs())?))
        } else {
            Some((income.checked_add(amount)?, expense))
        }
    })
}

/// fails when booking `amount` would push income or expense past the
/// decimal range. while both fit, every running balance fits as well
pub fn ensure_capacity(account: &Account, amount: Money) -> Result<()> {
    checked_totals(account.transactions().chain(std::iter::once(amount)))
        .map(|_| ())
        .ok_or(BankError::AmountOverflow { amount })
}

/// append a movement without touching the cached balance
pub fn record_transaction(account: &mut Account, amount: Money, date: DateTime<Utc>) {
    account.push_movement(Movement::new(amount, date));
}

/// recompute and cache the balance
pub fn refresh(account: &mut Account) -> Money {
    let balance = balance(account);
    account.set_cached_balance(balance);
    balance
}

/// movements in display order; the account itself is never reordered
///
/// sorting keeps every amount paired with its own date
pub fn display_sequence(account: &Account, order: SortOrder) -> Cow<'_, [Movement]> {
    match order {
        SortOrder::Original => Cow::Borrowed(account.movements()),
        SortOrder::Ascending => {
            let mut sorted = account.movements().to_vec();
            // stable, so equal amounts keep their booking order
            sorted.sort_by_key(|m| m.amount);
            Cow::Owned(sorted)
        }
    }
}

/// derived figures shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub balance: Money,
    pub income: Money,
    pub expense: Money,
    pub interest: Money,
}

impl AccountSummary {
    pub fn compute(account: &Account, policy: InterestPolicy) -> Self {
        Self {
            balance: balance(account),
            income: total_income(account),
            expense: total_expense(account),
            interest: total_qualifying_interest(account, policy),
        }
    }
}
