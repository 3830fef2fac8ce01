use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::decimal::{Money, Rate};

/// interest paid on deposits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestPolicy {
    /// per-deposit interest below this amount is not paid
    pub minimum_interest: Money,
}

impl Default for InterestPolicy {
    fn default() -> Self {
        Self {
            minimum_interest: Money::ONE,
        }
    }
}

/// engine for computing deposit interest
pub struct InterestEngine {
    pub policy: InterestPolicy,
}

impl InterestEngine {
    pub fn new(policy: InterestPolicy) -> Self {
        Self { policy }
    }

    /// interest each deposit would earn at `rate`, before the minimum is applied
    pub fn candidates<'a>(
        &self,
        amounts: impl Iterator<Item = Money> + 'a,
        rate: Rate,
    ) -> impl Iterator<Item = Money> + 'a {
        amounts
            .filter(Money::is_positive)
            .map(move |deposit| deposit.apply_rate(rate))
    }

    /// sum of the per-deposit interest amounts that reach the minimum
    ///
    /// zero when no deposit qualifies
    pub fn qualifying_interest(&self, amounts: impl Iterator<Item = Money>, rate: Rate) -> Money {
        let minimum = self.policy.minimum_interest;
        self.candidates(amounts, rate)
            .filter(|interest| *interest >= minimum)
            .sum()
    }

    pub fn account_interest(&self, account: &Account) -> Money {
        self.qualifying_interest(account.transactions(), account.interest_rate)
    }
}
