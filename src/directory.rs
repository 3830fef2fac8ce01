use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::config::LoanPolicy;
use crate::decimal::Money;
use crate::errors::{BankError, Result};
use crate::ledger;
use crate::types::AccountId;

/// a completed transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Money,
    pub date: DateTime<Utc>,
}

/// an accepted loan request waiting to be credited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanApproval {
    pub account_id: AccountId,
    pub amount: Money,
}

/// every account known to the bank, in insertion order
///
/// serialized as a plain list; deserializing goes through `Directory::new`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Account>", into = "Vec<Account>")]
pub struct Directory {
    accounts: Vec<Account>,
}

impl TryFrom<Vec<Account>> for Directory {
    type Error = BankError;

    fn try_from(accounts: Vec<Account>) -> Result<Self> {
        Self::new(accounts)
    }
}

impl From<Directory> for Vec<Account> {
    fn from(directory: Directory) -> Self {
        directory.accounts
    }
}

impl Directory {
    /// usernames must be unique
    pub fn new(accounts: Vec<Account>) -> Result<Self> {
        let mut seen = HashSet::new();
        for account in &accounts {
            if !seen.insert(account.username.as_str()) {
                return Err(BankError::DuplicateUsername {
                    username: account.username.clone(),
                });
            }
        }
        Ok(Self { accounts })
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn find_by_username(&self, username: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.username == username)
    }

    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: AccountId) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.id == id)
    }

    fn position(&self, id: AccountId) -> Option<usize> {
        self.accounts.iter().position(|a| a.id == id)
    }

    /// plaintext pin comparison; there is no lockout
    pub fn authenticate(&self, username: &str, pin: u32) -> Result<&Account> {
        self.find_by_username(username)
            .filter(|a| a.pin == pin)
            .ok_or_else(|| BankError::InvalidCredentials {
                username: username.to_string(),
            })
    }

    /// remove the first account with this username
    pub fn close_account(&mut self, username: &str) -> Result<Account> {
        let index = self
            .accounts
            .iter()
            .position(|a| a.username == username)
            .ok_or_else(|| BankError::AccountNotFound {
                username: username.to_string(),
            })?;
        Ok(self.accounts.remove(index))
    }

    /// move `amount` from `from` to the account named `to_username`
    ///
    /// every check runs before either leg is booked, so a rejected
    /// transfer leaves the directory untouched. derived balances are not
    /// refreshed here
    pub fn transfer(
        &mut self,
        from: AccountId,
        to_username: &str,
        amount: Money,
        date: DateTime<Utc>,
    ) -> Result<TransferReceipt> {
        if !amount.is_positive() {
            return Err(BankError::NonPositiveAmount { amount });
        }

        let sender_index = self.position(from).ok_or(BankError::NoActiveSession)?;
        let receiver_index = self
            .accounts
            .iter()
            .position(|a| a.username == to_username)
            .ok_or_else(|| BankError::UnknownRecipient {
                username: to_username.to_string(),
            })?;

        if receiver_index == sender_index {
            return Err(BankError::SelfTransfer);
        }

        let available = ledger::balance(&self.accounts[sender_index]);
        if available < amount {
            return Err(BankError::InsufficientFunds {
                available,
                requested: amount,
            });
        }

        ledger::ensure_capacity(&self.accounts[sender_index], -amount)?;
        ledger::ensure_capacity(&self.accounts[receiver_index], amount)?;

        ledger::record_transaction(&mut self.accounts[sender_index], -amount, date);
        ledger::record_transaction(&mut self.accounts[receiver_index], amount, date);

        Ok(TransferReceipt {
            from,
            to: self.accounts[receiver_index].id,
            amount,
            date,
        })
    }

    /// check a loan request against `policy` without booking anything
    pub fn request_loan(
        &self,
        account_id: AccountId,
        requested: Money,
        policy: &LoanPolicy,
    ) -> Result<LoanApproval> {
        let account = self.get(account_id).ok_or(BankError::NoActiveSession)?;
        let amount = policy.normalize(requested);

        if !amount.is_positive() {
            return Err(BankError::NonPositiveAmount { amount });
        }

        ledger::ensure_capacity(account, amount)?;

        let required = amount.apply_rate(policy.qualifying_ratio);
        if !account.transactions().any(|m| m >= required) {
            return Err(BankError::NoQualifyingDeposit {
                requested: amount,
                required,
            });
        }

        Ok(LoanApproval { account_id, amount })
    }

    /// book an approved loan; fails if the account was closed meanwhile or
    /// the amount no longer fits its totals
    pub fn grant_loan(&mut self, approval: LoanApproval, date: DateTime<Utc>) -> Result<&Account> {
        let account = self
            .get_mut(approval.account_id)
            .ok_or_else(|| BankError::AccountNotFound {
                username: approval.account_id.to_string(),
            })?;
        ledger::ensure_capacity(account, approval.amount)?;
        ledger::record_transaction(account, approval.amount, date);
        ledger::refresh(account);
        Ok(account)
    }
}
