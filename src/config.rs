use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{BankError, Result};
use crate::ledger::InterestPolicy;
use crate::session::DEFAULT_TIMEOUT_SECS;
use crate::types::UsernameStrategy;

/// bank configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankConfig {
    pub session: SessionConfig,
    pub loan: LoanPolicy,
    pub interest: InterestPolicy,
    pub username_strategy: UsernameStrategy,
}

/// logout timer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// inactivity timeout in seconds
    pub timeout_secs: u32,
    /// seconds between countdown ticks
    pub tick_secs: u32,
}

/// rules for loan requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanPolicy {
    /// a loan needs one movement of at least this share of the amount
    pub qualifying_ratio: Rate,
    /// seconds between approval and credit; zero credits immediately
    pub grant_delay_secs: u32,
    /// round requested amounts down to whole units
    pub whole_units_only: bool,
}

impl LoanPolicy {
    /// the amount actually considered for a request
    pub fn normalize(&self, requested: Money) -> Money {
        if self.whole_units_only {
            requested.floor()
        } else {
            requested
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            tick_secs: 1,
        }
    }
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self {
            qualifying_ratio: Rate::from_percentage(dec!(10)),
            grant_delay_secs: 3,
            whole_units_only: true,
        }
    }
}

impl Default for BankConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl BankConfig {
    /// five minute sessions, loans credited after three seconds, full
    /// lowercase usernames
    pub fn standard() -> Self {
        Self {
            session: SessionConfig::default(),
            loan: LoanPolicy::default(),
            interest: InterestPolicy::default(),
            username_strategy: UsernameStrategy::FullLowercase,
        }
    }

    /// initials as usernames and loans credited on the spot
    pub fn initials_instant_loans() -> Self {
        Self {
            loan: LoanPolicy {
                grant_delay_secs: 0,
                ..LoanPolicy::default()
            },
            username_strategy: UsernameStrategy::Initials,
            ..Self::standard()
        }
    }

    /// parse and validate a json document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: BankConfig =
            serde_json::from_str(json).map_err(|e| BankError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| BankError::InvalidConfiguration {
            message: e.to_string(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.session.timeout_secs == 0 {
            return Err(BankError::InvalidConfiguration {
                message: "session timeout must be positive".to_string(),
            });
        }
        if self.session.tick_secs == 0 || self.session.tick_secs > self.session.timeout_secs {
            return Err(BankError::InvalidConfiguration {
                message: format!(
                    "tick period {}s must be between 1s and the timeout {}s",
                    self.session.tick_secs, self.session.timeout_secs
                ),
            });
        }
        if self.loan.qualifying_ratio < Rate::ZERO
            || self.loan.qualifying_ratio > Rate::from_percentage(dec!(100))
        {
            return Err(BankError::InvalidConfiguration {
                message: format!(
                    "loan qualifying ratio {} must be between 0% and 100%",
                    self.loan.qualifying_ratio
                ),
            });
        }
        if self.interest.minimum_interest.is_negative() {
            return Err(BankError::InvalidConfiguration {
                message: format!("negative minimum interest {}", self.interest.minimum_interest),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_defaults() {
        let config = BankConfig::standard();
        assert_eq!(config.session.timeout_secs, 300);
        assert_eq!(config.session.tick_secs, 1);
        assert_eq!(config.loan.grant_delay_secs, 3);
        assert_eq!(config.loan.qualifying_ratio, Rate::from_decimal(dec!(0.1)));
        assert_eq!(config.interest.minimum_interest, Money::ONE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip_keeps_presets() {
        let config = BankConfig::initials_instant_loans();
        let json = config.to_json().unwrap();
        assert_eq!(BankConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_from_json_validates() {
        let mut config = BankConfig::standard();
        config.session.timeout_secs = 0;
        let json = serde_json::to_string(&config).unwrap();
        assert!(matches!(
            BankConfig::from_json(&json),
            Err(BankError::InvalidConfiguration { .. })
        ));

        assert!(matches!(
            BankConfig::from_json("{ not json"),
            Err(BankError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_qualifying_ratio_is_bounded() {
        let mut config = BankConfig::standard();
        config.loan.qualifying_ratio = Rate::from_percentage(dec!(100));
        assert!(config.validate().is_ok());

        config.loan.qualifying_ratio = Rate::from_percentage(dec!(150));
        assert!(matches!(
            config.validate(),
            Err(BankError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_loan_normalization() {
        let floored = LoanPolicy::default();
        assert_eq!(floored.normalize(Money::from_decimal(dec!(99.99))), Money::from(99));

        let exact = LoanPolicy {
            whole_units_only: false,
            ..LoanPolicy::default()
        };
        assert_eq!(exact.normalize(Money::from_decimal(dec!(99.99))), Money::from_decimal(dec!(99.99)));
    }
}
