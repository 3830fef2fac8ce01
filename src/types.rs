use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for an account
pub type AccountId = Uuid;

/// how a login username is derived from the owner's name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UsernameStrategy {
    /// first letter of each name, lowercased ("Jessica Davis" -> "jd")
    Initials,
    /// the whole owner name, lowercased ("John" -> "john")
    #[default]
    FullLowercase,
}

impl UsernameStrategy {
    pub fn derive(&self, owner: &str) -> String {
        match self {
            UsernameStrategy::Initials => owner
                .split_whitespace()
                .filter_map(|name| name.chars().next())
                .flat_map(char::to_lowercase)
                .collect(),
            UsernameStrategy::FullLowercase => owner.trim().to_lowercase(),
        }
    }
}

/// direction of a single movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Deposit,
    Withdrawal,
}

impl MovementKind {
    pub fn label(&self) -> &'static str {
        match self {
            MovementKind::Deposit => "DEPOSIT",
            MovementKind::Withdrawal => "WITHDRAWAL",
        }
    }
}

/// order in which movements are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortOrder {
    /// insertion (chronological) order
    #[default]
    Original,
    /// ascending by amount
    Ascending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Original => SortOrder::Ascending,
            SortOrder::Ascending => SortOrder::Original,
        }
    }
}

/// logout timer status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerStatus {
    Idle,
    Running,
    Expired,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_strategies() {
        assert_eq!(UsernameStrategy::Initials.derive("Jonas Schmedtmann"), "js");
        assert_eq!(UsernameStrategy::Initials.derive("Steven Thomas Williams"), "stw");
        assert_eq!(UsernameStrategy::FullLowercase.derive("John"), "john");
        assert_eq!(UsernameStrategy::FullLowercase.derive("Sarah Smith"), "sarah smith");
    }

    #[test]
    fn test_sort_toggle() {
        assert_eq!(SortOrder::Original.toggled(), SortOrder::Ascending);
        assert_eq!(SortOrder::Ascending.toggled(), SortOrder::Original);
    }
}
