//! serializable dashboard output
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::config::BankConfig;
use crate::format::{format_currency, format_date_time, format_relative_date};
use crate::ledger::{display_sequence, AccountSummary};
use crate::session::Session;
use crate::types::{MovementKind, SortOrder};

/// one rendered movement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRow {
    /// 1-based position in the displayed sequence
    pub position: usize,
    pub kind: MovementKind,
    /// e.g. "3 DEPOSIT"
    pub label: String,
    pub date: String,
    pub amount: String,
}

/// everything the dashboard shows for the logged in account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    pub welcome: String,
    pub date_label: String,
    pub balance: String,
    pub income: String,
    pub expense: String,
    pub interest: String,
    /// newest first
    pub rows: Vec<MovementRow>,
    pub countdown: String,
    pub sort: SortOrder,
}

impl DashboardView {
    /// render with a single `now` shared by every row
    pub fn render(
        account: &Account,
        session: &Session,
        config: &BankConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let locale = account.locale.as_str();
        let currency = account.currency.as_str();
        let summary = AccountSummary::compute(account, config.interest);

        let rows = display_sequence(account, session.sort)
            .iter()
            .enumerate()
            .map(|(i, movement)| {
                let kind = movement.kind();
                MovementRow {
                    position: i + 1,
                    kind,
                    label: format!("{} {}", i + 1, kind.label()),
                    date: format_relative_date(movement.date, now, locale),
                    amount: format_currency(movement.amount, locale, currency),
                }
            })
            .rev()
            .collect();

        Self {
            welcome: format!("Welcome back, {}", account.first_name()),
            date_label: format_date_time(now, locale),
            balance: format_currency(summary.balance, locale, currency),
            income: format_currency(summary.income, locale, currency),
            expense: format_currency(summary.expense, locale, currency),
            interest: format_currency(summary.interest, locale, currency),
            rows,
            countdown: session.timer.label(),
            sort: session.sort,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Money, Rate};
    use crate::types::UsernameStrategy;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0).unwrap()
    }

    fn account() -> Account {
        Account::builder()
            .owner("Jessica Davis")
            .pin(2222)
            .interest_rate(Rate::from_percentage(dec!(1.5)))
            .currency("USD")
            .locale("en-US")
            .movement(Money::from(5000), now() - Duration::days(30))
            .movement(Money::from(-150), now() - Duration::days(3))
            .movement(Money::from(80), now() - Duration::hours(1))
            .build(UsernameStrategy::Initials)
            .unwrap()
    }

    #[test]
    fn test_render_dashboard() {
        let account = account();
        let mut session = Session::new(account.id, account.username.clone(), now(), 300);
        session.timer.start().unwrap();

        let view = DashboardView::render(&account, &session, &BankConfig::standard(), now());

        assert_eq!(view.welcome, "Welcome back, Jessica");
        assert_eq!(view.date_label, "5/10/2024, 9:30 AM");
        assert_eq!(view.balance, "$4,930.00");
        assert_eq!(view.income, "$5,080.00");
        assert_eq!(view.expense, "$150.00");
        // 75 from the 5000 deposit, 1.2 from the 80 deposit
        assert_eq!(view.interest, "$76.20");
        assert_eq!(view.countdown, "05:00");

        let labels: Vec<&str> = view.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["3 DEPOSIT", "2 WITHDRAWAL", "1 DEPOSIT"]);
        assert_eq!(view.rows[0].date, "Today");
        assert_eq!(view.rows[1].date, "3 days ago");
        assert_eq!(view.rows[2].date, "4/10/2024");
        assert_eq!(view.rows[1].amount, "-$150.00");
    }

    #[test]
    fn test_sorted_rows_keep_their_dates() {
        let account = account();
        let mut session = Session::new(account.id, account.username.clone(), now(), 300);
        session.sort = SortOrder::Ascending;

        let view = DashboardView::render(&account, &session, &BankConfig::standard(), now());

        // ascending is -150, 80, 5000; newest-first display reverses it
        let amounts: Vec<&str> = view.rows.iter().map(|r| r.amount.as_str()).collect();
        assert_eq!(amounts, vec!["$5,000.00", "$80.00", "-$150.00"]);
        assert_eq!(view.rows[0].date, "4/10/2024");
        assert_eq!(view.rows[1].date, "Today");
        assert_eq!(view.rows[2].date, "3 days ago");
        assert_eq!(view.sort, SortOrder::Ascending);
    }

    #[test]
    fn test_view_serializes() {
        let account = account();
        let session = Session::new(account.id, account.username.clone(), now(), 300);
        let view = DashboardView::render(&account, &session, &BankConfig::standard(), now());

        let json = view.to_json().unwrap();
        assert!(json.contains("\"welcome\": \"Welcome back, Jessica\""));
        assert!(json.contains("\"kind\": \"deposit\""));
    }
}
