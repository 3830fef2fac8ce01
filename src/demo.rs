//! built-in demo accounts
use chrono::{DateTime, Utc};
use rust_decimal_macros::dec;

use crate::account::{Account, Movement};
use crate::decimal::{Money, Rate};
use crate::errors::{BankError, Result};
use crate::types::UsernameStrategy;

struct DemoAccount {
    owner: &'static str,
    pin: u32,
    rate_percent: rust_decimal::Decimal,
    currency: &'static str,
    locale: &'static str,
    movements: &'static [(&'static str, &'static str)],
}

const DEMO_ACCOUNTS: [DemoAccount; 2] = [
    DemoAccount {
        owner: "John",
        pin: 1111,
        rate_percent: dec!(1.2),
        currency: "EUR",
        locale: "pt-PT",
        movements: &[
            ("200", "2019-11-18T21:31:17.178Z"),
            ("455.23", "2019-12-23T07:42:02.383Z"),
            ("-306.5", "2020-01-28T09:15:04.904Z"),
            ("25000", "2020-04-01T10:17:24.185Z"),
            ("-642.21", "2020-05-08T14:11:59.604Z"),
            ("-133.9", "2022-01-01T17:01:17.194Z"),
            ("79.97", "2022-01-02T23:36:17.929Z"),
            ("1300", "2022-01-04T10:51:36.790Z"),
        ],
    },
    DemoAccount {
        owner: "Jessica",
        pin: 2222,
        rate_percent: dec!(1.5),
        currency: "USD",
        locale: "en-US",
        movements: &[
            ("5000", "2019-11-01T13:15:33.035Z"),
            ("3400", "2019-11-30T09:48:16.867Z"),
            ("-150", "2019-12-25T06:04:23.907Z"),
            ("-790", "2020-01-25T14:18:46.235Z"),
            ("-3210", "2020-02-05T16:33:06.386Z"),
            ("-1000", "2020-04-10T14:43:26.374Z"),
            ("8500", "2020-06-25T18:49:59.371Z"),
            ("-30", "2020-07-26T12:01:20.894Z"),
        ],
    },
];

fn parse_movement(amount: &str, date: &str) -> Result<Movement> {
    let amount = Money::from_str_exact(amount).map_err(|e| BankError::InvalidConfiguration {
        message: format!("bad demo amount {}: {}", amount, e),
    })?;
    let date = date
        .parse::<DateTime<Utc>>()
        .map_err(|e| BankError::InvalidConfiguration {
            message: format!("bad demo date {}: {}", date, e),
        })?;
    Ok(Movement::new(amount, date))
}

const CLASSIC_ACCOUNTS: [DemoAccount; 4] = [
    DemoAccount {
        owner: "Jonas Schmedtmann",
        pin: 1111,
        rate_percent: dec!(1.2),
        currency: "EUR",
        locale: "pt-PT",
        movements: &[
            ("200", "2019-11-18T21:31:17.178Z"),
            ("450", "2019-12-23T07:42:02.383Z"),
            ("-400", "2020-01-28T09:15:04.904Z"),
            ("3000", "2020-04-01T10:17:24.185Z"),
            ("-650", "2020-05-08T14:11:59.604Z"),
            ("-130", "2020-05-27T17:01:17.194Z"),
            ("70", "2020-07-11T23:36:17.929Z"),
            ("1300", "2020-07-12T10:51:36.790Z"),
        ],
    },
    DemoAccount {
        owner: "Jessica Davis",
        pin: 2222,
        rate_percent: dec!(1.5),
        currency: "USD",
        locale: "en-US",
        movements: &[
            ("5000", "2019-11-01T13:15:33.035Z"),
            ("3400", "2019-11-30T09:48:16.867Z"),
            ("-150", "2019-12-25T06:04:23.907Z"),
            ("-790", "2020-01-25T14:18:46.235Z"),
            ("-3210", "2020-02-05T16:33:06.386Z"),
            ("-1000", "2020-04-10T14:43:26.374Z"),
            ("8500", "2020-06-25T18:49:59.371Z"),
            ("-30", "2020-07-26T12:01:20.894Z"),
        ],
    },
    DemoAccount {
        owner: "Steven Thomas Williams",
        pin: 3333,
        rate_percent: dec!(0.7),
        currency: "EUR",
        locale: "de-DE",
        movements: &[
            ("200", "2019-10-02T08:12:44.112Z"),
            ("-200", "2019-10-19T19:40:01.530Z"),
            ("340", "2019-12-03T11:21:09.008Z"),
            ("-300", "2020-02-14T15:02:55.771Z"),
            ("-20", "2020-03-01T07:48:31.264Z"),
            ("50", "2020-05-20T20:05:18.400Z"),
            ("400", "2020-06-30T09:59:12.651Z"),
            ("-460", "2020-07-08T13:37:46.092Z"),
        ],
    },
    DemoAccount {
        owner: "Sarah Smith",
        pin: 4444,
        rate_percent: dec!(1),
        currency: "GBP",
        locale: "en-GB",
        movements: &[
            ("430", "2019-12-11T10:00:00.000Z"),
            ("1000", "2020-01-15T12:30:00.000Z"),
            ("700", "2020-03-02T16:45:00.000Z"),
            ("50", "2020-04-22T08:15:00.000Z"),
            ("90", "2020-06-05T18:20:00.000Z"),
        ],
    },
];

fn build_all(table: &[DemoAccount], strategy: UsernameStrategy) -> Result<Vec<Account>> {
    table
        .iter()
        .map(|demo| {
            let movements = demo
                .movements
                .iter()
                .map(|(amount, date)| parse_movement(amount, date))
                .collect::<Result<Vec<_>>>()?;

            Account::builder()
                .owner(demo.owner)
                .pin(demo.pin)
                .interest_rate(Rate::from_percentage(demo.rate_percent))
                .currency(demo.currency)
                .locale(demo.locale)
                .movements(movements)
                .build(strategy)
        })
        .collect()
}

/// the two single-name accounts ("john", "jessica")
pub fn demo_accounts(strategy: UsernameStrategy) -> Result<Vec<Account>> {
    build_all(&DEMO_ACCOUNTS, strategy)
}

/// four accounts with full names, suited to initials ("js", "jd", "stw", "ss")
pub fn classic_accounts(strategy: UsernameStrategy) -> Result<Vec<Account>> {
    build_all(&CLASSIC_ACCOUNTS, strategy)
}

/// the account set whose usernames stay unique under `strategy`
pub fn accounts_for(strategy: UsernameStrategy) -> Result<Vec<Account>> {
    match strategy {
        UsernameStrategy::FullLowercase => demo_accounts(strategy),
        UsernameStrategy::Initials => classic_accounts(strategy),
    }
}
