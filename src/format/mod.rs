pub mod locale;

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::decimal::Money;

pub use locale::{currency_symbol, DateOrder, LocaleFormat};

/// locale and currency aware amount, e.g. "-$306.50" or "25 000,00 €"
///
/// rounding happens on a copy; the amount itself is untouched
pub fn format_currency(amount: Money, locale: &str, currency: &str) -> String {
    let locale = LocaleFormat::lookup(locale);
    let (symbol, fraction_digits) = currency_symbol(currency, &locale);

    let rounded = amount.round_dp(fraction_digits).as_decimal();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let digits = format!("{:.*}", fraction_digits as usize, rounded.abs());

    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut number = locale.group_digits(integer);
    if let Some(fraction) = fraction {
        number.push(locale.decimal_separator);
        number.push_str(fraction);
    }

    let spaced = symbol.chars().all(|c| c.is_ascii_alphabetic());
    if locale.symbol_after {
        format!("{}{}\u{a0}{}", sign, number, symbol)
    } else if spaced {
        format!("{}{}\u{a0}{}", sign, symbol, number)
    } else {
        format!("{}{}{}", sign, symbol, number)
    }
}

/// short numeric date, e.g. "1/4/2022" (en-US) or "04/01/2022" (pt-PT)
pub fn format_date(date: DateTime<Utc>, locale: &str) -> String {
    let locale = LocaleFormat::lookup(locale);
    let (first, second) = match locale.date_order {
        DateOrder::MonthDayYear => (date.month(), date.day()),
        DateOrder::DayMonthYear => (date.day(), date.month()),
    };
    let sep = locale.date_separator;

    if locale.pad_date {
        format!("{:02}{sep}{:02}{sep}{}", first, second, date.year())
    } else {
        format!("{}{sep}{}{sep}{}", first, second, date.year())
    }
}

/// date and time label shown after login, e.g. "1/4/2022, 10:51 AM"
pub fn format_date_time(date: DateTime<Utc>, locale: &str) -> String {
    let conventions = LocaleFormat::lookup(locale);
    let time = if conventions.hour12 {
        let (pm, hour) = date.hour12();
        format!("{}:{:02} {}", hour, date.minute(), if pm { "PM" } else { "AM" })
    } else {
        format!("{:02}:{:02}", date.hour(), date.minute())
    };
    format!("{}{}{}", format_date(date, locale), conventions.date_time_separator, time)
}

/// "Today", "Yesterday", "N days ago" within a week, otherwise the short date
///
/// days are counted between calendar dates; `now` should be taken once per
/// render so every row agrees
pub fn format_relative_date(date: DateTime<Utc>, now: DateTime<Utc>, locale: &str) -> String {
    let days = (now.date_naive() - date.date_naive()).num_days().abs();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=7 => format!("{} days ago", days),
        _ => format_date(date, locale),
    }
}

/// "MM:SS"
pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn money(s: &str) -> Money {
        Money::from_str_exact(s).unwrap()
    }

    #[test]
    fn test_currency_en_us() {
        assert_eq!(format_currency(money("1300"), "en-US", "USD"), "$1,300.00");
        assert_eq!(format_currency(money("-306.5"), "en-US", "USD"), "-$306.50");
        assert_eq!(format_currency(money("0.959"), "en-US", "USD"), "$0.96");
        assert_eq!(format_currency(Money::ZERO, "en-US", "USD"), "$0.00");
        assert_eq!(format_currency(money("25000"), "en-US", "EUR"), "€25,000.00");
    }

    #[test]
    fn test_currency_european_locales() {
        assert_eq!(format_currency(money("1300"), "pt-PT", "EUR"), "1300,00\u{a0}€");
        assert_eq!(format_currency(money("25000"), "pt-PT", "EUR"), "25\u{a0}000,00\u{a0}€");
        assert_eq!(format_currency(money("-642.21"), "pt-PT", "EUR"), "-642,21\u{a0}€");
        assert_eq!(format_currency(money("1300"), "de-DE", "EUR"), "1.300,00\u{a0}€");
    }

    #[test]
    fn test_currency_edge_cases() {
        assert_eq!(format_currency(money("1234.5"), "en-US", "JPY"), "¥1,235");
        assert_eq!(format_currency(money("12"), "en-US", "CHF"), "CHF\u{a0}12.00");
        // tiny negatives round to zero without a sign
        assert_eq!(format_currency(money("-0.001"), "en-US", "USD"), "$0.00");
    }

    #[test]
    fn test_formatting_leaves_amount_untouched() {
        let amount = Money::from_decimal(dec!(5.46276));
        let _ = format_currency(amount, "en-US", "USD");
        assert_eq!(amount.as_decimal(), dec!(5.46276));
    }

    #[test]
    fn test_absolute_dates() {
        let date = Utc.with_ymd_and_hms(2022, 1, 4, 10, 51, 36).unwrap();
        assert_eq!(format_date(date, "en-US"), "1/4/2022");
        assert_eq!(format_date(date, "pt-PT"), "04/01/2022");
        assert_eq!(format_date(date, "de-DE"), "4.1.2022");
        assert_eq!(format_date(date, "en-GB"), "04/01/2022");
    }

    #[test]
    fn test_date_time_labels() {
        let date = Utc.with_ymd_and_hms(2022, 1, 4, 10, 51, 36).unwrap();
        assert_eq!(format_date_time(date, "en-US"), "1/4/2022, 10:51 AM");
        assert_eq!(format_date_time(date, "pt-PT"), "04/01/2022, 10:51");

        let midnight = Utc.with_ymd_and_hms(2022, 1, 4, 0, 5, 0).unwrap();
        assert_eq!(format_date_time(midnight, "en-US"), "1/4/2022, 12:05 AM");
        let evening = Utc.with_ymd_and_hms(2022, 1, 4, 18, 0, 0).unwrap();
        assert_eq!(format_date_time(evening, "en-US"), "1/4/2022, 6:00 PM");
    }

    #[test]
    fn test_relative_dates() {
        let now = Utc.with_ymd_and_hms(2022, 1, 10, 8, 0, 0).unwrap();

        assert_eq!(format_relative_date(now - Duration::hours(9), now, "en-US"), "Yesterday");
        assert_eq!(format_relative_date(now - Duration::hours(1), now, "en-US"), "Today");
        assert_eq!(format_relative_date(now - Duration::days(1), now, "en-US"), "Yesterday");
        assert_eq!(format_relative_date(now - Duration::days(2), now, "en-US"), "2 days ago");
        assert_eq!(format_relative_date(now - Duration::days(7), now, "en-US"), "7 days ago");
        assert_eq!(format_relative_date(now - Duration::days(8), now, "en-US"), "1/2/2022");
        assert_eq!(format_relative_date(now - Duration::days(8), now, "pt-PT"), "02/01/2022");
    }

    #[test]
    fn test_countdown() {
        assert_eq!(format_countdown(300), "05:00");
        assert_eq!(format_countdown(59), "00:59");
        assert_eq!(format_countdown(0), "00:00");
        assert_eq!(format_countdown(3_600), "60:00");
    }
}
