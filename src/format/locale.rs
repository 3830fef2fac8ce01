/// order of the numeric date fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    MonthDayYear,
    DayMonthYear,
}

/// number and date conventions for one locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleFormat {
    pub tag: &'static str,
    pub decimal_separator: char,
    pub group_separator: char,
    /// integer digits needed before the first group separator appears,
    /// beyond the first group of three
    pub min_grouping_digits: usize,
    pub symbol_after: bool,
    pub date_order: DateOrder,
    pub date_separator: char,
    pub pad_date: bool,
    pub date_time_separator: &'static str,
    pub hour12: bool,
}

const NBSP: char = '\u{a0}';
const NARROW_NBSP: char = '\u{202f}';

pub const EN_US: LocaleFormat = LocaleFormat {
    tag: "en-US",
    decimal_separator: '.',
    group_separator: ',',
    min_grouping_digits: 1,
    symbol_after: false,
    date_order: DateOrder::MonthDayYear,
    date_separator: '/',
    pad_date: false,
    date_time_separator: ", ",
    hour12: true,
};

pub const EN_GB: LocaleFormat = LocaleFormat {
    tag: "en-GB",
    date_order: DateOrder::DayMonthYear,
    pad_date: true,
    hour12: false,
    ..EN_US
};

pub const PT_PT: LocaleFormat = LocaleFormat {
    tag: "pt-PT",
    decimal_separator: ',',
    group_separator: NBSP,
    min_grouping_digits: 2,
    symbol_after: true,
    date_order: DateOrder::DayMonthYear,
    date_separator: '/',
    pad_date: true,
    date_time_separator: ", ",
    hour12: false,
};

pub const DE_DE: LocaleFormat = LocaleFormat {
    tag: "de-DE",
    decimal_separator: ',',
    group_separator: '.',
    min_grouping_digits: 1,
    symbol_after: true,
    date_order: DateOrder::DayMonthYear,
    date_separator: '.',
    pad_date: false,
    date_time_separator: ", ",
    hour12: false,
};

pub const FR_FR: LocaleFormat = LocaleFormat {
    tag: "fr-FR",
    group_separator: NARROW_NBSP,
    date_separator: '/',
    pad_date: true,
    date_time_separator: " ",
    ..DE_DE
};

pub const ES_ES: LocaleFormat = LocaleFormat {
    tag: "es-ES",
    min_grouping_digits: 2,
    date_separator: '/',
    ..DE_DE
};

const KNOWN: [LocaleFormat; 6] = [EN_US, EN_GB, PT_PT, DE_DE, FR_FR, ES_ES];

impl LocaleFormat {
    /// exact tag first, then the first locale sharing the language, then en-US
    pub fn lookup(tag: &str) -> LocaleFormat {
        if let Some(found) = KNOWN.iter().find(|l| l.tag.eq_ignore_ascii_case(tag)) {
            return *found;
        }
        let language = tag.split(['-', '_']).next().unwrap_or(tag);
        KNOWN
            .iter()
            .find(|l| {
                l.tag
                    .split('-')
                    .next()
                    .is_some_and(|lang| lang.eq_ignore_ascii_case(language))
            })
            .copied()
            .unwrap_or(EN_US)
    }

    /// separate thousands in a string of integer digits
    pub fn group_digits(&self, digits: &str) -> String {
        if digits.len() < 3 + self.min_grouping_digits {
            return digits.to_string();
        }

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        let lead = digits.len() % 3;
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (i + 3 - lead) % 3 == 0 {
                grouped.push(self.group_separator);
            }
            grouped.push(ch);
        }
        grouped
    }
}

/// symbol and fraction digits for a currency as shown in `locale`
pub fn currency_symbol(code: &str, locale: &LocaleFormat) -> (String, u32) {
    match code.to_ascii_uppercase().as_str() {
        "USD" if locale.tag == "en-US" => ("$".to_string(), 2),
        "USD" if locale.tag == "pt-PT" => ("US$".to_string(), 2),
        "USD" => ("$".to_string(), 2),
        "EUR" => ("€".to_string(), 2),
        "GBP" => ("£".to_string(), 2),
        "JPY" => ("¥".to_string(), 0),
        other => (other.to_string(), 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(LocaleFormat::lookup("pt-PT"), PT_PT);
        assert_eq!(LocaleFormat::lookup("de-de"), DE_DE);
        assert_eq!(LocaleFormat::lookup("de-AT"), DE_DE);
        assert_eq!(LocaleFormat::lookup("en"), EN_US);
        assert_eq!(LocaleFormat::lookup("xx-YY"), EN_US);
    }

    #[test]
    fn test_grouping() {
        assert_eq!(EN_US.group_digits("1300"), "1,300");
        assert_eq!(EN_US.group_digits("25000"), "25,000");
        assert_eq!(EN_US.group_digits("1234567"), "1,234,567");
        assert_eq!(EN_US.group_digits("999"), "999");

        // four digit numbers stay together in pt-PT
        assert_eq!(PT_PT.group_digits("1300"), "1300");
        assert_eq!(PT_PT.group_digits("25000"), "25\u{a0}000");
        assert_eq!(DE_DE.group_digits("1300"), "1.300");
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(currency_symbol("usd", &EN_US), ("$".to_string(), 2));
        assert_eq!(currency_symbol("USD", &PT_PT), ("US$".to_string(), 2));
        assert_eq!(currency_symbol("JPY", &EN_US), ("¥".to_string(), 0));
        assert_eq!(currency_symbol("CHF", &DE_DE), ("CHF".to_string(), 2));
    }
}
