use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Replaces amounts while privacy mode is on.
pub const PRIVACY_MASK: &str = "****";

/// Display currencies supported by the app.
///
/// Unknown codes fall back to US dollars rather than failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CurrencyCode {
    #[default]
    Usd,
    Pkr,
    Eur,
    Gbp,
}

impl CurrencyCode {
    pub fn parse(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "PKR" => CurrencyCode::Pkr,
            "EUR" => CurrencyCode::Eur,
            "GBP" => CurrencyCode::Gbp,
            _ => CurrencyCode::Usd,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            CurrencyCode::Usd => "USD",
            CurrencyCode::Pkr => "PKR",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Gbp => "GBP",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CurrencyCode::Usd => "$",
            CurrencyCode::Pkr => "₨",
            CurrencyCode::Eur => "€",
            CurrencyCode::Gbp => "£",
        }
    }
}

impl From<String> for CurrencyCode {
    fn from(code: String) -> Self {
        CurrencyCode::parse(&code)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.code().to_string()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Symbol followed by the grouped absolute value with two decimals: `$1,234.50`.
///
/// The sign is dropped; callers show direction separately.
pub fn format_amount(amount: f64, currency: CurrencyCode) -> String {
    format!("{}{}", currency.symbol(), format_number(amount.abs()))
}

/// Like [`format_amount`] but prefixed with `+` or `-`.
///
/// Amounts that round to zero cents get no sign.
pub fn format_signed(amount: f64, currency: CurrencyCode) -> String {
    let sign = if (amount * 100.0).round() == 0.0 {
        ""
    } else if amount < 0.0 {
        "-"
    } else {
        "+"
    };
    format!("{}{}", sign, format_amount(amount, currency))
}

pub fn format_percentage(value: f64) -> String {
    format!("{}%", value.round())
}

fn format_number(value: f64) -> String {
    let body = format!("{:.2}", value);
    match body.split_once('.') {
        Some((int_part, fraction)) => format!("{}.{}", group_digits(int_part, ','), fraction),
        None => group_digits(&body, ','),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats amounts for display, honouring the privacy toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoneyFormatter {
    pub currency: CurrencyCode,
    pub privacy_mode: bool,
}

impl MoneyFormatter {
    pub fn new(currency: CurrencyCode, privacy_mode: bool) -> Self {
        Self {
            currency,
            privacy_mode,
        }
    }

    pub fn amount(&self, amount: f64) -> String {
        if self.privacy_mode {
            PRIVACY_MASK.to_string()
        } else {
            format_amount(amount, self.currency)
        }
    }

    pub fn signed(&self, amount: f64) -> String {
        if self.privacy_mode {
            PRIVACY_MASK.to_string()
        } else {
            format_signed(amount, self.currency)
        }
    }
}

/// `05 Jan 2025`.
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        month_label(date.month()),
        date.year()
    )
}

pub fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    match timestamp {
        Some(instant) => format_date(instant.date_naive()),
        None => "no date".to_string(),
    }
}

pub fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_digits("1", ','), "1");
        assert_eq!(group_digits("123", ','), "123");
        assert_eq!(group_digits("1234", ','), "1,234");
        assert_eq!(group_digits("1234567", ','), "1,234,567");
    }

    #[test]
    fn unknown_codes_fall_back_to_usd() {
        assert_eq!(CurrencyCode::parse("jpy"), CurrencyCode::Usd);
        assert_eq!(CurrencyCode::parse(" gbp "), CurrencyCode::Gbp);
        let parsed: CurrencyCode = serde_json::from_str("\"XYZ\"").unwrap();
        assert_eq!(parsed, CurrencyCode::Usd);
        assert_eq!(serde_json::to_string(&CurrencyCode::Pkr).unwrap(), "\"PKR\"");
    }

    #[test]
    fn zero_cents_carry_no_sign() {
        assert_eq!(format_signed(0.0, CurrencyCode::Usd), "$0.00");
        assert_eq!(format_signed(-0.0, CurrencyCode::Usd), "$0.00");
        assert_eq!(format_signed(-0.004, CurrencyCode::Usd), "$0.00");
        assert_eq!(format_signed(0.004, CurrencyCode::Gbp), "£0.00");
        assert_eq!(format_signed(-0.006, CurrencyCode::Usd), "-$0.01");
        assert_eq!(format_signed(0.01, CurrencyCode::Usd), "+$0.01");
    }
}
