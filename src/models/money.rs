//! Money type for representing statement amounts
//!
//! Internally stores amounts in pence (i64) so that parsing and formatting
//! never go through floating point. Statement cells carry at most two
//! fractional digits; anything finer is rejected rather than rounded.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg};

/// A signed monetary amount stored as minor units (hundredths)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use santander_csv::models::Money;
    /// let amount = Money::from_cents(4250); // 42.50
    /// assert_eq!(amount.to_string(), "42.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in minor units
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the fractional portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse an amount as it appears in a statement cell
    ///
    /// Accepts an optional sign (or accounting parentheses), an optional
    /// currency symbol, thousands separators and up to two fractional digits:
    /// "42.50", "-50", "£1,200.00", "(12.5)".
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let trimmed = s.trim_matches(|c: char| c.is_whitespace() || c == '\u{a0}');
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        // Accounting format: "(12.50)" is negative
        let (mut negative, body) = match trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Some(inner) => (true, inner.trim()),
            None => (false, trimmed),
        };

        let body = if let Some(rest) = body.strip_prefix('-') {
            if negative {
                return Err(invalid());
            }
            negative = true;
            rest
        } else {
            body.strip_prefix('+').unwrap_or(body)
        };

        let body = body
            .strip_prefix(&['£', '$', '€'][..])
            .unwrap_or(body)
            .trim_start();

        let (whole, fraction) = match body.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (body, None),
        };
        let whole = strip_thousands(whole).ok_or_else(invalid)?;
        let fraction = fraction.unwrap_or("");

        if whole.is_empty()
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
            || fraction.len() > 2
            || (body.contains('.') && fraction.is_empty())
        {
            return Err(invalid());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -cents } else { cents }))
    }
}

/// Remove thousands separators from the whole part
///
/// Commas must split the digits into a leading group of 1-3 and then groups
/// of exactly 3; "12,50" and "1,2,3" are rejected.
fn strip_thousands(whole: &str) -> Option<String> {
    let mut groups = whole.split(',');
    let first = groups.next()?;
    if !whole.contains(',') {
        return Some(first.to_string());
    }
    if first.is_empty() || first.len() > 3 {
        return None;
    }

    let mut digits = first.to_string();
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

/// Plain decimal: period separator, no thousands separators, no symbol
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "Empty amount"),
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(4250).to_string(), "42.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(-5000).to_string(), "-50.00");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::from_cents(123456789).to_string(), "1234567.89");
    }

    #[test]
    fn test_parse_plain() {
        assert_eq!(Money::parse("42.50").unwrap().cents(), 4250);
        assert_eq!(Money::parse("-50.00").unwrap().cents(), -5000);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse(" 0.05 ").unwrap().cents(), 5);
    }

    #[test]
    fn test_parse_statement_formats() {
        assert_eq!(Money::parse("£1,200.00").unwrap().cents(), 120000);
        assert_eq!(Money::parse("-£3.20").unwrap().cents(), -320);
        assert_eq!(Money::parse("(12.50)").unwrap().cents(), -1250);
        assert_eq!(Money::parse("+7.00").unwrap().cents(), 700);
        assert_eq!(Money::parse("\u{a0}9.99\u{a0}").unwrap().cents(), 999);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse(""), Err(MoneyParseError::Empty));
        assert_eq!(Money::parse("   "), Err(MoneyParseError::Empty));
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("12.345").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("12.").is_err());
        assert!(Money::parse(".50").is_err());
        assert!(Money::parse("-(5.00)").is_err());
        assert!(Money::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_thousands_separators() {
        assert_eq!(Money::parse("1,234.56").unwrap().cents(), 123456);
        assert_eq!(Money::parse("12,345,678").unwrap().cents(), 1234567800);

        // Decimal commas and misplaced separators are not guessed at
        assert!(Money::parse("12,50").is_err());
        assert!(Money::parse("1,2,3").is_err());
        assert!(Money::parse("1234,567").is_err());
        assert!(Money::parse(",123").is_err());
        assert!(Money::parse("1,234.5,6").is_err());
    }

    #[test]
    fn test_display_parse_round_trip() {
        for cents in [0, 1, -1, 4250, -5000, 120000, -987654321] {
            let m = Money::from_cents(cents);
            assert_eq!(Money::parse(&m.to_string()).unwrap(), m);
        }
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);
        assert_eq!((a + b).cents(), 1250);
        assert_eq!((-a).cents(), -1000);

        let total: Money = vec![a, b, -b].into_iter().sum();
        assert_eq!(total, a);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }
}
