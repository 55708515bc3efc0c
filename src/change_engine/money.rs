use std::fmt;
use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A currency amount held as whole cents.
///
/// Every amount the engine produces goes through this type, so no binary
/// floating-point residue ever reaches a [`Problem`](super::models::Problem).
/// It serializes as a fixed two-decimal string (`"12.34"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Money(i64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("empty amount")]
    Empty,
    #[error("invalid character {0:?} in amount")]
    InvalidChar(char),
    #[error("more than two decimal places in {0:?}")]
    TooPrecise(String),
    #[error("amount {0:?} is out of range")]
    OutOfRange(String),
}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub const fn from_dollars(dollars: i64) -> Self {
        Money(dollars * 100)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Cents past the whole-dollar boundary (`7.35` -> `35`).
    pub const fn cents_part(self) -> i64 {
        self.0.rem_euclid(100)
    }

    /// Round up to the next multiple of `step` cents. Exact multiples stay put.
    pub fn ceil_to(self, step: i64) -> Self {
        debug_assert!(step > 0);
        Money(self.0.div_euclid(step) * step + if self.0.rem_euclid(step) == 0 { 0 } else { step })
    }

    /// Round down to the previous multiple of `step` cents.
    pub fn floor_to(self, step: i64) -> Self {
        debug_assert!(step > 0);
        Money(self.0.div_euclid(step) * step)
    }

    /// Round to the nearest multiple of `step` cents, halves rounding up.
    pub fn round_to_nearest(self, step: i64) -> Self {
        debug_assert!(step > 0);
        Money((self.0 + step / 2).div_euclid(step) * step)
    }

    /// True when the amount is an exact multiple of `step` cents.
    pub fn is_multiple_of(self, step: i64) -> bool {
        self.0.rem_euclid(step) == 0
    }

    /// Parse a user- or store-supplied amount such as `"12.34"`, `"$5"` or `".25"`.
    pub fn parse(input: &str) -> Result<Self, MoneyParseError> {
        let trimmed = input.trim();
        let body = trimmed.strip_prefix('$').unwrap_or(trimmed);
        if body.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (whole, frac) = match body.split_once('.') {
            Some((w, f)) => (w, f),
            None => (body, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(MoneyParseError::Empty);
        }
        if let Some(bad) = whole.chars().chain(frac.chars()).find(|c| !c.is_ascii_digit()) {
            return Err(MoneyParseError::InvalidChar(bad));
        }
        if frac.len() > 2 {
            return Err(MoneyParseError::TooPrecise(input.to_string()));
        }

        let out_of_range = || MoneyParseError::OutOfRange(input.to_string());
        let dollars: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| out_of_range())?
        };
        let cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| out_of_range())? * 10,
            _ => frac.parse().map_err(|_| out_of_range())?,
        };

        dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Money)
            .ok_or_else(out_of_range)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl From<Money> for String {
    fn from(m: Money) -> String {
        m.to_string()
    }
}

impl TryFrom<String> for Money {
    type Error = MoneyParseError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Money::parse(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Money::from_cents(735).to_string(), "7.35");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_dollars(20).to_string(), "20.00");
    }

    #[test]
    fn parses_common_forms() {
        assert_eq!(Money::parse("12.34"), Ok(Money::from_cents(1234)));
        assert_eq!(Money::parse("$5"), Ok(Money::from_cents(500)));
        assert_eq!(Money::parse(".25"), Ok(Money::from_cents(25)));
        assert_eq!(Money::parse("3.5"), Ok(Money::from_cents(350)));
        assert_eq!(Money::parse("4."), Ok(Money::from_cents(400)));
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert_eq!(Money::parse(""), Err(MoneyParseError::Empty));
        assert_eq!(Money::parse("$"), Err(MoneyParseError::Empty));
        assert_eq!(Money::parse("."), Err(MoneyParseError::Empty));
        assert_eq!(Money::parse("-1.00"), Err(MoneyParseError::InvalidChar('-')));
        assert!(matches!(Money::parse("1.234"), Err(MoneyParseError::TooPrecise(_))));
        assert!(matches!(Money::parse("99999999999999999999"), Err(MoneyParseError::OutOfRange(_))));
    }

    #[test]
    fn rounding_helpers() {
        let m = Money::from_cents(1935);
        assert_eq!(m.ceil_to(100), Money::from_cents(2000));
        assert_eq!(m.ceil_to(500), Money::from_cents(2000));
        assert_eq!(m.ceil_to(2000), Money::from_cents(2000));
        assert_eq!(m.floor_to(100), Money::from_cents(1900));
        assert_eq!(Money::from_cents(1900).ceil_to(100), Money::from_cents(1900));
        assert_eq!(m.cents_part(), 35);
        assert_eq!(Money::from_cents(302).round_to_nearest(5), Money::from_cents(300));
        assert_eq!(Money::from_cents(303).round_to_nearest(5), Money::from_cents(305));
        assert_eq!(Money::from_cents(307).round_to_nearest(5), Money::from_cents(305));
        assert_eq!(Money::from_cents(308).round_to_nearest(5), Money::from_cents(310));
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&Money::from_cents(1001)).unwrap();
        assert_eq!(json, "\"10.01\"");
        let back: Money = serde_json::from_str("\"0.99\"").unwrap();
        assert_eq!(back, Money::from_cents(99));
        assert!(serde_json::from_str::<Money>("\"abc\"").is_err());
    }
}
