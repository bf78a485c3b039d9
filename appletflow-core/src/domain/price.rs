//! Price domain types
//!
//! Prices are entered and stored as canonical decimal strings ("0.05") but all
//! arithmetic happens on integer smallest units, so sums never drift.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fractional digits of one whole unit of the native currency
pub const DECIMALS: u32 = 18;

const UNIT: u128 = 10u128.pow(DECIMALS);

/// Errors produced while parsing or summing prices
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("Price cannot be empty")]
    Empty,

    #[error("Invalid price: '{0}'")]
    Invalid(String),

    #[error("Price cannot be negative: '{0}'")]
    Negative(String),

    #[error("Price '{0}' has more than {DECIMALS} decimal places")]
    TooPrecise(String),

    #[error("Price is out of range")]
    Overflow,
}

/// A non-negative amount held in smallest units (10^-18 of a whole unit)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u128);

impl Price {
    pub const ZERO: Price = Price(0);

    /// Creates a price from an amount of smallest units
    pub const fn from_smallest_units(units: u128) -> Self {
        Self(units)
    }

    /// Returns the amount in smallest units
    pub const fn smallest_units(&self) -> u128 {
        self.0
    }

    /// Parses a decimal string such as `"0.05"` or `"12"`
    ///
    /// Surrounding whitespace is ignored. Negative values, values with more than
    /// [`DECIMALS`] fractional digits and anything that is not a plain decimal
    /// number are rejected.
    pub fn parse(input: &str) -> Result<Self, PriceError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount = Decimal::from_str_exact(trimmed)
            .map_err(|_| PriceError::Invalid(trimmed.to_string()))?
            .normalize();

        if amount.is_zero() {
            return Ok(Self::ZERO);
        }
        if amount.is_sign_negative() {
            return Err(PriceError::Negative(trimmed.to_string()));
        }
        if amount.scale() > DECIMALS {
            return Err(PriceError::TooPrecise(trimmed.to_string()));
        }

        let mantissa = u128::try_from(amount.mantissa()).map_err(|_| PriceError::Overflow)?;
        let factor = 10u128.pow(DECIMALS - amount.scale());
        mantissa
            .checked_mul(factor)
            .map(Self)
            .ok_or(PriceError::Overflow)
    }

    /// Adds two prices, failing on overflow
    pub fn checked_add(self, other: Price) -> Result<Price, PriceError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(PriceError::Overflow)
    }

    /// Sums a sequence of prices in smallest units
    pub fn total<'a, I>(prices: I) -> Result<Price, PriceError>
    where
        I: IntoIterator<Item = &'a Price>,
    {
        prices
            .into_iter()
            .try_fold(Price::ZERO, |sum, price| sum.checked_add(*price))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / UNIT;
        let fraction = self.0 % UNIT;
        if fraction == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{:0width$}", fraction, width = DECIMALS as usize);
        write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Price::parse(s)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Price::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fraction() {
        let price = Price::parse("0.05").unwrap();
        assert_eq!(price.smallest_units(), 50_000_000_000_000_000);
    }

    #[test]
    fn test_parse_whole_and_whitespace() {
        assert_eq!(Price::parse(" 2 ").unwrap().smallest_units(), 2 * UNIT);
        assert_eq!(Price::parse("0").unwrap(), Price::ZERO);
    }

    #[test]
    fn test_display_is_canonical() {
        assert_eq!(Price::parse("0.050").unwrap().to_string(), "0.05");
        assert_eq!(Price::parse("1.0").unwrap().to_string(), "1");
        assert_eq!(Price::parse("0.025").unwrap().to_string(), "0.025");
        assert_eq!(Price::ZERO.to_string(), "0");
        assert_eq!(Price::from_smallest_units(1).to_string(), "0.000000000000000001");
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(Price::parse(""), Err(PriceError::Empty));
        assert_eq!(Price::parse("   "), Err(PriceError::Empty));
        assert!(matches!(Price::parse("abc"), Err(PriceError::Invalid(_))));
        assert!(matches!(Price::parse("-1"), Err(PriceError::Negative(_))));
        assert!(matches!(
            Price::parse("0.0000000000000000001"),
            Err(PriceError::TooPrecise(_))
        ));
    }

    #[test]
    fn test_sum_has_no_float_drift() {
        let prices = ["0.05", "0.01", "0.02"]
            .iter()
            .map(|p| Price::parse(p).unwrap())
            .collect::<Vec<_>>();
        let total = Price::total(&prices).unwrap();
        assert_eq!(total, Price::parse("0.08").unwrap());
        assert_eq!(total.to_string(), "0.08");
    }

    #[test]
    fn test_total_overflow() {
        let prices = [Price::from_smallest_units(u128::MAX), Price::from_smallest_units(1)];
        assert_eq!(Price::total(&prices), Err(PriceError::Overflow));
    }

    #[test]
    fn test_serde_as_string() {
        let price = Price::parse("0.07").unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"0.07\"");
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
        assert!(serde_json::from_str::<Price>("\"-3\"").is_err());
    }
}
