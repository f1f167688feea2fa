//! Money types kept in integer minor units.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every sum, clamp and comparison works on `Cents`; `Decimal` only appears
//! at the wire and display boundary.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use rust_decimal::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors produced while reading an operator-typed amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    /// The text is empty after trimming.
    #[error("amount is empty")]
    Empty,
    /// The text is not a decimal number.
    #[error("invalid amount: {0}")]
    Invalid(String),
    /// The amount does not fit in 64-bit minor units.
    #[error("amount out of range: {0}")]
    OutOfRange(String),
}

/// A monetary amount expressed in minor currency units (cents).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cents(pub i64);

impl Cents {
    /// Zero cents.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from a raw count of cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw count of cents.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Converts a decimal amount, rounding half away from zero to two places.
    ///
    /// Returns `None` if the amount does not fit in `i64` cents.
    #[must_use]
    pub fn from_decimal(amount: Decimal) -> Option<Self> {
        let scaled = amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)?;
        scaled.to_i64().map(Self)
    }

    /// Converts back to a two-place decimal for display or the wire.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Parses an operator-typed amount such as `1500`, `1500.5`,
    /// `1500,50`, `1.500,50` or `$ 1,500.50`.
    ///
    /// When both separators appear, the last one is the decimal separator.
    /// A single separator of either kind is read as the decimal separator;
    /// a repeated one is read as thousands grouping.
    pub fn parse(input: &str) -> Result<Self, MoneyParseError> {
        let cleaned: String = input
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '$')
            .collect();
        if cleaned.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let last_dot = cleaned.rfind('.');
        let last_comma = cleaned.rfind(',');
        let normalized = match (last_dot, last_comma) {
            (Some(dot), Some(comma)) => {
                let (thousands, decimal) = if dot > comma { (',', '.') } else { ('.', ',') };
                cleaned
                    .chars()
                    .filter(|c| *c != thousands)
                    .map(|c| if c == decimal { '.' } else { c })
                    .collect::<String>()
            }
            (None, Some(_)) => normalize_single_separator(&cleaned, ','),
            (Some(_), None) => normalize_single_separator(&cleaned, '.'),
            (None, None) => cleaned.clone(),
        };

        let amount = Decimal::from_str(&normalized)
            .map_err(|_| MoneyParseError::Invalid(input.to_string()))?;
        Self::from_decimal(amount).ok_or_else(|| MoneyParseError::OutOfRange(input.to_string()))
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Clamps negative amounts to zero.
    #[must_use]
    pub fn non_negative(self) -> Self {
        Self(self.0.max(0))
    }

    /// Subtraction that stops at `i64` bounds instead of overflowing.
    #[must_use]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// Addition that stops at `i64` bounds instead of overflowing.
    #[must_use]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

fn normalize_single_separator(text: &str, separator: char) -> String {
    if text.matches(separator).count() == 1 {
        text.replace(separator, ".")
    } else {
        text.replace(separator, "")
    }
}

impl Add for Cents {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Cents {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Cents {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Cents {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Cents> for Cents {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl Serialize for Cents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.to_decimal(), serializer)
    }
}

impl<'de> Deserialize<'de> for Cents {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::from_decimal(amount)
            .ok_or_else(|| serde::de::Error::custom(format!("amount out of range: {amount}")))
    }
}

/// Currencies accepted by the back-office.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Argentine Peso, the base currency.
    #[default]
    Ars,
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// Any other currency.
    Other,
}

impl Currency {
    /// Returns the wire code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ars => "ARS",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ARS" => Ok(Self::Ars),
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "OTHER" => Ok(Self::Other),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}
