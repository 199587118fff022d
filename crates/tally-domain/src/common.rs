//! Money values and enums shared by ledger records.

use std::{fmt, str::FromStr};

use chrono::Weekday;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The income/expense discriminator shared by transactions and categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub fn is_income(self) -> bool {
        matches!(self, Kind::Income)
    }

    pub fn is_expense(self) -> bool {
        matches!(self, Kind::Expense)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Kind::Income => "Income",
            Kind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

impl FromStr for Kind {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Kind::Income),
            "expense" => Ok(Kind::Expense),
            other => Err(DomainError::UnknownKind(other.to_string())),
        }
    }
}

/// Non-negative exact decimal used for transaction amounts and budget ceilings.
///
/// Direction is never encoded in the value; it comes from the record's [`Kind`].
/// Values are capped at [`Amount::MAX_UNITS`] so that sums over a ledger stay far
/// below the range of [`Decimal`].
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Largest accepted value, in whole currency units.
    pub const MAX_UNITS: i64 = 1_000_000_000_000_000;

    /// Builds an amount, rejecting negative values and values above [`Amount::max`].
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::NegativeAmount(value));
        }
        if value > Decimal::from(Self::MAX_UNITS) {
            return Err(DomainError::AmountTooLarge(value));
        }
        Ok(Self(value))
    }

    pub fn max() -> Self {
        Self(Decimal::from(Self::MAX_UNITS))
    }

    pub fn value(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl FromStr for Amount {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parsed = Decimal::from_str(value.trim())
            .map_err(|_| DomainError::InvalidAmount(value.to_string()))?;
        Amount::new(parsed)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Renders a value with exactly two decimal places, rounding half away from zero.
///
/// Aggregates stay unrounded; this is only applied when presenting a figure.
pub fn display_money(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// First day of the reporting week. Fixed per configuration, never taken from the locale.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum WeekStart {
    /// ISO 8601 weeks.
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WeekStart::Monday => "Monday",
            WeekStart::Sunday => "Sunday",
        };
        f.write_str(label)
    }
}
