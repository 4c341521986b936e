//! # Currency Amounts
//!
//! Amounts are an integer count of minor units plus an explicit decimal
//! exponent: `{code: "USD", amount: 500_000_000, exponent: 6}` is 500 USD.
//! Comparison is exact integer equality on all three fields. The decimal
//! rendering is produced by string arithmetic on the integer, so no
//! floating-point value ever represents money.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// A 3-letter uppercase currency code (ISO 4217 shape, not checked against the registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let bytes = s.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(|b| b.is_ascii_uppercase()) {
            return Err(CoreError::InvalidCurrencyCode(s.to_string()));
        }
        Ok(Self([bytes[0], bytes[1], bytes[2]]))
    }

    pub fn as_str(&self) -> &str {
        // Constructed only from ASCII uppercase bytes.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// An amount of one currency in integer minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyAmount {
    pub code: CurrencyCode,
    /// Minor units. `amount / 10^exponent` is the major-unit value.
    pub amount: u64,
    pub exponent: u32,
}

impl CurrencyAmount {
    pub fn new(code: CurrencyCode, amount: u64, exponent: u32) -> Self {
        Self {
            code,
            amount,
            exponent,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// True when both amounts are in the same currency at the same scale.
    pub fn same_denomination(&self, other: &CurrencyAmount) -> bool {
        self.code == other.code && self.exponent == other.exponent
    }

    /// Decimal rendering of the major-unit value, e.g. `"500.000000"`.
    pub fn to_decimal_string(&self) -> String {
        let digits = self.amount.to_string();
        let exp = self.exponent as usize;
        if exp == 0 {
            return digits;
        }
        let padded = if digits.len() <= exp {
            format!("{}{digits}", "0".repeat(exp + 1 - digits.len()))
        } else {
            digits
        };
        let (whole, frac) = padded.split_at(padded.len() - exp);
        format!("{whole}.{frac}")
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_decimal_string(), self.code)
    }
}
