//! # Error Types
//!
//! Errors raised while constructing or parsing the foundational types.
//! Higher crates wrap these into their own error enums; validation
//! failures here surface to callers as `InvalidTerms`.

use thiserror::Error;

/// Error raised by `lcx-core` constructors and parsers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A ledger address string was not `0x` followed by 40 hex digits.
    #[error("invalid address {input:?}: {reason}")]
    InvalidAddress {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A currency code was not exactly three ASCII uppercase letters.
    #[error("invalid currency code {0:?}: expected three uppercase ASCII letters")]
    InvalidCurrencyCode(String),

    /// An option code fell outside its table.
    #[error("invalid {table} code {code}: expected 0..={max}")]
    InvalidOptionCode {
        /// The option table name.
        table: &'static str,
        /// The rejected code.
        code: u8,
        /// The highest valid code.
        max: u8,
    },

    /// A timestamp failed to parse or was not UTC.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A hex string was malformed.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// A digest string was malformed.
    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

/// Error during canonical serialization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Amounts must be integers in minor units.
    #[error("float values are not permitted in canonical representations; use integer minor units: {0}")]
    FloatRejected(String),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(String),
}

impl From<serde_json::Error> for CanonicalizationError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationFailed(e.to_string())
    }
}
