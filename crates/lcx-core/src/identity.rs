//! # Identity Newtypes
//!
//! `Address` is a 20-byte ledger account; `LcId` is the content-derived
//! identifier of one Letter of Credit. Keeping them distinct types means a
//! party address can never be passed where an LC id is expected.
//!
//! The all-zero address is the presentation layer's "no LC" sentinel. It is
//! representable (so it can be parsed and compared) but never valid as a
//! party to an LC.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::canonical::CanonicalBytes;
use crate::digest::sha256_digest;
use crate::encoding;
use crate::error::{CanonicalizationError, CoreError};

/// A 20-byte ledger account address, rendered as `0x` plus 40 lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 20]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Address = Address([0u8; 20]);

    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// True for the all-zero sentinel address.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Parse `0x`-prefixed hex. Mixed case is accepted; output is always lowercase.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let invalid = |reason: &str| CoreError::InvalidAddress {
            input: s.to_string(),
            reason: reason.to_string(),
        };
        let hex = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| invalid("missing 0x prefix"))?;
        if hex.len() != 40 {
            return Err(invalid("expected 40 hex digits"));
        }
        let bytes = encoding::decode_hex_array::<20>(hex).map_err(|e| invalid(&e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", encoding::encode_hex(&self.0))
    }
}

impl FromStr for Address {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Identifier of a Letter of Credit.
///
/// Derived as `SHA256(JCS({"applicant": <address>, "sequence": <n>}))`, where
/// `sequence` counts the LCs the applicant has created before this one. The
/// id is therefore stable for the lifetime of the record and distinct across
/// an applicant's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LcId([u8; 32]);

impl LcId {
    /// Derive the id of the applicant's `sequence`-th LC.
    pub fn derive(applicant: &Address, sequence: u64) -> Result<Self, CanonicalizationError> {
        let canonical = CanonicalBytes::new(&serde_json::json!({
            "applicant": applicant,
            "sequence": sequence,
        }))?;
        Ok(Self(sha256_digest(&canonical).bytes))
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        encoding::encode_hex(&self.0)
    }

    /// First eight hex digits, for log lines.
    pub fn short(&self) -> String {
        encoding::encode_hex(&self.0[..4])
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let hex = s.strip_prefix("0x").unwrap_or(s);
        encoding::decode_hex_array::<32>(hex).map(Self)
    }
}

impl fmt::Display for LcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for LcId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for LcId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for LcId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "0x00000000000000000000000000000000000a11ce";

    #[test]
    fn parse_and_display_roundtrip_lowercases() {
        let a = Address::parse("0x00000000000000000000000000000000000A11CE").unwrap();
        assert_eq!(a.to_string(), ALICE);
        assert_eq!(a.to_string().parse::<Address>().unwrap(), a);
    }

    #[test]
    fn parse_rejects_malformed_addresses() {
        assert!(Address::parse("00000000000000000000000000000000000a11ce").is_err());
        assert!(Address::parse("0x1234").is_err());
        assert!(Address::parse("0xzz000000000000000000000000000000000a11ce").is_err());
        assert!(Address::parse("").is_err());
    }

    #[test]
    fn zero_address_is_detected() {
        let zero = Address::parse("0x0000000000000000000000000000000000000000").unwrap();
        assert!(zero.is_zero());
        assert_eq!(zero, Address::ZERO);
        assert!(!Address::parse(ALICE).unwrap().is_zero());
    }

    #[test]
    fn address_serializes_as_string() {
        let a = Address::parse(ALICE).unwrap();
        assert_eq!(serde_json::to_value(a).unwrap(), serde_json::json!(ALICE));
        let back: Address = serde_json::from_value(serde_json::json!(ALICE)).unwrap();
        assert_eq!(back, a);
        assert!(serde_json::from_value::<Address>(serde_json::json!("0x12")).is_err());
    }

    #[test]
    fn lc_id_is_deterministic_per_applicant_and_sequence() {
        let a = Address::parse(ALICE).unwrap();
        let b = Address::from_bytes([7u8; 20]);
        assert_eq!(LcId::derive(&a, 0).unwrap(), LcId::derive(&a, 0).unwrap());
        assert_ne!(LcId::derive(&a, 0).unwrap(), LcId::derive(&a, 1).unwrap());
        assert_ne!(LcId::derive(&a, 0).unwrap(), LcId::derive(&b, 0).unwrap());
    }

    #[test]
    fn lc_id_hex_roundtrip() {
        let id = LcId::derive(&Address::parse(ALICE).unwrap(), 3).unwrap();
        assert_eq!(id.to_hex().len(), 64);
        assert_eq!(LcId::parse(&id.to_hex()).unwrap(), id);
        assert_eq!(LcId::parse(&format!("0x{id}")).unwrap(), id);
        assert_eq!(id.short().len(), 8);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(serde_json::from_str::<LcId>(&json).unwrap(), id);
    }
}
