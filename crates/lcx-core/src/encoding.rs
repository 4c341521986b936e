//! Lowercase hex encoding and the serde helpers built on it.

use crate::error::CoreError;

/// Encode bytes as lowercase hex.
pub fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode a hex string (either case, no prefix) into bytes.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, CoreError> {
    if s.len() % 2 != 0 {
        return Err(CoreError::InvalidHex(format!(
            "odd length {} in {s:?}",
            s.len()
        )));
    }
    if !s.is_ascii() {
        return Err(CoreError::InvalidHex(format!("non-ASCII input {s:?}")));
    }
    (0..s.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&s[i..i + 2], 16)
                .map_err(|_| CoreError::InvalidHex(format!("bad digit pair at {i} in {s:?}")))
        })
        .collect()
}

/// Decode a hex string into a fixed-size array.
pub fn decode_hex_array<const N: usize>(s: &str) -> Result<[u8; N], CoreError> {
    let bytes = decode_hex(s)?;
    bytes.try_into().map_err(|v: Vec<u8>| {
        CoreError::InvalidHex(format!("expected {N} bytes, got {}", v.len()))
    })
}

/// Serde helper: `Vec<u8>` as a hex string.
pub mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::encode_hex(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::decode_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde helper: `[u8; 32]` as a 64-character hex string.
pub mod hex32 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::encode_hex(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::decode_hex_array::<32>(&s).map_err(serde::de::Error::custom)
    }
}
