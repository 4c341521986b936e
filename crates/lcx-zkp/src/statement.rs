//! # Proof Statements
//!
//! What a settlement proof claims. Every statement names the LC it is for,
//! the kind of document evidence, and the public commitment stored in that
//! LC's proof gate. Because the LC id is part of the signed/hashed public
//! inputs, a proof produced for one LC never verifies against another.

use std::fmt;
use std::str::FromStr;

use lcx_core::digest::Sha256Accumulator;
use lcx_core::encoding;
use lcx_core::{sha256_digest, CanonicalBytes, CanonicalizationError, CoreError, LcId};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The kinds of document evidence an LC can require before settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofKind {
    /// The presenter controls the beneficiary's committed mailbox.
    EmailOwnership,
    /// The presented waybill matches the committed document digest.
    WaybillAuthenticity,
}

impl ProofKind {
    pub const ALL: [ProofKind; 2] = [Self::EmailOwnership, Self::WaybillAuthenticity];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmailOwnership => "email_ownership",
            Self::WaybillAuthenticity => "waybill_authenticity",
        }
    }

    /// Circuit identifier the mock backend binds proofs to.
    pub fn circuit_id(&self) -> &'static str {
        match self {
            Self::EmailOwnership => "lcx.email_ownership.v1",
            Self::WaybillAuthenticity => "lcx.waybill_authenticity.v1",
        }
    }
}

impl fmt::Display for ProofKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProofKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown proof kind {s:?}"))
    }
}

/// A 32-byte public commitment to the evidence a proof must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Commitment([u8; 32]);

impl Commitment {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        encoding::encode_hex(&self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        encoding::decode_hex_array::<32>(s).map(Self)
    }

    /// Commitment to a mailbox identity. The address is trimmed and
    /// lowercased before hashing so that case variants commit identically.
    pub fn for_mailbox(mailbox: &str) -> Result<Self, CanonicalizationError> {
        let normalized = mailbox.trim().to_ascii_lowercase();
        let canonical = CanonicalBytes::new(&serde_json::json!({ "mailbox": normalized }))?;
        Ok(Self(sha256_digest(&canonical).bytes))
    }

    /// Commitment to the exact bytes of a waybill document.
    pub fn for_waybill(document: &[u8]) -> Self {
        let mut acc = Sha256Accumulator::new();
        acc.update(document);
        Self(acc.finalize().bytes)
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Commitment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Commitment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// The public statement a proof is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicInputs {
    pub lc_id: LcId,
    pub kind: ProofKind,
    pub commitment: Commitment,
}

impl PublicInputs {
    pub fn new(lc_id: LcId, kind: ProofKind, commitment: Commitment) -> Self {
        Self {
            lc_id,
            kind,
            commitment,
        }
    }

    /// The JCS encoding that provers hash or sign.
    pub fn to_canonical(&self) -> Result<CanonicalBytes, CanonicalizationError> {
        CanonicalBytes::new(self)
    }
}

/// A proof presented to `complete`. Not persisted past verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofSubmission {
    pub kind: ProofKind,
    #[serde(with = "lcx_core::encoding::hex_bytes")]
    pub proof_bytes: Vec<u8>,
    pub public_inputs: PublicInputs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use lcx_core::Address;

    fn lc(seq: u64) -> LcId {
        LcId::derive(&Address::from_bytes([1u8; 20]), seq).unwrap()
    }

    #[test]
    fn proof_kind_names_roundtrip() {
        for kind in ProofKind::ALL {
            assert_eq!(kind.as_str().parse::<ProofKind>().unwrap(), kind);
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                serde_json::json!(kind.as_str())
            );
        }
        assert!("fax".parse::<ProofKind>().is_err());
    }

    #[test]
    fn mailbox_commitment_normalizes_case_and_whitespace() {
        let a = Commitment::for_mailbox("Seller@Example.com").unwrap();
        let b = Commitment::for_mailbox("  seller@example.com ").unwrap();
        let c = Commitment::for_mailbox("buyer@example.com").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn waybill_commitment_is_byte_exact() {
        let a = Commitment::for_waybill(b"BL-0001 500 cartons");
        let b = Commitment::for_waybill(b"BL-0001 500 cartons ");
        assert_ne!(a, b);
        assert_eq!(a, Commitment::from_hex(&a.to_hex()).unwrap());
    }

    #[test]
    fn public_inputs_canonical_bytes_depend_on_lc_id() {
        let c = Commitment::for_waybill(b"doc");
        let one = PublicInputs::new(lc(0), ProofKind::WaybillAuthenticity, c);
        let two = PublicInputs::new(lc(1), ProofKind::WaybillAuthenticity, c);
        assert_ne!(
            one.to_canonical().unwrap().as_bytes(),
            two.to_canonical().unwrap().as_bytes()
        );
    }

    #[test]
    fn submission_serializes_proof_as_hex() {
        let sub = ProofSubmission {
            kind: ProofKind::EmailOwnership,
            proof_bytes: vec![0xde, 0xad],
            public_inputs: PublicInputs::new(
                lc(0),
                ProofKind::EmailOwnership,
                Commitment::for_waybill(b"x"),
            ),
        };
        let json = serde_json::to_value(&sub).unwrap();
        assert_eq!(json["proof_bytes"], "dead");
        assert_eq!(json["kind"], "email_ownership");
        let back: ProofSubmission = serde_json::from_value(json).unwrap();
        assert_eq!(back, sub);
    }
}
