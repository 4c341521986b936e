//! # Ed25519 Attestation Backend
//!
//! A trusted attestor (the mail provider for mailbox ownership, the carrier
//! for a waybill) signs the canonical public inputs of a settlement
//! statement. The verifier holds only the attestor's public key and checks
//! the signature. The beneficiary never reveals the mailbox credentials or
//! the full document to the engine; the attestor vouches for them.
//!
//! ## Security Invariant
//!
//! Signatures are always over `CanonicalBytes` of [`PublicInputs`], so the
//! signed message carries the LC id and commitment. A signature for one LC
//! cannot satisfy another.

use ed25519_dalek::{Signer, Verifier};
use lcx_core::encoding;
use lcx_core::CanonicalBytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::statement::{ProofSubmission, PublicInputs};
use crate::traits::{ProofError, ProofSystem, VerifyError};

/// An attestor's public key (32 bytes, hex on the wire).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttestorPublicKey([u8; 32]);

impl AttestorPublicKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        encoding::encode_hex(&self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, VerifyError> {
        encoding::decode_hex_array::<32>(s.trim())
            .map(Self)
            .map_err(|e| VerifyError::VerificationFailed(format!("attestor key: {e}")))
    }

    fn to_verifying_key(self) -> Result<ed25519_dalek::VerifyingKey, VerifyError> {
        ed25519_dalek::VerifyingKey::from_bytes(&self.0)
            .map_err(|e| VerifyError::VerificationFailed(format!("invalid attestor key: {e}")))
    }
}

impl std::fmt::Debug for AttestorPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AttestorPublicKey({}...)", encoding::encode_hex(&self.0[..8]))
    }
}

impl std::fmt::Display for AttestorPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for AttestorPublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for AttestorPublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// An attestor's signing key. Not serializable.
pub struct AttestorKeyPair {
    signing_key: ed25519_dalek::SigningKey,
}

impl AttestorKeyPair {
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self {
            signing_key: ed25519_dalek::SigningKey::generate(&mut csprng),
        }
    }

    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    pub fn public_key(&self) -> AttestorPublicKey {
        AttestorPublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign canonical bytes. Raw byte slices cannot be signed.
    pub fn sign(&self, data: &CanonicalBytes) -> AttestationSignature {
        AttestationSignature(self.signing_key.sign(data.as_bytes()).to_bytes())
    }
}

impl std::fmt::Debug for AttestorKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AttestorKeyPair(<private>)")
    }
}

/// A 64-byte Ed25519 signature over canonical public inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttestationSignature([u8; 64]);

impl AttestationSignature {
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, VerifyError> {
        let arr: [u8; 64] = bytes.try_into().map_err(|_| {
            VerifyError::MalformedProof(format!(
                "expected 64 signature bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }
}

/// Proof system whose "proof" is an attestor signature over the statement.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttestationProofSystem;

impl ProofSystem for AttestationProofSystem {
    type Proof = AttestationSignature;
    type VerifyingKey = AttestorPublicKey;
    type ProvingKey = AttestorKeyPair;
    type Circuit = PublicInputs;

    fn prove(
        &self,
        pk: &Self::ProvingKey,
        circuit: &Self::Circuit,
    ) -> Result<Self::Proof, ProofError> {
        let canonical = circuit
            .to_canonical()
            .map_err(|e| ProofError::InvalidInputs(format!("statement: {e}")))?;
        Ok(pk.sign(&canonical))
    }

    /// `public_inputs` is the canonical encoding of the statement.
    fn verify(
        &self,
        vk: &Self::VerifyingKey,
        proof: &Self::Proof,
        public_inputs: &[u8],
    ) -> Result<bool, VerifyError> {
        let key = vk.to_verifying_key()?;
        let sig = ed25519_dalek::Signature::from_bytes(&proof.0);
        Ok(key.verify(public_inputs, &sig).is_ok())
    }
}

impl AttestationProofSystem {
    /// Attest a settlement statement, producing a ready-to-submit proof.
    pub fn attest(
        &self,
        attestor: &AttestorKeyPair,
        inputs: &PublicInputs,
    ) -> Result<ProofSubmission, ProofError> {
        let sig = self.prove(attestor, inputs)?;
        Ok(ProofSubmission {
            kind: inputs.kind,
            proof_bytes: sig.as_bytes().to_vec(),
            public_inputs: *inputs,
        })
    }

    /// Check raw submitted signature bytes against a statement.
    pub fn verify_statement(
        &self,
        attestor: &AttestorPublicKey,
        proof_bytes: &[u8],
        inputs: &PublicInputs,
    ) -> Result<bool, VerifyError> {
        let sig = AttestationSignature::from_slice(proof_bytes)?;
        let canonical = inputs
            .to_canonical()
            .map_err(|e| VerifyError::VerificationFailed(format!("statement: {e}")))?;
        self.verify(attestor, &sig, canonical.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::{Commitment, ProofKind};
    use lcx_core::{Address, LcId};

    fn stmt(seq: u64) -> PublicInputs {
        let lc = LcId::derive(&Address::from_bytes([3u8; 20]), seq).unwrap();
        PublicInputs::new(
            lc,
            ProofKind::EmailOwnership,
            Commitment::for_mailbox("seller@example.com").unwrap(),
        )
    }

    #[test]
    fn attestation_verifies_under_attestor_key() {
        let attestor = AttestorKeyPair::from_seed(&[42u8; 32]);
        let sub = AttestationProofSystem.attest(&attestor, &stmt(0)).unwrap();
        assert_eq!(sub.proof_bytes.len(), 64);
        assert!(AttestationProofSystem
            .verify_statement(&attestor.public_key(), &sub.proof_bytes, &stmt(0))
            .unwrap());
    }

    #[test]
    fn attestation_from_other_key_is_rejected() {
        let attestor = AttestorKeyPair::from_seed(&[42u8; 32]);
        let impostor = AttestorKeyPair::generate();
        let sub = AttestationProofSystem.attest(&impostor, &stmt(0)).unwrap();
        assert!(!AttestationProofSystem
            .verify_statement(&attestor.public_key(), &sub.proof_bytes, &stmt(0))
            .unwrap());
    }

    #[test]
    fn attestation_for_other_lc_is_rejected() {
        let attestor = AttestorKeyPair::from_seed(&[42u8; 32]);
        let sub = AttestationProofSystem.attest(&attestor, &stmt(0)).unwrap();
        assert!(!AttestationProofSystem
            .verify_statement(&attestor.public_key(), &sub.proof_bytes, &stmt(1))
            .unwrap());
    }

    #[test]
    fn truncated_signature_is_malformed() {
        let attestor = AttestorKeyPair::from_seed(&[1u8; 32]);
        assert!(matches!(
            AttestationProofSystem.verify_statement(&attestor.public_key(), &[0u8; 10], &stmt(0)),
            Err(VerifyError::MalformedProof(_))
        ));
    }

    #[test]
    fn public_key_hex_roundtrip_and_debug_is_truncated() {
        let pk = AttestorKeyPair::from_seed(&[5u8; 32]).public_key();
        assert_eq!(AttestorPublicKey::from_hex(&pk.to_hex()).unwrap(), pk);
        let json = serde_json::to_string(&pk).unwrap();
        assert_eq!(serde_json::from_str::<AttestorPublicKey>(&json).unwrap(), pk);
        assert!(format!("{pk:?}").ends_with("...)"));
        assert_eq!(
            format!("{:?}", AttestorKeyPair::from_seed(&[5u8; 32])),
            "AttestorKeyPair(<private>)"
        );
    }
}
