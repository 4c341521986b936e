//! # Mock Proof System
//!
//! A deterministic, transparent proof system for development and testing.
//!
//! - `prove()` computes `SHA256(canonical(circuit_data) || public_inputs)`.
//! - `verify()` recomputes the digest over the bytes it is given and compares.
//!
//! ## Security Warning
//!
//! **NOT PRIVATE.** Anyone holding the public inputs can recompute a valid
//! proof. The mock binds a proof to its LC and commitment, which is enough
//! to exercise replay rejection, but it authenticates nobody. Deployments
//! that need a trust anchor configure the attestation backend instead.

use lcx_core::digest::Sha256Accumulator;
use lcx_core::encoding;
use lcx_core::CanonicalBytes;
use serde::{Deserialize, Serialize};

use crate::statement::{ProofSubmission, PublicInputs};
use crate::traits::{ProofError, ProofSystem, VerifyError};

/// A mock proof: the hex SHA-256 digest of circuit data and public inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MockProof {
    pub proof_hex: String,
}

impl MockProof {
    /// Raw 32-byte form carried in a [`ProofSubmission`].
    pub fn to_bytes(&self) -> Result<Vec<u8>, VerifyError> {
        encoding::decode_hex(&self.proof_hex).map_err(|e| VerifyError::MalformedProof(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, VerifyError> {
        if bytes.len() != 32 {
            return Err(VerifyError::MalformedProof(format!(
                "expected 32 proof bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self {
            proof_hex: encoding::encode_hex(bytes),
        })
    }
}

/// Stateless; verification is recomputation.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockVerifyingKey;

/// Stateless; proving is hashing.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockProvingKey;

/// Circuit payload plus the public inputs the proof binds to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockCircuit {
    /// Canonicalized before hashing.
    pub circuit_data: serde_json::Value,

    #[serde(with = "lcx_core::encoding::hex_bytes")]
    pub public_inputs: Vec<u8>,
}

impl MockCircuit {
    /// The circuit for a settlement statement: the kind's circuit id as data,
    /// the canonical statement as public inputs.
    pub fn for_statement(inputs: &PublicInputs) -> Result<Self, ProofError> {
        let canonical = inputs
            .to_canonical()
            .map_err(|e| ProofError::InvalidInputs(format!("statement: {e}")))?;
        Ok(Self {
            circuit_data: serde_json::json!({ "circuit": inputs.kind.circuit_id() }),
            public_inputs: canonical.as_bytes().to_vec(),
        })
    }
}

/// Deterministic SHA-256 "proofs".
///
/// ```text
/// proof = SHA256( canonical(circuit_data) || public_inputs )
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MockProofSystem;

impl ProofSystem for MockProofSystem {
    type Proof = MockProof;
    type VerifyingKey = MockVerifyingKey;
    type ProvingKey = MockProvingKey;
    type Circuit = MockCircuit;

    fn prove(
        &self,
        _pk: &Self::ProvingKey,
        circuit: &Self::Circuit,
    ) -> Result<Self::Proof, ProofError> {
        let canonical = CanonicalBytes::from_value(circuit.circuit_data.clone()).map_err(|e| {
            ProofError::GenerationFailed(format!("failed to canonicalize circuit data: {e}"))
        })?;

        let mut acc = Sha256Accumulator::new();
        acc.update(canonical.as_bytes());
        acc.update(&circuit.public_inputs);
        Ok(MockProof {
            proof_hex: acc.finalize_hex(),
        })
    }

    /// `public_inputs` must be `canonical(circuit_data) || inputs`, exactly
    /// what `prove()` hashed. Prefer [`MockProofSystem::verify_circuit`].
    fn verify(
        &self,
        _vk: &Self::VerifyingKey,
        proof: &Self::Proof,
        public_inputs: &[u8],
    ) -> Result<bool, VerifyError> {
        if proof.proof_hex.len() != 64 {
            return Err(VerifyError::MalformedProof(format!(
                "expected 64 hex chars, got {}",
                proof.proof_hex.len()
            )));
        }
        if !proof.proof_hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(VerifyError::MalformedProof(
                "proof_hex contains non-hex characters".to_string(),
            ));
        }

        let mut acc = Sha256Accumulator::new();
        acc.update(public_inputs);
        Ok(proof.proof_hex.eq_ignore_ascii_case(&acc.finalize_hex()))
    }
}

impl MockProofSystem {
    /// Verify against a circuit, doing the concatenation `prove()` did.
    pub fn verify_circuit(
        &self,
        vk: &MockVerifyingKey,
        proof: &MockProof,
        circuit: &MockCircuit,
    ) -> Result<bool, VerifyError> {
        let canonical = CanonicalBytes::from_value(circuit.circuit_data.clone()).map_err(|e| {
            VerifyError::VerificationFailed(format!("failed to canonicalize circuit data: {e}"))
        })?;

        let mut verify_input = canonical.as_bytes().to_vec();
        verify_input.extend_from_slice(&circuit.public_inputs);
        self.verify(vk, proof, &verify_input)
    }

    /// Produce a ready-to-submit proof for a settlement statement.
    pub fn prove_statement(&self, inputs: &PublicInputs) -> Result<ProofSubmission, ProofError> {
        let circuit = MockCircuit::for_statement(inputs)?;
        let proof = self.prove(&MockProvingKey, &circuit)?;
        let proof_bytes = proof
            .to_bytes()
            .map_err(|e| ProofError::GenerationFailed(e.to_string()))?;
        Ok(ProofSubmission {
            kind: inputs.kind,
            proof_bytes,
            public_inputs: *inputs,
        })
    }

    /// Check raw submitted proof bytes against a settlement statement.
    pub fn verify_statement(
        &self,
        proof_bytes: &[u8],
        inputs: &PublicInputs,
    ) -> Result<bool, VerifyError> {
        let proof = MockProof::from_bytes(proof_bytes)?;
        let circuit = MockCircuit::for_statement(inputs)
            .map_err(|e| VerifyError::VerificationFailed(e.to_string()))?;
        self.verify_circuit(&MockVerifyingKey, &proof, &circuit)
    }
}
