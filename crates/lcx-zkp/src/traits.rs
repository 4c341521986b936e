//! # Proof System Trait
//!
//! The compile-time contract every proof backend satisfies. The trait is
//! sealed: only backends defined in this crate implement it, so the set of
//! things that can gate an LC settlement is closed and auditable.
//!
//! ## Security Invariant
//!
//! `prove` and `verify` are pure. Verification operates only on the proof
//! bytes and public inputs it is handed; it never performs I/O.

use thiserror::Error;

use crate::statement::ProofKind;

/// Error during proof generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofError {
    /// The statement or circuit could not be encoded.
    #[error("invalid prover inputs: {0}")]
    InvalidInputs(String),
    /// The backend failed to produce a proof.
    #[error("proof generation failed: {0}")]
    GenerationFailed(String),
}

/// Error during proof verification.
///
/// A well-formed proof that simply does not verify is `Ok(false)`, not an
/// error. These variants cover inputs the verifier cannot evaluate at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// The proof bytes do not decode for this backend.
    #[error("malformed proof: {0}")]
    MalformedProof(String),
    /// The verifier could not evaluate the statement (bad key, encoding fault).
    #[error("verification failed: {0}")]
    VerificationFailed(String),
    /// No backend is registered for the requested proof kind.
    #[error("unsupported proof kind: {0}")]
    UnsupportedProofKind(ProofKind),
}

pub(crate) mod private {
    pub trait Sealed {}
    impl Sealed for crate::mock::MockProofSystem {}
    impl Sealed for crate::attestation::AttestationProofSystem {}
    impl Sealed for crate::verifier::MockBackend {}
    impl Sealed for crate::verifier::AttestationBackend {}
}

/// Abstract interface for a proof system.
///
/// Each implementation provides its own proof, key, and circuit types.
pub trait ProofSystem: private::Sealed + Send + Sync {
    /// The proof type produced by this system.
    type Proof: Send + Sync;
    /// The verifying key type.
    type VerifyingKey: Send + Sync;
    /// The proving key type.
    type ProvingKey: Send + Sync;
    /// The circuit (statement plus structure) being proven.
    type Circuit: Send + Sync;

    /// Generate a proof for `circuit`.
    fn prove(&self, pk: &Self::ProvingKey, circuit: &Self::Circuit)
        -> Result<Self::Proof, ProofError>;

    /// Verify `proof` against the encoded public inputs.
    fn verify(
        &self,
        vk: &Self::VerifyingKey,
        proof: &Self::Proof,
        public_inputs: &[u8],
    ) -> Result<bool, VerifyError>;
}
