//! # Proof Verifier Registry
//!
//! Maps each [`ProofKind`] to the backend that verifies it. The lifecycle
//! controller asks the registry `verify(kind, proof, inputs)` and never
//! touches a backend directly, so adding a kind means extending the enum
//! and registering a backend here.
//!
//! Verification is synchronous, bounded and side-effect free.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::attestation::{AttestationProofSystem, AttestorPublicKey};
use crate::mock::MockProofSystem;
use crate::statement::{ProofKind, PublicInputs};
use crate::traits::{private, VerifyError};

/// Object-safe view of a proof backend, bound to its verifying key.
pub trait VerifierBackend: private::Sealed + Send + Sync {
    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;

    fn verify_statement(&self, proof_bytes: &[u8], inputs: &PublicInputs)
        -> Result<bool, VerifyError>;
}

/// [`MockProofSystem`] as a registry backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockBackend;

impl VerifierBackend for MockBackend {
    fn backend_name(&self) -> &'static str {
        "mock"
    }

    fn verify_statement(
        &self,
        proof_bytes: &[u8],
        inputs: &PublicInputs,
    ) -> Result<bool, VerifyError> {
        MockProofSystem.verify_statement(proof_bytes, inputs)
    }
}

/// [`AttestationProofSystem`] bound to one trusted attestor key.
#[derive(Debug, Clone, Copy)]
pub struct AttestationBackend {
    attestor: AttestorPublicKey,
}

impl AttestationBackend {
    pub fn new(attestor: AttestorPublicKey) -> Self {
        Self { attestor }
    }
}

impl VerifierBackend for AttestationBackend {
    fn backend_name(&self) -> &'static str {
        "ed25519_attestation"
    }

    fn verify_statement(
        &self,
        proof_bytes: &[u8],
        inputs: &PublicInputs,
    ) -> Result<bool, VerifyError> {
        AttestationProofSystem.verify_statement(&self.attestor, proof_bytes, inputs)
    }
}

/// Configured backend for one proof kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum BackendConfig {
    Mock,
    Ed25519Attestation { attestor_public_key: AttestorPublicKey },
}

impl BackendConfig {
    fn build(&self) -> Box<dyn VerifierBackend> {
        match self {
            Self::Mock => Box::new(MockBackend),
            Self::Ed25519Attestation {
                attestor_public_key,
            } => Box::new(AttestationBackend::new(*attestor_public_key)),
        }
    }
}

/// Per-kind backend configuration. A kind without an entry is unsupported,
/// so an LC gated on it can never complete.
pub type VerifierConfig = BTreeMap<ProofKind, BackendConfig>;

/// Mock backend for every known kind.
///
/// Development and testing only. A mock proof is computable from the LC id
/// and commitment alone, both of which are public.
pub fn mock_verifier_config() -> VerifierConfig {
    ProofKind::ALL
        .into_iter()
        .map(|k| (k, BackendConfig::Mock))
        .collect()
}

/// The kind → backend registry.
#[derive(Default)]
pub struct ProofVerifier {
    backends: HashMap<ProofKind, Box<dyn VerifierBackend>>,
}

impl ProofVerifier {
    /// An empty registry. Every kind is unsupported until registered.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &VerifierConfig) -> Self {
        let mut verifier = Self::new();
        for (kind, backend) in config {
            verifier.register(*kind, backend.build());
        }
        verifier
    }

    /// Mock backend for every kind.
    pub fn mock() -> Self {
        Self::from_config(&mock_verifier_config())
    }

    /// Register (or replace) the backend for `kind`.
    pub fn register(&mut self, kind: ProofKind, backend: Box<dyn VerifierBackend>) {
        self.backends.insert(kind, backend);
    }

    pub fn with_backend(mut self, kind: ProofKind, backend: Box<dyn VerifierBackend>) -> Self {
        self.register(kind, backend);
        self
    }

    pub fn supports(&self, kind: ProofKind) -> bool {
        self.backends.contains_key(&kind)
    }

    /// Verify `proof` for `kind` against `inputs`.
    ///
    /// A statement whose own kind differs from `kind` is `Ok(false)`: the
    /// proof may be valid, but not as evidence of `kind`.
    pub fn verify(
        &self,
        kind: ProofKind,
        proof: &[u8],
        inputs: &PublicInputs,
    ) -> Result<bool, VerifyError> {
        let backend = self
            .backends
            .get(&kind)
            .ok_or(VerifyError::UnsupportedProofKind(kind))?;
        if inputs.kind != kind {
            tracing::debug!(%kind, statement_kind = %inputs.kind, "proof kind does not match statement");
            return Ok(false);
        }
        let result = backend.verify_statement(proof, inputs);
        match &result {
            Ok(valid) => tracing::debug!(
                %kind,
                backend = backend.backend_name(),
                lc_id = %inputs.lc_id.short(),
                valid,
                "proof verified"
            ),
            Err(e) => tracing::debug!(
                %kind,
                backend = backend.backend_name(),
                lc_id = %inputs.lc_id.short(),
                error = %e,
                "proof could not be evaluated"
            ),
        }
        result
    }
}

impl std::fmt::Debug for ProofVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self
            .backends
            .iter()
            .map(|(k, b)| (k.as_str(), b.backend_name()))
            .collect();
        kinds.sort();
        f.debug_struct("ProofVerifier").field("backends", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attestation::AttestorKeyPair;
    use crate::statement::Commitment;
    use lcx_core::{Address, LcId};

    fn stmt(kind: ProofKind) -> PublicInputs {
        let lc = LcId::derive(&Address::from_bytes([4u8; 20]), 0).unwrap();
        PublicInputs::new(lc, kind, Commitment::for_waybill(b"BL-1"))
    }

    #[test]
    fn empty_config_supports_nothing() {
        let v = ProofVerifier::from_config(&VerifierConfig::new());
        for kind in ProofKind::ALL {
            assert!(!v.supports(kind));
        }
        assert!(ProofVerifier::mock().supports(ProofKind::WaybillAuthenticity));
    }

    #[test]
    fn empty_registry_reports_unsupported_kind() {
        let v = ProofVerifier::new();
        assert_eq!(
            v.verify(ProofKind::EmailOwnership, &[0u8; 32], &stmt(ProofKind::EmailOwnership)),
            Err(VerifyError::UnsupportedProofKind(ProofKind::EmailOwnership))
        );
    }

    #[test]
    fn mock_registry_accepts_mock_proof() {
        let v = ProofVerifier::mock();
        let s = stmt(ProofKind::WaybillAuthenticity);
        let sub = MockProofSystem.prove_statement(&s).unwrap();
        assert!(v.verify(sub.kind, &sub.proof_bytes, &s).unwrap());
    }

    #[test]
    fn kind_mismatch_between_request_and_statement_is_false() {
        let v = ProofVerifier::mock();
        let s = stmt(ProofKind::WaybillAuthenticity);
        let sub = MockProofSystem.prove_statement(&s).unwrap();
        assert!(!v
            .verify(ProofKind::EmailOwnership, &sub.proof_bytes, &s)
            .unwrap());
    }

    #[test]
    fn per_kind_backends_are_independent() {
        let attestor = AttestorKeyPair::from_seed(&[8u8; 32]);
        let v = ProofVerifier::mock().with_backend(
            ProofKind::EmailOwnership,
            Box::new(AttestationBackend::new(attestor.public_key())),
        );
        let email = stmt(ProofKind::EmailOwnership);
        let mock_sub = MockProofSystem.prove_statement(&email).unwrap();
        assert!(matches!(
            v.verify(ProofKind::EmailOwnership, &mock_sub.proof_bytes, &email),
            Err(VerifyError::MalformedProof(_))
        ));
        let att = AttestationProofSystem.attest(&attestor, &email).unwrap();
        assert!(v.verify(ProofKind::EmailOwnership, &att.proof_bytes, &email).unwrap());

        let waybill = stmt(ProofKind::WaybillAuthenticity);
        let sub = MockProofSystem.prove_statement(&waybill).unwrap();
        assert!(v
            .verify(ProofKind::WaybillAuthenticity, &sub.proof_bytes, &waybill)
            .unwrap());
    }

    #[test]
    fn config_parses_from_yaml() {
        let pk = AttestorKeyPair::from_seed(&[2u8; 32]).public_key();
        let yaml = format!(
            "email_ownership:\n  backend: ed25519_attestation\n  attestor_public_key: \"{}\"\nwaybill_authenticity:\n  backend: mock\n",
            pk.to_hex()
        );
        let cfg: VerifierConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(
            cfg[&ProofKind::EmailOwnership],
            BackendConfig::Ed25519Attestation {
                attestor_public_key: pk
            }
        );
        let v = ProofVerifier::from_config(&cfg);
        assert!(v.supports(ProofKind::EmailOwnership));
        assert!(v.supports(ProofKind::WaybillAuthenticity));
        assert!(format!("{v:?}").contains("ed25519_attestation"));
    }
}
