//! # lcx-zkp: Settlement Proof Verification
//!
//! The gate between an accepted LC and the release of its collateral.
//!
//! ## Architecture
//!
//! - **Traits** (`traits.rs`): the sealed `ProofSystem` trait and the
//!   `ProofError` / `VerifyError` types.
//!
//! - **Statements** (`statement.rs`): `ProofKind`, `Commitment`,
//!   `PublicInputs` (LC id + kind + commitment) and `ProofSubmission`.
//!
//! - **Mock** (`mock.rs`): deterministic SHA-256 proofs. Transparent, no
//!   privacy; binds a proof to its statement.
//!
//! - **Attestation** (`attestation.rs`): an Ed25519 attestor signs the
//!   canonical statement; verification checks against a configured key.
//!
//! - **Verifier** (`verifier.rs`): the kind → backend registry consulted by
//!   the lifecycle controller.
//!
//! ## Crate Policy
//!
//! - Depends only on `lcx-core` internally.
//! - Verification never performs I/O.

pub mod attestation;
pub mod mock;
pub mod statement;
pub mod traits;
pub mod verifier;

pub use attestation::{AttestationProofSystem, AttestorKeyPair, AttestorPublicKey};
pub use mock::MockProofSystem;
pub use statement::{Commitment, ProofKind, ProofSubmission, PublicInputs};
pub use traits::{ProofError, ProofSystem, VerifyError};
pub use verifier::{
    mock_verifier_config, AttestationBackend, BackendConfig, MockBackend, ProofVerifier,
    VerifierBackend, VerifierConfig,
};
