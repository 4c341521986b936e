//! # lcx-core: Foundational Types for LCX
//!
//! The leaf crate of the workspace. Every other `lcx-*` crate depends on
//! it; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtypes for domain primitives.** `Address`, `LcId`, `CurrencyCode`
//!    have validated constructors. No bare strings or byte arrays for
//!    identities.
//!
//! 2. **`CanonicalBytes` newtype.** Every digest (LC ids, proof statements,
//!    audit chain links) flows through `CanonicalBytes::new()`.
//!
//! 3. **Integer money.** `CurrencyAmount` holds minor units plus an explicit
//!    decimal exponent. Floats are rejected by canonicalization and never
//!    used for comparison; display strings are produced with integer
//!    arithmetic only.
//!
//! 4. **UTC-only timestamps and an injectable clock.** Expiry is evaluated
//!    lazily against a [`Clock`], so deadlines are testable without sleeping.
//!
//! 5. **Static option tables.** The `availableWithBy` and
//!    `confirmationInstructions` label tables are process-wide constants.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `lcx-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod encoding;
pub mod error;
pub mod identity;
pub mod money;
pub mod options;
pub mod temporal;

pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, sha256_hex, ContentDigest, DigestAlgorithm, Sha256Accumulator};
pub use error::{CanonicalizationError, CoreError};
pub use identity::{Address, LcId};
pub use money::{CurrencyAmount, CurrencyCode};
pub use options::{
    AvailableWithBy, ConfirmationInstructions, FormOfDocCredit, AVAILABLE_WITH_BY,
    CONFIRMATION_INSTRUCTIONS,
};
pub use temporal::{Clock, ManualClock, SystemClock, Timestamp};
