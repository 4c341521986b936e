//! # lcx-escrow: Collateral Escrow
//!
//! Holds the applicant's collateral for one LC between `create` and a
//! terminal transition.
//!
//! - **Escrow** (`escrow.rs`): `CollateralEscrow` with exactly-once lock and
//!   exactly-once, full-amount release.
//! - **Ledger** (`ledger.rs`): the `BalanceLedger` trait the escrow moves
//!   funds against, and `InMemoryLedger`.
//! - **Audit** (`audit.rs`): hash-chained `TransferRecord`s with reason
//!   `lock`, `settlement` or `refund`.
//!
//! ## Conservation
//!
//! For every currency, ledger balances plus the held amount of every
//! unreleased escrow is constant: `lock` debits exactly what it holds and
//! `release` credits exactly what it held.

pub mod audit;
pub mod error;
pub mod escrow;
pub mod ledger;

pub use audit::{verify_chain, Endpoint, TransferPayload, TransferReason, TransferRecord};
pub use error::EscrowError;
pub use escrow::{CollateralEscrow, EscrowStatus, ReleaseRecord};
pub use ledger::{BalanceLedger, InMemoryLedger};
