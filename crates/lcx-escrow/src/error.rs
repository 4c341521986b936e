//! # Escrow Error Types
//!
//! Every variant names the LC or account involved so a failed receipt can be
//! diagnosed without logs.

use lcx_core::{Address, CurrencyCode, LcId};
use thiserror::Error;

/// Errors arising from escrow and ledger operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EscrowError {
    /// Collateral currency or scale differs from the escrow's denomination.
    #[error("escrow {lc_id}: currency mismatch, expected {expected}, got {actual}")]
    CurrencyMismatch {
        lc_id: LcId,
        /// Expected denomination as `CODE/exponent`.
        expected: String,
        /// Offered denomination as `CODE/exponent`.
        actual: String,
    },

    /// Lock amount was zero.
    #[error("escrow {lc_id}: lock amount must be positive")]
    NonPositiveAmount { lc_id: LcId },

    /// The escrow already holds collateral.
    #[error("escrow {lc_id} is already locked")]
    AlreadyLocked { lc_id: LcId },

    /// Release was requested before any collateral was locked.
    #[error("escrow {lc_id} has no locked collateral")]
    NotLocked { lc_id: LcId },

    /// The collateral has already been paid out.
    #[error("escrow {lc_id} has already been released")]
    AlreadyReleased { lc_id: LcId },

    /// Release amount differs from the locked amount. Partial releases are refused.
    #[error("escrow {lc_id}: release of {requested} does not equal locked amount {locked}")]
    AmountMismatch {
        lc_id: LcId,
        locked: u64,
        requested: u64,
    },

    /// The source account cannot cover the debit.
    #[error("account {account} holds {available} {currency}, needs {required}")]
    InsufficientFunds {
        account: Address,
        currency: CurrencyCode,
        required: u64,
        available: u64,
    },

    /// A credit would overflow the destination balance.
    #[error("crediting {amount} {currency} to {account} overflows")]
    BalanceOverflow {
        account: Address,
        currency: CurrencyCode,
        amount: u64,
    },

    /// An audit record could not be encoded or the chain does not verify.
    #[error("audit trail error: {0}")]
    Audit(String),
}
