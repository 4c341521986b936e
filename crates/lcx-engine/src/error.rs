//! # Engine Error Types
//!
//! `LcError` is what every controller operation returns. Each variant maps to
//! one stable [`LcErrorKind`], which is what receipts carry to callers.
//! Every error is recoverable and leaves the LC and its escrow unchanged.

use lcx_core::{Address, CanonicalizationError, CurrencyCode, LcId, Timestamp};
use lcx_escrow::EscrowError;
use lcx_zkp::ProofKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::status::{LcAction, LcStatus, RequiredRole};

/// Errors raised by LC lifecycle operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LcError {
    /// Terms are absent, malformed or inconsistent with the collateral.
    #[error("invalid terms: {0}")]
    InvalidTerms(String),

    /// The applicant already has an open LC.
    #[error("applicant {applicant} already has open LC {existing}")]
    DuplicateLc { applicant: Address, existing: LcId },

    #[error("account {account} holds {available} {currency}, needs {required}")]
    InsufficientFunds {
        account: Address,
        currency: CurrencyCode,
        required: u64,
        available: u64,
    },

    #[error("LC not found: {0}")]
    NotFound(String),

    /// The actor does not hold the role the action requires.
    #[error("{actor} may not {action}: requires {required}")]
    Unauthorized {
        actor: Address,
        action: LcAction,
        required: RequiredRole,
    },

    /// The action is not valid from the LC's current status.
    #[error("LC {lc_id}: cannot {action} in status {status}")]
    InvalidState {
        lc_id: LcId,
        action: LcAction,
        status: LcStatus,
    },

    #[error("currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch { expected: String, actual: String },

    /// A required proof is missing, bound to other inputs, malformed, or rejected.
    #[error("proof invalid for {kind}: {reason}")]
    ProofInvalid { kind: ProofKind, reason: String },

    #[error("no verifier registered for proof kind {0}")]
    UnsupportedProofKind(ProofKind),

    #[error("LC {lc_id} expires at {expiry}; now is {now}")]
    NotYetExpired {
        lc_id: LcId,
        expiry: Timestamp,
        now: Timestamp,
    },

    #[error("escrow for LC {0} has already been released")]
    AlreadyReleased(LcId),

    #[error("escrow for LC {0} is already locked")]
    AlreadyLocked(LcId),

    #[error("escrow for LC {0} holds no collateral")]
    NotLocked(LcId),

    #[error("escrow for LC {0}: amount must be positive")]
    NonPositiveAmount(LcId),

    #[error("escrow for LC {lc_id}: release of {requested} does not equal locked {locked}")]
    AmountMismatch {
        lc_id: LcId,
        locked: u64,
        requested: u64,
    },

    /// Canonicalization, arithmetic or audit faults.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Stable error classification carried on failed receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LcErrorKind {
    InvalidTerms,
    #[serde(rename = "DuplicateLC")]
    DuplicateLc,
    InsufficientFunds,
    NotFound,
    Unauthorized,
    InvalidState,
    CurrencyMismatch,
    ProofInvalid,
    UnsupportedProofKind,
    NotYetExpired,
    AlreadyReleased,
    AlreadyLocked,
    NotLocked,
    NonPositiveAmount,
    AmountMismatch,
    Internal,
}

impl LcErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidTerms => "InvalidTerms",
            Self::DuplicateLc => "DuplicateLC",
            Self::InsufficientFunds => "InsufficientFunds",
            Self::NotFound => "NotFound",
            Self::Unauthorized => "Unauthorized",
            Self::InvalidState => "InvalidState",
            Self::CurrencyMismatch => "CurrencyMismatch",
            Self::ProofInvalid => "ProofInvalid",
            Self::UnsupportedProofKind => "UnsupportedProofKind",
            Self::NotYetExpired => "NotYetExpired",
            Self::AlreadyReleased => "AlreadyReleased",
            Self::AlreadyLocked => "AlreadyLocked",
            Self::NotLocked => "NotLocked",
            Self::NonPositiveAmount => "NonPositiveAmount",
            Self::AmountMismatch => "AmountMismatch",
            Self::Internal => "Internal",
        }
    }
}

impl std::fmt::Display for LcErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LcError {
    pub fn kind(&self) -> LcErrorKind {
        match self {
            Self::InvalidTerms(_) => LcErrorKind::InvalidTerms,
            Self::DuplicateLc { .. } => LcErrorKind::DuplicateLc,
            Self::InsufficientFunds { .. } => LcErrorKind::InsufficientFunds,
            Self::NotFound(_) => LcErrorKind::NotFound,
            Self::Unauthorized { .. } => LcErrorKind::Unauthorized,
            Self::InvalidState { .. } => LcErrorKind::InvalidState,
            Self::CurrencyMismatch { .. } => LcErrorKind::CurrencyMismatch,
            Self::ProofInvalid { .. } => LcErrorKind::ProofInvalid,
            Self::UnsupportedProofKind(_) => LcErrorKind::UnsupportedProofKind,
            Self::NotYetExpired { .. } => LcErrorKind::NotYetExpired,
            Self::AlreadyReleased(_) => LcErrorKind::AlreadyReleased,
            Self::AlreadyLocked(_) => LcErrorKind::AlreadyLocked,
            Self::NotLocked(_) => LcErrorKind::NotLocked,
            Self::NonPositiveAmount(_) => LcErrorKind::NonPositiveAmount,
            Self::AmountMismatch { .. } => LcErrorKind::AmountMismatch,
            Self::Internal(_) => LcErrorKind::Internal,
        }
    }
}

impl From<EscrowError> for LcError {
    fn from(e: EscrowError) -> Self {
        match e {
            EscrowError::CurrencyMismatch {
                expected, actual, ..
            } => Self::CurrencyMismatch { expected, actual },
            EscrowError::NonPositiveAmount { lc_id } => Self::NonPositiveAmount(lc_id),
            EscrowError::AlreadyLocked { lc_id } => Self::AlreadyLocked(lc_id),
            EscrowError::NotLocked { lc_id } => Self::NotLocked(lc_id),
            EscrowError::AlreadyReleased { lc_id } => Self::AlreadyReleased(lc_id),
            EscrowError::AmountMismatch {
                lc_id,
                locked,
                requested,
            } => Self::AmountMismatch {
                lc_id,
                locked,
                requested,
            },
            EscrowError::InsufficientFunds {
                account,
                currency,
                required,
                available,
            } => Self::InsufficientFunds {
                account,
                currency,
                required,
                available,
            },
            e @ (EscrowError::BalanceOverflow { .. } | EscrowError::Audit(_)) => {
                Self::Internal(e.to_string())
            }
        }
    }
}

impl From<CanonicalizationError> for LcError {
    fn from(e: CanonicalizationError) -> Self {
        Self::Internal(format!("canonicalization: {e}"))
    }
}
