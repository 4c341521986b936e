//! # Collateral Escrow
//!
//! One escrow per LC. It is locked once with the applicant's collateral and
//! released once, in full, to exactly one party.
//!
//! ## Security Invariant
//!
//! - `locked_amount` is written only by `lock` and never increased.
//! - `released` flips false → true only inside `release`.
//! - Each operation performs every fallible step (validation, audit
//!   encoding, the ledger movement) before mutating `self`, so an error
//!   leaves the escrow exactly as it was.
//!
//! The escrow is passive. Only the lifecycle controller calls `release`.

use lcx_core::{Address, CurrencyAmount, CurrencyCode, LcId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::audit::{next_record, Endpoint, TransferReason, TransferRecord};
use crate::error::EscrowError;
use crate::ledger::BalanceLedger;

/// Observable phase of an escrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EscrowStatus {
    /// Opened, no collateral yet.
    Pending,
    /// Collateral held.
    Locked,
    /// Collateral paid out. Terminal.
    Released,
}

impl EscrowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Locked => "LOCKED",
            Self::Released => "RELEASED",
        }
    }
}

impl std::fmt::Display for EscrowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who received the collateral, and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    pub to: Address,
    pub amount: u64,
    pub reason: TransferReason,
    pub at: Timestamp,
}

/// Escrow account holding one LC's collateral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateralEscrow {
    pub lc_id: LcId,
    pub currency_code: CurrencyCode,
    pub exponent: u32,
    /// Minor units. Zero until locked.
    pub locked_amount: u64,
    pub depositor: Option<Address>,
    pub released: bool,
    pub release: Option<ReleaseRecord>,
    /// Hash-chained record of every movement.
    pub transfers: Vec<TransferRecord>,
}

impl CollateralEscrow {
    /// Open an empty escrow denominated in `code` at `exponent`.
    pub fn open(lc_id: LcId, currency_code: CurrencyCode, exponent: u32) -> Self {
        Self {
            lc_id,
            currency_code,
            exponent,
            locked_amount: 0,
            depositor: None,
            released: false,
            release: None,
            transfers: Vec::new(),
        }
    }

    pub fn status(&self) -> EscrowStatus {
        if self.released {
            EscrowStatus::Released
        } else if self.depositor.is_some() {
            EscrowStatus::Locked
        } else {
            EscrowStatus::Pending
        }
    }

    pub fn is_locked(&self) -> bool {
        self.depositor.is_some()
    }

    /// Collateral currently held, zero once released.
    pub fn held(&self) -> CurrencyAmount {
        let amount = if self.released { 0 } else { self.locked_amount };
        CurrencyAmount::new(self.currency_code, amount, self.exponent)
    }

    /// Move `amount` from `from` into the escrow.
    ///
    /// # Errors
    ///
    /// `AlreadyLocked`, `CurrencyMismatch` (code or exponent), `NonPositiveAmount`,
    /// or the ledger's `InsufficientFunds`.
    pub fn lock(
        &mut self,
        amount: CurrencyAmount,
        from: Address,
        ledger: &dyn BalanceLedger,
        at: Timestamp,
    ) -> Result<&TransferRecord, EscrowError> {
        if self.is_locked() {
            return Err(EscrowError::AlreadyLocked { lc_id: self.lc_id });
        }
        if amount.code != self.currency_code || amount.exponent != self.exponent {
            return Err(EscrowError::CurrencyMismatch {
                lc_id: self.lc_id,
                expected: format!("{}/{}", self.currency_code, self.exponent),
                actual: format!("{}/{}", amount.code, amount.exponent),
            });
        }
        if amount.is_zero() {
            return Err(EscrowError::NonPositiveAmount { lc_id: self.lc_id });
        }

        let record = next_record(
            &self.transfers,
            self.lc_id,
            Endpoint::Account(from),
            Endpoint::Escrow(self.lc_id),
            amount,
            TransferReason::Lock,
            at,
        )?;
        ledger.debit(&from, &amount)?;

        self.locked_amount = amount.amount;
        self.depositor = Some(from);
        self.transfers.push(record);
        tracing::debug!(lc_id = %self.lc_id.short(), %amount, depositor = %from, "collateral locked");
        Ok(&self.transfers[self.transfers.len() - 1])
    }

    /// Pay the full locked amount to `to`.
    ///
    /// `reason` must be `Settlement` or `Refund`.
    ///
    /// # Errors
    ///
    /// `NotLocked`, `AlreadyReleased`, `AmountMismatch`, or the ledger's
    /// `BalanceOverflow`.
    pub fn release(
        &mut self,
        to: Address,
        amount: u64,
        reason: TransferReason,
        ledger: &dyn BalanceLedger,
        at: Timestamp,
    ) -> Result<&TransferRecord, EscrowError> {
        if !self.is_locked() {
            return Err(EscrowError::NotLocked { lc_id: self.lc_id });
        }
        if self.released {
            return Err(EscrowError::AlreadyReleased { lc_id: self.lc_id });
        }
        if amount != self.locked_amount {
            return Err(EscrowError::AmountMismatch {
                lc_id: self.lc_id,
                locked: self.locked_amount,
                requested: amount,
            });
        }
        if reason == TransferReason::Lock {
            return Err(EscrowError::Audit(format!(
                "escrow {}: release reason must be settlement or refund",
                self.lc_id
            )));
        }

        let value = CurrencyAmount::new(self.currency_code, amount, self.exponent);
        let record = next_record(
            &self.transfers,
            self.lc_id,
            Endpoint::Escrow(self.lc_id),
            Endpoint::Account(to),
            value,
            reason,
            at,
        )?;
        ledger.credit(&to, &value)?;

        self.released = true;
        self.release = Some(ReleaseRecord {
            to,
            amount,
            reason,
            at,
        });
        self.transfers.push(record);
        tracing::debug!(lc_id = %self.lc_id.short(), amount = %value, %to, %reason, "collateral released");
        Ok(&self.transfers[self.transfers.len() - 1])
    }
}
