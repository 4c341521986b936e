//! # Transfer Audit Trail
//!
//! Every fund movement through an escrow produces a [`TransferRecord`]. The
//! records of one escrow form a hash chain: each record's digest covers its
//! payload and the previous record's digest, so a rewritten or dropped
//! record breaks verification of everything after it.
//!
//! ## Security Invariant
//!
//! Record digests are computed over `CanonicalBytes` of the payload, never
//! over ad-hoc serializations.

use lcx_core::{sha256_digest, Address, CanonicalBytes, CurrencyAmount, LcId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::EscrowError;

/// Why funds moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferReason {
    /// Applicant collateral entering escrow.
    Lock,
    /// Payout to the beneficiary on completion.
    Settlement,
    /// Return to the applicant on rejection or expiry.
    Refund,
}

impl TransferReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lock => "lock",
            Self::Settlement => "settlement",
            Self::Refund => "refund",
        }
    }
}

impl std::fmt::Display for TransferReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// A ledger account.
    Account(Address),
    /// The escrow of an LC.
    Escrow(LcId),
}

/// The hashed content of a transfer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPayload {
    pub lc_id: LcId,
    /// Position in this escrow's chain, from 0.
    pub sequence: u64,
    pub source: Endpoint,
    pub destination: Endpoint,
    pub amount: CurrencyAmount,
    pub reason: TransferReason,
    pub at: Timestamp,
    /// Digest of the previous record, `None` for the first.
    pub prev_digest: Option<String>,
}

/// A durable, chained record of one fund movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    #[serde(flatten)]
    pub payload: TransferPayload,
    /// Hex SHA-256 of the canonical payload.
    pub digest: String,
}

impl TransferPayload {
    fn digest_hex(&self) -> Result<String, EscrowError> {
        let canonical = CanonicalBytes::new(self)
            .map_err(|e| EscrowError::Audit(format!("failed to canonicalize transfer: {e}")))?;
        Ok(sha256_digest(&canonical).to_hex())
    }

    /// Seal the payload into a record.
    pub fn seal(self) -> Result<TransferRecord, EscrowError> {
        let digest = self.digest_hex()?;
        Ok(TransferRecord {
            payload: self,
            digest,
        })
    }
}

/// Build the next record in `chain` without appending it.
pub(crate) fn next_record(
    chain: &[TransferRecord],
    lc_id: LcId,
    source: Endpoint,
    destination: Endpoint,
    amount: CurrencyAmount,
    reason: TransferReason,
    at: Timestamp,
) -> Result<TransferRecord, EscrowError> {
    TransferPayload {
        lc_id,
        sequence: chain.len() as u64,
        source,
        destination,
        amount,
        reason,
        at,
        prev_digest: chain.last().map(|r| r.digest.clone()),
    }
    .seal()
}

/// Verify an escrow's chain: contiguous sequence numbers, correct links,
/// and digests that match their payloads.
pub fn verify_chain(chain: &[TransferRecord]) -> Result<(), EscrowError> {
    let mut prev: Option<&str> = None;
    for (i, record) in chain.iter().enumerate() {
        let p = &record.payload;
        if p.sequence != i as u64 {
            return Err(EscrowError::Audit(format!(
                "record {i} has sequence {}",
                p.sequence
            )));
        }
        if p.prev_digest.as_deref() != prev {
            return Err(EscrowError::Audit(format!("record {i} does not link to its predecessor")));
        }
        if p.digest_hex()? != record.digest {
            return Err(EscrowError::Audit(format!("record {i} digest does not match payload")));
        }
        prev = Some(&record.digest);
    }
    Ok(())
}
