//! # LC Terms
//!
//! The immutable commercial and legal terms of a Letter of Credit, as
//! submitted to `create`. Coded options are stored as their numeric codes;
//! labels are resolved only at the presentation boundary.

use std::collections::BTreeMap;

use lcx_core::{
    Address, AvailableWithBy, ConfirmationInstructions, CurrencyAmount, FormOfDocCredit, Timestamp,
};
use lcx_zkp::{Commitment, ProofKind};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::LcError;

/// A party to the credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Ledger account.
    pub address: Address,
    /// Off-ledger identity (postal or institutional address, mailbox).
    pub off_ledger_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDetails {
    /// Rules identifier, e.g. `UCP LATEST VERSION`.
    pub applicable_rules: String,
    pub date_of_issue: Timestamp,
    pub expiry: Timestamp,
    pub place_of_expiry: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub partial_shipments_allowed: bool,
    pub transshipment_allowed: bool,
    pub port_of_loading: String,
    pub port_of_discharge: String,
}

/// Terms of a Letter of Credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcTerms {
    pub applicant: Party,
    pub beneficiary: Party,
    pub currency: CurrencyAmount,
    pub additional_conditions: String,
    pub description_of_goods: String,
    pub documents_required: String,
    /// Code into `AVAILABLE_WITH_BY`.
    pub available_with_by: u8,
    /// Code into `CONFIRMATION_INSTRUCTIONS`.
    pub confirmation_instructions: u8,
    pub issue_details: IssueDetails,
    /// Days after shipment within which documents must be presented.
    pub period_for_presentation: u32,
    pub doc_credit_number: String,
    /// e.g. `1/1`.
    pub sequence_of_total: String,
    #[serde(default)]
    pub form_of_doc_credit: FormOfDocCredit,
    pub shipping_details: ShippingDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirming_party: Option<Address>,
    /// Required proof kinds and the public commitment each proof must match.
    #[serde(default)]
    pub proof_gate: BTreeMap<ProofKind, Commitment>,
}

impl LcTerms {
    pub fn available_with_by(&self) -> Result<AvailableWithBy, LcError> {
        AvailableWithBy::from_code(self.available_with_by)
            .map_err(|e| LcError::InvalidTerms(e.to_string()))
    }

    pub fn confirmation_instructions(&self) -> Result<ConfirmationInstructions, LcError> {
        ConfirmationInstructions::from_code(self.confirmation_instructions)
            .map_err(|e| LcError::InvalidTerms(e.to_string()))
    }

    /// Check the terms for internal consistency and against `config`.
    ///
    /// Does not check the caller or the collateral; the controller does that.
    pub fn validate(&self, config: &EngineConfig) -> Result<(), LcError> {
        let invalid = |msg: &str| Err(LcError::InvalidTerms(msg.to_string()));

        if self.applicant.address.is_zero() {
            return invalid("applicant address is the zero address");
        }
        if self.beneficiary.address.is_zero() {
            return invalid("beneficiary address is the zero address");
        }
        if self.beneficiary.off_ledger_address.trim().is_empty() {
            return invalid("beneficiary off-ledger address is empty");
        }
        for (field, value) in [
            ("doc_credit_number", &self.doc_credit_number),
            ("documents_required", &self.documents_required),
            ("issue_details.place_of_expiry", &self.issue_details.place_of_expiry),
        ] {
            if value.trim().is_empty() {
                return Err(LcError::InvalidTerms(format!("{field} is empty")));
            }
        }
        if self.beneficiary.address == self.applicant.address {
            return invalid("beneficiary and applicant are the same account");
        }
        if self.currency.is_zero() {
            return invalid("amount must be positive");
        }
        if self.currency.exponent != config.amount_exponent {
            return Err(LcError::InvalidTerms(format!(
                "amount exponent {} differs from configured exponent {}",
                self.currency.exponent, config.amount_exponent
            )));
        }
        if self.issue_details.expiry <= self.issue_details.date_of_issue {
            return invalid("expiry must be after the date of issue");
        }

        self.available_with_by()?;
        let instructions = self.confirmation_instructions()?;

        if let Some(confirmer) = self.confirming_party {
            if confirmer.is_zero() {
                return invalid("confirming party is the zero address");
            }
            if confirmer == self.applicant.address {
                return invalid("applicant cannot confirm its own credit");
            }
            if !instructions.permits_confirming_party() {
                return Err(LcError::InvalidTerms(format!(
                    "confirming party named but confirmation instructions are {}",
                    instructions.label()
                )));
            }
        }

        if self.proof_gate.is_empty() {
            return invalid("proof gate requires at least one proof kind");
        }
        for kind in &config.default_required_proofs {
            if !self.proof_gate.contains_key(kind) {
                return Err(LcError::InvalidTerms(format!(
                    "proof gate has no commitment for required kind {kind}"
                )));
            }
        }
        Ok(())
    }
}
