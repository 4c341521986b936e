//! # Query Interface
//!
//! Read-only projection of registry records into [`LcView`], the shape the
//! presentation layer renders. Display strings (decimal amount, option
//! labels) are computed here and nowhere else.

use lcx_core::{Address, LcId, Timestamp};
use lcx_escrow::{EscrowStatus, TransferRecord};
use serde::{Deserialize, Serialize};

use crate::error::LcError;
use crate::record::{LcRecord, TransitionRecord};
use crate::registry::LcRegistry;
use crate::status::LcStatus;
use crate::terms::LcTerms;

/// Human-readable renderings of coded fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFields {
    /// e.g. `500.000000`.
    pub amount: String,
    pub available_with_by: String,
    pub confirmation_instructions: String,
    pub form_of_doc_credit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowView {
    pub status: EscrowStatus,
    pub locked_amount: u64,
    pub depositor: Option<Address>,
    pub released: bool,
    pub released_to: Option<Address>,
    pub transfers: Vec<TransferRecord>,
}

/// What `getLC` returns: every stored term plus status and derived fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcView {
    pub id: LcId,
    pub status: LcStatus,
    #[serde(flatten)]
    pub terms: LcTerms,
    pub display: DisplayFields,
    pub escrow: EscrowView,
    pub transitions: Vec<TransitionRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl LcView {
    pub fn from_record(record: &LcRecord) -> Self {
        let terms = &record.terms;
        let label = |r: Result<&'static str, LcError>| r.unwrap_or("UNKNOWN").to_string();
        Self {
            id: record.id,
            status: record.status,
            display: DisplayFields {
                amount: terms.currency.to_decimal_string(),
                available_with_by: label(terms.available_with_by().map(|o| o.label())),
                confirmation_instructions: label(
                    terms.confirmation_instructions().map(|o| o.label()),
                ),
                form_of_doc_credit: terms.form_of_doc_credit.as_str().to_string(),
            },
            escrow: EscrowView {
                status: record.escrow.status(),
                locked_amount: record.escrow.locked_amount,
                depositor: record.escrow.depositor,
                released: record.escrow.released,
                released_to: record.escrow.release.map(|r| r.to),
                transfers: record.escrow.transfers.clone(),
            },
            transitions: record.transitions.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
            terms: terms.clone(),
        }
    }
}

/// Read access over a registry. Never mutates.
#[derive(Debug, Clone, Copy)]
pub struct LcQuery<'a> {
    registry: &'a LcRegistry,
}

impl<'a> LcQuery<'a> {
    pub fn new(registry: &'a LcRegistry) -> Self {
        Self { registry }
    }

    pub fn get(&self, id: &LcId) -> Result<LcView, LcError> {
        self.registry
            .get(id)
            .map(|r| LcView::from_record(&r))
            .ok_or_else(|| LcError::NotFound(id.to_string()))
    }

    /// The applicant's open LC, else their most recent one.
    pub fn get_by_applicant(&self, applicant: &Address) -> Result<LcView, LcError> {
        let id = self
            .registry
            .open_for(applicant)
            .or_else(|| self.registry.history(applicant).last().copied())
            .ok_or_else(|| LcError::NotFound(format!("no LC for applicant {applicant}")))?;
        self.get(&id)
    }

    /// Every LC the applicant created, oldest first.
    pub fn list_by_applicant(&self, applicant: &Address) -> Result<Vec<LcView>, LcError> {
        let ids = self.registry.history(applicant);
        if ids.is_empty() {
            return Err(LcError::NotFound(format!("no LC for applicant {applicant}")));
        }
        ids.iter().map(|id| self.get(id)).collect()
    }
}
