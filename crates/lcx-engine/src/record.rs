//! The stored LC record: terms, status, escrow and the transition log.

use lcx_core::{Address, LcId, Timestamp};
use lcx_escrow::CollateralEscrow;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::{LcAction, LcStatus, Role};
use crate::terms::LcTerms;

/// One committed status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub transition_id: Uuid,
    pub action: LcAction,
    pub from: LcStatus,
    pub to: LcStatus,
    pub actor: Address,
    pub at: Timestamp,
}

impl TransitionRecord {
    pub fn new(action: LcAction, from: LcStatus, actor: Address, at: Timestamp) -> Self {
        Self {
            transition_id: Uuid::new_v4(),
            action,
            from,
            to: action.target(),
            actor,
            at,
        }
    }
}

/// A Letter of Credit as held by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcRecord {
    pub id: LcId,
    /// Position in the applicant's history.
    pub sequence: u64,
    pub terms: LcTerms,
    pub status: LcStatus,
    pub escrow: CollateralEscrow,
    /// Append-only. The first entry is always `create`.
    pub transitions: Vec<TransitionRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl LcRecord {
    pub fn applicant(&self) -> Address {
        self.terms.applicant.address
    }

    pub fn beneficiary(&self) -> Address {
        self.terms.beneficiary.address
    }

    /// Roles `actor` holds on this LC.
    ///
    /// The confirming party counts only when the confirmation instructions
    /// permit one and `allow_confirming` is set.
    pub fn roles_of(&self, actor: &Address, allow_confirming: bool) -> Vec<Role> {
        let mut roles = Vec::new();
        if *actor == self.terms.applicant.address {
            roles.push(Role::Applicant);
        }
        if *actor == self.terms.beneficiary.address {
            roles.push(Role::Beneficiary);
        }
        if allow_confirming && self.terms.confirming_party.as_ref() == Some(actor) {
            let permitted = self
                .terms
                .confirmation_instructions()
                .map(|c| c.permits_confirming_party())
                .unwrap_or(false);
            if permitted {
                roles.push(Role::ConfirmingParty);
            }
        }
        roles
    }

    /// Append a transition and move to its target status.
    pub(crate) fn apply(&mut self, transition: TransitionRecord) {
        self.status = transition.to;
        self.updated_at = transition.at;
        self.transitions.push(transition);
    }
}
