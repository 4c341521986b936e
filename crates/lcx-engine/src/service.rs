//! # LC Service
//!
//! The facade the presentation layer and the CLI call. Every mutating call
//! returns a [`TransitionReceipt`]; a failure is reported as
//! [`Outcome::Failed`](crate::receipt::Outcome) and never as success.

use std::sync::Arc;

use lcx_core::{Address, Clock, CurrencyAmount, LcId};
use lcx_escrow::BalanceLedger;
use lcx_zkp::{ProofSubmission, ProofVerifier};

use crate::config::EngineConfig;
use crate::controller::LcController;
use crate::error::LcError;
use crate::query::{LcQuery, LcView};
use crate::receipt::TransitionReceipt;
use crate::record::LcRecord;
use crate::status::LcAction;
use crate::terms::LcTerms;

#[derive(Debug)]
pub struct LcService {
    controller: LcController,
}

impl LcService {
    pub fn new(config: EngineConfig, ledger: Arc<dyn BalanceLedger>, clock: Arc<dyn Clock>) -> Self {
        Self::from_controller(LcController::new(config, ledger, clock))
    }

    pub fn from_controller(controller: LcController) -> Self {
        Self { controller }
    }

    pub fn with_verifier(self, verifier: ProofVerifier) -> Self {
        Self::from_controller(self.controller.with_verifier(verifier))
    }

    pub fn controller(&self) -> &LcController {
        &self.controller
    }

    pub fn query(&self) -> LcQuery<'_> {
        LcQuery::new(self.controller.registry())
    }

    /// The applicant's open LC, else their most recent. The zero address,
    /// used by clients with no connected account, has none.
    pub fn get_lc(&self, applicant: &Address) -> Option<LcView> {
        if applicant.is_zero() {
            return None;
        }
        self.query().get_by_applicant(applicant).ok()
    }

    pub fn create_lc(
        &self,
        caller: Address,
        terms: LcTerms,
        collateral: CurrencyAmount,
    ) -> TransitionReceipt {
        let result = self.controller.create(caller, terms, collateral);
        // Only a duplicate create has a subject: the LC that is still open.
        let existing = match &result {
            Err(LcError::DuplicateLc { existing, .. }) => Some(*existing),
            _ => None,
        };
        self.receipt(LcAction::Create, existing, result)
    }

    pub fn accept_lc(&self, id: &LcId, actor: Address) -> TransitionReceipt {
        let result = self.controller.accept(id, actor);
        self.receipt(LcAction::Accept, Some(*id), result)
    }

    pub fn complete_lc(
        &self,
        id: &LcId,
        actor: Address,
        proofs: &[ProofSubmission],
    ) -> TransitionReceipt {
        let result = self.controller.complete(id, actor, proofs);
        self.receipt(LcAction::Complete, Some(*id), result)
    }

    pub fn reject_lc(&self, id: &LcId, actor: Address) -> TransitionReceipt {
        let result = self.controller.reject(id, actor);
        self.receipt(LcAction::Reject, Some(*id), result)
    }

    pub fn expire_lc(&self, id: &LcId, caller: Address) -> TransitionReceipt {
        let result = self.controller.expire(id, caller);
        self.receipt(LcAction::Expire, Some(*id), result)
    }

    fn receipt(
        &self,
        action: LcAction,
        subject: Option<LcId>,
        result: Result<LcRecord, LcError>,
    ) -> TransitionReceipt {
        let at = self.controller.now();
        match result {
            Ok(record) => TransitionReceipt::committed(record.id, action, record.status, at),
            Err(e) => {
                let status = subject
                    .and_then(|id| self.controller.registry().get(&id))
                    .map(|r| r.status);
                let lc_id = subject.filter(|_| status.is_some());
                TransitionReceipt::failed(lc_id, action, &e, status, at)
            }
        }
    }
}
