//! # LC Lifecycle Controller
//!
//! The only component that moves an LC between states and the only one
//! that commands an escrow release.
//!
//! Every transition follows the same sequence under the LC's entry lock:
//!
//! 1. Resolve the actor's roles against the LC and check the action's
//!    [`RequiredRole`](crate::status::RequiredRole) (`Unauthorized`).
//! 2. Check the action is legal from the current status (`InvalidState`).
//! 3. Action-specific checks: the deadline for `expire`, the proof gate for
//!    `complete`.
//! 4. Release the escrow on the staged copy. The ledger credit is the last
//!    fallible step.
//! 5. Append the transition and commit.
//!
//! Any error aborts with the LC, its escrow and the ledger unchanged.

use std::sync::Arc;

use lcx_core::{Address, Clock, CurrencyAmount, LcId, Timestamp};
use lcx_escrow::{BalanceLedger, CollateralEscrow, TransferReason};
use lcx_zkp::{ProofSubmission, ProofVerifier, PublicInputs, VerifyError};

use crate::config::EngineConfig;
use crate::error::LcError;
use crate::record::{LcRecord, TransitionRecord};
use crate::registry::LcRegistry;
use crate::status::{LcAction, LcStatus, RequiredRole};
use crate::terms::LcTerms;

pub struct LcController {
    registry: LcRegistry,
    ledger: Arc<dyn BalanceLedger>,
    verifier: ProofVerifier,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
}

impl LcController {
    /// Build a controller whose verifier registry comes from `config.verifiers`.
    pub fn new(config: EngineConfig, ledger: Arc<dyn BalanceLedger>, clock: Arc<dyn Clock>) -> Self {
        let verifier = ProofVerifier::from_config(&config.verifiers);
        for kind in &config.default_required_proofs {
            if !verifier.supports(*kind) {
                tracing::warn!(%kind, "no verifier backend configured; gated LCs cannot complete");
            }
        }
        tracing::debug!(?verifier, "lifecycle controller ready");
        Self {
            registry: LcRegistry::new(),
            ledger,
            verifier,
            clock,
            config,
        }
    }

    /// Replace the verifier registry.
    pub fn with_verifier(mut self, verifier: ProofVerifier) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn registry(&self) -> &LcRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn ledger(&self) -> &dyn BalanceLedger {
        self.ledger.as_ref()
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Issue a new LC and lock its collateral.
    ///
    /// `caller` must be the applicant named in `terms`, and `collateral` must
    /// equal `terms.currency` exactly.
    pub fn create(
        &self,
        caller: Address,
        terms: LcTerms,
        collateral: CurrencyAmount,
    ) -> Result<LcRecord, LcError> {
        let result = self.try_create(caller, terms, collateral);
        observe(LcAction::Create, caller, result.as_ref().map(|r| r.id), &result);
        result
    }

    fn try_create(
        &self,
        caller: Address,
        terms: LcTerms,
        collateral: CurrencyAmount,
    ) -> Result<LcRecord, LcError> {
        terms.validate(&self.config)?;
        if caller != terms.applicant.address {
            return Err(LcError::Unauthorized {
                actor: caller,
                action: LcAction::Create,
                required: RequiredRole::Applicant,
            });
        }
        check_collateral(&terms, &collateral)?;

        let now = self.clock.now();
        let ledger = self.ledger.as_ref();
        self.registry.insert_with(caller, |id, sequence| {
            let mut escrow = CollateralEscrow::open(id, collateral.code, collateral.exponent);
            escrow.lock(collateral, caller, ledger, now)?;
            let mut record = LcRecord {
                id,
                sequence,
                terms,
                status: LcStatus::Created,
                escrow,
                transitions: Vec::new(),
                created_at: now,
                updated_at: now,
            };
            record.apply(TransitionRecord::new(
                LcAction::Create,
                LcStatus::Created,
                caller,
                now,
            ));
            Ok(record)
        })
    }

    /// Beneficiary (or permitted confirming party) accepts the credit.
    pub fn accept(&self, id: &LcId, actor: Address) -> Result<LcRecord, LcError> {
        self.transition(id, actor, LcAction::Accept, |_, _| Ok(()))
    }

    /// Beneficiary presents proofs; on success the collateral is paid to them.
    pub fn complete(
        &self,
        id: &LcId,
        actor: Address,
        proofs: &[ProofSubmission],
    ) -> Result<LcRecord, LcError> {
        self.transition(id, actor, LcAction::Complete, |record, now| {
            self.check_proofs(record, proofs)?;
            let to = record.beneficiary();
            self.release(&mut record.escrow, to, TransferReason::Settlement, now)
        })
    }

    /// Beneficiary side declines the credit; the applicant is refunded.
    pub fn reject(&self, id: &LcId, actor: Address) -> Result<LcRecord, LcError> {
        self.transition(id, actor, LcAction::Reject, |record, now| {
            let to = record.applicant();
            self.release(&mut record.escrow, to, TransferReason::Refund, now)
        })
    }

    /// Anyone may expire an LC once its expiry has passed; the applicant is
    /// refunded.
    pub fn expire(&self, id: &LcId, caller: Address) -> Result<LcRecord, LcError> {
        self.transition(id, caller, LcAction::Expire, |record, now| {
            let expiry = record.terms.issue_details.expiry;
            if now <= expiry {
                return Err(LcError::NotYetExpired {
                    lc_id: record.id,
                    expiry,
                    now,
                });
            }
            let to = record.applicant();
            self.release(&mut record.escrow, to, TransferReason::Refund, now)
        })
    }

    fn transition<F>(
        &self,
        id: &LcId,
        actor: Address,
        action: LcAction,
        settle: F,
    ) -> Result<LcRecord, LcError>
    where
        F: FnOnce(&mut LcRecord, Timestamp) -> Result<(), LcError>,
    {
        let now = self.clock.now();
        let result = self.registry.update(id, |record| {
            let required = action.required_role();
            let roles = record.roles_of(&actor, self.config.allow_confirming_party);
            if !required.is_satisfied_by(&roles) {
                return Err(LcError::Unauthorized {
                    actor,
                    action,
                    required,
                });
            }
            if !action.allowed_from(record.status) {
                return Err(LcError::InvalidState {
                    lc_id: record.id,
                    action,
                    status: record.status,
                });
            }
            settle(record, now)?;
            let from = record.status;
            record.apply(TransitionRecord::new(action, from, actor, now));
            Ok(())
        });
        observe(action, actor, Ok(*id), &result);
        result
    }

    fn release(
        &self,
        escrow: &mut CollateralEscrow,
        to: Address,
        reason: TransferReason,
        now: Timestamp,
    ) -> Result<(), LcError> {
        let amount = escrow.locked_amount;
        escrow.release(to, amount, reason, self.ledger.as_ref(), now)?;
        Ok(())
    }

    /// Every gated kind must be present, bound to this LC's expected public
    /// inputs, and accepted by its backend.
    fn check_proofs(&self, record: &LcRecord, proofs: &[ProofSubmission]) -> Result<(), LcError> {
        if let Some(p) = proofs.iter().find(|p| !self.verifier.supports(p.kind)) {
            return Err(LcError::UnsupportedProofKind(p.kind));
        }
        for (kind, commitment) in &record.terms.proof_gate {
            let kind = *kind;
            if !self.verifier.supports(kind) {
                return Err(LcError::UnsupportedProofKind(kind));
            }
            let submission = proofs
                .iter()
                .find(|p| p.kind == kind)
                .ok_or_else(|| LcError::ProofInvalid {
                    kind,
                    reason: "required proof is missing".into(),
                })?;

            let expected = PublicInputs::new(record.id, kind, *commitment);
            if submission.public_inputs != expected {
                return Err(LcError::ProofInvalid {
                    kind,
                    reason: "public inputs are not bound to this LC's commitment".into(),
                });
            }

            match self.verifier.verify(kind, &submission.proof_bytes, &expected) {
                Ok(true) => {}
                Ok(false) => {
                    return Err(LcError::ProofInvalid {
                        kind,
                        reason: "rejected by verifier".into(),
                    })
                }
                Err(VerifyError::UnsupportedProofKind(k)) => {
                    return Err(LcError::UnsupportedProofKind(k))
                }
                Err(e) => {
                    return Err(LcError::ProofInvalid {
                        kind,
                        reason: e.to_string(),
                    })
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for LcController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LcController")
            .field("registry", &self.registry)
            .field("verifier", &self.verifier)
            .field("config", &self.config)
            .finish()
    }
}

fn check_collateral(terms: &LcTerms, collateral: &CurrencyAmount) -> Result<(), LcError> {
    if collateral.code != terms.currency.code {
        return Err(LcError::CurrencyMismatch {
            expected: terms.currency.code.to_string(),
            actual: collateral.code.to_string(),
        });
    }
    if collateral.exponent != terms.currency.exponent || collateral.amount != terms.currency.amount
    {
        return Err(LcError::InvalidTerms(format!(
            "collateral {collateral} does not equal LC amount {}",
            terms.currency
        )));
    }
    Ok(())
}

fn observe(
    action: LcAction,
    actor: Address,
    lc_id: Result<LcId, &LcError>,
    result: &Result<LcRecord, LcError>,
) {
    let lc = lc_id.map(|id| id.short()).unwrap_or_default();
    match result {
        Ok(record) => {
            metrics::counter!("lcx_transitions_total", "action" => action.as_str(), "outcome" => "committed")
                .increment(1);
            tracing::info!(%action, lc_id = %lc, %actor, status = %record.status, "transition committed");
        }
        Err(e) => {
            metrics::counter!("lcx_transitions_total", "action" => action.as_str(), "outcome" => "failed")
                .increment(1);
            tracing::warn!(%action, lc_id = %lc, %actor, kind = %e.kind(), error = %e, "transition refused");
        }
    }
}
