//! # Proof gate
//!
//! A proof is evidence for one LC only: proofs generated for another LC, or
//! against a different commitment, never release funds. Checked for every
//! proof kind and both backends.

mod common;

use common::*;
use lcx_core::LcId;
use lcx_engine::{EngineConfig, LcErrorKind, LcStatus};
use lcx_zkp::{
    AttestationProofSystem, AttestorKeyPair, BackendConfig, Commitment, MockProofSystem,
    ProofKind, ProofSubmission, PublicInputs,
};

fn commitment(kind: ProofKind) -> Commitment {
    match kind {
        ProofKind::WaybillAuthenticity => Commitment::for_waybill(WAYBILL),
        ProofKind::EmailOwnership => Commitment::for_mailbox(MAILBOX).unwrap(),
    }
}

fn attestor() -> AttestorKeyPair {
    AttestorKeyPair::from_seed(&[7u8; 32])
}

/// Engine gating on `kind` alone, verified by `backend`.
fn world_gated_on(kind: ProofKind, attested: bool) -> World {
    let mut config = EngineConfig {
        default_required_proofs: vec![kind],
        ..EngineConfig::development()
    };
    if attested {
        config.verifiers.insert(
            kind,
            BackendConfig::Ed25519Attestation {
                attestor_public_key: attestor().public_key(),
            },
        );
    }
    World::new(config)
}

fn create_gated(world: &World, applicant: lcx_core::Address, kind: ProofKind) -> LcId {
    let mut t = terms_for(applicant, beneficiary(), FIVE_HUNDRED);
    t.proof_gate.clear();
    t.proof_gate.insert(kind, commitment(kind));
    world.fund(applicant, FIVE_HUNDRED);
    let receipt = world.service.create_lc(applicant, t, usd(FIVE_HUNDRED));
    let id = receipt.lc_id.unwrap();
    world.service.accept_lc(&id, beneficiary());
    id
}

fn prove(kind: ProofKind, lc: LcId, commitment: Commitment, attested: bool) -> ProofSubmission {
    let inputs = PublicInputs::new(lc, kind, commitment);
    if attested {
        AttestationProofSystem.attest(&attestor(), &inputs).unwrap()
    } else {
        MockProofSystem.prove_statement(&inputs).unwrap()
    }
}

#[test]
fn cross_lc_replay_is_rejected_for_every_kind_and_backend() {
    for kind in ProofKind::ALL {
        for attested in [false, true] {
            let world = world_gated_on(kind, attested);
            let lc_a = create_gated(&world, addr(0x01), kind);
            let lc_b = create_gated(&world, addr(0x02), kind);

            let for_a = prove(kind, lc_a, commitment(kind), attested);
            let replay = world.service.complete_lc(&lc_b, beneficiary(), &[for_a.clone()]);
            assert_eq!(
                replay.error_kind(),
                Some(LcErrorKind::ProofInvalid),
                "{kind} attested={attested}"
            );
            assert_eq!(replay.status, Some(LcStatus::Accepted));

            // Relabelling the statement does not help: the proof bytes are
            // bound to the original LC id.
            let mut relabelled = for_a.clone();
            relabelled.public_inputs.lc_id = lc_b;
            let relabel = world.service.complete_lc(&lc_b, beneficiary(), &[relabelled]);
            assert_eq!(relabel.error_kind(), Some(LcErrorKind::ProofInvalid));
            assert_eq!(world.balance(beneficiary()), 0);

            let genuine = world.service.complete_lc(&lc_a, beneficiary(), &[for_a]);
            assert!(genuine.is_committed(), "{kind} attested={attested}: {genuine:?}");
            assert_eq!(world.balance(beneficiary()), FIVE_HUNDRED);
        }
    }
}

#[test]
fn proof_for_a_different_waybill_is_rejected() {
    let world = world_gated_on(ProofKind::WaybillAuthenticity, false);
    let id = create_gated(&world, addr(0x01), ProofKind::WaybillAuthenticity);
    let forged = prove(
        ProofKind::WaybillAuthenticity,
        id,
        Commitment::for_waybill(b"BILL OF LADING BL-2026-9999"),
        false,
    );
    let r = world.service.complete_lc(&id, beneficiary(), &[forged]);
    assert_eq!(r.error_kind(), Some(LcErrorKind::ProofInvalid));
}

#[test]
fn malformed_proof_bytes_are_rejected_not_fatal() {
    let world = world_gated_on(ProofKind::WaybillAuthenticity, false);
    let id = create_gated(&world, addr(0x01), ProofKind::WaybillAuthenticity);
    let mut truncated = waybill_proof(id);
    truncated.proof_bytes.truncate(5);
    let r = world.service.complete_lc(&id, beneficiary(), &[truncated]);
    assert_eq!(r.error_kind(), Some(LcErrorKind::ProofInvalid));
    // The genuine proof still goes through afterwards.
    assert!(world
        .service
        .complete_lc(&id, beneficiary(), &[waybill_proof(id)])
        .is_committed());
}

#[test]
fn unconfigured_kind_is_unsupported() {
    let mut config = EngineConfig::development();
    config.verifiers.remove(&ProofKind::EmailOwnership);
    let world = World::new(config);
    world.fund(applicant(), FIVE_HUNDRED);

    let mut t = terms();
    t.proof_gate
        .insert(ProofKind::EmailOwnership, commitment(ProofKind::EmailOwnership));
    let id = world
        .service
        .create_lc(applicant(), t, usd(FIVE_HUNDRED))
        .lc_id
        .unwrap();
    world.service.accept_lc(&id, beneficiary());

    let email = prove(ProofKind::EmailOwnership, id, commitment(ProofKind::EmailOwnership), false);
    let r = world
        .service
        .complete_lc(&id, beneficiary(), &[waybill_proof(id), email]);
    assert_eq!(r.error_kind(), Some(LcErrorKind::UnsupportedProofKind));
    assert_eq!(world.balance(beneficiary()), 0);
}

#[test]
fn default_config_refuses_proofs_built_from_the_public_view() {
    let world = World::new(EngineConfig::default());
    world.fund(applicant(), FIVE_HUNDRED);
    let id = world.create();
    world.service.accept_lc(&id, beneficiary());

    // Everything a mock proof needs is readable by anyone.
    let view = world.service.get_lc(&applicant()).unwrap();
    let gate = view.terms.proof_gate[&ProofKind::WaybillAuthenticity];
    let inputs = PublicInputs::new(view.id, ProofKind::WaybillAuthenticity, gate);
    let proof = MockProofSystem.prove_statement(&inputs).unwrap();

    let r = world.service.complete_lc(&id, beneficiary(), &[proof]);
    assert_eq!(r.error_kind(), Some(LcErrorKind::UnsupportedProofKind));
    assert_eq!(r.status, Some(LcStatus::Accepted));
    assert_eq!(world.balance(beneficiary()), 0);
    assert!(!world.service.controller().registry().get(&id).unwrap().escrow.released);
}
