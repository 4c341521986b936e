//! # Conservation of funds
//!
//! For arbitrary sequences of lifecycle operations across several
//! applicants, ledger balances plus collateral held in unreleased escrows
//! stays constant, and no escrow is ever released twice.

mod common;

use common::*;
use lcx_core::LcId;
use lcx_engine::LcStatus;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Create { applicant: usize, amount: u64 },
    Accept { applicant: usize, by_confirmer: bool },
    Complete { applicant: usize, honest: bool },
    Reject { applicant: usize },
    Expire { applicant: usize },
    Advance { days: i64 },
}

const APPLICANTS: usize = 3;
const FUNDING: u64 = 2_000_000_000;

fn op() -> impl Strategy<Value = Op> {
    let who = 0..APPLICANTS;
    prop_oneof![
        (who.clone(), 0u64..=1_200_000_000).prop_map(|(applicant, amount)| Op::Create {
            applicant,
            amount
        }),
        (who.clone(), any::<bool>()).prop_map(|(applicant, by_confirmer)| Op::Accept {
            applicant,
            by_confirmer
        }),
        (who.clone(), any::<bool>())
            .prop_map(|(applicant, honest)| Op::Complete { applicant, honest }),
        who.clone().prop_map(|applicant| Op::Reject { applicant }),
        who.prop_map(|applicant| Op::Expire { applicant }),
        (1i64..60).prop_map(|days| Op::Advance { days }),
    ]
}

fn applicant_n(i: usize) -> lcx_core::Address {
    addr(0x10 + i as u8)
}

fn latest(world: &World, i: usize) -> Option<LcId> {
    world
        .service
        .controller()
        .registry()
        .history(&applicant_n(i))
        .last()
        .copied()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn funds_are_conserved(ops in proptest::collection::vec(op(), 1..40)) {
        let world = World::new(lcx_engine::EngineConfig::development());
        for i in 0..APPLICANTS {
            world.fund(applicant_n(i), FUNDING);
        }
        let expected = (APPLICANTS as u128) * u128::from(FUNDING);

        for op in ops {
            match op {
                Op::Create { applicant, amount } => {
                    let a = applicant_n(applicant);
                    world.service.create_lc(a, terms_for(a, beneficiary(), amount), usd(amount));
                }
                Op::Accept { applicant, by_confirmer } => {
                    if let Some(id) = latest(&world, applicant) {
                        let actor = if by_confirmer { confirmer() } else { beneficiary() };
                        world.service.accept_lc(&id, actor);
                    }
                }
                Op::Complete { applicant, honest } => {
                    if let Some(id) = latest(&world, applicant) {
                        let bound = if honest { id } else { LcId::from_bytes([0xff; 32]) };
                        world.service.complete_lc(&id, beneficiary(), &[waybill_proof(bound)]);
                    }
                }
                Op::Reject { applicant } => {
                    if let Some(id) = latest(&world, applicant) {
                        world.service.reject_lc(&id, beneficiary());
                    }
                }
                Op::Expire { applicant } => {
                    if let Some(id) = latest(&world, applicant) {
                        world.service.expire_lc(&id, outsider());
                    }
                }
                Op::Advance { days } => {
                    world.clock.advance_secs(days * 86_400).unwrap();
                }
            }
            prop_assert_eq!(world.total_usd(), expected);
        }

        for record in world.service.controller().registry().list() {
            let releases = record
                .escrow
                .transfers
                .iter()
                .filter(|t| t.payload.reason != lcx_escrow::TransferReason::Lock)
                .count();
            prop_assert_eq!(releases, usize::from(record.status.is_terminal()));
            prop_assert_eq!(record.escrow.released, record.status.is_terminal());
            prop_assert!(lcx_escrow::verify_chain(&record.escrow.transfers).is_ok());
            if record.status == LcStatus::Completed {
                prop_assert_eq!(
                    record.escrow.release.map(|r| r.to),
                    Some(beneficiary())
                );
            }
        }
    }
}
