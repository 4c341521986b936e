//! Shared fixtures for the integration suite.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use lcx_core::{
    Address, CurrencyAmount, CurrencyCode, FormOfDocCredit, LcId, ManualClock, Timestamp,
};
use lcx_engine::{EngineConfig, IssueDetails, LcService, LcTerms, Party, ShippingDetails};
use lcx_escrow::{BalanceLedger, InMemoryLedger};
use lcx_zkp::{Commitment, MockProofSystem, ProofKind, ProofSubmission, PublicInputs};

pub const WAYBILL: &[u8] = b"BILL OF LADING BL-2026-0042: 500 cartons, Shanghai to Rotterdam";
pub const MAILBOX: &str = "seller@example.com";

/// $500.000000 in minor units.
pub const FIVE_HUNDRED: u64 = 500_000_000;

pub fn addr(tag: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[19] = tag;
    Address::from_bytes(bytes)
}

pub fn applicant() -> Address {
    addr(0xa1)
}

pub fn beneficiary() -> Address {
    addr(0xb2)
}

pub fn confirmer() -> Address {
    addr(0xc3)
}

pub fn outsider() -> Address {
    addr(0xd4)
}

pub fn usd_code() -> CurrencyCode {
    CurrencyCode::parse("USD").unwrap()
}

pub fn usd(amount: u64) -> CurrencyAmount {
    CurrencyAmount::new(usd_code(), amount, 6)
}

pub fn ts(s: &str) -> Timestamp {
    Timestamp::parse(s).unwrap()
}

/// Terms between `applicant` and `beneficiary` for `amount`, gated on the
/// waybill.
pub fn terms_for(applicant: Address, beneficiary: Address, amount: u64) -> LcTerms {
    let mut proof_gate = BTreeMap::new();
    proof_gate.insert(ProofKind::WaybillAuthenticity, Commitment::for_waybill(WAYBILL));
    LcTerms {
        applicant: Party {
            address: applicant,
            off_ledger_address: "Acme Imports, 1 Harbour Rd".into(),
        },
        beneficiary: Party {
            address: beneficiary,
            off_ledger_address: MAILBOX.into(),
        },
        currency: usd(amount),
        additional_conditions: "Insurance to be covered by the buyer".into(),
        description_of_goods: "500 cartons of ceramic tiles".into(),
        documents_required: "Bill of lading; commercial invoice".into(),
        available_with_by: 2,
        confirmation_instructions: 1,
        issue_details: IssueDetails {
            applicable_rules: "UCP LATEST VERSION".into(),
            date_of_issue: ts("2026-01-10T00:00:00Z"),
            expiry: ts("2026-04-10T00:00:00Z"),
            place_of_expiry: "Rotterdam".into(),
        },
        period_for_presentation: 21,
        doc_credit_number: "LC-2026-0042".into(),
        sequence_of_total: "1/1".into(),
        form_of_doc_credit: FormOfDocCredit::Irrevocable,
        shipping_details: ShippingDetails {
            partial_shipments_allowed: false,
            transshipment_allowed: true,
            port_of_loading: "Shanghai".into(),
            port_of_discharge: "Rotterdam".into(),
        },
        confirming_party: Some(confirmer()),
        proof_gate,
    }
}

pub fn terms() -> LcTerms {
    terms_for(applicant(), beneficiary(), FIVE_HUNDRED)
}

pub fn waybill_proof(lc: LcId) -> ProofSubmission {
    let inputs = PublicInputs::new(
        lc,
        ProofKind::WaybillAuthenticity,
        Commitment::for_waybill(WAYBILL),
    );
    MockProofSystem.prove_statement(&inputs).unwrap()
}

pub struct World {
    pub service: LcService,
    pub ledger: Arc<InMemoryLedger>,
    pub clock: Arc<ManualClock>,
}

impl World {
    pub fn new(config: EngineConfig) -> Self {
        let ledger = Arc::new(InMemoryLedger::new());
        let clock = Arc::new(ManualClock::new(ts("2026-01-15T00:00:00Z")));
        let service = LcService::new(config, ledger.clone(), clock.clone());
        Self {
            service,
            ledger,
            clock,
        }
    }

    /// Development config (mock backends), applicant funded with $1,000.
    pub fn funded() -> Self {
        let world = Self::new(EngineConfig::development());
        world.fund(applicant(), 1_000_000_000);
        world
    }

    pub fn fund(&self, account: Address, amount: u64) {
        self.ledger.fund(account, &usd(amount)).unwrap();
    }

    pub fn balance(&self, account: Address) -> u64 {
        self.ledger.balance(&account, &usd_code())
    }

    /// Ledger balances plus collateral still held in escrow.
    pub fn total_usd(&self) -> u128 {
        self.ledger.total(&usd_code())
            + self
                .service
                .controller()
                .registry()
                .held_total(&usd_code())
    }

    /// Create the standard LC and return its id.
    pub fn create(&self) -> LcId {
        let receipt = self.service.create_lc(applicant(), terms(), usd(FIVE_HUNDRED));
        assert!(receipt.is_committed(), "create failed: {receipt:?}");
        receipt.lc_id.unwrap()
    }
}
