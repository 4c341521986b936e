//! # Run Subcommand
//!
//! Executes a YAML scenario against a fresh in-memory ledger and a manual
//! clock, printing one JSON line per step and the final balances.
//!
//! ```yaml
//! start: "2026-01-15T00:00:00Z"
//! accounts:
//!   - address: "0x00000000000000000000000000000000000000a1"
//!     funds: [{ code: USD, amount: 1000000000, exponent: 6 }]
//! steps:
//!   - op: create
//!     name: tiles
//!     caller: "0x00000000000000000000000000000000000000a1"
//!     gate: { waybill_authenticity: "BL-2026-0042" }
//!     terms: { ... }
//!   - op: accept
//!     lc: tiles
//!     actor: "0x00000000000000000000000000000000000000b2"
//!   - op: complete
//!     lc: tiles
//!     actor: "0x00000000000000000000000000000000000000b2"
//!     proofs: [{ kind: waybill_authenticity, witness: "BL-2026-0042" }]
//! ```
//!
//! `gate` maps proof kinds to witnesses (waybill text, mailbox) whose
//! commitments are added to the terms' proof gate. A failed transition is a
//! receipt, not an error; only malformed scenarios abort the run.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use lcx_core::encoding::decode_hex_array;
use lcx_core::{Address, CurrencyAmount, CurrencyCode, LcId, ManualClock, Timestamp};
use lcx_engine::{EngineConfig, LcService, LcTerms, TransitionReceipt};
use lcx_escrow::InMemoryLedger;
use lcx_zkp::{
    AttestationProofSystem, AttestorKeyPair, MockProofSystem, ProofKind, ProofSubmission,
    PublicInputs,
};
use serde::Deserialize;

use crate::commitment::commitment_for;

/// Arguments for `lcx run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Scenario YAML file.
    pub scenario: PathBuf,

    /// Exit with status 2 if any transition failed.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Initial clock reading.
    pub start: Timestamp,
    #[serde(default)]
    pub accounts: Vec<AccountSpec>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountSpec {
    pub address: Address,
    #[serde(default)]
    pub funds: Vec<CurrencyAmount>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Step {
    Create {
        /// Scenario-local name later steps refer to.
        name: String,
        caller: Address,
        terms: LcTerms,
        #[serde(default)]
        gate: BTreeMap<ProofKind, String>,
        /// Defaults to the terms' amount.
        #[serde(default)]
        collateral: Option<CurrencyAmount>,
    },
    Accept {
        lc: String,
        actor: Address,
    },
    Complete {
        lc: String,
        actor: Address,
        #[serde(default)]
        proofs: Vec<ProofInput>,
    },
    Reject {
        lc: String,
        actor: Address,
    },
    Expire {
        lc: String,
        caller: Address,
    },
    AdvanceClock {
        seconds: i64,
    },
    Query {
        applicant: Address,
    },
}

/// How to produce one proof submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProofInput {
    pub kind: ProofKind,
    /// Waybill text or mailbox.
    pub witness: String,
    /// Hex Ed25519 seed. When set, the proof is an attestation by this key;
    /// otherwise a mock proof.
    #[serde(default)]
    pub attestor_seed: Option<String>,
    /// Bind the proof to another LC's id instead.
    #[serde(default)]
    pub bound_to: Option<String>,
}

/// Everything a run produced.
#[derive(Debug)]
pub struct ScenarioReport {
    pub receipts: Vec<TransitionReceipt>,
    pub balances: BTreeMap<(Address, CurrencyCode), u64>,
}

impl ScenarioReport {
    pub fn failures(&self) -> usize {
        self.receipts.iter().filter(|r| !r.is_committed()).count()
    }
}

impl Scenario {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }
}

pub fn run_run(args: &RunArgs, config: EngineConfig, out: &mut dyn Write) -> Result<u8> {
    let scenario = Scenario::from_file(&args.scenario)?;
    let report = run_scenario(&scenario, config, out)?;
    let failures = report.failures();
    tracing::info!(
        steps = scenario.steps.len(),
        receipts = report.receipts.len(),
        failures,
        "scenario finished"
    );
    if args.strict && failures > 0 {
        return Ok(2);
    }
    Ok(0)
}

pub fn run_scenario(
    scenario: &Scenario,
    config: EngineConfig,
    out: &mut dyn Write,
) -> Result<ScenarioReport> {
    let ledger = Arc::new(InMemoryLedger::new());
    for account in &scenario.accounts {
        for funds in &account.funds {
            ledger
                .fund(account.address, funds)
                .with_context(|| format!("failed to fund {}", account.address))?;
        }
    }
    let clock = Arc::new(ManualClock::new(scenario.start));
    let exponent = config.amount_exponent;
    let service = LcService::new(config, ledger.clone(), clock.clone());

    let mut names: HashMap<String, LcId> = HashMap::new();
    let mut receipts = Vec::new();

    for (index, step) in scenario.steps.iter().enumerate() {
        let receipt = match step {
            Step::Create {
                name,
                caller,
                terms,
                gate,
                collateral,
            } => {
                let mut terms = terms.clone();
                for (kind, witness) in gate {
                    terms
                        .proof_gate
                        .insert(*kind, commitment_for(*kind, witness)?);
                }
                let collateral = collateral.unwrap_or(terms.currency);
                let receipt = service.create_lc(*caller, terms, collateral);
                if receipt.is_committed() {
                    if let Some(id) = receipt.lc_id {
                        names.insert(name.clone(), id);
                    }
                }
                receipt
            }
            Step::Accept { lc, actor } => service.accept_lc(&lookup(&names, lc)?, *actor),
            Step::Complete { lc, actor, proofs } => {
                let id = lookup(&names, lc)?;
                let submissions = proofs
                    .iter()
                    .map(|proof| build_proof(proof, id, &names))
                    .collect::<Result<Vec<_>>>()?;
                service.complete_lc(&id, *actor, &submissions)
            }
            Step::Reject { lc, actor } => service.reject_lc(&lookup(&names, lc)?, *actor),
            Step::Expire { lc, caller } => service.expire_lc(&lookup(&names, lc)?, *caller),
            Step::AdvanceClock { seconds } => {
                let now = clock.advance_secs(*seconds)?;
                emit(out, &serde_json::json!({ "step": index, "clock": now }))?;
                continue;
            }
            Step::Query { applicant } => {
                let view = service.get_lc(applicant);
                emit(out, &serde_json::json!({ "step": index, "lc": view }))?;
                continue;
            }
        };
        emit(out, &serde_json::json!({ "step": index, "receipt": receipt }))?;
        receipts.push(receipt);
    }

    let balances = ledger.snapshot();
    for ((account, code), amount) in &balances {
        let display = CurrencyAmount::new(*code, *amount, exponent).to_decimal_string();
        emit(
            out,
            &serde_json::json!({
                "balance": { "account": account, "currency": code, "amount": amount, "display": display }
            }),
        )?;
    }
    Ok(ScenarioReport { receipts, balances })
}

fn lookup(names: &HashMap<String, LcId>, name: &str) -> Result<LcId> {
    match names.get(name) {
        Some(id) => Ok(*id),
        None => bail!("scenario refers to LC {name:?}, which no committed create step named"),
    }
}

fn build_proof(
    proof: &ProofInput,
    lc: LcId,
    names: &HashMap<String, LcId>,
) -> Result<ProofSubmission> {
    let bound = match &proof.bound_to {
        Some(other) => lookup(names, other)?,
        None => lc,
    };
    let inputs = PublicInputs::new(bound, proof.kind, commitment_for(proof.kind, &proof.witness)?);
    let submission = match &proof.attestor_seed {
        Some(seed) => {
            let seed = decode_hex_array::<32>(seed).context("attestor_seed must be 32 hex bytes")?;
            AttestationProofSystem.attest(&AttestorKeyPair::from_seed(&seed), &inputs)?
        }
        None => MockProofSystem.prove_statement(&inputs)?,
    };
    Ok(submission)
}

fn emit(out: &mut dyn Write, line: &serde_json::Value) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string(line)?)?;
    Ok(())
}
