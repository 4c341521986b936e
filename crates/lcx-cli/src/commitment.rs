//! # Commitment Subcommand
//!
//! Computes the public commitment an LC's proof gate stores for a waybill
//! document or a beneficiary mailbox.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use lcx_zkp::{Commitment, ProofKind};

/// Arguments for `lcx commitment`.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct CommitmentArgs {
    /// Waybill document whose digest the gate commits to.
    #[arg(long)]
    pub waybill: Option<PathBuf>,

    /// Beneficiary mailbox (trimmed and lowercased before hashing).
    #[arg(long)]
    pub mailbox: Option<String>,
}

/// Commitment for `kind` from its witness: the waybill text or the mailbox.
pub fn commitment_for(kind: ProofKind, witness: &str) -> Result<Commitment> {
    match kind {
        ProofKind::WaybillAuthenticity => Ok(Commitment::for_waybill(witness.as_bytes())),
        ProofKind::EmailOwnership => {
            Commitment::for_mailbox(witness).context("failed to canonicalize mailbox")
        }
    }
}

pub fn run_commitment(args: &CommitmentArgs, out: &mut dyn Write) -> Result<u8> {
    let (kind, commitment) = match (&args.waybill, &args.mailbox) {
        (Some(path), _) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read waybill {}", path.display()))?;
            (ProofKind::WaybillAuthenticity, Commitment::for_waybill(&bytes))
        }
        (None, Some(mailbox)) => (
            ProofKind::EmailOwnership,
            commitment_for(ProofKind::EmailOwnership, mailbox)?,
        ),
        (None, None) => anyhow::bail!("one of --waybill or --mailbox is required"),
    };
    tracing::debug!(%kind, "computed commitment");
    writeln!(out, "{kind}: {}", commitment.to_hex())?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waybill_file_matches_text_witness() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bl.txt");
        std::fs::write(&path, "BL-2026-0042").unwrap();

        let mut out = Vec::new();
        let args = CommitmentArgs {
            waybill: Some(path),
            mailbox: None,
        };
        run_commitment(&args, &mut out).unwrap();
        let expected = commitment_for(ProofKind::WaybillAuthenticity, "BL-2026-0042").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap().trim(),
            format!("waybill_authenticity: {}", expected.to_hex())
        );
    }

    #[test]
    fn mailbox_is_normalized() {
        let a = commitment_for(ProofKind::EmailOwnership, " Seller@Example.com ").unwrap();
        let b = commitment_for(ProofKind::EmailOwnership, "seller@example.com").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_waybill_is_an_error() {
        let args = CommitmentArgs {
            waybill: Some(PathBuf::from("/nonexistent/bl.txt")),
            mailbox: None,
        };
        assert!(run_commitment(&args, &mut Vec::new()).is_err());
    }
}
