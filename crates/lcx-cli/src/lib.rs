//! # lcx-cli: LCX Command-Line Interface
//!
//! ## Subcommands
//!
//! - `options`: Print the `availableWithBy` and `confirmationInstructions`
//!   code tables.
//! - `run`: Execute a YAML scenario against an in-memory ledger and print
//!   receipts as JSON lines.
//! - `commitment`: Compute a proof-gate commitment for a waybill or mailbox.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; lifecycle logic stays in `lcx-engine`.
//! - Handlers write to a caller-supplied `Write` so they are testable.

pub mod commitment;
pub mod options;
pub mod scenario;
