//! # lcx-engine: LC Lifecycle & Settlement Engine
//!
//! Governs the legal status of each Letter of Credit, commands the release
//! of its collateral, and projects it for display.
//!
//! ## Architecture
//!
//! - **Status** (`status.rs`): `LcStatus`, the transition table, `LcAction`
//!   and the `RequiredRole` each action demands.
//! - **Terms** (`terms.rs`): `LcTerms` and their validation.
//! - **Record** (`record.rs`): the stored `LcRecord` and its transition log.
//! - **Registry** (`registry.rs`): `DashMap`-backed store with applicant
//!   indexes. Writes are crate-private.
//! - **Controller** (`controller.rs`): `create`, `accept`, `complete`,
//!   `reject`, `expire`.
//! - **Query** (`query.rs`): read-only `LcView` projection.
//! - **Service** (`service.rs`): receipt-returning facade over the
//!   controller and query.
//! - **Config** (`config.rs`): `EngineConfig`, loaded from YAML.
//!
//! ## Invariants
//!
//! - Every LC has exactly one escrow, created and funded atomically with it.
//! - Status moves only along the transition table; terminal states are final.
//! - An applicant has at most one non-terminal LC.
//! - Collateral is released at most once, in full, only by the controller.
//! - A failed operation changes nothing.

pub mod config;
pub mod controller;
pub mod error;
pub mod query;
pub mod receipt;
pub mod record;
pub mod registry;
pub mod service;
pub mod status;
pub mod terms;

pub use config::{ConfigError, EngineConfig, CONFIG_ENV};
pub use controller::LcController;
pub use error::{LcError, LcErrorKind};
pub use query::{DisplayFields, EscrowView, LcQuery, LcView};
pub use receipt::{Outcome, TransitionReceipt};
pub use record::{LcRecord, TransitionRecord};
pub use registry::LcRegistry;
pub use service::LcService;
pub use status::{LcAction, LcStatus, RequiredRole, Role};
pub use terms::{IssueDetails, LcTerms, Party, ShippingDetails};
