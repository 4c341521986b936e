//! Transition receipts returned to callers of [`LcService`](crate::service::LcService).

use lcx_core::{LcId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::{LcError, LcErrorKind};
use crate::status::{LcAction, LcStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    Committed,
    Failed { kind: LcErrorKind, message: String },
}

/// Result of one lifecycle call.
///
/// `status` is the LC's status after the call: the new status on commit, the
/// unchanged current status on failure, absent when no LC is involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionReceipt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lc_id: Option<LcId>,
    pub action: LcAction,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LcStatus>,
    pub at: Timestamp,
}

impl TransitionReceipt {
    pub fn committed(lc_id: LcId, action: LcAction, status: LcStatus, at: Timestamp) -> Self {
        Self {
            lc_id: Some(lc_id),
            action,
            outcome: Outcome::Committed,
            status: Some(status),
            at,
        }
    }

    pub fn failed(
        lc_id: Option<LcId>,
        action: LcAction,
        error: &LcError,
        status: Option<LcStatus>,
        at: Timestamp,
    ) -> Self {
        Self {
            lc_id,
            action,
            outcome: Outcome::Failed {
                kind: error.kind(),
                message: error.to_string(),
            },
            status,
            at,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self.outcome, Outcome::Committed)
    }

    pub fn error_kind(&self) -> Option<LcErrorKind> {
        match &self.outcome {
            Outcome::Committed => None,
            Outcome::Failed { kind, .. } => Some(*kind),
        }
    }
}
