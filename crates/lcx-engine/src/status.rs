//! # LC State Machine
//!
//! ```text
//! Created ──► CollateralLocked ──► Accepted ──► Completed
//!                  │    │              │
//!                  │    └──► Rejected  │
//!                  └───────► Expired ◄─┘
//! ```
//!
//! `Created → CollateralLocked` happens inside `create`; no LC is ever
//! observable in `Created`. Terminal states accept no further transition.

use serde::{Deserialize, Serialize};

/// Legal status of a Letter of Credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LcStatus {
    Created,
    CollateralLocked,
    Accepted,
    Completed,
    Rejected,
    Expired,
}

impl LcStatus {
    pub const ALL: [LcStatus; 6] = [
        Self::Created,
        Self::CollateralLocked,
        Self::Accepted,
        Self::Completed,
        Self::Rejected,
        Self::Expired,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::CollateralLocked => "COLLATERAL_LOCKED",
            Self::Accepted => "ACCEPTED",
            Self::Completed => "COMPLETED",
            Self::Rejected => "REJECTED",
            Self::Expired => "EXPIRED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Rejected | Self::Expired)
    }

    /// States reachable in one step.
    pub fn valid_transitions(&self) -> &'static [LcStatus] {
        match self {
            Self::Created => &[Self::CollateralLocked],
            Self::CollateralLocked => &[Self::Accepted, Self::Rejected, Self::Expired],
            Self::Accepted => &[Self::Completed, Self::Expired],
            Self::Completed | Self::Rejected | Self::Expired => &[],
        }
    }

    pub fn can_transition_to(&self, to: LcStatus) -> bool {
        self.valid_transitions().contains(&to)
    }
}

impl std::fmt::Display for LcStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A role an address can hold with respect to one LC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Applicant,
    Beneficiary,
    ConfirmingParty,
}

/// The capability an action demands of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredRole {
    Applicant,
    Beneficiary,
    BeneficiaryOrConfirmingParty,
    Any,
}

impl RequiredRole {
    pub fn is_satisfied_by(&self, roles: &[Role]) -> bool {
        match self {
            Self::Applicant => roles.contains(&Role::Applicant),
            Self::Beneficiary => roles.contains(&Role::Beneficiary),
            Self::BeneficiaryOrConfirmingParty => {
                roles.contains(&Role::Beneficiary) || roles.contains(&Role::ConfirmingParty)
            }
            Self::Any => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applicant => "applicant",
            Self::Beneficiary => "beneficiary",
            Self::BeneficiaryOrConfirmingParty => "beneficiary or confirming party",
            Self::Any => "any party",
        }
    }
}

impl std::fmt::Display for RequiredRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lifecycle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LcAction {
    Create,
    Accept,
    Complete,
    Reject,
    Expire,
}

impl LcAction {
    pub const ALL: [LcAction; 5] = [
        Self::Create,
        Self::Accept,
        Self::Complete,
        Self::Reject,
        Self::Expire,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Accept => "accept",
            Self::Complete => "complete",
            Self::Reject => "reject",
            Self::Expire => "expire",
        }
    }

    /// The irrevocable credit cannot be withdrawn by its applicant, so
    /// rejection belongs to the beneficiary side.
    pub fn required_role(&self) -> RequiredRole {
        match self {
            Self::Create => RequiredRole::Applicant,
            Self::Accept | Self::Reject => RequiredRole::BeneficiaryOrConfirmingParty,
            Self::Complete => RequiredRole::Beneficiary,
            Self::Expire => RequiredRole::Any,
        }
    }

    /// The status this action moves an LC into.
    pub fn target(&self) -> LcStatus {
        match self {
            Self::Create => LcStatus::CollateralLocked,
            Self::Accept => LcStatus::Accepted,
            Self::Complete => LcStatus::Completed,
            Self::Reject => LcStatus::Rejected,
            Self::Expire => LcStatus::Expired,
        }
    }

    /// Whether this action may be applied to an LC in `status`.
    pub fn allowed_from(&self, status: LcStatus) -> bool {
        status.can_transition_to(self.target())
    }
}

impl std::fmt::Display for LcAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_have_no_exits() {
        for s in LcStatus::ALL {
            assert_eq!(s.is_terminal(), s.valid_transitions().is_empty(), "{s}");
        }
    }

    #[test]
    fn action_sources() {
        use LcStatus::*;
        assert!(LcAction::Accept.allowed_from(CollateralLocked));
        assert!(!LcAction::Accept.allowed_from(Accepted));
        assert!(LcAction::Complete.allowed_from(Accepted));
        assert!(!LcAction::Complete.allowed_from(CollateralLocked));
        assert!(LcAction::Reject.allowed_from(CollateralLocked));
        assert!(!LcAction::Reject.allowed_from(Accepted));
        assert!(LcAction::Expire.allowed_from(CollateralLocked));
        assert!(LcAction::Expire.allowed_from(Accepted));
        assert!(LcAction::Create.allowed_from(Created));
        for terminal in [Completed, Rejected, Expired] {
            for action in LcAction::ALL {
                assert!(!action.allowed_from(terminal));
            }
        }
    }

    #[test]
    fn role_requirements() {
        let beneficiary = [Role::Beneficiary];
        let confirmer = [Role::ConfirmingParty];
        let applicant = [Role::Applicant];
        assert!(RequiredRole::Beneficiary.is_satisfied_by(&beneficiary));
        assert!(!RequiredRole::Beneficiary.is_satisfied_by(&confirmer));
        assert!(RequiredRole::BeneficiaryOrConfirmingParty.is_satisfied_by(&confirmer));
        assert!(!RequiredRole::BeneficiaryOrConfirmingParty.is_satisfied_by(&applicant));
        assert!(RequiredRole::Any.is_satisfied_by(&[]));
        assert!(!RequiredRole::Applicant.is_satisfied_by(&[]));
    }

    #[test]
    fn status_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_value(LcStatus::CollateralLocked).unwrap(),
            serde_json::json!("COLLATERAL_LOCKED")
        );
        for s in LcStatus::ALL {
            assert_eq!(serde_json::to_value(s).unwrap(), serde_json::json!(s.name()));
        }
    }
}
