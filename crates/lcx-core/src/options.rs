//! # Option Tables
//!
//! The coded terms of an LC. The engine stores and validates only the numeric
//! code; the label tables exist for the presentation boundary to decode them.
//! Both tables are process-wide constants.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Code → label table for `availableWithBy`.
pub static AVAILABLE_WITH_BY: [(&str, &str); 6] = [
    ("0", "BY PAYMENT"),
    ("1", "BY ACCEPTANCE"),
    ("2", "BY NEGOTIATION"),
    ("3", "BY DEF PAYMENT"),
    ("4", "BY MIXED PYMT"),
    ("5", "ANY BANK BY NEGOTIATION"),
];

/// Code → label table for `confirmationInstructions`.
pub static CONFIRMATION_INSTRUCTIONS: [(&str, &str); 3] =
    [("0", "CONFIRM"), ("1", "MAY ADD"), ("2", "WITHOUT")];

/// Which party or bank honors drafts under the credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AvailableWithBy {
    Payment,
    Acceptance,
    Negotiation,
    DeferredPayment,
    MixedPayment,
    AnyBankByNegotiation,
}

impl AvailableWithBy {
    pub const ALL: [AvailableWithBy; 6] = [
        Self::Payment,
        Self::Acceptance,
        Self::Negotiation,
        Self::DeferredPayment,
        Self::MixedPayment,
        Self::AnyBankByNegotiation,
    ];

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Result<Self, CoreError> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or(CoreError::InvalidOptionCode {
                table: "availableWithBy",
                code,
                max: 5,
            })
    }

    pub fn label(&self) -> &'static str {
        AVAILABLE_WITH_BY[self.code() as usize].1
    }
}

impl TryFrom<u8> for AvailableWithBy {
    type Error = CoreError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl From<AvailableWithBy> for u8 {
    fn from(v: AvailableWithBy) -> u8 {
        v.code()
    }
}

/// Whether a confirming bank is asked to add its confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ConfirmationInstructions {
    Confirm,
    MayAdd,
    Without,
}

impl ConfirmationInstructions {
    pub const ALL: [ConfirmationInstructions; 3] = [Self::Confirm, Self::MayAdd, Self::Without];

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Result<Self, CoreError> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or(CoreError::InvalidOptionCode {
                table: "confirmationInstructions",
                code,
                max: 2,
            })
    }

    pub fn label(&self) -> &'static str {
        CONFIRMATION_INSTRUCTIONS[self.code() as usize].1
    }

    /// True when a confirming party may act on the beneficiary's side.
    pub fn permits_confirming_party(&self) -> bool {
        matches!(self, Self::Confirm | Self::MayAdd)
    }
}

impl TryFrom<u8> for ConfirmationInstructions {
    type Error = CoreError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl From<ConfirmationInstructions> for u8 {
    fn from(v: ConfirmationInstructions) -> u8 {
        v.code()
    }
}

/// Form of documentary credit. Only irrevocable credits are issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormOfDocCredit {
    #[default]
    Irrevocable,
}

impl FormOfDocCredit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Irrevocable => "irrevocable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_indexed_by_code() {
        for (i, (code, _)) in AVAILABLE_WITH_BY.iter().enumerate() {
            assert_eq!(code.parse::<usize>().unwrap(), i);
        }
        for (i, (code, _)) in CONFIRMATION_INSTRUCTIONS.iter().enumerate() {
            assert_eq!(code.parse::<usize>().unwrap(), i);
        }
    }

    #[test]
    fn every_variant_roundtrips_through_its_code() {
        for v in AvailableWithBy::ALL {
            assert_eq!(AvailableWithBy::from_code(v.code()).unwrap(), v);
        }
        for v in ConfirmationInstructions::ALL {
            assert_eq!(ConfirmationInstructions::from_code(v.code()).unwrap(), v);
        }
    }

    #[test]
    fn out_of_range_codes_rejected() {
        assert_eq!(
            AvailableWithBy::from_code(6),
            Err(CoreError::InvalidOptionCode {
                table: "availableWithBy",
                code: 6,
                max: 5
            })
        );
        assert!(ConfirmationInstructions::from_code(3).is_err());
        assert!(serde_json::from_str::<AvailableWithBy>("9").is_err());
    }

    #[test]
    fn labels_come_from_tables() {
        assert_eq!(AvailableWithBy::Payment.label(), "BY PAYMENT");
        assert_eq!(
            AvailableWithBy::AnyBankByNegotiation.label(),
            "ANY BANK BY NEGOTIATION"
        );
        assert_eq!(ConfirmationInstructions::MayAdd.label(), "MAY ADD");
    }

    #[test]
    fn serialized_as_numeric_code() {
        assert_eq!(serde_json::to_string(&AvailableWithBy::Negotiation).unwrap(), "2");
        assert_eq!(
            serde_json::from_str::<ConfirmationInstructions>("2").unwrap(),
            ConfirmationInstructions::Without
        );
        assert_eq!(
            serde_json::to_string(&FormOfDocCredit::Irrevocable).unwrap(),
            "\"irrevocable\""
        );
    }

    #[test]
    fn confirming_party_permission() {
        assert!(ConfirmationInstructions::Confirm.permits_confirming_party());
        assert!(ConfirmationInstructions::MayAdd.permits_confirming_party());
        assert!(!ConfirmationInstructions::Without.permits_confirming_party());
    }
}
