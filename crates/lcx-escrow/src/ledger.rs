//! # Balance Ledger
//!
//! The account balances escrow moves funds between. The engine treats the
//! ledger as its execution environment: a debit or credit is atomic and
//! either fully applies or returns an error with no effect.

use std::collections::{BTreeMap, HashMap};

use lcx_core::{Address, CurrencyAmount, CurrencyCode};
use parking_lot::RwLock;

use crate::error::EscrowError;

/// Persistent account balances, in minor units per currency.
pub trait BalanceLedger: Send + Sync {
    fn balance(&self, account: &Address, currency: &CurrencyCode) -> u64;

    /// Remove `amount` from `account`. Fails with `InsufficientFunds` and no effect.
    fn debit(&self, account: &Address, amount: &CurrencyAmount) -> Result<(), EscrowError>;

    /// Add `amount` to `account`. Fails with `BalanceOverflow` and no effect.
    fn credit(&self, account: &Address, amount: &CurrencyAmount) -> Result<(), EscrowError>;
}

/// In-process ledger guarded by a single `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    balances: RwLock<HashMap<(Address, CurrencyCode), u64>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint funds into an account. Used to seed scenarios and tests.
    pub fn fund(&self, account: Address, amount: &CurrencyAmount) -> Result<(), EscrowError> {
        self.credit(&account, amount)
    }

    /// Sum of all balances held in `currency`.
    pub fn total(&self, currency: &CurrencyCode) -> u128 {
        self.balances
            .read()
            .iter()
            .filter(|((_, code), _)| code == currency)
            .map(|(_, v)| u128::from(*v))
            .sum()
    }

    /// Ordered copy of every non-zero balance.
    pub fn snapshot(&self) -> BTreeMap<(Address, CurrencyCode), u64> {
        self.balances
            .read()
            .iter()
            .filter(|(_, v)| **v > 0)
            .map(|(k, v)| (*k, *v))
            .collect()
    }
}

impl BalanceLedger for InMemoryLedger {
    fn balance(&self, account: &Address, currency: &CurrencyCode) -> u64 {
        self.balances
            .read()
            .get(&(*account, *currency))
            .copied()
            .unwrap_or(0)
    }

    fn debit(&self, account: &Address, amount: &CurrencyAmount) -> Result<(), EscrowError> {
        let mut balances = self.balances.write();
        let entry = balances.entry((*account, amount.code)).or_insert(0);
        let next = entry
            .checked_sub(amount.amount)
            .ok_or(EscrowError::InsufficientFunds {
                account: *account,
                currency: amount.code,
                required: amount.amount,
                available: *entry,
            })?;
        *entry = next;
        Ok(())
    }

    fn credit(&self, account: &Address, amount: &CurrencyAmount) -> Result<(), EscrowError> {
        let mut balances = self.balances.write();
        let entry = balances.entry((*account, amount.code)).or_insert(0);
        let next = entry
            .checked_add(amount.amount)
            .ok_or(EscrowError::BalanceOverflow {
                account: *account,
                currency: amount.code,
                amount: amount.amount,
            })?;
        *entry = next;
        Ok(())
    }
}
