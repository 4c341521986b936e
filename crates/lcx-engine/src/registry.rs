//! # LC Registry
//!
//! The authoritative store of LC records, keyed by [`LcId`], with two
//! applicant indexes: the applicant's open LC, and every LC the applicant
//! has created in creation order.
//!
//! Writes are crate-private; only the controller mutates records.
//!
//! ## Locking
//!
//! Each map is a `DashMap`, so every key is guarded by its shard lock.
//! Locks are always taken in the order index → history → records and a
//! record guard is never held while touching an index.
//!
//! - `insert_with` holds the applicant's index entry for the whole create,
//!   serializing creates per applicant.
//! - `update` runs read-validate-update on a staged copy under the record's
//!   entry lock, and writes the copy back only on success.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use lcx_core::{Address, CurrencyCode, LcId};

use crate::error::LcError;
use crate::record::LcRecord;

#[derive(Default)]
pub struct LcRegistry {
    records: DashMap<LcId, LcRecord>,
    open_by_applicant: DashMap<Address, LcId>,
    history: DashMap<Address, Vec<LcId>>,
}

impl LcRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the record built by `build` as the applicant's new open LC.
    ///
    /// `build` receives the derived id and the applicant's sequence number
    /// and runs while the applicant's index entry is held. It may move funds;
    /// it must not touch the registry.
    ///
    /// # Errors
    ///
    /// `DuplicateLc` when the applicant already has a non-terminal LC, or
    /// whatever `build` returns.
    pub(crate) fn insert_with<F>(&self, applicant: Address, build: F) -> Result<LcRecord, LcError>
    where
        F: FnOnce(LcId, u64) -> Result<LcRecord, LcError>,
    {
        let entry = self.open_by_applicant.entry(applicant);
        if let Entry::Occupied(ref open) = entry {
            let existing = *open.get();
            let still_open = self
                .records
                .get(&existing)
                .map(|r| !r.status.is_terminal())
                .unwrap_or(false);
            if still_open {
                return Err(LcError::DuplicateLc {
                    applicant,
                    existing,
                });
            }
        }

        let sequence = self.history.get(&applicant).map(|h| h.len()).unwrap_or(0) as u64;
        let id = LcId::derive(&applicant, sequence)?;
        if self.records.contains_key(&id) {
            return Err(LcError::Internal(format!("LC id collision for {id}")));
        }

        let record = build(id, sequence)?;

        self.records.insert(id, record.clone());
        self.history.entry(applicant).or_default().push(id);
        match entry {
            Entry::Occupied(mut open) => {
                open.insert(id);
            }
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }
        Ok(record)
    }

    /// Apply `f` to a staged copy of the record and commit it on success.
    ///
    /// On error the stored record is untouched. When the committed status is
    /// terminal the applicant's open-LC index entry is cleared.
    pub(crate) fn update<F>(&self, id: &LcId, f: F) -> Result<LcRecord, LcError>
    where
        F: FnOnce(&mut LcRecord) -> Result<(), LcError>,
    {
        let committed = {
            let mut entry = self
                .records
                .get_mut(id)
                .ok_or_else(|| LcError::NotFound(id.to_string()))?;
            let mut staged = entry.value().clone();
            f(&mut staged)?;
            *entry.value_mut() = staged.clone();
            staged
        };

        if committed.status.is_terminal() {
            let lc_id = committed.id;
            self.open_by_applicant
                .remove_if(&committed.applicant(), |_, open| *open == lc_id);
        }
        Ok(committed)
    }

    pub fn get(&self, id: &LcId) -> Option<LcRecord> {
        self.records.get(id).map(|r| r.value().clone())
    }

    /// The applicant's non-terminal LC, if any.
    pub fn open_for(&self, applicant: &Address) -> Option<LcId> {
        let id = *self.open_by_applicant.get(applicant)?;
        let open = self
            .records
            .get(&id)
            .map(|r| !r.status.is_terminal())
            .unwrap_or(false);
        open.then_some(id)
    }

    /// Every LC the applicant created, oldest first.
    pub fn history(&self, applicant: &Address) -> Vec<LcId> {
        self.history
            .get(applicant)
            .map(|h| h.value().clone())
            .unwrap_or_default()
    }

    pub fn list(&self) -> Vec<LcRecord> {
        self.records.iter().map(|r| r.value().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Minor units of `code` held by unreleased escrows.
    pub fn held_total(&self, code: &CurrencyCode) -> u128 {
        self.records
            .iter()
            .map(|r| r.escrow.held())
            .filter(|held| held.code == *code)
            .map(|held| u128::from(held.amount))
            .sum()
    }
}

impl std::fmt::Debug for LcRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LcRegistry")
            .field("records", &self.records.len())
            .field("open", &self.open_by_applicant.len())
            .finish()
    }
}
