//! Session facade handed to presentation shells.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use bakery_domain::{Ledger, LedgerKind, LedgerRecord};

use crate::{
    profit::ProfitSummary,
    record_service::EditOutcome,
    record_store::{load_total_spent, store_total_spent, LoadSource, RecordStore},
    storage::KeyValueStore,
    CoreError,
};

/// The bakery's income and expense ledgers for one session.
///
/// Construct once per session with [`BakeryBooks::open`] and pass it by
/// reference to whichever component needs it. Edits stay in memory until
/// [`BakeryBooks::save`] or [`BakeryBooks::save_all`] is called.
pub struct BakeryBooks {
    storage: Arc<dyn KeyValueStore>,
    income: RecordStore,
    expense: RecordStore,
}

impl BakeryBooks {
    /// Loads both ledgers from `storage`, seeding whichever has nothing usable saved.
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        let income = RecordStore::load(LedgerKind::Income, Arc::clone(&storage));
        let expense = RecordStore::load(LedgerKind::Expense, Arc::clone(&storage));
        Self {
            storage,
            income,
            expense,
        }
    }

    fn store(&self, kind: LedgerKind) -> &RecordStore {
        match kind {
            LedgerKind::Income => &self.income,
            LedgerKind::Expense => &self.expense,
        }
    }

    fn store_mut(&mut self, kind: LedgerKind) -> &mut RecordStore {
        match kind {
            LedgerKind::Income => &mut self.income,
            LedgerKind::Expense => &mut self.expense,
        }
    }

    pub fn ledger(&self, kind: LedgerKind) -> &Ledger {
        self.store(kind).ledger()
    }

    pub fn record(&self, kind: LedgerKind, id: Uuid) -> Option<&LedgerRecord> {
        self.ledger(kind).record(id)
    }

    pub fn load_source(&self, kind: LedgerKind) -> LoadSource {
        self.store(kind).source()
    }

    pub fn add_blank(&mut self, kind: LedgerKind) -> LedgerRecord {
        self.store_mut(kind).add_blank()
    }

    pub fn commit_edit(&mut self, kind: LedgerKind, record: LedgerRecord) -> EditOutcome {
        self.store_mut(kind).update(record)
    }

    pub fn save(&mut self, kind: LedgerKind) -> Result<(), CoreError> {
        self.store_mut(kind).save()
    }

    pub fn save_all(&mut self) -> Result<(), CoreError> {
        for kind in LedgerKind::ALL {
            self.save(kind)?;
        }
        Ok(())
    }

    pub fn has_unsaved_changes(&self, kind: LedgerKind) -> bool {
        self.store(kind).is_dirty()
    }

    pub fn unsaved_kinds(&self) -> Vec<LedgerKind> {
        LedgerKind::ALL
            .into_iter()
            .filter(|kind| self.has_unsaved_changes(*kind))
            .collect()
    }

    pub fn total(&self, kind: LedgerKind) -> f64 {
        self.store(kind).total()
    }

    pub fn profit_summary(&self) -> ProfitSummary {
        ProfitSummary::from_totals(
            self.total(LedgerKind::Income),
            self.total(LedgerKind::Expense),
        )
    }

    /// Last value written to the `totalSpent` mirror; may lag the expense ledger.
    pub fn total_spent(&self) -> f64 {
        load_total_spent(self.storage.as_ref())
    }

    /// Recomputes the expense total and writes it to the `totalSpent` mirror.
    pub fn sync_total_spent(&self) -> Result<f64, CoreError> {
        let total = self.total(LedgerKind::Expense);
        store_total_spent(self.storage.as_ref(), total)?;
        info!(total, "total spent mirror updated");
        Ok(total)
    }
}
