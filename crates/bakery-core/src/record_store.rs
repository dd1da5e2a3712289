//! Loads, owns, and persists one ledger.

use std::{fmt, sync::Arc};

use tracing::{debug, info, warn};

use bakery_domain::{Ledger, LedgerKind, LedgerRecord, TOTAL_SPENT_KEY};

use crate::{
    record_service::{EditOutcome, RecordService},
    storage::KeyValueStore,
    totals::LedgerTotals,
    CoreError,
};

/// Why a ledger fell back to its seed records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedReason {
    /// Nothing was stored under the ledger's key, or the medium could not be read.
    Absent,
    /// Stored data could not be decoded into a valid ledger.
    Malformed,
}

/// Where the records of a freshly loaded ledger came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Persisted,
    Seeded(SeedReason),
}

impl fmt::Display for LoadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadSource::Persisted => f.write_str("saved records"),
            LoadSource::Seeded(SeedReason::Absent) => f.write_str("default records"),
            LoadSource::Seeded(SeedReason::Malformed) => {
                f.write_str("default records (saved data was unreadable)")
            }
        }
    }
}

/// Serializes records into the persisted JSON array form.
///
/// JSON has no representation for NaN or infinity, so a non-finite amount
/// fails the encode instead of being written as `null`.
pub fn encode_records(records: &[LedgerRecord]) -> Result<String, CoreError> {
    if let Some(record) = records.iter().find(|record| !record.amount.is_finite()) {
        return Err(CoreError::InvalidOperation(format!(
            "record {} has a non-finite amount ({})",
            record.id, record.amount
        )));
    }
    Ok(serde_json::to_string(records)?)
}

/// Decodes a persisted JSON array, enforcing unique ids.
pub fn decode_ledger(kind: LedgerKind, raw: &str) -> Result<Ledger, CoreError> {
    let records: Vec<LedgerRecord> = serde_json::from_str(raw)?;
    Ok(Ledger::from_records(kind, records)?)
}

/// Reads a ledger from `storage`, substituting the seed list when nothing usable is stored.
pub fn load_ledger(kind: LedgerKind, storage: &dyn KeyValueStore) -> (Ledger, LoadSource) {
    let key = kind.storage_key();
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(%kind, key, "no saved records; using defaults");
            return (Ledger::seeded(kind), LoadSource::Seeded(SeedReason::Absent));
        }
        Err(err) => {
            warn!(%kind, key, error = %err, "could not read saved records; using defaults");
            return (Ledger::seeded(kind), LoadSource::Seeded(SeedReason::Absent));
        }
    };
    match decode_ledger(kind, &raw) {
        Ok(ledger) => (ledger, LoadSource::Persisted),
        Err(err) => {
            warn!(%kind, key, error = %err, "saved records are malformed; using defaults");
            (
                Ledger::seeded(kind),
                LoadSource::Seeded(SeedReason::Malformed),
            )
        }
    }
}

/// Reads the persisted expense-total mirror. Absent or unreadable values read as `0.0`.
pub fn load_total_spent(storage: &dyn KeyValueStore) -> f64 {
    match storage.read(TOTAL_SPENT_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(key = TOTAL_SPENT_KEY, error = %err, "ignoring malformed total");
            0.0
        }),
        Ok(None) => 0.0,
        Err(err) => {
            warn!(key = TOTAL_SPENT_KEY, error = %err, "could not read total");
            0.0
        }
    }
}

/// Overwrites the persisted expense-total mirror.
pub fn store_total_spent(storage: &dyn KeyValueStore, total: f64) -> Result<(), CoreError> {
    if !total.is_finite() {
        return Err(CoreError::InvalidOperation(format!(
            "total spent is not finite ({total})"
        )));
    }
    storage.write(TOTAL_SPENT_KEY, &serde_json::to_string(&total)?)
}

/// Owns one ledger for the length of an editing session.
pub struct RecordStore {
    ledger: Ledger,
    storage: Arc<dyn KeyValueStore>,
    source: LoadSource,
    dirty: bool,
}

impl RecordStore {
    pub fn load(kind: LedgerKind, storage: Arc<dyn KeyValueStore>) -> Self {
        let (ledger, source) = load_ledger(kind, storage.as_ref());
        info!(%kind, records = ledger.len(), %source, "ledger loaded");
        Self {
            ledger,
            storage,
            source,
            dirty: false,
        }
    }

    pub fn kind(&self) -> LedgerKind {
        self.ledger.kind()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn source(&self) -> LoadSource {
        self.source
    }

    /// `true` once the in-memory ledger differs from what was last loaded or saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn add_blank(&mut self) -> LedgerRecord {
        self.dirty = true;
        RecordService::add_blank(&mut self.ledger)
    }

    pub fn update(&mut self, record: LedgerRecord) -> EditOutcome {
        let outcome = RecordService::update(&mut self.ledger, record);
        if outcome.is_applied() {
            self.dirty = true;
        }
        outcome
    }

    /// Writes the whole ledger under its fixed key, replacing any earlier value.
    pub fn save(&mut self) -> Result<(), CoreError> {
        let kind = self.kind();
        let encoded = encode_records(self.ledger.records())?;
        self.storage.write(kind.storage_key(), &encoded)?;
        self.dirty = false;
        info!(%kind, records = self.ledger.len(), "ledger saved");
        Ok(())
    }

    pub fn total(&self) -> f64 {
        LedgerTotals::total(&self.ledger)
    }
}
