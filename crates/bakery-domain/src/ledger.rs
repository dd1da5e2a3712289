//! Ordered, kind-tagged collection of ledger records.

use std::{collections::HashSet, slice};

use uuid::Uuid;

use crate::{error::DomainError, kind::LedgerKind, record::LedgerRecord, seed::seed_records};

/// Ordered sequence of records for one ledger kind.
///
/// Insertion order is display order and every id is unique within the ledger.
/// Records are never removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    kind: LedgerKind,
    records: Vec<LedgerRecord>,
}

impl Ledger {
    pub fn new(kind: LedgerKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
        }
    }

    /// Builds the built-in seed ledger for `kind`.
    pub fn seeded(kind: LedgerKind) -> Self {
        Self {
            kind,
            records: seed_records(kind),
        }
    }

    /// Wraps an existing record list, rejecting lists that repeat an id.
    pub fn from_records(kind: LedgerKind, records: Vec<LedgerRecord>) -> Result<Self, DomainError> {
        if let Some(id) = first_duplicate_id(&records) {
            return Err(DomainError::DuplicateRecordId(id));
        }
        Ok(Self { kind, records })
    }

    pub fn kind(&self) -> LedgerKind {
        self.kind
    }

    pub fn records(&self) -> &[LedgerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, LedgerRecord> {
        self.records.iter()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    pub fn record(&self, id: Uuid) -> Option<&LedgerRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Appends `record`, keeping ids unique.
    pub fn push(&mut self, record: LedgerRecord) -> Result<Uuid, DomainError> {
        if self.contains(record.id) {
            return Err(DomainError::DuplicateRecordId(record.id));
        }
        let id = record.id;
        self.records.push(record);
        Ok(id)
    }

    /// Appends a blank record whose id is distinct from every existing id.
    pub fn append_blank(&mut self) -> &LedgerRecord {
        let mut record = LedgerRecord::blank();
        while self.contains(record.id) {
            record = LedgerRecord::blank();
        }
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// Replaces the record sharing `record.id` in place and returns the previous value.
    ///
    /// Returns `None` and leaves the ledger untouched when no record has that id.
    pub fn replace(&mut self, record: LedgerRecord) -> Option<LedgerRecord> {
        let index = self.position(record.id)?;
        Some(std::mem::replace(&mut self.records[index], record))
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a LedgerRecord;
    type IntoIter = slice::Iter<'a, LedgerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Returns the first id that appears more than once in `records`.
pub fn first_duplicate_id(records: &[LedgerRecord]) -> Option<Uuid> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .map(|record| record.id)
        .find(|id| !seen.insert(*id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_ledger_has_five_unique_records() {
        for kind in LedgerKind::ALL {
            let ledger = Ledger::seeded(kind);
            assert_eq!(ledger.kind(), kind);
            assert_eq!(ledger.len(), 5);
            assert!(first_duplicate_id(ledger.records()).is_none());
        }
    }

    #[test]
    fn from_records_rejects_repeated_ids() {
        let record = LedgerRecord::new("Rent", 1200.0, "");
        let err = Ledger::from_records(LedgerKind::Expense, vec![record.clone(), record.clone()])
            .unwrap_err();
        assert_eq!(err, DomainError::DuplicateRecordId(record.id));
    }

    #[test]
    fn push_rejects_existing_id() {
        let mut ledger = Ledger::new(LedgerKind::Income);
        let record = LedgerRecord::new("Sales", 2000.0, "");
        ledger.push(record.clone()).expect("first push");
        assert!(ledger.push(record).is_err());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn append_blank_grows_ledger_by_one() {
        let mut ledger = Ledger::seeded(LedgerKind::Income);
        let id = ledger.append_blank().id;
        assert_eq!(ledger.len(), 6);
        assert_eq!(ledger.position(id), Some(5));
        assert!(ledger.records()[5].is_blank());
    }

    #[test]
    fn replace_keeps_position_and_returns_previous() {
        let mut ledger = Ledger::seeded(LedgerKind::Income);
        let mut edited = ledger.records()[2].clone();
        edited.amount = 650.0;
        edited.notes = "Pickup window helped".into();

        let previous = ledger.replace(edited.clone()).expect("record exists");
        assert_eq!(previous.amount, 500.0);
        assert_eq!(ledger.records()[2], edited);
        assert_eq!(ledger.len(), 5);
    }

    #[test]
    fn replace_with_unknown_id_is_a_no_op() {
        let mut ledger = Ledger::seeded(LedgerKind::Expense);
        let before = ledger.clone();
        assert!(ledger.replace(LedgerRecord::new("Ghost", 1.0, "")).is_none());
        assert_eq!(ledger, before);
    }

    #[test]
    fn lookups_use_ids_not_field_values() {
        let twin_a = LedgerRecord::new("Labor", 175.0, "same");
        let twin_b = LedgerRecord::new("Labor", 175.0, "same");
        let ledger =
            Ledger::from_records(LedgerKind::Expense, vec![twin_a.clone(), twin_b.clone()])
                .expect("distinct ids");
        assert_eq!(ledger.position(twin_b.id), Some(1));
        assert_eq!(ledger.position(twin_a.id), Some(0));
    }
}
