//! Mutation helpers for [`Ledger`] instances.

use tracing::{debug, warn};

use bakery_domain::{Ledger, LedgerRecord};

/// Result of committing an edit to a ledger.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    /// No record carried the edited id; the ledger was left unchanged.
    RecordNotFound,
}

impl EditOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, EditOutcome::Applied)
    }
}

pub struct RecordService;

impl RecordService {
    /// Appends a blank record and returns a copy for the edit flow.
    pub fn add_blank(ledger: &mut Ledger) -> LedgerRecord {
        let record = ledger.append_blank().clone();
        debug!(kind = %ledger.kind(), id = %record.id, "added blank record");
        record
    }

    /// Replaces the record whose id matches `record.id`. Never inserts.
    pub fn update(ledger: &mut Ledger, record: LedgerRecord) -> EditOutcome {
        let id = record.id;
        match ledger.replace(record) {
            Some(_) => {
                debug!(kind = %ledger.kind(), %id, "updated record");
                EditOutcome::Applied
            }
            None => {
                warn!(kind = %ledger.kind(), %id, "edit references an unknown record");
                EditOutcome::RecordNotFound
            }
        }
    }
}
