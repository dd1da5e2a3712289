//! The single record type shared by income and expense ledgers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Amounted, NamedEntity};

/// One income or expense source.
///
/// The serialized form is `{ "id", "name", "amount", "notes" }`. Expenses are
/// stored as positive magnitudes; no sign is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub notes: String,
}

impl LedgerRecord {
    pub fn new(name: impl Into<String>, amount: f64, notes: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            notes: notes.into(),
        }
    }

    /// Creates the record handed to the edit flow when the user adds an entry.
    pub fn blank() -> Self {
        Self::new("", 0.0, "")
    }

    /// Returns `true` when the record still carries its blank defaults.
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.amount == 0.0 && self.notes.is_empty()
    }
}

impl NamedEntity for LedgerRecord {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for LedgerRecord {
    fn amount(&self) -> f64 {
        self.amount
    }
}
