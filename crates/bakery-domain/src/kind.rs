//! Income/expense tag shared by every ledger.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Storage key holding the persisted income records.
pub const INCOME_STORAGE_KEY: &str = "IncomeSources";
/// Storage key holding the persisted expense records.
pub const EXPENSE_STORAGE_KEY: &str = "ExpenseSources";
/// Storage key of the scalar mirroring the expense total.
pub const TOTAL_SPENT_KEY: &str = "totalSpent";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerKind {
    Income,
    Expense,
}

impl LedgerKind {
    pub const ALL: [LedgerKind; 2] = [LedgerKind::Income, LedgerKind::Expense];

    /// Fixed key under which this kind's records are persisted.
    pub fn storage_key(self) -> &'static str {
        match self {
            LedgerKind::Income => INCOME_STORAGE_KEY,
            LedgerKind::Expense => EXPENSE_STORAGE_KEY,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LedgerKind::Income => "income",
            LedgerKind::Expense => "expense",
        }
    }

    /// Caption used next to the ledger total.
    pub fn total_caption(self) -> &'static str {
        match self {
            LedgerKind::Income => "Total Earned",
            LedgerKind::Expense => "Total Spent",
        }
    }
}

impl fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when text does not name a ledger kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLedgerKindError(pub String);

impl fmt::Display for ParseLedgerKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown ledger kind `{}` (expected `income` or `expense`)",
            self.0
        )
    }
}

impl std::error::Error for ParseLedgerKindError {}

impl FromStr for LedgerKind {
    type Err = ParseLedgerKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "incomes" | "in" => Ok(LedgerKind::Income),
            "expense" | "expenses" | "out" => Ok(LedgerKind::Expense),
            other => Err(ParseLedgerKindError(other.to_string())),
        }
    }
}
