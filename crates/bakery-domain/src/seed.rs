//! Built-in records used when nothing usable has been persisted yet.

use crate::{kind::LedgerKind, record::LedgerRecord};

const INCOME_SEED: [(&str, f64, &str); 5] = [
    ("Meal kit", 150.0, "Great kick off start to these kits! yum!!!"),
    ("Gift cards", 200.0, "Sold less than what expected :("),
    (
        "Mobile Orders",
        500.0,
        "To go orders are doing better than walk-in at the moment!",
    ),
    ("Catering", 200.0, "Had a couple of school events this month"),
    ("Sales", 2000.0, "Average month!"),
];

const EXPENSE_SEED: [(&str, f64, &str); 5] = [
    (
        "Food Cost",
        600.0,
        "Had to get more dough, bread, breakfast meat and toppings ",
    ),
    ("Rent", 1200.0, "Rent may increase in the next month"),
    (
        "Cost of supplies",
        400.0,
        "Had to replenish paper goods and cleaning supplies",
    ),
    ("Labor", 175.0, "Only had one employee this weekend"),
    ("Maintenance", 100.0, "Continuous leak in faucet"),
];

/// Returns the five seed records for `kind`, each with a freshly generated id.
pub fn seed_records(kind: LedgerKind) -> Vec<LedgerRecord> {
    let table = match kind {
        LedgerKind::Income => &INCOME_SEED,
        LedgerKind::Expense => &EXPENSE_SEED,
    };
    table
        .iter()
        .map(|(name, amount, notes)| LedgerRecord::new(*name, *amount, *notes))
        .collect()
}
