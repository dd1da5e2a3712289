use std::sync::Arc;

use crate::{
    books::BakeryBooks,
    profit::{ProfitCalculator, ProfitClass},
    record_store::{encode_records, LoadSource, SeedReason},
    storage::{KeyValueStore, MemoryStore},
    totals::LedgerTotals,
    EditOutcome,
};
use bakery_domain::{Ledger, LedgerKind, LedgerRecord};

fn shared_memory() -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryStore::new())
}

#[test]
fn total_matches_sum_of_amounts() {
    let records = vec![
        LedgerRecord::new("Meal kit", 150.0, ""),
        LedgerRecord::new("Gift cards", 200.25, ""),
        LedgerRecord::new("Refund", -25.25, ""),
    ];
    let expected: f64 = records.iter().map(|record| record.amount).sum();
    let ledger = Ledger::from_records(LedgerKind::Income, records).unwrap();
    assert_eq!(LedgerTotals::total(&ledger), expected);
    assert_eq!(LedgerTotals::total(&Ledger::new(LedgerKind::Expense)), 0.0);
}

#[test]
fn profit_calculator_documented_cases() {
    assert_eq!(ProfitCalculator::profit_percentage(0.0, 0.0), 0.0);
    assert_eq!(ProfitCalculator::profit_percentage(0.0, 600.0), 0.0);
    assert_eq!(ProfitCalculator::profit(1000.0, 400.0), 600.0);
    assert_eq!(ProfitCalculator::profit_percentage(1000.0, 400.0), 60.0);
    let pct = ProfitCalculator::profit_percentage(500.0, 600.0);
    assert_eq!(pct, -20.0);
    assert_eq!(ProfitCalculator::classify(pct), ProfitClass::Negative);
}

#[test]
fn books_open_with_seeds_on_first_run() {
    let books = BakeryBooks::open(shared_memory());
    for kind in LedgerKind::ALL {
        assert_eq!(books.ledger(kind).len(), 5);
        assert_eq!(books.load_source(kind), LoadSource::Seeded(SeedReason::Absent));
        assert!(!books.has_unsaved_changes(kind));
    }
    let summary = books.profit_summary();
    assert_eq!(summary.income_total, 3050.0);
    assert_eq!(summary.expense_total, 2475.0);
    assert_eq!(summary.profit, 575.0);
    assert_eq!(summary.classification, ProfitClass::Positive);
}

#[test]
fn corrupt_storage_yields_exact_seed_list() {
    let storage = shared_memory();
    storage.write("IncomeSources", "[{\"id\": 12}]").unwrap();
    storage.write("ExpenseSources", "garbage").unwrap();
    let books = BakeryBooks::open(storage);

    for kind in LedgerKind::ALL {
        let seeded = Ledger::seeded(kind);
        let loaded = books.ledger(kind);
        assert_eq!(books.load_source(kind), LoadSource::Seeded(SeedReason::Malformed));
        assert_eq!(loaded.len(), seeded.len());
        for (actual, expected) in loaded.iter().zip(seeded.iter()) {
            assert_eq!(actual.name, expected.name);
            assert_eq!(actual.amount, expected.amount);
            assert_eq!(actual.notes, expected.notes);
        }
    }
}

#[test]
fn save_then_load_round_trips_ledger() {
    let storage = shared_memory();
    let mut books = BakeryBooks::open(Arc::clone(&storage));
    let mut record = books.add_blank(LedgerKind::Expense);
    record.name = "Oven repair".into();
    record.amount = 349.99;
    record.notes = "Thermostat \"replaced\"\nagain".into();
    assert_eq!(
        books.commit_edit(LedgerKind::Expense, record.clone()),
        EditOutcome::Applied
    );
    books.save_all().unwrap();
    let saved_expense = books.ledger(LedgerKind::Expense).clone();
    let saved_income = books.ledger(LedgerKind::Income).clone();

    let reopened = BakeryBooks::open(storage);
    assert_eq!(reopened.load_source(LedgerKind::Expense), LoadSource::Persisted);
    assert_eq!(reopened.ledger(LedgerKind::Expense), &saved_expense);
    assert_eq!(reopened.ledger(LedgerKind::Income), &saved_income);
    assert_eq!(reopened.record(LedgerKind::Expense, record.id), Some(&record));
}

#[test]
fn unsaved_edits_are_not_persisted() {
    let storage = shared_memory();
    let mut books = BakeryBooks::open(Arc::clone(&storage));
    books.add_blank(LedgerKind::Income);
    assert_eq!(books.unsaved_kinds(), vec![LedgerKind::Income]);

    let reopened = BakeryBooks::open(storage);
    assert_eq!(reopened.ledger(LedgerKind::Income).len(), 5);
}

#[test]
fn add_blank_yields_fresh_trailing_record() {
    let mut books = BakeryBooks::open(shared_memory());
    let existing: Vec<_> = books
        .ledger(LedgerKind::Income)
        .iter()
        .map(|record| record.id)
        .collect();

    let record = books.add_blank(LedgerKind::Income);
    let ledger = books.ledger(LedgerKind::Income);
    assert_eq!(ledger.len(), existing.len() + 1);
    assert_eq!(ledger.records().last(), Some(&record));
    assert!(!existing.contains(&record.id));
    assert_eq!(record.amount, 0.0);
    assert!(record.name.is_empty() && record.notes.is_empty());
}

#[test]
fn commit_edit_with_unknown_id_leaves_ledger_unchanged() {
    let storage = shared_memory();
    let only = LedgerRecord::new("A", 1.0, "");
    storage
        .write("IncomeSources", &encode_records(&[only.clone()]).unwrap())
        .unwrap();
    let mut books = BakeryBooks::open(storage);

    let stranger = LedgerRecord::new("B", 2.0, "");
    assert_eq!(
        books.commit_edit(LedgerKind::Income, stranger),
        EditOutcome::RecordNotFound
    );
    assert_eq!(books.ledger(LedgerKind::Income).records(), [only].as_slice());
}

#[test]
fn total_spent_mirror_syncs_only_on_request() {
    let mut books = BakeryBooks::open(shared_memory());
    assert_eq!(books.total_spent(), 0.0);

    assert_eq!(books.sync_total_spent().unwrap(), 2475.0);
    assert_eq!(books.total_spent(), 2475.0);

    let mut rent = books.ledger(LedgerKind::Expense).records()[1].clone();
    rent.amount = 1300.0;
    assert!(books.commit_edit(LedgerKind::Expense, rent).is_applied());
    assert_eq!(books.total_spent(), 2475.0);
    assert_eq!(books.total(LedgerKind::Expense), 2575.0);

    books.sync_total_spent().unwrap();
    assert_eq!(books.total_spent(), 2575.0);
}

#[test]
fn profit_turns_negative_when_expenses_exceed_income() {
    let mut books = BakeryBooks::open(shared_memory());
    let mut sales = books.ledger(LedgerKind::Income).records()[4].clone();
    sales.amount = 0.0;
    assert!(books.commit_edit(LedgerKind::Income, sales).is_applied());

    let summary = books.profit_summary();
    assert_eq!(summary.income_total, 1050.0);
    assert!(summary.percentage < 0.0);
    assert_eq!(summary.classification, ProfitClass::Negative);
}

#[test]
fn non_finite_amount_fails_the_save_and_keeps_stored_records() {
    let storage = shared_memory();
    let mut books = BakeryBooks::open(Arc::clone(&storage));
    books.save(LedgerKind::Income).unwrap();
    let stored = storage.read(LedgerKind::Income.storage_key()).unwrap();

    let mut broken = books.add_blank(LedgerKind::Income);
    broken.amount = f64::NAN;
    assert!(books.commit_edit(LedgerKind::Income, broken).is_applied());

    assert!(books.save(LedgerKind::Income).is_err());
    assert!(books.has_unsaved_changes(LedgerKind::Income));
    assert_eq!(storage.read(LedgerKind::Income.storage_key()).unwrap(), stored);

    let reopened = BakeryBooks::open(storage);
    assert_eq!(reopened.load_source(LedgerKind::Income), LoadSource::Persisted);
    assert_eq!(reopened.ledger(LedgerKind::Income).len(), 5);
}

#[test]
fn overflowing_expense_total_is_not_mirrored() {
    let mut books = BakeryBooks::open(shared_memory());
    books.sync_total_spent().unwrap();

    for _ in 0..2 {
        let mut huge = books.add_blank(LedgerKind::Expense);
        huge.amount = 1e308;
        assert!(books.commit_edit(LedgerKind::Expense, huge).is_applied());
    }
    assert!(books.total(LedgerKind::Expense).is_infinite());

    assert!(books.sync_total_spent().is_err());
    assert_eq!(books.total_spent(), 2475.0);
}
