mod common;

use std::fs;

use assert_cmd::Command;
use bakery_domain::LedgerKind;
use predicates::str::contains;

use common::{books_dir, open_books, temp_home};

fn script(home: &std::path::Path, input: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("bakery_cli")
        .expect("binary built")
        .env("BAKERY_LEDGER_CLI_SCRIPT", "1")
        .env("BAKERY_LEDGER_HOME", home)
        .env_remove("RUST_LOG")
        .write_stdin(input.to_string())
        .assert()
}

#[test]
fn fresh_home_lists_the_default_records() {
    let home = temp_home();
    script(&home, "list income\nlist expense\nexit\n")
        .success()
        .stdout(contains("Meal kit"))
        .stdout(contains("Total Earned: $3050.00"))
        .stdout(contains("Rent"))
        .stdout(contains("Total Spent: $2475.00"));
}

#[test]
fn summary_reports_the_profit_percentage() {
    let home = temp_home();
    script(&home, "summary\n")
        .success()
        .stdout(contains(
            "So far profit/loss percentage is approximately 18.85% [profit]",
        ));
}

#[test]
fn losses_are_classified_as_negative() {
    let home = temp_home();
    script(&home, "edit expense 2 amount=5000\nprofit\n")
        .success()
        .stdout(contains("Profit: -$3225.00"))
        .stdout(contains("approximately -105.74% [loss]"));
}

#[test]
fn saved_edits_survive_the_next_session() {
    let home = temp_home();
    script(
        &home,
        "add income name=Pies amount=$40 \"notes=Weekend stall\"\nedit expense 1 amount=650\nsave\nexit\n",
    )
    .success()
    .stdout(contains("Saved income records."))
    .stdout(contains("Saved expense records."));

    let books = open_books(&books_dir(&home));
    assert_eq!(books.total(LedgerKind::Income), 3090.0);
    assert_eq!(books.total(LedgerKind::Expense), 2525.0);
    assert_eq!(books.total_spent(), 2525.0);

    let raw = fs::read_to_string(books_dir(&home).join("incomesources.json"))
        .expect("income file written");
    let saved: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    let rows = saved.as_array().expect("records are stored as an array");
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[5]["name"], "Pies");
    assert_eq!(rows[5]["amount"], 40.0);
    assert_eq!(rows[5]["notes"], "Weekend stall");
    assert!(rows.iter().all(|row| row["id"].is_string()));

    script(&home, "total income\n")
        .success()
        .stdout(contains("Total Earned: $3090.00"));
}

#[test]
fn unsaved_edits_are_reported_and_discarded() {
    let home = temp_home();
    script(&home, "add expense\n")
        .success()
        .stdout(contains("Unsaved expense changes were discarded."));

    assert!(!books_dir(&home).join("expensesources.json").exists());
}

#[test]
fn invalid_amount_is_rejected_without_stopping_the_script() {
    let home = temp_home();
    script(&home, "edit income 1 amount=lots\ntotal income\n")
        .success()
        .stdout(contains("Amount must be a finite number"))
        .stdout(contains("Total Earned: $3050.00"));
}

#[test]
fn unknown_commands_get_a_suggestion() {
    let home = temp_home();
    script(&home, "summery\n")
        .success()
        .stdout(contains("Unknown command `summery`"))
        .stdout(contains("Suggestion: `summary`?"));
}

#[test]
fn corrupt_saved_data_falls_back_to_defaults() {
    let home = temp_home();
    let dir = books_dir(&home);
    fs::create_dir_all(&dir).expect("create books dir");
    fs::write(dir.join("incomesources.json"), "{ not json").expect("write corrupt file");

    script(&home, "total income\n")
        .success()
        .stdout(contains("Saved income records could not be read"))
        .stdout(contains("Total Earned: $3050.00"));
}

#[test]
fn help_lists_every_command() {
    let home = temp_home();
    let mut assert = script(&home, "help\nhelp done\n")
        .success()
        .stdout(contains("Available commands"));
    for name in ["list", "show", "add", "edit", "total", "summary", "save", "config", "exit"] {
        assert = assert.stdout(contains(format!("  {name}")));
    }
    assert
        .stdout(contains("Usage: save [income|expense|all]"))
        .stdout(contains("Aliases: done"));
}
