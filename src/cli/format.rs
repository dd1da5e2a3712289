use uuid::Uuid;

use bakery_domain::{LedgerRecord, NamedEntity};

const UNNAMED: &str = "(unnamed)";

/// Formats an amount as dollars with a fixed number of decimals, e.g. `$1200.00` or `-$50.50`.
pub fn format_amount(value: f64, precision: usize) -> String {
    let digits = format!("{:.*}", precision, value.abs());
    if value.is_sign_negative() && digits.chars().any(|c| matches!(c, '1'..='9')) {
        format!("-${digits}")
    } else {
        format!("${digits}")
    }
}

pub fn format_percentage(value: f64, precision: usize) -> String {
    format!("{:.*}%", precision, value)
}

pub fn short_id(id: Uuid) -> String {
    let mut short = id.simple().to_string();
    short.truncate(8);
    short
}

pub fn display_name(record: &LedgerRecord) -> &str {
    let name = record.name().trim();
    if name.is_empty() {
        UNNAMED
    } else {
        record.name()
    }
}

/// Renders the numbered rows of a ledger listing.
pub fn record_rows(records: &[LedgerRecord], precision: usize) -> Vec<String> {
    let name_width = records
        .iter()
        .map(|record| display_name(record).chars().count())
        .max()
        .unwrap_or(0)
        .max(4);
    let amounts: Vec<String> = records
        .iter()
        .map(|record| format_amount(record.amount, precision))
        .collect();
    let amount_width = amounts.iter().map(String::len).max().unwrap_or(0).max(6);

    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(format!(
        "{:>3}  {:<name_width$}  {:>amount_width$}  {}",
        "#", "Name", "Amount", "Notes"
    ));
    for (index, (record, amount)) in records.iter().zip(&amounts).enumerate() {
        let row = format!(
            "{:>3}  {:<name_width$}  {:>amount_width$}  {}",
            index + 1,
            display_name(record),
            amount,
            record.notes.trim_end()
        );
        rows.push(row.trim_end().to_string());
    }
    rows
}
