use bakery_core::EditOutcome;
use bakery_domain::{Ledger, LedgerKind, LedgerRecord};

use crate::cli::commands::parse_kind;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::format::{display_name, format_amount, record_rows, short_id};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const LIST_USAGE: &str = "list <income|expense>";
const SHOW_USAGE: &str = "show <income|expense> <row|id>";
const ADD_USAGE: &str = "add <income|expense> [name=..] [amount=..] [notes=..]";
const EDIT_USAGE: &str = "edit <income|expense> <row|id> <field=value>...";
const TOTAL_USAGE: &str = "total <income|expense>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("list", "List the records of a ledger", LIST_USAGE, cmd_list),
        CommandEntry::new("show", "Show one record in detail", SHOW_USAGE, cmd_show),
        CommandEntry::new("add", "Append a new record", ADD_USAGE, cmd_add),
        CommandEntry::new("edit", "Change fields of a record", EDIT_USAGE, cmd_edit),
        CommandEntry::new("total", "Show the total of a ledger", TOTAL_USAGE, cmd_total),
    ]
}

/// Field assignments parsed from `name=`, `amount=` and `notes=` arguments.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct FieldEdits {
    name: Option<String>,
    amount: Option<f64>,
    notes: Option<String>,
}

impl FieldEdits {
    pub(crate) fn parse(args: &[&str]) -> Result<Self, CommandError> {
        let mut edits = Self::default();
        for arg in args {
            let (field, value) = arg.split_once('=').ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "Expected `field=value`, got `{arg}`"
                ))
            })?;
            match field.trim().to_ascii_lowercase().as_str() {
                "name" => edits.name = Some(value.to_string()),
                "amount" => edits.amount = Some(parse_amount(value)?),
                "notes" | "note" => edits.notes = Some(value.to_string()),
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "Unknown field `{other}` (expected name, amount or notes)"
                    )))
                }
            }
        }
        Ok(edits)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.name.is_none() && self.amount.is_none() && self.notes.is_none()
    }

    pub(crate) fn apply(self, record: &mut LedgerRecord) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(amount) = self.amount {
            record.amount = amount;
        }
        if let Some(notes) = self.notes {
            record.notes = notes;
        }
    }
}

/// Parses a dollar amount such as `1200`, `$12.50` or `-3`.
pub(crate) fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
    match digits.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(CommandError::InvalidArguments(format!(
            "Amount must be a finite number, got `{raw}`"
        ))),
    }
}

/// Resolves a 1-based row number or an id prefix to a position in `ledger`.
///
/// A number past the last row is tried as an id prefix, since short ids can be
/// all digits.
pub(crate) fn resolve_position(ledger: &Ledger, reference: &str) -> Result<usize, CommandError> {
    let label = ledger.kind().label();
    let row = reference.parse::<usize>().ok();
    if let Some(row) = row.filter(|row| (1..=ledger.len()).contains(row)) {
        return Ok(row - 1);
    }

    let needle = reference.to_ascii_lowercase();
    let matches: Vec<usize> = ledger
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            record.id.to_string().starts_with(&needle)
                || record.id.simple().to_string().starts_with(&needle)
        })
        .map(|(index, _)| index)
        .collect();

    match matches.as_slice() {
        [index] => Ok(*index),
        [] if row.is_some() => Err(CommandError::InvalidArguments(format!(
            "No {label} record at row {reference} (the ledger has {} rows)",
            ledger.len()
        ))),
        [] => Err(CommandError::InvalidArguments(format!(
            "No {label} record matches `{reference}`"
        ))),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{reference}` matches {} {label} records; use a longer id",
            matches.len()
        ))),
    }
}

fn require_reference<'a>(args: &[&'a str], usage: &str) -> Result<&'a str, CommandError> {
    args.get(1)
        .copied()
        .ok_or_else(|| CommandError::InvalidArguments(format!("Usage: {usage}")))
}

/// Keeps the `totalSpent` mirror in step after an expense edit lands.
fn sync_mirror(context: &ShellContext, kind: LedgerKind) -> CommandResult {
    if kind == LedgerKind::Expense {
        context.books.sync_total_spent()?;
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = parse_kind(args.first().copied(), LIST_USAGE)?;
    let precision = context.precision();
    let ledger = context.books.ledger(kind);

    output::section(format!("{} sources", capitalize(kind.label())));
    if ledger.is_empty() {
        output::line("No records.");
    } else {
        for row in record_rows(ledger.records(), precision) {
            output::line(row);
        }
    }
    output::line(format!(
        "{}: {}",
        kind.total_caption(),
        format_amount(context.books.total(kind), precision)
    ));
    Ok(())
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = parse_kind(args.first().copied(), SHOW_USAGE)?;
    let reference = require_reference(args, SHOW_USAGE)?;
    let ledger = context.books.ledger(kind);
    let position = resolve_position(ledger, reference)?;
    let record = &ledger.records()[position];

    output::section(format!("{} record #{}", capitalize(kind.label()), position + 1));
    output::line(format!("  Id     : {}", record.id));
    output::line(format!("  Name   : {}", display_name(record)));
    output::line(format!(
        "  Amount : {}",
        format_amount(record.amount, context.precision())
    ));
    output::line(format!("  Notes  : {}", record.notes));
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = parse_kind(args.first().copied(), ADD_USAGE)?;
    let edits = FieldEdits::parse(&args[1..])?;

    let mut record = context.books.add_blank(kind);
    if !edits.is_empty() {
        edits.apply(&mut record);
        if !context.books.commit_edit(kind, record.clone()).is_applied() {
            return Err(CommandError::InvalidArguments(format!(
                "New {} record {} disappeared before it could be edited",
                kind.label(),
                short_id(record.id)
            )));
        }
        sync_mirror(context, kind)?;
    }

    let row = context.books.ledger(kind).len();
    output::success(format!(
        "Added {} record #{} ({}).",
        kind.label(),
        row,
        short_id(record.id)
    ));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = parse_kind(args.first().copied(), EDIT_USAGE)?;
    let reference = require_reference(args, EDIT_USAGE)?;
    let edits = FieldEdits::parse(&args[2..])?;
    if edits.is_empty() {
        return Err(CommandError::InvalidArguments(format!("Usage: {EDIT_USAGE}")));
    }

    let ledger = context.books.ledger(kind);
    let position = resolve_position(ledger, reference)?;
    let mut record = ledger.records()[position].clone();
    edits.apply(&mut record);

    match context.books.commit_edit(kind, record) {
        EditOutcome::Applied => {
            sync_mirror(context, kind)?;
            output::success(format!("Updated {} record #{}.", kind.label(), position + 1));
        }
        EditOutcome::RecordNotFound => {
            output::warning(format!("That {} record no longer exists.", kind.label()));
        }
    }
    Ok(())
}

fn cmd_total(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = parse_kind(args.first().copied(), TOTAL_USAGE)?;
    output::line(format!(
        "{}: {}",
        kind.total_caption(),
        format_amount(context.books.total(kind), context.precision())
    ));
    Ok(())
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bakery_core::{KeyValueStore, MemoryStore};
    use bakery_domain::TOTAL_SPENT_KEY;

    use super::*;
    use crate::cli::context::CliMode;

    fn context_with_store() -> (ShellContext, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let context = ShellContext::in_memory(CliMode::Script, store.clone());
        (context, store)
    }

    #[test]
    fn parses_amounts_with_optional_dollar_sign() {
        assert_eq!(parse_amount("1200").expect("plain"), 1200.0);
        assert_eq!(parse_amount(" $12.50 ").expect("dollar"), 12.5);
        assert_eq!(parse_amount("-3").expect("negative"), -3.0);
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("inf").is_err());
    }

    #[test]
    fn rejects_unknown_fields_and_bare_words() {
        assert!(matches!(
            FieldEdits::parse(&["colour=red"]),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            FieldEdits::parse(&["Pies"]),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn field_values_may_contain_equals_signs() {
        let edits = FieldEdits::parse(&["notes=a=b"]).expect("parse");
        let mut record = LedgerRecord::blank();
        edits.apply(&mut record);
        assert_eq!(record.notes, "a=b");
    }

    #[test]
    fn resolves_rows_and_id_prefixes() {
        let ledger = Ledger::seeded(LedgerKind::Income);
        assert_eq!(resolve_position(&ledger, "1").expect("first row"), 0);
        assert_eq!(resolve_position(&ledger, "5").expect("last row"), 4);
        assert!(resolve_position(&ledger, "0").is_err());
        assert!(resolve_position(&ledger, "6").is_err());

        let id = ledger.records()[2].id.to_string();
        assert_eq!(resolve_position(&ledger, &id).expect("full id"), 2);
        assert_eq!(
            resolve_position(&ledger, &id.to_ascii_uppercase()).expect("upper-case id"),
            2
        );
        assert!(resolve_position(&ledger, "zzzz").is_err());
    }

    #[test]
    fn all_digit_short_ids_resolve_past_the_last_row() {
        let mut record = LedgerRecord::new("Cupcakes", 80.0, "");
        record.id = uuid::Uuid::parse_str("12345678-aaaa-4bbb-8ccc-dddddddddddd").expect("uuid");
        let ledger =
            Ledger::from_records(LedgerKind::Income, vec![LedgerRecord::blank(), record])
                .expect("unique ids");

        assert_eq!(resolve_position(&ledger, "2").expect("row"), 1);
        assert_eq!(resolve_position(&ledger, "12345678").expect("short id"), 1);
        let err = resolve_position(&ledger, "99").expect_err("no such row");
        assert!(err.to_string().contains("row 99"));
    }

    #[test]
    fn add_with_fields_applies_them_in_one_edit() {
        let (mut context, _) = context_with_store();
        context
            .process_line("add income name=Pies amount=$40 \"notes=Weekend stall\"")
            .expect("add");

        let ledger = context.books.ledger(LedgerKind::Income);
        assert_eq!(ledger.len(), 6);
        let added = &ledger.records()[5];
        assert_eq!(added.name, "Pies");
        assert_eq!(added.amount, 40.0);
        assert_eq!(added.notes, "Weekend stall");
        assert_eq!(context.books.total(LedgerKind::Income), 3090.0);
    }

    #[test]
    fn bare_add_appends_a_blank_record() {
        let (mut context, _) = context_with_store();
        context.process_line("add expense").expect("add");

        let ledger = context.books.ledger(LedgerKind::Expense);
        assert_eq!(ledger.len(), 6);
        assert!(ledger.records()[5].is_blank());
        assert!(context.books.has_unsaved_changes(LedgerKind::Expense));
    }

    #[test]
    fn expense_edit_refreshes_the_total_spent_mirror() {
        let (mut context, store) = context_with_store();
        context.process_line("edit expense 1 amount=1300").expect("edit");

        assert_eq!(context.books.total(LedgerKind::Expense), 3175.0);
        let mirror = store
            .read(TOTAL_SPENT_KEY)
            .expect("read")
            .expect("mirror written");
        assert_eq!(mirror.parse::<f64>().expect("number"), 3175.0);
    }

    #[test]
    fn income_edit_leaves_the_mirror_alone() {
        let (mut context, store) = context_with_store();
        context.process_line("edit income 1 amount=10").expect("edit");
        assert!(store.read(TOTAL_SPENT_KEY).expect("read").is_none());
    }

    #[test]
    fn invalid_edits_leave_the_ledger_untouched() {
        let (mut context, _) = context_with_store();
        let before = context.books.ledger(LedgerKind::Income).clone();

        assert!(context.process_line("edit income 1 amount=lots").is_err());
        assert!(context.process_line("edit income 9 name=Cake").is_err());
        assert!(context.process_line("edit income 1").is_err());

        assert_eq!(context.books.ledger(LedgerKind::Income), &before);
        assert!(!context.books.has_unsaved_changes(LedgerKind::Income));
    }

    #[test]
    fn missing_kind_is_a_usage_error() {
        let (mut context, _) = context_with_store();
        assert!(matches!(
            context.process_line("list"),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            context.process_line("total pantry"),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn capitalizes_labels() {
        assert_eq!(capitalize("income"), "Income");
        assert_eq!(capitalize(""), "");
    }
}
