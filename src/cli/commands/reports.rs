use bakery_domain::LedgerKind;

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::format::{format_amount, format_percentage};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const SAVE_USAGE: &str = "save [income|expense|all]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show totals and the profit/loss percentage",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new("save", "Persist edited ledgers", SAVE_USAGE, cmd_save),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let precision = context.precision();
    let summary = context.books.profit_summary();

    output::section("Profit / loss");
    output::line(format!(
        "{}: {}",
        LedgerKind::Income.total_caption(),
        format_amount(summary.income_total, precision)
    ));
    output::line(format!(
        "{}: {}",
        LedgerKind::Expense.total_caption(),
        format_amount(summary.expense_total, precision)
    ));
    output::line(format!("Profit: {}", format_amount(summary.profit, precision)));
    output::profit_line(
        summary.classification,
        format!(
            "So far profit/loss percentage is approximately {}",
            format_percentage(summary.percentage, precision)
        ),
    );
    Ok(())
}

fn save_targets(arg: Option<&str>) -> Result<Vec<LedgerKind>, CommandError> {
    match arg {
        None => Ok(LedgerKind::ALL.to_vec()),
        Some(raw) if raw.eq_ignore_ascii_case("all") => Ok(LedgerKind::ALL.to_vec()),
        Some(raw) => raw
            .parse::<LedgerKind>()
            .map(|kind| vec![kind])
            .map_err(|err| CommandError::InvalidArguments(err.to_string())),
    }
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    for kind in save_targets(args.first().copied())? {
        let had_changes = context.books.has_unsaved_changes(kind);
        context.books.save(kind)?;
        if kind == LedgerKind::Expense {
            context.books.sync_total_spent()?;
        }
        if had_changes {
            output::success(format!("Saved {} records.", kind.label()));
        } else {
            output::info(format!("No {} changes to save.", kind.label()));
        }
    }
    Ok(())
}
