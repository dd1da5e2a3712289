pub mod config;
pub mod records;
pub mod reports;
pub mod system;

use bakery_domain::LedgerKind;

use crate::cli::context::CommandError;
use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in system::definitions()
        .into_iter()
        .chain(records::definitions())
        .chain(reports::definitions())
        .chain(config::definitions())
    {
        registry.register(entry);
    }
    registry.alias("profit", "summary");
    registry.alias("done", "save");
    registry.alias("quit", "exit");
}

/// Reads the ledger kind argument, reporting `usage` when it is missing.
pub(crate) fn parse_kind(arg: Option<&str>, usage: &str) -> Result<LedgerKind, CommandError> {
    let raw = arg.ok_or_else(|| CommandError::InvalidArguments(format!("Usage: {usage}")))?;
    raw.parse::<LedgerKind>()
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))
}
