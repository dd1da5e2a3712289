pub mod commands;
pub mod context;
pub mod format;
pub mod output;
pub mod registry;
pub mod shell;

pub use context::{CliMode, CommandError, ShellContext};
pub use shell::run_cli;
