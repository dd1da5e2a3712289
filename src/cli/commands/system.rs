use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    for entry in registry.list() {
        output::line(format!("  {:<10} {}", entry.name, entry.description));
    }
    output::line("Use `help <command>` for details.");
}

fn print_command(registry: &CommandRegistry, entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    output::line(format!("  Description: {}", entry.description));
    output::line(format!("  Usage: {}", entry.usage));
    let aliases = registry.aliases_of(entry.name);
    if !aliases.is_empty() {
        output::line(format!("  Aliases: {}", aliases.join(", ")));
    }
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(entry) => print_command(&context.registry, entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    print_overview(&context.registry);
    Ok(())
}

fn cmd_version(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(meta.headline());
    output::line(format!("  Built at  : {}", meta.timestamp));
    output::line(format!("  Target    : {}", meta.target));
    output::line(format!("  Profile   : {}", meta.profile));
    output::line(format!("  Rustc     : {}", meta.rustc));
    if let Some(dir) = &context.data_dir {
        output::line(format!("  Data dir  : {}", dir.display()));
    }
    Ok(())
}

fn cmd_exit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.confirm_exit()? {
        Err(CommandError::ExitRequested)
    } else {
        Ok(())
    }
}
