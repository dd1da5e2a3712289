use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const CONFIG_USAGE: &str = "config [show|set <precision|color|plain|high_contrast> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change display preferences",
        CONFIG_USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => show_config(context),
        [action] if action.eq_ignore_ascii_case("show") => show_config(context),
        [action, key, value] if action.eq_ignore_ascii_case("set") => {
            set_config_value(context, key, value)
        }
        _ => Err(CommandError::InvalidArguments(format!(
            "Usage: {CONFIG_USAGE}"
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    let config = &context.config;
    output::section("Configuration");
    output::line(format!("  precision     : {}", config.precision()));
    output::line(format!("  color         : {}", config.ui_color_enabled));
    output::line(format!(
        "  plain         : {}",
        config.accessibility.plain_output
    ));
    output::line(format!(
        "  high_contrast : {}",
        config.accessibility.high_contrast
    ));
    if let Some(manager) = &context.config_manager {
        output::line(format!(
            "  file          : {}",
            manager.config_path().display()
        ));
    }
    Ok(())
}

fn parse_flag(value: &str) -> Result<bool, CommandError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(CommandError::InvalidArguments(format!(
            "Expected on/off, got `{other}`"
        ))),
    }
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut config = context.config.clone();
    match key.to_ascii_lowercase().as_str() {
        "precision" => {
            let digits = value.parse::<u8>().map_err(|_| {
                CommandError::InvalidArguments(format!(
                    "Precision must be a whole number, got `{value}`"
                ))
            })?;
            config.display_precision = digits;
        }
        "color" | "colour" => config.ui_color_enabled = parse_flag(value)?,
        "plain" => config.accessibility.plain_output = parse_flag(value)?,
        "high_contrast" | "contrast" => config.accessibility.high_contrast = parse_flag(value)?,
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "Unknown setting `{other}`"
            )))
        }
    }
    context.update_config(config)?;
    output::success(format!("Updated {key}."));
    Ok(())
}
