//! Shell state, dispatch, and error reporting shared by every command.

use std::{io, path::PathBuf, sync::Arc};

use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;
use thiserror::Error;
use tracing::{debug, info, warn};

use bakery_config::{Config, ConfigManager};
use bakery_core::{BakeryBooks, CoreError, KeyValueStore, LoadSource, SeedReason};
use bakery_domain::LedgerKind;
use bakery_storage_json::JsonFileStore;

use crate::cli::commands;
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::errors::CliError;
use crate::utils::paths::app_base_dir;

const PROMPT: &str = "bakery> ";
const PROMPT_UNSAVED: &str = "bakery*> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub books: BakeryBooks,
    pub config: Config,
    pub config_manager: Option<ConfigManager>,
    pub data_dir: Option<PathBuf>,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    /// Opens the saved books under the application base directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let base = app_base_dir();
        let config_manager = ConfigManager::with_base_dir(base.clone())?;
        let config = config_manager.load()?;
        let data_dir = config.resolve_data_dir(&base);
        let store = JsonFileStore::new(data_dir.clone())?;
        info!(data_dir = %data_dir.display(), "opening books");

        let mut context = Self::with_books(mode, BakeryBooks::open(Arc::new(store)), config);
        context.config_manager = Some(config_manager);
        context.data_dir = Some(data_dir);
        context.report_load();
        Ok(context)
    }

    /// Builds a context around already opened books.
    pub fn with_books(mode: CliMode, books: BakeryBooks, config: Config) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        apply_output_preferences(mode, &config);

        Self {
            mode,
            registry,
            books,
            config,
            config_manager: None,
            data_dir: None,
            theme: ColorfulTheme::default(),
            running: true,
        }
    }

    /// Context over an in-memory store, used by tests.
    pub fn in_memory(mode: CliMode, storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_books(mode, BakeryBooks::open(storage), Config::default())
    }

    pub(crate) fn precision(&self) -> usize {
        self.config.precision()
    }

    /// Applies and persists a changed configuration.
    pub(crate) fn update_config(&mut self, config: Config) -> CommandResult {
        if let Some(manager) = &self.config_manager {
            manager
                .save(&config)
                .map_err(|err| CommandError::Config(err.to_string()))?;
        }
        apply_output_preferences(self.mode, &config);
        self.config = config;
        Ok(())
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.all_names()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn prompt(&self) -> String {
        if self.books.unsaved_kinds().is_empty() {
            PROMPT.to_string()
        } else {
            PROMPT_UNSAVED.to_string()
        }
    }

    fn report_load(&self) {
        for kind in LedgerKind::ALL {
            let source = self.books.load_source(kind);
            debug!(%kind, %source, "ledger loaded");
            if source == LoadSource::Seeded(SeedReason::Malformed) {
                output::warning(format!(
                    "Saved {} records could not be read; starting from the defaults.",
                    kind.label()
                ));
            }
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };

        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };

        let command = raw.to_lowercase();
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        match self.dispatch(&command, raw, &args)? {
            LoopControl::Exit => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            LoopControl::Continue => Ok(LoopControl::Continue),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .all_names()
            .into_iter()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    /// Decides whether leaving the shell may discard unsaved edits.
    pub(crate) fn confirm_exit(&self) -> Result<bool, CommandError> {
        let unsaved = self.books.unsaved_kinds();
        if unsaved.is_empty() {
            return Ok(true);
        }

        let labels = unsaved
            .iter()
            .map(|kind| kind.label())
            .collect::<Vec<_>>()
            .join(" and ");

        if self.mode == CliMode::Script {
            warn!(unsaved = %labels, "exiting with unsaved changes");
            output::warning(format!("Unsaved {labels} changes were discarded."));
            return Ok(true);
        }

        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt(format!("Unsaved {labels} changes will be lost. Exit anyway?"))
            .default(false)
            .interact()?;
        Ok(confirmed)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
            }
            other => {
                warn!(error = %other, "command failed");
                output::error(other);
            }
        }
    }
}

fn apply_output_preferences(mode: CliMode, config: &Config) {
    output::set_preferences(OutputPreferences {
        plain_output: config.accessibility.plain_output || mode == CliMode::Script,
        high_contrast: config.accessibility.high_contrast,
    });
    if mode == CliMode::Script || !config.use_color() {
        colored::control::set_override(false);
    } else {
        colored::control::unset_override();
    }
}
