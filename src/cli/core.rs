//! Shell context, dispatch and CLI error types.

use std::{env, io};

use chrono::{Local, NaiveDate};
use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    config::{Config, ConfigManager},
    currency::parse_date,
    domain::{Batch, MonthlyRate},
    errors::DiscountError,
    storage::CsvLedgerStore,
};

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::io as cli_io;
use super::output;

/// Overrides the operation date, in `DD/MM/YYYY`.
pub const TODAY_ENV: &str = "DISCOUNT_CORE_TODAY";

/// Commands that are further away than this are not suggested.
const SUGGESTION_DISTANCE: usize = 3;

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

/// Failure of a single shell command; the shell reports it and keeps going.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Core(#[from] DiscountError),
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Unknown command `{0}`")]
    UnknownCommand(String),
    #[error("Prompt failed: {0}")]
    Prompt(String),
    #[error("Exit requested")]
    ExitRequested,
}

impl From<dialoguer::Error> for CommandError {
    fn from(err: dialoguer::Error) -> Self {
        CommandError::Prompt(err.to_string())
    }
}

pub type CommandResult = Result<(), CommandError>;

/// Failure that ends the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] DiscountError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),
}

/// Session state: the batch being built plus the collaborators it needs.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub store: CsvLedgerStore,
    pub batch: Batch,
    pub rate: MonthlyRate,
    pub today: NaiveDate,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        Self::with_config_manager(mode, config_manager)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        let store = CsvLedgerStore::new(config_manager.ledger_path(&config));
        let today = match env::var(TODAY_ENV) {
            Ok(raw) => parse_date(&raw)?,
            Err(_) => Local::now().date_naive(),
        };

        output::set_preferences(output::OutputPreferences {
            plain_mode: mode == CliMode::Script,
        });
        tracing::debug!(ledger = %store.path().display(), %today, "shell context ready");

        Ok(Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            theme: ColorfulTheme::default(),
            rate: config.default_rate,
            config_manager,
            config,
            store,
            batch: Batch::default(),
            today,
            running: true,
        })
    }

    pub fn prompt(&self) -> String {
        let client = self.batch.client().unwrap_or("-");
        format!(
            "discount[{}|{}%|{}]> ",
            client,
            self.rate,
            self.batch.len()
        )
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        let handler = match self.registry.get(command) {
            Some(definition) => definition.handler,
            None => return Err(CommandError::UnknownCommand(command.to_string())),
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub fn suggest_command(&self, input: &str) {
        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(&needle, name), name))
            .min_by_key(|(distance, _)| *distance);
        match best {
            Some((distance, name)) if distance <= SUGGESTION_DISTANCE => {
                output::info(format!("Did you mean `{}`?", name));
            }
            _ => output::info("Type `help` to list commands."),
        }
    }

    pub fn report_error(&self, err: CommandError) {
        match &err {
            CommandError::UnknownCommand(name) => {
                output::error(&err);
                self.suggest_command(name);
            }
            CommandError::Core(core) if core.is_input_error() => output::warning(core),
            _ => output::error(&err),
        }
    }

    /// Asks before a destructive action; script mode proceeds unasked.
    pub fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        match self.mode {
            CliMode::Script => Ok(true),
            CliMode::Interactive => cli_io::confirm_action(&self.theme, prompt, false),
        }
    }

    /// Points the session at a different ledger file.
    pub(crate) fn reopen_store(&mut self) {
        self.store = CsvLedgerStore::new(self.config_manager.ledger_path(&self.config));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn context() -> (tempfile::TempDir, ShellContext) {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let context = ShellContext::with_config_manager(CliMode::Script, manager).unwrap();
        (dir, context)
    }

    #[test]
    fn unknown_commands_are_reported() {
        let (_dir, mut context) = context();
        let err = context.dispatch("frobnicate", &[]).unwrap_err();
        assert!(matches!(err, CommandError::UnknownCommand(ref name) if name == "frobnicate"));
    }

    #[test]
    fn exit_stops_the_loop() {
        let (_dir, mut context) = context();
        assert_eq!(context.dispatch("exit", &[]).unwrap(), LoopControl::Exit);
    }

    #[test]
    fn ledger_location_follows_configuration() {
        let (dir, mut context) = context();
        assert_eq!(context.store.path(), dir.path().join("historico_antecipacoes.csv"));

        context
            .dispatch("config", &["set-ledger", "archive/custom.csv"])
            .unwrap();
        assert_eq!(context.store.path(), dir.path().join("archive/custom.csv"));
        let reloaded = context.config_manager.load().unwrap();
        assert_eq!(context.config_manager.ledger_path(&reloaded), context.store.path());
    }

    #[test]
    fn prompt_shows_client_rate_and_size() {
        let (_dir, mut context) = context();
        context.batch.client_name = "Ana".into();
        assert_eq!(context.prompt(), "discount[Ana|3.0%|0]> ");
    }
}
