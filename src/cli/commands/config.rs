use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::domain::MonthlyRate;

use super::{usage_error, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "Show or change saved preferences",
        "config [show | set-rate <percent> | set-page-rows <n> | set-ledger <path>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            output::section("Configuration");
            output::info(format!("  File          : {}", context.config_manager.path().display()));
            output::info(format!("  Default rate  : {}%", context.config.default_rate));
            output::info(format!("  Rows per page : {}", context.config.rows_per_page));
            output::info(format!("  Ledger        : {}", context.store.path().display()));
            return Ok(());
        }
        ["set-rate", value] => {
            let rate = value.parse::<MonthlyRate>()?;
            context.config.default_rate = rate;
            context.rate = rate;
        }
        ["set-page-rows", value] => {
            let rows = value
                .parse::<usize>()
                .ok()
                .filter(|rows| *rows > 0)
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "`{}` is not a positive number of rows",
                        value
                    ))
                })?;
            context.config.rows_per_page = rows;
        }
        ["set-ledger", path] => {
            context.config.ledger_file = Some(PathBuf::from(path));
            context.reopen_store();
        }
        _ => return Err(usage_error(context, "config")),
    }

    context.config_manager.save(&context.config)?;
    output::success("Configuration saved.");
    Ok(())
}
