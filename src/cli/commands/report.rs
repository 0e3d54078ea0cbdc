use std::path::PathBuf;

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::report::Report;

use super::{usage_error, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "report",
        "Write a printable report of the batch",
        "report [path]",
        cmd_report,
    )]
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let report = Report::new(&context.batch, context.today)?;
    let path = match args {
        [] => context.config_manager.reports_dir().join(report.default_file_name()),
        [path] => PathBuf::from(path),
        _ => return Err(usage_error(context, "report")),
    };
    report.write_to(&path, context.config.rows_per_page)?;
    output::success(format!("Report written to {}.", path.display()));
    Ok(())
}
