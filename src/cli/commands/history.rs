use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::currency::{format_date, format_fixed, parse_date};
use crate::domain::LedgerFilter;
use crate::report::table::{Alignment, Table, TableColumn};
use crate::storage::{LedgerBackend, LEDGER_HEADER};

use super::{usage_error, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "history",
        "Search finalized batches, newest first",
        "history [--client <text>] [--date DD/MM/YYYY]",
        cmd_history,
    )]
}

fn cmd_history(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut filter = LedgerFilter::default();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        match (*flag, iter.next()) {
            ("--client", Some(needle)) => filter = filter.client(*needle),
            ("--date", Some(date)) => filter = filter.date(parse_date(date)?),
            _ => return Err(usage_error(context, "history")),
        }
    }

    let records = context.store.query(&filter)?;
    if records.is_empty() {
        if filter == LedgerFilter::default() {
            output::info("No history yet.");
        } else {
            output::info("No matching records.");
        }
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::new(LEDGER_HEADER[0], Alignment::Center),
        TableColumn::new(LEDGER_HEADER[1], Alignment::Left),
        TableColumn::new(LEDGER_HEADER[2], Alignment::Right),
        TableColumn::new(LEDGER_HEADER[3], Alignment::Right),
        TableColumn::new(LEDGER_HEADER[4], Alignment::Right),
    ]);
    for record in &records {
        table.push_row(vec![
            format_date(record.operation_date),
            record.client_name.clone(),
            format_fixed(record.total_gross),
            format_fixed(record.total_discount),
            format_fixed(record.total_net),
        ]);
    }
    output::section(format!("History ({} record(s))", records.len()));
    output::info(table.render());
    Ok(())
}
