//! Commands that build and finalize the working batch.

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::core::services::{DiscountEngine, FinalizeService};
use crate::currency::{format_date, format_money, parse_amount, parse_date};
use crate::domain::MonthlyRate;
use crate::report::{item_row, item_table};

use super::{usage_error, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("client", "Show or set the client name", "client [name]", cmd_client),
        CommandDefinition::new("rate", "Show or set the monthly rate (%)", "rate [percent]", cmd_rate),
        CommandDefinition::new(
            "add",
            "Discount a receivable and add it to the batch",
            "add <value> <due DD/MM/YYYY>",
            cmd_add,
        ),
        CommandDefinition::new("list", "Show the items in the batch", "list", cmd_list),
        CommandDefinition::new("totals", "Show the batch totals", "totals", cmd_totals),
        CommandDefinition::new("clear", "Discard every item in the batch", "clear", cmd_clear),
        CommandDefinition::new(
            "finalize",
            "Archive the batch totals in the ledger and start over",
            "finalize",
            cmd_finalize,
        ),
    ]
}

fn cmd_client(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        match context.batch.client() {
            Some(client) => output::info(format!("Client: {client}")),
            None => output::info("No client set."),
        }
        return Ok(());
    }
    context.batch.client_name = args.join(" ").trim().to_string();
    output::success(format!("Client set to {}.", context.batch.client_name));
    Ok(())
}

fn cmd_rate(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            let offered: Vec<String> = MonthlyRate::allowed().iter().map(|r| r.to_string()).collect();
            output::info(format!("Monthly rate: {}%", context.rate));
            output::info(format!("Offered rates: {}", offered.join(", ")));
        }
        [value] => {
            context.rate = value.parse::<MonthlyRate>()?;
            output::success(format!("Monthly rate set to {}%.", context.rate));
            if !context.batch.is_empty() {
                output::info("Items already in the batch keep the rate they were added with.");
            }
        }
        _ => return Err(usage_error(context, "rate")),
    }
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [value, due] = args else {
        return Err(usage_error(context, "add"));
    };
    let face_value = parse_amount(value)?;
    let due_date = parse_date(due)?;

    let item = DiscountEngine::add_line_item(
        &mut context.batch,
        face_value,
        due_date,
        context.today,
        context.rate,
    )?;
    output::success(format!(
        "Added {} due {} ({} days): discount {}, net {}.",
        format_money(item.face_value()),
        format_date(item.due_date()),
        item.days(),
        format_money(item.discount()),
        format_money(item.net_value()),
    ));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.batch.is_empty() {
        output::info("The batch is empty.");
        return Ok(());
    }
    output::section(format!(
        "Batch for {}",
        context.batch.client().unwrap_or("(no client)")
    ));
    let mut table = item_table();
    for item in context.batch.items() {
        table.push_row(item_row(item));
    }
    output::info(table.render());
    print_totals(context);
    Ok(())
}

fn cmd_totals(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    print_totals(context);
    Ok(())
}

fn print_totals(context: &ShellContext) {
    let totals = DiscountEngine::aggregate(&context.batch);
    output::info(format!("Bruto: {}", format_money(totals.gross)));
    output::info(format!("Juros: - {}", format_money(totals.discount)));
    output::info(format!("Líquido: {}", format_money(totals.net)));
}

fn cmd_clear(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.batch.is_empty() {
        output::info("The batch is already empty.");
        return Ok(());
    }
    if !context.confirm(&format!("Discard {} item(s)?", context.batch.len()))? {
        output::info("Nothing discarded.");
        return Ok(());
    }
    DiscountEngine::reset(&mut context.batch);
    output::success("Batch cleared.");
    Ok(())
}

fn cmd_finalize(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.batch.is_empty() && !context.confirm("Archive this batch in the ledger?")?
    {
        output::info("Batch kept.");
        return Ok(());
    }
    let record = FinalizeService::finalize(&context.store, &mut context.batch, context.today)?;
    output::success(format!(
        "Saved {} on {}: gross {}, discount {}, net {}.",
        record.client_name,
        format_date(record.operation_date),
        format_money(record.total_gross),
        format_money(record.total_discount),
        format_money(record.total_net),
    ));
    Ok(())
}
