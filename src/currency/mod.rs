//! Money and date formatting shared by the ledger file, the shell and reports.
//!
//! Amounts are rendered with a `.` decimal point regardless of locale; the
//! ledger file depends on that.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::{DiscountError, Result};

/// Fractional digits used whenever money is displayed or persisted.
pub const DISPLAY_PLACES: u32 = 2;

/// Date layout used by the ledger file, the reports and the shell.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

pub const CURRENCY_SYMBOL: &str = "R$";

/// Rounds to display precision, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Plain fixed two-digit rendering, e.g. `1234.50`.
pub fn format_fixed(value: Decimal) -> String {
    let mut rounded = round_money(value);
    rounded.rescale(DISPLAY_PLACES);
    rounded.to_string()
}

/// Currency rendering with thousands grouping, e.g. `R$ 1,234.50`.
pub fn format_money(value: Decimal) -> String {
    format!("{} {}", CURRENCY_SYMBOL, group_thousands(&format_fixed(value)))
}

fn group_thousands(fixed: &str) -> String {
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|err| {
        DiscountError::Validation(format!("`{}` is not a DD/MM/YYYY date ({})", input, err))
    })
}

/// Parses an amount typed by a user.
///
/// Accepts `1234.5`, `1234,5` and `1,234.50`. A lone comma is read as the
/// decimal separator; when both separators appear, commas are grouping.
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let trimmed = input
        .trim()
        .trim_start_matches(CURRENCY_SYMBOL)
        .trim();
    let normalized = if trimmed.contains('.') {
        trimmed.replace(',', "")
    } else {
        trimmed.replace(',', ".")
    };
    Decimal::from_str(&normalized)
        .map_err(|_| DiscountError::Validation(format!("`{}` is not a valid amount", input)))
}
