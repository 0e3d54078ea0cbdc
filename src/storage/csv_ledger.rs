//! Semicolon-delimited ledger file:
//! `Data Operação;Cliente;Total Bruto;Total Juros;Total Líquido`

use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
    str::FromStr,
};

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    core::utils::ensure_dir,
    currency::{format_date, format_fixed, parse_date},
    domain::{LedgerFilter, LedgerRecord},
    errors::{DiscountError, Result},
};

use super::LedgerBackend;

const DELIMITER: u8 = b';';

/// Header row written once, when the ledger file is created.
pub const LEDGER_HEADER: [&str; 5] = [
    "Data Operação",
    "Cliente",
    "Total Bruto",
    "Total Juros",
    "Total Líquido",
];

#[derive(Serialize)]
struct LedgerOutRow<'a> {
    #[serde(rename = "Data Operação")]
    operation_date: String,
    #[serde(rename = "Cliente")]
    client_name: &'a str,
    #[serde(rename = "Total Bruto")]
    total_gross: String,
    #[serde(rename = "Total Juros")]
    total_discount: String,
    #[serde(rename = "Total Líquido")]
    total_net: String,
}

#[derive(Deserialize)]
struct LedgerRow {
    #[serde(rename = "Data Operação")]
    operation_date: String,
    #[serde(rename = "Cliente")]
    client_name: String,
    #[serde(rename = "Total Bruto")]
    total_gross: String,
    #[serde(rename = "Total Juros")]
    total_discount: String,
    #[serde(rename = "Total Líquido")]
    total_net: String,
}

impl LedgerRow {
    fn into_record(self) -> std::result::Result<LedgerRecord, String> {
        let amount = |field: &str, raw: &str| {
            Decimal::from_str(raw.trim()).map_err(|err| format!("{field} `{raw}`: {err}"))
        };
        Ok(LedgerRecord {
            operation_date: parse_date(&self.operation_date).map_err(|err| err.to_string())?,
            total_gross: amount("Total Bruto", &self.total_gross)?,
            total_discount: amount("Total Juros", &self.total_discount)?,
            total_net: amount("Total Líquido", &self.total_net)?,
            client_name: self.client_name,
        })
    }
}

/// Ledger kept as a single delimited text file.
#[derive(Debug, Clone)]
pub struct CsvLedgerStore {
    path: PathBuf,
}

impl CsvLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens the file for appending, writes the header when the file is new
    /// or empty, then appends `record`. Existing rows are never rewritten.
    pub fn ensure_header_then_append(&self, record: &LedgerRecord) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let is_new = file.metadata()?.len() == 0;

        let mut writer = WriterBuilder::new()
            .delimiter(DELIMITER)
            .terminator(Terminator::Any(b'\n'))
            .has_headers(is_new)
            .from_writer(file);
        writer.serialize(LedgerOutRow {
            operation_date: format_date(record.operation_date),
            client_name: &record.client_name,
            total_gross: format_fixed(record.total_gross),
            total_discount: format_fixed(record.total_discount),
            total_net: format_fixed(record.total_net),
        })?;
        writer.flush()?;

        tracing::info!(
            path = %self.path.display(),
            client = %record.client_name,
            header_written = is_new,
            "ledger record appended"
        );
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<LedgerRecord>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "ledger file absent");
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(true)
            .from_path(&self.path)?;
        let headers = reader.headers()?.clone();
        if !headers.is_empty() && headers != StringRecord::from(LEDGER_HEADER.to_vec()) {
            return Err(DiscountError::CorruptRecord {
                line: 1,
                reason: format!("unexpected header `{}`", headers.iter().collect::<Vec<_>>().join(";")),
            });
        }

        let mut records = Vec::new();
        for result in reader.records() {
            let raw = result?;
            let line = raw.position().map_or(0, |pos| pos.line());
            let row: LedgerRow = raw
                .deserialize(Some(&headers))
                .map_err(|err| DiscountError::CorruptRecord {
                    line,
                    reason: err.to_string(),
                })?;
            let record = row
                .into_record()
                .map_err(|reason| DiscountError::CorruptRecord { line, reason })?;
            records.push(record);
        }
        Ok(records)
    }
}

impl LedgerBackend for CsvLedgerStore {
    fn append(&self, record: &LedgerRecord) -> Result<()> {
        self.ensure_header_then_append(record)
    }

    fn query(&self, filter: &LedgerFilter) -> Result<Vec<LedgerRecord>> {
        let mut records = self.read_all()?;
        records.reverse();
        records.retain(|record| filter.matches(record));
        tracing::debug!(matches = records.len(), "ledger queried");
        Ok(records)
    }
}
