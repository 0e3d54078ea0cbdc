//! Printable discount report for the batch being worked on.
//!
//! The layout mirrors the paper form handed to clients: a title on every
//! page, client and operation date on the first, a fixed-width item table,
//! the totals after the last item and a page number at the foot of each page.
//! Pages are separated by a form feed.

pub mod table;

use std::{fs, path::Path};

use chrono::NaiveDate;

use crate::{
    core::services::DiscountEngine,
    core::utils::ensure_dir,
    currency::{format_date, format_money},
    domain::{Batch, LineItem, Totals},
    errors::{DiscountError, Result},
};

use table::{Alignment, Table, TableColumn};

pub const REPORT_TITLE: &str = "Relatório de Antecipação";
const PAGE_BREAK: char = '\u{c}';

pub struct Report<'a> {
    client_name: &'a str,
    operation_date: NaiveDate,
    items: &'a [LineItem],
    totals: Totals,
}

impl<'a> Report<'a> {
    /// Captures `batch` for rendering. The client name is required.
    pub fn new(batch: &'a Batch, operation_date: NaiveDate) -> Result<Self> {
        let client_name = batch
            .client()
            .ok_or(DiscountError::MissingRequiredField("client_name"))?;
        if batch.is_empty() {
            return Err(DiscountError::Validation(
                "nothing to report: the batch has no items".into(),
            ));
        }
        Ok(Self {
            client_name,
            operation_date,
            items: batch.items(),
            totals: DiscountEngine::aggregate(batch),
        })
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    /// `Relatorio_<client>.txt`, keeping only characters safe in file names.
    pub fn default_file_name(&self) -> String {
        let mut slug = String::new();
        for ch in self.client_name.chars() {
            if ch.is_alphanumeric() || matches!(ch, '-' | '_') {
                slug.push(ch);
            } else if ch.is_whitespace() && !slug.ends_with('_') {
                slug.push('_');
            }
        }
        let slug = slug.trim_matches('_');
        if slug.is_empty() {
            "Relatorio.txt".to_string()
        } else {
            format!("Relatorio_{slug}.txt")
        }
    }

    pub fn render(&self, rows_per_page: usize) -> String {
        let chunks: Vec<&[LineItem]> = self.items.chunks(rows_per_page.max(1)).collect();
        let last = chunks.len() - 1;

        let pages: Vec<String> = chunks
            .iter()
            .enumerate()
            .map(|(idx, chunk)| self.render_page(idx, chunk, idx == last))
            .collect();
        let separator = format!("\n{PAGE_BREAK}");
        let mut out = pages.join(&separator);
        out.push('\n');
        out
    }

    fn render_page(&self, index: usize, items: &[LineItem], is_last: bool) -> String {
        let mut lines = vec![REPORT_TITLE.to_string(), "=".repeat(REPORT_TITLE.chars().count())];
        if index == 0 {
            lines.push(format!("Cliente: {}", self.client_name));
            lines.push(format!(
                "Data da Operação: {}",
                format_date(self.operation_date)
            ));
        }
        lines.push(String::new());

        let mut table = item_table();
        for item in items {
            table.push_row(item_row(item));
        }
        lines.push(table.render());

        if is_last {
            lines.push(String::new());
            lines.push(format!("Total Bruto: {}", format_money(self.totals.gross)));
            lines.push(format!(
                "Total Descontos: - {}",
                format_money(self.totals.discount)
            ));
            lines.push(format!(
                "Valor Líquido a Pagar: {}",
                format_money(self.totals.net)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Página {}", index + 1));
        lines.join("\n")
    }

    /// Renders and writes the report, creating parent directories.
    pub fn write_to(&self, path: &Path, rows_per_page: usize) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }
        fs::write(path, self.render(rows_per_page))?;
        tracing::info!(path = %path.display(), client = %self.client_name, "report written");
        Ok(())
    }
}

/// Column layout shared by reports and the shell's batch listing.
pub fn item_table() -> Table {
    Table::new(vec![
        TableColumn::fixed("Valor Original", 16, Alignment::Right),
        TableColumn::fixed("Vencimento", 10, Alignment::Center),
        TableColumn::fixed("Dias", 5, Alignment::Center),
        TableColumn::fixed("Desconto", 16, Alignment::Right),
        TableColumn::fixed("Líquido", 16, Alignment::Right),
    ])
}

pub fn item_row(item: &LineItem) -> Vec<String> {
    vec![
        format_money(item.face_value()),
        format_date(item.due_date()),
        item.days().to_string(),
        format_money(item.discount()),
        format_money(item.net_value()),
    ]
}
