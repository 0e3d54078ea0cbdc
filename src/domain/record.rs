use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::currency::round_money;

use super::batch::Totals;

/// One finalized batch as kept in the historical ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRecord {
    pub operation_date: NaiveDate,
    pub client_name: String,
    pub total_gross: Decimal,
    pub total_discount: Decimal,
    pub total_net: Decimal,
}

impl LedgerRecord {
    pub fn new(operation_date: NaiveDate, client_name: impl Into<String>, totals: Totals) -> Self {
        Self {
            operation_date,
            client_name: client_name.into(),
            total_gross: totals.gross,
            total_discount: totals.discount,
            total_net: totals.net,
        }
    }

    /// The record as it reads back from the ledger file: totals at 2 digits.
    pub fn rounded(&self) -> Self {
        Self {
            operation_date: self.operation_date,
            client_name: self.client_name.clone(),
            total_gross: round_money(self.total_gross),
            total_discount: round_money(self.total_discount),
            total_net: round_money(self.total_net),
        }
    }
}

/// Selection applied when reading the ledger back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerFilter {
    pub client_substring: Option<String>,
    pub exact_date: Option<NaiveDate>,
}

impl LedgerFilter {
    pub fn client(mut self, needle: impl Into<String>) -> Self {
        self.client_substring = Some(needle.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.exact_date = Some(date);
        self
    }

    /// Case-insensitive substring on the client, exact match on the date.
    /// A blank substring selects every client.
    pub fn matches(&self, record: &LedgerRecord) -> bool {
        let client_ok = match self.client_substring.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => record
                .client_name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            _ => true,
        };
        let date_ok = self
            .exact_date
            .map_or(true, |date| record.operation_date == date);
        client_ok && date_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(client: &str, day: u32) -> LedgerRecord {
        LedgerRecord::new(
            NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            client,
            Totals::default(),
        )
    }

    #[test]
    fn client_filter_ignores_case() {
        let filter = LedgerFilter::default().client("SILVA");
        assert!(filter.matches(&record("João Silva", 1)));
        assert!(!filter.matches(&record("Maria Souza", 1)));
    }

    #[test]
    fn blank_client_filter_matches_all() {
        let filter = LedgerFilter::default().client("  ");
        assert!(filter.matches(&record("Anyone", 3)));
    }

    #[test]
    fn date_filter_is_exact() {
        let filter = LedgerFilter::default().date(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert!(filter.matches(&record("A", 2)));
        assert!(!filter.matches(&record("A", 3)));
    }

    #[test]
    fn rounded_keeps_two_digits() {
        let totals = Totals {
            gross: Decimal::new(1_000_000, 3),
            discount: Decimal::new(24_999_999, 6),
            net: Decimal::new(975_000_001, 6),
        };
        let rounded = LedgerRecord::new(NaiveDate::MIN, "A", totals).rounded();
        assert_eq!(rounded.total_discount, Decimal::new(2_500, 2));
        assert_eq!(rounded.total_net, Decimal::new(97_500, 2));
    }
}
