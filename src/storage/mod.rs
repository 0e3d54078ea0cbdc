pub mod csv_ledger;

use crate::{
    domain::{LedgerFilter, LedgerRecord},
    errors::Result,
};

/// Append-only history of finalized batches.
pub trait LedgerBackend {
    /// Persists one record after every record already stored.
    fn append(&self, record: &LedgerRecord) -> Result<()>;

    /// Records matching `filter`, most recently appended first.
    fn query(&self, filter: &LedgerFilter) -> Result<Vec<LedgerRecord>>;

    fn all(&self) -> Result<Vec<LedgerRecord>> {
        self.query(&LedgerFilter::default())
    }
}

pub use csv_ledger::{CsvLedgerStore, LEDGER_HEADER};
