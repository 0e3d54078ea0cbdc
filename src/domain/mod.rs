//! Value types passed between the shell, the discount engine and the ledger.

pub mod batch;
pub mod rate;
pub mod record;

pub use batch::{Batch, LineItem, Totals};
pub use rate::MonthlyRate;
pub use record::{LedgerFilter, LedgerRecord};
