//! Turning an in-progress batch into a permanent ledger record.

use chrono::NaiveDate;

use crate::domain::{Batch, LedgerRecord};
use crate::errors::DiscountError;
use crate::storage::LedgerBackend;

use super::{DiscountEngine, ServiceResult};

pub struct FinalizeService;

impl FinalizeService {
    /// Aggregates `batch`, appends the record to `backend`, then clears the
    /// batch. When the append fails the batch is left as it was so the user
    /// can retry.
    pub fn finalize(
        backend: &dyn LedgerBackend,
        batch: &mut Batch,
        operation_date: NaiveDate,
    ) -> ServiceResult<LedgerRecord> {
        let client = batch
            .client()
            .ok_or(DiscountError::MissingRequiredField("client_name"))?
            .to_string();
        if batch.is_empty() {
            return Err(DiscountError::Validation(
                "nothing to finalize: the batch has no items".into(),
            ));
        }

        let totals = DiscountEngine::aggregate(batch);
        let record = LedgerRecord::new(operation_date, client, totals);
        backend.append(&record)?;
        tracing::info!(client = %record.client_name, items = batch.len(), "batch finalized");

        DiscountEngine::reset(batch);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LedgerFilter, MonthlyRate};
    use crate::errors::Result;
    use rust_decimal_macros::dec;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryLedger {
        rows: RefCell<Vec<LedgerRecord>>,
        fail: bool,
    }

    impl LedgerBackend for MemoryLedger {
        fn append(&self, record: &LedgerRecord) -> Result<()> {
            if self.fail {
                return Err(DiscountError::StorageUnavailable("disk full".into()));
            }
            self.rows.borrow_mut().push(record.rounded());
            Ok(())
        }

        fn query(&self, filter: &LedgerFilter) -> Result<Vec<LedgerRecord>> {
            Ok(self
                .rows
                .borrow()
                .iter()
                .rev()
                .filter(|record| filter.matches(record))
                .cloned()
                .collect())
        }
    }

    fn op_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    fn filled_batch(client: &str) -> Batch {
        let mut batch = Batch::new(client);
        let due = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        DiscountEngine::add_line_item(&mut batch, dec!(1000), due, op_date(), MonthlyRate::default())
            .unwrap();
        batch
    }

    #[test]
    fn finalize_appends_and_resets() {
        let ledger = MemoryLedger::default();
        let mut batch = filled_batch("Ana");
        let record = FinalizeService::finalize(&ledger, &mut batch, op_date()).unwrap();

        assert_eq!(record.total_discount, dec!(30));
        assert!(batch.is_empty());
        assert_eq!(batch.client_name, "Ana");
        let rows = ledger.query(&LedgerFilter::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_net, dec!(970.00));
    }

    #[test]
    fn finalize_requires_client_name() {
        let ledger = MemoryLedger::default();
        let mut batch = filled_batch("  ");
        let err = FinalizeService::finalize(&ledger, &mut batch, op_date()).unwrap_err();
        assert!(matches!(err, DiscountError::MissingRequiredField("client_name")));
        assert_eq!(batch.len(), 1);
        assert!(ledger.rows.borrow().is_empty());
    }

    #[test]
    fn finalize_rejects_empty_batch() {
        let ledger = MemoryLedger::default();
        let mut batch = Batch::new("Ana");
        let err = FinalizeService::finalize(&ledger, &mut batch, op_date()).unwrap_err();
        assert!(matches!(err, DiscountError::Validation(_)));
    }

    #[test]
    fn storage_failure_preserves_batch() {
        let ledger = MemoryLedger {
            fail: true,
            ..MemoryLedger::default()
        };
        let mut batch = filled_batch("Ana");
        let before = batch.clone();
        let err = FinalizeService::finalize(&ledger, &mut batch, op_date()).unwrap_err();
        assert!(matches!(err, DiscountError::StorageUnavailable(_)));
        assert_eq!(batch, before);
    }
}
