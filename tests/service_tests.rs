use chrono::{Duration, NaiveDate};
use discount_core::{
    core::services::{DiscountEngine, FinalizeService},
    domain::{Batch, LedgerFilter, MonthlyRate},
    errors::DiscountError,
    report::Report,
    storage::{CsvLedgerStore, LedgerBackend},
};
use rust_decimal_macros::dec;
use tempfile::tempdir;

fn op_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn sample_batch(client: &str) -> Batch {
    let mut batch = Batch::new(client);
    let rate = MonthlyRate::default();
    DiscountEngine::add_line_item(&mut batch, dec!(500.00), op_date() + Duration::days(20), op_date(), rate)
        .unwrap();
    DiscountEngine::add_line_item(&mut batch, dec!(300.00), op_date() + Duration::days(10), op_date(), rate)
        .unwrap();
    batch
}

#[test]
fn finalize_persists_totals_and_clears_batch() {
    let dir = tempdir().unwrap();
    let store = CsvLedgerStore::new(dir.path().join("historico.csv"));
    let mut batch = sample_batch("Padaria Central");

    let record = FinalizeService::finalize(&store, &mut batch, op_date()).unwrap();
    assert_eq!(record.total_gross, dec!(800.00));
    assert_eq!(record.total_discount, dec!(13.00));
    assert_eq!(record.total_net, dec!(787.00));
    assert!(batch.is_empty());
    assert_eq!(batch.client(), Some("Padaria Central"));

    let stored = store.query(&LedgerFilter::default().client("padaria")).unwrap();
    assert_eq!(stored, vec![record.rounded()]);
}

#[test]
fn unwritable_ledger_keeps_the_batch_for_retry() {
    let dir = tempdir().unwrap();
    // A directory where the ledger file should be makes every append fail.
    let blocked = dir.path().join("historico.csv");
    std::fs::create_dir(&blocked).unwrap();
    let store = CsvLedgerStore::new(&blocked);
    let mut batch = sample_batch("Ana");
    let before = batch.clone();

    let err = FinalizeService::finalize(&store, &mut batch, op_date()).unwrap_err();
    assert!(matches!(err, DiscountError::StorageUnavailable(_)), "got {err:?}");
    assert_eq!(batch, before);

    let retry = CsvLedgerStore::new(dir.path().join("retry.csv"));
    FinalizeService::finalize(&retry, &mut batch, op_date()).unwrap();
    assert_eq!(retry.all().unwrap().len(), 1);
}

#[test]
fn report_matches_the_finalized_totals() {
    let dir = tempdir().unwrap();
    let mut batch = sample_batch("Ana Lima");
    let report = Report::new(&batch, op_date()).unwrap();
    let path = dir.path().join("out").join(report.default_file_name());
    report.write_to(&path, 25).unwrap();

    let reported = report.totals();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(path.ends_with("Relatorio_Ana_Lima.txt"));
    assert!(text.contains("Cliente: Ana Lima"));
    assert!(text.contains("Data da Operação: 01/03/2024"));
    assert!(text.contains("Total Bruto: R$ 800.00"));
    assert!(text.contains("Valor Líquido a Pagar: R$ 787.00"));

    let store = CsvLedgerStore::new(dir.path().join("historico.csv"));
    let record = FinalizeService::finalize(&store, &mut batch, op_date()).unwrap();
    assert_eq!(record.total_net, reported.net);
}
