use assert_fs::prelude::*;
use assert_fs::TempDir;
use chrono::NaiveDate;
use discount_core::{
    domain::{LedgerFilter, LedgerRecord, Totals},
    storage::{CsvLedgerStore, LedgerBackend},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 8, day).unwrap()
}

fn record(client: &str, day: u32, gross: Decimal, discount: Decimal) -> LedgerRecord {
    LedgerRecord::new(
        date(day),
        client,
        Totals {
            gross,
            discount,
            net: gross - discount,
        },
    )
}

fn seeded_store(temp: &TempDir) -> CsvLedgerStore {
    let store = CsvLedgerStore::new(temp.child("historico.csv").path());
    store.append(&record("João Silva", 1, dec!(800), dec!(13))).unwrap();
    store.append(&record("Maria Souza", 1, dec!(1000), dec!(30))).unwrap();
    store.append(&record("joana silveira", 2, dec!(50), dec!(1.5))).unwrap();
    store
}

#[test]
fn missing_ledger_reads_as_empty() {
    let temp = TempDir::new().unwrap();
    let store = CsvLedgerStore::new(temp.child("never-written.csv").path());
    let rows = store.query(&LedgerFilter::default()).expect("absent ledger is not an error");
    assert!(rows.is_empty());
    temp.child("never-written.csv").assert(predicates::path::missing());
}

#[test]
fn appended_record_comes_back_first_with_two_decimals() {
    let temp = TempDir::new().unwrap();
    let store = seeded_store(&temp);
    let latest = LedgerRecord::new(
        date(3),
        "Rounding Ltda",
        Totals {
            gross: dec!(1234.5),
            discount: dec!(24.999999999999),
            net: dec!(1209.500000000001),
        },
    );
    store.append(&latest).unwrap();

    let rows = store.all().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0], latest.rounded());
    assert_eq!(rows[0].total_gross, dec!(1234.50));
    assert_eq!(rows[0].total_discount, dec!(25.00));
    assert_eq!(rows[0].total_net, dec!(1209.50));

    temp.child("historico.csv")
        .assert(predicates::str::contains("03/08/2024;Rounding Ltda;1234.50;25.00;1209.50"));
}

#[test]
fn query_returns_newest_first() {
    let temp = TempDir::new().unwrap();
    let store = seeded_store(&temp);
    let clients: Vec<String> = store
        .all()
        .unwrap()
        .into_iter()
        .map(|record| record.client_name)
        .collect();
    assert_eq!(clients, vec!["joana silveira", "Maria Souza", "João Silva"]);
}

#[test]
fn client_filter_is_case_insensitive_substring() {
    let temp = TempDir::new().unwrap();
    let store = seeded_store(&temp);
    let rows = store.query(&LedgerFilter::default().client("SIL")).unwrap();
    let clients: Vec<&str> = rows.iter().map(|r| r.client_name.as_str()).collect();
    assert_eq!(clients, vec!["joana silveira", "João Silva"]);
}

#[test]
fn date_and_client_filters_combine() {
    let temp = TempDir::new().unwrap();
    let store = seeded_store(&temp);

    let on_first = store.query(&LedgerFilter::default().date(date(1))).unwrap();
    assert_eq!(on_first.len(), 2);

    let both = store
        .query(&LedgerFilter::default().date(date(1)).client("silva"))
        .unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].client_name, "João Silva");

    let none = store.query(&LedgerFilter::default().date(date(9))).unwrap();
    assert!(none.is_empty());
}

#[test]
fn appends_never_rewrite_existing_rows() {
    let temp = TempDir::new().unwrap();
    let store = seeded_store(&temp);
    let before = std::fs::read_to_string(store.path()).unwrap();

    store.append(&record("Later", 5, dec!(10), dec!(0))).unwrap();
    let after = std::fs::read_to_string(store.path()).unwrap();

    assert!(after.starts_with(&before));
    assert_eq!(after.matches("Data Operação").count(), 1);
    assert_eq!(after.lines().count(), 5);
}

#[test]
fn file_written_by_another_tool_is_readable() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("historico.csv");
    file.write_str(
        "Data Operação;Cliente;Total Bruto;Total Juros;Total Líquido\n\
         10/01/2025;Padaria Central;2500.00;75.00;2425.00\n",
    )
    .unwrap();
    let store = CsvLedgerStore::new(file.path());
    store.append(&record("Next", 11, dec!(100), dec!(2))).unwrap();

    let rows = store.all().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].client_name, "Padaria Central");
    assert_eq!(rows[1].total_net, dec!(2425.00));
    assert_eq!(rows[1].operation_date, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
}
