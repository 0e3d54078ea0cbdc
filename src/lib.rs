#![doc(test(attr(deny(warnings))))]

//! Discount Core computes simple-interest discounts on receivables, keeps an
//! append-only ledger of finalized batches and renders printable reports.
//!
//! ```
//! use chrono::NaiveDate;
//! use discount_core::{
//!     core::services::DiscountEngine,
//!     domain::{Batch, MonthlyRate},
//! };
//! use rust_decimal::Decimal;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let due = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
//! let mut batch = Batch::new("João Silva");
//! DiscountEngine::add_line_item(&mut batch, Decimal::new(1000, 0), due, today, MonthlyRate::default())
//!     .unwrap();
//! let totals = DiscountEngine::aggregate(&batch);
//! assert_eq!(totals.net, Decimal::new(970, 0));
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod report;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing once per process.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Discount Core tracing initialized.");
    });
}
