//! Simple-interest discounting of receivables.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::currency::format_money;
use crate::domain::{Batch, LineItem, MonthlyRate, Totals};
use crate::errors::DiscountError;

use super::ServiceResult;

/// Days in the commercial month used to spread a monthly rate linearly.
const DAYS_PER_MONTH: i64 = 30;

/// Fractional digits kept on a computed discount. Holding the discount at a
/// fixed scale keeps `net + discount == face` and every sum exact.
pub const DISCOUNT_PLACES: u32 = 12;

/// Largest face value accepted for one receivable (1,000,000,000,000.00).
/// At the highest offered rate over the widest span of dates chrono can
/// represent, a discount stays below 10^18, far inside `Decimal` range.
pub const MAX_FACE_VALUE: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Pure discount computations over an explicit [`Batch`].
pub struct DiscountEngine;

impl DiscountEngine {
    /// `(monthly_rate_percent / 100) / 30`. Flat division, no calendar months.
    pub fn compute_daily_rate(monthly_rate_percent: Decimal) -> Decimal {
        monthly_rate_percent / Decimal::ONE_HUNDRED / Decimal::from(DAYS_PER_MONTH)
    }

    /// Discounts one receivable and appends it to `batch`.
    ///
    /// Rejects, leaving `batch` untouched, when the due date precedes the
    /// operation date or the face value is not positive or above
    /// [`MAX_FACE_VALUE`]. There is no floor on the net value: a distant due
    /// date can make it negative.
    pub fn add_line_item<'b>(
        batch: &'b mut Batch,
        face_value: Decimal,
        due_date: NaiveDate,
        operation_date: NaiveDate,
        rate: MonthlyRate,
    ) -> ServiceResult<&'b LineItem> {
        let days = (due_date - operation_date).num_days();
        if days < 0 {
            return Err(DiscountError::Validation(format!(
                "due date {} is {} day(s) before the operation date",
                due_date,
                -days
            )));
        }
        if face_value <= Decimal::ZERO {
            return Err(DiscountError::Validation(format!(
                "face value must be positive, got {}",
                face_value
            )));
        }
        if face_value > MAX_FACE_VALUE {
            return Err(DiscountError::Validation(format!(
                "face value exceeds the maximum of {}, got {}",
                format_money(MAX_FACE_VALUE),
                face_value
            )));
        }

        let daily_rate = Self::compute_daily_rate(rate.percent());
        let discount = (face_value * daily_rate * Decimal::from(days)).round_dp(DISCOUNT_PLACES);
        let item = LineItem::new(face_value, due_date, days, discount);
        tracing::debug!(%face_value, %due_date, days, %discount, "line item added");
        Ok(batch.push(item))
    }

    /// Sums face values, discounts and net values; zeros for an empty batch.
    pub fn aggregate(batch: &Batch) -> Totals {
        batch.items().iter().map(Totals::of).sum()
    }

    /// Drops every item. The client name is left for the caller to reuse.
    pub fn reset(batch: &mut Batch) {
        batch.clear();
    }
}
