use std::iter::Sum;
use std::ops::Add;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// One receivable (check or invoice) discounted inside a batch.
///
/// Values are computed by the discount engine when the item is added and are
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    face_value: Decimal,
    due_date: NaiveDate,
    days: i64,
    discount: Decimal,
    net_value: Decimal,
}

impl LineItem {
    pub(crate) fn new(
        face_value: Decimal,
        due_date: NaiveDate,
        days: i64,
        discount: Decimal,
    ) -> Self {
        Self {
            face_value,
            due_date,
            days,
            discount,
            net_value: face_value - discount,
        }
    }

    pub fn face_value(&self) -> Decimal {
        self.face_value
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn days(&self) -> i64 {
        self.days
    }

    pub fn discount(&self) -> Decimal {
        self.discount
    }

    pub fn net_value(&self) -> Decimal {
        self.net_value
    }
}

/// The in-progress set of receivables for one client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    pub client_name: String,
    items: Vec<LineItem>,
}

impl Batch {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
            items: Vec::new(),
        }
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Client name with surrounding whitespace removed, `None` when blank.
    pub fn client(&self) -> Option<&str> {
        let trimmed = self.client_name.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub(crate) fn push(&mut self, item: LineItem) -> &LineItem {
        self.items.push(item);
        &self.items[self.items.len() - 1]
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}

/// Unrounded sums over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub gross: Decimal,
    pub discount: Decimal,
    pub net: Decimal,
}

impl Totals {
    pub fn of(item: &LineItem) -> Self {
        Self {
            gross: item.face_value,
            discount: item.discount,
            net: item.net_value,
        }
    }
}

impl Add for Totals {
    type Output = Totals;

    fn add(self, rhs: Totals) -> Totals {
        Totals {
            gross: self.gross + rhs.gross,
            discount: self.discount + rhs.discount,
            net: self.net + rhs.net,
        }
    }
}

impl Sum for Totals {
    fn sum<I: Iterator<Item = Totals>>(iter: I) -> Self {
        iter.fold(Totals::default(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(face: i64, discount: i64) -> LineItem {
        LineItem::new(
            Decimal::new(face, 2),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            10,
            Decimal::new(discount, 2),
        )
    }

    #[test]
    fn line_item_derives_net_value() {
        let item = item(100_000, 3_000);
        assert_eq!(item.net_value(), Decimal::new(97_000, 2));
    }

    #[test]
    fn blank_client_reads_as_missing() {
        assert_eq!(Batch::new("   ").client(), None);
        assert_eq!(Batch::new("  Ana ").client(), Some("Ana"));
    }

    #[test]
    fn totals_sum_items() {
        let totals: Totals = [item(50_000, 1_000), item(30_000, 300)]
            .iter()
            .map(Totals::of)
            .sum();
        assert_eq!(totals.gross, Decimal::new(80_000, 2));
        assert_eq!(totals.discount, Decimal::new(1_300, 2));
        assert_eq!(totals.net, Decimal::new(78_700, 2));
    }
}
