use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{DiscountError, Result};

/// Monthly rates offered to clients, as percentages scaled by 10.
const ALLOWED_TENTHS: [i64; 7] = [20, 25, 28, 30, 35, 40, 50];

/// Index of the default rate (3.0%) inside the allowed set.
const DEFAULT_INDEX: usize = 3;

/// A monthly simple-interest rate, in percent, restricted to the offered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct MonthlyRate(Decimal);

impl MonthlyRate {
    /// Every rate a batch may be discounted at, lowest first.
    pub fn allowed() -> Vec<MonthlyRate> {
        ALLOWED_TENTHS
            .iter()
            .map(|tenths| MonthlyRate(Decimal::new(*tenths, 1)))
            .collect()
    }

    /// Validates `percent` against the offered set.
    pub fn from_percent(percent: Decimal) -> Result<Self> {
        Self::allowed()
            .into_iter()
            .find(|rate| rate.0 == percent)
            .ok_or_else(|| {
                let offered: Vec<String> = Self::allowed().iter().map(|r| r.to_string()).collect();
                DiscountError::Validation(format!(
                    "monthly rate {}% is not offered (choose one of {})",
                    percent,
                    offered.join(", ")
                ))
            })
    }

    pub fn percent(&self) -> Decimal {
        self.0
    }
}

impl Default for MonthlyRate {
    fn default() -> Self {
        MonthlyRate(Decimal::new(ALLOWED_TENTHS[DEFAULT_INDEX], 1))
    }
}

impl fmt::Display for MonthlyRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MonthlyRate {
    type Err = DiscountError;

    fn from_str(s: &str) -> Result<Self> {
        let cleaned = s.trim().trim_end_matches('%').replace(',', ".");
        let percent = Decimal::from_str(&cleaned)
            .map_err(|_| DiscountError::Validation(format!("`{}` is not a rate", s)))?;
        Self::from_percent(percent)
    }
}

impl TryFrom<Decimal> for MonthlyRate {
    type Error = DiscountError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::from_percent(value)
    }
}

impl From<MonthlyRate> for Decimal {
    fn from(rate: MonthlyRate) -> Self {
        rate.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rate_is_three_percent() {
        assert_eq!(MonthlyRate::default().percent(), Decimal::new(3, 0));
        assert_eq!(MonthlyRate::default().to_string(), "3.0");
    }

    #[test]
    fn parsing_accepts_offered_rates_only() {
        assert_eq!("2.8".parse::<MonthlyRate>().unwrap().percent(), Decimal::new(28, 1));
        assert_eq!("5".parse::<MonthlyRate>().unwrap().percent(), Decimal::new(5, 0));
        assert_eq!("3,5%".parse::<MonthlyRate>().unwrap().percent(), Decimal::new(35, 1));
        let err = "2.9".parse::<MonthlyRate>().unwrap_err();
        assert!(err.to_string().contains("not offered"), "unexpected: {err}");
        assert!("abc".parse::<MonthlyRate>().is_err());
    }
}
