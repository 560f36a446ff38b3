use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::rounding::RoundingMode;

/// One billable line item, owned by exactly one bill.
/// Amounts are integer cents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: Option<i64>,
    pub id_bill: Option<i64>,
    pub position_date: Option<NaiveDate>,
    pub tarif_code: Option<String>,
    pub tarif_description: Option<String>,
    pub quantity: i64,
    pub price_cts: i64,
    pub total_cts: i64,
}

impl Position {
    /// Recompute `total_cts` from quantity × unit price under the
    /// configured rounding policy.
    pub fn compute_total(&mut self, mode: RoundingMode) {
        self.total_cts = mode.round_cts(self.quantity * self.price_cts);
    }
}
